pub mod credential_cipher;
