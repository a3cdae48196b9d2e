use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use anyhow::{Result, anyhow};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;

const NONCE_LENGTH: usize = 12;
const KEY_INFO: &[u8] = b"passio.credential-vault.v1";

/// AES-256-GCM over a key derived from the configured master secret.
/// Ciphertext layout: 12-byte random nonce followed by the GCM output.
pub struct CredentialCipher {
    key: [u8; 32],
}

impl CredentialCipher {
    pub fn new(master_key: &str) -> Result<Self> {
        let hkdf = Hkdf::<Sha256>::new(None, master_key.as_bytes());
        let mut key = [0u8; 32];
        hkdf.expand(KEY_INFO, &mut key)
            .map_err(|_| anyhow!("credential key derivation failed"))?;
        Ok(Self { key })
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|err| anyhow!("failed to create credential cipher: {}", err))?;

        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from(nonce_bytes);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|err| anyhow!("credential encryption failed: {}", err))?;

        let mut result = nonce_bytes.to_vec();
        result.extend_from_slice(&ciphertext);
        Ok(result)
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < NONCE_LENGTH {
            return Err(anyhow!("credential ciphertext too short"));
        }

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|err| anyhow!("failed to create credential cipher: {}", err))?;

        let nonce_bytes: [u8; NONCE_LENGTH] = ciphertext[..NONCE_LENGTH]
            .try_into()
            .map_err(|_| anyhow!("invalid credential nonce"))?;
        let nonce = Nonce::from(nonce_bytes);

        cipher
            .decrypt(&nonce, &ciphertext[NONCE_LENGTH..])
            .map_err(|err| anyhow!("credential decryption failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypts_and_decrypts_round_trip() {
        let cipher = CredentialCipher::new("test-master-key").unwrap();
        let plaintext = b"family-account:hunter2";

        let ciphertext = cipher.encrypt(plaintext).unwrap();
        assert_ne!(&ciphertext[NONCE_LENGTH..], plaintext.as_slice());

        let decrypted = cipher.decrypt(&ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn same_plaintext_produces_distinct_ciphertexts() {
        let cipher = CredentialCipher::new("test-master-key").unwrap();
        let first = cipher.encrypt(b"payload").unwrap();
        let second = cipher.encrypt(b"payload").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn rejects_tampered_ciphertext() {
        let cipher = CredentialCipher::new("test-master-key").unwrap();
        let mut ciphertext = cipher.encrypt(b"payload").unwrap();
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0x01;
        assert!(cipher.decrypt(&ciphertext).is_err());
    }

    #[test]
    fn rejects_wrong_master_key() {
        let cipher = CredentialCipher::new("test-master-key").unwrap();
        let other = CredentialCipher::new("another-master-key").unwrap();
        let ciphertext = cipher.encrypt(b"payload").unwrap();
        assert!(other.decrypt(&ciphertext).is_err());
    }

    #[test]
    fn rejects_truncated_ciphertext() {
        let cipher = CredentialCipher::new("test-master-key").unwrap();
        assert!(cipher.decrypt(&[0u8; 4]).is_err());
    }
}
