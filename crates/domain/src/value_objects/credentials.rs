use serde::{Deserialize, Serialize};

/// Login credentials for the shared service. Only ever persisted as
/// ciphertext; the repository boundary encrypts on write and decrypts on
/// read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPayload {
    pub username: String,
    pub password: String,
    pub notes: Option<String>,
}
