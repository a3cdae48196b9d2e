use anyhow::{Ok, Result};
use domain::value_objects::enums::share_policies::SharePolicy;

use super::config_model::{Auth, BackendServer, CredentialVault, DotEnvyConfig};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let auth = Auth {
        jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
    };

    let credential_vault = CredentialVault {
        master_key: std::env::var("CREDENTIAL_MASTER_KEY")
            .expect("CREDENTIAL_MASTER_KEY is invalid"),
    };

    let share_policy = SharePolicy::from_str(
        &std::env::var("SHARE_VALIDATION_POLICY").unwrap_or_else(|_| "strict".to_string()),
    );

    Ok(DotEnvyConfig {
        backend_server,
        auth,
        credential_vault,
        share_policy,
    })
}
