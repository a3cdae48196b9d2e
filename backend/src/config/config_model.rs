use domain::value_objects::enums::share_policies::SharePolicy;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub auth: Auth,
    pub credential_vault: CredentialVault,
    pub share_policy: SharePolicy,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Auth {
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub struct CredentialVault {
    pub master_key: String,
}
