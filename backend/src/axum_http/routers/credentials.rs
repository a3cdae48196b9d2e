use crate::{
    auth::AuthUser, axum_http::error_responses, config::config_model::DotEnvyConfig,
    usecases::credentials::CredentialVaultUseCase,
};
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::put,
};
use domain::{
    repositories::{
        credentials::CredentialRepository, shares::ShareRepository,
        subscriptions::SubscriptionRepository,
    },
    value_objects::credentials::CredentialPayload,
};
use infra::{
    crypto::credential_cipher::CredentialCipher,
    memory::{
        memory_context::MemoryContext,
        repositories::{
            credentials::CredentialMemory, shares::ShareMemory, subscriptions::SubscriptionMemory,
        },
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(store: Arc<MemoryContext>, config: &DotEnvyConfig) -> Result<Router> {
    let cipher = CredentialCipher::new(&config.credential_vault.master_key)?;
    let subscription_repository = Arc::new(SubscriptionMemory::new(Arc::clone(&store)));
    let share_repository = Arc::new(ShareMemory::new(Arc::clone(&store)));
    let credential_repository = Arc::new(CredentialMemory::new(Arc::clone(&store), cipher));

    let vault_usecase = CredentialVaultUseCase::new(
        subscription_repository,
        share_repository,
        credential_repository,
    );

    // Retrieval is a POST so credentials never ride in URLs or caches.
    Ok(Router::new()
        .route(
            "/:subscription_id/credentials",
            put(store_credentials).post(retrieve_credentials),
        )
        .with_state(Arc::new(vault_usecase)))
}

pub async fn store_credentials<S, Sh, C>(
    State(vault_usecase): State<Arc<CredentialVaultUseCase<S, Sh, C>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(subscription_id): Path<Uuid>,
    Json(payload): Json<CredentialPayload>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    C: CredentialRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, "credentials: store request received");
    match vault_usecase.store(subscription_id, user_id, payload).await {
        Ok(()) => error_responses::ok_message("Credentials stored successfully"),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}

pub async fn retrieve_credentials<S, Sh, C>(
    State(vault_usecase): State<Arc<CredentialVaultUseCase<S, Sh, C>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(subscription_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    C: CredentialRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, "credentials: retrieve request received");
    match vault_usecase.retrieve(subscription_id, user_id).await {
        Ok(payload) => error_responses::ok(payload),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}
