use crate::{auth::AuthUser, axum_http::error_responses, usecases::share_lifecycle::ShareLifecycleUseCase};
use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post},
};
use domain::{
    repositories::{
        shares::ShareRepository, subscriptions::SubscriptionRepository, users::UserRepository,
    },
    value_objects::{enums::share_policies::SharePolicy, shares::InviteShareModel},
};
use infra::memory::{
    memory_context::MemoryContext,
    repositories::{shares::ShareMemory, subscriptions::SubscriptionMemory, users::UserMemory},
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(store: Arc<MemoryContext>, policy: SharePolicy) -> Router {
    let subscription_repository = Arc::new(SubscriptionMemory::new(Arc::clone(&store)));
    let share_repository = Arc::new(ShareMemory::new(Arc::clone(&store)));
    let user_repository = Arc::new(UserMemory::new(Arc::clone(&store)));

    let lifecycle_usecase = ShareLifecycleUseCase::new(
        subscription_repository,
        share_repository,
        user_repository,
        policy,
    );

    Router::new()
        .route("/:subscription_id/shares", get(list_shares))
        .route("/:subscription_id/invite", post(invite_member))
        .route(
            "/:subscription_id/shares/:share_id/accept",
            post(accept_share),
        )
        .route(
            "/:subscription_id/shares/:share_id/decline",
            post(decline_share),
        )
        .route("/:subscription_id/shares/:share_id", delete(remove_share))
        .with_state(Arc::new(lifecycle_usecase))
}

pub async fn list_shares<S, Sh, U>(
    State(lifecycle_usecase): State<Arc<ShareLifecycleUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(subscription_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, "shares: list request received");
    match lifecycle_usecase
        .list_by_subscription(subscription_id, user_id)
        .await
    {
        Ok(shares) => error_responses::ok(shares),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}

pub async fn invite_member<S, Sh, U>(
    State(lifecycle_usecase): State<Arc<ShareLifecycleUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(subscription_id): Path<Uuid>,
    Json(invite_share_model): Json<InviteShareModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, "shares: invite request received");
    match lifecycle_usecase
        .invite(subscription_id, user_id, invite_share_model)
        .await
    {
        Ok(share) => error_responses::created(share, "Invitation sent successfully"),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}

pub async fn accept_share<S, Sh, U>(
    State(lifecycle_usecase): State<Arc<ShareLifecycleUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path((subscription_id, share_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, %share_id, "shares: accept request received");
    match lifecycle_usecase
        .accept(subscription_id, share_id, user_id)
        .await
    {
        Ok(share) => error_responses::ok_with_message(share, "Invitation accepted"),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}

pub async fn decline_share<S, Sh, U>(
    State(lifecycle_usecase): State<Arc<ShareLifecycleUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path((subscription_id, share_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, %share_id, "shares: decline request received");
    match lifecycle_usecase
        .decline(subscription_id, share_id, user_id)
        .await
    {
        Ok(share) => error_responses::ok_with_message(share, "Invitation declined"),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}

pub async fn remove_share<S, Sh, U>(
    State(lifecycle_usecase): State<Arc<ShareLifecycleUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path((subscription_id, share_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, %share_id, "shares: remove request received");
    match lifecycle_usecase
        .remove(subscription_id, share_id, user_id)
        .await
    {
        Ok(()) => error_responses::ok_message("Member removed successfully"),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}
