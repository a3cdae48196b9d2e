use crate::{
    auth::AuthUser,
    axum_http::error_responses,
    usecases::{
        subscription_ledger::SubscriptionLedgerUseCase, subscription_view::SubscriptionViewResolver,
    },
};
use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    routing::post,
};
use domain::{
    repositories::{
        shares::ShareRepository, subscriptions::SubscriptionRepository, users::UserRepository,
    },
    value_objects::subscriptions::{InsertSubscriptionModel, UpdateSubscriptionModel},
};
use infra::memory::{
    memory_context::MemoryContext,
    repositories::{shares::ShareMemory, subscriptions::SubscriptionMemory, users::UserMemory},
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub fn routes(store: Arc<MemoryContext>) -> Router {
    let subscription_repository = Arc::new(SubscriptionMemory::new(Arc::clone(&store)));
    let share_repository = Arc::new(ShareMemory::new(Arc::clone(&store)));
    let user_repository = Arc::new(UserMemory::new(Arc::clone(&store)));

    let view_resolver = Arc::new(SubscriptionViewResolver::new(
        Arc::clone(&share_repository),
        Arc::clone(&user_repository),
    ));
    let ledger_usecase = SubscriptionLedgerUseCase::new(
        subscription_repository,
        share_repository,
        view_resolver,
    );

    Router::new()
        .route("/", post(create_subscription).get(list_owned_subscriptions))
        .route("/shared", get(list_shared_subscriptions))
        .route(
            "/:subscription_id",
            get(get_subscription).patch(update_subscription),
        )
        .with_state(Arc::new(ledger_usecase))
}

pub async fn create_subscription<S, Sh, U>(
    State(ledger_usecase): State<Arc<SubscriptionLedgerUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(insert_subscription_model): Json<InsertSubscriptionModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, "subscriptions: create request received");
    match ledger_usecase
        .create_subscription(user_id, insert_subscription_model)
        .await
    {
        Ok(subscription) => {
            error_responses::created(subscription, "Subscription created successfully")
        }
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}

pub async fn list_owned_subscriptions<S, Sh, U>(
    State(ledger_usecase): State<Arc<SubscriptionLedgerUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, "subscriptions: list owned request received");
    match ledger_usecase.list_owned(user_id).await {
        Ok(subscriptions) => error_responses::ok(subscriptions),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}

pub async fn list_shared_subscriptions<S, Sh, U>(
    State(ledger_usecase): State<Arc<SubscriptionLedgerUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, "subscriptions: list shared request received");
    match ledger_usecase.list_shared_with(user_id).await {
        Ok(subscriptions) => error_responses::ok(subscriptions),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}

pub async fn get_subscription<S, Sh, U>(
    State(ledger_usecase): State<Arc<SubscriptionLedgerUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(subscription_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, "subscriptions: get request received");
    match ledger_usecase.get_subscription(subscription_id).await {
        Ok(subscription) => error_responses::ok(subscription),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}

pub async fn update_subscription<S, Sh, U>(
    State(ledger_usecase): State<Arc<SubscriptionLedgerUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(subscription_id): Path<Uuid>,
    Json(update_subscription_model): Json<UpdateSubscriptionModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, %subscription_id, "subscriptions: update request received");
    match ledger_usecase
        .update_subscription(subscription_id, user_id, update_subscription_model)
        .await
    {
        Ok(subscription) => {
            error_responses::ok_with_message(subscription, "Subscription updated successfully")
        }
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}
