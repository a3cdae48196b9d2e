use crate::{
    auth::AuthUser,
    axum_http::error_responses,
    usecases::{dashboard::DashboardUseCase, subscription_view::SubscriptionViewResolver},
};
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use domain::repositories::{
    shares::ShareRepository, subscriptions::SubscriptionRepository, users::UserRepository,
};
use infra::memory::{
    memory_context::MemoryContext,
    repositories::{shares::ShareMemory, subscriptions::SubscriptionMemory, users::UserMemory},
};
use std::sync::Arc;
use tracing::info;

pub fn routes(store: Arc<MemoryContext>) -> Router {
    let subscription_repository = Arc::new(SubscriptionMemory::new(Arc::clone(&store)));
    let share_repository = Arc::new(ShareMemory::new(Arc::clone(&store)));
    let user_repository = Arc::new(UserMemory::new(Arc::clone(&store)));

    let view_resolver = Arc::new(SubscriptionViewResolver::new(
        Arc::clone(&share_repository),
        Arc::clone(&user_repository),
    ));
    let dashboard_usecase =
        DashboardUseCase::new(subscription_repository, share_repository, view_resolver);

    Router::new()
        .route("/stats", get(dashboard_stats))
        .route("/renewals", get(upcoming_renewals))
        .with_state(Arc::new(dashboard_usecase))
}

pub async fn dashboard_stats<S, Sh, U>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, "dashboard: stats request received");
    match dashboard_usecase.stats(user_id).await {
        Ok(stats) => error_responses::ok(stats),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}

pub async fn upcoming_renewals<S, Sh, U>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<S, Sh, U>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    Sh: ShareRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    info!(%user_id, "dashboard: renewals request received");
    match dashboard_usecase.upcoming_renewals(user_id).await {
        Ok(renewals) => error_responses::ok(renewals),
        Err(err) => error_responses::failure(err.status_code(), &err.to_string()),
    }
}
