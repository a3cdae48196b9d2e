pub mod credentials;
pub mod dashboard;
pub mod share_lifecycle;
pub mod subscription_ledger;
pub mod subscription_view;
