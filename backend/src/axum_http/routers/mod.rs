pub mod credentials;
pub mod dashboard;
pub mod shares;
pub mod subscriptions;
