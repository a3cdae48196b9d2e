pub mod shares;
pub mod subscriptions;
pub mod users;
