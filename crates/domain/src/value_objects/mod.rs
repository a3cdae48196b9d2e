pub mod credentials;
pub mod dashboard;
pub mod enums;
pub mod shares;
pub mod subscriptions;
pub mod users;
