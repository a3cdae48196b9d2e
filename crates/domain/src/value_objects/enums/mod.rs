pub mod billing_cycles;
pub mod share_policies;
pub mod share_roles;
pub mod share_statuses;
