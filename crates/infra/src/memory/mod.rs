pub mod memory_context;
pub mod repositories;
pub mod seed;
