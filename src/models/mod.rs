// Module exports for models

pub mod filter;
pub mod settings;
pub mod task;
