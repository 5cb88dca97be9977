// Rust TaskGrid Library
// Layout and interaction engine for date-ranged tasks on a month grid

pub mod engine;
pub mod gestures;
pub mod grid;
pub mod models;
pub mod services;
pub mod utils;
