// Service module exports

pub mod database;
pub mod notification;
pub mod settings;
pub mod task;
