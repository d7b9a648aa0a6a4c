pub mod models;
pub mod services;
pub mod views;
