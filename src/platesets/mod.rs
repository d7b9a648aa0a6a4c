pub mod models;
pub mod plateset_plates;
pub mod services;
pub mod views;
