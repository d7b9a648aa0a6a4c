pub mod models;
pub mod plate_wells;
pub mod services;
pub mod views;
