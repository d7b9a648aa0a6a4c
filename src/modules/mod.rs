pub mod models;
pub mod schemas;
pub mod views;
