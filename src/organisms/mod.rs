pub mod models;
pub mod organism_tags;
pub mod views;
