pub mod models;
pub mod plan_items;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
