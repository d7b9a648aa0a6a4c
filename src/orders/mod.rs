pub mod models;
pub mod order_distributions;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
