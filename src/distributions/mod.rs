pub mod distribution_platesets;
pub mod models;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
