pub mod models;
pub mod sample_wells;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
