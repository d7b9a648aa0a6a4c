pub mod models;
pub mod part_tags;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
