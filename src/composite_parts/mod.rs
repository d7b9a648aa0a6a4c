pub mod composite_part_parts;
pub mod models;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
