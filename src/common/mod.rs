pub mod crud;
pub mod errors;
pub mod links;
pub mod models;
pub mod state;
pub mod tree;
pub mod validators;
pub mod views;

#[cfg(test)]
mod tests;
