pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
