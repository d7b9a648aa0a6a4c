pub mod collection_parts;
pub mod collection_tags;
pub mod models;
pub mod views;

#[cfg(test)]
mod tests;
