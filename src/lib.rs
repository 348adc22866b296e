pub mod analytics;
pub mod config;
pub mod journal;
pub mod models;
#[cfg(test)]
pub mod test_helpers;
