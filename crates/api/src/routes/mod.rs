pub mod analytics;
pub mod market;
