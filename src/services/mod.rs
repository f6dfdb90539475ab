pub mod aggregator;
pub mod cache;
pub mod categorizer;
pub mod formatter;
pub mod refresher;
pub mod resolver;
pub mod upstream;
