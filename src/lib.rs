pub mod config;
pub mod error;
pub mod output;
pub mod sampling;
pub mod significance;
pub mod statistics;
pub mod table_reader;
pub mod types;

#[cfg(feature = "plotting")]
pub mod plotting;
