pub mod aggregate;
pub mod config;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod passenger;
pub mod report;
pub mod stats;
