pub mod aggregate;
pub mod chart;
pub mod config;
pub mod dates;
pub mod error;
pub mod export;
pub mod football_data;
pub mod model;
pub mod pipeline;
pub mod resolver;
pub mod server;
