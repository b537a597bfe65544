pub mod config;
pub mod database;
pub mod error;
pub mod extractor;
pub mod guards;
pub mod middleware;
pub mod openapi;
