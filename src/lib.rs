pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod reflection;
pub mod samples;
pub mod schema;
pub mod services;
pub mod types;

#[cfg(test)]
pub mod testing;
