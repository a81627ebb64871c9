pub mod config;
pub mod credentials;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
