//! HTTP listener settings.

use std::env;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `BACKEND_HOST` (default 0.0.0.0) and `BACKEND_PORT` (default 3001).
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => 3001,
        };
        Ok(Self { host, port })
    }
}

fn parse_port(raw: &str) -> Result<u16, AppError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'")))
}
