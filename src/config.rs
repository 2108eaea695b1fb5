use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};
use crate::pipeline::TextFilter;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub text_filter: TextFilter,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let text_filter = match lookup("TEXT_FILTER") {
            Some(value) => value.parse()?,
            None => TextFilter::default(),
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            text_filter,
        })
    }
}
