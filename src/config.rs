use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Upper bound for one scrape request, end to end.
    pub scrape_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        // Load server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        let timeout_secs = env::var("SCRAPE_TIMEOUT_SECS").unwrap_or_else(|_| "300".to_string());
        let timeout_secs = timeout_secs
            .parse::<u64>()
            .map_err(|e| AppError::ConfigError(format!("Invalid scrape timeout: {}", e)))?;

        Ok(Config {
            server_addr,
            scrape_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_env_is_unset() {
        // Other tests never set these, so a plain load sees the defaults.
        unsafe {
            env::remove_var("HOST");
            env::remove_var("PORT");
            env::remove_var("SCRAPE_TIMEOUT_SECS");
        }

        let config = Config::load().unwrap();
        assert_eq!(config.server_addr.port(), 3000);
        assert_eq!(config.scrape_timeout, Duration::from_secs(300));
    }
}
