//! Application configuration loaded from environment variables.

use std::time::Duration;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `PAYMENT_SUCCESS_RATE` — simulated capture success rate (default: `0.95`)
/// - `INVENTORY_SUCCESS_RATE` — simulated reservation success rate (default: `0.98`)
/// - `PAYMENT_LATENCY_MS` — simulated payment latency (default: `500`)
/// - `INVENTORY_LATENCY_MS` — simulated inventory latency (default: `300`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub payment_success_rate: f64,
    pub inventory_success_rate: f64,
    pub payment_latency: Duration,
    pub inventory_latency: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            payment_success_rate: env_f64("PAYMENT_SUCCESS_RATE", 0.95),
            inventory_success_rate: env_f64("INVENTORY_SUCCESS_RATE", 0.98),
            payment_latency: Duration::from_millis(env_u64("PAYMENT_LATENCY_MS", 500)),
            inventory_latency: Duration::from_millis(env_u64("INVENTORY_LATENCY_MS", 300)),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            payment_success_rate: 0.95,
            inventory_success_rate: 0.98,
            payment_latency: Duration::from_millis(500),
            inventory_latency: Duration::from_millis(300),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.payment_success_rate, 0.95);
        assert_eq!(config.inventory_success_rate, 0.98);
        assert_eq!(config.payment_latency, Duration::from_millis(500));
        assert_eq!(config.inventory_latency, Duration::from_millis(300));
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_addr_default() {
        let config = Config::default();
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }
}
