//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for escrow logging and tracing.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output (for development)
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Network identifier (testnet, mainnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "htlc-escrow".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "testnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: htlc-escrow)
    /// - `HTLC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `HTLC_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `HTLC_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `HTLC_NETWORK`: Network name (default: testnet)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "htlc-escrow".to_string()),

            log_level: env::var("HTLC_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("HTLC_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("HTLC_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            network: env::var("HTLC_NETWORK").unwrap_or_else(|_| "testnet".to_string()),
        }
    }

    /// Quiet configuration for test binaries: warnings only, no JSON.
    pub fn for_tests() -> Self {
        Self {
            service_name: "htlc-escrow-test".to_string(),
            log_level: "warn".to_string(),
            ..Self::default()
        }
    }

    /// Service name qualified with the network, e.g. `htlc-escrow@testnet`.
    pub fn full_service_name(&self) -> String {
        format!("{}@{}", self.service_name, self.network)
    }
}
