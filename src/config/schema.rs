//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section is `#[serde(default)]` so a minimal file only names what
//! differs from the defaults.

use serde::{Deserialize, Serialize};

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Chain endpoint settings.
    pub connection: ConnectionConfig,

    /// Signing identity settings.
    pub signer: SignerConfig,

    /// Known contract addresses.
    pub contracts: ContractsConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Chain endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// JSON-RPC endpoint URL (http, https, ws, wss or an IPC path).
    pub rpc_url: String,

    /// Handshake timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Default per-call timeout in seconds for callers without their own deadline.
    pub call_timeout_secs: u64,

    /// Reject endpoints serving a different chain (e.g. 31337 for local Anvil).
    pub expected_chain_id: Option<u64>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            connect_timeout_secs: 10,
            call_timeout_secs: 30,
            expected_chain_id: None,
        }
    }
}

/// Signing identity configuration.
///
/// Only the name of the environment variable is configured; key material
/// never appears in config files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignerConfig {
    pub private_key_env: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            private_key_env: crate::bridge::identity::PRIVATE_KEY_ENV_VAR.to_string(),
        }
    }
}

/// Contract addresses, hex encoded.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractsConfig {
    pub factory: Option<String>,
    pub rollup: Option<String>,
    pub inbox: Option<String>,
    pub one_step_proof: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,

    /// Prometheus scrape address. Metrics exporter is off when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "chain_bridge=info".to_string(),
            metrics_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.connection.rpc_url, "http://localhost:8545");
        assert_eq!(config.connection.connect_timeout_secs, 10);
        assert!(config.connection.expected_chain_id.is_none());
        assert_eq!(config.signer.private_key_env, "BRIDGE_PRIVATE_KEY");
        assert!(config.contracts.rollup.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BridgeConfig = toml::from_str(
            r#"
            [connection]
            rpc_url = "ws://127.0.0.1:8546"
            expected_chain_id = 31337

            [contracts]
            rollup = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            "#,
        )
        .unwrap();

        assert_eq!(config.connection.rpc_url, "ws://127.0.0.1:8546");
        assert_eq!(config.connection.expected_chain_id, Some(31337));
        assert_eq!(config.connection.call_timeout_secs, 30);
        assert!(config.contracts.rollup.is_some());
        assert_eq!(config.observability.log_filter, "chain_bridge=info");
    }
}
