//! Shared chain connection.
//!
//! # Responsibilities
//! - Dial the JSON-RPC endpoint and verify it answers (`eth_chainId`)
//! - Own the provider; every client and handle shares this one instance
//! - Forward header queries, honoring per-call cancellation

use alloy::eips::BlockNumberOrTag;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::Header;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::bridge::context::CallContext;
use crate::bridge::error::{ConnectionError, NetworkError};
use crate::config::ConnectionConfig;
use crate::observability::metrics;

/// Endpoint schemes the transport can dial; anything else must be an IPC path.
pub(crate) const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "ws", "wss"];

struct Inner {
    url: String,
    chain_id: u64,
    provider: Arc<dyn Provider + Send + Sync>,
}

/// Handle to a chain endpoint.
///
/// Cloning is cheap and yields the same connection, not a new one.
#[derive(Clone)]
pub struct ChainConnection {
    inner: Arc<Inner>,
}

impl ChainConnection {
    /// Dial `endpoint_url` with default settings.
    pub async fn connect(endpoint_url: &str) -> Result<Self, ConnectionError> {
        let config = ConnectionConfig {
            rpc_url: endpoint_url.to_string(),
            ..ConnectionConfig::default()
        };
        Self::connect_with(&config).await
    }

    /// Dial the configured endpoint.
    ///
    /// Succeeds only once the endpoint has answered `eth_chainId` within the
    /// connect timeout and, if configured, reported the expected chain.
    pub async fn connect_with(config: &ConnectionConfig) -> Result<Self, ConnectionError> {
        let url = config.rpc_url.trim();
        check_endpoint(url)?;

        let secs = config.connect_timeout_secs;
        let handshake = async {
            let provider = ProviderBuilder::new()
                .connect(url)
                .await
                .map_err(|e| unreachable(url, e))?;
            let chain_id = provider
                .get_chain_id()
                .await
                .map_err(|e| unreachable(url, e))?;
            Ok::<_, ConnectionError>((provider, chain_id))
        };

        let (provider, chain_id) = match timeout(Duration::from_secs(secs), handshake).await {
            Ok(Ok(result)) => {
                metrics::record_rpc_call("eth_chainId", true);
                result
            }
            Ok(Err(e)) => {
                metrics::record_rpc_call("eth_chainId", false);
                tracing::warn!(rpc_url = %url, error = %e, "Chain connection failed");
                return Err(e);
            }
            Err(_) => {
                metrics::record_rpc_call("eth_chainId", false);
                tracing::warn!(rpc_url = %url, timeout_secs = secs, "Chain handshake timed out");
                return Err(ConnectionError::Timeout {
                    url: url.to_string(),
                    secs,
                });
            }
        };

        if let Some(expected) = config.expected_chain_id {
            if expected != chain_id {
                return Err(ConnectionError::ChainMismatch {
                    url: url.to_string(),
                    expected,
                    actual: chain_id,
                });
            }
        }

        tracing::info!(rpc_url = %url, chain_id, "Chain connection established");

        Ok(Self::from_provider(url, Arc::new(provider), chain_id))
    }

    /// Wrap a provider that is already connected.
    pub fn from_provider(
        url: impl Into<String>,
        provider: Arc<dyn Provider + Send + Sync>,
        chain_id: u64,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                url: url.into(),
                chain_id,
                provider,
            }),
        }
    }

    /// Fetch a block header; `None` means the latest block.
    pub async fn header_by_number(
        &self,
        ctx: &CallContext,
        number: Option<u64>,
    ) -> Result<Header, NetworkError> {
        let tag = number.map_or(BlockNumberOrTag::Latest, BlockNumberOrTag::Number);

        let result = ctx
            .run(async { self.inner.provider.get_block_by_number(tag).await })
            .await;

        let outcome = match result {
            Ok(Ok(Some(block))) => Ok(block.header),
            Ok(Ok(None)) => Err(NetworkError::HeaderNotFound(
                number.map_or_else(|| "latest".to_string(), |n| n.to_string()),
            )),
            Ok(Err(e)) => Err(NetworkError::Rpc(e.to_string())),
            Err(e) => Err(e),
        };

        metrics::record_rpc_call("eth_getBlockByNumber", outcome.is_ok());
        if let Err(e) = &outcome {
            tracing::debug!(rpc_url = %self.inner.url, error = %e, "Header query failed");
        }
        outcome
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Chain ID reported during the handshake.
    pub fn chain_id(&self) -> u64 {
        self.inner.chain_id
    }

    /// The underlying provider, for binding layers.
    pub fn provider(&self) -> &(dyn Provider + Send + Sync) {
        self.inner.provider.as_ref()
    }

    /// Whether `other` is this very connection (not merely an equal one).
    pub fn same_as(&self, other: &ChainConnection) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ChainConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConnection")
            .field("url", &self.inner.url)
            .field("chain_id", &self.inner.chain_id)
            .finish()
    }
}

fn check_endpoint(url: &str) -> Result<(), ConnectionError> {
    let invalid = |reason: String| ConnectionError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    if url.is_empty() {
        return Err(invalid("empty endpoint".to_string()));
    }

    if !url.contains("://") {
        return if url.ends_with(".ipc") {
            Ok(())
        } else {
            Err(invalid("not a URL or IPC socket path".to_string()))
        };
    }

    let parsed = url::Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if !SUPPORTED_SCHEMES.contains(&parsed.scheme()) {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}

fn unreachable(url: &str, err: impl fmt::Display) -> ConnectionError {
    ConnectionError::Unreachable {
        url: url.to_string(),
        reason: err.to_string(),
    }
}
