//! Error taxonomy for the bridge layer.
//!
//! Each failure class gets its own type so call sites can only return the
//! errors they can actually produce:
//!
//! ```text
//! ChainConnection::connect     → ConnectionError
//! ChainConnection::header_*    → NetworkError
//! new_*_handle                 → BindingError
//! AuthenticatedBridgeClient::connect → AuthSetupError (wraps the above)
//! ```

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::bridge::handles::ContractKind;

/// Failure to establish a session with the chain endpoint.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The endpoint URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The transport could not reach the endpoint or the handshake failed.
    #[error("Endpoint '{url}' unreachable: {reason}")]
    Unreachable { url: String, reason: String },

    /// The handshake did not complete within the connect timeout.
    #[error("Handshake with '{url}' timed out after {secs} seconds")]
    Timeout { url: String, secs: u64 },

    /// The endpoint serves a different chain than configured.
    #[error("Chain ID mismatch at '{url}': expected {expected}, got {actual}")]
    ChainMismatch {
        url: String,
        expected: u64,
        actual: u64,
    },
}

/// Failure of a single RPC call on an established connection.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The transport returned an error.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The endpoint has no block at the requested height.
    #[error("Header not found for block {0}")]
    HeaderNotFound(String),

    /// The caller cancelled the call.
    #[error("RPC call cancelled")]
    Cancelled,

    /// The caller's deadline passed before the endpoint answered.
    #[error("RPC call deadline exceeded")]
    DeadlineExceeded,
}

impl NetworkError {
    /// Whether the call ended because the caller gave up on it.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, NetworkError::Cancelled | NetworkError::DeadlineExceeded)
    }

    /// Whether repeating the same call right away could succeed.
    ///
    /// A missing header only appears once the block is mined, so it is
    /// left to the caller to decide when to ask again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, NetworkError::Rpc(_) | NetworkError::DeadlineExceeded)
    }
}

/// Failure reported by the binding layer while constructing a handle.
#[derive(Debug, Error)]
pub enum BindingError {
    /// No contract code is deployed at the address.
    #[error("No {kind} contract deployed at {address}")]
    NoContractCode { kind: ContractKind, address: Address },

    /// The contract at the address does not expose the expected interface.
    #[error("{kind} contract at {address} does not match the expected ABI: {reason}")]
    AbiMismatch {
        kind: ContractKind,
        address: Address,
        reason: String,
    },

    /// The binding could not query the connection to validate the address.
    #[error("Could not validate {kind} contract at {address}: {reason}")]
    Unreachable {
        kind: ContractKind,
        address: Address,
        reason: String,
    },

    /// The signing identity cannot pay for transactions.
    #[error("Signer {signer} has insufficient funds (balance {balance})")]
    InsufficientFunds { signer: Address, balance: U256 },

    /// The signing identity's nonce conflicts with pending state.
    #[error("Nonce conflict for signer {signer}: {reason}")]
    NonceConflict { signer: Address, reason: String },
}

/// Failure while building the authenticated client's read-only base.
#[derive(Debug, Error)]
pub enum AuthSetupError {
    #[error("Authenticated client setup failed: {0}")]
    Connection(#[source] ConnectionError),

    #[error("Authenticated client setup failed: {0}")]
    Binding(#[source] BindingError),
}

impl AuthSetupError {
    /// The connection failure that caused setup to fail, if any.
    pub fn connection_error(&self) -> Option<&ConnectionError> {
        match self {
            AuthSetupError::Connection(e) => Some(e),
            AuthSetupError::Binding(_) => None,
        }
    }
}

impl From<ConnectionError> for AuthSetupError {
    fn from(err: ConnectionError) -> Self {
        AuthSetupError::Connection(err)
    }
}

impl From<BindingError> for AuthSetupError {
    fn from(err: BindingError) -> Self {
        AuthSetupError::Binding(err)
    }
}

/// Any error raised by the bridge layer.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    AuthSetup(#[from] AuthSetupError),

    /// The signing identity could not be loaded.
    #[error("Signer error: {0}")]
    Signer(String),
}

/// Result type for bridge operations that can fail in more than one way.
pub type BridgeResult<T> = Result<T, BridgeError>;
