//! Chain bridge subsystem.
//!
//! # Data Flow
//! ```text
//! endpoint URL
//!     → connection.rs (dial + handshake, shared ChainConnection)
//!     → client.rs (ReadOnlyBridgeClient: headers, watch-only handles)
//!     → auth_client.rs (AuthenticatedBridgeClient: + SigningIdentity, mutating handles)
//!     → bindings.rs (ContractBindings: address → handle)
//!     → handles.rs (capability traits handed to the validator)
//! ```
//!
//! # Constraints
//! - One connection per session; clients and handles share it, never copy it
//! - Everything is immutable after construction; no locks, no background tasks
//! - Errors are returned to the caller as-is, never retried here
//! - Never log private keys or sensitive data

pub mod auth_client;
pub mod bindings;
pub mod client;
pub mod connection;
pub mod context;
pub mod error;
pub mod handles;
pub mod identity;
pub mod traits;

#[cfg(test)]
pub mod mock;

pub use auth_client::AuthenticatedBridgeClient;
pub use bindings::{BindingResult, ContractBindings, RpcBindings};
pub use client::ReadOnlyBridgeClient;
pub use connection::ChainConnection;
pub use context::{CallContext, CancelHandle};
pub use error::{AuthSetupError, BindingError, BridgeError, BridgeResult, ConnectionError, NetworkError};
pub use handles::{
    ContractHandle, ContractKind, ExecutionChallengeHandle, FactoryHandle, InboxHandle,
    MessagesChallengeHandle, PendingTopChallengeHandle, ProofHandle, RollupHandle,
    RollupWatcherHandle, TransactingHandle,
};
pub use identity::SigningIdentity;
pub use traits::{ChainReader, ChainWriter};
