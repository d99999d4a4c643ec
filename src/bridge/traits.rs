//! Capability traits shared by the bridge clients.
//!
//! ```text
//! ChainWriter (authenticated: signer address + mutating handles)
//!     └── ChainReader (header queries + watch-only handles)
//! ```
//!
//! Every writer is a reader bound to the same connection, so code that
//! only needs to watch the chain can take `&dyn ChainReader` and accept
//! either client.

use alloy::primitives::Address;
use alloy::rpc::types::Header;
use async_trait::async_trait;

use crate::bridge::bindings::BindingResult;
use crate::bridge::connection::ChainConnection;
use crate::bridge::context::CallContext;
use crate::bridge::error::NetworkError;
use crate::bridge::handles::{
    ExecutionChallengeHandle, FactoryHandle, InboxHandle, MessagesChallengeHandle,
    PendingTopChallengeHandle, ProofHandle, RollupHandle, RollupWatcherHandle,
};

/// Read-only access to the chain.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// The connection every handle from this client is bound to.
    fn connection(&self) -> &ChainConnection;

    async fn header_by_number(
        &self,
        ctx: &CallContext,
        number: Option<u64>,
    ) -> Result<Header, NetworkError>;

    async fn new_factory_handle(&self, address: Address) -> BindingResult<Box<dyn FactoryHandle>>;

    async fn new_rollup_watcher_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn RollupWatcherHandle>>;

    async fn new_proof_handle(&self, address: Address) -> BindingResult<Box<dyn ProofHandle>>;

    async fn new_inbox_handle(&self, address: Address) -> BindingResult<Box<dyn InboxHandle>>;
}

/// Read access plus a signing identity.
#[async_trait]
pub trait ChainWriter: ChainReader {
    /// The signing identity's from-address.
    fn address(&self) -> Address;

    async fn new_rollup_handle(&self, address: Address) -> BindingResult<Box<dyn RollupHandle>>;

    async fn new_execution_challenge_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn ExecutionChallengeHandle>>;

    async fn new_messages_challenge_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn MessagesChallengeHandle>>;

    async fn new_pending_top_challenge_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn PendingTopChallengeHandle>>;
}
