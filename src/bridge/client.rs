//! Read-only bridge client.
//!
//! Wraps a shared [`ChainConnection`] and forwards handle construction to
//! the binding layer. Nothing here mutates chain state.

use alloy::primitives::Address;
use alloy::rpc::types::Header;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::bridge::bindings::{BindingResult, ContractBindings, RpcBindings};
use crate::bridge::connection::ChainConnection;
use crate::bridge::context::CallContext;
use crate::bridge::error::{ConnectionError, NetworkError};
use crate::bridge::handles::{
    ContractHandle, ContractKind, FactoryHandle, InboxHandle, ProofHandle, RollupWatcherHandle,
};
use crate::bridge::traits::ChainReader;
use crate::config::ConnectionConfig;
use crate::observability::metrics;

/// Chain queries and watch-only handle constructors.
#[derive(Clone)]
pub struct ReadOnlyBridgeClient {
    connection: ChainConnection,
    bindings: Arc<dyn ContractBindings>,
}

impl ReadOnlyBridgeClient {
    /// Client over `connection` using [`RpcBindings`].
    pub fn new(connection: ChainConnection) -> Self {
        Self::with_bindings(connection, Arc::new(RpcBindings::new()))
    }

    /// Client over `connection` using a custom binding layer.
    pub fn with_bindings(connection: ChainConnection, bindings: Arc<dyn ContractBindings>) -> Self {
        Self {
            connection,
            bindings,
        }
    }

    /// Dial `endpoint_url` and wrap the connection.
    pub async fn connect(endpoint_url: &str) -> Result<Self, ConnectionError> {
        Ok(Self::new(ChainConnection::connect(endpoint_url).await?))
    }

    /// Dial the configured endpoint and wrap the connection. Binding
    /// validation calls are bounded by `call_timeout_secs`.
    pub async fn connect_with(config: &ConnectionConfig) -> Result<Self, ConnectionError> {
        let connection = ChainConnection::connect_with(config).await?;
        let bindings = RpcBindings::new()
            .with_call_timeout(Duration::from_secs(config.call_timeout_secs));
        Ok(Self::with_bindings(connection, Arc::new(bindings)))
    }

    pub fn connection(&self) -> &ChainConnection {
        &self.connection
    }

    pub(crate) fn bindings(&self) -> &dyn ContractBindings {
        self.bindings.as_ref()
    }

    /// Fetch a block header; `None` means the latest block.
    pub async fn header_by_number(
        &self,
        ctx: &CallContext,
        number: Option<u64>,
    ) -> Result<Header, NetworkError> {
        self.connection.header_by_number(ctx, number).await
    }

    pub async fn new_factory_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn FactoryHandle>> {
        observe(
            ContractKind::Factory,
            address,
            self.bindings.factory(address, &self.connection).await,
        )
    }

    pub async fn new_rollup_watcher_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn RollupWatcherHandle>> {
        observe(
            ContractKind::RollupWatcher,
            address,
            self.bindings.rollup_watcher(address, &self.connection).await,
        )
    }

    pub async fn new_proof_handle(&self, address: Address) -> BindingResult<Box<dyn ProofHandle>> {
        observe(
            ContractKind::OneStepProof,
            address,
            self.bindings.one_step_proof(address, &self.connection).await,
        )
    }

    pub async fn new_inbox_handle(&self, address: Address) -> BindingResult<Box<dyn InboxHandle>> {
        observe(
            ContractKind::PendingInbox,
            address,
            self.bindings.pending_inbox(address, &self.connection).await,
        )
    }
}

/// Log and count a handle construction, passing the result through untouched.
pub(crate) fn observe<H>(
    kind: ContractKind,
    address: Address,
    result: BindingResult<Box<H>>,
) -> BindingResult<Box<H>>
where
    H: ContractHandle + ?Sized,
{
    metrics::record_handle_constructed(kind, result.is_ok());
    match &result {
        Ok(_) => tracing::debug!(kind = %kind, address = %address, "Contract handle bound"),
        Err(e) => tracing::warn!(kind = %kind, address = %address, error = %e, "Contract binding failed"),
    }
    result
}

#[async_trait]
impl ChainReader for ReadOnlyBridgeClient {
    fn connection(&self) -> &ChainConnection {
        &self.connection
    }

    async fn header_by_number(
        &self,
        ctx: &CallContext,
        number: Option<u64>,
    ) -> Result<Header, NetworkError> {
        ReadOnlyBridgeClient::header_by_number(self, ctx, number).await
    }

    async fn new_factory_handle(&self, address: Address) -> BindingResult<Box<dyn FactoryHandle>> {
        ReadOnlyBridgeClient::new_factory_handle(self, address).await
    }

    async fn new_rollup_watcher_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn RollupWatcherHandle>> {
        ReadOnlyBridgeClient::new_rollup_watcher_handle(self, address).await
    }

    async fn new_proof_handle(&self, address: Address) -> BindingResult<Box<dyn ProofHandle>> {
        ReadOnlyBridgeClient::new_proof_handle(self, address).await
    }

    async fn new_inbox_handle(&self, address: Address) -> BindingResult<Box<dyn InboxHandle>> {
        ReadOnlyBridgeClient::new_inbox_handle(self, address).await
    }
}

impl fmt::Debug for ReadOnlyBridgeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOnlyBridgeClient")
            .field("connection", &self.connection)
            .finish_non_exhaustive()
    }
}
