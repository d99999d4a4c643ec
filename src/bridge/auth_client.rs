//! Authenticated bridge client.
//!
//! A [`ReadOnlyBridgeClient`] plus a [`SigningIdentity`]. Read operations
//! are forwarded to the inner client, so every handle either variant hands
//! out is bound to the same connection.

use alloy::primitives::Address;
use alloy::rpc::types::Header;
use async_trait::async_trait;

use crate::bridge::bindings::BindingResult;
use crate::bridge::client::{observe, ReadOnlyBridgeClient};
use crate::bridge::connection::ChainConnection;
use crate::bridge::context::CallContext;
use crate::bridge::error::{AuthSetupError, NetworkError};
use crate::bridge::handles::{
    ContractKind, ExecutionChallengeHandle, FactoryHandle, InboxHandle, MessagesChallengeHandle,
    PendingTopChallengeHandle, ProofHandle, RollupHandle, RollupWatcherHandle,
};
use crate::bridge::identity::SigningIdentity;
use crate::bridge::traits::{ChainReader, ChainWriter};
use crate::config::ConnectionConfig;

/// Read-only client plus the identity used to sign transactions.
#[derive(Debug, Clone)]
pub struct AuthenticatedBridgeClient {
    read_only: ReadOnlyBridgeClient,
    identity: SigningIdentity,
}

impl AuthenticatedBridgeClient {
    /// Compose an existing read-only client with `identity`.
    pub fn new(read_only: ReadOnlyBridgeClient, identity: SigningIdentity) -> Self {
        Self {
            read_only,
            identity,
        }
    }

    /// Dial `endpoint_url`, then attach `identity`.
    pub async fn connect(
        endpoint_url: &str,
        identity: SigningIdentity,
    ) -> Result<Self, AuthSetupError> {
        let read_only = ReadOnlyBridgeClient::connect(endpoint_url).await?;
        Ok(Self::new(read_only, identity))
    }

    /// Dial the configured endpoint, then attach `identity`.
    pub async fn connect_with(
        config: &ConnectionConfig,
        identity: SigningIdentity,
    ) -> Result<Self, AuthSetupError> {
        let read_only = ReadOnlyBridgeClient::connect_with(config).await?;
        Ok(Self::new(read_only, identity))
    }

    /// The signing identity's from-address.
    pub fn address(&self) -> Address {
        self.identity.address()
    }

    pub fn identity(&self) -> &SigningIdentity {
        &self.identity
    }

    /// The read-only client this one is built on.
    pub fn read_only(&self) -> &ReadOnlyBridgeClient {
        &self.read_only
    }

    pub fn connection(&self) -> &ChainConnection {
        self.read_only.connection()
    }

    pub async fn new_rollup_handle(&self, address: Address) -> BindingResult<Box<dyn RollupHandle>> {
        let result = self
            .read_only
            .bindings()
            .rollup(address, self.connection(), &self.identity)
            .await;
        observe(ContractKind::Rollup, address, result)
    }

    pub async fn new_execution_challenge_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn ExecutionChallengeHandle>> {
        let result = self
            .read_only
            .bindings()
            .execution_challenge(address, self.connection(), &self.identity)
            .await;
        observe(ContractKind::ExecutionChallenge, address, result)
    }

    pub async fn new_messages_challenge_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn MessagesChallengeHandle>> {
        let result = self
            .read_only
            .bindings()
            .messages_challenge(address, self.connection(), &self.identity)
            .await;
        observe(ContractKind::MessagesChallenge, address, result)
    }

    pub async fn new_pending_top_challenge_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn PendingTopChallengeHandle>> {
        let result = self
            .read_only
            .bindings()
            .pending_top_challenge(address, self.connection(), &self.identity)
            .await;
        observe(ContractKind::PendingTopChallenge, address, result)
    }
}

#[async_trait]
impl ChainReader for AuthenticatedBridgeClient {
    fn connection(&self) -> &ChainConnection {
        self.read_only.connection()
    }

    async fn header_by_number(
        &self,
        ctx: &CallContext,
        number: Option<u64>,
    ) -> Result<Header, NetworkError> {
        self.read_only.header_by_number(ctx, number).await
    }

    async fn new_factory_handle(&self, address: Address) -> BindingResult<Box<dyn FactoryHandle>> {
        self.read_only.new_factory_handle(address).await
    }

    async fn new_rollup_watcher_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn RollupWatcherHandle>> {
        self.read_only.new_rollup_watcher_handle(address).await
    }

    async fn new_proof_handle(&self, address: Address) -> BindingResult<Box<dyn ProofHandle>> {
        self.read_only.new_proof_handle(address).await
    }

    async fn new_inbox_handle(&self, address: Address) -> BindingResult<Box<dyn InboxHandle>> {
        self.read_only.new_inbox_handle(address).await
    }
}

#[async_trait]
impl ChainWriter for AuthenticatedBridgeClient {
    fn address(&self) -> Address {
        AuthenticatedBridgeClient::address(self)
    }

    async fn new_rollup_handle(&self, address: Address) -> BindingResult<Box<dyn RollupHandle>> {
        AuthenticatedBridgeClient::new_rollup_handle(self, address).await
    }

    async fn new_execution_challenge_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn ExecutionChallengeHandle>> {
        AuthenticatedBridgeClient::new_execution_challenge_handle(self, address).await
    }

    async fn new_messages_challenge_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn MessagesChallengeHandle>> {
        AuthenticatedBridgeClient::new_messages_challenge_handle(self, address).await
    }

    async fn new_pending_top_challenge_handle(
        &self,
        address: Address,
    ) -> BindingResult<Box<dyn PendingTopChallengeHandle>> {
        AuthenticatedBridgeClient::new_pending_top_challenge_handle(self, address).await
    }
}
