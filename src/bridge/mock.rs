//! Recording binding layer for testing without a network.

use alloy::primitives::Address;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::bridge::bindings::{BindingResult, ContractBindings};
use crate::bridge::connection::ChainConnection;
use crate::bridge::error::BindingError;
use crate::bridge::handles::{
    BoundExecutionChallenge, BoundFactory, BoundInbox, BoundMessagesChallenge,
    BoundPendingTopChallenge, BoundProof, BoundRollup, BoundRollupWatcher, ContractKind,
    ExecutionChallengeHandle, FactoryHandle, InboxHandle, MessagesChallengeHandle,
    PendingTopChallengeHandle, ProofHandle, RollupHandle, RollupWatcherHandle,
};
use crate::bridge::identity::SigningIdentity;

/// One constructor invocation as seen by the bindings.
#[derive(Debug, Clone)]
pub struct BindingCall {
    pub kind: ContractKind,
    pub address: Address,
    pub connection: ChainConnection,
    pub signer: Option<Address>,
}

/// Accepts every address except those explicitly rejected.
#[derive(Debug, Default)]
pub struct RecordingBindings {
    calls: Mutex<Vec<BindingCall>>,
    rejected: Mutex<HashSet<Address>>,
    nonce_conflict: Mutex<Option<String>>,
}

impl RecordingBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every constructor fail for `address` with an ABI mismatch.
    pub fn reject_address(&self, address: Address) {
        self.rejected.lock().unwrap().insert(address);
    }

    /// Make every mutating constructor fail with a nonce conflict.
    pub fn fail_signer_with_nonce_conflict(&self, reason: &str) {
        *self.nonce_conflict.lock().unwrap() = Some(reason.to_string());
    }

    pub fn calls(&self) -> Vec<BindingCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, kind: ContractKind) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.kind == kind)
            .count()
    }

    fn record(
        &self,
        kind: ContractKind,
        address: Address,
        connection: &ChainConnection,
        identity: Option<&SigningIdentity>,
    ) -> BindingResult<()> {
        self.calls.lock().unwrap().push(BindingCall {
            kind,
            address,
            connection: connection.clone(),
            signer: identity.map(SigningIdentity::address),
        });

        if self.rejected.lock().unwrap().contains(&address) {
            return Err(BindingError::AbiMismatch {
                kind,
                address,
                reason: "rejected by test bindings".to_string(),
            });
        }
        if let (Some(identity), Some(reason)) = (identity, self.nonce_conflict.lock().unwrap().clone()) {
            return Err(BindingError::NonceConflict {
                signer: identity.address(),
                reason,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContractBindings for RecordingBindings {
    async fn factory(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn FactoryHandle>> {
        self.record(ContractKind::Factory, address, connection, None)?;
        Ok(Box::new(BoundFactory::bind(address, connection)))
    }

    async fn rollup_watcher(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn RollupWatcherHandle>> {
        self.record(ContractKind::RollupWatcher, address, connection, None)?;
        Ok(Box::new(BoundRollupWatcher::bind(address, connection)))
    }

    async fn one_step_proof(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn ProofHandle>> {
        self.record(ContractKind::OneStepProof, address, connection, None)?;
        Ok(Box::new(BoundProof::bind(address, connection)))
    }

    async fn pending_inbox(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn InboxHandle>> {
        self.record(ContractKind::PendingInbox, address, connection, None)?;
        Ok(Box::new(BoundInbox::bind(address, connection)))
    }

    async fn rollup(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn RollupHandle>> {
        self.record(ContractKind::Rollup, address, connection, Some(identity))?;
        Ok(Box::new(BoundRollup::bind(address, connection, identity)))
    }

    async fn execution_challenge(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn ExecutionChallengeHandle>> {
        self.record(ContractKind::ExecutionChallenge, address, connection, Some(identity))?;
        Ok(Box::new(BoundExecutionChallenge::bind(address, connection, identity)))
    }

    async fn messages_challenge(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn MessagesChallengeHandle>> {
        self.record(ContractKind::MessagesChallenge, address, connection, Some(identity))?;
        Ok(Box::new(BoundMessagesChallenge::bind(address, connection, identity)))
    }

    async fn pending_top_challenge(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn PendingTopChallengeHandle>> {
        self.record(ContractKind::PendingTopChallenge, address, connection, Some(identity))?;
        Ok(Box::new(BoundPendingTopChallenge::bind(address, connection, identity)))
    }
}
