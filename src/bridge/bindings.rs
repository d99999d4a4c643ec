//! Contract binding layer.
//!
//! [`ContractBindings`] is the seam between the clients and whatever turns
//! an address into a typed contract handle. The clients never validate
//! addresses themselves; they hand the address and the shared connection
//! (plus the signing identity for mutating kinds) to the bindings and
//! propagate the result unchanged.
//!
//! [`RpcBindings`] is the default: it checks that contract code is deployed
//! at the address before producing a `Bound*` handle.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

use crate::bridge::connection::ChainConnection;
use crate::bridge::error::BindingError;
use crate::bridge::handles::{
    BoundExecutionChallenge, BoundFactory, BoundInbox, BoundMessagesChallenge,
    BoundPendingTopChallenge, BoundProof, BoundRollup, BoundRollupWatcher, ContractKind,
    ExecutionChallengeHandle, FactoryHandle, InboxHandle, MessagesChallengeHandle,
    PendingTopChallengeHandle, ProofHandle, RollupHandle, RollupWatcherHandle,
};
use crate::bridge::identity::SigningIdentity;

/// Result type for handle construction.
pub type BindingResult<T> = Result<T, BindingError>;

/// Constructors for every contract handle kind.
#[async_trait]
pub trait ContractBindings: Send + Sync {
    async fn factory(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn FactoryHandle>>;

    async fn rollup_watcher(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn RollupWatcherHandle>>;

    async fn one_step_proof(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn ProofHandle>>;

    async fn pending_inbox(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn InboxHandle>>;

    async fn rollup(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn RollupHandle>>;

    async fn execution_challenge(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn ExecutionChallengeHandle>>;

    async fn messages_challenge(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn MessagesChallengeHandle>>;

    async fn pending_top_challenge(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn PendingTopChallengeHandle>>;
}

/// Bindings that validate addresses against the live connection.
#[derive(Debug, Clone)]
pub struct RpcBindings {
    /// Timeout for each validation query.
    call_timeout: Duration,
    /// Reject mutating handles for signers with zero balance.
    require_funded_signer: bool,
}

impl RpcBindings {
    pub fn new() -> Self {
        Self {
            call_timeout: Duration::from_secs(10),
            require_funded_signer: false,
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn require_funded_signer(mut self, required: bool) -> Self {
        self.require_funded_signer = required;
        self
    }

    /// Confirm contract code exists at `address`.
    async fn check_code(
        &self,
        kind: ContractKind,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<()> {
        let unreachable = |reason: String| BindingError::Unreachable {
            kind,
            address,
            reason,
        };

        let code = match timeout(self.call_timeout, connection.provider().get_code_at(address)).await
        {
            Ok(Ok(code)) => code,
            Ok(Err(e)) => return Err(unreachable(e.to_string())),
            Err(_) => {
                return Err(unreachable(format!(
                    "eth_getCode timed out after {:?}",
                    self.call_timeout
                )))
            }
        };

        if code.is_empty() {
            return Err(BindingError::NoContractCode { kind, address });
        }
        Ok(())
    }

    /// Code check plus, when enabled, the signer balance check.
    async fn check_transactor(
        &self,
        kind: ContractKind,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<()> {
        self.check_code(kind, address, connection).await?;

        if self.require_funded_signer {
            let signer = identity.address();
            let balance = match timeout(self.call_timeout, connection.provider().get_balance(signer))
                .await
            {
                Ok(Ok(balance)) => balance,
                Ok(Err(e)) => {
                    return Err(BindingError::Unreachable {
                        kind,
                        address,
                        reason: format!("balance query for {} failed: {}", signer, e),
                    })
                }
                Err(_) => {
                    return Err(BindingError::Unreachable {
                        kind,
                        address,
                        reason: format!("eth_getBalance timed out after {:?}", self.call_timeout),
                    })
                }
            };
            if balance == U256::ZERO {
                return Err(BindingError::InsufficientFunds { signer, balance });
            }
        }
        Ok(())
    }
}

impl Default for RpcBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContractBindings for RpcBindings {
    async fn factory(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn FactoryHandle>> {
        self.check_code(ContractKind::Factory, address, connection).await?;
        Ok(Box::new(BoundFactory::bind(address, connection)))
    }

    async fn rollup_watcher(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn RollupWatcherHandle>> {
        self.check_code(ContractKind::RollupWatcher, address, connection).await?;
        Ok(Box::new(BoundRollupWatcher::bind(address, connection)))
    }

    async fn one_step_proof(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn ProofHandle>> {
        self.check_code(ContractKind::OneStepProof, address, connection).await?;
        Ok(Box::new(BoundProof::bind(address, connection)))
    }

    async fn pending_inbox(
        &self,
        address: Address,
        connection: &ChainConnection,
    ) -> BindingResult<Box<dyn InboxHandle>> {
        self.check_code(ContractKind::PendingInbox, address, connection).await?;
        Ok(Box::new(BoundInbox::bind(address, connection)))
    }

    async fn rollup(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn RollupHandle>> {
        self.check_transactor(ContractKind::Rollup, address, connection, identity)
            .await?;
        Ok(Box::new(BoundRollup::bind(address, connection, identity)))
    }

    async fn execution_challenge(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn ExecutionChallengeHandle>> {
        self.check_transactor(ContractKind::ExecutionChallenge, address, connection, identity)
            .await?;
        Ok(Box::new(BoundExecutionChallenge::bind(address, connection, identity)))
    }

    async fn messages_challenge(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn MessagesChallengeHandle>> {
        self.check_transactor(ContractKind::MessagesChallenge, address, connection, identity)
            .await?;
        Ok(Box::new(BoundMessagesChallenge::bind(address, connection, identity)))
    }

    async fn pending_top_challenge(
        &self,
        address: Address,
        connection: &ChainConnection,
        identity: &SigningIdentity,
    ) -> BindingResult<Box<dyn PendingTopChallengeHandle>> {
        self.check_transactor(ContractKind::PendingTopChallenge, address, connection, identity)
            .await?;
        Ok(Box::new(BoundPendingTopChallenge::bind(address, connection, identity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::connection::tests::offline_connection;

    #[tokio::test]
    async fn test_unreachable_validation_is_binding_error() {
        let bindings = RpcBindings::new().with_call_timeout(Duration::from_secs(2));
        let conn = offline_connection();
        let address = Address::repeat_byte(0x11);

        let err = bindings.rollup_watcher(address, &conn).await.unwrap_err();
        match err {
            BindingError::Unreachable { kind, address: a, .. } => {
                assert_eq!(kind, ContractKind::RollupWatcher);
                assert_eq!(a, address);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_builder_options() {
        let bindings = RpcBindings::default()
            .with_call_timeout(Duration::from_millis(250))
            .require_funded_signer(true);
        assert_eq!(bindings.call_timeout, Duration::from_millis(250));
        assert!(bindings.require_funded_signer);
    }
}
