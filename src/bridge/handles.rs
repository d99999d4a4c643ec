//! Contract capability handles.
//!
//! A handle is bound at construction to exactly one [`ChainConnection`]
//! and, for mutating kinds, exactly one [`SigningIdentity`]. Handles are
//! never cached: every constructor call produces a fresh one owned by the
//! caller.
//!
//! The capability traits are what the rest of the validator programs
//! against. The `Bound*` types are the plain bindings produced by
//! [`RpcBindings`](crate::bridge::bindings::RpcBindings); other binding
//! layers may return their own implementations.

use alloy::primitives::Address;
use std::fmt;

use crate::bridge::connection::ChainConnection;
use crate::bridge::identity::SigningIdentity;

/// The contracts this layer can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Factory,
    RollupWatcher,
    OneStepProof,
    PendingInbox,
    Rollup,
    ExecutionChallenge,
    MessagesChallenge,
    PendingTopChallenge,
}

impl ContractKind {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Factory => "factory",
            ContractKind::RollupWatcher => "rollup_watcher",
            ContractKind::OneStepProof => "one_step_proof",
            ContractKind::PendingInbox => "pending_inbox",
            ContractKind::Rollup => "rollup",
            ContractKind::ExecutionChallenge => "execution_challenge",
            ContractKind::MessagesChallenge => "messages_challenge",
            ContractKind::PendingTopChallenge => "pending_top_challenge",
        }
    }

    /// Whether handles of this kind submit transactions.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            ContractKind::Rollup
                | ContractKind::ExecutionChallenge
                | ContractKind::MessagesChallenge
                | ContractKind::PendingTopChallenge
        )
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().replace('_', " "))
    }
}

/// Common surface of every handle.
pub trait ContractHandle: Send + Sync + fmt::Debug {
    fn kind(&self) -> ContractKind;

    /// The contract this handle talks to.
    fn address(&self) -> Address;

    /// The connection the handle was bound to.
    fn connection(&self) -> &ChainConnection;
}

/// Handles that can submit transactions.
pub trait TransactingHandle: ContractHandle {
    /// The identity transactions are signed with.
    fn identity(&self) -> &SigningIdentity;
}

// Watch-only capabilities.
pub trait FactoryHandle: ContractHandle {}
pub trait RollupWatcherHandle: ContractHandle {}
pub trait ProofHandle: ContractHandle {}
pub trait InboxHandle: ContractHandle {}

// Mutating capabilities.
pub trait RollupHandle: TransactingHandle {}
pub trait ExecutionChallengeHandle: TransactingHandle {}
pub trait MessagesChallengeHandle: TransactingHandle {}
pub trait PendingTopChallengeHandle: TransactingHandle {}

macro_rules! watch_handle {
    ($(#[$meta:meta])* $name:ident, $capability:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            address: Address,
            connection: ChainConnection,
        }

        impl $name {
            pub fn bind(address: Address, connection: &ChainConnection) -> Self {
                Self {
                    address,
                    connection: connection.clone(),
                }
            }
        }

        impl ContractHandle for $name {
            fn kind(&self) -> ContractKind {
                $kind
            }

            fn address(&self) -> Address {
                self.address
            }

            fn connection(&self) -> &ChainConnection {
                &self.connection
            }
        }

        impl $capability for $name {}
    };
}

macro_rules! transacting_handle {
    ($(#[$meta:meta])* $name:ident, $capability:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            address: Address,
            connection: ChainConnection,
            identity: SigningIdentity,
        }

        impl $name {
            pub fn bind(
                address: Address,
                connection: &ChainConnection,
                identity: &SigningIdentity,
            ) -> Self {
                Self {
                    address,
                    connection: connection.clone(),
                    identity: identity.clone(),
                }
            }
        }

        impl ContractHandle for $name {
            fn kind(&self) -> ContractKind {
                $kind
            }

            fn address(&self) -> Address {
                self.address
            }

            fn connection(&self) -> &ChainConnection {
                &self.connection
            }
        }

        impl TransactingHandle for $name {
            fn identity(&self) -> &SigningIdentity {
                &self.identity
            }
        }

        impl $capability for $name {}
    };
}

watch_handle!(
    /// Rollup factory binding.
    BoundFactory, FactoryHandle, ContractKind::Factory
);
watch_handle!(
    /// Read-only rollup binding used to follow chain state.
    BoundRollupWatcher, RollupWatcherHandle, ContractKind::RollupWatcher
);
watch_handle!(BoundProof, ProofHandle, ContractKind::OneStepProof);
watch_handle!(BoundInbox, InboxHandle, ContractKind::PendingInbox);

transacting_handle!(
    /// Rollup binding able to submit assertions.
    BoundRollup, RollupHandle, ContractKind::Rollup
);
transacting_handle!(
    BoundExecutionChallenge,
    ExecutionChallengeHandle,
    ContractKind::ExecutionChallenge
);
transacting_handle!(
    BoundMessagesChallenge,
    MessagesChallengeHandle,
    ContractKind::MessagesChallenge
);
transacting_handle!(
    BoundPendingTopChallenge,
    PendingTopChallengeHandle,
    ContractKind::PendingTopChallenge
);
