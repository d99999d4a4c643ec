//! Signing identity for mutating contract handles.
//!
//! # Security
//! - Keys are parsed once and held only inside the signer
//! - Keys are never logged or serialized; `Debug` prints the address only

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use std::fmt;

use crate::bridge::error::{BridgeError, BridgeResult};

/// Default environment variable holding the signer's private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "BRIDGE_PRIVATE_KEY";

/// The from-address and transaction-signing capability used for mutating calls.
#[derive(Clone)]
pub struct SigningIdentity {
    from: Address,
    wallet: EthereumWallet,
}

impl SigningIdentity {
    /// Pair an explicit from-address with a signing capability.
    pub fn new(from: Address, wallet: EthereumWallet) -> Self {
        Self { from, wallet }
    }

    /// Identity backed by a local signer; the from-address is the signer's.
    pub fn from_signer(signer: PrivateKeySigner) -> Self {
        let from = signer.address();
        Self {
            from,
            wallet: EthereumWallet::from(signer),
        }
    }

    /// Parse a hex-encoded private key (with or without `0x`).
    pub fn from_private_key(private_key_hex: &str) -> BridgeResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BridgeError::Signer(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Signing identity loaded");

        Ok(Self::from_signer(signer))
    }

    /// Load the private key from the named environment variable.
    pub fn from_env(var: &str) -> BridgeResult<Self> {
        let private_key = std::env::var(var).map_err(|_| {
            BridgeError::Signer(format!("Environment variable {} not set", var))
        })?;

        Self::from_private_key(&private_key)
    }

    /// The address transactions are sent from.
    pub fn address(&self) -> Address {
        self.from
    }

    /// The signing capability, for binding layers that submit transactions.
    pub fn wallet(&self) -> &EthereumWallet {
        &self.wallet
    }
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}
