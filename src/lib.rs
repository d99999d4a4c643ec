//! Chain bridge library: shared chain connection with read-only and
//! authenticated clients for the validator's contract handles.

pub mod bridge;
pub mod config;
pub mod observability;

pub use bridge::{
    AuthenticatedBridgeClient, CallContext, ChainConnection, ChainReader, ChainWriter,
    ReadOnlyBridgeClient, SigningIdentity,
};
pub use config::BridgeConfig;
