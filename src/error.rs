//! Error types
//!
//! `ResolverError` is fatal: the resolution is aborted and no partial
//! component tree is returned. Per-reserve failures never surface here; they
//! are counted in `unresolved_components` instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("env is not set")]
    EnvironmentNotConfigured,

    #[error("Token {0} is not a valid ERC20 token")]
    InvalidToken(String),

    #[error("Invalid protocol token {token}: {reason}")]
    InvalidProtocolToken { token: String, reason: String },

    #[error("No Bancor contract registry configured for network '{0}'")]
    UnsupportedNetwork(String),

    #[error("Token {0} has zero total supply")]
    ZeroTotalSupply(String),
}

impl ResolverError {
    pub(crate) fn protocol(token: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProtocolToken {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure of a single contract view call
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("No RPC endpoint for network '{0}'")]
    UnknownNetwork(String),

    #[error("ABI error: {0}")]
    Abi(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Call reverted: {0}")]
    Reverted(String),
}

/// Malformed string-encoded view result
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("Invalid address element '{0}'")]
    InvalidAddress(String),

    #[error("Invalid uint element '{0}'")]
    InvalidUint(String),

    #[error("Expected at least {expected} elements, got {actual}")]
    TooFewElements { expected: usize, actual: usize },

    #[error("Empty result")]
    Empty,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Not a non-negative integer amount: '{0}'")]
    InvalidAmount(String),
}

pub type ResolverResult<T> = Result<T, ResolverError>;
