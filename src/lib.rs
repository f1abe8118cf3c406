//! LP Token Resolver Library
//!
//! Decomposes pool-share (LP) tokens into the reserve tokens backing them,
//! with each reserve's per-unit rate against the pool token's supply.
//! Supports Bancor converter pools and Curve registry pools.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

pub mod config;
pub mod contracts;
pub mod error;
pub mod normalize;
pub mod report;
pub mod resolver;
pub mod token;
pub mod types;
pub mod view;

#[cfg(test)]
mod mock;

// Re-export commonly used types
pub use config::ResolverConfig;
pub use error::{ResolverError, ResolverResult, ViewError};
pub use report::ResolutionReport;
pub use resolver::{BancorProtocol, ComponentResolver, CurveProtocol, Protocol, ProtocolKind};
pub use token::{ChainTokenMetadata, TokenMetadata};
pub use types::{Connection, QueryEnv, ResolveInput, Token, TokenComponent, TokenType};
pub use view::{ContractView, RpcContractView};
