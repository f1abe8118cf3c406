//! Core data structures
//!
//! Tokens as reported by the metadata service, the decomposition output
//! record, and the explicit query environment threaded through every call.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token classification reported by the metadata service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenType {
    Erc20,
    Erc721,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenType::Erc20 => write!(f, "ERC20"),
            TokenType::Erc721 => write!(f, "ERC721"),
        }
    }
}

/// Token metadata (read-only, owned by the metadata service)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Raw, unscaled total supply
    pub total_supply: U256,
    pub token_type: TokenType,
}

/// One node of a decomposition.
///
/// The root node always carries rate "1" and the decomposed token's address.
/// Its children describe the reserves backing it. A child slot is `None` when
/// the protocol keeps a hole for an unresolved reserve (Curve); Bancor drops
/// unresolved reserves instead, so its slots are always `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenComponent {
    pub token_address: String,
    /// Decimal string, fraction of the parent's total value
    pub rate: String,
    pub components: Vec<Option<TokenComponent>>,
    pub unresolved_components: u32,
}

impl TokenComponent {
    /// Leaf component for a resolved reserve
    pub fn leaf(token_address: impl Into<String>, rate: impl Into<String>) -> Self {
        Self {
            token_address: token_address.into(),
            rate: rate.into(),
            components: Vec::new(),
            unresolved_components: 0,
        }
    }

    /// Resolved children, skipping holes
    pub fn resolved(&self) -> impl Iterator<Item = &TokenComponent> {
        self.components.iter().flatten()
    }
}

/// Input of `resolve_components`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveInput {
    pub token_address: String,
}

impl ResolveInput {
    pub fn new(token_address: impl Into<String>) -> Self {
        Self {
            token_address: token_address.into(),
        }
    }
}

/// Blockchain connection a view call runs against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Network name, e.g. "mainnet"
    pub network: String,
    /// Explicit node URL, overriding the configured endpoint for `network`
    pub node: Option<String>,
}

impl Connection {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            node: None,
        }
    }

    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }
}

/// Query environment. Resolution refuses to run without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEnv {
    pub connection: Connection,
}

impl QueryEnv {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_serializes_holes_as_null() {
        let root = TokenComponent {
            token_address: "0xpool".to_string(),
            rate: "1".to_string(),
            components: vec![Some(TokenComponent::leaf("0xa", "0.5")), None],
            unresolved_components: 1,
        };

        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["tokenAddress"], "0xpool");
        assert_eq!(json["unresolvedComponents"], 1);
        assert!(json["components"][1].is_null());
        assert_eq!(json["components"][0]["rate"], "0.5");
    }

    #[test]
    fn test_resolved_skips_holes() {
        let root = TokenComponent {
            token_address: "0xpool".to_string(),
            rate: "1".to_string(),
            components: vec![None, Some(TokenComponent::leaf("0xb", "0.25")), None],
            unresolved_components: 2,
        };

        let addrs: Vec<_> = root.resolved().map(|c| c.token_address.as_str()).collect();
        assert_eq!(addrs, vec!["0xb"]);
    }
}
