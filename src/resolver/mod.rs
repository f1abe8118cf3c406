//! Token Component Resolution
//!
//! `ComponentResolver::resolve_components` breaks a pool-share token into the
//! reserves backing it. Protocol-specific location and enumeration live in
//! the `Protocol` variants; input validation, supply normalization and result
//! assembly are shared.
//!
//! Failure model:
//! - fatal (`Err`): no environment, input not an ERC20, pool/converter not
//!   found or not enumerable, zero supply with reserves to rate
//! - recoverable: a reserve without metadata or balance is counted in
//!   `unresolved_components`; Bancor drops it, Curve leaves a hole
//!
//! Author: AI-Generated
//! Created: 2026-10-18

pub mod bancor;
mod builder;
pub mod curve;

pub use bancor::BancorProtocol;
pub use curve::{CurveProtocol, PoolCoin};

use crate::error::{ResolverError, ResolverResult};
use crate::normalize::normalize_u256;
use crate::token::TokenMetadata;
use crate::types::{QueryEnv, ResolveInput, TokenComponent, TokenType};
use crate::view::ContractView;
use builder::ResolveContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Which pool-lookup protocol a resolver speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolKind {
    Bancor,
    Curve,
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProtocolKind::Bancor => write!(f, "bancor"),
            ProtocolKind::Curve => write!(f, "curve"),
        }
    }
}

impl FromStr for ProtocolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bancor" => Ok(ProtocolKind::Bancor),
            "curve" => Ok(ProtocolKind::Curve),
            other => Err(format!("Unsupported protocol: '{}'. Supported: bancor, curve", other)),
        }
    }
}

/// Protocol strategy with its deployment parameters
#[derive(Debug, Clone)]
pub enum Protocol {
    Bancor(BancorProtocol),
    Curve(CurveProtocol),
}

impl Protocol {
    pub fn kind(&self) -> ProtocolKind {
        match self {
            Protocol::Bancor(_) => ProtocolKind::Bancor,
            Protocol::Curve(_) => ProtocolKind::Curve,
        }
    }
}

impl From<ProtocolKind> for Protocol {
    /// Mainnet deployment defaults
    fn from(kind: ProtocolKind) -> Self {
        match kind {
            ProtocolKind::Bancor => Protocol::Bancor(BancorProtocol::default()),
            ProtocolKind::Curve => Protocol::Curve(CurveProtocol::default()),
        }
    }
}

/// Resolves pool-share tokens of one protocol into their reserves
pub struct ComponentResolver<V, M> {
    view: V,
    tokens: M,
    protocol: Protocol,
    parallel_reserves: bool,
}

impl<V: ContractView, M: TokenMetadata> ComponentResolver<V, M> {
    pub fn new(view: V, tokens: M, protocol: Protocol) -> Self {
        Self {
            view,
            tokens,
            protocol,
            parallel_reserves: false,
        }
    }

    /// Look reserves up concurrently; output order is unaffected
    pub fn with_parallel_reserves(mut self, parallel: bool) -> Self {
        self.parallel_reserves = parallel;
        self
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub async fn resolve_components(
        &self,
        env: Option<&QueryEnv>,
        input: &ResolveInput,
    ) -> ResolverResult<TokenComponent> {
        let env = env.ok_or(ResolverError::EnvironmentNotConfigured)?;
        let connection = &env.connection;

        let token = self
            .tokens
            .get_token(connection, &input.token_address, TokenType::Erc20)
            .await
            .ok_or_else(|| ResolverError::InvalidToken(input.token_address.clone()))?;

        // zero supply is only fatal once the protocol has reserves to rate
        let total_supply = normalize_u256(token.total_supply, token.decimals);

        let ctx = ResolveContext {
            view: &self.view,
            tokens: &self.tokens,
            connection,
            total_supply: &total_supply,
            parallel_reserves: self.parallel_reserves,
        };

        let decomposition = match &self.protocol {
            Protocol::Bancor(bancor) => bancor.decompose(&ctx, &token).await?,
            Protocol::Curve(curve) => curve.decompose(&ctx, &token).await?,
        };

        info!(
            "Resolved {} via {}: {} components, {} unresolved",
            input.token_address,
            self.protocol.kind(),
            decomposition.components.iter().flatten().count(),
            decomposition.unresolved_components
        );

        Ok(TokenComponent {
            token_address: input.token_address.clone(),
            rate: "1".to_string(),
            components: decomposition.components,
            unresolved_components: decomposition.unresolved_components,
        })
    }
}
