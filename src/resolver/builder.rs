//! Component Builder
//!
//! Per-reserve assembly shared by both protocols: normalize a raw balance,
//! divide by the decomposed token's normalized supply, emit a leaf. A reserve
//! that cannot be built is an `Unresolved` outcome, never an error of the
//! whole resolution.

use crate::error::{NormalizeError, ResolverError, ResolverResult, ViewError};
use crate::normalize::{format_rate, normalize, rate};
use crate::types::{Connection, TokenComponent};
use bigdecimal::{BigDecimal, Zero};
use futures::future::join_all;
use std::future::Future;
use thiserror::Error;
use tracing::warn;

/// Everything a protocol needs for one resolution call
pub(crate) struct ResolveContext<'a, V, M> {
    pub view: &'a V,
    pub tokens: &'a M,
    pub connection: &'a Connection,
    /// Decomposed token's supply, already normalized by its own decimals
    pub total_supply: &'a BigDecimal,
    pub parallel_reserves: bool,
}

impl<V, M> ResolveContext<'_, V, M> {
    /// Rates need a non-zero supply, but only once there is a reserve to rate
    pub fn require_supply(&self, token: &str, reserves: usize) -> ResolverResult<()> {
        if reserves > 0 && self.total_supply.is_zero() {
            return Err(ResolverError::ZeroTotalSupply(token.to_string()));
        }
        Ok(())
    }
}

/// Why a reserve was counted as unresolved
#[derive(Debug, Error)]
pub(crate) enum Unresolved {
    #[error("not a recognized ERC20 token")]
    NotAToken,

    #[error("balance call failed: {0}")]
    BalanceCall(#[from] ViewError),

    #[error("unreadable balance: {0}")]
    BadBalance(#[from] NormalizeError),

    #[error("decomposed token has no supply")]
    NoSupply,
}

pub(crate) type ReserveOutcome = Result<TokenComponent, Unresolved>;

/// Log and return an unresolved outcome
pub(crate) fn unresolved(reserve: &str, reason: Unresolved) -> ReserveOutcome {
    warn!("Reserve {} unresolved: {}", reserve, reason);
    Err(reason)
}

/// Leaf for `reserve` holding `raw_balance` (scaled by `decimals`)
pub(crate) fn build_component(
    reserve: &str,
    raw_balance: &str,
    decimals: u8,
    total_supply: &BigDecimal,
) -> ReserveOutcome {
    let balance = match normalize(raw_balance, decimals) {
        Ok(b) => b,
        Err(e) => return unresolved(reserve, e.into()),
    };
    match rate(&balance, total_supply) {
        Some(r) => Ok(TokenComponent::leaf(reserve, format_rate(&r))),
        None => unresolved(reserve, Unresolved::NoSupply),
    }
}

/// Run `f` over every reserve, sequentially or concurrently.
/// Outcomes always come back in input order.
pub(crate) async fn run_reserves<T, F, Fut>(items: Vec<T>, parallel: bool, f: F) -> Vec<ReserveOutcome>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = ReserveOutcome>,
{
    if parallel {
        return join_all(items.into_iter().map(&f)).await;
    }

    let mut outcomes = Vec::with_capacity(items.len());
    for item in items {
        outcomes.push(f(item).await);
    }
    outcomes
}

/// Children of the root plus the unresolved count
#[derive(Debug, Default)]
pub(crate) struct Decomposition {
    pub components: Vec<Option<TokenComponent>>,
    pub unresolved_components: u32,
}

impl Decomposition {
    /// Unresolved reserves are dropped; the sequence shrinks
    pub fn skipping(outcomes: Vec<ReserveOutcome>) -> Self {
        let mut out = Self::default();
        for outcome in outcomes {
            match outcome {
                Ok(c) => out.components.push(Some(c)),
                Err(_) => out.unresolved_components += 1,
            }
        }
        out
    }

    /// Unresolved reserves keep their slot as a hole
    pub fn with_holes(outcomes: Vec<ReserveOutcome>) -> Self {
        let mut out = Self::default();
        for outcome in outcomes {
            match outcome {
                Ok(c) => out.components.push(Some(c)),
                Err(_) => {
                    out.unresolved_components += 1;
                    out.components.push(None);
                }
            }
        }
        out
    }
}
