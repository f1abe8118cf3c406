//! Curve Resolver (pool registry with fixed-size coin arrays)
//!
//! address provider `get_registry()` -> registry `get_pool_from_lp_token(lp)`
//! -> pool; the registry then reports `get_n_coins`, `get_coins` and
//! `get_balances` for that pool, the latter two as 8-slot arrays of which
//! only the first N are meaningful.
//!
//! Balances come from the registry in the same pass as the coins, so the
//! only per-coin lookup is token metadata. Unresolved coins leave a hole at
//! their index in `components`.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use super::builder::{
    build_component, run_reserves, unresolved, Decomposition, ReserveOutcome, ResolveContext,
    Unresolved,
};
use crate::contracts::curve;
use crate::error::{ResolverError, ResolverResult};
use crate::token::TokenMetadata;
use crate::types::{Token, TokenType};
use crate::view::{wire, ContractView};
use alloy::primitives::U256;
use tracing::debug;

/// One enumerated coin slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolCoin {
    pub address: String,
    pub balance: U256,
}

#[derive(Debug, Clone)]
pub struct CurveProtocol {
    address_provider: String,
}

impl Default for CurveProtocol {
    fn default() -> Self {
        Self::new(curve::ADDRESS_PROVIDER.to_string())
    }
}

impl CurveProtocol {
    pub fn new(address_provider: String) -> Self {
        Self { address_provider }
    }

    pub fn address_provider(&self) -> &str {
        &self.address_provider
    }

    async fn view_on<V: ContractView, M>(
        &self,
        ctx: &ResolveContext<'_, V, M>,
        lp_token: &str,
        contract: &str,
        method: &str,
        arg: Option<&str>,
    ) -> ResolverResult<String> {
        let args = arg.map(|a| vec![a.to_string()]);
        ctx.view
            .call_view(ctx.connection, contract, method, args.as_deref())
            .await
            .map_err(|e| ResolverError::protocol(lp_token, format!("{}: {}", method_name(method), e)))
    }

    /// (registry, pool) for `lp_token`
    pub(crate) async fn locate_pool<V: ContractView, M>(
        &self,
        ctx: &ResolveContext<'_, V, M>,
        lp_token: &str,
    ) -> ResolverResult<(String, String)> {
        let registry_raw = self
            .view_on(ctx, lp_token, &self.address_provider, curve::GET_REGISTRY, None)
            .await?;
        let registry = wire::parse_nonzero_address(&registry_raw)
            .map_err(|e| ResolverError::protocol(lp_token, format!("registry: {}", e)))?
            .to_string();

        let pool_raw = self
            .view_on(ctx, lp_token, &registry, curve::GET_POOL_FROM_LP_TOKEN, Some(lp_token))
            .await?;
        let pool = wire::parse_nonzero_address(&pool_raw)
            .map_err(|e| ResolverError::protocol(lp_token, format!("not a pool token: {}", e)))?
            .to_string();

        debug!("LP token {} -> pool {} (registry {})", lp_token, pool, registry);
        Ok((registry, pool))
    }

    /// First N (coin, balance) slots of `pool`
    pub(crate) async fn pool_coins<V: ContractView, M>(
        &self,
        ctx: &ResolveContext<'_, V, M>,
        lp_token: &str,
        registry: &str,
        pool: &str,
    ) -> ResolverResult<Vec<PoolCoin>> {
        let bad = |what: &str, e: crate::error::WireError| {
            ResolverError::protocol(lp_token, format!("{}: {}", what, e))
        };

        // some registry versions return [n_coins, n_underlying_coins]
        let n_raw = self
            .view_on(ctx, lp_token, registry, curve::GET_N_COINS, Some(pool))
            .await?;
        let n: usize = wire::first_element(&n_raw)
            .and_then(wire::parse_uint)
            .map_err(|e| bad("get_n_coins", e))?
            .saturating_to();
        if n > curve::MAX_COINS {
            return Err(ResolverError::protocol(
                lp_token,
                format!("get_n_coins: {} exceeds {} slots", n, curve::MAX_COINS),
            ));
        }

        let coins_raw = self
            .view_on(ctx, lp_token, registry, curve::GET_COINS, Some(pool))
            .await?;
        let coins = wire::parse_address_list(&coins_raw).map_err(|e| bad("get_coins", e))?;
        wire::expect_len(&coins, n).map_err(|e| bad("get_coins", e))?;

        let balances_raw = self
            .view_on(ctx, lp_token, registry, curve::GET_BALANCES, Some(pool))
            .await?;
        let balances = wire::parse_uint_list(&balances_raw).map_err(|e| bad("get_balances", e))?;
        wire::expect_len(&balances, n).map_err(|e| bad("get_balances", e))?;

        Ok(coins
            .into_iter()
            .zip(balances)
            .take(n)
            .map(|(address, balance)| PoolCoin { address, balance })
            .collect())
    }

    async fn resolve_coin<V, M: TokenMetadata>(
        &self,
        ctx: &ResolveContext<'_, V, M>,
        coin: PoolCoin,
    ) -> ReserveOutcome {
        match ctx.tokens.get_token(ctx.connection, &coin.address, TokenType::Erc20).await {
            Some(token) => build_component(
                &coin.address,
                &coin.balance.to_string(),
                token.decimals,
                ctx.total_supply,
            ),
            None => unresolved(&coin.address, Unresolved::NotAToken),
        }
    }

    pub(crate) async fn decompose<V: ContractView, M: TokenMetadata>(
        &self,
        ctx: &ResolveContext<'_, V, M>,
        token: &Token,
    ) -> ResolverResult<Decomposition> {
        let (registry, pool) = self.locate_pool(ctx, &token.address).await?;
        let coins = self.pool_coins(ctx, &token.address, &registry, &pool).await?;
        debug!("Pool {} holds {} coins", pool, coins.len());
        ctx.require_supply(&token.address, coins.len())?;

        let outcomes = run_reserves(coins, ctx.parallel_reserves, |coin| self.resolve_coin(ctx, coin)).await;

        Ok(Decomposition::with_holes(outcomes))
    }
}

fn method_name(method: &str) -> &str {
    let sig = method.trim_start_matches("function ").trim();
    sig.split('(').next().unwrap_or(sig)
}
