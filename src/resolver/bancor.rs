//! Bancor Resolver (converter registry style)
//!
//! anchor (pool token) -> contract registry `addressOf("BancorConverterRegistry")`
//! -> converter registry `getConvertersByAnchors([anchor])` -> converter
//! -> `reserveTokens()`.
//!
//! Each reserve's balance is read from its token contract with the converter
//! as holder, except the native-asset sentinel, which the converter reports
//! itself via `reserveBalance` and which always has 18 decimals.
//! Unresolved reserves are dropped from `components`.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use super::builder::{
    build_component, run_reserves, unresolved, Decomposition, ReserveOutcome, ResolveContext,
    Unresolved,
};
use crate::contracts::{bancor, erc20, CONVERTER_REGISTRY_ID};
use crate::error::{ResolverError, ResolverResult};
use crate::normalize::NATIVE_DECIMALS;
use crate::token::TokenMetadata;
use crate::types::{Token, TokenType};
use crate::view::{wire, ContractView};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct BancorProtocol {
    /// Network name -> contract registry address
    contract_registries: HashMap<String, String>,
    /// bytes32 registry key of the converter registry, 0x-hex
    converter_registry_id: String,
    native_asset: String,
}

impl Default for BancorProtocol {
    fn default() -> Self {
        let mut contract_registries = HashMap::new();
        contract_registries.insert(
            "mainnet".to_string(),
            bancor::MAINNET_CONTRACT_REGISTRY.to_string(),
        );
        Self {
            contract_registries,
            converter_registry_id: CONVERTER_REGISTRY_ID.clone(),
            native_asset: bancor::NATIVE_ASSET.to_string(),
        }
    }
}

impl BancorProtocol {
    pub fn new(
        contract_registries: HashMap<String, String>,
        converter_registry_id: String,
        native_asset: String,
    ) -> Self {
        Self {
            contract_registries,
            converter_registry_id,
            native_asset,
        }
    }

    pub fn is_native_asset(&self, reserve: &str) -> bool {
        reserve.trim().eq_ignore_ascii_case(&self.native_asset)
    }

    fn contract_registry(&self, network: &str) -> ResolverResult<&str> {
        self.contract_registries
            .get(network)
            .map(String::as_str)
            .ok_or_else(|| ResolverError::UnsupportedNetwork(network.to_string()))
    }

    /// Active converter of `anchor`
    pub(crate) async fn locate_converter<V: ContractView, M>(
        &self,
        ctx: &ResolveContext<'_, V, M>,
        anchor: &str,
    ) -> ResolverResult<String> {
        let contract_registry = self.contract_registry(&ctx.connection.network)?;

        let registry_raw = ctx
            .view
            .call_view(
                ctx.connection,
                contract_registry,
                bancor::ADDRESS_OF,
                Some(&[self.converter_registry_id.clone()]),
            )
            .await
            .map_err(|e| ResolverError::protocol(anchor, format!("converter registry lookup: {}", e)))?;
        let converter_registry = wire::parse_nonzero_address(&registry_raw)
            .map_err(|e| ResolverError::protocol(anchor, format!("converter registry: {}", e)))?;

        let converters_raw = ctx
            .view
            .call_view(
                ctx.connection,
                converter_registry,
                bancor::GET_CONVERTERS_BY_ANCHORS,
                Some(&[format!("[{}]", anchor)]),
            )
            .await
            .map_err(|e| ResolverError::protocol(anchor, format!("converter lookup: {}", e)))?;

        let converter = wire::first_element(&converters_raw)
            .and_then(wire::parse_nonzero_address)
            .map_err(|e| ResolverError::protocol(anchor, format!("no converter: {}", e)))?;

        debug!("Anchor {} -> converter {} (registry {})", anchor, converter, converter_registry);
        Ok(converter.to_string())
    }

    /// Reserve token addresses in on-chain order
    pub(crate) async fn reserve_tokens<V: ContractView, M>(
        &self,
        ctx: &ResolveContext<'_, V, M>,
        anchor: &str,
        converter: &str,
    ) -> ResolverResult<Vec<String>> {
        let raw = ctx
            .view
            .call_view(ctx.connection, converter, bancor::RESERVE_TOKENS, None)
            .await
            .map_err(|e| ResolverError::protocol(anchor, format!("reserveTokens: {}", e)))?;

        wire::parse_address_list(&raw)
            .map_err(|e| ResolverError::protocol(anchor, format!("reserveTokens: {}", e)))
    }

    async fn resolve_reserve<V: ContractView, M: TokenMetadata>(
        &self,
        ctx: &ResolveContext<'_, V, M>,
        converter: &str,
        reserve: String,
    ) -> ReserveOutcome {
        if self.is_native_asset(&reserve) {
            let balance = ctx
                .view
                .call_view(
                    ctx.connection,
                    converter,
                    bancor::RESERVE_BALANCE,
                    Some(&[reserve.clone()]),
                )
                .await;
            return match balance {
                Ok(raw) => build_component(&reserve, &raw, NATIVE_DECIMALS, ctx.total_supply),
                Err(e) => unresolved(&reserve, e.into()),
            };
        }

        let token = match ctx.tokens.get_token(ctx.connection, &reserve, TokenType::Erc20).await {
            Some(t) => t,
            None => return unresolved(&reserve, Unresolved::NotAToken),
        };

        let balance = ctx
            .view
            .call_view(
                ctx.connection,
                &token.address,
                erc20::BALANCE_OF,
                Some(&[converter.to_string()]),
            )
            .await;
        match balance {
            Ok(raw) => build_component(&reserve, &raw, token.decimals, ctx.total_supply),
            Err(e) => unresolved(&reserve, e.into()),
        }
    }

    pub(crate) async fn decompose<V: ContractView, M: TokenMetadata>(
        &self,
        ctx: &ResolveContext<'_, V, M>,
        token: &Token,
    ) -> ResolverResult<Decomposition> {
        let converter = self.locate_converter(ctx, &token.address).await?;
        let reserves = self.reserve_tokens(ctx, &token.address, &converter).await?;
        debug!("Converter {} holds {} reserves", converter, reserves.len());
        ctx.require_supply(&token.address, reserves.len())?;

        let outcomes = run_reserves(reserves, ctx.parallel_reserves, |reserve| {
            self.resolve_reserve(ctx, &converter, reserve)
        })
        .await;

        Ok(Decomposition::skipping(outcomes))
    }
}
