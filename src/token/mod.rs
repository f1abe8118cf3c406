//! Token Metadata Service
//!
//! Looks up decimals, total supply and classification of a token address.
//! `ChainTokenMetadata` reads them through any Contract View Service:
//! a contract answering `decimals()` and `totalSupply()` is an ERC20,
//! one reporting the ERC721 interface via ERC165 is an ERC721, anything
//! else is not a recognized token.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use crate::contracts::{erc165, erc20};
use crate::types::{Connection, Token, TokenType};
use crate::view::wire;
use crate::view::ContractView;
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait TokenMetadata: Send + Sync {
    /// `None` when `address` is not a token of the `expected` classification
    async fn get_token(
        &self,
        connection: &Connection,
        address: &str,
        expected: TokenType,
    ) -> Option<Token>;
}

#[async_trait]
impl<T: TokenMetadata + ?Sized> TokenMetadata for std::sync::Arc<T> {
    async fn get_token(
        &self,
        connection: &Connection,
        address: &str,
        expected: TokenType,
    ) -> Option<Token> {
        (**self).get_token(connection, address, expected).await
    }
}

/// Token metadata read directly from the token contract
pub struct ChainTokenMetadata<V> {
    view: V,
}

impl<V: ContractView> ChainTokenMetadata<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    async fn read(&self, connection: &Connection, address: &str, method: &str) -> Option<String> {
        self.view
            .call_view(connection, address, method, None)
            .await
            .map_err(|e| debug!("{} on {} failed: {}", method, address, e))
            .ok()
    }

    async fn classify(&self, connection: &Connection, address: &str) -> Option<(TokenType, u8, String)> {
        let decimals = self.read(connection, address, erc20::DECIMALS).await;
        let supply = self.read(connection, address, erc20::TOTAL_SUPPLY).await;

        if let (Some(decimals), Some(supply)) = (decimals, supply) {
            let decimals = decimals.trim().parse::<u8>().ok()?;
            return Some((TokenType::Erc20, decimals, supply));
        }

        let args = [erc165::ERC721_INTERFACE_ID.to_string()];
        let is_nft = self
            .view
            .call_view(connection, address, erc165::SUPPORTS_INTERFACE, Some(&args))
            .await
            .map(|r| r.trim() == "true")
            .unwrap_or(false);

        is_nft.then(|| (TokenType::Erc721, 0, String::from("0")))
    }
}

#[async_trait]
impl<V: ContractView> TokenMetadata for ChainTokenMetadata<V> {
    async fn get_token(
        &self,
        connection: &Connection,
        address: &str,
        expected: TokenType,
    ) -> Option<Token> {
        let address = wire::parse_address(address).ok()?;

        let (token_type, decimals, supply) = self.classify(connection, address).await?;
        if token_type != expected {
            debug!("{} is {}, expected {}", address, token_type, expected);
            return None;
        }

        let total_supply = match wire::parse_uint(&supply) {
            Ok(v) => v,
            Err(e) => {
                debug!("{} totalSupply unreadable: {}", address, e);
                return None;
            }
        };

        let name = self.read(connection, address, erc20::NAME).await.unwrap_or_default();
        let symbol = self.read(connection, address, erc20::SYMBOL).await.unwrap_or_default();

        Some(Token {
            address: address.to_string(),
            name,
            symbol,
            decimals,
            total_supply,
            token_type,
        })
    }
}
