//! In-memory chain for unit tests: canned view results keyed by
//! (contract, function name, args) and a token table for metadata lookups.

use crate::error::ViewError;
use crate::token::TokenMetadata;
use crate::types::{Connection, Token, TokenType};
use crate::view::ContractView;
use alloy::primitives::U256;
use async_trait::async_trait;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

type ViewKey = (String, String, String);

#[derive(Default)]
pub struct MockChain {
    views: HashMap<ViewKey, Result<String, ViewError>>,
    tokens: HashMap<String, Token>,
    /// Every view call made, as "address.function"
    pub calls: Mutex<Vec<String>>,
    /// Every token lookup made
    pub lookups: Mutex<Vec<String>>,
}

fn function_name(method: &str) -> String {
    let sig = method.trim().trim_start_matches("function").trim();
    sig.split('(').next().unwrap_or(sig).trim().to_string()
}

fn key(address: &str, function: &str, args: &[&str]) -> ViewKey {
    (
        address.to_lowercase(),
        function.to_string(),
        args.iter().map(|a| a.to_lowercase()).collect::<Vec<_>>().join("|"),
    )
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(mut self, address: &str, function: &str, args: &[&str], result: &str) -> Self {
        self.views
            .insert(key(address, function, args), Ok(result.to_string()));
        self
    }

    pub fn fail(mut self, address: &str, function: &str, args: &[&str]) -> Self {
        self.views.insert(
            key(address, function, args),
            Err(ViewError::Reverted("execution reverted".to_string())),
        );
        self
    }

    pub fn token(mut self, address: &str, decimals: u8, total_supply: &str) -> Self {
        self.tokens.insert(
            address.to_lowercase(),
            Token {
                address: address.to_string(),
                name: String::new(),
                symbol: String::new(),
                decimals,
                total_supply: U256::from_str(total_supply).unwrap(),
                token_type: TokenType::Erc20,
            },
        );
        self
    }

    pub fn nft(mut self, address: &str) -> Self {
        self.tokens.insert(
            address.to_lowercase(),
            Token {
                address: address.to_string(),
                name: String::new(),
                symbol: String::new(),
                decimals: 0,
                total_supply: U256::ZERO,
                token_type: TokenType::Erc721,
            },
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ContractView for MockChain {
    async fn call_view(
        &self,
        _connection: &Connection,
        address: &str,
        method: &str,
        args: Option<&[String]>,
    ) -> Result<String, ViewError> {
        let function = function_name(method);
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}.{}", address.to_lowercase(), function));

        let args: Vec<&str> = args.unwrap_or_default().iter().map(String::as_str).collect();
        self.views
            .get(&key(address, &function, &args))
            .cloned()
            .unwrap_or_else(|| Err(ViewError::Reverted(format!("no mock for {}", function))))
    }
}

#[async_trait]
impl TokenMetadata for MockChain {
    async fn get_token(
        &self,
        _connection: &Connection,
        address: &str,
        expected: TokenType,
    ) -> Option<Token> {
        self.lookups.lock().unwrap().push(address.to_lowercase());
        self.tokens
            .get(&address.to_lowercase())
            .filter(|t| t.token_type == expected)
            .cloned()
    }
}
