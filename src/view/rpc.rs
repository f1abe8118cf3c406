//! alloy-backed Contract View Service
//!
//! Parses the human-readable method signature, coerces the string arguments
//! with dyn-abi, runs a plain `eth_call` and renders the decoded outputs in
//! the comma-joined string convention.
//!
//! Providers are connected lazily, one per endpoint URL (http, ws or ipc
//! picked by URL scheme), and reused for the lifetime of the view. Only
//! connections are kept; call results never are.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use super::ContractView;
use crate::error::ViewError;
use crate::types::Connection;
use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt, Specifier};
use alloy::json_abi::Function;
use alloy::network::TransactionBuilder;
use alloy::primitives::{hex, Address};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, info};

/// Contract view service over JSON-RPC `eth_call`
pub struct RpcContractView {
    /// Network name -> endpoint URL
    endpoints: HashMap<String, String>,
    /// Endpoint URL -> connected provider
    providers: DashMap<String, DynProvider>,
}

impl RpcContractView {
    pub fn new(endpoints: HashMap<String, String>) -> Self {
        Self {
            endpoints,
            providers: DashMap::new(),
        }
    }

    fn endpoint_for<'a>(&'a self, connection: &'a Connection) -> Result<&'a str, ViewError> {
        if let Some(node) = connection.node.as_deref() {
            return Ok(node);
        }
        self.endpoints
            .get(&connection.network)
            .map(String::as_str)
            .ok_or_else(|| ViewError::UnknownNetwork(connection.network.clone()))
    }

    async fn provider_for(&self, connection: &Connection) -> Result<DynProvider, ViewError> {
        let url = self.endpoint_for(connection)?;
        if let Some(provider) = self.providers.get(url) {
            return Ok(provider.clone());
        }

        let provider = ProviderBuilder::new()
            .connect(url)
            .await
            .map_err(|e| ViewError::Rpc(format!("connect {}: {}", connection.network, e)))?
            .erased();
        info!("Connected to {} RPC endpoint", connection.network);

        self.providers.insert(url.to_string(), provider.clone());
        Ok(provider)
    }
}

/// ABI-encode the call described by `method` with string-encoded `args`
pub fn encode_call(method: &str, args: &[String]) -> Result<(Function, Vec<u8>), ViewError> {
    let function = Function::parse(method)
        .map_err(|e| ViewError::Abi(format!("bad signature '{}': {}", method, e)))?;

    if function.inputs.len() != args.len() {
        return Err(ViewError::Abi(format!(
            "{} expects {} arguments, got {}",
            function.name,
            function.inputs.len(),
            args.len()
        )));
    }

    let values = function
        .inputs
        .iter()
        .zip(args)
        .map(|(param, raw)| {
            let ty = param
                .resolve()
                .map_err(|e| ViewError::Abi(format!("param {}: {}", param.name, e)))?;
            ty.coerce_str(raw)
                .map_err(|e| ViewError::Abi(format!("arg '{}' as {}: {}", raw, ty.sol_type_name(), e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let calldata = function
        .abi_encode_input(&values)
        .map_err(|e| ViewError::Abi(e.to_string()))?;

    Ok((function, calldata))
}

/// Render decoded outputs: arrays and multiple outputs comma-joined,
/// addresses checksummed, integers base-10, bytes 0x-hex
pub fn render_values(values: &[DynSolValue]) -> String {
    values.iter().map(render_value).collect::<Vec<_>>().join(",")
}

fn render_value(value: &DynSolValue) -> String {
    #[allow(unreachable_patterns)]
    match value {
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            render_values(items)
        }
        other => format!("{:?}", other),
    }
}

#[async_trait]
impl ContractView for RpcContractView {
    async fn call_view(
        &self,
        connection: &Connection,
        address: &str,
        method: &str,
        args: Option<&[String]>,
    ) -> Result<String, ViewError> {
        let to = Address::from_str(address.trim())
            .map_err(|e| ViewError::Abi(format!("bad contract address '{}': {}", address, e)))?;
        let (function, calldata) = encode_call(method, args.unwrap_or_default())?;

        let provider = self.provider_for(connection).await?;
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(calldata);

        let output = provider.call(tx).await.map_err(|e| match e.as_error_resp() {
            Some(payload) => ViewError::Reverted(payload.message.to_string()),
            None => ViewError::Rpc(e.to_string()),
        })?;

        let decoded = function
            .abi_decode_output(&output)
            .map_err(|e| ViewError::Abi(format!("decode {} output: {}", function.name, e)))?;

        let rendered = render_values(&decoded);
        debug!("view {}.{} -> {}", address, function.name, rendered);
        Ok(rendered)
    }
}
