//! TOML Configuration Reader for the Resolver
//!
//! Reads network endpoints and protocol deployment parameters from a TOML
//! file. Every field except the RPC URLs has a mainnet default, so an absent
//! file is equivalent to an empty one. `<NETWORK>_RPC_URL` environment
//! variables (a `.env` file is honored) override file endpoints.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use crate::contracts::{bancor, curve, registry_key};
use crate::resolver::{BancorProtocol, CurveProtocol, Protocol, ProtocolKind};
use alloy::primitives::Address;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Top-level TOML configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub networks: HashMap<String, NetworkConfig>,
    #[serde(default)]
    pub bancor: BancorConfig,
    #[serde(default)]
    pub curve: CurveConfig,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub parallel_reserves: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            parallel_reserves: false,
        }
    }
}

/// Per-network endpoint and deployment overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Bancor contract registry on this network
    #[serde(default)]
    pub bancor_contract_registry: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BancorConfig {
    #[serde(default = "default_converter_registry_name")]
    pub converter_registry_name: String,
    #[serde(default = "default_native_asset")]
    pub native_asset: String,
}

impl Default for BancorConfig {
    fn default() -> Self {
        Self {
            converter_registry_name: default_converter_registry_name(),
            native_asset: default_native_asset(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurveConfig {
    #[serde(default = "default_address_provider")]
    pub address_provider: String,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self { address_provider: default_address_provider() }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_converter_registry_name() -> String { bancor::CONVERTER_REGISTRY_NAME.to_string() }
fn default_native_asset() -> String { bancor::NATIVE_ASSET.to_string() }
fn default_address_provider() -> String { curve::ADDRESS_PROVIDER.to_string() }

/// Environment variable overriding the RPC URL of `network`
pub fn rpc_env_var(network: &str) -> String {
    format!("{}_RPC_URL", network.to_uppercase().replace('-', "_"))
}

impl ResolverConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        dotenv::dotenv().ok();

        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).with_context(|| "Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let name = &self.bancor.converter_registry_name;
        if name.is_empty() || name.len() > 32 {
            bail!(
                "bancor.converter_registry_name must be 1-32 bytes, got {} ('{}')",
                name.len(),
                name
            );
        }

        check_address("bancor.native_asset", &self.bancor.native_asset)?;
        check_address("curve.address_provider", &self.curve.address_provider)?;

        for (network, cfg) in &self.networks {
            if let Some(registry) = &cfg.bancor_contract_registry {
                check_address(&format!("networks.{}.bancor_contract_registry", network), registry)?;
            }
        }
        Ok(())
    }

    /// RPC URL for `network`: environment first, then the file
    pub fn rpc_url(&self, network: &str) -> Option<String> {
        std::env::var(rpc_env_var(network))
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| {
                self.networks
                    .get(network)
                    .and_then(|n| n.rpc_url.clone())
                    .filter(|url| !url.trim().is_empty())
            })
    }

    /// Network name -> RPC URL for every configured network plus `extra`
    pub fn endpoints(&self, extra: &str) -> HashMap<String, String> {
        self.networks
            .keys()
            .map(String::as_str)
            .chain(std::iter::once(extra))
            .filter_map(|network| self.rpc_url(network).map(|url| (network.to_string(), url)))
            .collect()
    }

    /// Protocol strategy with deployment parameters from this configuration
    pub fn protocol(&self, kind: ProtocolKind) -> Protocol {
        match kind {
            ProtocolKind::Bancor => {
                let mut registries = HashMap::new();
                registries.insert(
                    "mainnet".to_string(),
                    bancor::MAINNET_CONTRACT_REGISTRY.to_string(),
                );
                for (network, cfg) in &self.networks {
                    if let Some(registry) = &cfg.bancor_contract_registry {
                        registries.insert(network.clone(), registry.clone());
                    }
                }
                Protocol::Bancor(BancorProtocol::new(
                    registries,
                    registry_key(&self.bancor.converter_registry_name),
                    self.bancor.native_asset.clone(),
                ))
            }
            ProtocolKind::Curve => {
                Protocol::Curve(CurveProtocol::new(self.curve.address_provider.clone()))
            }
        }
    }
}

fn check_address(field: &str, value: &str) -> Result<()> {
    Address::from_str(value.trim())
        .map(|_| ())
        .with_context(|| format!("{} is not a valid address: '{}'", field, value))
}
