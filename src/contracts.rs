//! Centralized Contract Definitions
//!
//! Human-readable view signatures for every contract the resolvers read,
//! passed verbatim to the Contract View Service, plus the protocol constants
//! they rely on.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use alloy::primitives::{hex, B256};
use once_cell::sync::Lazy;

// ── ERC20 / ERC165 ───────────────────────────────────────────────────

pub mod erc20 {
    pub const BALANCE_OF: &str =
        "function balanceOf(address account) public view returns (uint256)";
    pub const DECIMALS: &str = "function decimals() public view returns (uint8)";
    pub const TOTAL_SUPPLY: &str = "function totalSupply() public view returns (uint256)";
    pub const NAME: &str = "function name() public view returns (string)";
    pub const SYMBOL: &str = "function symbol() public view returns (string)";
}

pub mod erc165 {
    pub const SUPPORTS_INTERFACE: &str =
        "function supportsInterface(bytes4 interfaceId) external view returns (bool)";
    /// ERC721 interface id
    pub const ERC721_INTERFACE_ID: &str = "0x80ac58cd";
}

// ── Bancor (converter registry) ──────────────────────────────────────

pub mod bancor {
    pub const ADDRESS_OF: &str =
        "function addressOf(bytes32 contractName) public view returns (address)";
    pub const GET_CONVERTERS_BY_ANCHORS: &str =
        "function getConvertersByAnchors(address[] anchors) public view returns (address[])";
    pub const RESERVE_TOKENS: &str =
        "function reserveTokens() external view returns (address[])";
    pub const RESERVE_BALANCE: &str =
        "function reserveBalance(address reserveToken) public view returns (uint256)";

    /// Contract registry on Ethereum mainnet
    pub const MAINNET_CONTRACT_REGISTRY: &str = "0x52Ae12ABe5D8BD778BD5397F99cA900624CfADD4";
    /// Registry name of the converter registry contract
    pub const CONVERTER_REGISTRY_NAME: &str = "BancorConverterRegistry";
    /// Sentinel reserve address standing for native ETH
    pub const NATIVE_ASSET: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";
}

// ── Curve (pool registry, fixed-size coin arrays) ────────────────────

pub mod curve {
    pub const GET_REGISTRY: &str = "function get_registry() view returns (address)";
    pub const GET_POOL_FROM_LP_TOKEN: &str =
        "function get_pool_from_lp_token(address) view returns (address)";
    pub const GET_N_COINS: &str = "function get_n_coins(address) view returns (uint256)";
    pub const GET_COINS: &str = "function get_coins(address) view returns (address[8])";
    pub const GET_BALANCES: &str = "function get_balances(address) view returns (uint256[8])";

    /// Address provider, same address on every chain Curve is deployed to
    pub const ADDRESS_PROVIDER: &str = "0x0000000022D53366457F9d5E68Ec105046FC4383";
    /// Slot count of `get_coins` / `get_balances`
    pub const MAX_COINS: usize = 8;
}

/// `name` right-padded into a bytes32 registry key, 0x-hex encoded
pub fn registry_key(name: &str) -> String {
    hex::encode_prefixed(B256::right_padding_from(name.as_bytes()))
}

pub static CONVERTER_REGISTRY_ID: Lazy<String> =
    Lazy::new(|| registry_key(bancor::CONVERTER_REGISTRY_NAME));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_registry_id() {
        assert_eq!(
            CONVERTER_REGISTRY_ID.as_str(),
            "0x42616e636f72436f6e7665727465725265676973747279000000000000000000"
        );
    }

    #[test]
    fn test_registry_key_is_bytes32() {
        let key = registry_key("BancorNetwork");
        assert_eq!(key.len(), 2 + 64);
        assert!(key.starts_with("0x42616e636f724e6574776f726b"));
    }
}
