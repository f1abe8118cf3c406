//! Contract View Service
//!
//! Read-only contract calls addressed by human-readable method signature,
//! with results rendered as strings (arrays comma-joined in array order).
//! `RpcContractView` is the alloy-backed implementation; resolvers only see
//! the trait.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

pub mod rpc;
pub mod wire;

use crate::error::ViewError;
use crate::types::Connection;
use async_trait::async_trait;

pub use rpc::RpcContractView;

#[async_trait]
pub trait ContractView: Send + Sync {
    /// Execute `method` (e.g. `"function balanceOf(address account) public view returns (uint256)"`)
    /// on `address`. `args` are string-encoded in parameter order; array
    /// arguments use the `[a,b]` form.
    async fn call_view(
        &self,
        connection: &Connection,
        address: &str,
        method: &str,
        args: Option<&[String]>,
    ) -> Result<String, ViewError>;
}

#[async_trait]
impl<T: ContractView + ?Sized> ContractView for std::sync::Arc<T> {
    async fn call_view(
        &self,
        connection: &Connection,
        address: &str,
        method: &str,
        args: Option<&[String]>,
    ) -> Result<String, ViewError> {
        (**self).call_view(connection, address, method, args).await
    }
}
