//! Resolution Report
//!
//! Human-oriented summary of one resolution: each resolved reserve's share
//! of the decomposed token in percent, total coverage, and how many reserves
//! could not be resolved.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use crate::types::TokenComponent;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Decimal places kept in percentages
pub const PERCENT_DP: u32 = 2;

/// One child slot of the decomposition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReserveShare {
    /// None for a Curve hole
    pub token_address: Option<String>,
    /// None when the slot is a hole or the rate does not fit a Decimal
    pub share_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    pub token_address: String,
    pub protocol: String,
    pub network: String,
    pub generated_at: DateTime<Utc>,
    pub reserves: Vec<ReserveShare>,
    pub coverage_percent: Decimal,
    pub unresolved: u32,
}

/// `rate` as a percentage rounded to `PERCENT_DP` places
pub fn rate_to_percent(rate: &str) -> Option<Decimal> {
    let rate = Decimal::from_str(rate.trim()).ok()?;
    rate.checked_mul(Decimal::ONE_HUNDRED)
        .map(|p| p.round_dp(PERCENT_DP).normalize())
}

impl ResolutionReport {
    pub fn new(root: &TokenComponent, protocol: impl Into<String>, network: impl Into<String>) -> Self {
        let reserves: Vec<ReserveShare> = root
            .components
            .iter()
            .map(|slot| match slot {
                Some(c) => ReserveShare {
                    token_address: Some(c.token_address.clone()),
                    share_percent: rate_to_percent(&c.rate),
                },
                None => ReserveShare {
                    token_address: None,
                    share_percent: None,
                },
            })
            .collect();

        let coverage_percent = reserves
            .iter()
            .filter_map(|r| r.share_percent)
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p));

        Self {
            token_address: root.token_address.clone(),
            protocol: protocol.into(),
            network: network.into(),
            generated_at: Utc::now(),
            reserves,
            coverage_percent,
            unresolved: root.unresolved_components,
        }
    }
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} on {}) at {}",
            self.token_address,
            self.protocol,
            self.network,
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        for (i, reserve) in self.reserves.iter().enumerate() {
            let address = reserve.token_address.as_deref().unwrap_or("<unresolved>");
            match reserve.share_percent {
                Some(p) => writeln!(f, "  [{}] {} {}%", i, address, p)?,
                None => writeln!(f, "  [{}] {} -", i, address)?,
            }
        }
        write!(
            f,
            "  coverage {}%, {} unresolved",
            self.coverage_percent, self.unresolved
        )
    }
}
