//! Top-5 holder concentration filter
//!
//! Takes the first five balances in upstream order. Balances are not
//! re-sorted here; an out-of-order snapshot is logged so a bad upstream
//! shows up in the run output.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::filter::types::{FilterReason, FilterResult, HolderSnapshot};

/// Largest holders counted toward concentration
pub const TOP_HOLDER_COUNT: usize = 5;

/// Concentration at or above this share of supply is rejected
pub const TOP5_HOLDER_RATIO_THRESHOLD: f64 = 0.2;

/// Holder distribution source keyed by token id
#[async_trait]
pub trait HolderSource: Send + Sync {
    async fn holders(&self, token_id: &str) -> Result<HolderSnapshot>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HolderConcentrationFilter;

impl HolderConcentrationFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn passes(&self, snapshot: &HolderSnapshot) -> bool {
        self.check(snapshot).is_pass()
    }

    pub fn check(&self, snapshot: &HolderSnapshot) -> FilterResult {
        let ratio = match top_holder_ratio(snapshot) {
            Some(ratio) => ratio,
            None => return FilterResult::Filtered(FilterReason::InvalidHolderSnapshot),
        };

        if !snapshot.is_descending() {
            warn!("Holder list is not sorted by balance; top-5 ratio may be understated");
        }

        debug!("Top-5 holder ratio {:.4}", ratio);
        if ratio < TOP5_HOLDER_RATIO_THRESHOLD {
            FilterResult::Pass
        } else {
            FilterResult::Filtered(FilterReason::HolderConcentration(ratio))
        }
    }
}

/// Share of supply held by the first five holders, or None for unusable snapshots
pub fn top_holder_ratio(snapshot: &HolderSnapshot) -> Option<f64> {
    let total_supply = snapshot.total_supply?;
    if !total_supply.is_finite() || total_supply <= 0.0 || snapshot.holders.is_empty() {
        return None;
    }

    let top_holders = &snapshot.holders[..snapshot.holders.len().min(TOP_HOLDER_COUNT)];
    if top_holders.iter().any(|b| !b.is_finite() || *b < 0.0) {
        return None;
    }

    let top: f64 = top_holders.iter().sum();
    let ratio = top / total_supply;
    ratio.is_finite().then_some(ratio)
}
