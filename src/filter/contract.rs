//! Contract integrity check against an anti-rug service
//!
//! A Good contract with bundled supply is rejected and also poisons its
//! symbol and developer in the run blacklist, so later candidates from the
//! same developer never get past the market stage.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::filter::blacklist::Blacklist;
use crate::filter::types::{ContractStatus, FilterReason, FilterResult, TokenMarketRecord};

/// Status value the anti-rug service uses for a clean contract
pub const GOOD_STATUS: &str = "Good";

/// Anti-rug verdict for one contract
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RugReport {
    pub status: String,
    pub is_bundled_supply: bool,
}

/// Anti-rug backend keyed by contract address
#[async_trait]
pub trait AntiRugService: Send + Sync {
    async fn check(&self, contract: &str) -> Result<RugReport>;
}

/// Applies the anti-rug verdict and feeds bundled-supply hits into the blacklist
pub struct ContractIntegrityVerifier {
    service: Arc<dyn AntiRugService>,
}

impl ContractIntegrityVerifier {
    pub fn new(service: Arc<dyn AntiRugService>) -> Self {
        Self { service }
    }

    /// Whether the contract is clean. May grow the blacklist.
    pub async fn verify(&self, record: &mut TokenMarketRecord, blacklist: &mut Blacklist) -> bool {
        self.check(record, blacklist).await.is_pass()
    }

    /// Query the service, annotate the record and apply the blacklist effect
    pub async fn check(
        &self,
        record: &mut TokenMarketRecord,
        blacklist: &mut Blacklist,
    ) -> FilterResult {
        debug!("Checking contract {} for {}", record.contract, record.symbol);

        let report = match self.service.check(&record.contract).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Anti-rug query failed for {}: {}", record.symbol, e);
                record.contract_status = ContractStatus::Unknown;
                return FilterResult::Filtered(FilterReason::QueryFailed(e.to_string()));
            }
        };

        if report.status != GOOD_STATUS {
            debug!("{} failed anti-rug check: {}", record.symbol, report.status);
            record.contract_status = ContractStatus::Bad;
            return FilterResult::Filtered(FilterReason::ContractRejected(report.status));
        }

        if report.is_bundled_supply {
            warn!(
                "{} has bundled supply; blacklisting symbol and developer {}",
                record.symbol, record.developer
            );
            record.contract_status = ContractStatus::Bad;
            blacklist.ban_symbol(&record.symbol);
            blacklist.ban_developer(&record.developer);
            return FilterResult::Filtered(FilterReason::BundledSupply);
        }

        record.contract_status = ContractStatus::Good;
        FilterResult::Pass
    }
}
