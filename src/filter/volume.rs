//! Volume validity check
//!
//! Two interchangeable strategies behind [`VolumeVerifier`]: delegate to an
//! external oracle, or judge the record's own transaction counts locally.
//! The strategy is picked once from configuration.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::VolumeCheckConfig;
use crate::error::Result;
use crate::filter::types::TokenMarketRecord;

/// Decides whether a record's trading volume is genuine
#[async_trait]
pub trait VolumeVerifier: Send + Sync {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// True when volume looks valid. Never errors; failures read as false.
    async fn verify(&self, record: &TokenMarketRecord) -> bool;
}

/// Remote volume-validity oracle keyed by token id
#[async_trait]
pub trait VolumeOracle: Send + Sync {
    async fn is_valid(&self, token_id: &str) -> Result<bool>;
}

/// Trusts an external oracle, failing closed on any error
pub struct DelegatedVolumeVerifier {
    oracle: Arc<dyn VolumeOracle>,
}

impl DelegatedVolumeVerifier {
    pub fn new(oracle: Arc<dyn VolumeOracle>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl VolumeVerifier for DelegatedVolumeVerifier {
    fn name(&self) -> &'static str {
        "oracle"
    }

    async fn verify(&self, record: &TokenMarketRecord) -> bool {
        match self.oracle.is_valid(&record.id).await {
            Ok(valid) => {
                debug!("Volume oracle says {} valid={}", record.symbol, valid);
                valid
            }
            Err(e) => {
                warn!("Volume oracle query failed for {}: {}", record.symbol, e);
                false
            }
        }
    }
}

/// Offline heuristic over the record's transaction counts
pub struct LocalVolumeHeuristic {
    min_1h_txns: u64,
    min_5m_txns: u64,
}

impl LocalVolumeHeuristic {
    pub fn new(min_1h_txns: u64, min_5m_txns: u64) -> Self {
        Self {
            min_1h_txns,
            min_5m_txns,
        }
    }
}

#[async_trait]
impl VolumeVerifier for LocalVolumeHeuristic {
    fn name(&self) -> &'static str {
        "local-heuristic"
    }

    async fn verify(&self, record: &TokenMarketRecord) -> bool {
        // A 5m window is inside the 1h window; more 5m txns than 1h txns is bogus data.
        if record.five_min_txns > record.one_hour_txns {
            debug!(
                "{} has inconsistent txn counts ({} 5m > {} 1h)",
                record.symbol, record.five_min_txns, record.one_hour_txns
            );
            return false;
        }

        record.one_hour_txns >= self.min_1h_txns && record.five_min_txns >= self.min_5m_txns
    }
}

/// Pick the configured strategy
pub fn from_config(
    config: &VolumeCheckConfig,
    oracle: Arc<dyn VolumeOracle>,
) -> Box<dyn VolumeVerifier> {
    if config.use_rocker_api {
        Box::new(DelegatedVolumeVerifier::new(oracle))
    } else {
        Box::new(LocalVolumeHeuristic::new(
            config.heuristic_min_1h_txns,
            config.heuristic_min_5m_txns,
        ))
    }
}
