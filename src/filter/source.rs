//! Candidate source
//!
//! Pulls the raw coin universe and keeps migrated coins whose symbol is not
//! blacklisted. Any failure here is fatal to the run.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::error::{Error, Result};
use crate::filter::blacklist::Blacklist;
use crate::filter::types::{Coin, TokenDetail};

/// Raw coin listing of the launch platform
#[async_trait]
pub trait CoinListing: Send + Sync {
    async fn fetch_coins(&self) -> Result<Vec<Coin>>;
}

/// Per-token market detail keyed by token id
#[async_trait]
pub trait TokenDetailSource: Send + Sync {
    async fn token_detail(&self, token_id: &str) -> Result<TokenDetail>;
}

pub struct CandidateSource {
    listing: Arc<dyn CoinListing>,
}

impl CandidateSource {
    pub fn new(listing: Arc<dyn CoinListing>) -> Self {
        Self { listing }
    }

    /// Fetch the listing and reduce it to migrated, non-blacklisted coins
    pub async fn fetch(&self, blacklist: &Blacklist) -> Result<Vec<Coin>> {
        let coins = self.listing.fetch_coins().await.map_err(|e| {
            if e.is_fatal() {
                e
            } else {
                Error::UpstreamUnavailable(e.to_string())
            }
        })?;
        Ok(select_migrated(coins, blacklist))
    }
}

/// Keep migrated coins with a non-blacklisted symbol, in source order
pub fn select_migrated(coins: Vec<Coin>, blacklist: &Blacklist) -> Vec<Coin> {
    info!("Analyzing {} listed coins...", coins.len());

    let migrated: Vec<Coin> = coins
        .into_iter()
        .filter(|coin| coin.is_migrated() && !blacklist.contains_symbol(&coin.symbol))
        .collect();

    info!(
        "Found {} migrated coins (after memecoin filtering).",
        migrated.len()
    );
    migrated
}
