//! Pipeline orchestrator
//!
//! Runs every candidate through the stages in a fixed order:
//! source → market → contract → volume → social → holders.
//!
//! Candidates are processed one at a time, so a blacklist entry added while
//! handling candidate k is seen by candidates k+1..n and never by earlier ones.

use std::sync::Arc;
use tracing::{debug, info};

use crate::api::{
    http_client, DexScreenerClient, GmgnClient, PumpFunClient, RockerClient, RugCheckClient,
    RugCheckFile, TweetScoutClient,
};
use crate::config::{BlacklistConfig, Config};
use crate::error::Result;
use crate::filter::blacklist::Blacklist;
use crate::filter::contract::{AntiRugService, ContractIntegrityVerifier};
use crate::filter::holders::{HolderConcentrationFilter, HolderSource};
use crate::filter::market::MarketFilter;
use crate::filter::social::{SentimentService, SocialAnnotator};
use crate::filter::source::{CandidateSource, CoinListing, TokenDetailSource};
use crate::filter::types::{
    Coin, Exclusion, FilterReason, FilterResult, Stage, TokenMarketRecord,
};
use crate::filter::volume::{self, VolumeOracle, VolumeVerifier};

/// Upstream collaborators the pipeline talks to
pub struct Services {
    pub listing: Arc<dyn CoinListing>,
    pub details: Arc<dyn TokenDetailSource>,
    pub volume_oracle: Arc<dyn VolumeOracle>,
    pub anti_rug: Arc<dyn AntiRugService>,
    pub sentiment: Arc<dyn SentimentService>,
    pub holders: Arc<dyn HolderSource>,
}

impl Services {
    /// HTTP-backed services for the configured endpoints
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http_client(config.http.timeout_ms)?;
        let endpoints = &config.api_endpoints;

        let anti_rug: Arc<dyn AntiRugService> = match &config.contract_check.rugcheck_file {
            Some(path) => {
                info!("Using local RugCheck file {}", path);
                Arc::new(RugCheckFile::new(path))
            }
            None => Arc::new(RugCheckClient::new(client.clone(), &endpoints.rugcheck)),
        };

        Ok(Self {
            listing: Arc::new(PumpFunClient::new(client.clone(), &endpoints.pumpfun)),
            details: Arc::new(DexScreenerClient::new(client.clone(), &endpoints.dexscreener)),
            volume_oracle: Arc::new(RockerClient::new(client.clone(), &endpoints.rocker_universe)),
            anti_rug,
            sentiment: Arc::new(TweetScoutClient::new(client.clone(), &endpoints.tweetscout)),
            holders: Arc::new(GmgnClient::new(client, &endpoints.gmgn_ai)),
        })
    }
}

/// Survivor counts at each stage boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub candidates: usize,
    pub market: usize,
    pub contract: usize,
    pub volume: usize,
    pub holders: usize,
}

/// Outcome of one pipeline run
#[derive(Debug)]
pub struct PipelineReport {
    /// Candidates that passed every stage, in source order
    pub survivors: Vec<TokenMarketRecord>,
    /// Every dropped candidate with its stage and reason
    pub exclusions: Vec<Exclusion>,
    pub counts: StageCounts,
    /// Blacklist as it stood at the end of the run
    pub blacklist: Blacklist,
}

pub struct Pipeline {
    source: CandidateSource,
    details: Arc<dyn TokenDetailSource>,
    market: MarketFilter,
    contract: ContractIntegrityVerifier,
    volume: Box<dyn VolumeVerifier>,
    social: SocialAnnotator,
    holder_source: Arc<dyn HolderSource>,
    holder_filter: HolderConcentrationFilter,
    blacklist_seed: BlacklistConfig,
}

impl Pipeline {
    pub fn new(config: &Config, services: Services) -> Self {
        let volume = volume::from_config(&config.volume_check, services.volume_oracle);
        info!("Volume check strategy: {}", volume.name());

        Self {
            source: CandidateSource::new(services.listing),
            details: services.details,
            market: MarketFilter::new(config.filters.clone()),
            contract: ContractIntegrityVerifier::new(services.anti_rug),
            volume,
            social: SocialAnnotator::new(
                services.sentiment,
                config.filters.tweetscout_score_threshold,
            ),
            holder_source: services.holders,
            holder_filter: HolderConcentrationFilter::new(),
            blacklist_seed: config.blacklist.clone(),
        }
    }

    /// Pipeline wired to the live HTTP services
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config, Services::from_config(config)?))
    }

    /// Run once over a fresh fetch, starting from the configured blacklist seed.
    ///
    /// Only a candidate-source failure is returned as an error; every
    /// per-candidate fault becomes an exclusion.
    pub async fn run(&self) -> Result<PipelineReport> {
        let mut blacklist = Blacklist::new(&self.blacklist_seed);
        let candidates = self.source.fetch(&blacklist).await?;

        let mut counts = StageCounts {
            candidates: candidates.len(),
            ..StageCounts::default()
        };
        let mut survivors = Vec::new();
        let mut exclusions = Vec::new();

        info!("Filtering {} candidates...", candidates.len());
        for coin in candidates {
            match self.process(&coin, &mut blacklist, &mut counts).await {
                Ok(record) => survivors.push(record),
                Err((stage, reason)) => {
                    debug!("Excluded {} at {} stage: {}", coin.symbol, stage, reason);
                    exclusions.push(Exclusion {
                        id: coin.id,
                        symbol: coin.symbol,
                        stage,
                        reason,
                    });
                }
            }
        }

        info!("Market filter kept {} tokens.", counts.market);
        info!("Contract check kept {} tokens.", counts.contract);
        info!("Volume check kept {} tokens.", counts.volume);
        info!("Holder analysis kept {} tokens.", counts.holders);
        info!("Final filtered tokens: {}", survivors.len());

        Ok(PipelineReport {
            survivors,
            exclusions,
            counts,
            blacklist,
        })
    }

    /// Carry one candidate through every stage
    async fn process(
        &self,
        coin: &Coin,
        blacklist: &mut Blacklist,
        counts: &mut StageCounts,
    ) -> std::result::Result<TokenMarketRecord, (Stage, FilterReason)> {
        let detail = self
            .details
            .token_detail(&coin.id)
            .await
            .map_err(|e| (Stage::Market, FilterReason::QueryFailed(e.to_string())))?;
        let mut record =
            TokenMarketRecord::from_detail(coin, detail).map_err(|reason| (Stage::Market, reason))?;

        reject_at(Stage::Market, self.market.check(&record, blacklist))?;
        counts.market += 1;

        // Contract runs before volume so bundled supply is always recorded.
        reject_at(Stage::Contract, self.contract.check(&mut record, blacklist).await)?;
        counts.contract += 1;

        if !self.volume.verify(&record).await {
            return Err((Stage::Volume, FilterReason::VolumeInvalid));
        }
        record.volume_valid = true;
        counts.volume += 1;

        record.social_status = self.social.annotate(&record.symbol).await;

        let snapshot = self
            .holder_source
            .holders(&record.id)
            .await
            .map_err(|e| (Stage::Holders, FilterReason::QueryFailed(e.to_string())))?;
        reject_at(Stage::Holders, self.holder_filter.check(&snapshot))?;
        counts.holders += 1;

        Ok(record)
    }
}

fn reject_at(stage: Stage, result: FilterResult) -> std::result::Result<(), (Stage, FilterReason)> {
    match result {
        FilterResult::Pass => Ok(()),
        FilterResult::Filtered(reason) => Err((stage, reason)),
    }
}
