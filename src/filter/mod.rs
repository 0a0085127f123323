//! Candidate filtering stages
//!
//! Each stage is a small type with a boolean `passes`/`verify` entry point
//! and a `check` variant that reports why a candidate was dropped. Stages
//! that need upstream data take it through a service trait defined here,
//! implemented by the HTTP clients in [`crate::api`].

pub mod blacklist;
pub mod contract;
pub mod holders;
pub mod market;
pub mod social;
pub mod source;
pub mod types;
pub mod volume;

pub use blacklist::Blacklist;
pub use contract::{AntiRugService, ContractIntegrityVerifier, RugReport};
pub use holders::{HolderConcentrationFilter, HolderSource, TOP5_HOLDER_RATIO_THRESHOLD};
pub use market::MarketFilter;
pub use social::{SentimentService, SocialAnnotator};
pub use source::{CandidateSource, CoinListing, TokenDetailSource};
pub use types::{
    Coin, ContractStatus, Exclusion, FilterReason, FilterResult, HolderSnapshot, SocialStatus,
    Stage, TokenDetail, TokenMarketRecord,
};
pub use volume::{DelegatedVolumeVerifier, LocalVolumeHeuristic, VolumeOracle, VolumeVerifier};
