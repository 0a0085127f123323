//! Market-data filter
//!
//! Rejects pairs that are too old or too quiet, and anything tied to a
//! blacklisted developer or symbol.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::FilterConfig;
use crate::filter::blacklist::Blacklist;
use crate::filter::types::{FilterReason, FilterResult, TokenMarketRecord};

/// Pair age / activity / blacklist filter
pub struct MarketFilter {
    config: FilterConfig,
}

impl MarketFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Whether the record passes, evaluated against the current wall clock
    pub fn passes(&self, record: &TokenMarketRecord, blacklist: &Blacklist) -> bool {
        self.check(record, blacklist).is_pass()
    }

    /// Filter a record, reading `now` at call time
    pub fn check(&self, record: &TokenMarketRecord, blacklist: &Blacklist) -> FilterResult {
        self.check_at(record, blacklist, Utc::now())
    }

    /// Filter a record against an explicit reference time
    pub fn check_at(
        &self,
        record: &TokenMarketRecord,
        blacklist: &Blacklist,
        now: DateTime<Utc>,
    ) -> FilterResult {
        if blacklist.contains_developer(&record.developer) {
            debug!("{} dropped: developer {} blacklisted", record.symbol, record.developer);
            return FilterResult::Filtered(FilterReason::BlacklistedDeveloper);
        }

        if blacklist.contains_symbol(&record.symbol) {
            debug!("{} dropped: symbol blacklisted", record.symbol);
            return FilterResult::Filtered(FilterReason::BlacklistedSymbol);
        }

        let age_hours = (now - record.pair_age).num_milliseconds() as f64 / 3_600_000.0;
        if age_hours > self.config.pair_age_hours {
            return FilterResult::Filtered(FilterReason::PairTooOld { age_hours });
        }

        if record.one_hour_txns < self.config.min_1h_txns {
            return FilterResult::Filtered(FilterReason::LowOneHourTxns(record.one_hour_txns));
        }

        if record.five_min_txns < self.config.min_5m_txns {
            return FilterResult::Filtered(FilterReason::LowFiveMinTxns(record.five_min_txns));
        }

        debug!("{} passed market filter", record.symbol);
        FilterResult::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlacklistConfig;
    use crate::filter::types::{ContractStatus, SocialStatus};
    use chrono::Duration;

    fn test_config() -> FilterConfig {
        FilterConfig {
            pair_age_hours: 24.0,
            min_1h_txns: 100,
            min_5m_txns: 10,
            tweetscout_score_threshold: 450.0,
        }
    }

    fn record(now: DateTime<Utc>, age: Duration) -> TokenMarketRecord {
        TokenMarketRecord {
            id: "1".to_string(),
            symbol: "FOO".to_string(),
            contract: "Cntr111".to_string(),
            developer: "dev1".to_string(),
            pair_age: now - age,
            one_hour_txns: 250,
            five_min_txns: 30,
            volume_valid: false,
            contract_status: ContractStatus::Unknown,
            social_status: SocialStatus::Unknown,
        }
    }

    #[test]
    fn test_fresh_active_pair_passes() {
        let filter = MarketFilter::new(test_config());
        let now = Utc::now();

        let result = filter.check_at(&record(now, Duration::hours(2)), &Blacklist::default(), now);
        assert!(result.is_pass());
    }

    #[test]
    fn test_pair_age_boundary() {
        let filter = MarketFilter::new(test_config());
        let now = Utc::now();
        let blacklist = Blacklist::default();

        assert!(filter
            .check_at(&record(now, Duration::hours(24)), &blacklist, now)
            .is_pass());
        assert!(filter
            .check_at(&record(now, Duration::hours(25)), &blacklist, now)
            .is_filtered());
    }

    #[test]
    fn test_txn_minimums() {
        let filter = MarketFilter::new(test_config());
        let now = Utc::now();
        let blacklist = Blacklist::default();

        let mut quiet_hour = record(now, Duration::hours(1));
        quiet_hour.one_hour_txns = 99;
        assert_eq!(
            filter.check_at(&quiet_hour, &blacklist, now),
            FilterResult::Filtered(FilterReason::LowOneHourTxns(99))
        );

        let mut quiet_minutes = record(now, Duration::hours(1));
        quiet_minutes.five_min_txns = 9;
        assert_eq!(
            filter.check_at(&quiet_minutes, &blacklist, now),
            FilterResult::Filtered(FilterReason::LowFiveMinTxns(9))
        );

        let mut exact = record(now, Duration::hours(1));
        exact.one_hour_txns = 100;
        exact.five_min_txns = 10;
        assert!(filter.check_at(&exact, &blacklist, now).is_pass());
    }

    #[test]
    fn test_blacklisted_developer_always_excluded() {
        let filter = MarketFilter::new(test_config());
        let blacklist = Blacklist::new(&BlacklistConfig {
            memecoins: vec![],
            developers: vec!["dev1".to_string()],
        });

        assert!(!filter.passes(&record(Utc::now(), Duration::minutes(5)), &blacklist));
    }

    #[test]
    fn test_symbol_banned_mid_run_is_excluded() {
        let filter = MarketFilter::new(test_config());
        let mut blacklist = Blacklist::default();
        let rec = record(Utc::now(), Duration::hours(1));

        assert!(filter.passes(&rec, &blacklist));
        blacklist.ban_symbol("FOO");
        assert!(!filter.passes(&rec, &blacklist));
    }
}
