//! Core data types for the filter pipeline
//!
//! A [`Coin`] comes from the candidate listing. Coins that survive source
//! filtering are joined with their token detail into a [`TokenMarketRecord`],
//! which is enriched in place as it moves through the stages.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Status value marking a coin that left the bonding curve
pub const MIGRATED_STATUS: &str = "migrated";

/// A coin as listed by the launch platform
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Coin {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub symbol: String,
    pub status: String,
    pub developer: String,
}

impl Coin {
    pub fn is_migrated(&self) -> bool {
        self.status == MIGRATED_STATUS
    }
}

/// Token detail as returned by the market-data aggregator.
///
/// Every field is optional on the wire; [`TokenMarketRecord::from_detail`]
/// decides which ones are required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetail {
    #[serde(default)]
    pub contract: Option<String>,
    /// Pair creation time: RFC 3339, naive `%Y-%m-%dT%H:%M:%S` (UTC) or epoch millis
    #[serde(default)]
    pub pair_age: Option<serde_json::Value>,
    #[serde(default)]
    pub one_hour_txns: Option<u64>,
    #[serde(default)]
    pub five_min_txns: Option<u64>,
}

/// Result of the anti-rug check attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContractStatus {
    Good,
    Bad,
    Unknown,
}

/// Coarse social sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SocialStatus {
    Good,
    Medium,
    Unknown,
}

/// A migrated coin joined with its market data, enriched stage by stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenMarketRecord {
    pub id: String,
    pub symbol: String,
    pub contract: String,
    pub developer: String,
    pub pair_age: DateTime<Utc>,
    pub one_hour_txns: u64,
    pub five_min_txns: u64,
    pub volume_valid: bool,
    pub contract_status: ContractStatus,
    pub social_status: SocialStatus,
}

impl TokenMarketRecord {
    /// Build a record from a coin and its token detail.
    ///
    /// Fails with [`FilterReason::MalformedRecord`] when a required field is
    /// missing or unparseable.
    pub fn from_detail(coin: &Coin, detail: TokenDetail) -> Result<Self, FilterReason> {
        let contract = detail
            .contract
            .filter(|c| !c.trim().is_empty())
            .ok_or(FilterReason::MalformedRecord("contract"))?;
        let pair_age = detail
            .pair_age
            .as_ref()
            .and_then(parse_pair_age)
            .ok_or(FilterReason::MalformedRecord("pairAge"))?;
        let one_hour_txns = detail
            .one_hour_txns
            .ok_or(FilterReason::MalformedRecord("oneHourTxns"))?;
        let five_min_txns = detail
            .five_min_txns
            .ok_or(FilterReason::MalformedRecord("fiveMinTxns"))?;

        Ok(Self {
            id: coin.id.clone(),
            symbol: coin.symbol.clone(),
            contract,
            developer: coin.developer.clone(),
            pair_age,
            one_hour_txns,
            five_min_txns,
            volume_valid: false,
            contract_status: ContractStatus::Unknown,
            social_status: SocialStatus::Unknown,
        })
    }
}

/// Holder distribution for one token, holders in upstream order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderSnapshot {
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub holders: Vec<f64>,
}

impl HolderSnapshot {
    /// Whether holder balances arrive sorted largest first
    pub fn is_descending(&self) -> bool {
        self.holders.windows(2).all(|w| w[0] >= w[1])
    }
}

/// Pipeline stage a candidate can be excluded at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Market,
    Contract,
    Volume,
    Holders,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Market => "market",
            Stage::Contract => "contract",
            Stage::Volume => "volume",
            Stage::Holders => "holders",
        };
        f.write_str(name)
    }
}

/// Reason why a candidate was excluded
#[derive(Debug, Clone, PartialEq)]
pub enum FilterReason {
    /// Symbol is on the memecoin blacklist
    BlacklistedSymbol,
    /// Developer is on the developer blacklist
    BlacklistedDeveloper,
    /// Upstream query failed or returned non-success
    QueryFailed(String),
    /// Required field missing or unparseable
    MalformedRecord(&'static str),
    /// Pair older than the configured window
    PairTooOld { age_hours: f64 },
    /// Not enough transactions in the last hour
    LowOneHourTxns(u64),
    /// Not enough transactions in the last five minutes
    LowFiveMinTxns(u64),
    /// Volume check reported invalid
    VolumeInvalid,
    /// Anti-rug status other than Good
    ContractRejected(String),
    /// Anti-rug flagged bundled supply
    BundledSupply,
    /// Holder snapshot unusable (no supply, zero supply, no holders, bad balance)
    InvalidHolderSnapshot,
    /// Top-5 holders own too much of the supply
    HolderConcentration(f64),
}

impl fmt::Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterReason::BlacklistedSymbol => write!(f, "symbol is blacklisted"),
            FilterReason::BlacklistedDeveloper => write!(f, "developer is blacklisted"),
            FilterReason::QueryFailed(e) => write!(f, "query failed: {}", e),
            FilterReason::MalformedRecord(field) => write!(f, "missing or invalid field {}", field),
            FilterReason::PairTooOld { age_hours } => write!(f, "pair is {:.1}h old", age_hours),
            FilterReason::LowOneHourTxns(n) => write!(f, "only {} txns in the last hour", n),
            FilterReason::LowFiveMinTxns(n) => write!(f, "only {} txns in the last 5 minutes", n),
            FilterReason::VolumeInvalid => write!(f, "volume check failed"),
            FilterReason::ContractRejected(status) => {
                write!(f, "contract status {}", status)
            }
            FilterReason::BundledSupply => write!(f, "bundled supply detected"),
            FilterReason::InvalidHolderSnapshot => write!(f, "holder snapshot unusable"),
            FilterReason::HolderConcentration(ratio) => {
                write!(f, "top 5 holders own {:.2}% of supply", ratio * 100.0)
            }
        }
    }
}

/// Filter result
#[derive(Debug, Clone, PartialEq)]
pub enum FilterResult {
    /// Candidate passed
    Pass,
    /// Candidate was filtered
    Filtered(FilterReason),
}

impl FilterResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, FilterResult::Pass)
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, FilterResult::Filtered(_))
    }
}

/// A candidate dropped by the pipeline, with where and why
#[derive(Debug, Clone)]
pub struct Exclusion {
    pub id: String,
    pub symbol: String,
    pub stage: Stage,
    pub reason: FilterReason,
}

fn parse_pair_age(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        }
        serde_json::Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coin() -> Coin {
        Coin {
            id: "1".to_string(),
            symbol: "FOO".to_string(),
            status: "migrated".to_string(),
            developer: "dev1".to_string(),
        }
    }

    #[test]
    fn test_coin_numeric_id() {
        let coin: Coin = serde_json::from_value(json!({
            "id": 1, "symbol": "FOO", "status": "migrated", "developer": "dev1"
        }))
        .unwrap();
        assert_eq!(coin.id, "1");
        assert!(coin.is_migrated());
    }

    #[test]
    fn test_record_from_detail() {
        let detail: TokenDetail = serde_json::from_value(json!({
            "contract": "Cntr111",
            "pairAge": "2024-05-01T10:00:00",
            "oneHourTxns": 300,
            "fiveMinTxns": 40
        }))
        .unwrap();

        let record = TokenMarketRecord::from_detail(&coin(), detail).unwrap();
        assert_eq!(record.contract, "Cntr111");
        assert_eq!(record.developer, "dev1");
        assert_eq!(record.pair_age.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert_eq!(record.contract_status, ContractStatus::Unknown);
        assert_eq!(record.social_status, SocialStatus::Unknown);
    }

    #[test]
    fn test_pair_age_formats() {
        let rfc = parse_pair_age(&json!("2024-05-01T10:00:00Z")).unwrap();
        let millis = parse_pair_age(&json!(1714557600000i64)).unwrap();
        assert_eq!(rfc, millis);
        assert!(parse_pair_age(&json!("yesterday")).is_none());
        assert!(parse_pair_age(&json!(true)).is_none());
    }

    #[test]
    fn test_missing_fields_fail_closed() {
        let detail: TokenDetail = serde_json::from_value(json!({
            "contract": "Cntr111",
            "pairAge": "2024-05-01T10:00:00",
            "fiveMinTxns": 40
        }))
        .unwrap();
        assert_eq!(
            TokenMarketRecord::from_detail(&coin(), detail),
            Err(FilterReason::MalformedRecord("oneHourTxns"))
        );

        let detail: TokenDetail = serde_json::from_value(json!({
            "contract": "Cntr111",
            "pairAge": "not a date",
            "oneHourTxns": 300,
            "fiveMinTxns": 40
        }))
        .unwrap();
        assert_eq!(
            TokenMarketRecord::from_detail(&coin(), detail),
            Err(FilterReason::MalformedRecord("pairAge"))
        );
    }

    #[test]
    fn test_holder_order_check() {
        let sorted = HolderSnapshot {
            total_supply: Some(100.0),
            holders: vec![5.0, 4.0, 4.0, 1.0],
        };
        let unsorted = HolderSnapshot {
            total_supply: Some(100.0),
            holders: vec![1.0, 5.0],
        };
        assert!(sorted.is_descending());
        assert!(!unsorted.is_descending());
    }
}
