//! CSV report of surviving candidates

use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::filter::types::TokenMarketRecord;

/// Render records as CSV, one row per record with a header line
pub fn to_csv(records: &[TokenMarketRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::Output(e.to_string()))
}

/// Write the report. Nothing is written when there are no survivors.
///
/// Returns whether a file was written.
pub async fn write_report<P: AsRef<Path>>(path: P, records: &[TokenMarketRecord]) -> Result<bool> {
    let path = path.as_ref();
    if records.is_empty() {
        info!("No tokens survived; {} not written", path.display());
        return Ok(false);
    }

    let data = to_csv(records)?;
    tokio::fs::write(path, data)
        .await
        .map_err(|e| Error::Output(format!("{}: {}", path.display(), e)))?;

    info!("Filtered coins saved to '{}'", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::types::{ContractStatus, SocialStatus};
    use chrono::{TimeZone, Utc};

    fn record(id: &str, symbol: &str) -> TokenMarketRecord {
        TokenMarketRecord {
            id: id.to_string(),
            symbol: symbol.to_string(),
            contract: format!("contract-{}", id),
            developer: "dev1".to_string(),
            pair_age: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            one_hour_txns: 300,
            five_min_txns: 30,
            volume_valid: true,
            contract_status: ContractStatus::Good,
            social_status: SocialStatus::Medium,
        }
    }

    #[test]
    fn test_csv_layout() {
        let csv = String::from_utf8(to_csv(&[record("1", "FOO")]).unwrap()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("id,symbol,contract,developer,pair_age,one_hour_txns,five_min_txns,volume_valid,contract_status,social_status")
        );
        assert_eq!(
            lines.next(),
            Some("1,FOO,contract-1,dev1,2024-05-01T10:00:00Z,300,30,true,Good,Medium")
        );
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_coins.csv");

        assert!(write_report(&path, &[record("1", "FOO"), record("2", "BAR")])
            .await
            .unwrap());
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_no_survivors_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_coins.csv");

        assert!(!write_report(&path, &[]).await.unwrap());
        assert!(!path.exists());
    }
}
