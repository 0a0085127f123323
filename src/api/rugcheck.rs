//! RugCheck anti-rug backends
//!
//! [`RugCheckClient`] queries the live service. [`RugCheckFile`] answers from
//! a local JSON export of `{contractAddress, status, isBundledSupply?}` entries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use super::read_json;
use crate::error::{Error, Result};
use crate::filter::contract::{AntiRugService, RugReport};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckRequest<'a> {
    token_address: &'a str,
}

pub struct RugCheckClient {
    client: Client,
    url: String,
}

impl RugCheckClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl AntiRugService for RugCheckClient {
    async fn check(&self, contract: &str) -> Result<RugReport> {
        let response = self
            .client
            .post(&self.url)
            .json(&CheckRequest {
                token_address: contract,
            })
            .send()
            .await?;

        read_json("rugcheck", response).await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileEntry {
    #[serde(default)]
    contract_address: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    is_bundled_supply: bool,
}

/// Offline RugCheck export, re-read on every lookup
pub struct RugCheckFile {
    path: PathBuf,
}

impl RugCheckFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<Vec<FileEntry>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            warn!("RugCheck file {} unreadable: {}", self.path.display(), e);
            Error::Io(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[async_trait]
impl AntiRugService for RugCheckFile {
    async fn check(&self, contract: &str) -> Result<RugReport> {
        let entries = self.load().await?;

        let entry = entries
            .into_iter()
            .find(|e| e.contract_address.as_deref() == Some(contract))
            .ok_or_else(|| {
                debug!("Contract {} not found in RugCheck data", contract);
                Error::NotFound(format!("contract {} in RugCheck file", contract))
            })?;

        Ok(RugReport {
            status: entry.status.unwrap_or_default(),
            is_bundled_supply: entry.is_bundled_supply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn export(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_file_lookup() {
        let file = export(
            r#"[
                {"contractAddress": "GoodOne", "status": "Good"},
                {"contractAddress": "Bundled", "status": "Good", "isBundledSupply": true},
                {"contractAddress": "Risky", "status": "Danger"},
                {"status": "Good"}
            ]"#,
        );
        let source = RugCheckFile::new(file.path());

        let good = source.check("GoodOne").await.unwrap();
        assert_eq!(good.status, "Good");
        assert!(!good.is_bundled_supply);

        assert!(source.check("Bundled").await.unwrap().is_bundled_supply);
        assert_eq!(source.check("Risky").await.unwrap().status, "Danger");
        assert!(source.check("Missing").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = RugCheckFile::new(dir.path().join("rugcheck.json"));
        assert!(source.check("GoodOne").await.is_err());
    }

    #[test]
    fn test_request_and_response_format() {
        let body = serde_json::to_string(&CheckRequest {
            token_address: "Cntr111",
        })
        .unwrap();
        assert_eq!(body, r#"{"tokenAddress":"Cntr111"}"#);

        let report: RugReport =
            serde_json::from_str(r#"{"status": "Good", "isBundledSupply": false}"#).unwrap();
        assert_eq!(report.status, "Good");
        assert!(serde_json::from_str::<RugReport>(r#"{"status": "Good"}"#).is_err());
    }
}
