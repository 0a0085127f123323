//! Rocker Universe volume oracle

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::read_json;
use crate::error::Result;
use crate::filter::volume::VolumeOracle;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidityRequest<'a> {
    token_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidityResponse {
    is_valid: bool,
}

pub struct RockerClient {
    client: Client,
    url: String,
}

impl RockerClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl VolumeOracle for RockerClient {
    async fn is_valid(&self, token_id: &str) -> Result<bool> {
        let response = self
            .client
            .post(&self.url)
            .json(&ValidityRequest { token_id })
            .send()
            .await?;

        let body: ValidityResponse = read_json("rocker_universe", response).await?;
        Ok(body.is_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let body = serde_json::to_string(&ValidityRequest { token_id: "42" }).unwrap();
        assert_eq!(body, r#"{"tokenId":"42"}"#);

        let parsed: ValidityResponse = serde_json::from_str(r#"{"isValid": true}"#).unwrap();
        assert!(parsed.is_valid);
        assert!(serde_json::from_str::<ValidityResponse>("{}").is_err());
    }
}
