//! pump.fun coin listing

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::filter::source::CoinListing;
use crate::filter::types::Coin;

pub struct PumpFunClient {
    client: Client,
    url: String,
}

impl PumpFunClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CoinListing for PumpFunClient {
    async fn fetch_coins(&self) -> Result<Vec<Coin>> {
        info!("Fetching data from PumpFun...");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("PumpFun request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "PumpFun returned status {}",
                status.as_u16()
            )));
        }

        let raw: Vec<serde_json::Value> = response.json().await.map_err(|e| {
            Error::UpstreamUnavailable(format!("PumpFun response is not a coin list: {}", e))
        })?;

        let coins = decode_coins(raw);
        info!("Fetched {} coins.", coins.len());
        Ok(coins)
    }
}

/// Decode listing entries, skipping any that are not well-formed coins
fn decode_coins(raw: Vec<serde_json::Value>) -> Vec<Coin> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<Coin>(value) {
            Ok(coin) => Some(coin),
            Err(e) => {
                debug!("Skipping malformed coin entry: {}", e);
                None
            }
        })
        .collect()
}
