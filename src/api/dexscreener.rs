//! DexScreener token detail client

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{join_url, read_json};
use crate::error::Result;
use crate::filter::source::TokenDetailSource;
use crate::filter::types::TokenDetail;

pub struct DexScreenerClient {
    client: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn token_url(&self, token_id: &str) -> String {
        join_url(&self.base_url, &format!("tokens/{}", token_id))
    }
}

#[async_trait]
impl TokenDetailSource for DexScreenerClient {
    async fn token_detail(&self, token_id: &str) -> Result<TokenDetail> {
        let url = self.token_url(token_id);
        debug!("Fetching token detail {}", url);

        let response = self.client.get(&url).send().await?;
        read_json("dexscreener", response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_url() {
        let client = DexScreenerClient::new(Client::new(), "https://api.dexscreener.com/");
        assert_eq!(client.token_url("42"), "https://api.dexscreener.com/tokens/42");
    }
}
