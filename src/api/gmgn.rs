//! GMGN.ai holder distribution client

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{join_url, read_json};
use crate::error::Result;
use crate::filter::holders::HolderSource;
use crate::filter::types::HolderSnapshot;

pub struct GmgnClient {
    client: Client,
    base_url: String,
}

impl GmgnClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl HolderSource for GmgnClient {
    async fn holders(&self, token_id: &str) -> Result<HolderSnapshot> {
        let url = join_url(&self.base_url, &format!("holders/{}", token_id));
        debug!("Fetching holders {}", url);

        let response = self.client.get(&url).send().await?;
        read_json("gmgn_ai", response).await
    }
}
