//! TweetScout sentiment score client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::read_json;
use crate::error::Result;
use crate::filter::social::SentimentService;

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    score: f64,
}

pub struct TweetScoutClient {
    client: Client,
    url: String,
}

impl TweetScoutClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SentimentService for TweetScoutClient {
    async fn score(&self, symbol: &str) -> Result<f64> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("symbol", symbol)])
            .send()
            .await?;

        let body: ScoreResponse = read_json("tweetscout", response).await?;
        Ok(body.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_response() {
        let parsed: ScoreResponse = serde_json::from_str(r#"{"score": 512.5}"#).unwrap();
        assert_eq!(parsed.score, 512.5);
        assert!(serde_json::from_str::<ScoreResponse>(r#"{"score": null}"#).is_err());
    }
}
