//! Social sentiment annotation
//!
//! Labels each candidate Good / Medium / Unknown from a sentiment score.
//! Never excludes anything.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::filter::types::SocialStatus;

/// Sentiment score service keyed by symbol
#[async_trait]
pub trait SentimentService: Send + Sync {
    async fn score(&self, symbol: &str) -> Result<f64>;
}

pub struct SocialAnnotator {
    service: Arc<dyn SentimentService>,
    threshold: f64,
}

impl SocialAnnotator {
    pub fn new(service: Arc<dyn SentimentService>, threshold: f64) -> Self {
        Self { service, threshold }
    }

    pub async fn annotate(&self, symbol: &str) -> SocialStatus {
        match self.service.score(symbol).await {
            Ok(score) => {
                let status = self.classify(score);
                debug!("{} sentiment score {} -> {:?}", symbol, score, status);
                status
            }
            Err(e) => {
                warn!("Sentiment query failed for {}: {}", symbol, e);
                SocialStatus::Unknown
            }
        }
    }

    fn classify(&self, score: f64) -> SocialStatus {
        if score > self.threshold {
            SocialStatus::Good
        } else if score.is_nan() {
            SocialStatus::Unknown
        } else {
            SocialStatus::Medium
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct FixedScore(Option<f64>);

    #[async_trait]
    impl SentimentService for FixedScore {
        async fn score(&self, _symbol: &str) -> Result<f64> {
            self.0.ok_or(Error::Http("connection refused".to_string()))
        }
    }

    fn annotator(score: Option<f64>) -> SocialAnnotator {
        SocialAnnotator::new(Arc::new(FixedScore(score)), 450.0)
    }

    #[tokio::test]
    async fn test_labels() {
        assert_eq!(annotator(Some(500.0)).annotate("FOO").await, SocialStatus::Good);
        assert_eq!(annotator(Some(450.0)).annotate("FOO").await, SocialStatus::Medium);
        assert_eq!(annotator(Some(12.0)).annotate("FOO").await, SocialStatus::Medium);
        assert_eq!(annotator(None).annotate("FOO").await, SocialStatus::Unknown);
    }
}
