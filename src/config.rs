//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_endpoints: ApiEndpoints,
    pub filters: FilterConfig,
    #[serde(default)]
    pub blacklist: BlacklistConfig,
    #[serde(default)]
    pub volume_check: VolumeCheckConfig,
    #[serde(default)]
    pub contract_check: ContractCheckConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Upstream service URLs
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEndpoints {
    /// Candidate listing (pump.fun coins)
    pub pumpfun: String,
    /// Token detail base URL, queried as `{dexscreener}/tokens/{id}`
    pub dexscreener: String,
    /// Holder distribution base URL, queried as `{gmgn_ai}/holders/{id}`
    pub gmgn_ai: String,
    /// Volume oracle
    #[serde(default = "default_rocker_universe_url")]
    pub rocker_universe: String,
    /// Anti-rug service
    #[serde(default = "default_rugcheck_url")]
    pub rugcheck: String,
    /// Sentiment score service
    #[serde(default = "default_tweetscout_url")]
    pub tweetscout: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_pair_age_hours")]
    pub pair_age_hours: f64,
    #[serde(default = "default_min_1h_txns")]
    pub min_1h_txns: u64,
    #[serde(default = "default_min_5m_txns")]
    pub min_5m_txns: u64,
    #[serde(default = "default_tweetscout_score_threshold")]
    pub tweetscout_score_threshold: f64,
}

/// Seed sets for the run's blacklist
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlacklistConfig {
    #[serde(default)]
    pub memecoins: Vec<String>,
    #[serde(default)]
    pub developers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeCheckConfig {
    /// Delegate to the Rocker Universe oracle instead of the local heuristic
    #[serde(default)]
    pub use_rocker_api: bool,
    /// Local heuristic: minimum 1h transactions
    #[serde(default = "default_heuristic_min_1h_txns")]
    pub heuristic_min_1h_txns: u64,
    /// Local heuristic: minimum 5m transactions
    #[serde(default = "default_heuristic_min_5m_txns")]
    pub heuristic_min_5m_txns: u64,
}

impl Default for VolumeCheckConfig {
    fn default() -> Self {
        Self {
            use_rocker_api: false,
            heuristic_min_1h_txns: default_heuristic_min_1h_txns(),
            heuristic_min_5m_txns: default_heuristic_min_5m_txns(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractCheckConfig {
    /// Offline RugCheck export; when set it replaces the HTTP anti-rug service
    #[serde(default)]
    pub rugcheck_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

// Default value functions
fn default_rocker_universe_url() -> String {
    "https://api.rockeruniverse.com/validate".to_string()
}

fn default_rugcheck_url() -> String {
    "https://api.rugcheck.xyz/v1/check".to_string()
}

fn default_tweetscout_url() -> String {
    "https://api.tweetscout.io/v2/score".to_string()
}

fn default_pair_age_hours() -> f64 {
    24.0
}

fn default_min_1h_txns() -> u64 {
    100
}

fn default_min_5m_txns() -> u64 {
    10
}

fn default_tweetscout_score_threshold() -> f64 {
    450.0
}

fn default_heuristic_min_1h_txns() -> u64 {
    150
}

fn default_heuristic_min_5m_txns() -> u64 {
    15
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_output_path() -> String {
    "filtered_coins.csv".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Start with defaults
            .set_default("filters.pair_age_hours", default_pair_age_hours())?
            .set_default("filters.min_1h_txns", default_min_1h_txns())?
            .set_default("filters.min_5m_txns", default_min_5m_txns())?
            .set_default(
                "filters.tweetscout_score_threshold",
                default_tweetscout_score_threshold(),
            )?
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix COIN_FILTER_)
            .add_source(
                config::Environment::with_prefix("COIN_FILTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let endpoints = [
            ("pumpfun", &self.api_endpoints.pumpfun),
            ("dexscreener", &self.api_endpoints.dexscreener),
            ("gmgn_ai", &self.api_endpoints.gmgn_ai),
            ("rocker_universe", &self.api_endpoints.rocker_universe),
            ("rugcheck", &self.api_endpoints.rugcheck),
            ("tweetscout", &self.api_endpoints.tweetscout),
        ];
        for (name, endpoint) in endpoints {
            url::Url::parse(endpoint)
                .with_context(|| format!("Invalid api_endpoints.{} URL: {}", name, endpoint))?;
        }

        if !self.filters.pair_age_hours.is_finite() || self.filters.pair_age_hours <= 0.0 {
            anyhow::bail!(
                "filters.pair_age_hours must be positive, got {}",
                self.filters.pair_age_hours
            );
        }

        if !self.filters.tweetscout_score_threshold.is_finite() {
            anyhow::bail!("filters.tweetscout_score_threshold must be a finite number");
        }

        if self.http.timeout_ms == 0 {
            anyhow::bail!("http.timeout_ms must be greater than zero");
        }

        if self.output.path.trim().is_empty() {
            anyhow::bail!("output.path must not be empty");
        }

        if let Some(file) = &self.contract_check.rugcheck_file {
            if !Path::new(file).exists() {
                tracing::warn!(
                    "contract_check.rugcheck_file {} does not exist; every contract check will fail",
                    file
                );
            }
        }

        Ok(())
    }

    /// Get masked configuration for display (hide secrets)
    pub fn masked_display(&self) -> String {
        format!(
            r#"Configuration:
  API endpoints:
    pumpfun: {}
    dexscreener: {}
    gmgn_ai: {}
    rocker_universe: {}
    rugcheck: {}
    tweetscout: {}
  Filters:
    pair_age_hours: {}
    min_1h_txns: {}
    min_5m_txns: {}
    tweetscout_score_threshold: {}
  Blacklist:
    memecoins: {}
    developers: {}
  Volume check:
    use_rocker_api: {}
    heuristic_min_1h_txns: {}
    heuristic_min_5m_txns: {}
  Contract check:
    rugcheck_file: {}
  HTTP:
    timeout: {}ms
  Output:
    path: {}
"#,
            mask_url(&self.api_endpoints.pumpfun),
            mask_url(&self.api_endpoints.dexscreener),
            mask_url(&self.api_endpoints.gmgn_ai),
            mask_url(&self.api_endpoints.rocker_universe),
            mask_url(&self.api_endpoints.rugcheck),
            mask_url(&self.api_endpoints.tweetscout),
            self.filters.pair_age_hours,
            self.filters.min_1h_txns,
            self.filters.min_5m_txns,
            self.filters.tweetscout_score_threshold,
            self.blacklist.memecoins.len(),
            self.blacklist.developers.len(),
            self.volume_check.use_rocker_api,
            self.volume_check.heuristic_min_1h_txns,
            self.volume_check.heuristic_min_5m_txns,
            self.contract_check
                .rugcheck_file
                .as_deref()
                .unwrap_or("(remote service)"),
            self.http.timeout_ms,
            self.output.path,
        )
    }
}

/// Mask URL for display (hide API keys in query params)
fn mask_url(url: &str) -> String {
    if let Some(idx) = url.find('?') {
        format!("{}?***", &url[..idx])
    } else {
        url.to_string()
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            pair_age_hours: default_pair_age_hours(),
            min_1h_txns: default_min_1h_txns(),
            min_5m_txns: default_min_5m_txns(),
            tweetscout_score_threshold: default_tweetscout_score_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[api_endpoints]
pumpfun = "https://pump.example.com/coins"
dexscreener = "https://dex.example.com"
gmgn_ai = "https://gmgn.example.com?key=secret"

[filters]
pair_age_hours = 12
min_1h_txns = 50

[blacklist]
memecoins = ["SCAM"]
developers = ["dev-bad"]

[volume_check]
use_rocker_api = true
"#;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_defaults() {
        let file = write_config(SAMPLE);
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.filters.pair_age_hours, 12.0);
        assert_eq!(config.filters.min_1h_txns, 50);
        assert_eq!(config.filters.min_5m_txns, 10);
        assert_eq!(config.filters.tweetscout_score_threshold, 450.0);
        assert_eq!(config.blacklist.memecoins, vec!["SCAM".to_string()]);
        assert!(config.volume_check.use_rocker_api);
        assert_eq!(config.output.path, "filtered_coins.csv");
        assert!(config.contract_check.rugcheck_file.is_none());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let file = write_config(&SAMPLE.replace("https://dex.example.com", "not a url"));
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_non_positive_pair_age_rejected() {
        let file = write_config(&SAMPLE.replace("pair_age_hours = 12", "pair_age_hours = 0"));
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_masked_display_hides_query() {
        let file = write_config(SAMPLE);
        let config = Config::load(file.path()).unwrap();
        let shown = config.masked_display();

        assert!(shown.contains("https://gmgn.example.com?***"));
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn test_mask_url() {
        assert_eq!(
            mask_url("https://api.example.com?key=secret"),
            "https://api.example.com?***"
        );
        assert_eq!(mask_url("https://api.example.com"), "https://api.example.com");
    }
}
