//! Run-scoped blacklist of memecoin symbols and developer addresses
//!
//! Seeded from configuration and only ever grows: there is no removal API,
//! so an entry added while processing one candidate stays in force for every
//! later candidate of the same run.

use std::collections::HashSet;
use tracing::{info, warn};

use crate::config::BlacklistConfig;

/// Append-only exclusion sets
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    memecoins: HashSet<String>,
    developers: HashSet<String>,
}

impl Blacklist {
    /// Create a blacklist from the configured seed sets
    pub fn new(config: &BlacklistConfig) -> Self {
        let blacklist = Self {
            memecoins: config.memecoins.iter().cloned().collect(),
            developers: config.developers.iter().cloned().collect(),
        };

        info!(
            "Blacklist initialized with {} memecoins and {} developers",
            blacklist.memecoins.len(),
            blacklist.developers.len()
        );

        blacklist
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.memecoins.contains(symbol)
    }

    pub fn contains_developer(&self, developer: &str) -> bool {
        self.developers.contains(developer)
    }

    /// Ban a symbol for the rest of the run. Returns true if it was new.
    pub fn ban_symbol(&mut self, symbol: &str) -> bool {
        let added = self.memecoins.insert(symbol.to_string());
        if added {
            warn!("Blacklisted memecoin: {}", symbol);
        }
        added
    }

    /// Ban a developer for the rest of the run. Returns true if it was new.
    pub fn ban_developer(&mut self, developer: &str) -> bool {
        let added = self.developers.insert(developer.to_string());
        if added {
            warn!("Blacklisted developer: {}", developer);
        }
        added
    }

    pub fn memecoin_count(&self) -> usize {
        self.memecoins.len()
    }

    pub fn developer_count(&self) -> usize {
        self.developers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Blacklist {
        Blacklist::new(&BlacklistConfig {
            memecoins: vec!["SCAM".to_string()],
            developers: vec!["dev-bad".to_string()],
        })
    }

    #[test]
    fn test_seeded_membership() {
        let blacklist = seeded();

        assert!(blacklist.contains_symbol("SCAM"));
        assert!(!blacklist.contains_symbol("FOO"));
        assert!(blacklist.contains_developer("dev-bad"));
        assert!(!blacklist.contains_developer("dev1"));
    }

    #[test]
    fn test_growth_is_monotonic() {
        let mut blacklist = seeded();

        assert!(blacklist.ban_symbol("FOO"));
        assert!(!blacklist.ban_symbol("FOO"));
        assert!(blacklist.ban_developer("dev1"));

        assert!(blacklist.contains_symbol("FOO"));
        assert!(blacklist.contains_symbol("SCAM"));
        assert!(blacklist.contains_developer("dev1"));
        assert_eq!(blacklist.memecoin_count(), 2);
        assert_eq!(blacklist.developer_count(), 2);
    }
}
