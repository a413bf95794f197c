//! Engine configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use gategraph_domain::GateCombination;

const DEFAULT_COLLABORATOR_TIMEOUT_MS: u64 = 5_000;

/// Engine configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on a single storage or progress call. `None` waits forever.
    pub collaborator_timeout: Option<Duration>,
    /// Combination policy for challenges that do not set their own
    pub default_combination: GateCombination,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            collaborator_timeout: Some(Duration::from_millis(DEFAULT_COLLABORATOR_TIMEOUT_MS)),
            default_combination: GateCombination::All,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> Result<Self> {
        // A missing .env file is the normal case outside development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_ms: u64 = match lookup("GATEGRAPH_COLLABORATOR_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse().context(
                "GATEGRAPH_COLLABORATOR_TIMEOUT_MS must be a whole number of milliseconds",
            )?,
            None => DEFAULT_COLLABORATOR_TIMEOUT_MS,
        };

        let default_combination = match lookup("GATEGRAPH_DEFAULT_COMBINATION") {
            Some(raw) => raw
                .parse::<GateCombination>()
                .context("GATEGRAPH_DEFAULT_COMBINATION must be 'all' or 'any'")?,
            None => GateCombination::All,
        };

        Ok(Self {
            collaborator_timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            default_combination,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<EngineConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = load(&[
            ("GATEGRAPH_COLLABORATOR_TIMEOUT_MS", "750"),
            ("GATEGRAPH_DEFAULT_COMBINATION", "any"),
        ])
        .unwrap();
        assert_eq!(config.collaborator_timeout, Some(Duration::from_millis(750)));
        assert_eq!(config.default_combination, GateCombination::Any);
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = load(&[("GATEGRAPH_COLLABORATOR_TIMEOUT_MS", "0")]).unwrap();
        assert_eq!(config.collaborator_timeout, None);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = load(&[("GATEGRAPH_COLLABORATOR_TIMEOUT_MS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("GATEGRAPH_COLLABORATOR_TIMEOUT_MS"));

        let err = load(&[("GATEGRAPH_DEFAULT_COMBINATION", "most")]).unwrap_err();
        assert!(err.to_string().contains("GATEGRAPH_DEFAULT_COMBINATION"));
    }
}
