use std::collections::HashSet;

use serde::Deserialize;
use metricstore_core::error::{MetricsError, Result};

use crate::registry::DEFAULT_CAPACITY;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    pub version: u32,

    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub stats_matcher: StatsMatcherConfig,
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion(self.version));
        }

        self.registry.validate()?;
        self.stats_matcher.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
        }
    }
}

impl RegistrySection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1_000_000).contains(&self.initial_capacity) {
            return Err(MetricsError::InvalidConfig(
                "registry.initial_capacity must be between 1 and 1000000".into(),
            ));
        }
        Ok(())
    }
}

fn default_initial_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Which metrics to suppress at creation time.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct StatsMatcherConfig {
    #[serde(default)]
    pub reject_all: bool,

    /// Label keys; a metric carrying any of them is not tracked.
    #[serde(default)]
    pub exclusion_labels: Vec<String>,
}

impl StatsMatcherConfig {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.exclusion_labels.len());
        for key in &self.exclusion_labels {
            if key.is_empty() {
                return Err(MetricsError::InvalidConfig(
                    "stats_matcher.exclusion_labels must not contain empty keys".into(),
                ));
            }
            if !seen.insert(key.as_str()) {
                return Err(MetricsError::InvalidConfig(format!(
                    "stats_matcher.exclusion_labels has duplicate key: {key}"
                )));
            }
        }
        Ok(())
    }
}
