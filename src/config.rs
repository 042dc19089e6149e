use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::errors::{ReconResult, ReconcileError};

pub const DEFAULT_DATE_TOLERANCE_DAYS: u32 = 3;

/// Matcher settings.
///
/// ```toml
/// date_tolerance_days = 3
/// max_comparisons = 1_000_000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Largest accepted `|bank.date - ledger.date|`, in days.
    pub date_tolerance_days: u32,
    /// Upper bound on amount-equal pairs the matcher may compare. `None` is unbounded.
    pub max_comparisons: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            date_tolerance_days: DEFAULT_DATE_TOLERANCE_DAYS,
            max_comparisons: None,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_tolerance_days(mut self, days: u32) -> Self {
        self.date_tolerance_days = days;
        self
    }

    pub fn max_comparisons(mut self, budget: u64) -> Self {
        self.max_comparisons = Some(budget);
        self
    }

    pub fn from_toml_str(content: &str) -> ReconResult<Self> {
        toml::from_str(content).map_err(|e| ReconcileError::ConfigParse(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ReconResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
