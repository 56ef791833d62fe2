use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Field configuration, usually read from `datefield.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Locale tag (`en-US`, `de`, ...). Absent = ambient locale.
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    /// The platform edits through a composing virtual keyboard (Android).
    /// Zero-length edits are then held as a raw display string.
    #[serde(default)]
    pub defers_composition: bool,
    /// Wrap section values in bidi isolation marks
    #[serde(default)]
    pub bidi_isolated: bool,
    /// Idle time before a pending multi-keystroke query is dropped
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
    #[serde(default)]
    pub validation: ValidationRules,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            locale: None,
            read_only: false,
            defers_composition: false,
            bidi_isolated: false,
            query_timeout_ms: default_query_timeout_ms(),
            validation: ValidationRules::default(),
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    5_000
}

/// Constraints checked against a complete date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    #[serde(default)]
    pub min_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_date: Option<NaiveDate>,
    #[serde(default)]
    pub disable_past: bool,
    #[serde(default)]
    pub disable_future: bool,
}
