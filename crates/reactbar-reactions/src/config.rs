#![forbid(unsafe_code)]

//! Tunable parameters for the reaction bar.
//!
//! Every dimension the bar uses lives in one [`ReactionsConfig`] that can be
//! loaded from TOML or JSON (with the `config` feature) and overridden from
//! the environment. `ReactionsConfig::default()` reproduces the stock chat
//! layout.
//!
//! # Loading
//!
//! ```toml
//! # reactbar.toml
//! [spacing]
//! item_gap = 6.0
//! row_gap = 8.0
//!
//! [insets]
//! bottom = 4.0
//!
//! [cache]
//! layout_entries = 64
//! ```
//!
//! ```rust,ignore
//! let config = ReactionsConfig::from_toml_file("reactbar.toml")?;
//! let config = ReactionsConfig::from_json_str(json)?;
//! ```
//!
//! # Environment
//!
//! | Variable | Field |
//! |---|---|
//! | `REACTBAR_ITEM_GAP` | `spacing.item_gap` |
//! | `REACTBAR_ROW_GAP` | `spacing.row_gap` |
//! | `REACTBAR_LAYOUT_CACHE` | `cache.layout_entries` |
//! | `REACTBAR_PILL_CACHE` | `cache.pill_entries` |
//!
//! Unparseable values are ignored.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use reactbar_layout::{ButtonMetrics, FlowSpacing};

const ENV_ITEM_GAP: &str = "REACTBAR_ITEM_GAP";
const ENV_ROW_GAP: &str = "REACTBAR_ROW_GAP";
const ENV_LAYOUT_CACHE: &str = "REACTBAR_LAYOUT_CACHE";
const ENV_PILL_CACHE: &str = "REACTBAR_PILL_CACHE";

/// Top-level configuration of a reaction bar.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ReactionsConfig {
    /// Gaps used by the flow packer.
    pub spacing: FlowSpacing,
    /// Button dimensions.
    pub metrics: ButtonMetrics,
    pub insets: FooterInsets,
    pub cache: CacheConfig,
}

/// Insets around the button area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct FooterInsets {
    /// Space above the first row. Default: 0.
    pub top: f64,
    /// Space below the last row. Default: 2.
    pub bottom: f64,
    /// How far the freeform background extends past the bar on every side,
    /// and the offset of each button's mask inside it. Default: 10.
    pub background: f64,
    /// Corner radius of the per-button background masks. Default: 15.
    pub mask_corner_radius: f64,
}

impl Default for FooterInsets {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: 2.0,
            background: 10.0,
            mask_corner_radius: 15.0,
        }
    }
}

/// Cache capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CacheConfig {
    /// Memoized flow arrangements. Default: 32.
    pub layout_entries: usize,
    /// Memoized pill backgrounds. Default: 8.
    pub pill_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            layout_entries: 32,
            pill_entries: 8,
        }
    }
}

impl ReactionsConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Defaults with overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env_with(get_env);
        config
    }

    /// Apply environment overrides on top of this config.
    pub fn apply_env_with<F>(&mut self, get_env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(gap) = parse_env::<f64, _>(&get_env, ENV_ITEM_GAP) {
            self.spacing.item_gap = gap;
        }
        if let Some(gap) = parse_env::<f64, _>(&get_env, ENV_ROW_GAP) {
            self.spacing.row_gap = gap;
        }
        if let Some(entries) = parse_env::<usize, _>(&get_env, ENV_LAYOUT_CACHE) {
            self.cache.layout_entries = entries;
        }
        if let Some(entries) = parse_env::<usize, _>(&get_env, ENV_PILL_CACHE) {
            self.cache.pill_entries = entries;
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        non_negative(&mut errors, "spacing.item_gap", self.spacing.item_gap);
        non_negative(&mut errors, "spacing.row_gap", self.spacing.row_gap);
        if !self.spacing.edge_outset.is_finite() {
            errors.push(format!(
                "spacing.edge_outset must be finite, got {}",
                self.spacing.edge_outset
            ));
        }

        if self.metrics.height.is_nan() || self.metrics.height <= 0.0 {
            errors.push(format!(
                "metrics.height must be > 0, got {}",
                self.metrics.height
            ));
        }
        non_negative(&mut errors, "metrics.side_inset", self.metrics.side_inset);
        non_negative(&mut errors, "metrics.icon_size", self.metrics.icon_size);
        non_negative(
            &mut errors,
            "metrics.icon_spacing",
            self.metrics.icon_spacing,
        );
        non_negative(&mut errors, "metrics.avatar_size", self.metrics.avatar_size);
        non_negative(&mut errors, "metrics.avatar_step", self.metrics.avatar_step);

        non_negative(&mut errors, "insets.top", self.insets.top);
        non_negative(&mut errors, "insets.bottom", self.insets.bottom);
        non_negative(&mut errors, "insets.background", self.insets.background);
        non_negative(
            &mut errors,
            "insets.mask_corner_radius",
            self.insets.mask_corner_radius,
        );

        if self.cache.layout_entries == 0 {
            errors.push("cache.layout_entries must be > 0".into());
        }
        if self.cache.pill_entries == 0 {
            errors.push("cache.pill_entries must be > 0".into());
        }

        errors
    }

    /// Validate and return the config, or every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn non_negative(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{field} must be a finite value >= 0, got {value}"));
    }
}

fn parse_env<T, F>(get_env: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    get_env(key).and_then(|value| value.trim().parse().ok())
}

/// Errors from loading a [`ReactionsConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_stock_layout() {
        let config = ReactionsConfig::default();
        assert_eq!(config.spacing, FlowSpacing::DEFAULT);
        assert_eq!(config.metrics, ButtonMetrics::DEFAULT);
        assert_eq!(config.insets.top, 0.0);
        assert_eq!(config.insets.bottom, 2.0);
        assert_eq!(config.insets.background, 10.0);
        assert_eq!(config.insets.mask_corner_radius, 15.0);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn env_overrides_apply() {
        let config = ReactionsConfig::from_env_with(env(&[
            ("REACTBAR_ROW_GAP", "8"),
            ("REACTBAR_ITEM_GAP", " 4.5 "),
            ("REACTBAR_LAYOUT_CACHE", "128"),
            ("REACTBAR_PILL_CACHE", "2"),
        ]));
        assert_eq!(config.spacing.row_gap, 8.0);
        assert_eq!(config.spacing.item_gap, 4.5);
        assert_eq!(config.cache.layout_entries, 128);
        assert_eq!(config.cache.pill_entries, 2);
    }

    #[test]
    fn unparseable_env_is_ignored() {
        let config = ReactionsConfig::from_env_with(env(&[("REACTBAR_ROW_GAP", "wide")]));
        assert_eq!(config.spacing.row_gap, 6.0);
    }

    #[test]
    fn validate_reports_every_problem() {
        let mut config = ReactionsConfig::default();
        config.spacing.item_gap = -1.0;
        config.metrics.height = 0.0;
        config.cache.layout_entries = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors[0].starts_with("spacing.item_gap"));
    }

    #[test]
    fn validated_wraps_errors() {
        let mut config = ReactionsConfig::default();
        config.insets.bottom = f64::NAN;
        let err = config.validated().expect_err("NaN inset");
        assert!(err.to_string().starts_with("invalid configuration: insets.bottom"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_overrides_keep_defaults() {
        let config = ReactionsConfig::from_toml_str(
            r#"
            [spacing]
            row_gap = 8.0

            [cache]
            layout_entries = 64
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.spacing.row_gap, 8.0);
        assert_eq!(config.spacing.item_gap, 6.0);
        assert_eq!(config.cache.layout_entries, 64);
        assert_eq!(config.cache.pill_entries, 8);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trip() {
        let mut config = ReactionsConfig::default();
        config.insets.bottom = 4.0;
        let json = serde_json::to_string(&config).expect("serialize");
        let parsed = ReactionsConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_toml_is_an_error() {
        let err = ReactionsConfig::from_toml_str("[spacing\nrow_gap = 1").expect_err("malformed");
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn missing_file_is_io_error() {
        let err =
            ReactionsConfig::from_json_file("/nonexistent/reactbar.json").expect_err("missing");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
