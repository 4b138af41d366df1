use log::LevelFilter;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

/// Containers a table of contents is conventionally rendered in.
pub const DEFAULT_CONTAINER_SELECTORS: [&str; 4] = [".summary", ".book-summary", "nav.summary", ".toc"];
pub const DEFAULT_HEADING_SELECTOR: &str = "h1[id], h2[id], h3[id], h4[id]";
pub const DEFAULT_ACTIVE_CLASS: &str = "active";
pub const DEFAULT_LOOKAHEAD_PX: f64 = toc_highlight_engine::DEFAULT_LOOKAHEAD_PX;
pub const DEFAULT_THROTTLE_MS: u64 = toc_highlight_engine::DEFAULT_THROTTLE_INTERVAL.as_millis() as u64;

static CLASS_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[_a-zA-Z][_a-zA-Z0-9-]*$").expect("class token pattern is valid")
});

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse toc-highlight config: {source}")]
    ConfigParseError { source: toml::de::Error },

    #[error("Failed to serialize toc-highlight config: {source}")]
    ConfigSerializeError { source: toml::ser::Error },

    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TocConfig {
    /// Selectors for elements whose descendant anchors form the TOC.
    pub container_selectors: Vec<String>,
    /// Selector for the headings that mark section starts.
    pub heading_selector: String,
    /// Class toggled on the current TOC link.
    pub active_class: String,
    /// How far below the viewport top a heading counts as reached.
    pub lookahead_px: f64,
    /// Minimum spacing between scroll-driven updates.
    pub throttle_ms: u64,
    pub log_level: String,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            container_selectors: DEFAULT_CONTAINER_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            heading_selector: DEFAULT_HEADING_SELECTOR.to_string(),
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            lookahead_px: DEFAULT_LOOKAHEAD_PX,
            throttle_ms: DEFAULT_THROTTLE_MS,
            log_level: "warn".to_string(),
        }
    }
}

impl TocConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: TocConfig =
            toml::from_str(content).map_err(|source| ConfigError::ConfigParseError { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|source| ConfigError::ConfigSerializeError { source })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.container_selectors.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "container_selectors",
                reason: "at least one selector is required".to_string(),
            });
        }
        if let Some(blank) = self
            .container_selectors
            .iter()
            .position(|s| s.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "container_selectors",
                reason: format!("selector {blank} is blank"),
            });
        }
        if self.heading_selector.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "heading_selector",
                reason: "selector is blank".to_string(),
            });
        }
        if !CLASS_TOKEN.is_match(&self.active_class) {
            return Err(ConfigError::InvalidValue {
                field: "active_class",
                reason: format!("{:?} is not a single CSS class name", self.active_class),
            });
        }
        if !self.lookahead_px.is_finite() || self.lookahead_px < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "lookahead_px",
                reason: format!("{} is not a non-negative number", self.lookahead_px),
            });
        }
        if self.throttle_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "throttle_ms",
                reason: "interval must be greater than zero".to_string(),
            });
        }
        self.log_level_filter()?;
        Ok(())
    }

    /// Selector matching every anchor inside any configured container,
    /// e.g. `.summary a, .toc a`.
    pub fn link_selector(&self) -> String {
        self.container_selectors
            .iter()
            .map(|container| format!("{} a", container.trim()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidValue {
                field: "log_level",
                reason: format!("unknown level {:?}", self.log_level),
            })
    }
}
