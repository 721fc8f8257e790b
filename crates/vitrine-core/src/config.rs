#![forbid(unsafe_code)]

//! Policy-as-data configuration for the navigation engine.
//!
//! Captures the engine's tunables (autoplay interval per carousel, swipe
//! threshold) as a single [`EngineConfig`] that can be loaded from TOML or
//! JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # vitrine.toml
//! [primary]
//! autoplay = true
//! interval_ms = 5000
//!
//! [gesture]
//! swipe_threshold = 50.0
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_file("vitrine.toml")?;
//! let config = EngineConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `EngineConfig::default()` is the reference behavior: the page carousel
//! rotates every 5000 ms and a swipe needs 50 units of horizontal travel.
//! Gallery carousels never rotate; that is not configurable, and a
//! `[gallery]` section is rejected as an unknown field.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::gesture::{DEFAULT_THRESHOLD, SwipeConfig};

/// Default autoplay interval for the page carousel.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);

/// Default swipe distance threshold.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = DEFAULT_THRESHOLD;

// ---------------------------------------------------------------------------
// AutoplayPolicy
// ---------------------------------------------------------------------------

/// Whether a carousel rotates on its own, and how fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayPolicy {
    /// Advance by one item every `interval` until the user navigates.
    Enabled { interval: Duration },
    /// Manual navigation only.
    Disabled,
}

impl AutoplayPolicy {
    /// Autoplay at `interval`.
    #[must_use]
    pub const fn every(interval: Duration) -> Self {
        Self::Enabled { interval }
    }

    /// Whether the policy rotates at all.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    /// The rotation interval, when enabled.
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        match self {
            Self::Enabled { interval } => Some(*interval),
            Self::Disabled => None,
        }
    }
}

impl Default for AutoplayPolicy {
    fn default() -> Self {
        Self::every(DEFAULT_AUTOPLAY_INTERVAL)
    }
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct EngineConfig {
    /// Page (hero) carousel.
    pub primary: CarouselPolicyConfig,
    /// Swipe recognition, shared by the page carousel and galleries.
    pub gesture: GesturePolicyConfig,
}

impl EngineConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.primary.autoplay && self.primary.interval_ms == 0 {
            errors.push("primary.interval_ms must be > 0 when autoplay is enabled".to_string());
        }

        let threshold = self.gesture.swipe_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            errors.push(format!(
                "gesture.swipe_threshold must be finite and > 0, got {threshold}"
            ));
        }

        errors
    }

    #[cfg(feature = "config")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Autoplay policy for the page carousel.
    #[must_use]
    pub fn primary_policy(&self) -> AutoplayPolicy {
        self.primary.to_policy()
    }

    /// Build a [`SwipeConfig`] from this config.
    #[must_use]
    pub fn swipe_config(&self) -> SwipeConfig {
        SwipeConfig::new(self.gesture.swipe_threshold)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs (flat, serde-friendly)
// ---------------------------------------------------------------------------

/// Per-carousel autoplay parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CarouselPolicyConfig {
    /// Rotate automatically until the user navigates. Default: true.
    pub autoplay: bool,
    /// Rotation interval in milliseconds. Default: 5000.
    pub interval_ms: u64,
}

impl CarouselPolicyConfig {
    /// Convert to an [`AutoplayPolicy`].
    #[must_use]
    pub fn to_policy(&self) -> AutoplayPolicy {
        if self.autoplay {
            AutoplayPolicy::every(Duration::from_millis(self.interval_ms))
        } else {
            AutoplayPolicy::Disabled
        }
    }
}

impl Default for CarouselPolicyConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval_ms: DEFAULT_AUTOPLAY_INTERVAL.as_millis() as u64,
        }
    }
}

/// Swipe recognition parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GesturePolicyConfig {
    /// Minimum horizontal travel for a swipe. Default: 50.0.
    pub swipe_threshold: f32,
}

impl Default for GesturePolicyConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading an engine configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
