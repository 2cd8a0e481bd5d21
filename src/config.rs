//! Run configuration module.
//!
//! Handles loading and validating `config.toml`. Configuration is sparse:
//! the file (and every section in it) is optional, and CLI flags override
//! file values. A run with no file at all uses the stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [banner]
//! base_ratio = 0.1                  # Overall banner scale factor
//! exponent = 0.8                    # Aspect-ratio sensitivity
//! slice_ratios = [0.37, 0.38, 0.25] # Left/center/right band fractions
//!
//! [output]
//! quality = 90                      # JPEG quality (1-100)
//!
//! [processing]
//! max_threads = 4                   # Max parallel workers (omit for auto)
//! max_input_mb = 200                # Reject runs with more input than this
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Validation
//!
//! Slice fractions are checked here, once, before any image work: every
//! fraction must be non-negative and the three may not sum past 1.0. This
//! closes the door on negative band widths downstream — the band math can
//! assume well-formed fractions.

use crate::imaging::{Quality, SliceRatios, StitchParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tolerance for the slice-fraction sum check; sliders and hand-typed
/// decimals routinely land at 1.0000000000000002.
const RATIO_SUM_EPSILON: f64 = 1e-9;

/// Full run configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct StitchConfig {
    /// Banner geometry: scale, aspect sensitivity, band fractions.
    pub banner: BannerConfig,
    /// Output encoding settings.
    pub output: OutputConfig,
    /// Parallelism and input limits.
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    /// Overall banner scale factor relative to photo width.
    pub base_ratio: f64,
    /// How strongly the banner thins for wide photos.
    pub exponent: f64,
    /// Left/center/right band fractions, summing to at most 1.
    pub slice_ratios: [f64; 3],
}

impl Default for BannerConfig {
    fn default() -> Self {
        let slices = SliceRatios::default();
        Self {
            base_ratio: 0.1,
            exponent: 0.8,
            slice_ratios: [slices.left, slices.center, slices.right],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality (1-100).
    pub quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Max parallel workers. Omit for one per CPU core.
    pub max_threads: Option<usize>,
    /// Reject runs whose total input exceeds this many megabytes.
    pub max_input_mb: u64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_threads: None,
            max_input_mb: crate::batch::DEFAULT_MAX_INPUT_MB,
        }
    }
}

impl StitchConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.banner;
        if !b.base_ratio.is_finite() || b.base_ratio <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "base_ratio must be positive, got {}",
                b.base_ratio
            )));
        }
        if !b.exponent.is_finite() {
            return Err(ConfigError::Validation(format!(
                "exponent must be finite, got {}",
                b.exponent
            )));
        }
        for (label, ratio) in ["left", "center", "right"].iter().zip(b.slice_ratios) {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{label} slice ratio must be non-negative, got {ratio}"
                )));
            }
        }
        let sum: f64 = b.slice_ratios.iter().sum();
        if sum > 1.0 + RATIO_SUM_EPSILON {
            return Err(ConfigError::Validation(format!(
                "slice ratios sum to {sum}, which is over 1"
            )));
        }
        if self.processing.max_input_mb == 0 {
            return Err(ConfigError::Validation(
                "max_input_mb must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The core parameters for this run.
    pub fn stitch_params(&self) -> StitchParams {
        let [left, center, right] = self.banner.slice_ratios;
        StitchParams {
            base_ratio: self.banner.base_ratio,
            exponent: self.banner.exponent,
            slices: SliceRatios::new(left, center, right),
        }
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.output.quality)
    }

    /// Size cap in bytes.
    pub fn max_input_bytes(&self) -> u64 {
        self.processing.max_input_mb * 1024 * 1024
    }
}

/// Worker count for the rayon pool: user setting capped at the number of
/// available CPU cores — users can constrain down, not up.
pub fn effective_threads(processing: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    processing.max_threads.map_or(cores, |n| n.clamp(1, cores))
}

/// A stock `config.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = BannerConfig::default();
    format!(
        r#"# banner-stitch configuration
# All options are optional - the values below are the defaults.

[banner]
# Overall banner scale factor relative to photo width.
base_ratio = {base_ratio}
# Aspect-ratio sensitivity: wider photos get thinner banners.
exponent = {exponent}
# Left/center/right band fractions of the template. Must be non-negative
# and sum to at most 1. The center band stretches to fit.
slice_ratios = [{l}, {c}, {r}]

[output]
# JPEG quality (1-100).
quality = 90

[processing]
# Max parallel workers. Omit for one per CPU core.
# max_threads = 4
# Reject runs whose total input exceeds this many megabytes.
max_input_mb = {max_mb}
"#,
        base_ratio = defaults.base_ratio,
        exponent = defaults.exponent,
        l = defaults.slice_ratios[0],
        c = defaults.slice_ratios[1],
        r = defaults.slice_ratios[2],
        max_mb = crate::batch::DEFAULT_MAX_INPUT_MB,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_settings() {
        let config = StitchConfig::default();
        assert_eq!(config.banner.base_ratio, 0.1);
        assert_eq!(config.banner.exponent, 0.8);
        assert_eq!(config.banner.slice_ratios, [0.37, 0.38, 0.25]);
        assert_eq!(config.output.quality, 90);
        assert_eq!(config.processing.max_threads, None);
        assert_eq!(config.processing.max_input_mb, 200);
    }

    #[test]
    fn defaults_validate() {
        StitchConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_config_overrides_only_named_values() {
        let config: StitchConfig = toml::from_str(
            r#"
            [banner]
            base_ratio = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.banner.base_ratio, 0.25);
        assert_eq!(config.banner.exponent, 0.8);
        assert_eq!(config.output.quality, 90);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<StitchConfig, _> = toml::from_str(
            r#"
            [banner]
            base_ration = 0.2
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn negative_slice_ratio_is_rejected() {
        let mut config = StitchConfig::default();
        config.banner.slice_ratios = [0.5, 0.6, -0.1];
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn slice_ratios_over_one_are_rejected() {
        // left + center > 1 would make a derived right fraction negative;
        // the config layer refuses it outright.
        let mut config = StitchConfig::default();
        config.banner.slice_ratios = [0.7, 0.5, 0.0];
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn slice_ratios_summing_to_exactly_one_pass() {
        let mut config = StitchConfig::default();
        config.banner.slice_ratios = [0.45, 0.30, 0.25];
        config.validate().unwrap();
    }

    #[test]
    fn zero_base_ratio_is_rejected() {
        let mut config = StitchConfig::default();
        config.banner.base_ratio = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn stock_config_parses_and_matches_defaults() {
        let parsed: StitchConfig = toml::from_str(&stock_config_toml()).unwrap();
        parsed.validate().unwrap();
        assert_eq!(parsed, StitchConfig::default());
    }

    #[test]
    fn effective_threads_caps_at_core_count() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let processing = ProcessingConfig {
            max_threads: Some(10_000),
            ..ProcessingConfig::default()
        };
        assert_eq!(effective_threads(&processing), cores);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn effective_threads_honors_lower_setting() {
        let processing = ProcessingConfig {
            max_threads: Some(1),
            ..ProcessingConfig::default()
        };
        assert_eq!(effective_threads(&processing), 1);
    }

    #[test]
    fn stitch_params_mirror_banner_section() {
        let config = StitchConfig::default();
        let params = config.stitch_params();
        assert_eq!(params.base_ratio, 0.1);
        assert_eq!(params.slices, SliceRatios::default());
    }

    #[test]
    fn max_input_bytes_converts_megabytes() {
        assert_eq!(StitchConfig::default().max_input_bytes(), 200 * 1024 * 1024);
    }
}
