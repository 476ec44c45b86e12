//! # Settings Module
//!
//! ## Purpose
//! Numerical and parsing settings of the equation balancer, persisted as JSON.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "decimal_precision": 8,
//!   "singular_value_tolerance": 1e-10,
//!   "strict_symbols": true,
//!   "log_level": "info"
//! }
//! ```
//! Missing keys take their default values, so a file may list only the settings it changes.
//!
//! ## Usage Pattern
//! ```rust, ignore
//! use ChemBalance::settings::BalancerConfig;
//!
//! let mut config = BalancerConfig::load_or_default(BalancerConfig::DEFAULT_FILE);
//! config.decimal_precision = 10;
//! config.save(BalancerConfig::DEFAULT_FILE)?;
//! ```
use crate::Balancing::errors::BalanceError;
use crate::Balancing::null_space::MAX_DECIMAL_PRECISION;
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings of the balancing pipeline.
///
/// # Fields
/// * `decimal_precision` - digits kept when the least squares solution is rounded before
///   conversion to fractions
/// * `singular_value_tolerance` - singular values below this fraction of the largest one are
///   treated as zero by the least squares solver
/// * `strict_symbols` - reject element symbols that are not in the periodic table
/// * `log_level` - level of the terminal logger of the binary ("error" .. "trace")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    pub decimal_precision: u32,
    pub singular_value_tolerance: f64,
    pub strict_symbols: bool,
    pub log_level: String,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            decimal_precision: 8,
            singular_value_tolerance: 1e-10,
            strict_symbols: true,
            log_level: "info".to_string(),
        }
    }
}

impl BalancerConfig {
    pub const DEFAULT_FILE: &'static str = "balancer_config.json";

    /// Loads settings from a JSON file; a missing file gives the defaults.
    pub fn load(config_file: &str) -> Result<Self, BalanceError> {
        if !Path::new(config_file).exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(config_file)
            .map_err(|e| BalanceError::Config(format!("cannot read {}: {}", config_file, e)))?;
        let config: BalancerConfig = serde_json::from_str(&content)
            .map_err(|e| BalanceError::Config(format!("cannot parse {}: {}", config_file, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// like `load`, but falls back to the defaults on any error
    pub fn load_or_default(config_file: &str) -> Self {
        Self::load(config_file).unwrap_or_else(|e| {
            warn!("{}, using default settings", e);
            Self::default()
        })
    }

    pub fn save(&self, config_file: &str) -> Result<(), BalanceError> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| BalanceError::Config(e.to_string()))?;
        fs::write(config_file, content)
            .map_err(|e| BalanceError::Config(format!("cannot write {}: {}", config_file, e)))
    }

    pub fn validate(&self) -> Result<(), BalanceError> {
        if self.decimal_precision == 0 || self.decimal_precision > MAX_DECIMAL_PRECISION {
            return Err(BalanceError::Config(format!(
                "decimal_precision must be between 1 and {}, got {}",
                MAX_DECIMAL_PRECISION, self.decimal_precision
            )));
        }
        if !self.singular_value_tolerance.is_finite() || self.singular_value_tolerance < 0.0 {
            return Err(BalanceError::Config(format!(
                "singular_value_tolerance must be a non-negative number, got {}",
                self.singular_value_tolerance
            )));
        }
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| BalanceError::Config(format!("unknown log level '{}'", self.log_level)))?;
        Ok(())
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
