//! Configuration management for sincos-nco.
//!
//! Configuration is loaded from multiple sources in priority order:
//! 1. Environment variables (SINCOS_DATA_WIDTH, etc.)
//! 2. Project-local config file (`./sincos-nco.toml`)
//! 3. User config file (`~/.config/sincos-nco/config.toml`)
//! 4. Built-in defaults
//!
//! # Config File Format
//!
//! ```toml
//! # sincos-nco.toml
//!
//! # Output word width in bits
//! data_width = 16
//!
//! # Phase accumulator width in bits
//! phase_width = 16
//!
//! # Table address width in bits (table depth = 2^table_address_width)
//! table_address_width = 10
//!
//! # "generic" or "dsp-slice"
//! variant = "generic"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::device::{GeneratorParams, ParamError, Variant};

/// Global cached configuration.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Default output word width.
pub const DEFAULT_DATA_WIDTH: u32 = 16;

/// Default phase accumulator width.
pub const DEFAULT_PHASE_WIDTH: u32 = 16;

/// Default table address width.
pub const DEFAULT_TABLE_ADDRESS_WIDTH: u32 = 10;

/// Default number of samples printed by the CLI.
pub const DEFAULT_CYCLES: u64 = 64;

/// sincos-nco configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output word width in bits.
    pub data_width: Option<u32>,

    /// Phase accumulator width in bits.
    pub phase_width: Option<u32>,

    /// Table address width in bits.
    pub table_address_width: Option<u32>,

    /// Implementation variant.
    pub variant: Option<Variant>,

    /// Samples to emit in CSV mode.
    pub cycles: Option<u64>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Project-local `sincos-nco.toml`
    /// 3. User config `~/.config/sincos-nco/config.toml`
    /// 4. Defaults
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load user config first (lowest priority of file configs)
        if let Some(user_config) = Self::load_user_config() {
            config.merge(user_config);
        }

        // Load project-local config (higher priority)
        if let Some(local_config) = Self::load_local_config() {
            config.merge(local_config);
        }

        // Environment variables override everything
        config.apply_env_overrides();

        config
    }

    /// Get the cached global configuration.
    ///
    /// Loads configuration on first call and caches it.
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(|| {
            let config = Self::load();
            log::debug!("Loaded configuration: {:?}", config);
            config
        })
    }

    /// Validated generator parameters, with defaults for unset fields.
    pub fn params(&self) -> Result<GeneratorParams, ParamError> {
        GeneratorParams::new(
            self.data_width.unwrap_or(DEFAULT_DATA_WIDTH),
            self.phase_width.unwrap_or(DEFAULT_PHASE_WIDTH),
            self.table_address_width.unwrap_or(DEFAULT_TABLE_ADDRESS_WIDTH),
            self.variant.unwrap_or_default(),
        )
    }

    /// Sample count for CSV output, with fallback to default.
    pub fn cycles(&self) -> u64 {
        self.cycles.unwrap_or(DEFAULT_CYCLES)
    }

    /// Load user configuration from ~/.config/sincos-nco/config.toml
    fn load_user_config() -> Option<Self> {
        let config_path = Self::user_config_path()?;
        Self::load_from_file(&config_path)
    }

    /// Load project-local configuration from ./sincos-nco.toml
    fn load_local_config() -> Option<Self> {
        Self::load_from_file(Path::new("sincos-nco.toml"))
    }

    /// Load configuration from a specific file.
    ///
    /// Missing, unreadable or malformed files yield `None`; the last two
    /// are logged.
    pub fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge another config into this one.
    /// Only overrides fields that are Some in the other config.
    pub fn merge(&mut self, other: Self) {
        if other.data_width.is_some() {
            self.data_width = other.data_width;
        }
        if other.phase_width.is_some() {
            self.phase_width = other.phase_width;
        }
        if other.table_address_width.is_some() {
            self.table_address_width = other.table_address_width;
        }
        if other.variant.is_some() {
            self.variant = other.variant;
        }
        if other.cycles.is_some() {
            self.cycles = other.cycles;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a `SINCOS_*` lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = parse_override(&lookup, "SINCOS_DATA_WIDTH") {
            self.data_width = Some(v);
        }
        if let Some(v) = parse_override(&lookup, "SINCOS_PHASE_WIDTH") {
            self.phase_width = Some(v);
        }
        if let Some(v) = parse_override(&lookup, "SINCOS_TABLE_ADDRESS_WIDTH") {
            self.table_address_width = Some(v);
        }
        if let Some(v) = parse_override(&lookup, "SINCOS_VARIANT") {
            self.variant = Some(v);
        }
        if let Some(v) = parse_override(&lookup, "SINCOS_CYCLES") {
            self.cycles = Some(v);
        }
    }

    /// Get the path to the user config file (for display/creation).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sincos-nco").join("config.toml"))
    }

    /// Generate a sample config file content.
    pub fn sample_config() -> String {
        format!(
            r#"# sincos-nco configuration
# Place this file at ~/.config/sincos-nco/config.toml or ./sincos-nco.toml

# Output word width in bits ({min_d}..={max_d})
data_width = {data}

# Phase accumulator width in bits ({min_p}..={max_p})
phase_width = {phase}

# Table address width in bits, must be below phase_width ({min_a}..={max_a})
table_address_width = {table}

# "generic" or "dsp-slice" (affects the memory style report only)
variant = "generic"

# Samples printed in CSV mode
# cycles = {cycles}
"#,
            min_d = crate::device::params::MIN_DATA_WIDTH,
            max_d = crate::device::params::MAX_DATA_WIDTH,
            min_p = crate::device::params::MIN_PHASE_WIDTH,
            max_p = crate::device::params::MAX_PHASE_WIDTH,
            min_a = crate::device::params::MIN_TABLE_ADDRESS_WIDTH,
            max_a = crate::device::params::MAX_TABLE_ADDRESS_WIDTH,
            data = DEFAULT_DATA_WIDTH,
            phase = DEFAULT_PHASE_WIDTH,
            table = DEFAULT_TABLE_ADDRESS_WIDTH,
            cycles = DEFAULT_CYCLES,
        )
    }
}

/// Parse one override, logging what was applied or rejected.
fn parse_override<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => {
            log::info!("Using {} from environment: {}", key, raw);
            Some(value)
        }
        Err(_) => {
            log::warn!("Ignoring {}: cannot parse {:?}", key, raw);
            None
        }
    }
}
