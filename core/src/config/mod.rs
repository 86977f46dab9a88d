//! TOML Configuration File Support
//!
//! Loads the hero animator configuration from
//! `~/.config/botmatata/hero.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [timing]
//! initial_delay_ms = 1000
//! typing_base_ms = 700
//! typing_per_char_ms = 25
//! typing_cap_ms = 2000
//! settle_delay_ms = 500
//! same_speaker_delay_ms = 800
//! speaker_change_delay_ms = 1200
//! fade_delay_ms = 800
//! preroll_delay_ms = 500
//! speed = 1.0
//!
//! [[script]]
//! speaker = "bot"
//! text = "Hi! How can I assist you today?"
//!
//! [[script]]
//! speaker = "user"
//! text = "I need help with my order"
//! ```
//!
//! # Environment Variables
//!
//! - `BOTMATATA_CONFIG`: path to the TOML file
//! - `BOTMATATA_SPEED`: playback speed factor (e.g. `2.0` = twice as fast)

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::script::{Script, ScriptError, ScriptedMessage};
use crate::timing::{TimingConfig, TimingError};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "BOTMATATA_CONFIG";

/// Environment variable overriding the playback speed
pub const SPEED_ENV: &str = "BOTMATATA_SPEED";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl From<ScriptError> for ConfigError {
    fn from(err: ScriptError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<TimingError> for ConfigError {
    fn from(err: TimingError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Timing section of the TOML configuration (milliseconds)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingToml {
    /// Wait before the first turn
    pub initial_delay_ms: Option<u64>,
    /// Typing duration floor
    pub typing_base_ms: Option<u64>,
    /// Typing time per character
    pub typing_per_char_ms: Option<u64>,
    /// Typing duration ceiling
    pub typing_cap_ms: Option<u64>,
    /// Entering → settled delay
    pub settle_delay_ms: Option<u64>,
    /// Pause before a same-speaker turn
    pub same_speaker_delay_ms: Option<u64>,
    /// Pause before a speaker-change turn
    pub speaker_change_delay_ms: Option<u64>,
    /// Fade-out delay
    pub fade_delay_ms: Option<u64>,
    /// Pause after reset
    pub preroll_delay_ms: Option<u64>,
    /// Playback speed factor
    pub speed: Option<f64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroToml {
    /// Timing section
    pub timing: TimingToml,

    /// Replacement script (`[[script]]` tables)
    pub script: Option<Vec<ScriptedMessage>>,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration for the hero animator
#[derive(Clone, Debug)]
pub struct HeroConfig {
    /// Conversation to replay
    pub script: Script,

    /// Unscaled timing
    pub timing: TimingConfig,

    /// Playback speed factor applied by [`HeroConfig::effective_timing`]
    pub speed: f64,

    /// Path of the file that was loaded, if any
    pub config_file_path: Option<PathBuf>,

    source: ConfigSource,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            script: Script::botmatata(),
            timing: TimingConfig::default(),
            speed: 1.0,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl HeroConfig {
    /// Highest-priority source that contributed a value
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Timing with the speed factor applied
    pub fn effective_timing(&self) -> Result<TimingConfig, ConfigError> {
        Ok(self.timing.scaled(self.speed)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(TimingError::InvalidSpeed(self.speed).into());
        }
        self.effective_timing()?;
        Ok(())
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Values supplied on the command line
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Config file to load instead of the default
    pub config_path: Option<PathBuf>,

    /// Playback speed factor
    pub speed: Option<f64>,
}

impl ConfigOverrides {
    /// No overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load this file instead of the default
    #[must_use]
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Override the playback speed
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Default config file location (`$XDG_CONFIG_HOME/botmatata/hero.toml`)
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("botmatata").join("hero.toml"))
}

/// Load configuration from the default path, environment and `overrides`
pub fn load_config(overrides: &ConfigOverrides) -> Result<HeroConfig, ConfigError> {
    load_config_with_env(overrides, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
pub fn load_config_with_env<F>(
    overrides: &ConfigOverrides,
    env: F,
) -> Result<HeroConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = overrides
        .config_path
        .clone()
        .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from))
        .or_else(default_config_path);

    let mut config = HeroConfig::default();
    apply_file(&mut config, path)?;
    apply_env_config(&mut config, &env);

    if let Some(speed) = overrides.speed {
        config.speed = speed;
        config.source = ConfigSource::Cli;
    }

    config.validate()?;
    Ok(config)
}

fn apply_file(config: &mut HeroConfig, path: Option<PathBuf>) -> Result<(), ConfigError> {
    let Some(config_path) = path else {
        return Ok(());
    };

    if !config_path.exists() {
        tracing::debug!(
            path = %config_path.display(),
            "Config file not found, using defaults"
        );
        return Ok(());
    }

    let toml_content =
        std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
            path: config_path.clone(),
            source: e,
        })?;

    let toml_config: HeroToml = toml::from_str(&toml_content)?;
    apply_toml_config(config, toml_config)?;
    config.config_file_path = Some(config_path.clone());
    config.source = ConfigSource::File;

    tracing::info!(
        path = %config_path.display(),
        "Loaded configuration from file"
    );
    Ok(())
}

fn apply_toml_config(config: &mut HeroConfig, toml: HeroToml) -> Result<(), ConfigError> {
    let timing = &mut config.timing;
    let fields: [(Option<u64>, &mut Duration); 9] = [
        (toml.timing.initial_delay_ms, &mut timing.initial_delay),
        (toml.timing.typing_base_ms, &mut timing.typing_base),
        (toml.timing.typing_per_char_ms, &mut timing.typing_per_char),
        (toml.timing.typing_cap_ms, &mut timing.typing_cap),
        (toml.timing.settle_delay_ms, &mut timing.settle_delay),
        (toml.timing.same_speaker_delay_ms, &mut timing.same_speaker_delay),
        (toml.timing.speaker_change_delay_ms, &mut timing.speaker_change_delay),
        (toml.timing.fade_delay_ms, &mut timing.fade_delay),
        (toml.timing.preroll_delay_ms, &mut timing.preroll_delay),
    ];
    for (value, slot) in fields {
        if let Some(ms) = value {
            *slot = Duration::from_millis(ms);
        }
    }

    if let Some(speed) = toml.timing.speed {
        config.speed = speed;
    }

    if let Some(messages) = toml.script {
        config.script = Script::new(messages)?;
    }
    Ok(())
}

fn apply_env_config<F>(config: &mut HeroConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(speed) = env(SPEED_ENV) {
        match speed.parse::<f64>() {
            Ok(s) => {
                config.speed = s;
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(value = %speed, "Ignoring unparsable {SPEED_ENV}"),
        }
    }
}
