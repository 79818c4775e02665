//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.
//! Range invariants are enforced here, at the loading boundary; the
//! simulation trusts the values it is handed.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Session tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Countdown length for one session, in seconds
    pub duration_secs: f32,
    /// Smallest batch a customer can put on the conveyor
    pub min_items: u32,
    /// Largest batch a customer can put on the conveyor
    pub max_items: u32,
    /// Optional RNG seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: 30.0,
            min_items: 1,
            max_items: 9,
            seed: None,
        }
    }
}

/// Conveyor placement anchors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConveyorConfig {
    /// Where the belt begins
    pub start: [f32; 2],
    /// Where the belt ends
    pub end: [f32; 2],
}

impl Default for ConveyorConfig {
    fn default() -> Self {
        Self {
            start: [-4.0, 0.0],
            end: [4.0, 0.0],
        }
    }
}

/// Demo autoplayer pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Seconds between scans while a session is running
    pub scan_interval_secs: f32,
    /// How many sessions the demo plays before exiting
    pub sessions: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: 0.35,
            sessions: 2,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// The active profile (debug, release, etc.)
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Session tunables
    #[serde(default)]
    pub session: SessionConfig,
    /// Conveyor anchors
    #[serde(default)]
    pub conveyor: ConveyorConfig,
    /// Demo autoplayer pacing
    #[serde(default)]
    pub autoplay: AutoplayConfig,
}

fn default_profile() -> String {
    "debug".to_string()
}

impl GameConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{profile}.toml (profile-specific overrides)
    /// 3. Environment variables with prefix APP_ (e.g., APP_SESSION__MAX_ITEMS=5)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Add profile-specific configuration
            .add_source(File::with_name(&format!("config/{}", profile)).required(false))
            // Add environment variables with APP_ prefix
            // Use __ as separator for nested fields (e.g., APP_SESSION__MIN_ITEMS)
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Set the profile
            .set_override("profile", profile)?
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "debug" if not set
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "debug".to_string());
        Self::load(&profile)
    }

    /// Checks the range invariants the simulation relies on:
    /// a positive session duration and `1 <= min_items <= max_items`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.session.duration_secs > 0.0) {
            return Err(ConfigError::Message(format!(
                "session.duration_secs must be positive, got {}",
                self.session.duration_secs
            )));
        }
        if self.session.min_items < 1 {
            return Err(ConfigError::Message(
                "session.min_items must be at least 1".to_string(),
            ));
        }
        if self.session.max_items < self.session.min_items {
            return Err(ConfigError::Message(format!(
                "session.max_items ({}) must not be below session.min_items ({})",
                self.session.max_items, self.session.min_items
            )));
        }
        if !(self.autoplay.scan_interval_secs > 0.0) {
            return Err(ConfigError::Message(format!(
                "autoplay.scan_interval_secs must be positive, got {}",
                self.autoplay.scan_interval_secs
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::load("debug").unwrap_or_else(|_| Self {
            profile: "debug".to_string(),
            session: SessionConfig::default(),
            conveyor: ConveyorConfig::default(),
            autoplay: AutoplayConfig::default(),
        })
    }
}
