//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.lantern/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::composer::{DEFAULT_MAX_HEIGHT, DEFAULT_MIN_HEIGHT, HeightBounds};
use crate::reply::{DEFAULT_ECHO_DELAY, DEFAULT_ECHO_PREFIX};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LanternConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub echo: EchoConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneralConfig {
    pub window_title: Option<String>,
    pub status_text: Option<String>,
    pub welcome_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComposerConfig {
    pub min_height: Option<u16>,
    pub max_height: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EchoConfig {
    pub delay_ms: Option<u64>,
    pub prefix: Option<String>,
    pub reply_timeout_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_WINDOW_TITLE: &str = "Lantern Chat (Phase 1)";
pub const DEFAULT_STATUS_TEXT: &str = "Phase 1 (UI only)";
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome! Phase 1 UI is running.";
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub window_title: String,
    pub status_text: String,
    /// `None` when the welcome message is disabled.
    pub welcome_message: Option<String>,
    pub composer_bounds: HeightBounds,
    pub echo_delay: Duration,
    pub echo_prefix: String,
    pub reply_timeout: Duration,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            status_text: DEFAULT_STATUS_TEXT.to_string(),
            welcome_message: Some(DEFAULT_WELCOME_MESSAGE.to_string()),
            composer_bounds: HeightBounds::default(),
            echo_delay: DEFAULT_ECHO_DELAY,
            echo_prefix: DEFAULT_ECHO_PREFIX.to_string(),
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }
}

/// CLI flags that take part in resolution (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub delay_ms: Option<u64>,
    pub no_welcome: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.lantern/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lantern").join("config.toml"))
}

/// Load config from `~/.lantern/config.toml`, or from `explicit` when given.
///
/// A missing default file is generated (commented out) and treated as empty.
/// A missing explicit file is an error. Malformed TOML is `ConfigError::Parse`.
pub fn load_config(explicit: Option<&Path>) -> Result<LanternConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LanternConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(LanternConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<LanternConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LanternConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Lantern Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# window_title = "Lantern Chat (Phase 1)"     # Or set LANTERN_WINDOW_TITLE
# status_text = "Phase 1 (UI only)"
# welcome_message = "Welcome! Phase 1 UI is running."   # "" disables it

# [composer]
# min_height = 3                   # Rows, including borders (at least 3)
# max_height = 7                   # Input scrolls internally past this

# [echo]
# delay_ms = 300                   # Or set LANTERN_ECHO_DELAY_MS
# prefix = "(echo) You said: "
# reply_timeout_ms = 30000         # 0 disables the timeout
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LanternConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Window title: env → config → default
    let window_title = std::env::var("LANTERN_WINDOW_TITLE")
        .ok()
        .or_else(|| config.general.window_title.clone())
        .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_string());

    let status_text = config
        .general
        .status_text
        .clone()
        .unwrap_or_else(|| DEFAULT_STATUS_TEXT.to_string());

    // Welcome message: CLI can switch it off, an empty string in config too
    let welcome_message = if cli.no_welcome {
        None
    } else {
        match config.general.welcome_message.as_deref() {
            Some(msg) if msg.trim().is_empty() => None,
            Some(msg) => Some(msg.to_string()),
            None => Some(DEFAULT_WELCOME_MESSAGE.to_string()),
        }
    };

    // Echo delay: CLI → env → config → default
    let echo_delay = cli
        .delay_ms
        .or_else(|| env_u64("LANTERN_ECHO_DELAY_MS"))
        .or(config.echo.delay_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_ECHO_DELAY);

    ResolvedConfig {
        window_title,
        status_text,
        welcome_message,
        composer_bounds: resolve_bounds(&config.composer),
        echo_delay,
        echo_prefix: config
            .echo
            .prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_ECHO_PREFIX.to_string()),
        reply_timeout: config
            .echo
            .reply_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REPLY_TIMEOUT),
    }
}

fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}

/// Composer bounds must hold one text line plus borders, and min <= max.
fn resolve_bounds(config: &ComposerConfig) -> HeightBounds {
    let mut min = config.min_height.unwrap_or(DEFAULT_MIN_HEIGHT);
    let mut max = config.max_height.unwrap_or(DEFAULT_MAX_HEIGHT);

    if min < DEFAULT_MIN_HEIGHT {
        warn!("composer.min_height {} too small, using {}", min, DEFAULT_MIN_HEIGHT);
        min = DEFAULT_MIN_HEIGHT;
    }
    if max < min {
        warn!("composer.max_height {} below min_height {}, using {}", max, min, min);
        max = min;
    }

    HeightBounds { min, max }
}
