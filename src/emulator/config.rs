// Configuration management
//
// Settings a frontend is likely to tweak, persisted as TOML next to the
// working directory. Loading failures fall back to defaults so a damaged
// config never blocks startup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file name
const CONFIG_FILE: &str = "famicore.toml";

/// Errors from explicit configuration loads/saves
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error
    Io(io::Error),
    /// TOML parse error
    Parse(toml::de::Error),
    /// TOML serialization error
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Config serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Save state settings
    pub save_state: SaveStateConfig,
    /// Screenshot settings
    pub screenshot: ScreenshotConfig,
    /// Execution trace settings
    pub trace: TraceConfig,
}

/// Save state configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveStateConfig {
    /// Number of save slots (0..slots are valid)
    pub slots: u8,
    /// Directory save states are written to
    pub directory: PathBuf,
}

/// Screenshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    /// Directory screenshots are written to
    pub directory: PathBuf,
}

/// Execution trace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Emit one nestest-style line per instruction
    pub enabled: bool,
    /// Trace log destination
    pub path: PathBuf,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            save_state: SaveStateConfig {
                slots: 10,
                directory: PathBuf::from("saves"),
            },
            screenshot: ScreenshotConfig {
                directory: PathBuf::from("screenshots"),
            },
            trace: TraceConfig {
                enabled: false,
                path: PathBuf::from("trace.log"),
            },
        }
    }
}

impl EmulatorConfig {
    /// Load the default config file, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        Self::load_from(Path::new(CONFIG_FILE)).unwrap_or_default()
    }

    /// Load a config file from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Write the configuration to the default file
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    /// Write the configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
