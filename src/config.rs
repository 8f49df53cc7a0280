//! Settings management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global settings: `$XDG_CONFIG_HOME/nestconf/nestconf.toml`
//! 3. Explicit settings file passed with `--settings`
//! 4. Environment variables: `NESTCONF_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::writer::DEFAULT_INDENT;
use crate::application::ApplicationError;
use crate::domain::BoolTokens;

/// Settings for reading and writing nestconf documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Spaces per nesting level when writing
    pub indent: usize,
    /// Spellings accepted as booleans by `get --type bool`
    pub bool_tokens: BoolTokens,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            bool_tokens: BoolTokens::default(),
        }
    }
}

/// Raw token lists (`None` → not specified, keep the lower layer).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawBoolTokens {
    pub truthy: Option<Vec<String>>,
    pub falsy: Option<Vec<String>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub indent: Option<usize>,
    pub bool_tokens: RawBoolTokens,
}

/// Get the XDG config directory for nestconf.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nestconf").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global settings file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("nestconf.toml"))
}

/// `NESTCONF_INDENT`, `NESTCONF_BOOL_TOKENS__TRUTHY=yes,on`, ...
pub fn env_source() -> Environment {
    Environment::with_prefix("NESTCONF")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("bool_tokens.truthy")
        .with_list_parse_key("bool_tokens.falsy")
        .try_parsing(true)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins for every value it specifies; token lists are replaced, not merged.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            indent: overlay.indent.unwrap_or(self.indent),
            bool_tokens: BoolTokens {
                truthy: overlay
                    .bool_tokens
                    .truthy
                    .clone()
                    .unwrap_or_else(|| self.bool_tokens.truthy.clone()),
                falsy: overlay
                    .bool_tokens
                    .falsy
                    .clone()
                    .unwrap_or_else(|| self.bool_tokens.falsy.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional settings file; it must exist when given
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current.apply_env_overrides(env_source())
    }

    /// Apply environment variables as explicit overrides.
    pub fn apply_env_overrides(mut self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<usize>("indent") {
            self.indent = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("bool_tokens.truthy") {
            self.bool_tokens.truthy = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("bool_tokens.falsy") {
            self.bool_tokens.falsy = val;
        }

        Ok(self)
    }

    /// Show the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }

    /// Generate a template settings file.
    pub fn template() -> String {
        r#"# nestconf settings
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/nestconf/nestconf.toml
#   Explicit: nestconf --settings <file>
#   Env:      NESTCONF_* environment variables
#             (NESTCONF_INDENT=2, NESTCONF_BOOL_TOKENS__TRUTHY=yes,on)

# Spaces per nesting level used by `nestconf fmt`
# indent = 4

[bool_tokens]
# Values read as true / false by `nestconf get --type bool`
# truthy = ["1", "t", "T", "TRUE", "true", "True"]
# falsy = ["0", "f", "F", "FALSE", "false", "False"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
