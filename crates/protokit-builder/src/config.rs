//! Generator configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `protokit.toml` in the working directory, then `PROTOKIT_*` environment
//! variables (a `.env` file is read first if present). Only [`load`] reads
//! the environment; [`from_toml`] sees nothing but its input.
//!
//! [`load`]: GeneratorSettings::load
//! [`from_toml`]: GeneratorSettings::from_toml

use std::path::PathBuf;

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use protokit_common::Result;

use crate::presets::Preset;

/// Config file looked up in the working directory, extension optional
pub const DEFAULT_CONFIG_FILE: &str = "protokit";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PROTOKIT";

/// Protocol generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Built-in protocol to serve
    pub preset: Preset,
    /// JSON protocol file; takes priority over `preset`
    pub protocol_file: Option<PathBuf>,
    /// Log frames that are defined but never shown
    pub log_unused_frames: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            preset: Preset::Empty,
            protocol_file: None,
            log_unused_frames: true,
        }
    }
}

impl GeneratorSettings {
    /// Load configuration from `.env`, `protokit.toml`, and the environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let builder = Self::defaults()?
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load from TOML text over the defaults
    pub fn from_toml(toml: &str) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml));

        Ok(builder.build()?.try_deserialize()?)
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Self::default();
        Ok(Config::builder()
            .set_default("preset", defaults.preset.as_str())?
            .set_default("log_unused_frames", defaults.log_unused_frames)?)
    }
}
