//! Built-in protocol presets
//!
//! Frame content is data: the looking-time study ships as an embedded JSON
//! document and is turned into a [`StaticProtocol`] on demand.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use protokit_common::{ProtocolError, Result};

use crate::builder::{EmptyProtocol, ProtocolBuilder, StaticProtocol};

const LOOKING_TIME_JSON: &str = include_str!("looking_time.json");

/// Selectable built-in protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// No frames at all
    #[default]
    Empty,
    /// Nine-frame infant looking-time study
    LookingTime,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Empty => "empty",
            Preset::LookingTime => "looking-time",
        }
    }

    /// Instantiate the builder for this preset
    pub fn builder(&self) -> Result<Box<dyn ProtocolBuilder>> {
        let builder: Box<dyn ProtocolBuilder> = match self {
            Preset::Empty => Box::new(EmptyProtocol),
            Preset::LookingTime => Box::new(looking_time()?),
        };
        Ok(builder)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "empty" => Ok(Preset::Empty),
            "looking-time" => Ok(Preset::LookingTime),
            other => Err(ProtocolError::Config(format!("unknown preset: {}", other))),
        }
    }
}

/// The infant looking-time study
pub fn looking_time() -> Result<StaticProtocol> {
    StaticProtocol::from_json(Preset::LookingTime.as_str(), LOOKING_TIME_JSON)
}
