//! Control panel parameters
//!
//! The two values the user can change at runtime: the tessellation
//! resolution (one slider driving both theta and phi) and the representation
//! mode of the sphere.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tessellation resolution, always within `[Resolution::MIN, Resolution::MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Resolution(u32);

impl Resolution {
    /// Smallest slider value
    pub const MIN: u32 = 8;
    /// Largest slider value
    pub const MAX: u32 = 80;
    /// Initial slider value
    pub const DEFAULT: Resolution = Resolution(16);

    /// Create a resolution, clamping the value into the slider range
    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for Resolution {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Resolution> for u32 {
    fn from(value: Resolution) -> Self {
        value.0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the sphere is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Vertices only
    Points = 0,
    /// Triangle edges only
    Wireframe = 1,
    /// Filled triangles
    #[default]
    Surface = 2,
}

impl Representation {
    /// All modes in selector order
    pub fn all() -> &'static [Representation] {
        &[
            Representation::Points,
            Representation::Wireframe,
            Representation::Surface,
        ]
    }

    /// Selector value for this mode
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Label shown in the selector
    pub fn label(self) -> &'static str {
        match self {
            Representation::Points => "Points",
            Representation::Wireframe => "Wireframe",
            Representation::Surface => "Surface",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Representation {
    type Error = ControlError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Representation::Points),
            1 => Ok(Representation::Wireframe),
            2 => Ok(Representation::Surface),
            other => Err(ControlError::RepresentationOutOfRange(other)),
        }
    }
}

impl FromStr for Representation {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "points" | "0" => Ok(Representation::Points),
            "wireframe" | "1" => Ok(Representation::Wireframe),
            "surface" | "2" => Ok(Representation::Surface),
            _ => Err(ControlError::UnknownRepresentation(s.to_string())),
        }
    }
}

/// Errors raised when mapping raw control values
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("Representation value {0} is out of range (expected 0, 1 or 2)")]
    RepresentationOutOfRange(u8),
    #[error("Unknown representation: {0}. Valid options are: points, wireframe, surface")]
    UnknownRepresentation(String),
}
