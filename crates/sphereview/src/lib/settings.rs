//! Startup configuration for Sphereview
//!
//! Settings are read from `sphereview.toml` in the working directory, or from
//! an explicit path given on the command line. Every key is optional; missing
//! values fall back to the built-in defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::controls::{Representation, Resolution};
use super::line::LineSegment;
use super::scene::SceneConfig;

/// Filename looked up in the working directory
pub const SETTINGS_FILENAME: &str = "sphereview.toml";

/// `[sphere]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SphereSettings {
    /// Sphere radius in world units
    pub radius: Option<f32>,
    /// Initial tessellation resolution, clamped to the slider range
    pub resolution: Option<Resolution>,
    /// Initial representation: "points", "wireframe" or "surface"
    pub representation: Option<Representation>,
    /// Whether to apply the procedural vertex colors
    pub colored: Option<bool>,
}

/// Top-level settings struct, serialized as sphereview.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub sphere: Option<SphereSettings>,
    /// Line segments drawn next to the sphere; replaces the defaults when present
    pub lines: Option<Vec<LineSegment>>,
}

/// Fully resolved startup configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerConfig {
    pub scene: SceneConfig,
    pub resolution: Resolution,
    pub representation: Representation,
}

impl Settings {
    /// Load and validate settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: Settings =
            toml::from_str(&contents).map_err(|e| SettingsError::ParseToml {
                path: path.to_path_buf(),
                source: e,
            })?;
        settings.validate()?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Load `sphereview.toml` from the given directory.
    /// Returns Ok(None) if the file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>, SettingsError> {
        let path = dir.join(SETTINGS_FILENAME);
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Check values that cannot be clamped into something meaningful
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(radius) = self.sphere.as_ref().and_then(|s| s.radius) {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(SettingsError::InvalidRadius(radius));
            }
        }
        if let Some(lines) = &self.lines {
            if let Some(index) = lines.iter().position(|line| !line.is_finite()) {
                return Err(SettingsError::InvalidLine { index });
            }
        }
        Ok(())
    }

    /// Apply these settings on top of the built-in defaults
    pub fn to_viewer_config(&self) -> ViewerConfig {
        let mut config = ViewerConfig::default();
        if let Some(sphere) = &self.sphere {
            if let Some(radius) = sphere.radius {
                config.scene.radius = radius;
            }
            if let Some(colored) = sphere.colored {
                config.scene.colored = colored;
            }
            if let Some(resolution) = sphere.resolution {
                config.resolution = resolution;
            }
            if let Some(representation) = sphere.representation {
                config.representation = representation;
            }
        }
        if let Some(lines) = &self.lines {
            config.scene.lines = lines.clone();
        }
        config
    }
}

/// Errors that can occur while reading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Sphere radius must be a positive finite number, got {0}")]
    InvalidRadius(f32),
    #[error("Line {index} has a non-finite endpoint")]
    InvalidLine { index: usize },
}
