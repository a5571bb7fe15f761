//! Configuration for the command-line front end.
//!
//! YAML with precedence: CLI > ENV > file > defaults. Every field has a
//! default, so an empty document is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Bounds;

/// Environment variable that enables debug (trace) output.
pub const ENV_DEBUG: &str = "TRUENO_RASTER_DEBUG";

/// Environment variable naming a configuration file.
pub const ENV_CONFIG: &str = "TRUENO_RASTER_CONFIG";

/// Canvas size for rendered output and seed-fill bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    600
}
fn default_height() -> u32 {
    400
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl CanvasConfig {
    /// Canvas as fill bounds.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

/// Parametric curve sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Samples per segment, both ends included.
    #[serde(default = "default_steps")]
    pub steps: usize,
}

fn default_steps() -> usize {
    100
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
        }
    }
}

/// Clipping limits for open conics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConicConfig {
    /// Hyperbola x extent from the center.
    #[serde(default = "default_limit")]
    pub hyperbola_limit: u32,

    /// Parabola x extent from the vertex.
    #[serde(default = "default_limit")]
    pub parabola_limit: u32,
}

fn default_limit() -> u32 {
    200
}

impl Default for ConicConfig {
    fn default() -> Self {
        Self {
            hyperbola_limit: default_limit(),
            parabola_limit: default_limit(),
        }
    }
}

/// Perspective projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Distance to the projection plane.
    #[serde(default = "default_distance")]
    pub distance: f64,
}

fn default_distance() -> f64 {
    5.0
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            distance: default_distance(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output canvas.
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Curve sampling.
    #[serde(default)]
    pub curves: CurveConfig,

    /// Conic limits.
    #[serde(default)]
    pub conics: ConicConfig,

    /// 3D projection.
    #[serde(default)]
    pub projection: ProjectionConfig,

    /// Per-step trace output.
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with the line number if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::Config(format!("line {line}: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Resolves file and environment layers.
    ///
    /// An explicit `path` wins over [`ENV_CONFIG`]; with neither, defaults
    /// are used. [`ENV_DEBUG`] set to anything but `0` or `false` turns
    /// debug on.
    ///
    /// # Errors
    ///
    /// Returns an error if a named file cannot be loaded.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(ENV_CONFIG).map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(from_env) {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        if let Ok(v) = std::env::var(ENV_DEBUG) {
            config.debug = !matches!(v.trim(), "" | "0" | "false");
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        if !(self.projection.distance.is_finite() && self.projection.distance != 0.0) {
            return Err(Error::Config(format!(
                "projection.distance must be finite and non-zero, got {}",
                self.projection.distance
            )));
        }
        Ok(())
    }
}
