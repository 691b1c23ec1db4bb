use digit_downsample::TensorShape;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use super::CanvasSpec;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Drawing surface and preprocessing parameters
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Classifier model
    #[serde(default)]
    pub model: ModelConfig,
}

/// Canvas geometry and tensor layout.
///
/// Replaces the drawing page's mutable globals: every request that omits a
/// value falls back to these.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Display scale factor; also the downsampling block size
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Pen width in grid cells
    #[serde(default = "default_line_width")]
    pub line_width: u32,

    /// Side of the model input in cells
    #[serde(default = "default_grid")]
    pub grid: u32,

    /// Tensor layout handed to the classifier
    #[serde(default, deserialize_with = "deserialize_shape")]
    pub shape: TensorShape,
}

fn default_scale() -> u32 {
    21
}

fn default_line_width() -> u32 {
    2
}

fn default_grid() -> u32 {
    28
}

fn deserialize_shape<'de, D>(deserializer: D) -> Result<TensorShape, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            line_width: default_line_width(),
            grid: default_grid(),
            shape: TensorShape::default(),
        }
    }
}

impl CanvasConfig {
    /// Geometry of the drawing surface for these settings
    pub fn spec(&self) -> CanvasSpec {
        CanvasSpec {
            grid: self.grid,
            scale: self.scale,
            line_width: self.line_width,
        }
    }

    /// Check that the geometry is usable.
    ///
    /// Scale and grid must be at least 1, and the pixel sizes derived from
    /// them must fit in a `u32`.
    pub fn validate(&self) -> Result<(), String> {
        if self.scale == 0 {
            return Err("canvas.scale must be at least 1".to_string());
        }
        if self.grid == 0 {
            return Err("canvas.grid must be at least 1".to_string());
        }
        if self.grid.checked_mul(self.scale).is_none() {
            return Err(format!(
                "canvas of {} cells at scale {} is too large",
                self.grid, self.scale
            ));
        }
        if self.line_width.checked_mul(self.scale).is_none() {
            return Err(format!(
                "line width of {} cells at scale {} is too large",
                self.line_width, self.scale
            ));
        }
        Ok(())
    }
}

/// Classifier model location
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ModelConfig {
    /// Path to a JSON dense-network weights file
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing, unparsable or invalid file is logged and replaced by
    /// defaults.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    if let Err(e) = config.canvas.validate() {
                        tracing::warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                        return Self::default();
                    }
                    tracing::info!(
                        path = %path.display(),
                        scale = config.canvas.scale,
                        shape = %config.canvas.shape,
                        model = config.model.path.is_some(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration the way the binary does.
    ///
    /// `CONFIG_FILE` names the YAML file; without it `./config.yaml` is used
    /// when present. `MODEL_FILE` overrides `model.path`.
    pub fn from_env() -> Self {
        let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
        let mut config = match config_file {
            Some(path) => Self::load_from_file(&path),
            None => {
                let local = Path::new("config.yaml");
                if local.exists() {
                    Self::load_from_file(local)
                } else {
                    tracing::debug!("No config file, using defaults");
                    Self::default()
                }
            }
        };

        if let Ok(model_file) = std::env::var("MODEL_FILE") {
            config.model.path = Some(PathBuf::from(model_file));
        }

        config
    }

    /// Path of the model weights, if one is configured
    pub fn model_path(&self) -> Option<&Path> {
        self.model.path.as_deref()
    }
}
