//! Canvas dimensions supplied by the sizing form.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CELL_SIZE, DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a positive integer")]
    NotPositive { field: &'static str },
}

/// Logical artwork size and the edge length of one paintable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCanvasConfig")]
pub struct CanvasConfig {
    width: u32,
    height: u32,
    cell_size: u32,
}

#[derive(Deserialize)]
struct RawCanvasConfig {
    width: u32,
    height: u32,
    cell_size: u32,
}

impl TryFrom<RawCanvasConfig> for CanvasConfig {
    type Error = ConfigError;

    fn try_from(raw: RawCanvasConfig) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height, raw.cell_size)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT, cell_size: DEFAULT_CELL_SIZE }
    }
}

impl CanvasConfig {
    /// Build a config, rejecting zero in any dimension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] naming the first zero field.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self, ConfigError> {
        for (field, value) in [("width", width), ("height", height), ("cell_size", cell_size)] {
            if value == 0 {
                return Err(ConfigError::NotPositive { field });
            }
        }
        Ok(Self { width, height, cell_size })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of whole cells that fit across the artwork.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.width / self.cell_size
    }

    /// Number of whole cells that fit down the artwork.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.height / self.cell_size
    }
}
