//! Map configuration parameters.

use crate::error::MapError;

/// Board dimensions.
///
/// Even rows are shifted half a tile and hold `width - 1` tiles, so a map
/// of `width * height` storage cells has slightly fewer playable tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapConfig {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl MapConfig {
    /// Default board width.
    pub const DEFAULT_WIDTH: u32 = 16;

    /// Default board height.
    pub const DEFAULT_HEIGHT: u32 = 12;

    /// Largest accepted dimension: positions travel as `i16` on the wire.
    pub const MAX_DIM: u32 = i16::MAX as u32;

    /// Create a config for a `width * height` board.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of storage cells, including the unused last cell of each
    /// shifted row.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check the dimensions.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::EmptyMap);
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value > Self::MAX_DIM {
                return Err(MapError::TooLarge {
                    name,
                    value,
                    max: Self::MAX_DIM,
                });
            }
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}
