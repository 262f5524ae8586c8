//! Sparse store of painted cells.
//!
//! The buffer maps grid addresses to the color last written there. Unpainted
//! cells have no entry and show the background. The renderer and the raster
//! exporter both read from [`PaintBuffer::iter`]; cells never overlap, so
//! iteration order does not matter.

#[cfg(test)]
#[path = "buffer_test.rs"]
mod buffer_test;

use std::collections::HashMap;

use crate::camera::Point;
use crate::color::HexColor;
use crate::config::CanvasConfig;

/// Address of one cell in the logical grid.
///
/// Signed so that positions left of or above the artwork can be represented
/// and then rejected by [`PaintBuffer::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The cell containing a logical-space point.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_world(world: Point, cell_size: u32) -> Self {
        let size = f64::from(cell_size);
        Self { x: (world.x / size).floor() as i64, y: (world.y / size).floor() as i64 }
    }
}

/// Painted cells of one canvas, bounded by its configured grid.
#[derive(Debug, Clone)]
pub struct PaintBuffer {
    cells: HashMap<GridPoint, HexColor>,
    columns: u32,
    rows: u32,
}

impl PaintBuffer {
    #[must_use]
    pub fn new(config: &CanvasConfig) -> Self {
        Self { cells: HashMap::new(), columns: config.columns(), rows: config.rows() }
    }

    /// Whether `point` addresses a cell inside the grid.
    #[must_use]
    pub fn contains(&self, point: GridPoint) -> bool {
        (0..i64::from(self.columns)).contains(&point.x) && (0..i64::from(self.rows)).contains(&point.y)
    }

    /// Paint `point` with `color`, replacing any earlier color.
    ///
    /// Out-of-grid points are ignored. Returns whether the write was accepted.
    pub fn write(&mut self, point: GridPoint, color: &HexColor) -> bool {
        if !self.contains(point) {
            return false;
        }
        self.cells.insert(point, color.clone());
        true
    }

    /// Remove every painted cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Drop all cells and adopt the grid bounds of `config`.
    pub fn reset(&mut self, config: &CanvasConfig) {
        self.clear();
        self.columns = config.columns();
        self.rows = config.rows();
    }

    #[must_use]
    pub fn get(&self, point: GridPoint) -> Option<&HexColor> {
        self.cells.get(&point)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All painted cells, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPoint, &HexColor)> {
        self.cells.iter().map(|(point, color)| (*point, color))
    }
}
