//! Easel Raster - Pixel Surfaces
//!
//! Off-screen raster buffers backed by tiny-skia pixmaps.
//!
//! This crate provides:
//! - `Surface`: a premultiplied RGBA8 buffer with clear, resize and copy-out
//! - Stroke rasterization (paint and erase) with round caps and joins
//! - Outline shapes (rectangle, circle, line)
//! - Source-over compositing of one surface onto another
//! - Lossless `Snapshot` encoding for history

mod color;
mod shape;
mod snapshot;
mod surface;

pub use color::{Color, PRESET_COLORS};
pub use shape::{ShapeKind, StrokeMode};
pub use snapshot::Snapshot;
pub use surface::Surface;

/// A point in viewport-local coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Raster error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    #[error("Invalid snapshot data: expected {expected} bytes, got {actual}")]
    InvalidSnapshot { expected: usize, actual: usize },

    #[error("Snapshot header is missing or corrupt")]
    BadSnapshotHeader,

    #[error("Surface has no pixels allocated")]
    Unallocated,

    #[error("Image encoding failed: {0}")]
    Encode(String),
}
