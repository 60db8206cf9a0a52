//! Easel Layers
//!
//! Ordered raster layers and the compositor that flattens them.
//!
//! Paint order is insertion order: index 0 is the back-most layer.

pub mod compositor;
mod layer;
mod stack;

pub use compositor::{flatten, render};
pub use layer::{Layer, LayerId};
pub use stack::LayerStack;

/// Layer error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayerError {
    #[error("Cannot delete the last remaining layer")]
    LastLayer,

    #[error("Layer not found: {0}")]
    NotFound(LayerId),
}
