//! Easel Session
//!
//! The drawing core behind a paint UI. A [`Session`] owns the layer stack,
//! the display surface and the undo history, and turns pointer events plus
//! the current tool, size and color into pixels.
//!
//! # Example
//! ```rust
//! use easel_session::{Session, SessionConfig, Tool};
//!
//! let mut session = Session::new(SessionConfig::with_viewport(64, 64));
//! session.set_tool(Tool::Brush);
//! session.pointer_down(4.0, 4.0).unwrap();
//! session.pointer_move(40.0, 40.0).unwrap();
//! session.pointer_up(40.0, 40.0).unwrap();
//! assert!(session.history_status().can_undo);
//! ```

mod config;
mod renderer;
mod session;
mod shortcuts;
mod tool;

pub use config::{HistoryMode, SessionConfig};
pub use renderer::{Gesture, GestureState, MoveOutcome, ShapePreview, StrokeRenderer};
pub use session::{
    EXPORT_FILE_NAME, ExportedImage, HistoryEntry, LayerInfo, LayerPanel, Session, SessionEvent,
};
pub use shortcuts::{Command, Key, Modifiers};
pub use tool::{Tool, ToolKind, ToolState};

pub use easel_history::HistoryStatus;
pub use easel_layers::LayerId;
pub use easel_raster::{Color, PRESET_COLORS, Point};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Session error
///
/// None of these are fatal: the refused operation leaves all state as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Layer not found: {0}")]
    NotFound(LayerId),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(&'static str),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Raster error: {0}")]
    Raster(#[from] easel_raster::RasterError),
}

impl From<easel_layers::LayerError> for SessionError {
    fn from(err: easel_layers::LayerError) -> Self {
        match err {
            easel_layers::LayerError::LastLayer => SessionError::InvariantViolation(err.to_string()),
            easel_layers::LayerError::NotFound(id) => SessionError::NotFound(id),
        }
    }
}
