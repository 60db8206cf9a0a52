//! Tools
//!
//! The toolbar's closed set of tools and the current size/color selection.

use std::fmt;
use std::str::FromStr;

use easel_raster::{Color, ShapeKind, StrokeMode};

use crate::{SessionConfig, SessionError};

/// Drawing tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Line,
}

/// What a tool does to pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Paints directly onto the active layer as the pointer moves
    Freehand(StrokeMode),
    /// Previews on the display and commits on release
    Shape(ShapeKind),
}

impl Tool {
    pub const ALL: [Tool; 5] = [Tool::Brush, Tool::Eraser, Tool::Rectangle, Tool::Circle, Tool::Line];

    pub fn kind(self) -> ToolKind {
        match self {
            Tool::Brush => ToolKind::Freehand(StrokeMode::Paint),
            Tool::Eraser => ToolKind::Freehand(StrokeMode::Erase),
            Tool::Rectangle => ToolKind::Shape(ShapeKind::Rectangle),
            Tool::Circle => ToolKind::Shape(ShapeKind::Circle),
            Tool::Line => ToolKind::Shape(ShapeKind::Line),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Line => "line",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SessionError::UnknownTool(s.to_string()))
    }
}

/// Current tool, brush size and color
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    tool: Tool,
    brush_size: u32,
    color: Color,
    min_size: u32,
    max_size: u32,
}

impl ToolState {
    pub fn new(config: &SessionConfig) -> Self {
        let (min_size, max_size) = config.brush_range();
        Self {
            tool: config.default_tool,
            brush_size: config.default_brush_size.clamp(min_size, max_size),
            color: config.default_color,
            min_size,
            max_size,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Set the brush size, clamped to the configured range. Returns the size applied.
    pub fn set_brush_size(&mut self, size: u32) -> u32 {
        self.brush_size = size.clamp(self.min_size, self.max_size);
        self.brush_size
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Parse and apply a hex color; the current color is kept on error
    pub fn set_color_hex(&mut self, hex: &str) -> Result<Color, SessionError> {
        let color = Color::from_hex(hex).ok_or_else(|| SessionError::InvalidColor(hex.to_string()))?;
        self.color = color;
        Ok(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names() {
        for tool in Tool::ALL {
            assert_eq!(tool.as_str().parse::<Tool>(), Ok(tool));
        }
        assert_eq!("Circle".parse::<Tool>(), Ok(Tool::Circle));
        assert_eq!(
            "spray".parse::<Tool>(),
            Err(SessionError::UnknownTool("spray".to_string()))
        );
    }

    #[test]
    fn test_tool_kinds() {
        assert_eq!(Tool::Brush.kind(), ToolKind::Freehand(StrokeMode::Paint));
        assert_eq!(Tool::Eraser.kind(), ToolKind::Freehand(StrokeMode::Erase));
        assert_eq!(Tool::Line.kind(), ToolKind::Shape(ShapeKind::Line));
    }

    #[test]
    fn test_brush_size_clamped() {
        let mut tools = ToolState::new(&SessionConfig::default());
        assert_eq!(tools.brush_size(), 5);
        assert_eq!(tools.set_brush_size(0), 1);
        assert_eq!(tools.set_brush_size(500), 50);
        assert_eq!(tools.set_brush_size(12), 12);
    }

    #[test]
    fn test_invalid_hex_keeps_color() {
        let mut tools = ToolState::new(&SessionConfig::default());
        assert_eq!(tools.set_color_hex("#FF0000"), Ok(Color::RED));
        assert!(tools.set_color_hex("red").is_err());
        assert_eq!(tools.color(), Color::RED);
    }
}
