//! Session Configuration

use easel_raster::Color;

use crate::Tool;

/// What a history entry captures and where undo restores it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryMode {
    /// Every layer's pixels, restored layer by layer
    #[default]
    LayerStack,
    /// The flattened composite, restored into whichever layer is active
    FlattenedActive,
}

/// Session configuration options
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial viewport width (0 = not yet sized)
    pub width: u32,

    /// Initial viewport height (0 = not yet sized)
    pub height: u32,

    /// Smallest brush size the toolbar may set
    pub min_brush_size: u32,

    /// Largest brush size the toolbar may set
    pub max_brush_size: u32,

    pub default_brush_size: u32,

    pub default_color: Color,

    pub default_tool: Tool,

    pub history_mode: HistoryMode,

    /// Oldest entries are dropped past this count
    pub max_history_entries: Option<usize>,
}

impl SessionConfig {
    /// Default configuration with the given viewport
    pub fn with_viewport(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Inclusive brush size bounds, tolerant of swapped or zero limits
    pub fn brush_range(&self) -> (u32, u32) {
        let min = self.min_brush_size.min(self.max_brush_size).max(1);
        let max = self.min_brush_size.max(self.max_brush_size).max(min);
        (min, max)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            min_brush_size: 1,
            max_brush_size: 50,
            default_brush_size: 5,
            default_color: Color::BLACK,
            default_tool: Tool::Brush,
            history_mode: HistoryMode::default(),
            max_history_entries: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.brush_range(), (1, 50));
        assert_eq!(config.default_brush_size, 5);
        assert_eq!(config.default_color, Color::BLACK);
        assert_eq!(config.history_mode, HistoryMode::LayerStack);
    }

    #[test]
    fn test_brush_range_is_sane() {
        let config = SessionConfig {
            min_brush_size: 40,
            max_brush_size: 0,
            ..SessionConfig::default()
        };
        assert_eq!(config.brush_range(), (1, 40));
    }
}
