//! Layer

use std::fmt;
use std::str::FromStr;

use easel_raster::Surface;

/// Stable layer identifier, never reused within a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LayerId(u64);

impl LayerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

impl FromStr for LayerId {
    type Err = std::num::ParseIntError;

    /// Accepts both `layer-7` and `7`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("layer-").unwrap_or(s);
        digits.parse().map(LayerId)
    }
}

/// Named, independently visible raster layer
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    pub name: String,
    pub visible: bool,
    surface: Surface,
}

impl Layer {
    /// Visible layer with an empty transparent surface
    pub fn new(id: LayerId, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            surface: Surface::new(width, height),
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}
