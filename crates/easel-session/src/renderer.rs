//! Stroke/Shape Renderer
//!
//! Gesture state machine: `Idle -> Drawing` on pointer down, back to `Idle`
//! on pointer up or leave. Freehand tools paint into the target surface as
//! the pointer moves; shape tools only report a preview until release.
//!
//! The tool, width and color are captured when the gesture starts, so
//! toolbar changes mid-drag apply to the next gesture.

use easel_raster::{Color, Point, ShapeKind, Surface};

use crate::{ToolKind, ToolState};

/// One pointer-down-to-up interaction
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub kind: ToolKind,
    pub width: f32,
    pub color: Color,
    pub start: Point,
    /// Every point seen so far, starting with `start`
    pub points: Vec<Point>,
}

impl Gesture {
    pub fn last(&self) -> Point {
        self.points.last().copied().unwrap_or(self.start)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing(Gesture),
}

/// Transient shape outline drawn over the composite during a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapePreview {
    pub kind: ShapeKind,
    pub start: Point,
    pub end: Point,
    pub width: f32,
    pub color: Color,
}

impl ShapePreview {
    pub fn draw(&self, surface: &mut Surface) {
        surface.draw_shape(self.kind, self.start, self.end, self.width, self.color);
    }
}

/// Result of a pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No gesture in progress
    Ignored,
    /// The target surface changed
    Painted,
    /// Nothing was persisted; draw this over the composite
    Preview(ShapePreview),
}

/// Turns pointer events into draw operations on a target surface
#[derive(Debug, Clone, Default)]
pub struct StrokeRenderer {
    state: GestureState,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GestureState::Drawing(_))
    }

    /// Start a gesture. Freehand tools leave a dot so a tap is visible.
    ///
    /// Any gesture already in progress is replaced; callers commit it first.
    pub fn pointer_down(&mut self, tools: &ToolState, target: &mut Surface, at: Point) {
        let gesture = Gesture {
            kind: tools.tool().kind(),
            width: tools.brush_size() as f32,
            color: tools.color(),
            start: at,
            points: vec![at],
        };

        if let ToolKind::Freehand(mode) = gesture.kind {
            target.draw_stroke(&[at], gesture.width, gesture.color, mode);
        }
        self.state = GestureState::Drawing(gesture);
    }

    pub fn pointer_move(&mut self, target: &mut Surface, at: Point) -> MoveOutcome {
        let GestureState::Drawing(gesture) = &mut self.state else {
            return MoveOutcome::Ignored;
        };

        let from = gesture.last();
        gesture.points.push(at);

        match gesture.kind {
            ToolKind::Freehand(mode) => {
                target.draw_stroke(&[from, at], gesture.width, gesture.color, mode);
                MoveOutcome::Painted
            }
            ToolKind::Shape(kind) => MoveOutcome::Preview(ShapePreview {
                kind,
                start: gesture.start,
                end: at,
                width: gesture.width,
                color: gesture.color,
            }),
        }
    }

    /// End the gesture at `at` (pointer up) or at the last known point
    /// (`None`, pointer leave). Shapes are committed to `target` here.
    ///
    /// Returns the finished gesture, or `None` when idle.
    pub fn finish(&mut self, target: &mut Surface, at: Option<Point>) -> Option<Gesture> {
        let GestureState::Drawing(mut gesture) = std::mem::take(&mut self.state) else {
            return None;
        };

        if let Some(at) = at {
            if at != gesture.last() {
                if let ToolKind::Freehand(mode) = gesture.kind {
                    target.draw_stroke(&[gesture.last(), at], gesture.width, gesture.color, mode);
                }
                gesture.points.push(at);
            }
        }

        if let ToolKind::Shape(kind) = gesture.kind {
            target.draw_shape(kind, gesture.start, gesture.last(), gesture.width, gesture.color);
        }
        Some(gesture)
    }
}
