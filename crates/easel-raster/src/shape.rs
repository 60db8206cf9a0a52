//! Stroke modes and outline shapes

use tiny_skia::{Path, PathBuilder};

use crate::Point;

/// How a stroke affects the pixels it covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StrokeMode {
    /// Source-over with the stroke color
    #[default]
    Paint,
    /// Removes coverage (destination-out), leaving transparency
    Erase,
}

impl StrokeMode {
    pub(crate) fn blend_mode(self) -> tiny_skia::BlendMode {
        match self {
            StrokeMode::Paint => tiny_skia::BlendMode::SourceOver,
            StrokeMode::Erase => tiny_skia::BlendMode::DestinationOut,
        }
    }
}

/// Outline shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
}

impl ShapeKind {
    /// Build the outline path anchored at `start`.
    ///
    /// Rectangles span the box between `start` and `end` in any drag direction.
    /// Circles are centered on `start` with radius `|end - start|`.
    /// Returns `None` for shapes with no extent.
    pub(crate) fn path(self, start: Point, end: Point) -> Option<Path> {
        match self {
            ShapeKind::Rectangle => {
                let mut pb = PathBuilder::new();
                pb.move_to(start.x, start.y);
                pb.line_to(end.x, start.y);
                pb.line_to(end.x, end.y);
                pb.line_to(start.x, end.y);
                pb.close();
                pb.finish()
            }
            ShapeKind::Circle => {
                let radius = start.distance(end);
                if radius <= 0.0 {
                    return None;
                }
                PathBuilder::from_circle(start.x, start.y, radius)
            }
            ShapeKind::Line => {
                if start == end {
                    return None;
                }
                let mut pb = PathBuilder::new();
                pb.move_to(start.x, start.y);
                pb.line_to(end.x, end.y);
                pb.finish()
            }
        }
    }
}

/// Polyline through `points`, skipping consecutive duplicates.
///
/// `None` when the points collapse to a single location.
pub(crate) fn polyline(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);

    let mut last = *first;
    let mut segments = 0;
    for p in rest {
        if *p == last {
            continue;
        }
        pb.line_to(p.x, p.y);
        last = *p;
        segments += 1;
    }

    if segments == 0 {
        return None;
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_any_direction() {
        let forward = ShapeKind::Rectangle.path(Point::new(2.0, 2.0), Point::new(8.0, 6.0)).unwrap();
        let backward = ShapeKind::Rectangle.path(Point::new(8.0, 6.0), Point::new(2.0, 2.0)).unwrap();
        assert_eq!(forward.bounds(), backward.bounds());
        assert_eq!(forward.bounds().width(), 6.0);
        assert_eq!(forward.bounds().height(), 4.0);
    }

    #[test]
    fn test_circle_radius_from_drag() {
        let path = ShapeKind::Circle.path(Point::new(10.0, 10.0), Point::new(13.0, 14.0)).unwrap();
        let bounds = path.bounds();
        assert!((bounds.width() - 10.0).abs() < 0.01);
        assert!((bounds.left() - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_degenerate_shapes() {
        let p = Point::new(4.0, 4.0);
        assert!(ShapeKind::Circle.path(p, p).is_none());
        assert!(ShapeKind::Line.path(p, p).is_none());
    }

    #[test]
    fn test_polyline_collapses_duplicates() {
        let p = Point::new(1.0, 1.0);
        assert!(polyline(&[]).is_none());
        assert!(polyline(&[p, p, p]).is_none());
        assert!(polyline(&[p, p, Point::new(5.0, 5.0)]).is_some());
    }

    #[test]
    fn test_erase_blend_mode() {
        assert_eq!(StrokeMode::Erase.blend_mode(), tiny_skia::BlendMode::DestinationOut);
        assert_eq!(StrokeMode::default().blend_mode(), tiny_skia::BlendMode::SourceOver);
    }
}
