//! Surface - off-screen raster buffer
//!
//! A fixed-size premultiplied RGBA8 buffer. A surface with a zero width or
//! height has no pixmap behind it; drawing on it does nothing.

use tiny_skia::{FillRule, IntSize, LineCap, LineJoin, Paint, Pixmap, PixmapPaint, Stroke, Transform};

use crate::shape::polyline;
use crate::snapshot::pixel_len;
use crate::{Color, Point, RasterError, ShapeKind, Snapshot, StrokeMode};

/// Off-screen pixel surface
#[derive(Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixmap: Option<Pixmap>,
}

impl Surface {
    /// Create a fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixmap: Pixmap::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether pixels are backing this surface
    pub fn is_allocated(&self) -> bool {
        self.pixmap.is_some()
    }

    /// Premultiplied RGBA bytes, empty when unallocated
    pub fn data(&self) -> &[u8] {
        self.pixmap.as_ref().map(|p| p.data()).unwrap_or(&[])
    }

    /// Straight-alpha color at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Whether every pixel is fully transparent
    pub fn is_blank(&self) -> bool {
        self.data().chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Copy into a new surface of the given size.
    ///
    /// Content is kept at the origin; anything outside the old bounds is
    /// transparent, anything outside the new bounds is dropped.
    pub fn resized(&self, width: u32, height: u32) -> Surface {
        let mut out = Surface::new(width, height);
        if let (Some(src), Some(dst)) = (self.pixmap.as_ref(), out.pixmap.as_mut()) {
            copy_rows(src.data(), self.width, self.height, dst.data_mut(), width, height);
        }
        out
    }

    /// Resize in place, preserving content at the origin
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        *self = self.resized(width, height);
    }

    /// Set every pixel to transparent
    pub fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    /// Rasterize a connected polyline with round caps and joins.
    ///
    /// A stroke whose points all coincide draws a dot of diameter `width`.
    /// `StrokeMode::Erase` removes coverage instead of painting.
    pub fn draw_stroke(&mut self, points: &[Point], width: f32, color: Color, mode: StrokeMode) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(first) = points.first() else {
            return;
        };
        let paint = stroke_paint(color, mode);

        match polyline(points) {
            Some(path) => {
                let stroke = Stroke {
                    width,
                    line_cap: LineCap::Round,
                    line_join: LineJoin::Round,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
            None => {
                if let Some(dot) = tiny_skia::PathBuilder::from_circle(first.x, first.y, width / 2.0) {
                    pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
                }
            }
        }
    }

    /// Rasterize an unfilled shape outline anchored at `start`.
    ///
    /// Used both for transient previews on the display surface and for
    /// committing the final shape to a layer.
    pub fn draw_shape(&mut self, kind: ShapeKind, start: Point, end: Point, width: f32, color: Color) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(path) = kind.path(start, end) else {
            return;
        };
        let paint = stroke_paint(color, StrokeMode::Paint);
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Source-over this surface onto `target` with its top-left at `origin`
    pub fn composite_onto(&self, target: &mut Surface, origin: (i32, i32)) {
        let (Some(src), Some(dst)) = (self.pixmap.as_ref(), target.pixmap.as_mut()) else {
            return;
        };
        dst.draw_pixmap(
            origin.0,
            origin.1,
            src.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Independent copy of the full pixel content
    pub fn encode_snapshot(&self) -> Snapshot {
        Snapshot::new(self.width, self.height, self.data().to_vec())
    }

    /// Rebuild a surface from a snapshot
    pub fn decode_snapshot(snapshot: &Snapshot) -> Result<Surface, RasterError> {
        let (width, height) = (snapshot.width(), snapshot.height());
        let expected = pixel_len(width, height).ok_or(RasterError::BadSnapshotHeader)?;
        if snapshot.data().len() != expected {
            return Err(RasterError::InvalidSnapshot {
                expected,
                actual: snapshot.data().len(),
            });
        }

        let pixmap = IntSize::from_wh(width, height)
            .and_then(|size| Pixmap::from_vec(snapshot.data().to_vec(), size));
        Ok(Surface { width, height, pixmap })
    }

    /// Overwrite this surface with a snapshot, keeping the current size.
    ///
    /// Snapshots taken at another size are copied at the origin and clipped.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RasterError> {
        let decoded = Surface::decode_snapshot(snapshot)?;
        *self = decoded.resized(self.width, self.height);
        Ok(())
    }

    /// Encode the surface as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        let pixmap = self.pixmap.as_ref().ok_or(RasterError::Unallocated)?;
        pixmap.encode_png().map_err(|e| RasterError::Encode(e.to_string()))
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("allocated", &self.is_allocated())
            .finish()
    }
}

fn stroke_paint(color: Color, mode: StrokeMode) -> Paint<'static> {
    let mut paint = Paint::default();
    match mode {
        StrokeMode::Paint => paint.set_color(color.to_skia()),
        // Coverage alone decides what is removed.
        StrokeMode::Erase => paint.set_color(tiny_skia::Color::BLACK),
    }
    paint.blend_mode = mode.blend_mode();
    paint.anti_alias = true;
    paint
}

fn copy_rows(src: &[u8], src_w: u32, src_h: u32, dst: &mut [u8], dst_w: u32, dst_h: u32) {
    let row_bytes = src_w.min(dst_w) as usize * 4;
    for y in 0..src_h.min(dst_h) as usize {
        let s = y * src_w as usize * 4;
        let d = y * dst_w as usize * 4;
        dst[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
    }
}
