//! Compositor
//!
//! Flattens visible layers back to front with source-over blending. The
//! compositor never owns pixels: it reads layer surfaces and writes into a
//! caller-supplied output.

use easel_raster::Surface;

use crate::Layer;

/// Clear `output` and draw every visible layer onto it in stack order
pub fn render(layers: &[Layer], output: &mut Surface) {
    output.clear();
    for layer in layers.iter().filter(|l| l.visible) {
        layer.surface().composite_onto(output, (0, 0));
    }
}

/// Composite visible layers into a fresh surface of the given size
pub fn flatten(layers: &[Layer], width: u32, height: u32) -> Surface {
    let mut output = Surface::new(width, height);
    render(layers, &mut output);
    output
}
