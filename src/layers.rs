// Captured selections, stacked in paint order.
//
// Each layer keeps two buffers: `captured` holds the pixels exactly as they
// were lifted off the base image, `display` is what the compositor reads.
// Brightness always recomputes `display` from `captured`, so changing the
// factor twice never compounds clamping damage and factor 1.0 restores the
// capture exactly.

use crate::brightness;
use crate::types::{Mask, PixelBuffer};

pub struct Layer {
    pub captured: PixelBuffer,
    pub display: PixelBuffer,
}

impl Layer {
    /// Lift the masked pixels out of `base` into a canvas-sized layer.
    /// Inside the mask every channel is copied; outside is fully
    /// transparent. The layer carries no offset of its own, the compositor
    /// always draws it at (0,0), which is why it spans the whole canvas.
    ///
    /// An empty mask produces no layer at all.
    pub fn capture(base: &PixelBuffer, mask: &Mask) -> Option<Layer> {
        if mask.width != base.width || mask.height != base.height || mask.is_empty() {
            return None;
        }
        let mut captured = PixelBuffer::new(base.width, base.height);
        for (i, &keep) in mask.inside.iter().enumerate() {
            if keep {
                captured.pixels[i] = base.pixels[i];
            }
        }
        Some(Layer { display: captured.clone(), captured })
    }
}

/// Ordered stack of captured layers; later index = drawn on top.
/// May be empty. Every layer matches the base image's dimensions.
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append as the new top layer.
    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Replace every layer's display buffer with `f(captured)`, keeping
    /// order and count.
    pub fn apply_transform<F>(&mut self, f: F)
    where
        F: Fn(&PixelBuffer) -> PixelBuffer,
    {
        for layer in &mut self.layers {
            layer.display = f(&layer.captured);
        }
    }

    /// Re-derive every layer at the given global brightness factor.
    pub fn set_brightness(&mut self, factor: f32) {
        self.apply_transform(|buf| brightness::adjust(buf, factor));
    }

    /// Drop all layers (the only way a layer is destroyed).
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The most recently captured layer, if any.
    pub fn top(&self) -> Option<&Layer> {
        self.layers.last()
    }
}
