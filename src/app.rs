// All application state in one value, mutated only by the methods below.
// Every operation fails soft: a press with no image loaded, a release with
// nothing drawn, or a degenerate shape all turn into no-ops instead of
// errors. The display surface is only ever fed from the render methods;
// mutators just update state.

use crate::brightness;
use crate::compose;
use crate::layers::{Layer, LayerStack};
use crate::selection::SelectionGeometry;
use crate::types::{PixelBuffer, Point, SelectionMode};

/// Outline growth per enlarge/shrink press.
pub const ENLARGE_STEP: f32 = 1.1;
pub const SHRINK_STEP: f32 = 0.9;
/// Brightness change per brighten/darken press.
pub const BRIGHTEN_STEP: f32 = 1.2;
pub const DARKEN_STEP: f32 = 0.8;
/// Fixed zoom for the zoom view.
pub const ZOOM_FACTOR: f32 = 1.5;

pub struct App {
    base: Option<PixelBuffer>,
    mode: SelectionMode,
    geometry: SelectionGeometry,
    layers: LayerStack,
    brightness: f32,
}

impl App {
    pub fn new() -> Self {
        Self {
            base: None,
            mode: SelectionMode::Freehand,
            geometry: SelectionGeometry::new(),
            layers: LayerStack::new(),
            brightness: 1.0,
        }
    }

    /// Install the decoded base image. Until this happens every pointer
    /// press is rejected.
    pub fn load_base(&mut self, buffer: PixelBuffer) {
        self.base = Some(buffer);
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch tools. Changing mode mid-drag throws away the unfinished
    /// shape, the one cancellation gesture there is.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode != self.mode {
            self.mode = mode;
            self.geometry.clear();
        }
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Pointer pressed: start a new shape, unless no image is loaded yet.
    pub fn pointer_press(&mut self, point: Point) {
        if self.base.is_none() {
            log::debug!("pointer press ignored, no base image");
            return;
        }
        self.geometry.begin(self.mode, point);
    }

    /// Pointer moved while drawing. Moves must arrive in order; each one
    /// extends the trail or re-derives the rectangle/circle extent.
    pub fn pointer_move(&mut self, point: Point) {
        self.geometry.extend(point);
    }

    /// Pointer released: finish the shape and lift it into a new layer.
    pub fn pointer_release(&mut self) {
        if !self.geometry.is_drawing() {
            return;
        }
        self.geometry.finish();
        self.capture();
    }

    /// Extract the completed shape again. After enlarge/shrink this is how
    /// a differently-sized layer gets produced from the same anchor.
    pub fn recapture(&mut self) {
        self.capture();
    }

    fn capture(&mut self) {
        let Some(base) = &self.base else { return };
        let Some(shape) = self.geometry.completed() else { return };

        let mask = shape.mask(base.width, base.height);
        let Some(mut layer) = Layer::capture(base, &mask) else {
            log::debug!("selection had no area, nothing captured");
            return;
        };
        // A layer born while the global factor is off 1.0 shows up already
        // adjusted, like every other layer on the stack.
        if self.brightness != 1.0 {
            layer.display = brightness::adjust(&layer.captured, self.brightness);
        }
        self.layers.push(layer);
        log::debug!("captured layer {} ({} px)", self.layers.len(), mask.area());
    }

    /// Grow the completed outline by one step.
    pub fn enlarge(&mut self) {
        self.geometry.resize(ENLARGE_STEP);
    }

    /// Shrink the completed outline by one step.
    pub fn shrink(&mut self) {
        self.geometry.resize(SHRINK_STEP);
    }

    /// Step the global brightness factor up and re-derive every layer from
    /// its pristine capture.
    pub fn brighten(&mut self) {
        self.set_brightness(self.brightness * BRIGHTEN_STEP);
    }

    /// Step the global brightness factor down.
    pub fn darken(&mut self) {
        self.set_brightness(self.brightness * DARKEN_STEP);
    }

    /// Set the global factor outright. Layers are recomputed from captured
    /// pixels, so repeated changes never compound clamping damage.
    pub fn set_brightness(&mut self, factor: f32) {
        self.brightness = factor;
        self.layers.set_brightness(factor);
    }

    /// Drop every captured layer.
    pub fn clear_layers(&mut self) {
        self.layers.clear();
    }

    /// Composite everything into a displayable frame: base, layers in
    /// capture order, and the current outline (in-progress or finished).
    /// None until a base image is loaded.
    pub fn render(&self) -> Option<PixelBuffer> {
        let base = self.base.as_ref()?;
        Some(compose::render(base, &self.layers, self.geometry.shape()))
    }

    /// The most recent capture scaled up for inspection. Display-only; the
    /// stored layer keeps its real size.
    pub fn render_zoomed(&self, factor: f32) -> Option<PixelBuffer> {
        let top = self.layers.top()?;
        Some(compose::scale_nearest(&top.display, factor))
    }

    /// The most recent capture alone on an otherwise empty canvas.
    pub fn render_top_layer(&self) -> Option<PixelBuffer> {
        self.layers.top().map(|layer| layer.display.clone())
    }
}
