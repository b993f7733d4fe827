// Selection geometry: the pointer-driven shape being drawn, and the
// conversion from a finished shape to a per-pixel occupancy mask.
//
// Visual: while the mouse is down, the shape follows the cursor (a growing
// trail, a rubber-band rectangle, or an expanding circle). On release the
// shape stays on screen as the red outline until a new one is begun.

use crate::types::{Mask, Point, SelectionMode, SelectionShape};

/// Tracks the in-progress shape across pointer events.
pub struct SelectionGeometry {
    shape: Option<SelectionShape>,
    drawing: bool,
    complete: bool,
}

impl SelectionGeometry {
    pub fn new() -> Self {
        Self { shape: None, drawing: false, complete: false }
    }

    /// Start a new shape at `point`, discarding any previous one.
    /// Freehand begins life as a single-point trail; Rectangle and Circle
    /// record `point` as the anchor with zero extent.
    pub fn begin(&mut self, mode: SelectionMode, point: Point) {
        self.shape = Some(match mode {
            SelectionMode::Freehand => SelectionShape::Freehand { path: vec![point] },
            SelectionMode::Rectangle => {
                SelectionShape::Rectangle { origin: point, width: 0.0, height: 0.0 }
            }
            SelectionMode::Circle => SelectionShape::Circle { center: point, radius: 0.0 },
        });
        self.drawing = true;
        self.complete = false;
    }

    /// Feed one pointer-move. Appends to the trail, or re-derives the
    /// rectangle size / circle radius from the anchor. No-op unless a
    /// shape is actively being drawn.
    pub fn extend(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        match &mut self.shape {
            Some(SelectionShape::Freehand { path }) => path.push(point),
            Some(SelectionShape::Rectangle { origin, width, height }) => {
                *width = point.x - origin.x; // signed: drag left gives < 0
                *height = point.y - origin.y;
            }
            Some(SelectionShape::Circle { center, radius }) => {
                *radius = center.distance(point);
            }
            None => {}
        }
    }

    /// Pointer released: the shape is complete but stays around for mask
    /// extraction and for the outline overlay.
    pub fn finish(&mut self) -> Option<&SelectionShape> {
        if self.shape.is_some() {
            self.drawing = false;
            self.complete = true;
        }
        self.shape.as_ref()
    }

    /// Drop the shape entirely (mode switch does this).
    pub fn clear(&mut self) {
        self.shape = None;
        self.drawing = false;
        self.complete = false;
    }

    /// Scale the outline of the completed shape: rectangle size and circle
    /// radius multiply by `scale`; a freehand trail is left alone. Only the
    /// geometry moves, pixels already captured do not.
    pub fn resize(&mut self, scale: f32) {
        match &mut self.shape {
            Some(SelectionShape::Rectangle { width, height, .. }) => {
                *width *= scale;
                *height *= scale;
            }
            Some(SelectionShape::Circle { radius, .. }) => *radius *= scale,
            _ => {}
        }
    }

    /// The shape as it currently stands, finished or not (the outline
    /// overlay draws whatever this returns).
    pub fn shape(&self) -> Option<&SelectionShape> {
        self.shape.as_ref()
    }

    /// The shape only once the pointer has been released.
    pub fn completed(&self) -> Option<&SelectionShape> {
        if self.complete { self.shape.as_ref() } else { None }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }
}

impl SelectionShape {
    /// Rasterize this shape into a mask matching the target buffer size.
    /// Geometry sticking out past the buffer is clipped, never indexed.
    /// Zero-extent shapes come back as an all-false mask.
    pub fn mask(&self, width: usize, height: usize) -> Mask {
        let mut mask = Mask::empty(width, height);
        match self {
            SelectionShape::Rectangle { origin, width: w, height: h } => {
                rasterize_rect(&mut mask, *origin, *w, *h);
            }
            SelectionShape::Circle { center, radius } => {
                rasterize_circle(&mut mask, *center, *radius);
            }
            SelectionShape::Freehand { path } => {
                rasterize_polygon(&mut mask, path);
            }
        }
        mask
    }
}

/// Fill `[min, min + |size|)` on each axis. The signed width/height are
/// normalized first so a drag up-left selects the same rectangle as a drag
/// down-right over the same corners.
fn rasterize_rect(mask: &mut Mask, origin: Point, w: f32, h: f32) {
    let min_x = origin.x.min(origin.x + w);
    let min_y = origin.y.min(origin.y + h);
    let (aw, ah) = (w.abs(), h.abs());

    let x_lo = grid_clamp(min_x, mask.width);
    let x_hi = grid_clamp(min_x + aw, mask.width);
    let y_lo = grid_clamp(min_y, mask.height);
    let y_hi = grid_clamp(min_y + ah, mask.height);

    for y in y_lo..y_hi {
        for x in x_lo..x_hi {
            mask.inside[y * mask.width + x] = true;
        }
    }
}

/// Pixels within `radius` of the center, boundary inclusive.
fn rasterize_circle(mask: &mut Mask, center: Point, radius: f32) {
    if radius <= 0.0 {
        return; // zero extent selects nothing
    }
    let x_lo = grid_clamp(center.x - radius, mask.width);
    let x_hi = grid_clamp(center.x + radius + 1.0, mask.width);
    let y_lo = grid_clamp(center.y - radius, mask.height);
    let y_hi = grid_clamp(center.y + radius + 1.0, mask.height);
    let r2 = radius * radius;

    for y in y_lo..y_hi {
        for x in x_lo..x_hi {
            let dx = x as f32 - center.x;
            let dy = y as f32 - center.y;
            if dx * dx + dy * dy <= r2 {
                mask.inside[y * mask.width + x] = true;
            }
        }
    }
}

/// Even-odd fill of the closed polygon formed by the trail (implicit edge
/// from the last point back to the first). Tested at pixel centers, which
/// also sidesteps ray-through-vertex degeneracies for hand-drawn paths.
/// Fewer than 3 points has no interior and selects nothing.
fn rasterize_polygon(mask: &mut Mask, path: &[Point]) {
    if path.len() < 3 {
        return;
    }

    // Only sweep the path's bounding box, not the whole canvas.
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for p in path {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let x_lo = grid_clamp(min_x, mask.width);
    let x_hi = grid_clamp(max_x + 1.0, mask.width);
    let y_lo = grid_clamp(min_y, mask.height);
    let y_hi = grid_clamp(max_y + 1.0, mask.height);

    for y in y_lo..y_hi {
        let py = y as f32 + 0.5;
        for x in x_lo..x_hi {
            let px = x as f32 + 0.5;

            // Cast a ray to +x and count edge crossings; odd = inside.
            let mut inside = false;
            let n = path.len();
            for i in 0..n {
                let a = path[i];
                let b = path[(i + 1) % n];
                if (a.y > py) != (b.y > py) {
                    let x_cross = a.x + (b.x - a.x) * (py - a.y) / (b.y - a.y);
                    if px < x_cross {
                        inside = !inside;
                    }
                }
            }
            if inside {
                mask.inside[y * mask.width + x] = true;
            }
        }
    }
}

/// Snap a real coordinate onto the pixel grid, clamped into `0..=limit`.
/// Used for both ends of a scan range: the first pixel at or after `v`.
#[inline]
fn grid_clamp(v: f32, limit: usize) -> usize {
    (v.ceil().max(0.0) as usize).min(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(ox: f32, oy: f32, w: f32, h: f32) -> SelectionShape {
        SelectionShape::Rectangle { origin: Point::new(ox, oy), width: w, height: h }
    }

    #[test]
    fn rect_area_matches_signed_size() {
        // Drag down-right and drag up-left over the same corners.
        assert_eq!(rect(2.0, 2.0, 4.0, 4.0).mask(10, 10).area(), 16);
        assert_eq!(rect(6.0, 6.0, -4.0, -4.0).mask(10, 10).area(), 16);
    }

    #[test]
    fn rect_clips_to_buffer_bounds() {
        // Hangs off the top-left: only the 3x3 on-canvas part survives.
        assert_eq!(rect(-2.0, -2.0, 5.0, 5.0).mask(10, 10).area(), 9);
        // Entirely off-canvas selects nothing.
        assert!(rect(20.0, 20.0, 5.0, 5.0).mask(10, 10).is_empty());
    }

    #[test]
    fn rect_zero_extent_is_empty() {
        assert!(rect(3.0, 3.0, 0.0, 0.0).mask(10, 10).is_empty());
        assert!(rect(3.0, 3.0, 5.0, 0.0).mask(10, 10).is_empty());
    }

    #[test]
    fn circle_boundary_is_inclusive() {
        let c = SelectionShape::Circle { center: Point::new(5.0, 5.0), radius: 3.0 };
        let m = c.mask(12, 12);
        assert!(m.inside[5 * 12 + 8]); // exactly radius away
        assert!(!m.inside[5 * 12 + 9]); // one past

        // Shrink just under the boundary pixel and it drops out.
        let c = SelectionShape::Circle { center: Point::new(5.0, 5.0), radius: 2.999 };
        assert!(!c.mask(12, 12).inside[5 * 12 + 8]);
    }

    #[test]
    fn circle_zero_radius_is_empty() {
        let c = SelectionShape::Circle { center: Point::new(5.0, 5.0), radius: 0.0 };
        assert!(c.mask(12, 12).is_empty());
    }

    #[test]
    fn freehand_convex_interior() {
        // Axis-aligned square trail (1,1)-(8,1)-(8,8)-(1,8), implicitly
        // closed. Pixel centers 1.5..7.5 fall inside: a 7x7 block.
        let path = vec![
            Point::new(1.0, 1.0),
            Point::new(8.0, 1.0),
            Point::new(8.0, 8.0),
            Point::new(1.0, 8.0),
        ];
        let m = SelectionShape::Freehand { path }.mask(10, 10);
        assert_eq!(m.area(), 49);
        assert!(m.inside[4 * 10 + 4]);
        assert!(!m.inside[0]);
    }

    #[test]
    fn freehand_degenerate_paths_are_empty() {
        let one = SelectionShape::Freehand { path: vec![Point::new(4.0, 4.0)] };
        assert!(one.mask(10, 10).is_empty());

        let two = SelectionShape::Freehand {
            path: vec![Point::new(1.0, 1.0), Point::new(8.0, 8.0)],
        };
        assert!(two.mask(10, 10).is_empty());
    }

    #[test]
    fn freehand_self_intersecting_uses_even_odd() {
        // Bowtie: top lobe and bottom lobe fill, the pinch at (5,5) does not.
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ];
        let m = SelectionShape::Freehand { path }.mask(12, 12);
        assert!(m.inside[2 * 12 + 5]); // top lobe
        assert!(m.inside[8 * 12 + 5]); // bottom lobe
        assert!(!m.inside[5 * 12 + 5]); // pinch point
        assert!(!m.inside[5 * 12 + 2]); // left of the pinch, outside both lobes
    }

    #[test]
    fn extend_recomputes_rect_and_circle() {
        let mut geo = SelectionGeometry::new();
        geo.begin(SelectionMode::Rectangle, Point::new(2.0, 3.0));
        geo.extend(Point::new(6.0, 5.0));
        geo.extend(Point::new(1.0, 1.0)); // later move wins, sign flips
        match geo.finish() {
            Some(SelectionShape::Rectangle { width, height, .. }) => {
                assert_eq!(*width, -1.0);
                assert_eq!(*height, -2.0);
            }
            other => panic!("unexpected shape: {other:?}"),
        }

        geo.begin(SelectionMode::Circle, Point::new(0.0, 0.0));
        geo.extend(Point::new(3.0, 4.0));
        match geo.finish() {
            Some(SelectionShape::Circle { radius, .. }) => assert_eq!(*radius, 5.0),
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn extend_without_begin_is_a_no_op() {
        let mut geo = SelectionGeometry::new();
        geo.extend(Point::new(3.0, 3.0));
        assert!(geo.shape().is_none());
        assert!(geo.finish().is_none());
    }

    #[test]
    fn begin_discards_previous_shape() {
        let mut geo = SelectionGeometry::new();
        geo.begin(SelectionMode::Freehand, Point::new(1.0, 1.0));
        geo.extend(Point::new(2.0, 2.0));
        geo.begin(SelectionMode::Circle, Point::new(5.0, 5.0));
        assert!(matches!(geo.shape(), Some(SelectionShape::Circle { .. })));
        assert!(geo.completed().is_none());
    }

    #[test]
    fn finish_keeps_shape_available() {
        let mut geo = SelectionGeometry::new();
        geo.begin(SelectionMode::Rectangle, Point::new(0.0, 0.0));
        geo.extend(Point::new(4.0, 4.0));
        geo.finish();
        assert!(!geo.is_drawing());
        assert!(geo.completed().is_some());
        assert!(geo.shape().is_some());
    }

    #[test]
    fn repeated_enlarge_compounds() {
        let mut geo = SelectionGeometry::new();
        geo.begin(SelectionMode::Rectangle, Point::new(0.0, 0.0));
        geo.extend(Point::new(100.0, 50.0));
        geo.finish();
        for _ in 0..3 {
            geo.resize(1.1);
        }
        match geo.shape() {
            Some(SelectionShape::Rectangle { width, .. }) => {
                assert!((width - 133.1).abs() < 1e-3, "width = {width}");
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn resize_leaves_freehand_alone() {
        let mut geo = SelectionGeometry::new();
        geo.begin(SelectionMode::Freehand, Point::new(1.0, 1.0));
        geo.extend(Point::new(4.0, 1.0));
        geo.extend(Point::new(4.0, 4.0));
        geo.finish();
        let before = geo.shape().cloned();
        geo.resize(1.1);
        assert_eq!(geo.shape().cloned(), before);
    }
}
