// Compositing: the one place a displayable buffer is produced.
//
// Visual: the base image, every captured layer stacked on top of it in
// capture order, and the red selection outline over everything.

use crate::draw::{draw_line2, put_pixel};
use crate::layers::LayerStack;
use crate::types::{alpha, PixelBuffer, Point, SelectionShape};

/// Stroke color for the live selection outline.
pub const OUTLINE_COLOR: u32 = 0xFFFF_0000; // opaque red, 2px wide

/// Merge base + layer stack + optional outline into a fresh buffer.
/// Layers are drawn at (0,0) in stack order; a layer pixel with any alpha
/// replaces the accumulator pixel outright (layers are disjoint cutouts,
/// not translucent paint). Same inputs always give byte-identical output.
pub fn render(
    base: &PixelBuffer,
    stack: &LayerStack,
    outline: Option<&SelectionShape>,
) -> PixelBuffer {
    let mut out = base.clone();

    for layer in stack.iter() {
        let buf = &layer.display;
        if buf.width != out.width || buf.height != out.height {
            continue; // never index a mis-sized layer
        }
        for (dst, &src) in out.pixels.iter_mut().zip(&buf.pixels) {
            if alpha(src) > 0 {
                *dst = src;
            }
        }
    }

    if let Some(shape) = outline {
        stroke_shape(&mut out, shape);
    }
    out
}

/// Resize a buffer for display with nearest-neighbor sampling.
/// Visual: the zoom view; blocky on enlarge, decimated on shrink. The
/// result is never written back into a layer.
pub fn scale_nearest(src: &PixelBuffer, factor: f32) -> PixelBuffer {
    if !(factor.is_finite() && factor > 0.0) {
        return src.clone();
    }
    let out_w = ((src.width as f32 * factor).round() as usize).max(1);
    let out_h = ((src.height as f32 * factor).round() as usize).max(1);

    let mut out = PixelBuffer::new(out_w, out_h);
    for y in 0..out_h {
        let sy = ((y as f32 / factor) as usize).min(src.height - 1);
        for x in 0..out_w {
            let sx = ((x as f32 / factor) as usize).min(src.width - 1);
            out.pixels[y * out_w + x] = src.pixels[sy * src.width + sx];
        }
    }
    out
}

/// 2px boundary stroke for whichever shape is live. Everything clips via
/// `put_pixel`, so off-canvas geometry just draws less.
fn stroke_shape(fb: &mut PixelBuffer, shape: &SelectionShape) {
    match shape {
        SelectionShape::Rectangle { origin, width, height } => {
            stroke_rect(fb, *origin, *width, *height);
        }
        SelectionShape::Circle { center, radius } => {
            stroke_circle(fb, *center, *radius);
        }
        SelectionShape::Freehand { path } => {
            stroke_path(fb, path);
        }
    }
}

fn stroke_rect(fb: &mut PixelBuffer, origin: Point, w: f32, h: f32) {
    let x0 = origin.x.min(origin.x + w).round() as i32;
    let y0 = origin.y.min(origin.y + h).round() as i32;
    let x1 = origin.x.max(origin.x + w).round() as i32;
    let y1 = origin.y.max(origin.y + h).round() as i32;

    draw_line2(fb, x0, y0, x1, y0, OUTLINE_COLOR);
    draw_line2(fb, x0, y1, x1, y1, OUTLINE_COLOR);
    draw_line2(fb, x0, y0, x0, y1, OUTLINE_COLOR);
    draw_line2(fb, x1, y0, x1, y1, OUTLINE_COLOR);
}

/// Circle circumference as a ring one pixel thick to either side of the
/// exact radius.
fn stroke_circle(fb: &mut PixelBuffer, center: Point, radius: f32) {
    if radius <= 0.0 {
        return;
    }
    let x_lo = (center.x - radius - 2.0).floor() as i32;
    let x_hi = (center.x + radius + 2.0).ceil() as i32;
    let y_lo = (center.y - radius - 2.0).floor() as i32;
    let y_hi = (center.y + radius + 2.0).ceil() as i32;

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let dx = x as f32 - center.x;
            let dy = y as f32 - center.y;
            let d = (dx * dx + dy * dy).sqrt();
            if (d - radius).abs() <= 1.0 {
                put_pixel(fb, x, y, OUTLINE_COLOR);
            }
        }
    }
}

/// Freehand trail: segments between consecutive points plus the implicit
/// closing edge, matching how the mask treats the path as a closed loop.
fn stroke_path(fb: &mut PixelBuffer, path: &[Point]) {
    if path.len() < 2 {
        return;
    }
    let n = path.len();
    for i in 0..n {
        let a = path[i];
        let b = path[(i + 1) % n];
        draw_line2(
            fb,
            a.x.round() as i32,
            a.y.round() as i32,
            b.x.round() as i32,
            b.y.round() as i32,
            OUTLINE_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Layer;
    use crate::types::pack;

    const RED: u32 = 0xFFFF_0000;
    const GREEN: u32 = 0xFF00_FF00;

    fn rect_shape(ox: f32, oy: f32, w: f32, h: f32) -> SelectionShape {
        SelectionShape::Rectangle { origin: Point::new(ox, oy), width: w, height: h }
    }

    fn stack_with_green_square() -> (PixelBuffer, LayerStack) {
        let base = PixelBuffer::filled(10, 10, RED);
        let green = PixelBuffer::filled(10, 10, GREEN);
        let mask = rect_shape(2.0, 2.0, 4.0, 4.0).mask(10, 10);
        let mut stack = LayerStack::new();
        stack.push(Layer::capture(&green, &mask).unwrap());
        (base, stack)
    }

    #[test]
    fn layers_overwrite_where_opaque() {
        let (base, stack) = stack_with_green_square();
        let out = render(&base, &stack, None);
        assert_eq!(out.pixels[out.idx(3, 3)], GREEN); // inside the cutout
        assert_eq!(out.pixels[out.idx(8, 8)], RED); // transparent part leaves base
    }

    #[test]
    fn later_layers_win() {
        let (base, mut stack) = stack_with_green_square();
        let blue = PixelBuffer::filled(10, 10, pack(0, 0, 255, 0xFF));
        let mask = rect_shape(3.0, 3.0, 2.0, 2.0).mask(10, 10);
        stack.push(Layer::capture(&blue, &mask).unwrap());

        let out = render(&base, &stack, None);
        assert_eq!(out.pixels[out.idx(3, 3)], pack(0, 0, 255, 0xFF));
        assert_eq!(out.pixels[out.idx(2, 2)], GREEN); // only the green layer here
    }

    #[test]
    fn render_is_deterministic() {
        let (base, stack) = stack_with_green_square();
        let outline = rect_shape(1.0, 1.0, 7.0, 7.0);
        let a = render(&base, &stack, Some(&outline));
        let b = render(&base, &stack, Some(&outline));
        assert_eq!(a, b);
    }

    #[test]
    fn render_does_not_touch_its_inputs() {
        let (base, stack) = stack_with_green_square();
        let before = base.clone();
        let _ = render(&base, &stack, Some(&rect_shape(0.0, 0.0, 9.0, 9.0)));
        assert_eq!(base, before);
    }

    #[test]
    fn outline_strokes_the_boundary_only() {
        let base = PixelBuffer::filled(20, 20, RED);
        let out = render(&base, &LayerStack::new(), Some(&rect_shape(4.0, 4.0, 8.0, 8.0)));
        assert_eq!(out.pixels[out.idx(4, 4)], OUTLINE_COLOR); // corner
        assert_eq!(out.pixels[out.idx(8, 4)], OUTLINE_COLOR); // top edge
        assert_eq!(out.pixels[out.idx(8, 8)], RED); // interior untouched
    }

    #[test]
    fn off_canvas_outline_is_clipped() {
        let base = PixelBuffer::filled(10, 10, RED);
        let shapes = [
            rect_shape(-5.0, -5.0, 30.0, 30.0),
            SelectionShape::Circle { center: Point::new(-3.0, -3.0), radius: 50.0 },
            SelectionShape::Freehand {
                path: vec![Point::new(-10.0, 5.0), Point::new(20.0, 5.0), Point::new(5.0, 30.0)],
            },
        ];
        for shape in &shapes {
            let _ = render(&base, &LayerStack::new(), Some(shape)); // must not panic
        }
    }

    #[test]
    fn circle_outline_touches_the_radius() {
        let base = PixelBuffer::filled(30, 30, RED);
        let shape = SelectionShape::Circle { center: Point::new(15.0, 15.0), radius: 8.0 };
        let out = render(&base, &LayerStack::new(), Some(&shape));
        assert_eq!(out.pixels[out.idx(23, 15)], OUTLINE_COLOR); // on the circumference
        assert_eq!(out.pixels[out.idx(15, 15)], RED); // center untouched
    }

    #[test]
    fn scale_nearest_dimensions_and_content() {
        let mut src = PixelBuffer::new(2, 1);
        src.pixels[0] = RED;
        src.pixels[1] = GREEN;

        let out = scale_nearest(&src, 2.0);
        assert_eq!((out.width, out.height), (4, 2));
        assert_eq!(out.pixels, vec![RED, RED, GREEN, GREEN, RED, RED, GREEN, GREEN]);

        let out = scale_nearest(&PixelBuffer::filled(10, 10, RED), 1.5);
        assert_eq!((out.width, out.height), (15, 15));
    }

    #[test]
    fn scale_nearest_rejects_bad_factors() {
        let src = PixelBuffer::filled(4, 4, RED);
        assert_eq!(scale_nearest(&src, 0.0), src);
        assert_eq!(scale_nearest(&src, -1.0), src);
        assert_eq!(scale_nearest(&src, f32::NAN), src);
    }
}
