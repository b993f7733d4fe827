// What you SEE now:
// • The image you picked fills the window.
// • Hold Left Mouse: you draw a selection (1: freehand trail, 2: rectangle,
//   3: circle). On release the region is lifted into a layer.
// • E/S grow or shrink the outline; Enter lifts the resized region again.
// • B/D brighten or darken every lifted layer. X clears the layers.
// • Z toggles a zoomed view of the last capture, A shows it alone. ESC quits.

mod app;
mod brightness;
mod compose;
mod draw;
mod error;
mod layers;
mod loader;
mod selection;
mod types;

use app::App;
use draw::{draw_crosshair, draw_text_5x7, Drawer};
use error::Error;
use minifb::Key;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use types::{Point, SelectionMode};

/// Which buffer the window is showing.
#[derive(Clone, Copy, PartialEq, Eq)]
enum View {
    Composite, // base + layers + outline (the normal editing view)
    Zoom,      // last capture scaled up
    Solo,      // last capture alone on an empty canvas
}

fn main() -> Result<(), Error> {
    env_logger::init();

    /* --- Base image ---
       Visual: the OS file picker appears unless a path was given; the
       window then opens at the image's native size. */
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(loader::pick_image)
        .ok_or(Error::NoImageSelected)?;
    let base = loader::load_image(&path)?;
    let (w, h) = (base.width, base.height);

    let mut app = App::new();
    app.load_base(base);

    let mut drawer = Drawer::new("LayerLift — Selection Studio", w, h)?;

    /* --- Input edge tracking ---
       minifb reports the button as held; press/release are the edges. */
    let mut was_down = false;

    let mut view = View::Composite;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Keyboard: tools, adjustments, views. */
        if drawer.pressed_once(Key::Key1) { app.set_mode(SelectionMode::Freehand); }
        if drawer.pressed_once(Key::Key2) { app.set_mode(SelectionMode::Rectangle); }
        if drawer.pressed_once(Key::Key3) { app.set_mode(SelectionMode::Circle); }

        if drawer.pressed_once(Key::E) { app.enlarge(); } // visual: outline grows
        if drawer.pressed_once(Key::S) { app.shrink(); }
        if drawer.pressed_once(Key::Enter) { app.recapture(); } // lift the resized outline

        if drawer.pressed_once(Key::B) { app.brighten(); } // visual: layers lighten
        if drawer.pressed_once(Key::D) { app.darken(); }
        if drawer.pressed_once(Key::X) { app.clear_layers(); } // visual: cutouts vanish

        if drawer.pressed_once(Key::Z) {
            view = if view == View::Zoom { View::Composite } else { View::Zoom };
        }
        if drawer.pressed_once(Key::A) {
            view = if view == View::Solo { View::Composite } else { View::Solo };
        }

        /* 2) Mouse: press starts a shape, drag extends it, release lifts it.
           Only meaningful in the composite view, where window pixels line
           up with canvas pixels. */
        let down = drawer.left_mouse_down();
        if view == View::Composite {
            if let Some((mx, my)) = drawer.mouse_pos() {
                let p = Point::new(mx, my);
                if down && !was_down {
                    app.pointer_press(p); // visual: outline starts under the cursor
                } else if down {
                    app.pointer_move(p); // visual: outline follows the drag
                }
            }
            if !down && was_down {
                app.pointer_release(); // visual: region lifted, outline stays
            }
        }
        was_down = down;

        /* 3) Compose the frame for whichever view is active. The zoom and
           solo views fall back to the composite when nothing is captured. */
        let frame = match view {
            View::Zoom => app.render_zoomed(app::ZOOM_FACTOR),
            View::Solo => app.render_top_layer(),
            View::Composite => None,
        }
        .or_else(|| app.render());
        let Some(mut frame) = frame else { continue };

        /* 4) Crosshair + HUD on top. */
        if view == View::Composite {
            if let Some((mx, my)) = drawer.mouse_pos() {
                draw_crosshair(&mut frame, mx as i32, my as i32, 12, 0xFFFF_CC33);
            }
        }

        let mode_tag = match app.mode() {
            SelectionMode::Freehand => "FREE",
            SelectionMode::Rectangle => "RECT",
            SelectionMode::Circle => "CIRC",
        };
        let view_tag = match view {
            View::Composite => "",
            View::Zoom => " | ZOOM",
            View::Solo => " | SOLO",
        };
        let hud = format!(
            "{}{} | BRI: {:.2} | LAYERS: {} | {}",
            mode_tag,
            view_tag,
            app.brightness(),
            app.layer_count(),
            hud_fps_text
        );
        draw_text_5x7(&mut frame, 8, 8, &hud, 0xFFFF_FFFF);

        /* 5) Present to the window (minifb stretches the zoom/solo sizes). */
        drawer.present(&frame)?;

        /* 6) FPS counter, refreshed once per second. */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::debug!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
