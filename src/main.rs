// What you SEE:
// • Live (mirrored) camera in the middle of the window, your painting on top.
// • Pinch (hold Left Mouse inside the camera view) to draw with the current brush.
// • Hold Z / Y / X to close the thumb on middle / ring / pinky: undo / redo / clear.
// • Top row picks color and brush; bottom row sizes the brush and walks history.
// • ESC quits.

mod args;
mod brush;
mod camera;
mod config;
mod detector;
mod draw;
mod error;
mod gesture;
mod history;
mod session;
mod surface;
mod toolbar;
mod types;

use args::Args;
use brush::BrushColor;
use camera::CameraCapture;
use clap::Parser;
use config::AppConfig;
use detector::{HandDetector, PointerHand, PointerInput};
use draw::{blit, composite_surface, draw_crosshair, draw_text_5x7, draw_toolbar, Drawer};
use error::Error;
use log::{info, warn};
use session::{SessionController, SessionState};
use std::time::{Duration, Instant};
use toolbar::Toolbar;
use types::{
    pack_rgb, FrameBuffer, NormPoint, VIEW_X, VIEW_Y, WEBCAM_HEIGHT, WEBCAM_WIDTH, WHITE,
    WINDOW_HEIGHT, WINDOW_WIDTH,
};

/// Pointer state relative to the camera view, or `None` when the mouse is
/// outside it (the stand-in hand is then "not detected").
fn pointer_in_view(drawer: &Drawer) -> Option<PointerInput> {
    let (mx, my) = drawer.mouse_pos()?;
    let (vx, vy) = (mx.checked_sub(VIEW_X)?, my.checked_sub(VIEW_Y)?);
    if vx >= WEBCAM_WIDTH as usize || vy >= WEBCAM_HEIGHT as usize {
        return None;
    }
    Some(PointerInput {
        pos: NormPoint::new(
            (vx as f32 + 0.5) / WEBCAM_WIDTH as f32,
            (vy as f32 + 0.5) / WEBCAM_HEIGHT as f32,
        ),
        pinch: drawer.left_mouse_down(),
        held: drawer.held_finger(),
    })
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = AppConfig::load(&args.config)?.apply_args(&args);

    /* --- Camera + window setup ---
       Visual: window opens with live camera feed. */
    let mut cam = CameraCapture::new(
        config.camera.index,
        WEBCAM_WIDTH,
        WEBCAM_HEIGHT,
        config.camera.mirror,
    )?;
    let mut drawer = Drawer::new(
        "Gesture Paint",
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
        config.camera.target_fps,
    )?;

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    let toolbar = Toolbar::new();
    let mut session = SessionController::new(WEBCAM_WIDTH, WEBCAM_HEIGHT, &config.session_settings());
    let mut hand = PointerHand::new();

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Toolbar clicks apply whatever the hand is doing. */
        if let Some((mx, my)) = drawer.take_click() {
            if let Some(command) = toolbar.command_at(mx, my) {
                session.apply(command);
            }
        }

        /* 2) Grab a fresh live frame. A failed capture skips the tick. */
        let live = match cam.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Skipping tick: {e}");
                drawer.pump();
                continue;
            }
        };

        /* 3) Landmarks -> gestures -> paint. */
        hand.set_input(pointer_in_view(&drawer));
        let sample = hand.detect(&live);
        session.tick(sample.as_ref());

        /* 4) Compose: background, camera, paint layer, toolbar, cursor, stroke head, HUD. */
        screen.fill(pack_rgb(WHITE));
        blit(&mut screen, &live, VIEW_X, VIEW_Y);
        composite_surface(&mut screen, session.surface(), VIEW_X, VIEW_Y);
        draw_toolbar(&mut screen, &toolbar, session.brush());

        if let Some(p) = pointer_in_view(&drawer) {
            let cx = (VIEW_X as f32 + p.pos.x * WEBCAM_WIDTH as f32) as i32;
            let cy = (VIEW_Y as f32 + p.pos.y * WEBCAM_HEIGHT as f32) as i32;
            draw_crosshair(&mut screen, cx, cy, 12, 0x00_FF_CC_33);
        }

        if let Some(head) = session.last_point() {
            let hx = VIEW_X as i32 + head.x;
            let hy = VIEW_Y as i32 + head.y;
            draw_crosshair(&mut screen, hx, hy, 4, 0x00_33_66_FF);
        }

        let brush = session.brush();
        let mut tool = String::from(if brush.eraser() { "ERASER" } else { brush.mode().label() });
        if !brush.eraser() && brush.color() == BrushColor::Rainbow {
            tool.push_str(&format!(" HUE {}", brush.hue()));
        }
        let status = match session.state() {
            SessionState::Idle => "IDLE",
            SessionState::Drawing => "DRAWING",
        };
        let hud = format!(
            "{} | {} | SIZE {} | UNDO {} REDO {} | {}",
            status,
            tool,
            brush.size(),
            session.history().undo_len(),
            session.history().redo_len(),
            hud_fps_text
        );
        let hud_y = (VIEW_Y + WEBCAM_HEIGHT as usize) as i32 - 14;
        draw_text_5x7(&mut screen, VIEW_X as i32 + 8, hud_y, &hud, 0x00_FF_FF_FF);

        /* 5) Present to the window. */
        drawer.present(&screen)?;

        /* 6) FPS counter (logged + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            info!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("Window closed, bye");
    Ok(())
}
