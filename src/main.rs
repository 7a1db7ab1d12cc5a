// What you SEE:
// • "Gesture Canvas" window: the white page you draw on, status bar on top.
// • "Hand Preview" window: live camera with the tracked hand skeleton.
// Gestures: ✌ draw, ✊ erase, 👍 clear, ✋ stop, ☝ dot.
// Keys: C clears, V pauses/resumes camera and tracking, Up/Down brush size, 1-6 colors, ESC quits.
// Holding the left mouse button on the page draws by hand.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use gesture_canvas::camera::CameraCapture;
use gesture_canvas::canvas::Canvas;
use gesture_canvas::config::Config;
use gesture_canvas::draw::{draw_hand, draw_hand_label, page_point, screen_size, Drawer, Hud};
use gesture_canvas::feed::{LandmarkFeed, TrackerEvent};
use gesture_canvas::session::{Session, STATUS_READY};
use gesture_canvas::surface::Ui;
use gesture_canvas::types::{FrameBuffer, LandmarkSet, Point, Rgb};

const DEFAULT_CONFIG: &str = "gesture-canvas.toml";

#[derive(Parser, Debug)]
#[command(name = "gesture-canvas", version, about = "Draw on a canvas with hand gestures")]
struct Cli {
    /// TOML config file; without it `gesture-canvas.toml` is used if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay landmark frames from a JSON-lines file ("-" for stdin)
    #[arg(long, conflicts_with = "detector")]
    landmarks: Option<PathBuf>,

    /// Hand detector program that prints JSON-lines landmark frames
    #[arg(long)]
    detector: Option<String>,

    /// Extra argument for the detector (repeatable)
    #[arg(long = "detector-arg", requires = "detector")]
    detector_args: Vec<String>,

    /// Do not open the camera preview
    #[arg(long)]
    no_camera: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesture_canvas=info".into()),
        )
        .init();

    /* --- Config: file first, CLI flags on top --- */
    let mut config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::load_or_default(DEFAULT_CONFIG),
    };
    if let Some(path) = cli.landmarks {
        config.feed.path = Some(path);
        config.feed.command = None;
    }
    if let Some(cmd) = cli.detector {
        config.feed.command = Some(cmd);
        config.feed.args = cli.detector_args;
        config.feed.path = None;
    }
    if cli.no_camera {
        config.camera.enabled = false;
    }
    info!(?config, "gesture-canvas v{} starting", env!("CARGO_PKG_VERSION"));

    /* --- Core state + the page we draw on --- */
    let mut session = Session::new(&config).context("invalid configuration")?;
    let (cw, ch) = (config.canvas.width, config.canvas.height);
    let (fw, fh) = (config.tracking.frame_width, config.tracking.frame_height);
    let mut canvas = Canvas::new(cw, ch, config.canvas.background);
    let mut hud = Hud::default();

    /* --- Windows --- */
    let (sw, sh) = screen_size(cw, ch);
    let mut page = Drawer::new("Gesture Canvas", sw, sh)?;
    let mut preview_win = Drawer::new("Hand Preview", fw, fh)?;
    let mut screen = FrameBuffer::filled(sw, sh, config.canvas.background);

    /* --- Inputs: camera for the preview, landmark feed for the gestures --- */
    if config.camera.enabled && !config.preview_camera_enabled() {
        info!("detector owns the camera; preview shows landmarks only");
    }
    let mut camera = start_camera(&config, &session, &mut hud);
    let mut feed = LandmarkFeed::from_config(&config.feed, &config.tracking)
        .context("starting landmark feed")?;
    if feed.is_none() {
        warn!("no landmark feed configured; only mouse drawing is available");
    }

    session.status(&mut hud, STATUS_READY);

    // Hands from the latest frame, kept so the overlay persists between frames.
    let mut overlay: Vec<(LandmarkSet, &'static str)> = Vec::new();
    let mut mouse_drawing = false;

    /* ------------------------------ Main loop ------------------------------ */
    while page.is_open() && !page.esc_pressed() && preview_win.is_open() {
        /* 1) Controls */
        if page.clear_pressed_once() {
            session.clear(&mut canvas, &mut hud);
        }
        if page.camera_toggle_pressed_once() {
            if session.is_tracking() {
                if let Some(cam) = camera.take() {
                    cam.stop();
                }
                session.set_tracking(false, &mut hud);
                overlay.clear();
                session.status(&mut hud, "Camera stopped");
            } else {
                session.set_tracking(true, &mut hud);
                camera = start_camera(&config, &session, &mut hud);
                if camera.is_none() && !config.preview_camera_enabled() {
                    session.status(&mut hud, "Tracking resumed");
                }
            }
        }
        let step = page.brush_step();
        if step != 0 {
            let size = session.brush.grow(step);
            info!(size, "brush size");
        }
        if let Some(color) = page.palette_pick() {
            session.brush.color = color;
            info!(%color, "brush color");
        }

        /* 2) Mouse drawing, window pixels shifted below the status bar */
        match (page.mouse_pos().and_then(page_point), page.left_mouse_down()) {
            (Some((x, y)), true) => {
                let p = Point::new(x, y);
                if mouse_drawing {
                    session.mouse_move(p, &mut canvas);
                } else {
                    session.mouse_down(p, &mut hud);
                    mouse_drawing = true;
                }
            }
            _ if mouse_drawing => {
                session.mouse_up();
                mouse_drawing = false;
            }
            _ => {}
        }

        /* 3) One tracker frame, if one is waiting. Paused: leave it queued */
        if let Some(f) = feed.as_mut().filter(|_| session.is_tracking()) {
            match f.poll() {
                Some(TrackerEvent::Frame(hands)) => {
                    let results = session.process_frame(&hands, &mut canvas, &mut hud);
                    let valid = hands.iter().filter_map(|raw| LandmarkSet::new(raw).ok());
                    overlay = valid.zip(results).map(|(set, r)| (set, r.gesture.as_str())).collect();
                }
                Some(TrackerEvent::Error(msg)) => {
                    warn!("detector: {msg}");
                    session.stop(&mut hud);
                    session.status(&mut hud, &format!("Tracking error: {msg}"));
                }
                Some(TrackerEvent::Ended) => {
                    session.stop(&mut hud);
                    session.status(&mut hud, "Hand tracking ended");
                    overlay.clear();
                    feed = None;
                }
                None => {}
            }
        }

        /* 4) Preview: camera (or black) plus the hand skeletons */
        let mut preview = match camera.as_mut().map(|cam| cam.next_frame()) {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                warn!("{e}");
                camera = None;
                session.stop(&mut hud);
                session.status(&mut hud, &format!("Camera failed: {e}"));
                FrameBuffer::filled(fw, fh, Rgb::BLACK)
            }
            None => FrameBuffer::filled(fw, fh, Rgb::BLACK),
        };
        for (hand, label) in &overlay {
            draw_hand(&mut preview, hand);
            draw_hand_label(&mut preview, hand, label);
        }

        /* 5) Present both windows */
        hud.compose(canvas.frame(), &mut screen, session.brush.size(), session.brush.color);
        page.present(&screen)?;
        preview_win.present(&preview)?;
    }

    info!("bye");
    Ok(())
}

/// Open the preview camera unless it is disabled or a detector owns it.
/// Failure is shown to the user, not fatal.
fn start_camera(config: &Config, session: &Session, ui: &mut dyn Ui) -> Option<CameraCapture> {
    if !config.preview_camera_enabled() {
        return None;
    }
    let (w, h) = (config.tracking.frame_width as u32, config.tracking.frame_height as u32);
    match CameraCapture::open(config.camera.index, w, h) {
        Ok(cam) => {
            session.status(ui, "Camera started");
            Some(cam)
        }
        Err(e) => {
            warn!("{e}");
            session.status(ui, &format!("Camera failed: {e}"));
            None
        }
    }
}
