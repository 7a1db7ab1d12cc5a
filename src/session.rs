// One tracking session: mode, pens and brush, and the per-frame pipeline
// that runs every detected hand through geometry, classification, mode,
// mapping and the stroke engine.
//
// `process_frame` borrows the session mutably, so frames are handled strictly
// one at a time. Hands in a frame are handled in detector order, each on its
// own, and all of them share the same pens.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::geometry::{fingers_up, hand_center};
use crate::gesture::{classify, Gesture};
use crate::mapper::CoordinateMapper;
use crate::mode::{Mode, ModeState};
use crate::stroke::{StrokeAction, StrokeEngine, Tool};
use crate::surface::{Surface, Ui};
use crate::types::{Brush, Landmark, LandmarkSet, Point, SurfaceSpace};

pub const STATUS_READY: &str = "Ready! Make peace sign to start drawing";
pub const STATUS_CLEARED: &str = "Canvas cleared!";

/// Outcome for one hand of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandResult {
    pub gesture: Gesture,
    pub point: Point<SurfaceSpace>,
    pub action: StrokeAction,
}

pub struct Session {
    mode: ModeState,
    strokes: StrokeEngine,
    pub brush: Brush,
    mapper: CoordinateMapper,
    last_gesture: Option<Gesture>,
    tracking: bool,
}

impl Session {
    /// Fails when the configured sizes cannot form a mapping.
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        let mapper = CoordinateMapper::new(
            (config.tracking.frame_width, config.tracking.frame_height),
            (config.canvas.width, config.canvas.height),
        )?;
        Ok(Self {
            mode: ModeState::new(),
            strokes: StrokeEngine::new(),
            brush: config.brush.to_brush(),
            mapper,
            last_gesture: None,
            tracking: true,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode.current()
    }

    pub fn strokes(&self) -> &StrokeEngine {
        &self.strokes
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Pause or resume gesture tracking (the camera toggle).
    /// Pausing lifts both pens and goes Inactive; resuming starts from a fresh
    /// session so no pen-down state survives the gap.
    pub fn set_tracking(&mut self, on: bool, ui: &mut dyn Ui) {
        if self.tracking == on {
            return;
        }
        info!(on, "tracking");
        if on {
            self.reset();
        } else {
            self.stop(ui);
        }
        self.tracking = on;
    }

    /// Run every hand of one tracker frame through the pipeline.
    ///
    /// Malformed hands are logged and skipped without touching pen state.
    /// While tracking is paused frames are dropped untouched.
    pub fn process_frame(
        &mut self,
        hands: &[Vec<Landmark>],
        surface: &mut dyn Surface,
        ui: &mut dyn Ui,
    ) -> Vec<HandResult> {
        if !self.tracking {
            debug!(hands = hands.len(), "tracking paused, frame dropped");
            return Vec::new();
        }
        let mut results = Vec::with_capacity(hands.len());
        for (i, raw) in hands.iter().enumerate() {
            match LandmarkSet::new(raw) {
                Ok(hand) => results.push(self.process_hand(&hand, surface, ui)),
                Err(e) => warn!(hand = i, "skipping hand: {e}"),
            }
        }
        results
    }

    pub fn process_hand(
        &mut self,
        hand: &LandmarkSet,
        surface: &mut dyn Surface,
        ui: &mut dyn Ui,
    ) -> HandResult {
        let (fw, fh) = self.mapper.frame_size();
        let gesture = classify(fingers_up(hand));
        let point = self.mapper.to_surface(hand_center(hand, fw, fh));

        if self.last_gesture != Some(gesture) {
            debug!(gesture = gesture.as_str(), x = point.x, y = point.y, "gesture");
            self.last_gesture = Some(gesture);
        }

        // None leaves the mode alone; the pens still lift below
        if let Some(mode) = mode_for(gesture) {
            self.mode.set_mode(mode, ui);
        }
        let action = self.strokes.apply(gesture, point, &self.brush, surface);
        if action == StrokeAction::Cleared {
            self.status(ui, STATUS_CLEARED);
        }
        HandResult { gesture, point, action }
    }

    /* ---------- manual (mouse) drawing, already in surface space ---------- */

    pub fn mouse_down(&mut self, point: Point<SurfaceSpace>, ui: &mut dyn Ui) {
        self.mode.set_mode(Mode::Drawing, ui);
        self.strokes.pen_down(Tool::Draw, point);
    }

    pub fn mouse_move(&mut self, point: Point<SurfaceSpace>, surface: &mut dyn Surface) {
        self.strokes.pen_move(Tool::Draw, point, &self.brush, surface);
    }

    pub fn mouse_up(&mut self) {
        self.strokes.pen_up(Tool::Draw);
    }

    /* ---------- controls ---------- */

    /// The clear control: wipe the page, keep mode and pens.
    pub fn clear(&mut self, surface: &mut dyn Surface, ui: &mut dyn Ui) {
        let bg = surface.background();
        surface.fill_all(bg);
        self.status(ui, STATUS_CLEARED);
    }

    /// Lift both pens and go Inactive. Used when the tracker stops or fails.
    pub fn stop(&mut self, ui: &mut dyn Ui) {
        self.strokes.stop();
        self.mode.set_mode(Mode::Inactive, ui);
    }

    /// Fresh session state without notifying the UI.
    pub fn reset(&mut self) {
        self.strokes.stop();
        self.mode.reset();
        self.last_gesture = None;
    }

    pub fn status(&self, ui: &mut dyn Ui, message: &str) {
        info!("status: {message}");
        ui.status(message);
    }
}

/// Mode each gesture switches to. `None` means the gesture does not touch the mode.
pub fn mode_for(gesture: Gesture) -> Option<Mode> {
    match gesture {
        Gesture::PeaceSign | Gesture::Pointing => Some(Mode::Drawing),
        Gesture::Fist => Some(Mode::Erasing),
        Gesture::ThumbsUp | Gesture::OpenPalm => Some(Mode::Inactive),
        Gesture::None => None,
    }
}
