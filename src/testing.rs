// Test doubles: a surface and a UI that record every call, and builders for
// synthetic hands. Built for unit tests and behind the `test-support` feature.

use crate::geometry::{
    INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_IP, THUMB_TIP,
};
use crate::mode::Mode;
use crate::surface::{LineCap, Surface, Ui};
use crate::types::{FingerState, Landmark, LandmarkSet, Point, Rgb, SurfaceSpace, LANDMARK_COUNT};

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Segment {
        from: Point<SurfaceSpace>,
        to: Point<SurfaceSpace>,
        width: f32,
        color: Rgb,
        cap: LineCap,
    },
    Circle {
        center: Point<SurfaceSpace>,
        radius: f32,
        color: Rgb,
    },
    Fill {
        color: Rgb,
    },
}

/// Remembers every primitive instead of rasterizing it.
#[derive(Debug)]
pub struct RecordingSurface {
    pub width: usize,
    pub height: usize,
    pub background: Rgb,
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, background: Rgb::WHITE, ops: Vec::new() }
    }

    /// Just the segment end points, in order.
    pub fn segments(&self) -> Vec<(Point<SurfaceSpace>, Point<SurfaceSpace>)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Segment { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn background(&self) -> Rgb {
        self.background
    }

    fn draw_segment(
        &mut self,
        from: Point<SurfaceSpace>,
        to: Point<SurfaceSpace>,
        width: f32,
        color: Rgb,
        cap: LineCap,
    ) {
        self.ops.push(Op::Segment { from, to, width, color, cap });
    }

    fn fill_circle(&mut self, center: Point<SurfaceSpace>, radius: f32, color: Rgb) {
        self.ops.push(Op::Circle { center, radius, color });
    }

    fn fill_all(&mut self, color: Rgb) {
        self.ops.push(Op::Fill { color });
    }
}

#[derive(Debug, Default)]
pub struct RecordingUi {
    pub modes: Vec<Mode>,
    pub statuses: Vec<String>,
}

impl Ui for RecordingUi {
    fn mode_changed(&mut self, mode: Mode) {
        self.modes.push(mode);
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }
}

/// Raw landmarks for a hand whose palm (and every unset point) sits at normalized (`cx`, `cy`) and
/// whose fingers read as `fingers`.
pub fn raw_hand_at(fingers: FingerState, cx: f32, cy: f32) -> Vec<Landmark> {
    let mut raw = vec![Landmark::new(cx, cy, 0.0); LANDMARK_COUNT];

    // joints sit a little above the palm; tips either above (up) or below (down)
    let joints = [
        (THUMB_TIP, THUMB_IP),
        (INDEX_TIP, INDEX_PIP),
        (MIDDLE_TIP, MIDDLE_PIP),
        (RING_TIP, RING_PIP),
        (PINKY_TIP, PINKY_PIP),
    ];
    let joint_y = (cy - 0.05).max(0.05);
    for (&(tip, joint), &up) in joints.iter().zip(fingers.iter()) {
        raw[joint].y = joint_y;
        raw[tip].y = if up { joint_y - 0.04 } else { joint_y + 0.04 };
    }
    raw
}

pub fn hand_at(fingers: FingerState, cx: f32, cy: f32) -> LandmarkSet {
    LandmarkSet::new(&raw_hand_at(fingers, cx, cy)).expect("synthetic hand is valid")
}

pub fn hand_with(fingers: FingerState) -> LandmarkSet {
    hand_at(fingers, 0.5, 0.6)
}

pub const PEACE: FingerState = [false, true, true, false, false];
pub const FIST: FingerState = [false; 5];
pub const THUMBS_UP: FingerState = [true, false, false, false, false];
pub const OPEN_PALM: FingerState = [true; 5];
pub const POINTING: FingerState = [false, true, false, false, false];
