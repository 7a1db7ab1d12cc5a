// Finger extension and palm center from a validated landmark set.
//
// Image y grows downward, so "above" means a smaller y. Only vertical
// positions are compared: a hand held sideways or upside down reads wrong.

use crate::types::{FingerState, FrameSpace, LandmarkSet, Point};

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// (tip, pip) for index, middle, ring, pinky.
const FINGER_JOINTS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Wrist plus the base of every finger.
pub const PALM_POINTS: [usize; 6] = [WRIST, THUMB_CMC, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

/// Bones drawn by the hand preview overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (WRIST, PINKY_MCP),
];

/// Which fingers are extended.
///
/// The thumb compares its tip against the IP joint; the other four compare the
/// tip against the PIP joint.
pub fn fingers_up(hand: &LandmarkSet) -> FingerState {
    let above = |tip: usize, joint: usize| hand.get(tip).y < hand.get(joint).y;

    let mut fingers = [false; 5];
    fingers[0] = above(THUMB_TIP, THUMB_IP);
    for (i, &(tip, pip)) in FINGER_JOINTS.iter().enumerate() {
        fingers[i + 1] = above(tip, pip);
    }
    fingers
}

/// Mean of the palm landmarks, in tracking-frame pixels.
pub fn hand_center(hand: &LandmarkSet, frame_width: f32, frame_height: f32) -> Point<FrameSpace> {
    let (sum_x, sum_y) = PALM_POINTS.iter().fold((0.0f32, 0.0f32), |(sx, sy), &i| {
        let lm = hand.get(i);
        (sx + lm.x * frame_width, sy + lm.y * frame_height)
    });
    let n = PALM_POINTS.len() as f32;
    Point::new(sum_x / n, sum_y / n)
}
