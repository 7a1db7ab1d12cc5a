// Core types shared by the gesture pipeline and the window layer.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/* ------------------------------ pixels ------------------------------ */

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer filled with one color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self { width, height, pixels: vec![color.to_u32(); width * height] }
    }
}

/// 8-bit RGB color. Parses from and prints as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn from_u32(px: u32) -> Self {
        Self::new(((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Config(format!("invalid color {s:?}, expected #rrggbb")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| Error::Config(format!("invalid color {s:?}: {e}")))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/* ------------------------------ landmarks ------------------------------ */

pub const LANDMARK_COUNT: usize = 21;

/// One tracked point, normalized to the tracking frame. `z` is relative depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Exactly 21 landmarks in the standard hand order, with x and y inside [0,1].
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Validate raw detector output. A bad set is rejected as a whole.
    pub fn new(raw: &[Landmark]) -> Result<Self, Error> {
        let points: [Landmark; LANDMARK_COUNT] = raw.try_into().map_err(|_| {
            Error::MalformedLandmarks(format!(
                "expected {LANDMARK_COUNT} landmarks, got {}",
                raw.len()
            ))
        })?;
        for (i, p) in points.iter().enumerate() {
            let in_range = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
            if !in_range(p.x) || !in_range(p.y) {
                return Err(Error::MalformedLandmarks(format!(
                    "landmark {i} out of range: ({}, {})",
                    p.x, p.y
                )));
            }
        }
        Ok(Self { points })
    }

    pub fn get(&self, index: usize) -> &Landmark {
        &self.points[index]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

/// Extended (true) or folded (false) per finger: thumb, index, middle, ring, pinky.
pub type FingerState = [bool; 5];

/* ------------------------------ points ------------------------------ */

/// Camera / tracking frame pixels (640x480 by default).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSpace;

/// Drawing surface pixels (800x600 by default).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSpace;

/// A 2D point tagged with the coordinate space it lives in.
/// Only `mapper` converts between spaces.
#[derive(Debug, PartialEq)]
pub struct Point<S> {
    pub x: f32,
    pub y: f32,
    space: PhantomData<S>,
}

impl<S> Point<S> {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, space: PhantomData }
    }
}

// Manual impls so the marker type does not need to be Copy.
impl<S> Clone for Point<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Point<S> {}

/* ------------------------------ brush ------------------------------ */

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 50;

/// Brush settings changed by the UI and read by the stroke engine on every emit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    size: u32,
    pub color: Rgb,
}

impl Brush {
    pub fn new(size: u32, color: Rgb) -> Self {
        Self { size: size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE), color }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Line width in surface pixels.
    pub fn width(&self) -> f32 {
        self.size as f32
    }

    /// Set the size, clamped to the UI range. Returns the stored value.
    pub fn set_size(&mut self, size: u32) -> u32 {
        self.size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        self.size
    }

    pub fn grow(&mut self, step: i32) -> u32 {
        let next = (self.size as i64 + step as i64).max(0) as u32;
        self.set_size(next)
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(10, Rgb::new(0xFF, 0x00, 0x00))
    }
}
