// Window + software drawing utilities.
// Visual effects provided here:
// 1) Windows that show the drawing canvas and the camera/hand preview.
// 2) The hand skeleton drawn over the preview (green bones, red joints).
// 3) A tiny 5x7 bitmap font for the status bar above the canvas.

use crate::error::Error;
use crate::geometry::HAND_CONNECTIONS;
use crate::mode::Mode;
use crate::surface::Ui;
use crate::types::{FrameBuffer, LandmarkSet, Rgb};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Colors picked with keys 1..6.
pub const PALETTE: [Rgb; 6] = [
    Rgb::new(0xFF, 0x00, 0x00),
    Rgb::new(0x00, 0xAA, 0x00),
    Rgb::new(0x00, 0x55, 0xFF),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0xFF, 0x8C, 0x00),
    Rgb::new(0x8A, 0x2B, 0xE2),
];

const PALETTE_KEYS: [Key; 6] = [Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5, Key::Key6];

const BONE_COLOR: u32 = 0x00_00_FF_00;
const JOINT_COLOR: u32 = 0x00_FF_00_00;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window of the given size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, or None while the cursor is outside.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// C wipes the canvas.
    pub fn clear_pressed_once(&self) -> bool {
        self.pressed_once(Key::C)
    }

    /// V stops or restarts the camera.
    pub fn camera_toggle_pressed_once(&self) -> bool {
        self.pressed_once(Key::V)
    }

    /// +1 / -1 per press of Up/= or Down/-, 0 otherwise.
    pub fn brush_step(&self) -> i32 {
        let grow = self.window.is_key_pressed(Key::Up, KeyRepeat::Yes)
            || self.window.is_key_pressed(Key::Equal, KeyRepeat::Yes);
        let shrink = self.window.is_key_pressed(Key::Down, KeyRepeat::Yes)
            || self.window.is_key_pressed(Key::Minus, KeyRepeat::Yes);
        grow as i32 - shrink as i32
    }

    /// Palette color chosen this frame, if any.
    pub fn palette_pick(&self) -> Option<Rgb> {
        PALETTE_KEYS
            .iter()
            .position(|&k| self.pressed_once(k))
            .map(|i| PALETTE[i])
    }
}

/* ---------- Status bar ---------- */

/// Rows of the status bar. The page window is this much taller than the canvas.
pub const BAR_HEIGHT: usize = 12;

/// Bar color per mode style tag.
const MODE_STYLES: [(&str, u32); 3] = [
    ("mode drawing", 0x00_2E_7D_32),
    ("mode erasing", 0x00_C6_28_28),
    ("mode inactive", 0x00_42_42_42),
];

/// Window size for a canvas of `width` x `height`: the bar sits above the page.
pub fn screen_size(width: usize, height: usize) -> (usize, usize) {
    (width, height + BAR_HEIGHT)
}

/// Window mouse position to canvas pixels. None over the bar.
pub fn page_point((x, y): (f32, f32)) -> Option<(f32, f32)> {
    let y = y - BAR_HEIGHT as f32;
    (y >= 0.0).then_some((x, y))
}

/// What the status bar shows. Receives mode changes and status text from the core.
#[derive(Debug, Default)]
pub struct Hud {
    pub mode: Mode,
    pub status: String,
}

impl Ui for Hud {
    fn mode_changed(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn status(&mut self, message: &str) {
        self.status = message.to_string();
    }
}

impl Hud {
    fn mode_color(&self) -> u32 {
        let tag = self.mode.style_tag();
        MODE_STYLES
            .iter()
            .find(|(t, _)| *t == tag)
            .map_or(MODE_STYLES[2].1, |&(_, color)| color)
    }

    /// Draw the status bar into the top rows of `screen` and the canvas below it.
    /// `screen` must be `screen_size` of the canvas.
    /// Visual: a thin colored strip reading e.g. "DRAWING | BRUSH 10 | CANVAS CLEARED!"
    /// with the untouched page underneath.
    pub fn compose(&self, canvas: &FrameBuffer, screen: &mut FrameBuffer, brush_size: u32, brush_color: Rgb) {
        debug_assert_eq!((screen.width, screen.height), screen_size(canvas.width, canvas.height));
        let offset = BAR_HEIGHT * screen.width;
        screen.pixels[offset..offset + canvas.pixels.len()].copy_from_slice(&canvas.pixels);
        fill_rect(screen, 0, 0, screen.width as i32, BAR_HEIGHT as i32, self.mode_color());
        // brush swatch at the right end of the bar
        fill_rect(screen, screen.width as i32 - 14, 2, 10, 8, brush_color.to_u32());

        let text = format!("{} | BRUSH {} | {}", self.mode.label(), brush_size, self.status);
        draw_text_5x7(screen, 4, 3, &text, 0x00_FF_FF_FF);
    }
}

/* ---------- Hand preview ---------- */

/// Draw the skeleton of one hand over the preview frame.
/// Visual: green bones between joints, a red dot on each of the 21 landmarks.
pub fn draw_hand(fb: &mut FrameBuffer, hand: &LandmarkSet) {
    let (w, h) = (fb.width as f32, fb.height as f32);
    let px: Vec<(i32, i32)> = hand
        .points()
        .iter()
        .map(|l| ((l.x * w) as i32, (l.y * h) as i32))
        .collect();

    for &(a, b) in HAND_CONNECTIONS.iter() {
        let ((x0, y0), (x1, y1)) = (px[a], px[b]);
        // two passes one pixel apart for a 2px bone
        draw_line(fb, x0, y0, x1, y1, BONE_COLOR);
        draw_line(fb, x0 + 1, y0, x1 + 1, y1, BONE_COLOR);
    }
    for &(x, y) in &px {
        fill_disc(fb, x, y, 2, JOINT_COLOR);
    }
}

/// Label under the hand, e.g. "PEACE-SIGN".
pub fn draw_hand_label(fb: &mut FrameBuffer, hand: &LandmarkSet, label: &str) {
    let wrist = hand.get(crate::geometry::WRIST);
    let x = (wrist.x * fb.width as f32) as i32 - 3 * label.len() as i32;
    let y = (wrist.y * fb.height as f32) as i32 + 8;
    draw_text_5x7(fb, x, y, label, 0x00_FF_FF_FF);
}

/* ---------- Software drawing: pixels, lines, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
pub fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

fn fill_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, r: i32, color: u32) {
    for y in (cy - r)..=(cy + r) {
        for x in (cx - r)..=(cx + r) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    for yy in y..y + h {
        for xx in x..x + w {
            put_pixel(fb, xx, yy, color);
        }
    }
}

/* ---------- 5x7 bitmap font (uppercase ASCII, digits, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase maps to uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00110,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (offset, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; 6 pixels per character.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
