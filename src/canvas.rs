// Software drawing surface backed by a FrameBuffer.
// Visual: this is the white page you paint on in the drawing window.

use crate::surface::{LineCap, Surface};
use crate::types::{FrameBuffer, Point, Rgb, SurfaceSpace};

pub struct Canvas {
    fb: FrameBuffer,
    background: Rgb,
}

impl Canvas {
    /// A blank page of the given size.
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self { fb: FrameBuffer::filled(width, height, background), background }
    }

    /// Pixels ready for `Drawer::present`.
    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.fb.width && y < self.fb.height)
            .then(|| Rgb::from_u32(self.fb.pixels[y * self.fb.width + x]))
    }

    /// Set every in-bounds pixel of the box [x0,x1]x[y0,y1] for which `inside` holds.
    /// Pixel centers sit at +0.5.
    fn fill_where(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u32, inside: impl Fn(f32, f32) -> bool) {
        let (w, h) = (self.fb.width as i64, self.fb.height as i64);
        let xs = (x0.floor() as i64).max(0)..=(x1.ceil() as i64).min(w - 1);
        let ys = (y0.floor() as i64).max(0)..=(y1.ceil() as i64).min(h - 1);
        for y in ys {
            for x in xs.clone() {
                if inside(x as f32 + 0.5, y as f32 + 0.5) {
                    self.fb.pixels[y as usize * self.fb.width + x as usize] = color;
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> (usize, usize) {
        (self.fb.width, self.fb.height)
    }

    fn background(&self) -> Rgb {
        self.background
    }

    /// Thick line. Round caps give a capsule, so back-to-back segments leave no gaps.
    fn draw_segment(
        &mut self,
        from: Point<SurfaceSpace>,
        to: Point<SurfaceSpace>,
        width: f32,
        color: Rgb,
        cap: LineCap,
    ) {
        let half = (width / 2.0).max(0.5);
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            // zero length: a round cap is still a dot, a butt cap draws nothing
            if cap == LineCap::Round {
                self.fill_circle(from, half, color);
            }
            return;
        }

        let pad = half + 1.0;
        let inside = move |px: f32, py: f32| {
            // projection of the pixel center onto the segment, as a fraction of its length
            let t = ((px - from.x) * dx + (py - from.y) * dy) / len2;
            let t = match cap {
                LineCap::Round => t.clamp(0.0, 1.0),
                LineCap::Butt if !(0.0..=1.0).contains(&t) => return false,
                LineCap::Butt => t,
            };
            let (cx, cy) = (from.x + t * dx - px, from.y + t * dy - py);
            cx * cx + cy * cy <= half * half
        };
        self.fill_where(
            from.x.min(to.x) - pad,
            from.y.min(to.y) - pad,
            from.x.max(to.x) + pad,
            from.y.max(to.y) + pad,
            color.to_u32(),
            inside,
        );
    }

    fn fill_circle(&mut self, center: Point<SurfaceSpace>, radius: f32, color: Rgb) {
        let r = radius.max(0.5);
        let r2 = r * r;
        self.fill_where(
            center.x - r,
            center.y - r,
            center.x + r,
            center.y + r,
            color.to_u32(),
            move |px, py| {
                let (dx, dy) = (px - center.x, py - center.y);
                dx * dx + dy * dy <= r2
            },
        );
    }

    fn fill_all(&mut self, color: Rgb) {
        self.fb.pixels.fill(color.to_u32());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn p(x: f32, y: f32) -> Point<SurfaceSpace> {
        Point::new(x, y)
    }

    fn painted(c: &Canvas) -> usize {
        c.frame().pixels.iter().filter(|&&px| px != Rgb::WHITE.to_u32()).count()
    }

    #[test]
    fn test_new_canvas_is_background() {
        let c = Canvas::new(20, 10, Rgb::WHITE);
        assert_eq!(c.size(), (20, 10));
        assert_eq!(painted(&c), 0);
    }

    #[test]
    fn test_segment_covers_its_path() {
        let mut c = Canvas::new(100, 100, Rgb::WHITE);
        c.draw_segment(p(10.0, 50.0), p(90.0, 50.0), 6.0, RED, LineCap::Round);
        for x in 10..90 {
            assert_eq!(c.pixel(x, 50), Some(RED), "x={x}");
        }
        assert_eq!(c.pixel(50, 40), Some(Rgb::WHITE));
    }

    #[test]
    fn test_round_cap_extends_past_end_butt_does_not() {
        let mut round = Canvas::new(100, 100, Rgb::WHITE);
        round.draw_segment(p(20.0, 50.0), p(80.0, 50.0), 10.0, RED, LineCap::Round);
        assert_eq!(round.pixel(83, 50), Some(RED));

        let mut butt = Canvas::new(100, 100, Rgb::WHITE);
        butt.draw_segment(p(20.0, 50.0), p(80.0, 50.0), 10.0, RED, LineCap::Butt);
        assert_eq!(butt.pixel(83, 50), Some(Rgb::WHITE));
        assert_eq!(butt.pixel(50, 50), Some(RED));
    }

    #[test]
    fn test_chained_segments_have_no_gap_at_joint() {
        let mut c = Canvas::new(100, 100, Rgb::WHITE);
        c.draw_segment(p(10.0, 10.0), p(50.0, 50.0), 4.0, RED, LineCap::Round);
        c.draw_segment(p(50.0, 50.0), p(90.0, 10.0), 4.0, RED, LineCap::Round);
        assert_eq!(c.pixel(50, 50), Some(RED));
        assert_eq!(c.pixel(49, 49), Some(RED));
        assert_eq!(c.pixel(51, 49), Some(RED));
    }

    #[test]
    fn test_circle_radius() {
        let mut c = Canvas::new(50, 50, Rgb::WHITE);
        c.fill_circle(p(25.0, 25.0), 5.0, RED);
        assert_eq!(c.pixel(25, 25), Some(RED));
        assert_eq!(c.pixel(28, 25), Some(RED));
        assert_eq!(c.pixel(31, 25), Some(Rgb::WHITE));
    }

    #[test]
    fn test_off_canvas_drawing_is_clipped() {
        let mut c = Canvas::new(10, 10, Rgb::WHITE);
        c.fill_circle(p(-50.0, -50.0), 5.0, RED);
        c.draw_segment(p(-20.0, 5.0), p(30.0, 5.0), 2.0, RED, LineCap::Round);
        assert_eq!(c.pixel(0, 5), Some(RED));
        assert_eq!(c.pixel(9, 5), Some(RED));
        assert_eq!(c.pixel(10, 5), None);
    }

    #[test]
    fn test_fill_all_resets_everything() {
        let mut c = Canvas::new(10, 10, Rgb::WHITE);
        c.fill_circle(p(5.0, 5.0), 3.0, RED);
        assert!(painted(&c) > 0);
        c.fill_all(Rgb::WHITE);
        assert_eq!(painted(&c), 0);
    }

    #[test]
    fn test_zero_length_round_segment_is_a_dot() {
        let mut c = Canvas::new(20, 20, Rgb::WHITE);
        c.draw_segment(p(10.0, 10.0), p(10.0, 10.0), 6.0, RED, LineCap::Round);
        assert_eq!(c.pixel(10, 10), Some(RED));
    }
}
