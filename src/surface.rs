// Seams to the outside world: the render target the stroke engine draws on,
// and the UI that shows mode changes and status text.

use crate::mode::Mode;
use crate::types::{Point, Rgb, SurfaceSpace};

/// How the ends of a segment are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    /// Half a disc past each end point; consecutive segments join seamlessly.
    Round,
    /// Flat end exactly at the end point.
    Butt,
}

/// A fixed-size drawing surface that accepts stroke primitives.
pub trait Surface {
    /// (width, height) in surface pixels.
    fn size(&self) -> (usize, usize);

    /// Color used by the eraser and by full clears.
    fn background(&self) -> Rgb;

    fn draw_segment(
        &mut self,
        from: Point<SurfaceSpace>,
        to: Point<SurfaceSpace>,
        width: f32,
        color: Rgb,
        cap: LineCap,
    );

    fn fill_circle(&mut self, center: Point<SurfaceSpace>, radius: f32, color: Rgb);

    fn fill_all(&mut self, color: Rgb);
}

/// Receives notifications meant for the user. Nothing in the core reads them back.
pub trait Ui {
    fn mode_changed(&mut self, mode: Mode);
    fn status(&mut self, message: &str);
}
