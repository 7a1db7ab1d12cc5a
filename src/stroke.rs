// Turns a per-frame stream of (gesture, point) into strokes on a surface.
//
// Continuity comes from the anchor: every segment starts where the previous
// one ended. The first frame of a gesture only sets the anchor, so a stroke
// never jumps from wherever the pen was last lifted.

use tracing::debug;

use crate::gesture::Gesture;
use crate::surface::{LineCap, Surface};
use crate::types::{Brush, Point, SurfaceSpace};

/// Eraser strokes are this many times wider than the brush.
pub const ERASER_SCALE: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
    Draw,
    Erase,
}

/// Pen-down flag and continuity anchor for one tool.
/// `last` is only meaningful while `active` is true.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PenState {
    pub active: bool,
    pub last: Point<SurfaceSpace>,
}

impl Default for PenState {
    fn default() -> Self {
        Self { active: false, last: Point::new(0.0, 0.0) }
    }
}

/// What `StrokeEngine::apply` did with a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeAction {
    /// First frame of a stroke: anchor recorded, nothing drawn.
    PenDown(Tool),
    /// Segment from the old anchor to the new point.
    Segment(Tool),
    /// Single dot.
    Dot,
    /// Whole surface reset to the background.
    Cleared,
    /// Both pens lifted.
    Stopped,
}

/// Pen state for the draw and erase tools.
///
/// The two tools are tracked independently and nothing here stops both from
/// being down at once. Within one hand only one tool is fed per frame because
/// the classifier yields a single gesture; two hands giving different gestures
/// can leave both tools active.
#[derive(Debug, Default)]
pub struct StrokeEngine {
    draw: PenState,
    erase: PenState,
}

impl StrokeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pen(&self, tool: Tool) -> &PenState {
        match tool {
            Tool::Draw => &self.draw,
            Tool::Erase => &self.erase,
        }
    }

    fn pen_mut(&mut self, tool: Tool) -> &mut PenState {
        match tool {
            Tool::Draw => &mut self.draw,
            Tool::Erase => &mut self.erase,
        }
    }

    pub fn is_active(&self, tool: Tool) -> bool {
        self.pen(tool).active
    }

    /// Dispatch one classified frame. `point` must already be in surface space.
    pub fn apply(
        &mut self,
        gesture: Gesture,
        point: Point<SurfaceSpace>,
        brush: &Brush,
        surface: &mut dyn Surface,
    ) -> StrokeAction {
        match gesture {
            Gesture::PeaceSign => self.stroke_to(Tool::Draw, point, brush, surface),
            Gesture::Fist => self.stroke_to(Tool::Erase, point, brush, surface),
            Gesture::ThumbsUp => {
                self.clear(surface);
                StrokeAction::Cleared
            }
            Gesture::Pointing => {
                surface.fill_circle(point, brush.width() / 2.0, brush.color);
                StrokeAction::Dot
            }
            Gesture::OpenPalm | Gesture::None => {
                self.stop();
                StrokeAction::Stopped
            }
        }
    }

    /// Extend `tool`'s stroke to `point`, or put the pen down if it was up.
    pub fn stroke_to(
        &mut self,
        tool: Tool,
        point: Point<SurfaceSpace>,
        brush: &Brush,
        surface: &mut dyn Surface,
    ) -> StrokeAction {
        if !self.pen(tool).active {
            self.pen_down(tool, point);
            return StrokeAction::PenDown(tool);
        }

        let (width, color) = match tool {
            Tool::Draw => (brush.width(), brush.color),
            Tool::Erase => (brush.width() * ERASER_SCALE, surface.background()),
        };
        let pen = self.pen_mut(tool);
        surface.draw_segment(pen.last, point, width, color, LineCap::Round);
        pen.last = point;
        StrokeAction::Segment(tool)
    }

    /// Start a stroke at `point` without drawing anything.
    pub fn pen_down(&mut self, tool: Tool, point: Point<SurfaceSpace>) {
        debug!(?tool, x = point.x, y = point.y, "pen down");
        *self.pen_mut(tool) = PenState { active: true, last: point };
    }

    /// Continue a stroke only if the pen is already down. Used by mouse drawing.
    pub fn pen_move(
        &mut self,
        tool: Tool,
        point: Point<SurfaceSpace>,
        brush: &Brush,
        surface: &mut dyn Surface,
    ) -> Option<StrokeAction> {
        self.is_active(tool).then(|| self.stroke_to(tool, point, brush, surface))
    }

    pub fn pen_up(&mut self, tool: Tool) {
        self.pen_mut(tool).active = false;
    }

    /// Lift both pens.
    pub fn stop(&mut self) {
        self.draw.active = false;
        self.erase.active = false;
    }

    /// Fill the surface with its background and lift both pens.
    pub fn clear(&mut self, surface: &mut dyn Surface) {
        let bg = surface.background();
        surface.fill_all(bg);
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Op, RecordingSurface};
    use crate::types::Rgb;

    fn p(x: f32, y: f32) -> Point<SurfaceSpace> {
        Point::new(x, y)
    }

    fn brush() -> Brush {
        Brush::new(10, Rgb::new(255, 0, 0))
    }

    #[test]
    fn test_three_peace_frames_emit_two_segments() {
        let mut engine = StrokeEngine::new();
        let mut surface = RecordingSurface::new(800, 600);
        let b = brush();

        assert_eq!(engine.apply(Gesture::PeaceSign, p(1.0, 1.0), &b, &mut surface), StrokeAction::PenDown(Tool::Draw));
        engine.apply(Gesture::PeaceSign, p(2.0, 2.0), &b, &mut surface);
        engine.apply(Gesture::PeaceSign, p(3.0, 3.0), &b, &mut surface);

        assert_eq!(surface.segments(), vec![(p(1.0, 1.0), p(2.0, 2.0)), (p(2.0, 2.0), p(3.0, 3.0))]);
        assert_eq!(
            surface.ops[0],
            Op::Segment { from: p(1.0, 1.0), to: p(2.0, 2.0), width: 10.0, color: b.color, cap: LineCap::Round }
        );
    }

    #[test]
    fn test_stop_between_strokes_forces_pen_down() {
        let mut engine = StrokeEngine::new();
        let mut surface = RecordingSurface::new(800, 600);
        let b = brush();

        engine.apply(Gesture::PeaceSign, p(10.0, 10.0), &b, &mut surface);
        engine.apply(Gesture::PeaceSign, p(20.0, 20.0), &b, &mut surface);
        engine.apply(Gesture::OpenPalm, p(300.0, 300.0), &b, &mut surface);
        engine.apply(Gesture::PeaceSign, p(500.0, 500.0), &b, &mut surface);

        assert_eq!(surface.segments(), vec![(p(10.0, 10.0), p(20.0, 20.0))]);
    }

    #[test]
    fn test_none_gesture_breaks_the_stroke() {
        let mut engine = StrokeEngine::new();
        let mut surface = RecordingSurface::new(800, 600);
        let b = brush();

        engine.apply(Gesture::PeaceSign, p(0.0, 0.0), &b, &mut surface);
        assert_eq!(engine.apply(Gesture::None, p(5.0, 5.0), &b, &mut surface), StrokeAction::Stopped);
        assert_eq!(
            engine.apply(Gesture::PeaceSign, p(9.0, 9.0), &b, &mut surface),
            StrokeAction::PenDown(Tool::Draw)
        );
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_erase_uses_background_at_double_width() {
        let mut engine = StrokeEngine::new();
        let mut surface = RecordingSurface::new(800, 600);
        let b = brush();

        engine.apply(Gesture::Fist, p(0.0, 0.0), &b, &mut surface);
        engine.apply(Gesture::Fist, p(4.0, 0.0), &b, &mut surface);

        assert_eq!(
            surface.ops,
            vec![Op::Segment { from: p(0.0, 0.0), to: p(4.0, 0.0), width: 20.0, color: Rgb::WHITE, cap: LineCap::Round }]
        );
        assert!(engine.is_active(Tool::Erase));
        assert!(!engine.is_active(Tool::Draw));
    }

    #[test]
    fn test_tools_keep_separate_anchors() {
        let mut engine = StrokeEngine::new();
        let mut surface = RecordingSurface::new(800, 600);
        let b = brush();

        engine.apply(Gesture::PeaceSign, p(1.0, 1.0), &b, &mut surface);
        engine.apply(Gesture::Fist, p(50.0, 50.0), &b, &mut surface);
        // draw still down and still anchored at its own point
        assert!(engine.is_active(Tool::Draw));
        engine.apply(Gesture::PeaceSign, p(2.0, 2.0), &b, &mut surface);
        assert_eq!(surface.segments(), vec![(p(1.0, 1.0), p(2.0, 2.0))]);
        assert_eq!(engine.pen(Tool::Erase).last, p(50.0, 50.0));
    }

    #[test]
    fn test_pointing_stamps_dot_without_moving_anchor() {
        let mut engine = StrokeEngine::new();
        let mut surface = RecordingSurface::new(800, 600);
        let b = brush();

        engine.apply(Gesture::PeaceSign, p(1.0, 1.0), &b, &mut surface);
        engine.apply(Gesture::Pointing, p(100.0, 100.0), &b, &mut surface);
        engine.apply(Gesture::PeaceSign, p(2.0, 2.0), &b, &mut surface);

        assert_eq!(surface.ops[0], Op::Circle { center: p(100.0, 100.0), radius: 5.0, color: b.color });
        assert_eq!(surface.segments(), vec![(p(1.0, 1.0), p(2.0, 2.0))]);
    }

    #[test]
    fn test_pointing_with_pen_up_stamps_dot_and_keeps_pen_up() {
        let mut engine = StrokeEngine::new();
        let mut surface = RecordingSurface::new(800, 600);
        let b = brush();

        assert_eq!(engine.apply(Gesture::Pointing, p(50.0, 60.0), &b, &mut surface), StrokeAction::Dot);
        assert!(!engine.is_active(Tool::Draw));

        // the following peace sign is a fresh pen-down, not a line from the dot
        assert_eq!(
            engine.apply(Gesture::PeaceSign, p(300.0, 300.0), &b, &mut surface),
            StrokeAction::PenDown(Tool::Draw)
        );
        assert_eq!(surface.ops, vec![Op::Circle { center: p(50.0, 60.0), radius: 5.0, color: b.color }]);
        assert!(surface.segments().is_empty());
    }

    #[test]
    fn test_thumbs_up_clears_and_lifts_both_pens() {
        let mut engine = StrokeEngine::new();
        let mut surface = RecordingSurface::new(800, 600);
        let b = brush();

        engine.apply(Gesture::PeaceSign, p(1.0, 1.0), &b, &mut surface);
        engine.apply(Gesture::Fist, p(1.0, 1.0), &b, &mut surface);
        assert_eq!(engine.apply(Gesture::ThumbsUp, p(9.0, 9.0), &b, &mut surface), StrokeAction::Cleared);

        assert_eq!(surface.ops, vec![Op::Fill { color: Rgb::WHITE }]);
        assert!(!engine.is_active(Tool::Draw));
        assert!(!engine.is_active(Tool::Erase));
    }

    #[test]
    fn test_brush_is_read_at_emit_time() {
        let mut engine = StrokeEngine::new();
        let mut surface = RecordingSurface::new(800, 600);
        let mut b = brush();

        engine.apply(Gesture::PeaceSign, p(0.0, 0.0), &b, &mut surface);
        b.set_size(3);
        b.color = Rgb::new(0, 0, 255);
        engine.apply(Gesture::PeaceSign, p(1.0, 0.0), &b, &mut surface);

        match &surface.ops[0] {
            Op::Segment { width, color, .. } => {
                assert_eq!(*width, 3.0);
                assert_eq!(*color, Rgb::new(0, 0, 255));
            }
            other => panic!("expected segment, got {other:?}"),
        }
    }

    #[test]
    fn test_pen_move_needs_pen_down() {
        let mut engine = StrokeEngine::new();
        let mut surface = RecordingSurface::new(800, 600);
        let b = brush();

        assert_eq!(engine.pen_move(Tool::Draw, p(1.0, 1.0), &b, &mut surface), None);
        engine.pen_down(Tool::Draw, p(1.0, 1.0));
        assert_eq!(engine.pen_move(Tool::Draw, p(2.0, 1.0), &b, &mut surface), Some(StrokeAction::Segment(Tool::Draw)));
        engine.pen_up(Tool::Draw);
        assert_eq!(engine.pen_move(Tool::Draw, p(3.0, 1.0), &b, &mut surface), None);
        assert_eq!(surface.segments().len(), 1);
    }
}
