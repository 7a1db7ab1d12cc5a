// Rescale points between the tracking frame and the drawing surface.
// Each axis scales on its own; differing aspect ratios stretch the drawing.

use crate::error::Error;
use crate::types::{FrameSpace, Point, SurfaceSpace};

pub fn map_to_surface(
    point: Point<FrameSpace>,
    from_width: f32,
    from_height: f32,
    to_width: f32,
    to_height: f32,
) -> Point<SurfaceSpace> {
    Point::new(point.x / from_width * to_width, point.y / from_height * to_height)
}

/// Both fixed sizes, held together so callers cannot swap them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    frame: (f32, f32),
    surface: (f32, f32),
}

impl CoordinateMapper {
    pub fn new(frame: (usize, usize), surface: (usize, usize)) -> Result<Self, Error> {
        if frame.0 == 0 || frame.1 == 0 || surface.0 == 0 || surface.1 == 0 {
            return Err(Error::Config(format!(
                "frame {}x{} and surface {}x{} must be non-empty",
                frame.0, frame.1, surface.0, surface.1
            )));
        }
        Ok(Self {
            frame: (frame.0 as f32, frame.1 as f32),
            surface: (surface.0 as f32, surface.1 as f32),
        })
    }

    pub fn frame_size(&self) -> (f32, f32) {
        self.frame
    }

    pub fn to_surface(&self, p: Point<FrameSpace>) -> Point<SurfaceSpace> {
        map_to_surface(p, self.frame.0, self.frame.1, self.surface.0, self.surface.1)
    }

    pub fn to_frame(&self, p: Point<SurfaceSpace>) -> Point<FrameSpace> {
        Point::new(
            p.x / self.surface.0 * self.frame.0,
            p.y / self.surface.1 * self.frame.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_origin_maps_to_origin() {
        let p = map_to_surface(Point::new(0.0, 0.0), 640.0, 480.0, 800.0, 600.0);
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn test_far_corner_maps_to_far_corner() {
        let p = map_to_surface(Point::new(640.0, 480.0), 640.0, 480.0, 800.0, 600.0);
        assert_eq!((p.x, p.y), (800.0, 600.0));
    }

    #[test]
    fn test_axes_scale_independently() {
        // 4:3 onto 2:1, x stretches more than y
        let p = map_to_surface(Point::new(320.0, 240.0), 640.0, 480.0, 1000.0, 500.0);
        assert!((p.x - 500.0).abs() < EPS);
        assert!((p.y - 250.0).abs() < EPS);
    }

    #[test]
    fn test_map_and_back_is_identity() {
        let mapper = CoordinateMapper::new((640, 480), (800, 600)).unwrap();
        for &(x, y) in &[(0.0, 0.0), (13.7, 401.2), (639.9, 0.5), (320.0, 240.0)] {
            let back = mapper.to_frame(mapper.to_surface(Point::new(x, y)));
            assert!((back.x - x).abs() < EPS && (back.y - y).abs() < EPS, "({x},{y})");
        }
    }

    #[test]
    fn test_rejects_empty_sizes() {
        assert!(CoordinateMapper::new((0, 480), (800, 600)).is_err());
        assert!(CoordinateMapper::new((640, 480), (800, 0)).is_err());
    }
}
