// Hand-gesture drawing: landmark frames in, strokes on a canvas out.
//
// Per frame and per hand: geometry reads which fingers are up, gesture names
// the pose, mode tracks the interaction mode, mapper moves the palm center onto
// the canvas and stroke draws. session::Session ties the stages together.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod feed;
pub mod geometry;
pub mod gesture;
pub mod mapper;
pub mod mode;
pub mod session;
pub mod stroke;
pub mod surface;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod types;

pub use error::Error;
