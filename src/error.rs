// Crate error type. Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),   // Creating a window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating a window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String),   // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String),  // Grabbing/decoding a frame failed
    #[error("Config error: {0}")]
    Config(String),       // Bad or unreadable configuration
    #[error("Landmark feed error: {0}")]
    Feed(String),         // Starting or reading the landmark feed failed
    #[error("Malformed landmarks: {0}")]
    MalformedLandmarks(String), // A hand failed validation; the frame skips it
}
