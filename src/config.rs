// Settings loaded from `gesture-canvas.toml`. Every field has a default, so a
// missing file or a partial one still gives a usable setup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Error;
use crate::types::{Brush, Rgb, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub tracking: TrackingConfig,
    pub brush: BrushConfig,
    pub camera: CameraConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
    pub background: Rgb,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: 800, height: 600, background: Rgb::WHITE }
    }
}

/// Tracking frame size plus detector options. The thresholds are handed to the
/// detector as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub frame_width: usize,
    pub frame_height: usize,
    pub max_num_hands: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            frame_width: 640,
            frame_height: 480,
            max_num_hands: 2,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub size: u32,
    pub color: Rgb,
}

impl Default for BrushConfig {
    fn default() -> Self {
        let brush = Brush::default();
        Self { size: brush.size(), color: brush.color }
    }
}

impl BrushConfig {
    pub fn to_brush(&self) -> Brush {
        Brush::new(self.size, self.color)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub enabled: bool,
    pub index: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { enabled: true, index: 0 }
    }
}

/// Where landmark frames come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// JSON-lines file to replay, or "-" for stdin.
    pub path: Option<PathBuf>,
    /// Detector program to spawn; its stdout is read as JSON lines.
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults when it is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Whether the preview window may open the camera itself. A spawned
    /// detector owns the device, so the preview stays dark while one is configured.
    pub fn preview_camera_enabled(&self) -> bool {
        self.camera.enabled && self.feed.command.is_none()
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(Error::Config("canvas size must be non-zero".into()));
        }
        let t = &self.tracking;
        if t.frame_width == 0 || t.frame_height == 0 {
            return Err(Error::Config("tracking frame size must be non-zero".into()));
        }
        for (name, v) in [
            ("min_detection_confidence", t.min_detection_confidence),
            ("min_tracking_confidence", t.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::Config(format!("{name} must be in [0, 1], got {v}")));
            }
        }
        if t.max_num_hands == 0 {
            return Err(Error::Config("max_num_hands must be at least 1".into()));
        }
        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&self.brush.size) {
            return Err(Error::Config(format!(
                "brush size must be in {MIN_BRUSH_SIZE}..={MAX_BRUSH_SIZE}, got {}",
                self.brush.size
            )));
        }
        if self.feed.path.is_some() && self.feed.command.is_some() {
            return Err(Error::Config("feed.path and feed.command are mutually exclusive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!((c.canvas.width, c.canvas.height), (800, 600));
        assert_eq!((c.tracking.frame_width, c.tracking.frame_height), (640, 480));
        assert_eq!(c.brush.size, 10);
        assert_eq!(c.brush.color, Rgb::new(255, 0, 0));
        assert_eq!(c.canvas.background, Rgb::WHITE);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_detector_command_takes_the_camera() {
        let mut c = Config::default();
        assert!(c.preview_camera_enabled());

        c.feed.command = Some("hand-detector".into());
        assert!(!c.preview_camera_enabled());

        c.feed.command = None;
        c.feed.path = Some(PathBuf::from("frames.jsonl"));
        assert!(c.preview_camera_enabled());

        c.camera.enabled = false;
        assert!(!c.preview_camera_enabled());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let f = write_config(
            r##"
[brush]
size = 25
color = "#00ff00"

[tracking]
min_detection_confidence = 0.7
"##,
        );
        let c = Config::load(f.path()).unwrap();
        assert_eq!(c.brush.size, 25);
        assert_eq!(c.brush.color, Rgb::new(0, 255, 0));
        assert_eq!(c.tracking.min_detection_confidence, 0.7);
        assert_eq!(c.tracking.min_tracking_confidence, 0.5);
        assert_eq!(c.canvas.width, 800);
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let f = write_config("[tracking]\nmin_tracking_confidence = 1.5\n");
        assert!(matches!(Config::load(f.path()), Err(Error::Config(_))));

        let f = write_config("[brush]\nsize = 0\n");
        assert!(Config::load(f.path()).is_err());

        let f = write_config("[canvas]\nbackground = \"white\"\n");
        assert!(Config::load(f.path()).is_err());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let c = Config::load_or_default("/nonexistent/gesture-canvas.toml");
        assert_eq!(c, Config::default());
    }

    #[test]
    fn test_strict_load_reports_missing_and_bad_files() {
        let err = Config::load("/nonexistent/custom.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/custom.toml"), "{err}");

        // same bad file: strict load fails, the lenient one falls back
        let f = write_config("[canvas]\nwidth = \"wide\"\n");
        assert!(matches!(Config::load(f.path()), Err(Error::Config(_))));
        assert_eq!(Config::load_or_default(f.path()), Config::default());
    }

    #[test]
    fn test_feed_sources_are_exclusive() {
        let f = write_config("[feed]\npath = \"hands.jsonl\"\ncommand = \"detector\"\n");
        assert!(Config::load(f.path()).is_err());
    }
}
