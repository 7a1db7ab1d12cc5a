// Landmark feed: JSON lines from a file, stdin, or a detector subprocess.
//
// Each line is one camera frame:
// `{"hands": [[{"x":0.41,"y":0.52,"z":-0.01}, ...21 points], ...]}`.
// A reader thread parses lines and hands frames to the UI loop through a
// bounded channel, so the loop sees them one at a time and a fast file replay
// cannot run ahead of it.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread::{self, JoinHandle};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{FeedConfig, TrackingConfig};
use crate::error::Error;
use crate::types::Landmark;

/// Frames buffered between the reader thread and the UI loop.
const CHANNEL_DEPTH: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    /// One frame: zero or more hands, each an unvalidated landmark list.
    Frame(Vec<Vec<Landmark>>),
    /// The detector reported a problem for this frame.
    Error(String),
    /// The source closed (EOF or the process exited).
    Ended,
}

#[derive(Debug, Deserialize)]
struct FrameJson {
    #[serde(default)]
    hands: Vec<Vec<Landmark>>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse one wire line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<TrackerEvent>, Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let frame: FrameJson =
        serde_json::from_str(line).map_err(|e| Error::Feed(format!("bad frame: {e}")))?;
    Ok(Some(match frame.error {
        Some(msg) => TrackerEvent::Error(msg),
        None => TrackerEvent::Frame(frame.hands),
    }))
}

pub struct LandmarkFeed {
    rx: Receiver<TrackerEvent>,
    reader: Option<JoinHandle<()>>,
    child: Option<Child>,
    ended: bool,
}

impl LandmarkFeed {
    /// Start the source described by `feed`. Returns `None` when no source is configured.
    pub fn from_config(feed: &FeedConfig, tracking: &TrackingConfig) -> Result<Option<Self>, Error> {
        if let Some(cmd) = &feed.command {
            return Self::spawn(cmd, &feed.args, tracking).map(Some);
        }
        match &feed.path {
            Some(path) if path.as_os_str() == "-" => Ok(Some(Self::from_reader(io::stdin(), "stdin"))),
            Some(path) => Self::open(path).map(Some),
            None => Ok(None),
        }
    }

    /// Replay a recorded JSON-lines file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Feed(format!("open {}: {e}", path.display())))?;
        Ok(Self::from_reader(file, &path.display().to_string()))
    }

    /// Spawn a detector and read its stdout. The tracking options go on its
    /// command line; this crate does not interpret them.
    pub fn spawn(program: &str, args: &[String], tracking: &TrackingConfig) -> Result<Self, Error> {
        info!(program, "starting hand detector");
        let mut child = Command::new(program)
            .args(args)
            .arg("--max-num-hands")
            .arg(tracking.max_num_hands.to_string())
            .arg("--min-detection-confidence")
            .arg(tracking.min_detection_confidence.to_string())
            .arg("--min-tracking-confidence")
            .arg(tracking.min_tracking_confidence.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::Feed(format!("spawn {program}: {e}")))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Feed(format!("{program}: no stdout")))?;

        let mut feed = Self::from_reader(stdout, program);
        feed.child = Some(child);
        Ok(feed)
    }

    /// Read frames from any byte stream on a background thread.
    pub fn from_reader<R: Read + Send + 'static>(source: R, name: &str) -> Self {
        let (tx, rx) = mpsc::sync_channel(CHANNEL_DEPTH);
        let name = name.to_string();
        let reader = thread::spawn(move || read_frames(BufReader::new(source), &name, tx));
        Self { rx, reader: Some(reader), child: None, ended: false }
    }

    /// Next frame if one is ready. Never blocks.
    pub fn poll(&mut self) -> Option<TrackerEvent> {
        if self.ended {
            return None;
        }
        match self.rx.try_recv() {
            Ok(TrackerEvent::Ended) | Err(TryRecvError::Disconnected) => {
                self.ended = true;
                Some(TrackerEvent::Ended)
            }
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
        }
    }

    /// Block until the next event. Used by headless replays and tests.
    pub fn recv(&mut self) -> TrackerEvent {
        if self.ended {
            return TrackerEvent::Ended;
        }
        match self.rx.recv() {
            Ok(TrackerEvent::Ended) | Err(_) => {
                self.ended = true;
                TrackerEvent::Ended
            }
            Ok(event) => event,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl Drop for LandmarkFeed {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                debug!("detector already gone: {e}");
            }
            let _ = child.wait();
        }
        // A reader blocked on stdin cannot be interrupted; only join finished ones.
        if let Some(reader) = self.reader.take() {
            if reader.is_finished() {
                let _ = reader.join();
            }
        }
    }
}

fn read_frames<R: BufRead>(source: R, name: &str, tx: SyncSender<TrackerEvent>) {
    for (n, line) in source.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(source = name, "read failed: {e}");
                break;
            }
        };
        match parse_line(&line) {
            Ok(Some(event)) => {
                if tx.send(event).is_err() {
                    // receiver dropped, nobody is listening
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(source = name, line = n + 1, "{e}"),
        }
    }
    info!(source = name, "landmark feed ended");
    let _ = tx.send(TrackerEvent::Ended);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{raw_hand_at, PEACE};
    use std::io::{Cursor, Write};

    fn frame_line(hands: &[Vec<Landmark>]) -> String {
        let hands: Vec<Vec<serde_json::Value>> = hands
            .iter()
            .map(|h| h.iter().map(|l| serde_json::json!({"x": l.x, "y": l.y, "z": l.z})).collect())
            .collect();
        serde_json::json!({ "hands": hands }).to_string()
    }

    #[test]
    fn test_parse_line_variants() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("{}").unwrap(), Some(TrackerEvent::Frame(vec![])));
        assert_eq!(
            parse_line(r#"{"error": "camera lost"}"#).unwrap(),
            Some(TrackerEvent::Error("camera lost".into()))
        );
        assert!(matches!(parse_line("not json"), Err(Error::Feed(_))));
    }

    #[test]
    fn test_parse_line_keeps_landmarks_and_defaults_z() {
        let event = parse_line(r#"{"hands": [[{"x": 0.1, "y": 0.2}]]}"#).unwrap();
        assert_eq!(event, Some(TrackerEvent::Frame(vec![vec![Landmark::new(0.1, 0.2, 0.0)]])));
    }

    #[test]
    fn test_reader_delivers_frames_in_order_then_ends() {
        let hand = raw_hand_at(PEACE, 0.5, 0.5);
        let input = format!(
            "{}\n\ngarbage\n{}\n",
            frame_line(&[hand.clone()]),
            frame_line(&[])
        );
        let mut feed = LandmarkFeed::from_reader(Cursor::new(input.into_bytes()), "test");

        assert_eq!(feed.recv(), TrackerEvent::Frame(vec![hand]));
        assert_eq!(feed.recv(), TrackerEvent::Frame(vec![]));
        assert_eq!(feed.recv(), TrackerEvent::Ended);
        assert!(feed.is_ended());
        assert_eq!(feed.poll(), None);
    }

    #[test]
    fn test_open_replays_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{}", frame_line(&[])).unwrap();
        let mut feed = LandmarkFeed::open(f.path()).unwrap();
        assert_eq!(feed.recv(), TrackerEvent::Frame(vec![]));
        assert_eq!(feed.recv(), TrackerEvent::Ended);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(LandmarkFeed::open("/nonexistent/hands.jsonl"), Err(Error::Feed(_))));
    }

    #[test]
    fn test_no_source_configured() {
        let feed = LandmarkFeed::from_config(&FeedConfig::default(), &TrackingConfig::default()).unwrap();
        assert!(feed.is_none());
    }
}
