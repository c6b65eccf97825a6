use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::controller::snapshot::{ControllerEvent, GamepadSnapshot};

/// Supplies controller slots to the poll loop.
pub trait GamepadSource {
    /// Move to the next reading. Called once per poll tick.
    fn advance(&mut self) {}

    /// Current device slots. Empty slots are `None`.
    fn gamepads(&self) -> Vec<Option<GamepadSnapshot>>;

    /// No further readings will arrive.
    fn exhausted(&self) -> bool {
        false
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplayLine {
    Event { event: ControllerEvent },
    Frame(Vec<Option<GamepadSnapshot>>),
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Frame(Vec<Option<GamepadSnapshot>>),
    Event(ControllerEvent),
}

/// Plays back a recorded session.
///
/// The recording is JSON lines. A line is either a frame, an array of slots
/// (`null` for an empty slot), or a connection event such as
/// `{"event": {"type": "connected", "index": 0}}`. Blank lines and lines
/// starting with `#` are ignored.
///
/// Each [`advance`](GamepadSource::advance) consumes pending events, then one
/// frame. Once the recording is exhausted the last frame stays current.
#[derive(Debug, Default)]
pub struct ReplaySource {
    steps: Vec<Step>,
    cursor: usize,
    current: Vec<Option<GamepadSnapshot>>,
    events: Option<UnboundedSender<ControllerEvent>>,
}

impl ReplaySource {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut steps = Vec::new();
        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parsed: ReplayLine = serde_json::from_str(line)
                .with_context(|| format!("invalid replay line {}", n + 1))?;
            steps.push(match parsed {
                ReplayLine::Event { event } => Step::Event(event),
                ReplayLine::Frame(frame) => Step::Frame(frame),
            });
        }
        Ok(Self {
            steps,
            ..Default::default()
        })
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read replay {}", path.display()))?;
        Self::parse(&text)
    }

    /// Forward recorded connection events to `tx`.
    pub fn with_events(mut self, tx: UnboundedSender<ControllerEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn frame_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Frame(_)))
            .count()
    }
}

impl GamepadSource for ReplaySource {
    fn advance(&mut self) {
        while let Some(step) = self.steps.get(self.cursor) {
            self.cursor += 1;
            match step {
                Step::Event(event) => {
                    debug!("Replay event: {event:?}");
                    if let Some(tx) = &self.events
                        && tx.send(*event).is_err()
                    {
                        self.events = None;
                    }
                }
                Step::Frame(frame) => {
                    self.current = frame.clone();
                    return;
                }
            }
        }
    }

    fn gamepads(&self) -> Vec<Option<GamepadSnapshot>> {
        self.current.clone()
    }

    fn exhausted(&self) -> bool {
        self.cursor >= self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDING: &str = r#"
# two frames around a hotplug
[null]
{"event": {"type": "connected", "index": 0}}
[{"index": 0, "id": "Legion Go", "buttons": [false], "axes": [0.0]}]
"#;

    #[test]
    fn test_parse_and_advance() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut source = ReplaySource::parse(RECORDING).unwrap().with_events(tx);
        assert_eq!(source.frame_count(), 2);
        assert!(source.gamepads().is_empty());

        source.advance();
        assert_eq!(source.gamepads(), vec![None]);
        assert!(rx.try_recv().is_err());
        assert!(!source.exhausted());

        source.advance();
        assert_eq!(rx.try_recv().unwrap(), ControllerEvent::Connected { index: 0 });
        let pads = source.gamepads();
        let pad = pads[0].as_ref().unwrap();
        assert_eq!(pad.id, "Legion Go");
        assert!(pad.connected);
        assert!(source.exhausted());

        source.advance();
        assert_eq!(source.gamepads(), pads, "last frame is kept");
    }

    #[test]
    fn test_bad_line_reports_number() {
        let err = ReplaySource::parse("[]\n{oops}\n").unwrap_err();
        assert!(format!("{err}").contains("line 2"));
    }
}
