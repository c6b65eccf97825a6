//! Controller status panel.
//!
//! A [`GamepadSource`] is sampled on a fixed interval. The panel is rendered
//! once at start, on every connection event and on every tick where a
//! connected pad's buttons or axes changed.

mod panel;
mod poller;
mod snapshot;
mod source;

use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

pub use panel::{AxisBar, ButtonCell, ConnectionStatus, PanelSink, StatusPanel, TerminalSink};
pub use poller::ControllerPoller;
pub use snapshot::{ControllerEvent, DeviceState, GamepadSnapshot};
pub use source::{GamepadSource, ReplaySource};

/// Poll loop settings.
#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    pub interval: Duration,
    /// Stop after this many ticks. `None` runs until the source is exhausted.
    pub max_ticks: Option<u64>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(crate::config::DEFAULT_POLL_INTERVAL_MS),
            max_ticks: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub ticks: u64,
    pub renders: u64,
}

/// Drive `sink` from `source` until the source runs dry or `max_ticks` is hit.
pub async fn run_poll_loop<S, K>(
    source: &mut S,
    sink: &mut K,
    mut events: UnboundedReceiver<ControllerEvent>,
    options: PollOptions,
) -> PollStats
where
    S: GamepadSource,
    K: PanelSink,
{
    let mut poller = ControllerPoller::new();
    let mut stats = PollStats::default();
    let mut events_open = true;

    let mut render = |pads: &[Option<GamepadSnapshot>], stats: &mut PollStats| {
        sink.render(&StatusPanel::from_gamepads(pads));
        stats.renders += 1;
    };

    render(&source.gamepads(), &mut stats);

    let mut ticker = tokio::time::interval(options.interval);
    // First tick completes immediately.
    ticker.tick().await;

    loop {
        if options.max_ticks.is_some_and(|max| stats.ticks >= max) {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {
                stats.ticks += 1;
                source.advance();
                let pads = source.gamepads();
                if poller.poll(&pads) {
                    render(&pads, &mut stats);
                }
                // Events raised by this advance are rendered before the loop can stop.
                while let Ok(event) = events.try_recv() {
                    info!("Controller event: {event:?}");
                    render(&pads, &mut stats);
                }
                if source.exhausted() {
                    break;
                }
            }
            event = events.recv(), if events_open => {
                match event {
                    Some(event) => {
                        info!("Controller event: {event:?}");
                        render(&source.gamepads(), &mut stats);
                    }
                    None => events_open = false,
                }
            }
        }
    }

    debug!("Poll loop stopped after {} ticks, {} renders", stats.ticks, stats.renders);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        panels: Vec<StatusPanel>,
    }

    impl PanelSink for Recorder {
        fn render(&mut self, panel: &StatusPanel) {
            self.panels.push(panel.clone());
        }
    }

    /// Replays the same frame forever.
    struct Still(Vec<Option<GamepadSnapshot>>);

    impl GamepadSource for Still {
        fn gamepads(&self) -> Vec<Option<GamepadSnapshot>> {
            self.0.clone()
        }
    }

    fn fast(max_ticks: Option<u64>) -> PollOptions {
        PollOptions {
            interval: Duration::from_millis(1),
            max_ticks,
        }
    }

    #[tokio::test]
    async fn test_static_pad_renders_once_after_start() {
        let pad = GamepadSnapshot {
            index: 0,
            id: "Pad".into(),
            connected: true,
            buttons: vec![false],
            axes: vec![0.0],
        };
        let mut source = Still(vec![Some(pad)]);
        let mut sink = Recorder::default();
        let (_tx, rx) = tokio::sync::mpsc::unbounded_channel();

        let stats = run_poll_loop(&mut source, &mut sink, rx, fast(Some(5))).await;
        assert_eq!(stats.ticks, 5);
        // Start plus the first sighting.
        assert_eq!(stats.renders, 2);
        assert_eq!(sink.panels[1].connection, ConnectionStatus::Connected);
    }

    #[tokio::test]
    async fn test_replay_drives_renders() {
        let recording = r#"
[null]
{"event": {"type": "connected", "index": 0}}
[{"index": 0, "id": "Pad", "buttons": [false], "axes": [0.0]}]
[{"index": 0, "id": "Pad", "buttons": [false], "axes": [0.0]}]
[{"index": 0, "id": "Pad", "buttons": [true], "axes": [0.0]}]
"#;
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let mut source = ReplaySource::parse(recording).unwrap().with_events(tx);
        let mut sink = Recorder::default();

        let stats = run_poll_loop(&mut source, &mut sink, rx, fast(None)).await;
        assert_eq!(stats.ticks, 4);
        assert_eq!(sink.panels[0].connection, ConnectionStatus::NotConnected);

        let last = sink.panels.last().unwrap();
        assert_eq!(last.connection, ConnectionStatus::Connected);
        assert!(last.buttons[0].pressed);
        // Start, first sighting, the connection event and the button press.
        assert_eq!(stats.renders, 4);
    }

    #[tokio::test]
    async fn test_trailing_disconnect_is_rendered() {
        let recording = r#"
[{"index": 0, "id": "Pad", "buttons": [false], "axes": [0.0]}]
{"event": {"type": "disconnected", "index": 0}}
[null]
"#;
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let mut source = ReplaySource::parse(recording).unwrap().with_events(tx);
        let mut sink = Recorder::default();

        let stats = run_poll_loop(&mut source, &mut sink, rx, fast(None)).await;
        assert_eq!(stats, PollStats { ticks: 2, renders: 3 });
        let connections: Vec<_> = sink.panels.iter().map(|p| p.connection).collect();
        assert_eq!(
            connections,
            [
                ConnectionStatus::NotConnected,
                ConnectionStatus::Connected,
                ConnectionStatus::NotConnected,
            ]
        );
    }

    #[tokio::test]
    async fn test_zero_ticks_only_renders_start() {
        let mut source = Still(Vec::new());
        let mut sink = Recorder::default();
        let (_tx, rx) = tokio::sync::mpsc::unbounded_channel();

        let stats = run_poll_loop(&mut source, &mut sink, rx, fast(Some(0))).await;
        assert_eq!(stats, PollStats { ticks: 0, renders: 1 });
    }

    #[tokio::test]
    async fn test_events_render_without_changes() {
        let mut source = Still(Vec::new());
        let mut sink = Recorder::default();
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        tx.send(ControllerEvent::Disconnected { index: 3 }).unwrap();
        drop(tx);

        let options = PollOptions {
            interval: Duration::from_millis(20),
            max_ticks: Some(1),
        };
        let stats = run_poll_loop(&mut source, &mut sink, rx, options).await;
        assert_eq!(stats.renders, 2);
        assert!(sink
            .panels
            .iter()
            .all(|p| p.connection == ConnectionStatus::NotConnected));
    }
}
