use std::{fmt, io::Write};

use colored::Colorize;
use serde::Serialize;

use crate::controller::snapshot::{GamepadSnapshot, connected};

/// Connection line of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionStatus {
    Connected,
    NotConnected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connected => f.write_str("Connected"),
            ConnectionStatus::NotConnected => f.write_str("Not Connected"),
        }
    }
}

/// One cell of the button tester.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonCell {
    pub index: usize,
    pub pressed: bool,
    pub title: String,
}

/// One bar of the axis tester.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisBar {
    pub index: usize,
    pub value: f64,
    pub title: String,
    /// Indicator position across the bar, `0.0` at -1 and `100.0` at +1.
    pub left_percent: f64,
}

/// Rendered controller status.
///
/// Buttons and axes belong to the first connected pad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusPanel {
    pub connection: ConnectionStatus,
    pub show_details: bool,
    /// One line per connected pad: `"{id} (Index: {index})"`.
    pub devices: Vec<String>,
    pub buttons: Vec<ButtonCell>,
    pub axes: Vec<AxisBar>,
}

impl StatusPanel {
    /// Build the panel from the current device slots.
    pub fn from_gamepads(pads: &[Option<GamepadSnapshot>]) -> Self {
        let pads: Vec<_> = connected(pads).collect();
        let Some(first) = pads.first() else {
            return Self {
                connection: ConnectionStatus::NotConnected,
                show_details: false,
                devices: Vec::new(),
                buttons: Vec::new(),
                axes: Vec::new(),
            };
        };

        Self {
            connection: ConnectionStatus::Connected,
            show_details: true,
            devices: pads
                .iter()
                .map(|p| format!("{} (Index: {})", p.id, p.index))
                .collect(),
            buttons: first
                .buttons
                .iter()
                .enumerate()
                .map(|(index, &pressed)| ButtonCell {
                    index,
                    pressed,
                    title: format!("Button {index}"),
                })
                .collect(),
            axes: first
                .axes
                .iter()
                .enumerate()
                .map(|(index, &value)| AxisBar {
                    index,
                    value,
                    title: format!("Axis {index}: {value:.2}"),
                    left_percent: (value + 1.0) / 2.0 * 100.0,
                })
                .collect(),
        }
    }

    /// Plain text rendering, one block per tester.
    pub fn to_text(&self) -> String {
        let mut out = format!("Controller: {}\n", self.connection);
        if !self.show_details {
            return out;
        }
        for device in &self.devices {
            out.push_str(&format!("  - {device}\n"));
        }
        out.push_str("Buttons:");
        for b in &self.buttons {
            if b.pressed {
                out.push_str(&format!(" [{}]", b.index));
            } else {
                out.push_str(&format!("  {} ", b.index));
            }
        }
        out.push('\n');
        for axis in &self.axes {
            out.push_str(&format!("{} |{}|\n", axis.title, axis_bar(axis.left_percent)));
        }
        out
    }
}

const BAR_WIDTH: usize = 21;

fn axis_bar(left_percent: f64) -> String {
    let pos = (left_percent.clamp(0.0, 100.0) / 100.0 * (BAR_WIDTH - 1) as f64).round() as usize;
    (0..BAR_WIDTH)
        .map(|i| if i == pos { '#' } else { '-' })
        .collect()
}

/// Receives every panel render.
pub trait PanelSink {
    fn render(&mut self, panel: &StatusPanel);
}

/// Prints panels to a terminal.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> PanelSink for TerminalSink<W> {
    fn render(&mut self, panel: &StatusPanel) {
        let status = match panel.connection {
            ConnectionStatus::Connected => panel.connection.to_string().green().bold(),
            ConnectionStatus::NotConnected => panel.connection.to_string().red().bold(),
        };
        let body = panel.to_text();
        let body = body.split_once('\n').map_or("", |(_, rest)| rest);
        if let Err(e) = write!(self.out, "Controller: {status}\n{body}").and_then(|_| self.out.flush()) {
            warn!("Failed to write controller panel: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(index: usize, id: &str, buttons: &[bool], axes: &[f64]) -> Option<GamepadSnapshot> {
        Some(GamepadSnapshot {
            index,
            id: id.to_string(),
            connected: true,
            buttons: buttons.to_vec(),
            axes: axes.to_vec(),
        })
    }

    #[test]
    fn test_no_devices() {
        let panel = StatusPanel::from_gamepads(&[None, None]);
        assert_eq!(panel.connection, ConnectionStatus::NotConnected);
        assert!(!panel.show_details);
        assert!(panel.buttons.is_empty());
        assert!(panel.axes.is_empty());
        assert_eq!(panel.to_text(), "Controller: Not Connected\n");
    }

    #[test]
    fn test_first_pad_drives_testers() {
        let panel = StatusPanel::from_gamepads(&[
            None,
            pad(1, "Legion Go", &[false, true], &[-1.0, 0.5]),
            pad(2, "Xbox", &[true, true, true], &[]),
        ]);
        assert_eq!(panel.connection, ConnectionStatus::Connected);
        assert_eq!(panel.devices, ["Legion Go (Index: 1)", "Xbox (Index: 2)"]);
        assert_eq!(panel.buttons.len(), 2);
        assert!(panel.buttons[1].pressed);
        assert_eq!(panel.buttons[1].title, "Button 1");
        assert_eq!(panel.axes[0].left_percent, 0.0);
        assert_eq!(panel.axes[1].left_percent, 75.0);
        assert_eq!(panel.axes[1].title, "Axis 1: 0.50");
    }

    #[test]
    fn test_text_rendering() {
        let panel = StatusPanel::from_gamepads(&[pad(0, "Pad", &[true, false], &[0.0])]);
        let text = panel.to_text();
        assert!(text.starts_with("Controller: Connected\n  - Pad (Index: 0)\n"));
        assert!(text.contains("Buttons: [0]  1 \n"));
        assert!(text.contains("Axis 0: 0.00 |----------#----------|"));
    }

    #[test]
    fn test_terminal_sink_writes() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        TerminalSink::new(&mut buf).render(&StatusPanel::from_gamepads(&[]));
        assert_eq!(String::from_utf8(buf).unwrap(), "Controller: Not Connected\n");
    }
}
