use serde::{Deserialize, Serialize};

/// State of one controller slot as read from the input surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamepadSnapshot {
    /// Slot index. Stable while the device stays connected.
    pub index: usize,
    /// Device name reported by the driver.
    pub id: String,
    #[serde(default = "default_connected")]
    pub connected: bool,
    /// Pressed state per button, in driver order.
    #[serde(default)]
    pub buttons: Vec<bool>,
    /// Axis values in `-1.0..=1.0`, in driver order.
    #[serde(default)]
    pub axes: Vec<f64>,
}

fn default_connected() -> bool {
    true
}

/// The part of a snapshot compared between polls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceState {
    pub buttons: Vec<bool>,
    pub axes: Vec<f64>,
}

impl From<&GamepadSnapshot> for DeviceState {
    fn from(pad: &GamepadSnapshot) -> Self {
        Self {
            buttons: pad.buttons.clone(),
            axes: pad.axes.clone(),
        }
    }
}

impl DeviceState {
    /// Whether `pad` differs from this state.
    pub fn differs_from(&self, pad: &GamepadSnapshot) -> bool {
        self.buttons != pad.buttons || self.axes != pad.axes
    }
}

/// Hardware notification delivered outside the poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControllerEvent {
    Connected { index: usize },
    Disconnected { index: usize },
}

/// Connected pads from a list of slots, in slot order.
pub fn connected(pads: &[Option<GamepadSnapshot>]) -> impl Iterator<Item = &GamepadSnapshot> {
    pads.iter().flatten().filter(|p| p.connected)
}
