use std::collections::HashMap;

use crate::controller::snapshot::{DeviceState, GamepadSnapshot, connected};

/// Remembers the last seen state of every device slot and reports changes.
#[derive(Debug, Default)]
pub struct ControllerPoller {
    last: HashMap<usize, DeviceState>,
}

impl ControllerPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the connected pads against their last snapshots.
    ///
    /// A pad seen for the first time counts as changed. Changed pads have
    /// their snapshot replaced. Returns whether any pad changed.
    ///
    /// Snapshots of pads that went away are kept, so a pad reconnecting in
    /// the same state does not trigger a render by itself; connection events
    /// handle that case.
    pub fn poll(&mut self, pads: &[Option<GamepadSnapshot>]) -> bool {
        let mut changed = false;
        for pad in connected(pads) {
            let stale = self
                .last
                .get(&pad.index)
                .is_none_or(|last| last.differs_from(pad));
            if stale {
                changed = true;
                self.last.insert(pad.index, DeviceState::from(pad));
            }
        }
        changed
    }

    /// Last recorded state of slot `index`.
    pub fn last_state(&self, index: usize) -> Option<&DeviceState> {
        self.last.get(&index)
    }
}
