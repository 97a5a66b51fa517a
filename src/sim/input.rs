//! Held-control tracking
//!
//! Movement controls are level-triggered and sampled every tick. Fire and
//! pause are edge-triggered: each key-down counts once, holding does nothing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical controls, independent of physical key layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Fire,
    Pause,
}

impl Control {
    /// Map a physical key code (DOM `KeyboardEvent.code` naming) to a control
    pub fn from_key(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Control::Forward),
            "KeyS" | "ArrowDown" => Some(Control::Backward),
            "KeyA" | "ArrowLeft" => Some(Control::TurnLeft),
            "KeyD" | "ArrowRight" => Some(Control::TurnRight),
            "Space" | "KeyF" => Some(Control::Fire),
            "Escape" | "KeyP" => Some(Control::Pause),
            _ => None,
        }
    }

    pub fn is_edge_triggered(&self) -> bool {
        matches!(self, Control::Fire | Control::Pause)
    }
}

/// Set of currently held controls plus queued one-shot fire requests
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Control>,
    fire_requests: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Fire queues a shot on every call, including
    /// auto-repeat, matching one shot per key-down event.
    pub fn press(&mut self, control: Control) {
        if control == Control::Fire {
            self.fire_requests += 1;
        }
        self.held.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.held.remove(&control);
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    pub fn pending_fire(&self) -> u32 {
        self.fire_requests
    }

    /// Hand all queued shots to the tick
    pub fn take_fire_requests(&mut self) -> u32 {
        std::mem::take(&mut self.fire_requests)
    }

    /// Forget queued shots (phase is not accepting fire)
    pub fn discard_requests(&mut self) {
        self.fire_requests = 0;
    }

    /// Release everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.held.clear();
        self.fire_requests = 0;
    }
}
