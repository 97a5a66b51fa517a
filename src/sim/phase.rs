//! Phase state machine
//!
//! ```text
//!   Menu --Start--> Playing <--TogglePause--> Paused
//!                      |
//!               health <= 0
//!                      v
//!   GameOver --Restart--> Playing
//!   (any) --ReturnToMenu--> Menu
//! ```
//!
//! Anything else is a no-op.

use serde::{Deserialize, Serialize};

use super::state::GamePhase;

/// Lifecycle actions raised by menus, buttons and the pause key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Start,
    TogglePause,
    Restart,
    ReturnToMenu,
}

/// An accepted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: GamePhase,
    pub to: GamePhase,
    /// Whether the session must be reset to new-game values
    pub reset: bool,
}

/// Look up where `action` leads from `phase`, if anywhere
pub fn transition(phase: GamePhase, action: Action) -> Option<Transition> {
    use GamePhase::*;

    let (to, reset) = match (phase, action) {
        (Menu, Action::Start) => (Playing, true),
        (GameOver, Action::Restart) => (Playing, true),
        (Playing, Action::TogglePause) => (Paused, false),
        (Paused, Action::TogglePause) => (Playing, false),
        (Playing | Paused | GameOver, Action::ReturnToMenu) => (Menu, false),
        _ => return None,
    };

    Some(Transition {
        from: phase,
        to,
        reset,
    })
}

/// Automatic transition checked after every simulated tick
pub fn observe_health(phase: GamePhase, health: i32) -> GamePhase {
    if phase == GamePhase::Playing && health <= 0 {
        GamePhase::GameOver
    } else {
        phase
    }
}

impl GamePhase {
    /// Only this phase advances the simulation
    pub fn is_running(&self) -> bool {
        *self == GamePhase::Playing
    }
}
