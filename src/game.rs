//! Session facade
//!
//! Glues raw key events, lifecycle actions and the frame loop to the
//! simulation. Hosts feed it events, call [`Game::pump`] from their frame
//! callback and draw whatever snapshot comes back.

use crate::scheduler::{Clock, FrameLoop};
use crate::settings::{Settings, SettingsError};
use crate::sim::{
    Action, Control, GameEvent, GamePhase, GameState, InputState, Snapshot, Transition,
    apply_action, tick,
};

/// Output of a frame that actually simulated something
#[derive(Debug, Clone)]
pub struct Frame {
    pub snapshot: Snapshot,
    pub events: Vec<GameEvent>,
}

/// A running session
pub struct Game<C: Clock> {
    state: GameState,
    input: InputState,
    frames: FrameLoop<C>,
}

impl<C: Clock> Game<C> {
    /// Start a session in the menu. Settings built by hand are checked here
    /// too, not only the ones loaded from JSON.
    pub fn new(settings: &Settings, clock: C) -> Result<Self, SettingsError> {
        settings.validate()?;
        let seed = settings.resolve_seed();
        log::info!("New session with seed {}", seed);
        Ok(Self {
            state: GameState::new(seed, settings.arena()),
            input: InputState::new(),
            frames: FrameLoop::new(clock, settings.frame_rate),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Whether a tick is scheduled
    pub fn is_looping(&self) -> bool {
        self.frames.is_scheduled()
    }

    /// Raw key-down from the host. Unknown keys are ignored.
    pub fn key_down(&mut self, code: &str) {
        let Some(control) = Control::from_key(code) else {
            log::trace!("Unmapped key {}", code);
            return;
        };

        match control {
            Control::Pause => {
                self.input.press(control);
                self.perform(Action::TogglePause);
            }
            Control::Fire if !self.state.phase.is_running() => {
                // Shots are only accepted while playing; still track the hold
                self.input.press(control);
                self.input.discard_requests();
            }
            _ => self.input.press(control),
        }
    }

    /// Raw key-up from the host. Unknown keys are ignored.
    pub fn key_up(&mut self, code: &str) {
        if let Some(control) = Control::from_key(code) {
            self.input.release(control);
        }
    }

    /// Apply a lifecycle action and start or stop the frame loop to match
    pub fn perform(&mut self, action: Action) -> Option<Transition> {
        let t = apply_action(&mut self.state, action)?;
        self.sync_loop();
        Some(t)
    }

    /// Call from the host's frame callback. Runs at most one tick, and only
    /// when a frame is due.
    pub fn pump(&mut self) -> Option<Frame> {
        self.frames.poll()?;

        let events = tick(&mut self.state, &mut self.input);
        self.sync_loop();

        Some(Frame {
            snapshot: self.state.snapshot(),
            events,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Keep exactly one pending frame while playing and none otherwise
    fn sync_loop(&mut self) {
        if self.state.phase.is_running() {
            self.frames.request();
        } else {
            self.frames.cancel();
            self.input.discard_requests();
        }
    }
}
