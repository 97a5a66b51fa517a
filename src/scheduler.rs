//! Frame scheduling
//!
//! Stand-in for the host's "request animation frame" callback. At most one
//! frame is ever pending; cancelling it guarantees no further tick fires
//! until someone requests again.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock advanced by hand. Clones share the same time, so a test can keep a
/// handle while the loop owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Handle for a scheduled frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRequest {
    pub id: u64,
    /// Clock time (seconds) at which the frame becomes due
    pub due_at: f64,
}

/// Single-slot frame scheduler
#[derive(Debug)]
pub struct FrameLoop<C: Clock> {
    clock: C,
    frame_interval: f64,
    pending: Option<FrameRequest>,
    next_id: u64,
}

impl<C: Clock> FrameLoop<C> {
    /// `frame_rate` is in Hz and must be positive; [`Settings::validate`]
    /// enforces that for sessions.
    ///
    /// [`Settings::validate`]: crate::Settings::validate
    pub fn new(clock: C, frame_rate: f32) -> Self {
        Self {
            clock,
            frame_interval: 1.0 / frame_rate as f64,
            pending: None,
            next_id: 1,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }

    /// Schedule the next frame one interval from now. A frame that is
    /// already pending is kept as is.
    pub fn request(&mut self) -> FrameRequest {
        if let Some(pending) = self.pending {
            return pending;
        }
        let request = FrameRequest {
            id: self.next_id,
            due_at: self.clock.now() + self.frame_interval,
        };
        self.next_id += 1;
        self.pending = Some(request);
        log::trace!("Frame {} requested for t={:.4}", request.id, request.due_at);
        request
    }

    /// Drop the pending frame, if any
    pub fn cancel(&mut self) -> Option<FrameRequest> {
        let cancelled = self.pending.take();
        if let Some(request) = cancelled {
            log::trace!("Frame {} cancelled", request.id);
        }
        cancelled
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire the pending frame if its time has come. Each request fires once.
    pub fn poll(&mut self) -> Option<FrameRequest> {
        let pending = self.pending?;
        if self.clock.now() >= pending.due_at {
            self.pending = None;
            Some(pending)
        } else {
            None
        }
    }
}
