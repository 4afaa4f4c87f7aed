//! Simulation controller
//!
//! Owns the simulation and the host frame scheduler, and runs the
//! STOPPED/RUNNING loop: exactly one frame request is outstanding while
//! running, none while stopped.

use glam::Vec2;

use crate::platform::{FrameRequest, FrameScheduler};
use crate::renderer::RenderSink;
use crate::sim::{SimulationState, TickInput, tick};

/// Loop run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Notifications for external listeners, queued until drained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    Started,
    Stopped,
}

/// Events from the input source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    /// Flip between running and stopped (e.g. a click)
    Toggle,
    Start,
    Stop,
}

pub struct App<S: FrameScheduler> {
    state: SimulationState,
    scheduler: S,
    /// Present iff running
    pending: Option<FrameRequest>,
    /// Timestamp (ms) of the last tick; absent until the first tick after start
    last_update: Option<f64>,
    pointer: Option<Vec2>,
    events: Vec<LoopEvent>,
    /// Ticks that ran update + render
    ticks: u64,
}

impl<S: FrameScheduler> App<S> {
    pub fn new(state: SimulationState, scheduler: S) -> Self {
        Self {
            state,
            scheduler,
            pending: None,
            last_update: None,
            pointer: None,
            events: Vec::new(),
            ticks: 0,
        }
    }

    pub fn run_state(&self) -> LoopState {
        if self.pending.is_some() {
            LoopState::Running
        } else {
            LoopState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state() == LoopState::Running
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved(pos) => self.pointer = Some(pos),
            InputEvent::Toggle => self.toggle(),
            InputEvent::Start => self.start(),
            InputEvent::Stop => self.stop(),
        }
    }

    /// Flip the run state and queue the matching notification
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
            self.events.push(LoopEvent::Stopped);
        } else {
            self.start();
            self.events.push(LoopEvent::Started);
        }
    }

    pub fn start(&mut self) {
        if self.is_running() {
            log::debug!("Start ignored, loop already running");
            return;
        }
        self.last_update = None;
        self.pending = Some(self.scheduler.request_frame());
        log::info!("Loop started");
    }

    /// Cancel the outstanding frame. Stopping twice cancels only once.
    pub fn stop(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
            log::info!("Loop stopped after {} ticks", self.ticks);
        }
        self.last_update = None;
    }

    /// Frame callback from the host, `now` in milliseconds.
    ///
    /// The first frame after a start only records its timestamp. A frame
    /// arriving after a stop is ignored.
    pub fn on_frame(&mut self, now: f64, sink: &mut dyn RenderSink) {
        if self.pending.take().is_none() {
            log::debug!("Stale frame at {:.1}ms ignored", now);
            return;
        }

        if let Some(last) = self.last_update {
            let elapsed = ((now - last) / 1000.0) as f32;
            log::trace!("Tick {}: {:.4}s", self.ticks, elapsed);

            let input = TickInput {
                pointer: self.pointer,
            };
            tick(&mut self.state, &input, elapsed, sink);
            self.ticks += 1;
        }
        self.last_update = Some(now);

        self.pending = Some(self.scheduler.request_frame());
    }

    /// Take every queued notification, oldest first
    pub fn drain_events(&mut self) -> Vec<LoopEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
