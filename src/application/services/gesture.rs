//! Tap and long-press recognition for pointer input.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::domain::{PointerInput, PointerKind, PointerPhase, UiEvent};

/// Hold time after which a press becomes a long press.
pub const HOLD_THRESHOLD: Duration = Duration::from_millis(500);

/// Signal produced by the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSignal {
    /// Pointer went down.
    Down(Instant),
    /// Pointer was released before the hold threshold.
    Tap(Instant),
    /// Pointer was held past the hold threshold.
    LongPress(Instant),
}

impl From<GestureSignal> for UiEvent {
    fn from(signal: GestureSignal) -> Self {
        match signal {
            GestureSignal::Down(time) => Self::PointerDown { time },
            GestureSignal::Tap(time) => Self::PointerUp { time },
            GestureSignal::LongPress(time) => Self::PointerLongPress { time },
        }
    }
}

/// Timer instruction for whoever owns the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerCommand {
    /// Leave timers as they are.
    #[default]
    None,
    /// Schedule [`GestureRecognizer::timer_fired`] with `token` at `deadline`.
    Arm {
        /// Identifies this arming.
        token: u64,
        /// When to fire.
        deadline: Instant,
    },
    /// Drop the timer armed with `token`.
    Cancel {
        /// Identifies the arming to drop.
        token: u64,
    },
}

/// Result of feeding one input into the recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GestureOutput {
    /// Signals to emit, in order.
    pub signals: Vec<GestureSignal>,
    /// Timer instruction.
    pub timer: TimerCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum GestureState {
    #[default]
    Idle,
    Down {
        started_at: Instant,
        token: u64,
    },
    LongPress,
}

/// Finite-state machine classifying presses as taps or long presses.
///
/// The machine does not own a clock. It asks its driver to arm or cancel a
/// timer and is told when a timer fires. Stale timer tokens are ignored, so a
/// timer that fires after the pointer was released has no effect.
#[derive(Debug)]
pub struct GestureRecognizer {
    state: GestureState,
    next_token: u64,
    touch_enabled: bool,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl GestureRecognizer {
    /// Creates a recognizer. Touch input is ignored when `touch_enabled` is false.
    #[must_use]
    pub const fn new(touch_enabled: bool) -> Self {
        Self {
            state: GestureState::Idle,
            next_token: 0,
            touch_enabled,
        }
    }

    /// Returns true between pointer-down and the matching pointer-up.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    /// Dispatches a raw pointer event.
    pub fn handle(&mut self, input: PointerInput) -> GestureOutput {
        if input.kind == PointerKind::Touch && !self.touch_enabled {
            trace!("Touch classification disabled, ignoring input");
            return GestureOutput::default();
        }

        match input.phase {
            PointerPhase::Down => self.pointer_down(input.time),
            PointerPhase::Up => self.pointer_up(input.time),
            PointerPhase::Cancel => self.cancel(),
        }
    }

    pub fn pointer_down(&mut self, time: Instant) -> GestureOutput {
        // A new arming supersedes any earlier timer.
        self.next_token += 1;
        let token = self.next_token;
        self.state = GestureState::Down {
            started_at: time,
            token,
        };

        GestureOutput {
            signals: vec![GestureSignal::Down(time)],
            timer: TimerCommand::Arm {
                token,
                deadline: time + HOLD_THRESHOLD,
            },
        }
    }

    /// Called by the driver when the timer armed with `token` elapses.
    pub fn timer_fired(&mut self, token: u64, now: Instant) -> GestureOutput {
        match self.state {
            GestureState::Down {
                started_at,
                token: armed,
            } if armed == token && now.saturating_duration_since(started_at) >= HOLD_THRESHOLD => {
                self.state = GestureState::LongPress;
                GestureOutput {
                    signals: vec![GestureSignal::LongPress(now)],
                    timer: TimerCommand::None,
                }
            }
            _ => GestureOutput::default(),
        }
    }

    pub fn pointer_up(&mut self, time: Instant) -> GestureOutput {
        match std::mem::take(&mut self.state) {
            GestureState::Down { token, .. } => GestureOutput {
                signals: vec![GestureSignal::Tap(time)],
                timer: TimerCommand::Cancel { token },
            },
            GestureState::LongPress | GestureState::Idle => GestureOutput::default(),
        }
    }

    /// Abandons the current press without emitting anything.
    pub fn cancel(&mut self) -> GestureOutput {
        match std::mem::take(&mut self.state) {
            GestureState::Down { token, .. } => GestureOutput {
                signals: Vec::new(),
                timer: TimerCommand::Cancel { token },
            },
            GestureState::LongPress | GestureState::Idle => GestureOutput::default(),
        }
    }
}

/// Runs a [`GestureRecognizer`] against the tokio clock.
///
/// Signals are forwarded as [`UiEvent`]s. The hold timer is a spawned sleep
/// that is aborted when the press ends.
pub struct GestureDriver {
    recognizer: Arc<Mutex<GestureRecognizer>>,
    events: mpsc::UnboundedSender<UiEvent>,
    timer: Option<JoinHandle<()>>,
}

impl GestureDriver {
    #[must_use]
    pub fn new(recognizer: GestureRecognizer, events: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self {
            recognizer: Arc::new(Mutex::new(recognizer)),
            events,
            timer: None,
        }
    }

    /// Feeds a pointer event. Must be called from within a tokio runtime.
    pub fn handle(&mut self, input: PointerInput) {
        let output = self.recognizer.lock().handle(input);
        self.apply(output);
    }

    /// Abandons any press in progress and disarms the hold timer.
    pub fn cancel(&mut self) {
        let output = self.recognizer.lock().cancel();
        self.apply(output);
    }

    fn apply(&mut self, output: GestureOutput) {
        for signal in output.signals {
            send(&self.events, signal);
        }

        match output.timer {
            TimerCommand::None => {}
            TimerCommand::Cancel { token } => {
                if let Some(timer) = self.timer.take() {
                    debug!(token, "Cancelling hold timer");
                    timer.abort();
                }
            }
            TimerCommand::Arm { token, deadline } => {
                if let Some(previous) = self.timer.take() {
                    previous.abort();
                }
                let recognizer = Arc::clone(&self.recognizer);
                let events = self.events.clone();
                self.timer = Some(tokio::spawn(async move {
                    tokio::time::sleep_until(deadline.into()).await;
                    let output = recognizer
                        .lock()
                        .timer_fired(token, tokio::time::Instant::now().into_std());
                    for signal in output.signals {
                        send(&events, signal);
                    }
                }));
            }
        }
    }
}

impl Drop for GestureDriver {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl std::fmt::Debug for GestureDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureDriver")
            .field("recognizer", &*self.recognizer.lock())
            .field("timer_armed", &self.timer.is_some())
            .finish()
    }
}

fn send(events: &mpsc::UnboundedSender<UiEvent>, signal: GestureSignal) {
    let event = UiEvent::from(signal);
    let name = event.name();
    debug!(event = name, "Gesture signal");
    if events.send(event).is_err() {
        debug!(event = name, "No listener for gesture signal");
    }
}
