//! Dial state machine.
//!
//! The machine owns the [`TimerSession`] and reacts to [`DialEvent`]s.
//! It performs no I/O: side effects are returned as [`Effect`] values for
//! the caller to apply to the tick driver and the alarm player.
//!
//! ```text
//!            drag start (any)            drag end, remaining > 0
//!   Idle ──────────────────▶ Dragging ─────────────────────────▶ Running
//!    ▲                          ▲   └── drag end, remaining = 0 ──▶ Idle
//!    │                          │
//!    │ tick reaches 0           │ drag start (stops ticking)
//!    └──────────────────── Running ◀──── tap ────▶ Armed
//! ```

use super::angle::angle_to_minutes;
use crate::types::{DialPhase, TimerSession};

// ============================================================================
// DialEvent
// ============================================================================

/// Inputs to the dial state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialEvent {
    /// A pointer gesture started on the dial
    DragStart,
    /// The pointer moved while dragging
    DragMove {
        /// Clock angle of the pointer, in degrees
        angle: f64,
    },
    /// The pointer was released
    DragEnd,
    /// A click on the dial
    Tap,
    /// One second elapsed on the tick driver
    Tick,
}

// ============================================================================
// Effect
// ============================================================================

/// Side effects requested by a transition, in the order they must be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start the 1-second tick driver
    StartTicking,
    /// Stop the tick driver
    StopTicking,
    /// Play the alarm sound
    PlayAlarm,
}

// ============================================================================
// DialStateMachine
// ============================================================================

/// State machine behind the dial.
#[derive(Debug, Clone, Default)]
pub struct DialStateMachine {
    session: TimerSession,
}

impl DialStateMachine {
    /// Creates a machine with an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current session.
    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    /// Returns the current phase.
    pub fn phase(&self) -> DialPhase {
        self.session.phase()
    }

    /// Applies an event and returns the effects the caller must perform.
    pub fn handle(&mut self, event: DialEvent) -> Vec<Effect> {
        match event {
            DialEvent::DragStart => self.on_drag_start(),
            DialEvent::DragMove { angle } => self.on_drag_move(angle),
            DialEvent::DragEnd => self.on_drag_end(),
            DialEvent::Tap => self.on_tap(),
            DialEvent::Tick => self.on_tick(),
        }
    }

    fn on_drag_start(&mut self) -> Vec<Effect> {
        let was_running = self.session.is_running();
        self.session.begin_drag();

        if was_running {
            vec![Effect::StopTicking]
        } else {
            Vec::new()
        }
    }

    fn on_drag_move(&mut self, angle: f64) -> Vec<Effect> {
        if self.session.is_dragging() {
            self.session.set_minutes(angle_to_minutes(angle));
        }
        Vec::new()
    }

    fn on_drag_end(&mut self) -> Vec<Effect> {
        if !self.session.is_dragging() {
            return Vec::new();
        }

        self.session.end_drag();
        if self.session.remaining_seconds() > 0 {
            self.session.start();
            vec![Effect::StartTicking]
        } else {
            Vec::new()
        }
    }

    fn on_tap(&mut self) -> Vec<Effect> {
        match self.session.phase() {
            DialPhase::Running => {
                self.session.stop();
                vec![Effect::StopTicking]
            }
            DialPhase::Armed => {
                self.session.start();
                vec![Effect::StartTicking]
            }
            DialPhase::Idle | DialPhase::Dragging => Vec::new(),
        }
    }

    fn on_tick(&mut self) -> Vec<Effect> {
        if !self.session.is_running() {
            return Vec::new();
        }

        if self.session.tick() {
            self.session.stop();
            vec![Effect::StopTicking, Effect::PlayAlarm]
        } else {
            Vec::new()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn drag_to(machine: &mut DialStateMachine, angle: f64) -> Vec<Effect> {
        let mut effects = machine.handle(DialEvent::DragStart);
        effects.extend(machine.handle(DialEvent::DragMove { angle }));
        effects.extend(machine.handle(DialEvent::DragEnd));
        effects
    }

    /// Sets `angle` and leaves the machine in `Armed`.
    fn arm(machine: &mut DialStateMachine, angle: f64) {
        drag_to(machine, angle);
        machine.handle(DialEvent::Tap);
        assert_eq!(machine.phase(), DialPhase::Armed);
    }

    fn assert_invariants(machine: &DialStateMachine) {
        let session = machine.session();
        assert!(!(session.is_running() && session.is_dragging()));
        if session.remaining_seconds() == 0 {
            assert!(!session.is_running());
        }
    }

    mod drag_tests {
        use super::*;

        #[test]
        fn test_drag_start_from_idle() {
            let mut machine = DialStateMachine::new();
            let effects = machine.handle(DialEvent::DragStart);

            assert!(effects.is_empty());
            assert_eq!(machine.phase(), DialPhase::Dragging);
        }

        #[test]
        fn test_drag_move_sets_whole_minutes() {
            let mut machine = DialStateMachine::new();
            machine.handle(DialEvent::DragStart);
            machine.handle(DialEvent::DragMove { angle: 180.0 });

            assert_eq!(machine.session().remaining_seconds(), 1800);
            assert_eq!(machine.phase(), DialPhase::Dragging);

            machine.handle(DialEvent::DragMove { angle: 0.0 });
            assert_eq!(machine.session().remaining_seconds(), 60);
        }

        #[test]
        fn test_drag_end_starts_countdown() {
            let mut machine = DialStateMachine::new();
            let effects = drag_to(&mut machine, 90.0);

            assert_eq!(effects, vec![Effect::StartTicking]);
            assert_eq!(machine.phase(), DialPhase::Running);
            assert_eq!(machine.session().remaining_seconds(), 15 * 60);
        }

        #[test]
        fn test_drag_end_without_move_from_idle_stays_idle() {
            let mut machine = DialStateMachine::new();
            machine.handle(DialEvent::DragStart);
            let effects = machine.handle(DialEvent::DragEnd);

            assert!(effects.is_empty());
            assert_eq!(machine.phase(), DialPhase::Idle);
        }

        #[test]
        fn test_drag_while_running_stops_ticking_first() {
            let mut machine = DialStateMachine::new();
            drag_to(&mut machine, 180.0);
            machine.handle(DialEvent::Tick);

            let effects = machine.handle(DialEvent::DragStart);
            assert_eq!(effects, vec![Effect::StopTicking]);
            assert!(!machine.session().is_running());
            // Remaining time survives until the pointer moves
            assert_eq!(machine.session().remaining_seconds(), 1799);

            // No tick applies during the drag
            assert!(machine.handle(DialEvent::Tick).is_empty());
            assert_eq!(machine.session().remaining_seconds(), 1799);

            machine.handle(DialEvent::DragMove { angle: 60.0 });
            assert_eq!(machine.session().remaining_seconds(), 600);
            assert_invariants(&machine);
        }

        #[test]
        fn test_drag_move_outside_drag_is_ignored() {
            let mut machine = DialStateMachine::new();
            let effects = machine.handle(DialEvent::DragMove { angle: 90.0 });

            assert!(effects.is_empty());
            assert_eq!(machine.session().remaining_seconds(), 0);
            assert_eq!(machine.phase(), DialPhase::Idle);
        }

        #[test]
        fn test_drag_end_outside_drag_is_ignored() {
            let mut machine = DialStateMachine::new();
            arm(&mut machine, 30.0);

            assert!(machine.handle(DialEvent::DragEnd).is_empty());
            assert_eq!(machine.phase(), DialPhase::Armed);
        }

        #[test]
        fn test_redrag_from_armed_resumes_with_new_value() {
            let mut machine = DialStateMachine::new();
            arm(&mut machine, 30.0);

            let effects = drag_to(&mut machine, 270.0);
            assert_eq!(effects, vec![Effect::StartTicking]);
            assert_eq!(machine.session().remaining_seconds(), 45 * 60);
        }
    }

    mod tap_tests {
        use super::*;

        #[test]
        fn test_tap_idle_is_noop() {
            let mut machine = DialStateMachine::new();
            assert!(machine.handle(DialEvent::Tap).is_empty());
            assert_eq!(machine.phase(), DialPhase::Idle);
        }

        #[test]
        fn test_tap_toggles_running_and_armed() {
            let mut machine = DialStateMachine::new();
            drag_to(&mut machine, 120.0);
            machine.handle(DialEvent::Tick);
            let remaining = machine.session().remaining_seconds();

            assert_eq!(machine.handle(DialEvent::Tap), vec![Effect::StopTicking]);
            assert_eq!(machine.phase(), DialPhase::Armed);
            assert_eq!(machine.session().remaining_seconds(), remaining);

            assert_eq!(machine.handle(DialEvent::Tap), vec![Effect::StartTicking]);
            assert_eq!(machine.phase(), DialPhase::Running);
            assert_eq!(machine.session().remaining_seconds(), remaining);
        }

        #[test]
        fn test_tap_while_dragging_is_noop() {
            let mut machine = DialStateMachine::new();
            machine.handle(DialEvent::DragStart);
            machine.handle(DialEvent::DragMove { angle: 45.0 });

            assert!(machine.handle(DialEvent::Tap).is_empty());
            assert_eq!(machine.phase(), DialPhase::Dragging);
        }
    }

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_when_not_running_is_ignored() {
            let mut machine = DialStateMachine::new();
            arm(&mut machine, 6.0);

            assert!(machine.handle(DialEvent::Tick).is_empty());
            assert_eq!(machine.session().remaining_seconds(), 60);
        }

        #[test]
        fn test_countdown_fires_alarm_exactly_once() {
            for minutes in [1_u32, 7, 60] {
                let mut machine = DialStateMachine::new();
                let angle = f64::from(minutes) * 6.0;
                drag_to(&mut machine, angle.min(359.9));
                assert_eq!(machine.session().remaining_seconds(), minutes * 60);

                let mut alarms = 0;
                for _ in 0..minutes * 60 {
                    let effects = machine.handle(DialEvent::Tick);
                    alarms += effects.iter().filter(|e| **e == Effect::PlayAlarm).count();
                    assert_invariants(&machine);
                }

                assert_eq!(alarms, 1);
                assert_eq!(machine.session().remaining_seconds(), 0);
                assert_eq!(machine.phase(), DialPhase::Idle);

                // Stray ticks after completion do nothing
                assert!(machine.handle(DialEvent::Tick).is_empty());
            }
        }

        #[test]
        fn test_completion_stops_before_alarm() {
            let mut machine = DialStateMachine::new();
            drag_to(&mut machine, 6.0);
            for _ in 0..59 {
                machine.handle(DialEvent::Tick);
            }

            let effects = machine.handle(DialEvent::Tick);
            assert_eq!(effects, vec![Effect::StopTicking, Effect::PlayAlarm]);
        }
    }

    #[test]
    fn test_half_dial_scenario() {
        let mut machine = DialStateMachine::new();

        machine.handle(DialEvent::DragStart);
        machine.handle(DialEvent::DragMove { angle: 180.0 });
        assert_eq!(machine.session().remaining_seconds(), 1800);

        assert_eq!(machine.handle(DialEvent::DragEnd), vec![Effect::StartTicking]);
        assert_eq!(machine.phase(), DialPhase::Running);

        let alarms: usize = (0..1800)
            .map(|_| {
                machine
                    .handle(DialEvent::Tick)
                    .into_iter()
                    .filter(|e| *e == Effect::PlayAlarm)
                    .count()
            })
            .sum();

        assert_eq!(alarms, 1);
        assert_eq!(machine.phase(), DialPhase::Idle);
        assert_eq!(machine.session().remaining_seconds(), 0);
    }
}
