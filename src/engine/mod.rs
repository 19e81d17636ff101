//! Timer engine for the Visual Timer.
//!
//! This module ties the pure dial state machine to the outside world:
//! - Dispatches dial events into the state machine
//! - Applies the returned effects to the tick driver and the alarm player
//! - Drains pending ticks from the tick channel
//!
//! The engine lives on the UI thread; the tick driver only produces
//! messages, so every transition happens here.

use crossbeam_channel::Receiver;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::dial::{DialEvent, DialStateMachine, Effect};
use crate::sound::AlarmPlayer;
use crate::ticker::{Notifier, Tick, TickDriver};
use crate::types::{DialPhase, TimerSession};

// ============================================================================
// TimerEngine
// ============================================================================

/// Drives the dial state machine and its side effects.
#[derive(Debug)]
pub struct TimerEngine {
    machine: DialStateMachine,
    ticker: TickDriver,
    ticks: Receiver<Tick>,
    alarm: AlarmPlayer,
    alarms_fired: u64,
}

impl TimerEngine {
    /// Creates an engine whose ticks run on `runtime`.
    pub fn new(runtime: Handle, alarm: AlarmPlayer) -> Self {
        let (ticker, ticks) = TickDriver::new(runtime);
        Self::with_ticker(ticker, ticks, alarm)
    }

    /// Creates an engine from an existing tick driver.
    pub fn with_ticker(ticker: TickDriver, ticks: Receiver<Tick>, alarm: AlarmPlayer) -> Self {
        Self {
            machine: DialStateMachine::new(),
            ticker,
            ticks,
            alarm,
            alarms_fired: 0,
        }
    }

    /// Sets a callback run after every tick (typically a repaint request).
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.ticker = self.ticker.with_notifier(notifier);
        self
    }

    /// Applies an event and performs its effects.
    ///
    /// Returns the effects that were applied, in order.
    pub fn dispatch(&mut self, event: DialEvent) -> Vec<Effect> {
        let before = self.machine.phase();
        let effects = self.machine.handle(event);
        let after = self.machine.phase();

        if before != after {
            debug!(
                from = %before,
                to = %after,
                remaining = self.machine.session().remaining_seconds(),
                "Dial phase changed"
            );
        }

        for effect in &effects {
            self.apply(*effect);
        }

        effects
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::StartTicking => {
                if let Err(e) = self.ticker.start() {
                    warn!("Could not start countdown: {}", e);
                }
            }
            Effect::StopTicking => self.ticker.stop(),
            Effect::PlayAlarm => {
                self.alarms_fired += 1;
                let outcome = self.alarm.play();
                info!(?outcome, "Countdown finished");
            }
        }
    }

    /// Drains pending ticks and applies those from the active run.
    ///
    /// Returns the number of ticks applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(tick) = self.ticks.try_recv() {
            if self.ticker.accepts(&tick) {
                self.dispatch(DialEvent::Tick);
                applied += 1;
            } else {
                debug!(generation = tick.generation, "Dropping stale tick");
            }
        }
        applied
    }

    /// Returns the current session.
    pub fn session(&self) -> &TimerSession {
        self.machine.session()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> DialPhase {
        self.machine.phase()
    }

    /// Returns true while the tick driver is running.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    /// Number of alarms fired since the engine was created.
    pub fn alarms_fired(&self) -> u64 {
        self.alarms_fired
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::Duration;

    use crate::sound::{AlarmLocator, MockBeeper, MockSoundPlayer};

    struct Harness {
        engine: TimerEngine,
        beeper: Arc<MockBeeper>,
    }

    /// Engine with no audio output: every alarm becomes a counted beep.
    fn create_engine() -> Harness {
        let beeper = Arc::new(MockBeeper::new());
        let alarm = AlarmPlayer::new(None, Box::new(Arc::clone(&beeper)), AlarmLocator::new());
        Harness {
            engine: TimerEngine::new(Handle::current(), alarm),
            beeper,
        }
    }

    fn set_minutes(engine: &mut TimerEngine, minutes: u32) {
        engine.dispatch(DialEvent::DragStart);
        engine.dispatch(DialEvent::DragMove {
            angle: f64::from(minutes) * 6.0,
        });
        engine.dispatch(DialEvent::DragEnd);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_engine_is_idle() {
        let h = create_engine();
        assert_eq!(h.engine.phase(), DialPhase::Idle);
        assert!(!h.engine.is_ticking());
        assert_eq!(h.engine.alarms_fired(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_release_starts_ticking() {
        let mut h = create_engine();
        set_minutes(&mut h.engine, 5);

        assert_eq!(h.engine.phase(), DialPhase::Running);
        assert!(h.engine.is_ticking());
        assert_eq!(h.engine.session().remaining_seconds(), 300);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pump_applies_ticks() {
        let mut h = create_engine();
        set_minutes(&mut h.engine, 5);

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(h.engine.pump(), 3);
        assert_eq!(h.engine.session().remaining_seconds(), 297);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_minute_countdown_fires_alarm_once() {
        let mut h = create_engine();
        set_minutes(&mut h.engine, 1);

        tokio::time::sleep(Duration::from_millis(60_500)).await;
        assert_eq!(h.engine.pump(), 60);

        assert_eq!(h.engine.phase(), DialPhase::Idle);
        assert_eq!(h.engine.session().remaining_seconds(), 0);
        assert!(!h.engine.is_ticking());
        assert_eq!(h.engine.alarms_fired(), 1);
        assert_eq!(h.beeper.beep_count(), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(h.engine.pump(), 0);
        assert_eq!(h.engine.alarms_fired(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_stops_ticker_before_new_angle() {
        let mut h = create_engine();
        set_minutes(&mut h.engine, 10);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        h.engine.pump();
        assert_eq!(h.engine.session().remaining_seconds(), 598);

        h.engine.dispatch(DialEvent::DragStart);
        assert!(!h.engine.is_ticking());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(h.engine.pump(), 0);
        assert_eq!(h.engine.session().remaining_seconds(), 598);

        h.engine.dispatch(DialEvent::DragMove { angle: 120.0 });
        assert_eq!(h.engine.session().remaining_seconds(), 1200);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_pauses_and_resumes() {
        let mut h = create_engine();
        set_minutes(&mut h.engine, 2);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        h.engine.pump();

        h.engine.dispatch(DialEvent::Tap);
        assert_eq!(h.engine.phase(), DialPhase::Armed);
        assert!(!h.engine.is_ticking());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(h.engine.pump(), 0);
        assert_eq!(h.engine.session().remaining_seconds(), 119);

        h.engine.dispatch(DialEvent::Tap);
        assert!(h.engine.is_ticking());
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(h.engine.pump(), 1);
        assert_eq!(h.engine.session().remaining_seconds(), 118);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_buffered_before_pause_are_dropped() {
        let mut h = create_engine();
        set_minutes(&mut h.engine, 3);
        tokio::time::sleep(Duration::from_millis(2500)).await;

        // Two ticks are waiting; pause and resume before the UI drains them
        h.engine.dispatch(DialEvent::Tap);
        h.engine.dispatch(DialEvent::Tap);

        assert_eq!(h.engine.pump(), 0);
        assert_eq!(h.engine.session().remaining_seconds(), 180);
    }

    #[tokio::test(start_paused = true)]
    async fn test_alarm_played_through_sound_player() {
        let sound = Arc::new(MockSoundPlayer::new());
        let beeper = Arc::new(MockBeeper::new());
        let alarm = AlarmPlayer::new(
            Some(Box::new(Arc::clone(&sound))),
            Box::new(Arc::clone(&beeper)),
            AlarmLocator::new(),
        );
        let mut engine = TimerEngine::new(Handle::current(), alarm);
        set_minutes(&mut engine, 1);

        for _ in 0..60 {
            engine.dispatch(DialEvent::Tick);
        }

        assert_eq!(engine.alarms_fired(), 1);
        assert_eq!(sound.play_count(), 1);
        assert_eq!(beeper.beep_count(), 0);
    }
}
