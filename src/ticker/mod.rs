//! Tick driver for the Visual Timer.
//!
//! A tokio task fires once per [`TICK_PERIOD`] and sends a [`Tick`] over a
//! crossbeam channel. The UI thread drains the channel and feeds the ticks
//! into the dial state machine, so every state transition stays on one
//! thread.
//!
//! Each run of the driver gets a new generation number. Ticks carry the
//! generation they were produced by, which lets the consumer discard ticks
//! buffered before a stop.

use std::fmt;
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

/// Period between two ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Callback invoked after every tick, used to wake the UI.
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

// ============================================================================
// Tick
// ============================================================================

/// One firing of the tick driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Generation of the driver run that produced this tick
    pub generation: u64,
}

// ============================================================================
// TickerError
// ============================================================================

/// Errors from the tick driver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TickerError {
    /// `start` was called while a run is active.
    #[error("tick driver is already running")]
    AlreadyRunning,
}

// ============================================================================
// TickDriver
// ============================================================================

/// Repeating 1-second tick source.
pub struct TickDriver {
    runtime: Handle,
    period: Duration,
    tx: Sender<Tick>,
    task: Option<JoinHandle<()>>,
    generation: u64,
    notifier: Option<Notifier>,
}

impl TickDriver {
    /// Creates a stopped driver with the default period, returning the
    /// receiving end of its tick channel.
    pub fn new(runtime: Handle) -> (Self, Receiver<Tick>) {
        Self::with_period(runtime, TICK_PERIOD)
    }

    /// Creates a stopped driver with a custom period.
    pub fn with_period(runtime: Handle, period: Duration) -> (Self, Receiver<Tick>) {
        let (tx, rx) = unbounded();
        let driver = Self {
            runtime,
            period,
            tx,
            task: None,
            generation: 0,
            notifier: None,
        };
        (driver, rx)
    }

    /// Sets a callback invoked after every tick.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Starts ticking. The first tick arrives one period from now.
    ///
    /// # Errors
    ///
    /// Returns `TickerError::AlreadyRunning` if the driver is running.
    pub fn start(&mut self) -> Result<(), TickerError> {
        if self.is_running() {
            return Err(TickerError::AlreadyRunning);
        }

        self.generation += 1;
        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();
        let notifier = self.notifier.clone();

        self.task = Some(self.runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                if tx.send(Tick { generation }).is_err() {
                    debug!("Tick receiver dropped, ending tick task");
                    break;
                }
                if let Some(notify) = &notifier {
                    notify();
                }
            }
        }));

        debug!(generation, "Tick driver started");
        Ok(())
    }

    /// Stops ticking. Stopping a stopped driver does nothing.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(generation = self.generation, "Tick driver stopped");
        }
    }

    /// Returns true while a run is active.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Generation of the current (or last) run.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true if `tick` belongs to the active run.
    pub fn accepts(&self, tick: &Tick) -> bool {
        self.is_running() && tick.generation == self.generation
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for TickDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickDriver")
            .field("period", &self.period)
            .field("generation", &self.generation)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
