//! Platform alert tone used when the alarm cannot be played.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Emits a single platform-default alert tone.
pub trait Beeper {
    fn beep(&self);
}

impl<T: Beeper + ?Sized> Beeper for Arc<T> {
    fn beep(&self) {
        (**self).beep()
    }
}

/// The operating system's alert sound.
///
/// On macOS this is `NSBeep`; elsewhere the terminal bell is rung.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBeeper;

impl Beeper for SystemBeeper {
    fn beep(&self) {
        debug!("Emitting system beep");
        platform_beep();
    }
}

#[cfg(target_os = "macos")]
fn platform_beep() {
    objc2_app_kit::NSBeep();
}

#[cfg(not(target_os = "macos"))]
fn platform_beep() {
    use std::io::Write;

    let mut stderr = std::io::stderr();
    let _ = stderr.write_all(b"\x07");
    let _ = stderr.flush();
}

/// Mock beeper for testing.
#[derive(Debug, Default)]
pub struct MockBeeper {
    beeps: AtomicUsize,
}

impl MockBeeper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn beep_count(&self) -> usize {
        self.beeps.load(Ordering::SeqCst)
    }
}

impl Beeper for MockBeeper {
    fn beep(&self) {
        self.beeps.fetch_add(1, Ordering::SeqCst);
    }
}
