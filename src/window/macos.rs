//! AppKit window tweaks that winit does not expose.

use objc2::MainThreadMarker;
use objc2_app_kit::{NSView, NSWindowCollectionBehavior};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use tracing::debug;

use super::WindowError;

/// Makes the window visible on every Space.
pub(super) fn join_all_spaces(frame: &eframe::Frame) -> Result<(), WindowError> {
    MainThreadMarker::new().ok_or(WindowError::NotMainThread)?;

    let handle = frame
        .window_handle()
        .map_err(|e| WindowError::HandleUnavailable(e.to_string()))?;
    let RawWindowHandle::AppKit(appkit) = handle.as_raw() else {
        return Err(WindowError::UnsupportedHandle);
    };

    // SAFETY: winit keeps the NSView alive for as long as the window exists,
    // and we are on the main thread.
    let view: &NSView = unsafe { appkit.ns_view.cast::<NSView>().as_ref() };
    let window = view
        .window()
        .ok_or_else(|| WindowError::HandleUnavailable("view has no window".to_string()))?;

    let behavior = window.collectionBehavior() | NSWindowCollectionBehavior::CanJoinAllSpaces;
    window.setCollectionBehavior(behavior);

    debug!("Window joined all Spaces");
    Ok(())
}
