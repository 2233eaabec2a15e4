//! The capture-device seam used by the session controller.

use super::feed::FrameFeed;
use super::types::CameraError;

/// A device that can be opened, read on its own thread, and released.
///
/// Implementors own the single reader of the device and hand out
/// [`FrameFeed`] subscriptions. Releasing the device must close every feed
/// that was handed out.
pub trait FrameSource: Send {
    /// Open the device and start the reader thread.
    ///
    /// # Errors
    /// * `CameraError::AlreadyRunning` - If the reader is already running
    /// * any error from opening the underlying device
    fn start(&mut self) -> Result<(), CameraError>;

    /// Stop the reader thread and release the device. No-op when stopped.
    fn stop(&mut self);

    /// Whether the reader thread is running.
    fn is_running(&self) -> bool;

    /// A new subscription to the latest frame, or `None` when stopped.
    fn subscribe(&self) -> Option<FrameFeed>;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn start(&mut self) -> Result<(), CameraError> {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }

    fn subscribe(&self) -> Option<FrameFeed> {
        (**self).subscribe()
    }
}
