//! Camera capture handle and public API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

use super::capture_loop::run_capture_loop;
use super::device::{find_device, list_devices};
use super::feed::{frame_channel, FrameFeed};
use super::source::FrameSource;
use super::types::{CameraError, CameraSettings, Resolution};

/// Camera capture handle.
///
/// The camera itself is opened inside a background thread (nokhwa cameras
/// are not `Send` on every backend). That thread is the only reader of the
/// device; every frame it decodes is published to the [`FrameFeed`]s handed
/// out by [`subscribe`](FrameSource::subscribe).
pub struct CameraCapture {
    /// Capture thread handle
    capture_thread: Option<JoinHandle<()>>,
    /// Signal to stop capture thread
    stop_signal: Arc<AtomicBool>,
    /// Feed kept alive so subscribers can be cloned from it
    feed: Option<FrameFeed>,
    /// Current settings
    settings: CameraSettings,
    /// Actual resolution (set after camera opens)
    actual_resolution: Option<Resolution>,
    /// Actual FPS (set after camera opens)
    actual_fps: Option<u32>,
}

impl std::fmt::Debug for CameraCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraCapture")
            .field("settings", &self.settings)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl CameraCapture {
    /// Create a capture handle for the given settings.
    ///
    /// This validates that the camera exists but doesn't open the stream
    /// until `start()` is called.
    ///
    /// # Errors
    /// * `CameraError::DeviceNotFound` - If the device index doesn't exist
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        let devices = list_devices()?;
        find_device(&devices, settings.device_index)?;
        Ok(Self::new(settings))
    }

    /// Create a capture handle without checking that the device exists.
    ///
    /// Problems surface from `start()` instead.
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            capture_thread: None,
            stop_signal: Arc::new(AtomicBool::new(false)),
            feed: None,
            settings,
            actual_resolution: None,
            actual_fps: None,
        }
    }

    /// Get the current camera settings.
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Resolution the camera negotiated. `None` until started.
    pub fn actual_resolution(&self) -> Option<Resolution> {
        self.actual_resolution
    }

    /// Frame rate the camera negotiated. `None` until started.
    pub fn actual_fps(&self) -> Option<u32> {
        self.actual_fps
    }

    fn join_thread(&mut self) {
        if let Some(handle) = self.capture_thread.take() {
            let _ = handle.join();
        }
    }
}

impl FrameSource for CameraCapture {
    /// Start capturing frames in a background thread.
    ///
    /// Blocks until the thread reports whether the camera opened.
    fn start(&mut self) -> Result<(), CameraError> {
        if self.is_running() {
            return Err(CameraError::AlreadyRunning);
        }

        self.stop_signal.store(false, Ordering::SeqCst);

        let (publisher, feed) = frame_channel();
        let stop = Arc::clone(&self.stop_signal);
        let settings = self.settings.clone();

        // Channel to receive actual resolution/fps from thread
        let (info_tx, info_rx) = mpsc::channel::<Result<(Resolution, u32), CameraError>>();

        let handle = std::thread::Builder::new()
            .name("camera-capture".to_string())
            .spawn(move || run_capture_loop(settings, publisher, stop, info_tx))
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;
        self.capture_thread = Some(handle);

        match info_rx.recv() {
            Ok(Ok((res, fps))) => {
                log::info!(
                    "Camera {} streaming at {} @ {} fps",
                    self.settings.device_index,
                    res,
                    fps
                );
                self.actual_resolution = Some(res);
                self.actual_fps = Some(fps);
                self.feed = Some(feed);
                Ok(())
            }
            Ok(Err(e)) => {
                self.stop_signal.store(true, Ordering::SeqCst);
                self.join_thread();
                Err(e)
            }
            Err(_) => {
                self.stop_signal.store(true, Ordering::SeqCst);
                self.join_thread();
                Err(CameraError::StreamFailed(
                    "Capture thread terminated unexpectedly".to_string(),
                ))
            }
        }
    }

    /// Signal the capture thread to stop and wait for it to finish.
    fn stop(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        self.join_thread();
        if self.feed.take().is_some() {
            log::info!("Camera {} released", self.settings.device_index);
        }
    }

    fn is_running(&self) -> bool {
        self.capture_thread
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    fn subscribe(&self) -> Option<FrameFeed> {
        if self.is_running() {
            self.feed.clone()
        } else {
            None
        }
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.stop();
    }
}
