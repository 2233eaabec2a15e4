//! Session lifecycle: the single owner of the device, the sink and the
//! current order.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::naming::{self, OrderId};
use super::recorder::{RecorderHandle, RecorderJob, RecordingSummary};
use crate::camera::{CameraError, FrameSource};
use crate::overlay::OverlayStyle;
use crate::preview::{PreviewHandle, PreviewSettings, PreviewSurface};
use crate::sink::{Encoding, SinkError, SinkFactory};

/// Where and how sessions are recorded.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory receiving the output files (created if absent)
    pub output_dir: PathBuf,
    pub encoding: Encoding,
    /// Pause between recorded frames
    pub frame_interval: Duration,
    pub style: OverlayStyle,
}

impl SessionConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            encoding: Encoding::FIXED,
            frame_interval: Duration::from_millis(50),
            style: OverlayStyle::default(),
        }
    }
}

/// Details of the session that just started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub order_id: OrderId,
    pub output_path: PathBuf,
    pub started_at: DateTime<Local>,
}

/// Snapshot of the controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Waiting for an order id
    Idle,
    Recording(SessionInfo),
    /// Device released by `shutdown()`; a new `start()` reopens it
    Closed,
}

/// Errors from session transitions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("{0}")]
    Camera(#[from] CameraError),

    #[error("{0}")]
    Sink(#[from] SinkError),

    #[error("Failed to create output directory '{}': {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),
}

struct ActiveSession {
    info: SessionInfo,
    recorder: RecorderHandle,
}

/// Owns the capture device, the sink factory and at most one session.
///
/// All transitions go through `&mut self`, so the UI thread that owns the
/// controller is the only writer. Worker threads get owned copies of what
/// they need when they are spawned.
pub struct SessionController<S: FrameSource, F: SinkFactory> {
    source: S,
    sinks: F,
    config: SessionConfig,
    preview: Option<(PreviewSurface, PreviewSettings)>,
    preview_handle: Option<PreviewHandle>,
    active: Option<ActiveSession>,
    saved: Vec<RecordingSummary>,
    closed: bool,
}

impl<S: FrameSource, F: SinkFactory> SessionController<S, F> {
    pub fn new(source: S, sinks: F, config: SessionConfig) -> Self {
        Self {
            source,
            sinks,
            config,
            preview: None,
            preview_handle: None,
            active: None,
            saved: Vec::new(),
            closed: false,
        }
    }

    /// Run a preview loop into `surface` whenever the device is open.
    pub fn with_preview(mut self, surface: PreviewSurface, settings: PreviewSettings) -> Self {
        self.preview = Some((surface, settings));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Every recording finalized so far, oldest first.
    pub fn saved(&self) -> &[RecordingSummary] {
        &self.saved
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    pub fn status(&self) -> SessionStatus {
        match (&self.active, self.closed) {
            (Some(active), _) => SessionStatus::Recording(active.info.clone()),
            (None, true) => SessionStatus::Closed,
            (None, false) => SessionStatus::Idle,
        }
    }

    /// Current order id while recording.
    pub fn current_order(&self) -> Option<&OrderId> {
        self.active.as_ref().map(|a| &a.info.order_id)
    }

    /// Start recording `raw_order_id`.
    ///
    /// Blank input is ignored (`Ok(None)`). An active session is finalized
    /// first. The device is opened if it isn't running.
    pub fn start(&mut self, raw_order_id: &str) -> Result<Option<SessionInfo>, SessionError> {
        let Some(order_id) = OrderId::parse(raw_order_id) else {
            log::debug!("Ignoring blank order id");
            return Ok(None);
        };

        if self.active.is_some() {
            log::info!("New order {} while recording, saving the current one first", order_id);
            if let Err(e) = self.stop() {
                log::error!("Finalizing previous recording failed: {}", e);
            }
        }

        self.ensure_device()?;
        create_output_dir(&self.config.output_dir)?;

        let started_at = Local::now();
        let output_path = naming::output_path(
            &self.config.output_dir,
            &order_id,
            &started_at,
            self.config.encoding.extension,
        );

        let feed = self.source.subscribe().ok_or_else(|| {
            CameraError::StreamFailed("capture stopped before recording began".to_string())
        })?;
        let sink = self.sinks.create(&output_path, &self.config.encoding)?;

        let info = SessionInfo {
            order_id: order_id.clone(),
            output_path: output_path.clone(),
            started_at,
        };
        let recorder = RecorderHandle::spawn(RecorderJob {
            order_id,
            output_path,
            started_at,
            feed,
            sink,
            encoding: self.config.encoding,
            frame_interval: self.config.frame_interval,
            style: self.config.style,
        })
        .map_err(SessionError::Spawn)?;

        log::info!(
            "Recording order {} to {}",
            info.order_id,
            info.output_path.display()
        );
        self.closed = false;
        self.active = Some(ActiveSession {
            info: info.clone(),
            recorder,
        });
        Ok(Some(info))
    }

    /// Finalize the active session. No-op (`Ok(None)`) when idle.
    pub fn stop(&mut self) -> Result<Option<RecordingSummary>, SessionError> {
        let Some(active) = self.active.take() else {
            return Ok(None);
        };

        let summary = active.recorder.stop()?;
        let file_name = summary
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::info!(
            "Recording saved as {} in {} ({} frames)",
            file_name,
            self.config.output_dir.display(),
            summary.frames_written
        );
        self.saved.push(summary.clone());
        Ok(Some(summary))
    }

    /// Stop, release the device and enter the `Closed` state.
    ///
    /// Returns the summary of the session this finalized, if any.
    pub fn shutdown(&mut self) -> Result<Option<RecordingSummary>, SessionError> {
        let result = self.stop();
        self.source.stop();
        if let Some(handle) = self.preview_handle.take() {
            handle.join();
        }
        if !self.closed {
            log::info!("Capture device released");
        }
        self.closed = true;
        result
    }

    fn ensure_device(&mut self) -> Result<(), SessionError> {
        if self.source.is_running() {
            return Ok(());
        }

        // A previous reader may have died on its own; its feed is closed
        if let Some(handle) = self.preview_handle.take() {
            handle.join();
        }

        self.source.start()?;

        if let Some((surface, settings)) = &self.preview
            && let Some(feed) = self.source.subscribe()
        {
            let handle = PreviewHandle::spawn(feed, surface.clone(), *settings)
                .map_err(SessionError::Spawn)?;
            self.preview_handle = Some(handle);
        }
        Ok(())
    }
}

impl<S: FrameSource, F: SinkFactory> Drop for SessionController<S, F> {
    fn drop(&mut self) {
        if self.active.is_some() || self.source.is_running() {
            if let Err(e) = self.shutdown() {
                log::error!("Shutdown on drop failed: {}", e);
            }
        }
    }
}

fn create_output_dir(dir: &Path) -> Result<(), SessionError> {
    std::fs::create_dir_all(dir).map_err(|source| SessionError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}
