//! Preview loop: keeps the kiosk's preview surface fed with the newest frame.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::ascii::{self, AsciiFrame, CharSet};
use crate::camera::{FeedPoll, FrameFeed};

/// Fixed size and cadence of the preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSettings {
    /// Grid width in character cells
    pub columns: u16,
    /// Grid height in character cells
    pub rows: u16,
    /// Pause between polls of the feed
    pub interval: Duration,
    pub charset: CharSet,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            columns: 120,
            rows: 32,
            interval: Duration::from_millis(30),
            charset: CharSet::default(),
        }
    }
}

/// Shared slot holding the latest rendered preview.
///
/// Written by the preview loop, read by the UI on every redraw.
#[derive(Debug, Clone, Default)]
pub struct PreviewSurface {
    inner: Arc<Mutex<Option<AsciiFrame>>>,
}

impl PreviewSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, frame: AsciiFrame) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(frame);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = None;
        }
    }

    /// Copy of the latest preview, if any.
    pub fn snapshot(&self) -> Option<AsciiFrame> {
        self.inner.lock().ok()?.clone()
    }

    pub fn has_frame(&self) -> bool {
        self.inner.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

/// Handle to a running preview loop.
pub struct PreviewHandle {
    thread: JoinHandle<u64>,
}

impl PreviewHandle {
    /// Spawn the loop. It runs until `feed` closes.
    pub fn spawn(
        feed: FrameFeed,
        surface: PreviewSurface,
        settings: PreviewSettings,
    ) -> std::io::Result<Self> {
        let thread = thread::Builder::new()
            .name("preview".to_string())
            .spawn(move || run_preview(feed, surface, settings))?;
        Ok(Self { thread })
    }

    /// Wait for the loop to end. Returns the number of frames rendered.
    ///
    /// The caller must close the feed first (release the device), or this
    /// blocks forever.
    pub fn join(self) -> u64 {
        self.thread.join().unwrap_or(0)
    }
}

/// Loop body. Returns the number of frames rendered once the feed closes.
pub fn run_preview(mut feed: FrameFeed, surface: PreviewSurface, settings: PreviewSettings) -> u64 {
    let mut cells = Vec::new();
    let mut rendered = 0u64;

    loop {
        match feed.poll() {
            FeedPoll::Frame(frame) => {
                surface.set(ascii::render(
                    &frame,
                    settings.columns,
                    settings.rows,
                    settings.charset,
                    &mut cells,
                ));
                rendered += 1;
            }
            FeedPoll::Idle => {}
            FeedPoll::Closed => break,
        }
        thread::sleep(settings.interval);
    }

    surface.clear();
    log::debug!("Preview loop stopped after {} frames", rendered);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{frame_channel, Frame, Resolution};
    use std::time::Instant;

    fn fast_settings() -> PreviewSettings {
        PreviewSettings {
            columns: 8,
            rows: 4,
            interval: Duration::from_millis(1),
            charset: CharSet::Standard,
        }
    }

    #[test]
    fn test_preview_renders_then_clears_on_close() {
        let (publisher, feed) = frame_channel();
        let surface = PreviewSurface::new();
        let handle = PreviewHandle::spawn(feed, surface.clone(), fast_settings()).unwrap();

        publisher.publish(Frame::filled(Resolution::VGA, [255, 255, 255]));

        let deadline = Instant::now() + Duration::from_secs(2);
        let mut seen = None;
        while Instant::now() < deadline {
            if let Some(frame) = surface.snapshot() {
                seen = Some(frame);
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        let frame = seen.expect("preview should render a frame");
        assert_eq!((frame.width, frame.height), (8, 4));
        assert!(frame.chars.iter().all(|&c| c == '@'));

        drop(publisher);
        assert!(handle.join() >= 1);
        assert!(!surface.has_frame(), "surface cleared when the device closes");
    }
}
