//! Test-pattern frame source for running without a webcam.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::feed::{frame_channel, FrameFeed, FramePublisher};
use super::source::FrameSource;
use super::types::{CameraError, Frame, Resolution};

/// Classic eight-bar pattern, left to right.
const BARS: [[u8; 3]; 8] = [
    [255, 255, 255],
    [255, 255, 0],
    [0, 255, 255],
    [0, 255, 0],
    [255, 0, 255],
    [255, 0, 0],
    [0, 0, 255],
    [0, 0, 0],
];

/// Generates color bars with a sweeping gray line on a background thread.
///
/// Behaves like [`CameraCapture`](super::CameraCapture) from the session
/// controller's point of view: one reader thread, feeds close on stop.
pub struct SyntheticSource {
    resolution: Resolution,
    interval: Duration,
    thread: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
    feed: Option<FrameFeed>,
    starts: u32,
}

impl SyntheticSource {
    pub fn new(resolution: Resolution, fps: u32) -> Self {
        Self {
            resolution,
            interval: Duration::from_millis(1000 / u64::from(fps.max(1))),
            thread: None,
            stop_signal: Arc::new(AtomicBool::new(false)),
            feed: None,
            starts: 0,
        }
    }

    /// How many times the source has been started.
    pub fn start_count(&self) -> u32 {
        self.starts
    }
}

/// Render pattern frame number `tick`.
pub fn pattern_frame(resolution: Resolution, tick: u64) -> Frame {
    let width = resolution.width.max(1);
    let height = resolution.height;
    let sweep = (tick % u64::from(width)) as u32;
    let mut data = Vec::with_capacity(resolution.rgb_len());

    for _y in 0..height {
        for x in 0..width {
            if x == sweep {
                data.extend_from_slice(&[128, 128, 128]);
            } else {
                let bar = (x as usize * BARS.len()) / width as usize;
                data.extend_from_slice(&BARS[bar]);
            }
        }
    }

    Frame::new(data, width, height)
}

fn run_pattern(
    resolution: Resolution,
    interval: Duration,
    publisher: FramePublisher,
    stop: Arc<AtomicBool>,
) {
    let mut tick = 0u64;
    while !stop.load(Ordering::Relaxed) {
        publisher.publish(pattern_frame(resolution, tick));
        tick = tick.wrapping_add(1);
        thread::sleep(interval);
    }
}

impl FrameSource for SyntheticSource {
    fn start(&mut self) -> Result<(), CameraError> {
        if self.is_running() {
            return Err(CameraError::AlreadyRunning);
        }

        self.stop_signal.store(false, Ordering::SeqCst);
        let (publisher, feed) = frame_channel();
        let stop = Arc::clone(&self.stop_signal);
        let (resolution, interval) = (self.resolution, self.interval);

        let handle = thread::Builder::new()
            .name("test-pattern".to_string())
            .spawn(move || run_pattern(resolution, interval, publisher, stop))
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;

        self.thread = Some(handle);
        self.feed = Some(feed);
        self.starts += 1;
        log::info!("Test pattern streaming at {}", self.resolution);
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
        self.feed = None;
    }

    fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn subscribe(&self) -> Option<FrameFeed> {
        if self.is_running() {
            self.feed.clone()
        } else {
            None
        }
    }
}

impl Drop for SyntheticSource {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FeedPoll;

    #[test]
    fn test_pattern_frame_bars() {
        let frame = pattern_frame(Resolution { width: 16, height: 2 }, 15);
        assert_eq!(frame.data.len(), 16 * 2 * 3);
        assert_eq!(frame.pixel(0, 0), Some([255, 255, 255]));
        assert_eq!(frame.pixel(3, 1), Some([255, 255, 0]));
        // Sweep line sits on column 15 for tick 15
        assert_eq!(frame.pixel(15, 0), Some([128, 128, 128]));
    }

    #[test]
    fn test_start_publishes_and_stop_closes_feed() {
        let mut source = SyntheticSource::new(Resolution { width: 8, height: 4 }, 200);
        source.start().expect("synthetic source should start");
        assert!(matches!(source.start(), Err(CameraError::AlreadyRunning)));

        let mut feed = source.subscribe().expect("running source has a feed");
        let mut got_frame = false;
        for _ in 0..200 {
            if let FeedPoll::Frame(frame) = feed.poll() {
                assert_eq!(frame.width, 8);
                got_frame = true;
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert!(got_frame, "expected at least one frame");

        source.stop();
        assert!(!source.is_running());
        assert!(source.subscribe().is_none());
        assert!(matches!(feed.poll(), FeedPoll::Closed));
    }
}
