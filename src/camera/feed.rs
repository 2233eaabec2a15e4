//! Latest-frame fan-out between the capture thread and its consumers.
//!
//! The capture thread is the only reader of the device. It publishes each
//! frame into a `watch` channel; the preview loop and the recording loop
//! each hold their own [`FrameFeed`] and only ever see the newest frame.
//! Dropping the [`FramePublisher`] closes every feed.

use std::sync::Arc;
use tokio::sync::watch;

use super::types::Frame;

/// Result of polling a [`FrameFeed`].
#[derive(Debug, Clone)]
pub enum FeedPoll {
    /// A frame newer than the last one this feed returned
    Frame(Arc<Frame>),
    /// Nothing new since the last poll
    Idle,
    /// The capture side has stopped
    Closed,
}

/// Producer half, owned by whoever reads the device.
#[derive(Debug)]
pub struct FramePublisher {
    tx: watch::Sender<Option<Arc<Frame>>>,
}

impl FramePublisher {
    /// Replace the latest frame. Never blocks, never fails.
    pub fn publish(&self, frame: Frame) {
        self.tx.send_replace(Some(Arc::new(frame)));
    }
}

/// Consumer half. Clone it to get an independent cursor.
#[derive(Debug, Clone)]
pub struct FrameFeed {
    rx: watch::Receiver<Option<Arc<Frame>>>,
}

impl FrameFeed {
    /// Non-blocking poll for a frame newer than the last one seen.
    pub fn poll(&mut self) -> FeedPoll {
        match self.rx.has_changed() {
            Ok(true) => match self.rx.borrow_and_update().clone() {
                Some(frame) => FeedPoll::Frame(frame),
                None => FeedPoll::Idle,
            },
            Ok(false) => FeedPoll::Idle,
            Err(_) => FeedPoll::Closed,
        }
    }
}

/// Create a connected publisher/feed pair.
pub fn frame_channel() -> (FramePublisher, FrameFeed) {
    let (tx, rx) = watch::channel(None);
    (FramePublisher { tx }, FrameFeed { rx })
}
