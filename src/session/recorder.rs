//! The recording loop: stamp frames from the feed and append them to a sink.

use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::naming::OrderId;
use crate::camera::{resize_frame, FeedPoll, FrameFeed};
use crate::overlay::{self, OverlayStyle};
use crate::sink::{Encoding, SinkError, VideoSink};

/// What a finalized session produced.
#[derive(Debug, Clone)]
pub struct RecordingSummary {
    pub order_id: OrderId,
    pub output_path: PathBuf,
    pub frames_written: u64,
    pub started_at: DateTime<Local>,
    pub stopped_at: DateTime<Local>,
}

/// Everything the loop needs, moved into its thread.
pub struct RecorderJob {
    pub order_id: OrderId,
    pub output_path: PathBuf,
    pub started_at: DateTime<Local>,
    pub feed: FrameFeed,
    pub sink: Box<dyn VideoSink>,
    pub encoding: Encoding,
    pub frame_interval: Duration,
    pub style: OverlayStyle,
}

/// Handle to a running recording loop.
pub struct RecorderHandle {
    stop_tx: Sender<()>,
    thread: JoinHandle<Result<RecordingSummary, SinkError>>,
}

impl RecorderHandle {
    /// Spawn the loop on its own thread.
    pub fn spawn(job: RecorderJob) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name(format!("recorder-{}", job.order_id))
            .spawn(move || run_recorder(job, stop_rx))?;
        Ok(Self { stop_tx, thread })
    }

    /// Signal the loop, wait for it, and return what the sink produced.
    pub fn stop(self) -> Result<RecordingSummary, SinkError> {
        // The loop may already have exited on its own (feed closed)
        let _ = self.stop_tx.send(());
        match self.thread.join() {
            Ok(result) => result,
            Err(_) => Err(SinkError::Io(std::io::Error::other("recorder thread panicked"))),
        }
    }
}

/// Loop body. Ends on a stop message, a dropped handle, a closed feed, or
/// a sink write error; always finalizes the sink.
pub fn run_recorder(job: RecorderJob, stop_rx: Receiver<()>) -> Result<RecordingSummary, SinkError> {
    let RecorderJob {
        order_id,
        output_path,
        started_at,
        mut feed,
        mut sink,
        encoding,
        frame_interval,
        style,
    } = job;

    let mut frames_written = 0u64;
    let mut write_error = None;

    loop {
        match stop_rx.recv_timeout(frame_interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        let frame = match feed.poll() {
            FeedPoll::Frame(frame) => frame,
            FeedPoll::Idle => continue,
            FeedPoll::Closed => {
                log::warn!("Camera closed while recording order {}", order_id);
                break;
            }
        };

        let mut stamped = resize_frame(&frame, encoding.resolution);
        overlay::stamp(&mut stamped, order_id.as_str(), &Local::now(), &style);

        if let Err(e) = sink.write_frame(&stamped) {
            log::error!("Writing frame for order {} failed: {}", order_id, e);
            write_error = Some(e);
            break;
        }
        frames_written += 1;
    }

    let finished = sink.finish();
    if let Some(e) = write_error {
        return Err(e);
    }
    finished?;

    Ok(RecordingSummary {
        order_id,
        output_path,
        frames_written,
        started_at,
        stopped_at: Local::now(),
    })
}
