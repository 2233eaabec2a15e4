//! Shared helpers for integration tests: an in-memory sink that records
//! every call in order.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use order_recorder::camera::{Frame, Resolution, SyntheticSource};
use order_recorder::session::{SessionConfig, SessionController};
use order_recorder::sink::{Encoding, SinkError, SinkFactory, VideoSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Created(PathBuf),
    Frame(PathBuf),
    Finished(PathBuf),
}

/// Sink factory whose sinks append to a shared event log.
#[derive(Clone, Default)]
pub struct MemorySinks {
    pub events: Arc<Mutex<Vec<SinkEvent>>>,
    pub last_frame: Arc<Mutex<Option<Frame>>>,
}

impl MemorySinks {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Created(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn finished(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Finished(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn frames_for(&self, path: &Path) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SinkEvent::Frame(p) if p == path))
            .count()
    }
}

struct MemorySink {
    path: PathBuf,
    events: Arc<Mutex<Vec<SinkEvent>>>,
    last_frame: Arc<Mutex<Option<Frame>>>,
}

impl VideoSink for MemorySink {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.events.lock().unwrap().push(SinkEvent::Frame(self.path.clone()));
        *self.last_frame.lock().unwrap() = Some(frame.clone());
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<(), SinkError> {
        self.events.lock().unwrap().push(SinkEvent::Finished(self.path.clone()));
        Ok(())
    }
}

impl SinkFactory for MemorySinks {
    fn create(&mut self, path: &Path, _encoding: &Encoding) -> Result<Box<dyn VideoSink>, SinkError> {
        self.events.lock().unwrap().push(SinkEvent::Created(path.to_path_buf()));
        Ok(Box::new(MemorySink {
            path: path.to_path_buf(),
            events: self.events.clone(),
            last_frame: self.last_frame.clone(),
        }))
    }
}

/// Controller over a test pattern with a fast record tick.
pub fn controller(dir: &Path) -> (SessionController<SyntheticSource, MemorySinks>, MemorySinks) {
    let sinks = MemorySinks::default();
    let mut config = SessionConfig::new(dir);
    config.frame_interval = Duration::from_millis(5);
    let controller = SessionController::new(
        SyntheticSource::new(Resolution::VGA, 60),
        sinks.clone(),
        config,
    );
    (controller, sinks)
}

/// Poll until `cond` holds or two seconds pass.
pub fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    for _ in 0..400 {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}
