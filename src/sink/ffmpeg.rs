//! ffmpeg-backed sink: raw RGB frames on stdin, encoded file on disk.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::{check_frame_size, Encoding, SinkError, SinkFactory, VideoSink};
use crate::camera::Frame;

/// Lines of encoder stderr kept for error reports.
const STDERR_TAIL: usize = 20;

/// How long ffmpeg gets to write the trailer after stdin closes.
const FINALIZE_GRACE: Duration = Duration::from_secs(5);

/// Build ffmpeg arguments for encoding raw RGB24 frames from stdin.
pub fn encoder_args(path: &Path, encoding: &Encoding) -> Vec<String> {
    let size = encoding.resolution.to_string();
    let fps = encoding.fps.to_string();
    vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "warning".into(),
        "-y".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pix_fmt".into(),
        "rgb24".into(),
        "-s".into(),
        size,
        "-r".into(),
        fps.clone(),
        "-i".into(),
        "-".into(),
        "-an".into(),
        "-c:v".into(),
        encoding.codec.ffmpeg_encoder().into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-r".into(),
        fps,
        "-movflags".into(),
        "+faststart".into(),
        path.to_string_lossy().into_owned(),
    ]
}

/// A running ffmpeg encoder for one output file.
pub struct FfmpegSink {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr_thread: Option<JoinHandle<VecDeque<String>>>,
    encoding: Encoding,
    path: PathBuf,
    finished: bool,
}

impl FfmpegSink {
    /// Spawn `program` encoding to `path`.
    pub fn spawn(program: &str, path: &Path, encoding: &Encoding) -> Result<Self, SinkError> {
        let mut child = Command::new(program)
            .args(encoder_args(path, encoding))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SinkError::EncoderNotFound(program.to_string())
                } else {
                    SinkError::SpawnFailed(e)
                }
            })?;

        let stdin = child.stdin.take();
        let stderr_thread = child.stderr.take().map(|stderr| {
            thread::spawn(move || {
                let mut tail = VecDeque::with_capacity(STDERR_TAIL);
                for line in BufReader::new(stderr).lines() {
                    let Ok(line) = line else { break };
                    log::debug!("[ffmpeg] {}", line);
                    if tail.len() == STDERR_TAIL {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
                tail
            })
        });

        log::debug!("Encoder started for {}", path.display());
        Ok(Self {
            child,
            stdin,
            stderr_thread,
            encoding: *encoding,
            path: path.to_path_buf(),
            finished: false,
        })
    }

    fn stderr_tail(&mut self) -> String {
        self.stderr_thread
            .take()
            .and_then(|h| h.join().ok())
            .map(|lines| Vec::from(lines).join("\n"))
            .unwrap_or_default()
    }

    /// Close stdin and wait for ffmpeg to write the trailer.
    ///
    /// If it does not exit within the grace period it gets SIGINT, then
    /// SIGKILL.
    fn finalize(&mut self) -> Result<ExitStatus, SinkError> {
        self.finished = true;
        drop(self.stdin.take());

        let start = Instant::now();
        let mut interrupted = false;
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(status);
            }
            if start.elapsed() > FINALIZE_GRACE * 2 {
                log::warn!("Encoder for {} did not exit, killing", self.path.display());
                let _ = self.child.kill();
                return Ok(self.child.wait()?);
            }
            if !interrupted && start.elapsed() > FINALIZE_GRACE {
                interrupted = true;
                interrupt(&mut self.child);
            }
            thread::sleep(Duration::from_millis(20));
        }
    }
}

#[cfg(unix)]
fn interrupt(child: &mut Child) {
    // SIGINT lets ffmpeg write the container trailer before exiting.
    unsafe {
        libc::kill(child.id() as i32, libc::SIGINT);
    }
}

#[cfg(not(unix))]
fn interrupt(child: &mut Child) {
    let _ = child.kill();
}

impl VideoSink for FfmpegSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), SinkError> {
        check_frame_size(frame, self.encoding.resolution)?;
        let stdin = self.stdin.as_mut().ok_or_else(|| {
            SinkError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "encoder input already closed",
            ))
        })?;
        if let Err(e) = stdin.write_all(&frame.data) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                // ffmpeg died; report why instead of the bare pipe error
                let status = self.finalize()?;
                return Err(SinkError::ProcessFailed {
                    exit_code: status.code(),
                    stderr: self.stderr_tail(),
                });
            }
            return Err(e.into());
        }
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<(), SinkError> {
        let status = self.finalize()?;
        let stderr = self.stderr_tail();
        if !status.success() {
            return Err(SinkError::ProcessFailed {
                exit_code: status.code(),
                stderr,
            });
        }
        log::debug!("Encoder finished {}", self.path.display());
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.finalize();
        }
    }
}

/// Spawns an [`FfmpegSink`] per session.
#[derive(Debug, Clone)]
pub struct FfmpegSinkFactory {
    program: String,
}

impl FfmpegSinkFactory {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfmpegSinkFactory {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl SinkFactory for FfmpegSinkFactory {
    fn create(
        &mut self,
        path: &Path,
        encoding: &Encoding,
    ) -> Result<Box<dyn VideoSink>, SinkError> {
        Ok(Box::new(FfmpegSink::spawn(&self.program, path, encoding)?))
    }
}
