//! Video sinks: the writers that turn successive frames into an output file.

mod ffmpeg;

pub use ffmpeg::{encoder_args, FfmpegSink, FfmpegSinkFactory};

use std::path::Path;

use crate::camera::{Frame, Resolution};

/// Video codec of the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// H.264 / AVC
    H264,
}

impl Codec {
    /// FOURCC tag of the codec.
    pub fn fourcc(&self) -> &'static str {
        match self {
            Codec::H264 => "H264",
        }
    }

    /// ffmpeg encoder used to produce the codec.
    pub fn ffmpeg_encoder(&self) -> &'static str {
        match self {
            Codec::H264 => "libx264",
        }
    }
}

/// Encoding parameters of a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    pub codec: Codec,
    /// Frame rate declared in the container
    pub fps: u32,
    /// Every written frame must have exactly this size
    pub resolution: Resolution,
    /// File extension of the container (without the dot)
    pub extension: &'static str,
}

impl Encoding {
    /// The one encoding every session is recorded with.
    pub const FIXED: Encoding = Encoding {
        codec: Codec::H264,
        fps: 20,
        resolution: Resolution::VGA,
        extension: "mp4",
    };
}

impl Default for Encoding {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Errors that can occur while writing video.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Encoder '{0}' not found. Please install ffmpeg (e.g. `brew install ffmpeg` or `apt install ffmpeg`)")]
    EncoderNotFound(String),

    #[error("Failed to spawn encoder: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Frame is {actual}, sink expects {expected}")]
    FrameSize {
        expected: Resolution,
        actual: Resolution,
    },

    #[error("Encoder exited with code {exit_code:?}\n{stderr}")]
    ProcessFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An open output file accepting frames.
pub trait VideoSink: Send {
    /// Append one frame. The frame must match the sink's resolution.
    fn write_frame(&mut self, frame: &Frame) -> Result<(), SinkError>;

    /// Flush and close the file. The file is complete once this returns `Ok`.
    fn finish(self: Box<Self>) -> Result<(), SinkError>;
}

/// Opens sinks for new sessions.
pub trait SinkFactory: Send {
    fn create(&mut self, path: &Path, encoding: &Encoding)
        -> Result<Box<dyn VideoSink>, SinkError>;
}

impl<T: SinkFactory + ?Sized> SinkFactory for Box<T> {
    fn create(&mut self, path: &Path, encoding: &Encoding)
        -> Result<Box<dyn VideoSink>, SinkError> {
        (**self).create(path, encoding)
    }
}

/// Reject frames whose size differs from `expected`.
pub(crate) fn check_frame_size(frame: &Frame, expected: Resolution) -> Result<(), SinkError> {
    let actual = frame.resolution();
    if actual != expected || frame.data.len() != expected.rgb_len() {
        return Err(SinkError::FrameSize { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_encoding() {
        let enc = Encoding::FIXED;
        assert_eq!(enc.codec.fourcc(), "H264");
        assert_eq!(enc.fps, 20);
        assert_eq!(enc.resolution, Resolution::VGA);
        assert_eq!(enc.extension, "mp4");
    }

    #[test]
    fn test_check_frame_size() {
        let ok = Frame::filled(Resolution::VGA, [0, 0, 0]);
        assert!(check_frame_size(&ok, Resolution::VGA).is_ok());

        let wrong = Frame::filled(Resolution::HD, [0, 0, 0]);
        match check_frame_size(&wrong, Resolution::VGA) {
            Err(SinkError::FrameSize { expected, actual }) => {
                assert_eq!(expected, Resolution::VGA);
                assert_eq!(actual, Resolution::HD);
            }
            other => panic!("Expected FrameSize, got {:?}", other),
        }
    }

    #[test]
    fn test_sink_error_display() {
        let err = SinkError::EncoderNotFound("ffmpeg".to_string());
        assert!(err.to_string().contains("'ffmpeg' not found"));

        let err = SinkError::ProcessFailed {
            exit_code: Some(1),
            stderr: "Unknown encoder".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1"));
        assert!(msg.contains("Unknown encoder"));
    }
}
