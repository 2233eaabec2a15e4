//! End-to-end tests against a real ffmpeg binary.
//!
//! Skipped when ffmpeg (or its libx264 encoder) is not installed.

use std::process::Command;
use std::time::Duration;

use order_recorder::camera::{pattern_frame, Frame, Resolution, SyntheticSource};
use order_recorder::session::{SessionConfig, SessionController};
use order_recorder::sink::{Encoding, FfmpegSink, FfmpegSinkFactory, SinkError, VideoSink};

fn ffmpeg_with_x264() -> bool {
    match Command::new("ffmpeg").args(["-hide_banner", "-encoders"]).output() {
        Ok(output) => String::from_utf8_lossy(&output.stdout).contains("libx264"),
        Err(_) => false,
    }
}

#[test]
fn test_sink_writes_playable_file() {
    if !ffmpeg_with_x264() {
        eprintln!("Skipping test (ffmpeg with libx264 not available)");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SINK_20240101_120000.mp4");

    let mut sink: Box<dyn VideoSink> =
        Box::new(FfmpegSink::spawn("ffmpeg", &path, &Encoding::FIXED).unwrap());
    for tick in 0..20 {
        sink.write_frame(&pattern_frame(Resolution::VGA, tick)).unwrap();
    }
    sink.finish().unwrap();

    let size = std::fs::metadata(&path).unwrap().len();
    assert!(size > 0, "output file is empty");
}

#[test]
fn test_sink_rejects_wrong_frame_size() {
    if !ffmpeg_with_x264() {
        eprintln!("Skipping test (ffmpeg with libx264 not available)");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FfmpegSink::spawn("ffmpeg", &dir.path().join("bad.mp4"), &Encoding::FIXED).unwrap();

    let result = sink.write_frame(&Frame::filled(Resolution::HD, [0, 0, 0]));
    assert!(matches!(result, Err(SinkError::FrameSize { .. })));
    // Still finalizes cleanly after the rejected frame
    Box::new(sink).finish().unwrap();
}

#[test]
fn test_session_produces_file_on_disk() {
    if !ffmpeg_with_x264() {
        eprintln!("Skipping test (ffmpeg with libx264 not available)");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let mut config = SessionConfig::new(dir.path());
    config.frame_interval = Duration::from_millis(10);
    let mut controller = SessionController::new(
        SyntheticSource::new(Resolution::VGA, 60),
        FfmpegSinkFactory::default(),
        config,
    );

    let info = controller.start("E2E-1").unwrap().unwrap();
    std::thread::sleep(Duration::from_millis(300));
    let summary = controller.shutdown().unwrap().unwrap();

    assert!(summary.frames_written > 0);
    assert!(info.output_path.exists());
    assert!(std::fs::metadata(&info.output_path).unwrap().len() > 0);
}
