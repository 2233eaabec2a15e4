//! Background capture thread implementation.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::feed::FramePublisher;
use super::frame_utils::convert_to_rgb;
use super::types::{CameraError, CameraSettings, Resolution};

/// Run the capture loop in a background thread.
///
/// Reports the negotiated resolution and fps (or the open error) through
/// `info_tx`, then publishes frames until `stop` is set. Reads have no
/// timeout; a failed read or decode is skipped. Returning drops the
/// publisher, which closes every subscribed feed.
pub fn run_capture_loop(
    settings: CameraSettings,
    publisher: FramePublisher,
    stop: Arc<AtomicBool>,
    info_tx: Sender<Result<(Resolution, u32), CameraError>>,
) {
    let index = CameraIndex::Index(settings.device_index);

    let mut camera = match open_camera_with_fallback(&index, &settings) {
        Ok(cam) => cam,
        Err(e) => {
            let _ = info_tx.send(Err(e));
            return;
        }
    };

    if let Err(e) = camera.open_stream() {
        let _ = info_tx.send(Err(CameraError::StreamFailed(e.to_string())));
        return;
    }

    let res = camera.resolution();
    let actual_res = Resolution {
        width: res.width(),
        height: res.height(),
    };
    let _ = info_tx.send(Ok((actual_res, camera.frame_rate())));

    let mut skipped: u64 = 0;
    while !stop.load(Ordering::Relaxed) {
        match camera.frame() {
            Ok(raw_frame) => match convert_to_rgb(&raw_frame) {
                Some(frame) => publisher.publish(frame),
                None => skipped += 1,
            },
            Err(e) => {
                skipped += 1;
                log::trace!("Frame read failed: {}", e);
            }
        }

        // Small sleep to allow checking stop signal
        thread::sleep(Duration::from_millis(1));
    }

    if skipped > 0 {
        log::debug!("Capture loop skipped {} unreadable frames", skipped);
    }
    let _ = camera.stop_stream();
}

/// Try to open a camera with multiple format fallback strategies.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    // 1. Closest match with MJPEG (widely supported)
    // 2. Closest match with YUYV (common on Linux UVC devices)
    // 3. Whatever the camera offers at its highest resolution
    let requested_res =
        nokhwa::utils::Resolution::new(settings.resolution.width, settings.resolution.height);
    let format_attempts = [
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested_res,
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            requested_res,
            NokhwaFrameFormat::YUYV,
            settings.fps,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut last_error = None;
    for requested in format_attempts {
        match Camera::new(index.clone(), requested) {
            Ok(cam) => return Ok(cam),
            Err(e) => last_error = Some(e),
        }
    }

    let msg = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no format accepted".to_string());
    let lower = msg.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("authorization")
    {
        Err(CameraError::PermissionDenied)
    } else {
        Err(CameraError::OpenFailed(msg))
    }
}
