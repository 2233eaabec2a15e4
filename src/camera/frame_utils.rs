//! Frame conversion and resizing utilities.

use image::imageops::{self, FilterType};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;

use super::types::{Frame, Resolution};

/// Convert a nokhwa buffer to our RGB Frame format.
///
/// Handles the camera's native format (MJPEG, YUYV, NV12, ...) through
/// nokhwa's `decode_image`. Returns `None` if decoding fails.
pub fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Option<Frame> {
    let decoded = buffer.decode_image::<RgbFormat>().ok()?;
    let resolution = buffer.resolution();
    Some(Frame::new(
        decoded.into_raw(),
        resolution.width(),
        resolution.height(),
    ))
}

/// Resize a frame to `target`, returning a new frame.
///
/// Frames already at the target size are cloned unchanged. The capture
/// timestamp is preserved.
pub fn resize_frame(frame: &Frame, target: Resolution) -> Frame {
    if frame.resolution() == target {
        return frame.clone();
    }

    let Some(image) = RgbImage::from_raw(frame.width, frame.height, frame.data.clone()) else {
        // Truncated buffer; a black frame keeps the sink's size invariant.
        let mut black = Frame::filled(target, [0, 0, 0]);
        black.timestamp = frame.timestamp;
        return black;
    };

    let resized = imageops::resize(&image, target.width, target.height, FilterType::Triangle);
    Frame {
        data: resized.into_raw(),
        width: target.width,
        height: target.height,
        timestamp: frame.timestamp,
    }
}
