//! Camera capture module for webcam access and frame fan-out.
//!
//! - Device enumeration via [`list_devices`]
//! - Webcam capture via [`CameraCapture`], test pattern via [`SyntheticSource`]
//! - Both implement [`FrameSource`] and publish to [`FrameFeed`]s

mod capture;
mod capture_loop;
mod device;
mod feed;
mod frame_utils;
mod source;
mod synthetic;
mod types;

pub use capture::CameraCapture;
pub use device::list_devices;
pub use feed::{frame_channel, FeedPoll, FrameFeed, FramePublisher};
pub use frame_utils::resize_frame;
pub use source::FrameSource;
pub use synthetic::{pattern_frame, SyntheticSource};
pub use types::{CameraError, CameraInfo, CameraSettings, Frame, Resolution};
