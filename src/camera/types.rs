//! Camera types and data structures.

use std::fmt;
use std::time::Instant;

/// Information about an available camera device.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// Device index for selection
    pub index: u32,
    /// Human-readable device name
    pub name: String,
    /// Device description
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Frame resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// VGA (640x480), the fixed size of every recorded frame.
    pub const VGA: Resolution = Resolution {
        width: 640,
        height: 480,
    };

    /// HD (1280x720)
    pub const HD: Resolution = Resolution {
        width: 1280,
        height: 720,
    };

    /// Number of bytes an RGB24 frame of this size occupies.
    pub fn rgb_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::VGA
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A captured camera frame, always RGB24 (3 bytes per pixel, row-major).
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data in RGB order
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// When the frame was captured
    pub timestamp: Instant,
}

impl Frame {
    /// Bytes per RGB pixel.
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Wrap raw RGB data captured now.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    /// A frame where every pixel has the same color.
    pub fn filled(resolution: Resolution, rgb: [u8; 3]) -> Self {
        let pixels = resolution.width as usize * resolution.height as usize;
        let mut data = Vec::with_capacity(pixels * Self::BYTES_PER_PIXEL);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Self::new(data, resolution.width, resolution.height)
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }

    /// RGB value at (x, y), or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        self.data
            .get(idx..idx + Self::BYTES_PER_PIXEL)
            .map(|p| [p[0], p[1], p[2]])
    }
}

/// Settings for camera capture.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Camera device index
    pub device_index: u32,
    /// Requested capture resolution
    pub resolution: Resolution,
    /// Requested FPS (actual may vary)
    pub fps: u32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            resolution: Resolution::VGA,
            fps: 30,
        }
    }
}

/// Errors that can occur during camera operations.
#[derive(Debug)]
pub enum CameraError {
    /// Failed to query camera devices
    QueryFailed(String),
    /// Failed to open camera
    OpenFailed(String),
    /// Camera permission denied (macOS)
    PermissionDenied,
    /// Camera device not found at specified index
    DeviceNotFound(u32),
    /// Failed to start video stream
    StreamFailed(String),
    /// Capture thread is already running
    AlreadyRunning,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::QueryFailed(msg) => write!(f, "Failed to query cameras: {}", msg),
            CameraError::OpenFailed(msg) => write!(f, "Failed to open camera: {}", msg),
            CameraError::PermissionDenied => {
                write!(
                    f,
                    "Camera permission denied. On macOS, grant access in System Settings > Privacy & Security > Camera"
                )
            }
            CameraError::DeviceNotFound(index) => {
                write!(
                    f,
                    "Camera device {} not found. Run 'order-recorder list-cameras' to see available devices",
                    index
                )
            }
            CameraError::StreamFailed(msg) => write!(f, "Failed to start camera stream: {}", msg),
            CameraError::AlreadyRunning => write!(f, "Capture thread is already running"),
        }
    }
}

impl std::error::Error for CameraError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_info_display() {
        let info = CameraInfo {
            index: 0,
            name: "Test Camera".to_string(),
            description: "Built-in".to_string(),
        };
        assert_eq!(format!("{}", info), "[0] Test Camera (Built-in)");
    }

    #[test]
    fn test_resolution_default_is_vga() {
        assert_eq!(Resolution::default(), Resolution::VGA);
        assert_eq!(Resolution::VGA.rgb_len(), 640 * 480 * 3);
        assert_eq!(Resolution::VGA.to_string(), "640x480");
    }

    #[test]
    fn test_frame_filled_and_pixel() {
        let frame = Frame::filled(Resolution { width: 2, height: 2 }, [1, 2, 3]);
        assert_eq!(frame.data.len(), 12);
        assert_eq!(frame.pixel(1, 1), Some([1, 2, 3]));
        assert_eq!(frame.pixel(2, 0), None);
    }

    #[test]
    fn test_camera_error_display() {
        assert_eq!(
            format!("{}", CameraError::OpenFailed("test".to_string())),
            "Failed to open camera: test"
        );
        assert!(format!("{}", CameraError::PermissionDenied).contains("permission denied"));
        assert!(format!("{}", CameraError::DeviceNotFound(5)).contains("5"));
        assert_eq!(
            format!("{}", CameraError::AlreadyRunning),
            "Capture thread is already running"
        );
    }
}
