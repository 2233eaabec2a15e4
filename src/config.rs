//! Configuration file handling for order-recorder.
//!
//! Loads configuration from `<config_dir>/order-recorder/config.toml` or a
//! custom path. Every field is optional; the defaults reproduce the kiosk's
//! fixed behavior (camera 0, downloads folder, 50 ms record tick).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ascii::CharSet;
use crate::camera::{CameraSettings, Resolution};
use crate::preview::PreviewSettings;
use crate::session::SessionConfig;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub recording: RecordingConfig,
    pub preview: PreviewConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub device: u32,
    /// Requested capture size; recorded frames are always scaled to 640x480
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Defaults to the user's downloads directory
    pub output_dir: Option<PathBuf>,
    /// Encoder binary
    pub ffmpeg: String,
    pub frame_interval_ms: u64,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            ffmpeg: "ffmpeg".to_string(),
            frame_interval_ms: 50,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub columns: u16,
    pub rows: u16,
    pub interval_ms: u64,
    pub charset: CharSet,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            columns: 120,
            rows: 32,
            interval_ms: 30,
            charset: CharSet::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Defaults to `<data_dir>/order-recorder/order-recorder.log`
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Directory receiving recordings.
    pub fn output_dir(&self) -> PathBuf {
        self.recording
            .output_dir
            .clone()
            .unwrap_or_else(default_output_dir)
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.camera.device,
            resolution: Resolution {
                width: self.camera.width,
                height: self.camera.height,
            },
            fps: self.camera.fps,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        let mut session = SessionConfig::new(self.output_dir());
        session.frame_interval = Duration::from_millis(self.recording.frame_interval_ms.max(1));
        session
    }

    pub fn preview_settings(&self) -> PreviewSettings {
        PreviewSettings {
            columns: self.preview.columns,
            rows: self.preview.rows,
            interval: Duration::from_millis(self.preview.interval_ms.max(1)),
            charset: self.preview.charset,
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.logging.file.clone().unwrap_or_else(default_log_path)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| home_dir().join(".config"))
        .join("order-recorder")
        .join("config.toml")
}

/// The user's downloads folder, or `~/Downloads` when the platform has none.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| home_dir().join("Downloads"))
}

pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| home_dir().join(".local").join("share"))
        .join("order-recorder")
        .join("order-recorder.log")
}

/// Contents written by `order-recorder config init`.
pub const DEFAULT_CONFIG: &str = r#"# order-recorder configuration

[camera]
# Camera device index (see `order-recorder list-cameras`)
device = 0
# Requested capture size (recordings are always 640x480)
width = 640
height = 480
fps = 30

[recording]
# Where recordings go (default: your Downloads folder)
# output_dir = "/srv/orders"
# Encoder binary
ffmpeg = "ffmpeg"
# Pause between recorded frames
frame_interval_ms = 50

[preview]
# Preview grid in character cells
columns = 120
rows = 32
interval_ms = 30
# Character set: standard, blocks, minimal
charset = "blocks"

[logging]
# Used when RUST_LOG is unset
level = "info"
# file = "/var/log/order-recorder.log"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.camera.device, 0);
        assert_eq!(config.recording.frame_interval_ms, 50);
        assert_eq!(config.recording.ffmpeg, "ffmpeg");
        assert_eq!(config.preview.columns, 120);
        assert_eq!(config.preview.rows, 32);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.camera.width, 640);
        assert_eq!(config.preview.charset, CharSet::Blocks);
        assert!(config.recording.output_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[recording]\noutput_dir = \"/srv/orders\"\n\n[camera]\ndevice = 2").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.camera.device, 2);
        assert_eq!(config.camera.fps, 30);
        assert_eq!(config.output_dir(), PathBuf::from("/srv/orders"));
        assert_eq!(config.session_config().frame_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[camera]\ndevice = \"front\"").unwrap();
        match Config::load(Some(file.path())) {
            Err(ConfigError::ParseError { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_session_config_uses_fixed_encoding() {
        let config = Config::default();
        let session = config.session_config();
        assert_eq!(session.encoding, crate::sink::Encoding::FIXED);
        assert_eq!(config.preview_settings().interval, Duration::from_millis(30));
    }
}
