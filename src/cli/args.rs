//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::CharacterSet;
use crate::config::Config;

/// Fullscreen kiosk that records one stamped webcam video per order
#[derive(Parser, Debug)]
#[command(name = "order-recorder")]
#[command(version, about = "Webcam order recording kiosk", long_about = None)]
#[command(after_help = "KEYS (while running):
    <order id> Enter   Start recording (saves the current order first)
    F2 / Ctrl+S        Stop, save and release the camera
    Esc                Save the current order and quit
    Ctrl+C             Quit (the current order is saved)")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras)
    #[arg(long)]
    pub camera: Option<u32>,

    /// Directory for recordings (default: Downloads)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Use a generated test pattern instead of a webcam
    #[arg(long)]
    pub test_pattern: bool,

    /// Preview character set
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Encoder binary (default: ffmpeg on PATH)
    #[arg(long)]
    pub ffmpeg: Option<String>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Overlay command-line flags onto the loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(camera) = self.camera {
            config.camera.device = camera;
        }
        if let Some(dir) = &self.output_dir {
            config.recording.output_dir = Some(dir.clone());
        }
        if let Some(charset) = self.charset {
            config.preview.charset = charset.into();
        }
        if let Some(ffmpeg) = &self.ffmpeg {
            config.recording.ffmpeg = ffmpeg.clone();
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Create default config file
    Init,
}
