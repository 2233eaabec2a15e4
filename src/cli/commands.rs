//! Subcommand handlers for list-cameras and config actions.

use std::error::Error;
use std::path::Path;

use super::args::ConfigAction;
use crate::camera;
use crate::config::{Config, DEFAULT_CONFIG};

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), Box<dyn Error>> {
    let devices = camera::list_devices()?;
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
        println!("Use --test-pattern to run the kiosk without a camera.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --camera <index> to select a camera.");
    }
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    config: &Config,
    config_path: &Path,
) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!("  Camera:          {}", config.camera.device);
            println!(
                "  Capture:         {}x{} @ {} fps",
                config.camera.width, config.camera.height, config.camera.fps
            );
            println!("  Output dir:      {}", config.output_dir().display());
            println!("  Encoder:         {}", config.recording.ffmpeg);
            println!("  Frame interval:  {} ms", config.recording.frame_interval_ms);
            println!(
                "  Preview:         {}x{} cells, {}",
                config.preview.columns,
                config.preview.rows,
                config.preview.charset.name()
            );
            println!("  Log file:        {}", config.log_file().display());
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Err(format!(
                    "Config file already exists: {}\nUse 'order-recorder config show' to view current settings.",
                    config_path.display()
                )
                .into());
            }
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(config_path, DEFAULT_CONFIG)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_init_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config::default();

        handle_config_action(ConfigAction::Init, &config, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        let second = handle_config_action(ConfigAction::Init, &config, &path);
        assert!(second.is_err());
    }
}
