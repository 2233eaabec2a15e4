use clap::Parser;
use std::process;

use order_recorder::app::KioskApp;
use order_recorder::camera::{CameraCapture, CameraError, FrameSource, SyntheticSource};
use order_recorder::cli::{self, Args, Command};
use order_recorder::config::{self, Config};
use order_recorder::event_loop;
use order_recorder::logging;
use order_recorder::preview::PreviewSurface;
use order_recorder::session::{RecordingSummary, SessionController};
use order_recorder::sink::FfmpegSinkFactory;
use order_recorder::terminal::Tui;

fn main() {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(config::default_path);
    let mut config = match Config::load(Some(&config_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    args.apply_to(&mut config);

    match args.command {
        Some(Command::ListCameras) => {
            if let Err(e) = cli::list_cameras() {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Some(Command::Config { action }) => {
            if let Err(e) = cli::handle_config_action(action, &config, &config_path) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        None => match run_kiosk(&config, args.test_pattern) {
            Ok(saved) => print_saved(&saved),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
    }
}

fn run_kiosk(
    config: &Config,
    test_pattern: bool,
) -> Result<Vec<RecordingSummary>, Box<dyn std::error::Error + Send + Sync>> {
    let log_file = config.log_file();
    if let Err(e) = logging::init_file_logging(&log_file, &config.logging.level) {
        eprintln!("Warning: logging disabled ({}: {})", log_file.display(), e);
    }
    log::info!("order-recorder {} starting", env!("CARGO_PKG_VERSION"));

    let camera_settings = config.camera_settings();
    let source: Box<dyn FrameSource> = if test_pattern {
        log::info!("Using test pattern instead of a camera");
        Box::new(SyntheticSource::new(
            camera_settings.resolution,
            camera_settings.fps,
        ))
    } else {
        match CameraCapture::open(camera_settings.clone()) {
            Ok(camera) => Box::new(camera),
            // Some backends can't enumerate; the first order reports a bad device
            Err(CameraError::QueryFailed(e)) => {
                log::warn!("Could not list cameras ({}), skipping device check", e);
                Box::new(CameraCapture::new(camera_settings))
            }
            Err(e) => return Err(e.into()),
        }
    };

    let preview = config.preview_settings();
    let surface = PreviewSurface::new();
    let controller = SessionController::new(
        source,
        FfmpegSinkFactory::new(config.recording.ffmpeg.clone()),
        config.session_config(),
    )
    .with_preview(surface.clone(), preview);
    let mut app = KioskApp::new(controller, surface);

    // SIGINT/SIGTERM outside the TUI (raw mode delivers Ctrl+C as a key)
    let (signal_tx, signal_rx) = tokio::sync::mpsc::unbounded_channel();
    ctrlc::set_handler(move || {
        let _ = signal_tx.send(());
    })?;

    let rt = tokio::runtime::Runtime::new()?;
    let mut tui = Tui::new()?;
    let result = rt.block_on(event_loop::run(&mut app, &mut tui, preview, signal_rx));
    tui.restore()?;

    let saved = app.finish();
    log::info!("Exiting with {} recording(s) saved", saved.len());
    result.map(|_| saved)
}

fn print_saved(saved: &[RecordingSummary]) {
    if saved.is_empty() {
        println!("No recordings saved.");
        return;
    }
    println!("Saved recordings:");
    for summary in saved {
        println!(
            "  {}  {} ({} frames)",
            summary.order_id,
            summary.output_path.display(),
            summary.frames_written
        );
    }
}
