//! Async main loop for the kiosk.
//!
//! Separates terminal I/O from the application state in `app`, which keeps
//! the latter testable without a TTY.

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::app::{Flow, KioskApp};
use crate::camera::FrameSource;
use crate::input::KioskAction;
use crate::preview::PreviewSettings;
use crate::sink::SinkFactory;
use crate::terminal::Tui;

/// Redraw cadence, matched to the preview loop.
pub const REDRAW_INTERVAL: Duration = Duration::from_millis(30);

/// Run the kiosk until Esc, Ctrl+C or a termination signal.
///
/// Handles three concurrent concerns with `tokio::select!`:
/// 1. Terminal events (keys, resize) via crossterm `EventStream`
/// 2. Redraw ticks, which pick up the newest preview
/// 3. Termination signals forwarded on `signals`
pub async fn run<S: FrameSource, F: SinkFactory>(
    app: &mut KioskApp<S, F>,
    tui: &mut Tui,
    preview: PreviewSettings,
    mut signals: mpsc::UnboundedReceiver<()>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut event_stream = EventStream::new();

    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    redraw.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                        if app.on_key(key) == Flow::Exit {
                            break;
                        }
                        draw(app, tui, preview)?;
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        tui.terminal().autoresize()?;
                        draw(app, tui, preview)?;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(Box::new(e)),
                    None => break,
                }
            }

            _ = redraw.tick() => {
                draw(app, tui, preview)?;
            }

            Some(()) = signals.recv() => {
                log::info!("Termination signal received, shutting down");
                app.handle_action(KioskAction::Close);
                break;
            }
        }
    }

    Ok(())
}

fn draw<S: FrameSource, F: SinkFactory>(
    app: &KioskApp<S, F>,
    tui: &mut Tui,
    preview: PreviewSettings,
) -> std::io::Result<()> {
    let frame = app.preview_frame();
    tui.draw_kiosk(
        app.view(),
        app.input(),
        frame.as_ref(),
        preview.columns,
        preview.rows,
    )
}
