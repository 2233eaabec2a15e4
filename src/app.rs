//! Kiosk application state: the controller plus what the screen shows.
//!
//! Key presses become [`KioskAction`]s, which are applied here. Terminal
//! I/O lives in `event_loop`.

use crossterm::event::KeyEvent;

use crate::ascii::AsciiFrame;
use crate::camera::FrameSource;
use crate::input::{KioskAction, OrderInput, handle_key_event};
use crate::preview::PreviewSurface;
use crate::session::{RecordingSummary, SessionController};
use crate::sink::SinkFactory;
use crate::terminal::KioskView;

/// Whether the event loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct KioskApp<S: FrameSource, F: SinkFactory> {
    controller: SessionController<S, F>,
    surface: PreviewSurface,
    input: OrderInput,
    view: KioskView,
}

impl<S: FrameSource, F: SinkFactory> KioskApp<S, F> {
    /// `surface` must be the one the controller's preview loop writes to.
    pub fn new(controller: SessionController<S, F>, surface: PreviewSurface) -> Self {
        let mut view = KioskView::new();
        view.sync(&controller.status());
        Self {
            controller,
            surface,
            input: OrderInput::new(),
            view,
        }
    }

    pub fn controller(&self) -> &SessionController<S, F> {
        &self.controller
    }

    pub fn view(&self) -> &KioskView {
        &self.view
    }

    pub fn input(&self) -> &OrderInput {
        &self.input
    }

    /// Latest preview, or `None` while the banner should show.
    pub fn preview_frame(&self) -> Option<AsciiFrame> {
        self.surface.snapshot()
    }

    pub fn on_key(&mut self, event: KeyEvent) -> Flow {
        let action = handle_key_event(event, &mut self.input, self.view.stop_enabled);
        self.handle_action(action)
    }

    pub fn handle_action(&mut self, action: KioskAction) -> Flow {
        let flow = match action {
            KioskAction::Submit(text) => {
                self.submit(&text);
                Flow::Continue
            }
            KioskAction::Stop => {
                self.release();
                Flow::Continue
            }
            KioskAction::Escape => {
                if self.controller.is_recording() {
                    log::info!("Escape pressed while recording, saving first");
                }
                self.release();
                Flow::Exit
            }
            KioskAction::Close => {
                log::info!("Close requested");
                self.release();
                Flow::Exit
            }
            KioskAction::Edited | KioskAction::None => Flow::Continue,
        };
        self.view.sync(&self.controller.status());
        flow
    }

    /// Release everything and hand back the recordings saved this run.
    pub fn finish(mut self) -> Vec<RecordingSummary> {
        self.release();
        self.controller.saved().to_vec()
    }

    fn submit(&mut self, text: &str) {
        let saved_before = self.controller.saved().len();
        match self.controller.start(text) {
            Ok(Some(info)) => {
                let previous = self.controller.saved().get(saved_before);
                match previous.and_then(|s| s.output_path.file_name()) {
                    Some(name) => self.view.info(format!(
                        "Saved {}, now recording order {}",
                        name.to_string_lossy(),
                        info.order_id
                    )),
                    None => self.view.info(format!("Recording order {}", info.order_id)),
                }
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("Could not start recording: {}", e);
                self.view.error(format!("Could not start recording: {}", e));
            }
        }
    }

    fn release(&mut self) {
        match self.controller.shutdown() {
            Ok(Some(summary)) => {
                let name = summary
                    .output_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.view.info(format!("Saved {}", name));
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("Failed to save recording: {}", e);
                self.view.error(format!("Failed to save recording: {}", e));
            }
        }
        self.surface.clear();
    }
}
