//! UI state of the kiosk screen, independent of the terminal.

use crate::session::SessionStatus;

/// Shown in the preview area when no camera frame is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Banner {
    /// Before the first order: explains how to start
    #[default]
    Prompt,
    /// Device open, waiting for the first frame
    Connecting,
    /// After the stop control released the device
    ThankYou,
}

impl Banner {
    pub fn text(&self) -> &'static str {
        match self {
            Banner::Prompt => "Enter Order ID below and press \"Enter\" to start recording",
            Banner::Connecting => "Starting camera...",
            Banner::ThankYou => "Thank you, visit again!",
        }
    }
}

/// Severity of the message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// One-line feedback below the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Everything the renderer needs apart from the preview frame.
#[derive(Debug, Clone, Default)]
pub struct KioskView {
    /// `Current Order ID: <id>` while recording, empty otherwise
    pub status_label: String,
    /// The stop control is enabled only while recording
    pub stop_enabled: bool,
    pub banner: Banner,
    pub message: Option<Message>,
}

impl KioskView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the label, the stop control and the banner from a
    /// controller snapshot.
    pub fn sync(&mut self, status: &SessionStatus) {
        match status {
            SessionStatus::Recording(info) => {
                self.status_label = format!("Current Order ID: {}", info.order_id);
                self.stop_enabled = true;
                self.banner = Banner::Connecting;
            }
            SessionStatus::Idle => {
                self.status_label.clear();
                self.stop_enabled = false;
            }
            SessionStatus::Closed => {
                self.status_label.clear();
                self.stop_enabled = false;
                self.banner = Banner::ThankYou;
            }
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            kind: MessageKind::Info,
            text: text.into(),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            kind: MessageKind::Error,
            text: text.into(),
        });
    }
}
