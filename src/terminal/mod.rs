//! Terminal management: raw mode, the ratatui wrapper and the kiosk screen.

mod raw_mode;
mod rendering;
mod tui;
mod view;

pub use rendering::{KioskLayout, kiosk_layout, preview_lines, render_kiosk};
pub use tui::Tui;
pub use view::{Banner, KioskView, Message, MessageKind};
