//! TUI wrapper that manages the ratatui terminal with crossterm backend.
//!
//! This module handles terminal lifecycle (entering/exiting raw mode,
//! alternate screen) while delegating rendering to the `rendering` module.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::sync::atomic::Ordering;

use super::raw_mode::{RAW_MODE_ACTIVE, install_panic_hook};
use super::rendering;
use super::view::KioskView;
use crate::ascii::AsciiFrame;
use crate::input::OrderInput;

/// Owns the terminal while the kiosk runs.
///
/// Raw mode and the alternate screen are entered on creation and left on
/// `restore` or drop, and by the panic hook if the app panics.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether this TUI is responsible for cleanup
    active: bool,
}

impl Tui {
    /// Enter raw mode and the alternate screen.
    pub fn new() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        if let Err(e) = crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen) {
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            let _ = disable_raw_mode();
            return Err(e);
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            active: true,
        })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore the terminal to its original state. Later calls and the
    /// drop are no-ops.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::LeaveAlternateScreen,
            )?;
            disable_raw_mode()?;
            self.terminal.show_cursor()?;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Draw the kiosk screen.
    pub fn draw_kiosk(
        &mut self,
        view: &KioskView,
        input: &OrderInput,
        preview: Option<&AsciiFrame>,
        columns: u16,
        rows: u16,
    ) -> io::Result<()> {
        self.terminal.draw(|frame| {
            rendering::render_kiosk(frame, view, input, preview, columns, rows);
        })?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);

            // Best-effort cleanup - ignore errors during drop
            let _ = crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::LeaveAlternateScreen,
            );
            let _ = disable_raw_mode();
            let _ = self.terminal.show_cursor();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_restore_is_idempotent() {
        // TUI requires a real TTY
        match Tui::new() {
            Ok(mut tui) => {
                assert!(tui.is_active());
                assert!(RAW_MODE_ACTIVE.load(Ordering::SeqCst));

                tui.restore().expect("Should restore terminal");
                assert!(!tui.is_active());
                assert!(!RAW_MODE_ACTIVE.load(Ordering::SeqCst));

                tui.restore().expect("Second restore should not fail");
            }
            Err(e) => {
                eprintln!("Skipping test (no TTY): {}", e);
            }
        }
    }
}
