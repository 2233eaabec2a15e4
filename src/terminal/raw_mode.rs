//! Panic-safe restoration of the terminal.

use crossterm::terminal::disable_raw_mode;
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while the kiosk owns the terminal (raw mode + alternate screen).
pub(crate) static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Install a panic hook that leaves the alternate screen and raw mode
/// before the panic message is printed. Installs at most once.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = crossterm::execute!(
                io::stdout(),
                crossterm::terminal::LeaveAlternateScreen,
                crossterm::cursor::Show,
            );
            let _ = disable_raw_mode();
        }

        original_hook(panic_info);
    }));
}
