//! Raw-mode lifetime and the process-wide interrupt path.

use std::io::{self, Write};
use std::thread::{self, JoinHandle};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use tracing::{info, warn};

use crate::error::GameError;

/// Exit status after an interrupt, following the 128 + SIGINT shell convention
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Holds the terminal in raw mode; the previous mode comes back on drop.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// # Errors
    ///
    /// [`GameError::TerminalSetup`] when raw mode cannot be enabled.
    pub fn enable() -> Result<Self, GameError> {
        enable_raw_mode().map_err(GameError::TerminalSetup)?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to restore terminal mode");
        }
    }
}

/// Start the one background listener for SIGINT/SIGTERM.
///
/// The first signal restores the terminal, prints an exit notice and ends the
/// process with [`INTERRUPTED_EXIT_CODE`]. Game state is never consulted.
///
/// # Errors
///
/// [`GameError::Signal`] when the handlers cannot be registered.
pub fn spawn_interrupt_listener() -> Result<JoinHandle<()>, GameError> {
    let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(GameError::Signal)?;

    Ok(thread::spawn(move || {
        if let Some(signal) = signals.forever().next() {
            info!(signal, "interrupt received");
            let _ = disable_raw_mode();
            let mut stdout = io::stdout();
            let _ = write!(stdout, "\r\nGame interrupted. Exiting.\r\n");
            let _ = stdout.flush();
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }))
}

/// Route a Ctrl+C read in raw mode to the interrupt listener.
pub fn request_interrupt() -> io::Result<()> {
    signal_hook::low_level::raise(SIGINT)
}
