//! Local terminal state ownership.

use crossterm::tty::IsTty;
use tracing::debug;

use fleetsh_core::Result;

/// Scoped ownership of the local terminal's raw mode.
///
/// Acquired on session entry and released exactly once on every exit path,
/// including error, cancellation and panic (`Drop` covers whatever an early
/// [`RawModeGuard::release`] did not). Raw mode is only entered when a PTY
/// was allocated and stdin is actually a terminal; otherwise the guard is
/// inert.
#[derive(Debug)]
pub struct RawModeGuard {
    raw: bool,
    released: bool,
}

impl RawModeGuard {
    /// Enter raw mode when `want_raw` and the process has a terminal.
    pub fn acquire(want_raw: bool) -> Result<Self> {
        let raw = want_raw && std::io::stdin().is_tty();
        if raw {
            crossterm::terminal::enable_raw_mode()?;
            debug!("entered raw mode");
        }
        Ok(Self {
            raw,
            released: false,
        })
    }

    /// Restore the terminal. Safe to call more than once; only the first
    /// call has any effect.
    pub fn release(&mut self) {
        if self.raw && !self.released {
            let _ = crossterm::terminal::disable_raw_mode();
            debug!("left raw mode");
        }
        self.released = true;
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// TERM value to export to the remote session: the local `$TERM` when set,
/// `xterm` otherwise.
pub fn term_env() -> String {
    std::env::var("TERM")
        .ok()
        .filter(|term| !term.is_empty())
        .unwrap_or_else(|| "xterm".to_string())
}
