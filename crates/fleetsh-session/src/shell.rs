//! Consumed remote-shell session interface.
//!
//! The wire protocol lives in the surrounding tool; fleetsh opens a session
//! over an already-dialed tunnel stream and pumps bytes through it.

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

use fleetsh_core::Result;

use crate::tunnel::TunnelStream;

/// Pseudo-terminal request for a remote session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtyRequest {
    /// TERM value to export on the remote side
    pub term: String,
    /// Terminal rows
    pub rows: u16,
    /// Terminal columns
    pub cols: u16,
}

impl PtyRequest {
    /// Build a request from the local terminal: `$TERM` (default `xterm`)
    /// and the current window size (default 24x80 when not a terminal).
    pub fn from_terminal() -> Self {
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        Self {
            term: crate::terminal::term_env(),
            rows,
            cols,
        }
    }
}

/// What to run in an established remote session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    /// Remote command; `None` means an interactive login shell
    pub command: Option<String>,
    /// Pseudo-terminal allocation; `None` means a raw byte pipe
    pub pty: Option<PtyRequest>,
}

/// Remote-side byte channels of a started session.
pub struct SessionChannels {
    /// Local input is written here
    pub stdin: Box<dyn AsyncWrite + Send + Unpin>,
    /// Remote standard output is read from here
    pub stdout: Box<dyn AsyncRead + Send + Unpin>,
    /// Remote standard error is read from here
    pub stderr: Box<dyn AsyncRead + Send + Unpin>,
}

impl std::fmt::Debug for SessionChannels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionChannels").finish_non_exhaustive()
    }
}

/// One established remote session, bound to one tunnel connection.
#[async_trait]
pub trait ShellSession: Send {
    /// Start the requested command (or shell) and hand back the remote byte
    /// channels. Called at most once per session.
    async fn start(&mut self, request: &SessionRequest) -> Result<SessionChannels>;

    /// Wait for the remote side to finish; returns the remote exit status.
    async fn wait(&mut self) -> Result<i32>;
}

/// Opens remote sessions over dialed tunnel streams.
#[async_trait]
pub trait RemoteShell: Send + Sync {
    /// Authenticate as `username` and open a session, optionally scoped to
    /// one of the instance's containers.
    async fn open(
        &self,
        stream: TunnelStream,
        username: &str,
        container: Option<&str>,
    ) -> Result<Box<dyn ShellSession>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pty_request_from_terminal_has_sane_defaults() {
        let request = PtyRequest::from_terminal();
        assert!(!request.term.is_empty());
        assert!(request.rows > 0);
        assert!(request.cols > 0);
    }

    #[test]
    fn test_session_request_shell_shape() {
        let request = SessionRequest {
            command: None,
            pty: Some(PtyRequest {
                term: "xterm".to_string(),
                rows: 24,
                cols: 80,
            }),
        };
        assert!(request.command.is_none());
        assert!(request.pty.is_some());
    }
}
