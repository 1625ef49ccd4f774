//! Session driver: dial the target and pump terminal I/O until the remote
//! session ends.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use fleetsh_core::{Error, Result};

use crate::shell::{RemoteShell, SessionRequest, ShellSession};
use crate::terminal::RawModeGuard;
use crate::tunnel::{is_ipv6_literal, TunnelDialer};

/// Connection-time options for one session.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Organization identity the tunnel is scoped to
    pub org: String,
    /// Unix username to connect as
    pub username: String,
    /// Container to attach to; `None` means the whole instance
    pub container: Option<String>,
    /// Bound for the DNS readiness wait
    pub dns_wait_timeout: Duration,
}

/// Local ends of the three I/O pumps.
///
/// Injected rather than hardcoded to process stdio so that harnesses can
/// drive a session over in-memory pipes.
pub struct SessionIo {
    /// Local input, pumped to the remote stdin
    pub stdin: Box<dyn AsyncRead + Send + Unpin>,
    /// Local output, fed from the remote stdout
    pub stdout: Box<dyn AsyncWrite + Send + Unpin>,
    /// Local error output, fed from the remote stderr
    pub stderr: Box<dyn AsyncWrite + Send + Unpin>,
}

impl SessionIo {
    /// The invoking process's own stdio.
    pub fn process() -> Self {
        Self {
            stdin: Box::new(tokio::io::stdin()),
            stdout: Box::new(tokio::io::stdout()),
            stderr: Box::new(tokio::io::stderr()),
        }
    }
}

impl std::fmt::Debug for SessionIo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIo").finish_non_exhaustive()
    }
}

/// Dial `addr` through the tunnel and open a remote session on it.
///
/// Unless `addr` is already a raw IPv6 literal, this first blocks on the
/// tunnel's DNS readiness wait; a failure there surfaces as
/// [`Error::Unreachable`] wrapping the cause. Cancellation at any point
/// returns [`Error::Cancelled`], which the entry point treats as a clean
/// abort rather than a failure.
pub async fn connect(
    dialer: &dyn TunnelDialer,
    shell: &dyn RemoteShell,
    addr: &str,
    options: &ConnectOptions,
    cancel: &CancellationToken,
) -> Result<Box<dyn ShellSession>> {
    if !is_ipv6_literal(addr) {
        debug!("waiting for {addr} to resolve through the tunnel");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            res = dialer.wait_for_dns(&options.org, addr, options.dns_wait_timeout) => {
                res.map_err(|e| {
                    if e.is_cancelled() {
                        e
                    } else {
                        Error::Unreachable {
                            addr: addr.to_string(),
                            reason: e.to_string(),
                        }
                    }
                })?;
            }
        }
    }

    let stream = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(Error::Cancelled),
        stream = dialer.dial(addr) => stream?,
    };

    debug!("tunnel connection to {addr} established, opening session");
    shell
        .open(stream, &options.username, options.container.as_deref())
        .await
}

/// Run the remote session to completion, pumping terminal I/O.
///
/// Acquires the local terminal (raw mode when a PTY was allocated), starts
/// the remote command, then runs three independent pumps: local input to
/// remote, remote output to local, remote error to local. Pump termination
/// is tied to the remote session's close, not to the other pumps. The
/// terminal is restored exactly once on every exit path; the guard's `Drop`
/// covers error and panic paths.
///
/// Returns the remote exit status. Remote-side failures surface as
/// [`Error::Session`]; they are never retried here.
pub async fn run(
    mut session: Box<dyn ShellSession>,
    request: &SessionRequest,
    io: SessionIo,
    cancel: &CancellationToken,
) -> Result<i32> {
    let mut guard = RawModeGuard::acquire(request.pty.is_some())?;

    let channels = session.start(request).await?;
    let (mut remote_in, mut remote_out, mut remote_err) =
        (channels.stdin, channels.stdout, channels.stderr);
    let (mut local_in, mut local_out, mut local_err) = (io.stdin, io.stdout, io.stderr);

    let input_pump = tokio::spawn(async move {
        let _ = tokio::io::copy(&mut local_in, &mut remote_in).await;
    });
    let mut output_pump = tokio::spawn(async move {
        let _ = tokio::io::copy(&mut remote_out, &mut local_out).await;
        let _ = local_out.flush().await;
    });
    let mut error_pump = tokio::spawn(async move {
        let _ = tokio::io::copy(&mut remote_err, &mut local_err).await;
        let _ = local_err.flush().await;
    });

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        status = session.wait() => status.map_err(|e| {
            if e.is_cancelled() {
                e
            } else {
                Error::Session(e.to_string())
            }
        }),
    };

    match &result {
        // session closed: let the output pumps drain to remote EOF, unless
        // cancellation arrives while a slow remote still holds its channels
        Ok(_) | Err(Error::Session(_)) => {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    output_pump.abort();
                    error_pump.abort();
                }
                _ = async {
                    let _ = (&mut output_pump).await;
                    let _ = (&mut error_pump).await;
                } => {}
            }
        }
        // cancelled or failed before close: tear the pumps down
        _ => {
            output_pump.abort();
            error_pump.abort();
        }
    }
    // the input pump blocks on local stdin and only ends with the session
    input_pump.abort();

    guard.release();
    result
}
