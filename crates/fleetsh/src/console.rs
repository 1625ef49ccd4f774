//! The console entry point: one invocation, one session.
//!
//! This is the single surface the (external) CLI layer calls. It threads
//! every ambient value - application, organization, criteria, cancellation -
//! as an explicit parameter, so the pipeline has no hidden dependencies.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use fleetsh_core::{ConnectionTarget, ConsoleConfig, Error, Result, SelectionCriteria};
use fleetsh_resolve::{
    ensure_started, resolve_container, resolve_instance, EnsureOptions, FleetQuery,
    LifecycleControl, Prompter,
};
use fleetsh_session::{
    connect, decide_pty, resolve_address, run, ConnectOptions, PtyRequest, RemoteShell,
    SessionIo, SessionRequest,
};

/// Everything one console invocation needs, supplied once and immutable.
#[derive(Debug, Clone)]
pub struct ConsoleParams {
    /// Application whose fleet is being targeted
    pub app: String,
    /// Organization the tunnel is scoped to
    pub org: String,
    /// Instance selection criteria
    pub criteria: SelectionCriteria,
    /// Present one-of-N choices instead of auto-selecting
    pub interactive: bool,
    /// Requested container name
    pub container: Option<String>,
    /// Remote command; `None` means an interactive shell
    pub command: Option<String>,
    /// Explicit PTY request
    pub pty: bool,
    /// Unix username; `None` falls back to the configured default
    pub username: Option<String>,
    /// Explicit address override
    pub address: Option<String>,
    /// Positional address argument
    pub positional_address: Option<String>,
    /// Suppress progress reporting (never errors or selection notes)
    pub quiet: bool,
    /// Ambient configuration
    pub config: ConsoleConfig,
}

impl ConsoleParams {
    /// An interactive-shell invocation for `app` in `org` with defaults
    /// everywhere else.
    pub fn shell(app: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            org: org.into(),
            criteria: SelectionCriteria::default(),
            interactive: false,
            container: None,
            command: None,
            pty: false,
            username: None,
            address: None,
            positional_address: None,
            quiet: false,
            config: ConsoleConfig::default(),
        }
    }
}

/// The external collaborators one invocation runs against.
pub struct Collaborators<'a> {
    /// Fleet query client
    pub fleet: &'a dyn FleetQuery,
    /// Lifecycle controller
    pub lifecycle: &'a dyn LifecycleControl,
    /// Tunnel provider's dialer
    pub dialer: &'a dyn fleetsh_session::TunnelDialer,
    /// Remote-shell opener
    pub shell: &'a dyn RemoteShell,
    /// Interactive selection capability
    pub prompter: &'a dyn Prompter,
}

/// How an invocation ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOutcome {
    /// The remote session ran and closed with this exit status
    Completed(i32),
    /// The invocation was cancelled before or during the session
    Cancelled,
}

/// Resolve a target in `params.app`'s fleet and drive a console session on
/// it until the session ends.
///
/// The pipeline is strictly sequential: fleet query, target resolution,
/// lifecycle gate, container resolution, then the session itself. Every
/// blocking step races against `cancel`; cancellation anywhere surfaces as
/// [`ConsoleOutcome::Cancelled`], never as an error. All other failures
/// return the typed [`Error`] for the caller to format and report.
pub async fn run_console(
    params: &ConsoleParams,
    deps: &Collaborators<'_>,
    io: SessionIo,
    cancel: &CancellationToken,
) -> Result<ConsoleOutcome> {
    match run_pipeline(params, deps, io, cancel).await {
        Ok(status) => Ok(ConsoleOutcome::Completed(status)),
        Err(e) if e.is_cancelled() => Ok(ConsoleOutcome::Cancelled),
        Err(e) => Err(e),
    }
}

async fn run_pipeline(
    params: &ConsoleParams,
    deps: &Collaborators<'_>,
    io: SessionIo,
    cancel: &CancellationToken,
) -> Result<i32> {
    if !params.quiet {
        debug!("retrieving fleet snapshot for {}", params.app);
    }

    let snapshot = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(Error::Cancelled),
        snapshot = deps.fleet.list_instances(&params.app) => snapshot?,
    };

    let instance = resolve_instance(
        &snapshot,
        &params.app,
        &params.criteria,
        params.interactive,
        deps.prompter,
        cancel,
    )
    .await?;

    let ensure_options = EnsureOptions {
        timeout: params.config.lifecycle.start_timeout(),
        poll_interval: params.config.lifecycle.poll_interval(),
    };
    ensure_started(deps.lifecycle, &instance, &ensure_options, cancel).await?;

    let container = resolve_container(
        &instance,
        params.container.as_deref(),
        params.interactive,
        deps.prompter,
        cancel,
    )
    .await?;

    let decision = decide_pty(params.command.as_deref(), params.pty);
    if let Some(advisory) = decision.advisory {
        warn!("{advisory}");
    }

    let target = ConnectionTarget {
        address: resolve_address(
            params.address.as_deref(),
            params.positional_address.as_deref(),
            &instance.private_ip,
        )
        .to_string(),
        container,
        alloc_pty: decision.alloc,
        command: params.command.clone(),
    };

    let connect_options = ConnectOptions {
        org: params.org.clone(),
        username: params
            .username
            .clone()
            .unwrap_or_else(|| params.config.session.username.clone()),
        container: target.container.clone(),
        dns_wait_timeout: params.config.tunnel.dns_wait_timeout(),
    };
    let session = connect(
        deps.dialer,
        deps.shell,
        &target.address,
        &connect_options,
        cancel,
    )
    .await?;

    let request = SessionRequest {
        command: target.command.clone(),
        pty: target.alloc_pty.then(PtyRequest::from_terminal),
    };
    run(session, &request, io, cancel).await
}
