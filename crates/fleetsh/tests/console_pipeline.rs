//! End-to-end pipeline tests over in-memory collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{duplex, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use fleetsh::{run_console, Collaborators, ConsoleOutcome, ConsoleParams};
use fleetsh_core::{
    Error, Instance, InstanceId, InstanceState, Result, SelectionCriteria, SubContainer,
};
use fleetsh_resolve::{FleetQuery, LifecycleControl, ScriptedPrompter};
use fleetsh_session::{
    RemoteShell, SessionChannels, SessionIo, SessionRequest, ShellSession, TunnelDialer,
    TunnelStream,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

fn instance(id: &str, state: InstanceState, containers: &[&str]) -> Instance {
    Instance {
        id: InstanceId::from(id),
        name: format!("widgets-{id}"),
        region: "fra".to_string(),
        private_ip: "fdaa:0:1::2".to_string(),
        state,
        unreachable: false,
        containers: containers
            .iter()
            .map(|n| SubContainer {
                name: n.to_string(),
            })
            .collect(),
        checks: vec![],
        process_group: None,
    }
}

struct FakeFleet {
    instances: Vec<Instance>,
}

#[async_trait]
impl FleetQuery for FakeFleet {
    async fn list_instances(&self, _app: &str) -> Result<Vec<Instance>> {
        Ok(self.instances.clone())
    }
}

struct FakeLifecycle {
    starts: AtomicUsize,
}

impl FakeLifecycle {
    fn new() -> Self {
        Self {
            starts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LifecycleControl for FakeLifecycle {
    async fn start(&self, _id: &InstanceId) -> Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn state(&self, _id: &InstanceId) -> Result<InstanceState> {
        // one poll is enough: the fake backend starts instantly
        Ok(InstanceState::Started)
    }
}

struct FakeDialer {
    dns_waits: AtomicUsize,
    dialed: Mutex<Vec<String>>,
}

impl FakeDialer {
    fn new() -> Self {
        Self {
            dns_waits: AtomicUsize::new(0),
            dialed: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl TunnelDialer for FakeDialer {
    async fn wait_for_dns(&self, _org: &str, _host: &str, _timeout: Duration) -> Result<()> {
        self.dns_waits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn dial(&self, addr: &str) -> Result<TunnelStream> {
        self.dialed.lock().unwrap().push(addr.to_string());
        let (near, _far) = duplex(64);
        Ok(Box::new(near))
    }
}

#[derive(Clone, Default)]
struct FakeShell {
    seen_request: Arc<Mutex<Option<SessionRequest>>>,
    seen_container: Arc<Mutex<Option<String>>>,
}

#[async_trait]
impl RemoteShell for FakeShell {
    async fn open(
        &self,
        _stream: TunnelStream,
        _username: &str,
        container: Option<&str>,
    ) -> Result<Box<dyn ShellSession>> {
        *self.seen_container.lock().unwrap() = container.map(str::to_string);
        Ok(Box::new(FakeSession {
            seen_request: Arc::clone(&self.seen_request),
        }))
    }
}

struct FakeSession {
    seen_request: Arc<Mutex<Option<SessionRequest>>>,
}

#[async_trait]
impl ShellSession for FakeSession {
    async fn start(&mut self, request: &SessionRequest) -> Result<SessionChannels> {
        *self.seen_request.lock().unwrap() = Some(request.clone());

        let (stdin, _a) = duplex(256);
        let (mut out_far, stdout) = duplex(256);
        let (_c, stderr) = duplex(256);
        tokio::spawn(async move {
            let _ = out_far.write_all(b"connected\n").await;
        });

        Ok(SessionChannels {
            stdin: Box::new(stdin),
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
        })
    }

    async fn wait(&mut self) -> Result<i32> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok(0)
    }
}

fn test_io() -> SessionIo {
    let (_in_far, stdin) = duplex(256);
    let (stdout, _out_far) = duplex(256);
    let (stderr, _err_far) = duplex(256);
    SessionIo {
        stdin: Box::new(stdin),
        stdout: Box::new(stdout),
        stderr: Box::new(stderr),
    }
}

struct Harness {
    fleet: FakeFleet,
    lifecycle: FakeLifecycle,
    dialer: FakeDialer,
    shell: FakeShell,
    prompter: ScriptedPrompter,
}

impl Harness {
    fn new(instances: Vec<Instance>) -> Self {
        init_logging();
        Self {
            fleet: FakeFleet { instances },
            lifecycle: FakeLifecycle::new(),
            dialer: FakeDialer::new(),
            shell: FakeShell::default(),
            prompter: ScriptedPrompter::choosing(0),
        }
    }

    fn deps(&self) -> Collaborators<'_> {
        Collaborators {
            fleet: &self.fleet,
            lifecycle: &self.lifecycle,
            dialer: &self.dialer,
            shell: &self.shell,
            prompter: &self.prompter,
        }
    }
}

fn fast_params() -> ConsoleParams {
    let mut params = ConsoleParams::shell("widgets", "acme");
    params.config.lifecycle.poll_interval_ms = 10;
    params
}

#[tokio::test]
async fn test_pipeline_starts_stopped_instance_and_completes() -> anyhow::Result<()> {
    let harness = Harness::new(vec![instance("1", InstanceState::Stopped, &["app"])]);
    let cancel = CancellationToken::new();

    let outcome = run_console(&fast_params(), &harness.deps(), test_io(), &cancel).await?;

    assert_eq!(outcome, ConsoleOutcome::Completed(0));
    assert_eq!(harness.lifecycle.starts.load(Ordering::SeqCst), 1);
    // private address is an IPv6 literal, so no DNS wait happened
    assert_eq!(harness.dialer.dns_waits.load(Ordering::SeqCst), 0);
    assert_eq!(
        harness.dialer.dialed.lock().unwrap().as_slice(),
        ["fdaa:0:1::2"]
    );
    // interactive shell: PTY allocated, sole container picked
    let request = harness.shell.seen_request.lock().unwrap().clone().unwrap();
    assert!(request.command.is_none());
    assert!(request.pty.is_some());
    assert_eq!(
        harness.shell.seen_container.lock().unwrap().as_deref(),
        Some("app")
    );
    Ok(())
}

#[tokio::test]
async fn test_pipeline_skips_lifecycle_for_started_instance() -> anyhow::Result<()> {
    let harness = Harness::new(vec![instance("1", InstanceState::Started, &[])]);
    let cancel = CancellationToken::new();

    let outcome = run_console(&fast_params(), &harness.deps(), test_io(), &cancel).await?;

    assert_eq!(outcome, ConsoleOutcome::Completed(0));
    assert_eq!(harness.lifecycle.starts.load(Ordering::SeqCst), 0);
    // no declared containers: whole-instance session
    assert_eq!(harness.shell.seen_container.lock().unwrap().as_deref(), None);
    Ok(())
}

#[tokio::test]
async fn test_address_override_takes_precedence_and_waits_for_dns() {
    let harness = Harness::new(vec![instance("1", InstanceState::Started, &[])]);
    let cancel = CancellationToken::new();

    let mut params = fast_params();
    params.address = Some("10.0.0.9".to_string());
    params.positional_address = Some("10.0.0.5".to_string());

    run_console(&params, &harness.deps(), test_io(), &cancel)
        .await
        .unwrap();

    assert_eq!(harness.dialer.dialed.lock().unwrap().as_slice(), ["10.0.0.9"]);
    // not an IPv6 literal, so the DNS wait gate ran
    assert_eq!(harness.dialer.dns_waits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_shell_command_forces_pty() {
    let harness = Harness::new(vec![instance("1", InstanceState::Started, &[])]);
    let cancel = CancellationToken::new();

    let mut params = fast_params();
    params.command = Some("/bin/bash".to_string());
    params.pty = false;

    run_console(&params, &harness.deps(), test_io(), &cancel)
        .await
        .unwrap();

    let request = harness.shell.seen_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.command.as_deref(), Some("/bin/bash"));
    assert!(request.pty.is_some());
}

#[tokio::test]
async fn test_plain_command_runs_without_pty() {
    let harness = Harness::new(vec![instance("1", InstanceState::Started, &[])]);
    let cancel = CancellationToken::new();

    let mut params = fast_params();
    params.command = Some("uptime".to_string());

    run_console(&params, &harness.deps(), test_io(), &cancel)
        .await
        .unwrap();

    let request = harness.shell.seen_request.lock().unwrap().clone().unwrap();
    assert!(request.pty.is_none());
}

#[tokio::test]
async fn test_cancellation_is_a_clean_outcome() {
    let harness = Harness::new(vec![instance("1", InstanceState::Started, &[])]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = run_console(&fast_params(), &harness.deps(), test_io(), &cancel)
        .await
        .unwrap();
    assert_eq!(outcome, ConsoleOutcome::Cancelled);
}

#[tokio::test]
async fn test_conflicting_selection_surfaces_typed_error() {
    let harness = Harness::new(vec![instance("1", InstanceState::Started, &[])]);
    let cancel = CancellationToken::new();

    let mut params = fast_params();
    params.criteria = SelectionCriteria::by_id("1");
    params.interactive = true;

    let err = run_console(&params, &harness.deps(), test_io(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConflictingSelection));
}

#[tokio::test]
async fn test_missing_container_surfaces_not_found() {
    let harness = Harness::new(vec![instance("1", InstanceState::Started, &["app"])]);
    let cancel = CancellationToken::new();

    let mut params = fast_params();
    params.container = Some("db".to_string());

    let err = run_console(&params, &harness.deps(), test_io(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn test_empty_fleet_surfaces_no_match() {
    let harness = Harness::new(vec![]);
    let cancel = CancellationToken::new();

    let err = run_console(&fast_params(), &harness.deps(), test_io(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoMatch { .. }));
}
