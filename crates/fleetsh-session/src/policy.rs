//! Address precedence and PTY allocation policy.

/// Commands that are really shell invocations and degrade badly without a
/// terminal.
const SHELL_IDIOMS: &[&str] = &["sh", "/bin/sh", "bash", "/bin/bash"];

/// Advisory shown when a PTY is force-allocated for a shell command.
pub const SHELL_PTY_ADVISORY: &str = "Allocating a pseudo-terminal since the command provided is \
     a shell. This behavior will change in the future; request a PTY explicitly if this is what \
     you want.";

/// Outcome of the PTY allocation policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtyDecision {
    /// Whether to allocate a pseudo-terminal
    pub alloc: bool,
    /// One-time advisory to surface to the operator, if any
    pub advisory: Option<&'static str>,
}

/// Decide whether the session gets a PTY.
///
/// No command, or an explicit request, allocates one. A command that is a
/// bare shell invocation without an explicit request also allocates one,
/// with an advisory that this default may change.
pub fn decide_pty(command: Option<&str>, requested: bool) -> PtyDecision {
    let mut alloc = command.is_none() || requested;
    let mut advisory = None;

    if let Some(cmd) = command {
        if !alloc && SHELL_IDIOMS.contains(&cmd) {
            alloc = true;
            advisory = Some(SHELL_PTY_ADVISORY);
        }
    }

    PtyDecision { alloc, advisory }
}

/// Resolve the address to dial.
///
/// Precedence: explicit override, then positional argument, then the
/// resolved instance's private address.
pub fn resolve_address<'a>(
    override_addr: Option<&'a str>,
    positional: Option<&'a str>,
    private_ip: &'a str,
) -> &'a str {
    override_addr.or(positional).unwrap_or(private_ip)
}
