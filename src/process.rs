//! One-shot command execution and supervised process launching.
use std::{
    process::{Child, Command},
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, error, warn};

use crate::{
    constants::TERMINATION_POLL_INTERVAL, error::EntrypointError, registry::ServiceRole,
};

/// Runs an external command to completion, treating any non-zero exit as an
/// error. Used for startup maintenance tasks that must succeed before the
/// proxy is allowed to start.
pub fn run_command(program: &str, args: &[&str]) -> Result<(), EntrypointError> {
    let command = render_command(program, args);
    debug!("Running maintenance command: `{command}`");

    let status =
        Command::new(program)
            .args(args)
            .status()
            .map_err(|source| EntrypointError::CommandSpawn {
                command: command.clone(),
                source,
            })?;

    if !status.success() {
        error!("Command `{command}` failed: {status}");
        return Err(EntrypointError::CommandFailed { command, status });
    }

    Ok(())
}

/// Starts a long-running service in the background and verifies it survives
/// the liveness window.
///
/// Stdio is inherited so service output lands in the container log stream. A
/// process that exits inside the window is treated as a failed launch: the
/// binary most likely failed to bind a port, parse a flag or find a
/// dependency, and the caller must abort the whole supervisor.
///
/// The window only detects synchronous startup crashes, not slow-starting
/// failures.
pub fn launch_service(
    role: ServiceRole,
    program: &str,
    args: &[String],
    liveness_window: Duration,
) -> Result<ServiceHandle, EntrypointError> {
    let command = render_command(program, args);
    debug!("Launching service '{role}' with command: `{command}`");

    let mut child =
        Command::new(program)
            .args(args)
            .spawn()
            .map_err(|source| EntrypointError::ServiceStartError {
                service: role.to_string(),
                source,
            })?;

    thread::sleep(liveness_window);

    match child.try_wait() {
        Ok(Some(status)) => {
            error!("Service '{role}' exited early: {status}");
            Err(EntrypointError::ServiceEarlyExit {
                service: role.to_string(),
                code: status.code(),
            })
        }
        Ok(None) => {
            debug!("Service '{role}' started with PID: {}", child.id());
            Ok(ServiceHandle {
                role,
                command,
                child,
            })
        }
        Err(source) => Err(EntrypointError::ServiceStartError {
            service: role.to_string(),
            source,
        }),
    }
}

/// Handle to one running supervised service.
///
/// Owned exclusively by the registry; liveness is polled, never pushed.
#[derive(Debug)]
pub struct ServiceHandle {
    role: ServiceRole,
    command: String,
    child: Child,
}

impl ServiceHandle {
    /// The role this service was registered under.
    pub fn role(&self) -> ServiceRole {
        self.role
    }

    /// The rendered command line the service was launched with.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// OS process ID of the service.
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Polls whether the process is still running. A poll failure is treated
    /// as "not running" since nothing useful can be done with the handle.
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Requests graceful termination via SIGTERM. A process that already
    /// exited (ESRCH) is not an error.
    pub fn terminate(&mut self) -> Result<(), EntrypointError> {
        let pid = nix::unistd::Pid::from_raw(self.child.id() as i32);
        match nix::sys::signal::kill(pid, nix::sys::signal::SIGTERM) {
            Ok(()) => Ok(()),
            Err(nix::errno::Errno::ESRCH) => {
                debug!("Service '{}' exited before SIGTERM was delivered", self.role);
                Ok(())
            }
            Err(errno) => Err(EntrypointError::ServiceStopError {
                service: self.role.to_string(),
                source: std::io::Error::from_raw_os_error(errno as i32),
            }),
        }
    }

    /// Waits up to `timeout` for the process to exit voluntarily, reaping it
    /// on success. Returns `false` if the process is still alive when the
    /// bound elapses.
    pub fn wait_graceful(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    debug!("Service '{}' exited: {status}", self.role);
                    return true;
                }
                Ok(None) => {}
                Err(err) => {
                    warn!("Failed to poll service '{}': {err}", self.role);
                    return true;
                }
            }

            if Instant::now() >= deadline {
                return false;
            }

            thread::sleep(TERMINATION_POLL_INTERVAL);
        }
    }

    /// Forcefully kills the process and waits unconditionally for the exit
    /// to be reaped. Failures are logged, not propagated: by this point the
    /// supervisor is already unwinding toward exit.
    pub fn kill_and_reap(&mut self) {
        if let Err(err) = self.child.kill() {
            warn!("Failed to SIGKILL service '{}': {err}", self.role);
        }
        match self.child.wait() {
            Ok(status) => debug!("Service '{}' reaped: {status}", self.role),
            Err(err) => warn!("Failed to reap service '{}': {err}", self.role),
        }
    }
}

/// Renders a program and its arguments as a single diagnostic string.
fn render_command(program: &str, args: &[impl AsRef<str>]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg.as_ref());
    }
    rendered
}
