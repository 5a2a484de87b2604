//! Error handling for warden.
use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Defines all possible errors that can occur in the entrypoint supervisor.
///
/// Every variant except [`EntrypointError::ServiceStopError`] is fatal:
/// startup and maintenance failures abort the whole container with a
/// non-zero status, because a container expected to run a proxy has no
/// useful degraded mode. Teardown-step failures are logged and swallowed so
/// they never block process exit.
#[derive(Debug, Error)]
pub enum EntrypointError {
    /// A one-shot maintenance command returned a non-zero status.
    #[error("Command `{command}` failed: {status}")]
    CommandFailed {
        /// The command line that failed.
        command: String,
        /// The non-zero exit status it returned.
        status: ExitStatus,
    },

    /// A one-shot maintenance command could not be started at all.
    #[error("Failed to run command `{command}`: {source}")]
    CommandSpawn {
        /// The command line that could not be started.
        command: String,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error spawning a supervised service process.
    #[error("Failed to start service '{service}': {source}")]
    ServiceStartError {
        /// The service role that failed to start.
        service: String,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// A supervised service exited inside the startup liveness window,
    /// meaning the binary crashed synchronously (bad flag, port already
    /// bound, missing dependency).
    #[error(
        "Service '{service}' exited during startup with status {}",
        code.map(|c| c.to_string()).unwrap_or_else(|| "unknown".into())
    )]
    ServiceEarlyExit {
        /// The service role that exited early.
        service: String,
        /// The exit code observed inside the liveness window, if any.
        code: Option<i32>,
    },

    /// Error delivering a termination signal to a supervised service.
    #[error("Failed to stop service '{service}': {source}")]
    ServiceStopError {
        /// The service role that failed to stop.
        service: String,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error creating or removing the overlay configuration link.
    #[error("Failed to prepare overlay link at '{}': {source}", path.display())]
    LinkSetup {
        /// The path that could not be created or removed.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error switching into the configuration root.
    #[error("Failed to enter configuration root '{}': {source}", path.display())]
    WorkdirError {
        /// The directory that could not be entered.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error installing the SIGINT/SIGTERM handlers.
    #[error("Failed to install signal handlers: {0}")]
    SignalHandler(#[from] ctrlc::Error),
}
