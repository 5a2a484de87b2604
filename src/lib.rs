//! Warden is the entrypoint supervisor for the Zoraxy container image. It runs
//! one-time startup maintenance (CA-certificate refresh, GeoIP refresh), wires
//! the ZeroTier configuration tree into place, launches the reverse proxy and
//! the optional overlay-network daemon, and turns SIGINT/SIGTERM into an
//! ordered, bounded teardown of both children before the container exits.

/// CLI interface.
pub mod cli;

/// Environment-sourced settings.
pub mod config;

/// Timing bounds, default flag values and fixed container paths.
pub mod constants;

/// Error handling.
pub mod error;

/// Filesystem preparation for the overlay-network daemon.
pub mod links;

/// One-shot command execution and supervised process launching.
pub mod process;

/// Role-keyed registry of running services.
pub mod registry;

/// Supervisor that owns startup ordering and the shutdown sequence.
pub mod supervisor;

/// Shared helpers for tests that mutate process-wide state.
pub mod test_utils;
