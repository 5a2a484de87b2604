//! Supervisor that owns startup ordering and the shutdown sequence.
//!
//! Lifecycle: install signal handlers, run maintenance commands, enter the
//! configuration root, launch the overlay daemon (when enabled) and then the
//! proxy, park until a shutdown signal arrives, and finally tear everything
//! down within a bounded time. The supervisor itself stays single-threaded;
//! the signal handler only feeds a one-shot channel observed by the main
//! flow, so teardown never runs on signal-delivery context.
use std::{
    env,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver},
    },
};

use tracing::{info, warn};

use crate::{
    config::Settings,
    constants::GEOIP_REFRESH_FLAG,
    error::EntrypointError,
    links,
    process::{launch_service, run_command},
    registry::{ServiceRegistry, ServiceRole},
};

/// Orchestrates the container entrypoint lifecycle.
pub struct Supervisor {
    settings: Settings,
    registry: ServiceRegistry,
}

impl Supervisor {
    /// Creates a supervisor from resolved settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            registry: ServiceRegistry::new(),
        }
    }

    /// Borrows the registry of running services.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Runs the full lifecycle: signal handlers, maintenance, launches, then
    /// an indefinite wait for a shutdown signal followed by teardown.
    ///
    /// Returns `Ok(())` after a signal-driven teardown so the process exits
    /// with status 0; any error before the running state is fatal and must
    /// abort the container with a non-zero status.
    pub fn run(&mut self) -> Result<(), EntrypointError> {
        let shutdown = install_shutdown_handler()?;
        self.run_until(shutdown)
    }

    /// Same as [`Supervisor::run`] but driven by a caller-supplied shutdown
    /// channel instead of OS signal handlers.
    pub fn run_until(
        &mut self,
        shutdown: Receiver<()>,
    ) -> Result<(), EntrypointError> {
        self.run_maintenance()?;

        env::set_current_dir(&self.settings.config_root).map_err(|source| {
            EntrypointError::WorkdirError {
                path: self.settings.config_root.clone(),
                source,
            }
        })?;

        self.start_services()?;

        info!("Supervisor running; waiting for shutdown signal");
        // A closed channel means the signal handler is gone; treat it like a
        // shutdown request rather than running unsupervised.
        let _ = shutdown.recv();

        self.shutdown();
        Ok(())
    }

    /// Runs the one-time maintenance commands that must succeed before any
    /// service launches: certificate-store refresh, then GeoIP refresh.
    pub fn run_maintenance(&self) -> Result<(), EntrypointError> {
        info!("Updating CA certificates...");
        run_command(&self.settings.ca_update_program, &[])?;

        info!("Updating GeoIP data...");
        run_command(&self.settings.proxy_program, &[GEOIP_REFRESH_FLAG])?;

        Ok(())
    }

    /// Launches the configured services in order: overlay-network first (when
    /// enabled), then the proxy.
    ///
    /// A launch failure aborts immediately without tearing down
    /// already-started peers; an overlay daemon that started before a proxy
    /// launch failure is left running when the supervisor exits non-zero.
    pub fn start_services(&mut self) -> Result<(), EntrypointError> {
        if self.settings.overlay_enabled {
            self.start_overlay()?;
        }
        self.start_proxy()?;
        Ok(())
    }

    fn start_overlay(&mut self) -> Result<(), EntrypointError> {
        info!("Starting ZeroTier...");

        links::prepare_link(
            &self.settings.overlay_config_dir,
            &self.settings.overlay_link_path,
        )?;

        let handle = launch_service(
            ServiceRole::OverlayNetwork,
            &self.settings.overlay_program,
            &[],
            self.settings.liveness_window,
        )?;
        self.registry.register(handle);
        Ok(())
    }

    fn start_proxy(&mut self) -> Result<(), EntrypointError> {
        info!("Starting Zoraxy...");

        let args = self.settings.proxy_args();
        let handle = launch_service(
            ServiceRole::Proxy,
            &self.settings.proxy_program,
            &args,
            self.settings.liveness_window,
        )?;
        self.registry.register(handle);
        Ok(())
    }

    /// Tears down every registered service and the overlay link.
    ///
    /// Termination requests are broadcast to all services before any wait
    /// begins, so the children shut down concurrently and total teardown
    /// latency is bounded by the grace period rather than its sum across
    /// services. Cleanup failures are logged and swallowed; once teardown
    /// starts the supervisor always proceeds to a clean exit.
    pub fn shutdown(&mut self) {
        info!("Shutdown signal received. Cleaning up...");

        for role in ServiceRole::ALL {
            if let Some(handle) = self.registry.get_mut(role)
                && handle.is_running()
            {
                info!("Terminating {role}...");
                if let Err(err) = handle.terminate() {
                    warn!("Failed to request termination of {role}: {err}");
                }
            }
        }

        for role in ServiceRole::ALL {
            if let Some(mut handle) = self.registry.take(role) {
                if !handle.wait_graceful(self.settings.grace_period) {
                    warn!(
                        "{role} did not exit within {:?}; sending SIGKILL",
                        self.settings.grace_period
                    );
                    handle.kill_and_reap();
                }
                info!("{role} stopped");
            }
        }

        if let Err(err) = links::remove_link(&self.settings.overlay_link_path) {
            warn!("Failed to remove overlay link: {err}");
        }
    }
}

/// Installs SIGINT/SIGTERM handlers that feed a one-shot shutdown channel.
///
/// Both signals mean "begin shutdown". The latch makes every signal after
/// the first a logged no-op, so a second signal arriving mid-teardown cannot
/// start an overlapping teardown sequence.
fn install_shutdown_handler() -> Result<Receiver<()>, EntrypointError> {
    let (tx, rx) = mpsc::channel();
    let triggered = AtomicBool::new(false);

    ctrlc::set_handler(move || {
        if triggered.swap(true, Ordering::SeqCst) {
            warn!("Shutdown already in progress; ignoring repeated signal");
            return;
        }
        let _ = tx.send(());
    })?;

    Ok(rx)
}
