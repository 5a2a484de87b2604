//! Constants for the warden entrypoint supervisor.
//!
//! This module centralizes the fixed container paths, program names, timing
//! bounds and proxy flag defaults used throughout the supervisor.

use std::time::Duration;

// ============================================================================
// Container Filesystem Layout
// ============================================================================

/// Configuration root the supervisor switches into before launching services.
pub const CONFIG_ROOT: &str = "/opt/zoraxy/config/";

/// Directory holding the overlay-network daemon's configuration tree.
pub const OVERLAY_CONFIG_DIR: &str = "/opt/zoraxy/config/zerotier/";

/// Well-known path the overlay-network daemon expects its state under.
/// Created as a symlink to [`OVERLAY_CONFIG_DIR`] at startup and removed
/// again during teardown.
pub const OVERLAY_LINK_PATH: &str = "/var/lib/zerotier-one";

// ============================================================================
// Supervised Programs
// ============================================================================

/// Reverse-proxy binary, expected on `PATH` inside the container.
pub const PROXY_PROGRAM: &str = "zoraxy";

/// Overlay-network daemon binary, launched without arguments.
pub const OVERLAY_PROGRAM: &str = "zerotier-one";

/// One-shot command refreshing the system certificate store.
pub const CA_UPDATE_PROGRAM: &str = "update-ca-certificates";

/// Flag passed to the proxy binary to refresh GeoIP data and exit.
pub const GEOIP_REFRESH_FLAG: &str = "-update_geoip=true";

// ============================================================================
// Process Management Timing
// ============================================================================

/// How long a freshly launched service is given before its liveness is
/// checked. A process that exits inside this window is treated as a failed
/// launch.
pub const LIVENESS_WINDOW: Duration = Duration::from_secs(1);

/// Maximum time a service gets to exit voluntarily after SIGTERM before the
/// supervisor escalates to SIGKILL.
pub const GRACEFUL_EXIT_TIMEOUT: Duration = Duration::from_secs(8);

/// Polling interval while waiting for a terminating service to exit.
pub const TERMINATION_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// Proxy Flag Defaults
// ============================================================================
//
// Each proxy flag is rendered as `-name=value`, with the value sourced from
// the environment variable of the same name in upper case. These are the
// values used when the variable is unset.

/// Certificate auto-renew interval in seconds.
pub const DEFAULT_AUTORENEW: &str = "86400";

/// Whether to upgrade legacy configuration layouts on boot.
pub const DEFAULT_CFGUPGRADE: &str = "true";

/// Database backend selection.
pub const DEFAULT_DB: &str = "auto";

/// Whether the proxy enables its Docker integration.
pub const DEFAULT_DOCKER: &str = "true";

/// Days before expiry at which certificates renew early.
pub const DEFAULT_EARLYRENEW: &str = "30";

/// Whether request logging is enabled.
pub const DEFAULT_ENABLELOG: &str = "true";

/// Whether the in-memory GeoIP resolver is used.
pub const DEFAULT_FASTGEOIP: &str = "false";

/// Whether mDNS discovery is enabled.
pub const DEFAULT_MDNS: &str = "true";

/// mDNS host name override. The proxy treats a pair of single quotes as
/// "unset", so that is the literal default.
pub const DEFAULT_MDNSNAME: &str = "''";

/// Whether management-interface authentication is disabled.
pub const DEFAULT_NOAUTH: &str = "false";

/// Plugin directory inside the container image.
pub const DEFAULT_PLUGIN: &str = "/opt/zoraxy/plugin/";

/// Management interface port. Rendered in listen-address form (`:8000`).
pub const DEFAULT_PORT: &str = "8000";

/// Whether the SSH load balancer is enabled.
pub const DEFAULT_SSHLB: &str = "false";

/// Whether the proxy refreshes GeoIP data on its own at boot. The supervisor
/// already refreshes it as a maintenance step, so this stays off.
pub const DEFAULT_UPDATE_GEOIP: &str = "false";

/// Whether the proxy prints its version and exits.
pub const DEFAULT_VERSION: &str = "false";

/// Whether the built-in web file manager is enabled.
pub const DEFAULT_WEBFM: &str = "true";

/// Web root served by the management interface.
pub const DEFAULT_WEBROOT: &str = "./www";

/// Environment variable toggling the overlay-network daemon. The daemon is
/// launched only when the value is exactly `true`.
pub const OVERLAY_TOGGLE_VAR: &str = "ZEROTIER";
