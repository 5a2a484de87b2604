//! Environment-sourced settings for the entrypoint supervisor.
//!
//! The container exposes one environment variable per proxy flag, named after
//! the flag in upper case; absent variables fall back to the documented
//! defaults. The overlay-network daemon is toggled through `ZEROTIER`.
use std::{env, path::PathBuf, time::Duration};

use crate::constants::{
    CA_UPDATE_PROGRAM, CONFIG_ROOT, DEFAULT_AUTORENEW, DEFAULT_CFGUPGRADE, DEFAULT_DB,
    DEFAULT_DOCKER, DEFAULT_EARLYRENEW, DEFAULT_ENABLELOG, DEFAULT_FASTGEOIP,
    DEFAULT_MDNS, DEFAULT_MDNSNAME, DEFAULT_NOAUTH, DEFAULT_PLUGIN, DEFAULT_PORT,
    DEFAULT_SSHLB, DEFAULT_UPDATE_GEOIP, DEFAULT_VERSION, DEFAULT_WEBFM,
    DEFAULT_WEBROOT, GRACEFUL_EXIT_TIMEOUT, LIVENESS_WINDOW, OVERLAY_CONFIG_DIR,
    OVERLAY_LINK_PATH, OVERLAY_PROGRAM, OVERLAY_TOGGLE_VAR, PROXY_PROGRAM,
};

/// Resolved configuration for one supervisor run.
///
/// Values are passed through to the proxy verbatim; the supervisor does not
/// validate them beyond rendering, since the proxy owns their semantics.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Certificate auto-renew interval in seconds.
    pub autorenew: String,
    /// Legacy configuration upgrade toggle.
    pub cfgupgrade: String,
    /// Database backend selection.
    pub db: String,
    /// Docker integration toggle.
    pub docker: String,
    /// Early-renew window in days.
    pub earlyrenew: String,
    /// Request logging toggle.
    pub enablelog: String,
    /// In-memory GeoIP resolver toggle.
    pub fastgeoip: String,
    /// mDNS discovery toggle.
    pub mdns: String,
    /// mDNS host name override.
    pub mdnsname: String,
    /// Management-interface authentication bypass toggle.
    pub noauth: String,
    /// Plugin directory.
    pub plugin: String,
    /// Management interface port, rendered in listen-address form.
    pub port: String,
    /// SSH load balancer toggle.
    pub sshlb: String,
    /// Proxy-side GeoIP refresh toggle.
    pub update_geoip: String,
    /// Version-and-exit toggle.
    pub version: String,
    /// Web file manager toggle.
    pub webfm: String,
    /// Management web root.
    pub webroot: String,

    /// Whether the overlay-network daemon is launched at all.
    pub overlay_enabled: bool,

    /// Configuration root the supervisor switches into before launching.
    pub config_root: PathBuf,
    /// Overlay configuration directory the link points at.
    pub overlay_config_dir: PathBuf,
    /// Symlink path expected by the overlay-network daemon.
    pub overlay_link_path: PathBuf,

    /// Reverse-proxy binary.
    pub proxy_program: String,
    /// Overlay-network daemon binary.
    pub overlay_program: String,
    /// Certificate-store refresh command.
    pub ca_update_program: String,

    /// Delay before a fresh launch is checked for an immediate crash.
    pub liveness_window: Duration,
    /// SIGTERM-to-SIGKILL escalation bound during teardown.
    pub grace_period: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            autorenew: DEFAULT_AUTORENEW.into(),
            cfgupgrade: DEFAULT_CFGUPGRADE.into(),
            db: DEFAULT_DB.into(),
            docker: DEFAULT_DOCKER.into(),
            earlyrenew: DEFAULT_EARLYRENEW.into(),
            enablelog: DEFAULT_ENABLELOG.into(),
            fastgeoip: DEFAULT_FASTGEOIP.into(),
            mdns: DEFAULT_MDNS.into(),
            mdnsname: DEFAULT_MDNSNAME.into(),
            noauth: DEFAULT_NOAUTH.into(),
            plugin: DEFAULT_PLUGIN.into(),
            port: DEFAULT_PORT.into(),
            sshlb: DEFAULT_SSHLB.into(),
            update_geoip: DEFAULT_UPDATE_GEOIP.into(),
            version: DEFAULT_VERSION.into(),
            webfm: DEFAULT_WEBFM.into(),
            webroot: DEFAULT_WEBROOT.into(),
            overlay_enabled: false,
            config_root: PathBuf::from(CONFIG_ROOT),
            overlay_config_dir: PathBuf::from(OVERLAY_CONFIG_DIR),
            overlay_link_path: PathBuf::from(OVERLAY_LINK_PATH),
            proxy_program: PROXY_PROGRAM.into(),
            overlay_program: OVERLAY_PROGRAM.into(),
            ca_update_program: CA_UPDATE_PROGRAM.into(),
            liveness_window: LIVENESS_WINDOW,
            grace_period: GRACEFUL_EXIT_TIMEOUT,
        }
    }
}

impl Settings {
    /// Builds settings from the container environment, falling back to the
    /// documented default for every unset variable.
    pub fn from_env() -> Self {
        Self {
            autorenew: env_or("AUTORENEW", DEFAULT_AUTORENEW),
            cfgupgrade: env_or("CFGUPGRADE", DEFAULT_CFGUPGRADE),
            db: env_or("DB", DEFAULT_DB),
            docker: env_or("DOCKER", DEFAULT_DOCKER),
            earlyrenew: env_or("EARLYRENEW", DEFAULT_EARLYRENEW),
            enablelog: env_or("ENABLELOG", DEFAULT_ENABLELOG),
            fastgeoip: env_or("FASTGEOIP", DEFAULT_FASTGEOIP),
            mdns: env_or("MDNS", DEFAULT_MDNS),
            mdnsname: env_or("MDNSNAME", DEFAULT_MDNSNAME),
            noauth: env_or("NOAUTH", DEFAULT_NOAUTH),
            plugin: env_or("PLUGIN", DEFAULT_PLUGIN),
            port: env_or("PORT", DEFAULT_PORT),
            sshlb: env_or("SSHLB", DEFAULT_SSHLB),
            update_geoip: env_or("UPDATE_GEOIP", DEFAULT_UPDATE_GEOIP),
            version: env_or("VERSION", DEFAULT_VERSION),
            webfm: env_or("WEBFM", DEFAULT_WEBFM),
            webroot: env_or("WEBROOT", DEFAULT_WEBROOT),
            overlay_enabled: env_or(OVERLAY_TOGGLE_VAR, "false") == "true",
            ..Self::default()
        }
    }

    /// Renders the full proxy argument list, one `-name=value` argument per
    /// flag. The port is rendered in listen-address form (`-port=:8000`).
    pub fn proxy_args(&self) -> Vec<String> {
        vec![
            format!("-autorenew={}", self.autorenew),
            format!("-cfgupgrade={}", self.cfgupgrade),
            format!("-db={}", self.db),
            format!("-docker={}", self.docker),
            format!("-earlyrenew={}", self.earlyrenew),
            format!("-enablelog={}", self.enablelog),
            format!("-fastgeoip={}", self.fastgeoip),
            format!("-mdns={}", self.mdns),
            format!("-mdnsname={}", self.mdnsname),
            format!("-noauth={}", self.noauth),
            format!("-plugin={}", self.plugin),
            format!("-port=:{}", self.port),
            format!("-sshlb={}", self.sshlb),
            format!("-update_geoip={}", self.update_geoip),
            format!("-version={}", self.version),
            format!("-webfm={}", self.webfm),
            format!("-webroot={}", self.webroot),
        ]
    }
}

/// Reads an environment variable, falling back to `default` when unset.
fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
