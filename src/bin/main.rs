use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use warden::{
    cli::{Cli, parse_args},
    config::Settings,
    supervisor::Supervisor,
};

fn main() {
    let args = parse_args();
    init_logging(&args);

    let settings = Settings::from_env();
    info!(
        "Starting entrypoint supervisor (overlay network {})",
        if settings.overlay_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );

    let mut supervisor = Supervisor::new(settings);
    if let Err(err) = supervisor.run() {
        error!("Entrypoint failed: {err}");
        std::process::exit(1);
    }
}

fn init_logging(args: &Cli) {
    let filter = if let Some(level) = args.log_level {
        EnvFilter::new(level.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
