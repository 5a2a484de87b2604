use std::sync::{Mutex, MutexGuard, OnceLock};

/// Global lock serializing tests that touch process-wide state (environment
/// variables, the working directory). Parallel test threads share both, so
/// every such test must hold this guard for its full duration.
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
