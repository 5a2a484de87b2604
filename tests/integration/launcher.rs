#[path = "common/mod.rs"]
mod common;

use std::time::{Duration, Instant};

use tempfile::tempdir;
use warden::{
    error::EntrypointError,
    process::launch_service,
    registry::ServiceRole,
};

#[test]
fn launch_fails_when_service_exits_within_window() {
    let temp = tempdir().expect("failed to create tempdir");
    let script = common::write_script(temp.path(), "crash.sh", "exit 7");

    let err = launch_service(
        ServiceRole::Proxy,
        script.to_str().unwrap(),
        &[],
        Duration::from_millis(300),
    )
    .expect_err("a service that crashes at startup must fail the launch");

    match err {
        EntrypointError::ServiceEarlyExit { service, code } => {
            assert_eq!(service, "proxy");
            assert_eq!(code, Some(7));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn launch_survives_slow_service_that_outlives_window() {
    let temp = tempdir().expect("failed to create tempdir");
    let script = common::write_script(temp.path(), "slow.sh", "exec sleep 30");

    let mut handle = launch_service(
        ServiceRole::OverlayNetwork,
        script.to_str().unwrap(),
        &[],
        Duration::from_millis(300),
    )
    .expect("a surviving service must yield a handle");

    assert!(handle.is_running());
    assert!(common::is_process_alive(handle.pid()));

    handle.kill_and_reap();
    assert!(!handle.is_running());
}

#[test]
fn polite_termination_is_honored_within_grace_period() {
    let temp = tempdir().expect("failed to create tempdir");
    let script = common::write_script(
        temp.path(),
        "polite.sh",
        "trap 'exit 0' TERM\nwhile true; do sleep 0.1; done",
    );

    let mut handle = launch_service(
        ServiceRole::Proxy,
        script.to_str().unwrap(),
        &[],
        Duration::from_millis(300),
    )
    .expect("launch should succeed");

    handle.terminate().expect("SIGTERM should deliver");
    assert!(
        handle.wait_graceful(Duration::from_secs(5)),
        "a TERM-honoring service must exit within the grace period"
    );
}

#[test]
fn stubborn_service_is_killed_after_grace_period() {
    let temp = tempdir().expect("failed to create tempdir");
    let script = common::write_script(
        temp.path(),
        "stubborn.sh",
        "trap '' TERM INT\nwhile true; do sleep 0.1; done",
    );

    let mut handle = launch_service(
        ServiceRole::Proxy,
        script.to_str().unwrap(),
        &[],
        Duration::from_millis(300),
    )
    .expect("launch should succeed");
    let pid = handle.pid();

    handle.terminate().expect("SIGTERM should deliver");

    let start = Instant::now();
    assert!(
        !handle.wait_graceful(Duration::from_millis(500)),
        "a TERM-ignoring service must still be alive when the bound elapses"
    );
    assert!(start.elapsed() >= Duration::from_millis(500));

    handle.kill_and_reap();
    common::wait_for_process_exit(pid);
}
