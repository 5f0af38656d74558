//! End-to-end status checks against mock services over HTTP.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use app_status_poller::config::ProbeConfig;
use app_status_poller::health::{Cancelled, ProbeOutcome, StatusCheck, StatusProbe};
use app_status_poller::lifecycle::{CancelToken, Shutdown};
use app_status_poller::{ApplicationStatus, DualProbeCoordinator};

mod common;

fn probe_for(addr: std::net::SocketAddr, timeout: Duration) -> StatusProbe {
    StatusProbe::new(
        "service1",
        format!("http://{}", addr).parse().unwrap(),
        timeout,
        common::test_client(),
    )
}

#[tokio::test]
async fn test_both_services_successful() {
    let s1 = common::start_status_service("success").await;
    let s2 = common::start_status_service("success").await;

    let result = common::driver(&common::local_config(s1, s2))
        .run("123", &CancelToken::never())
        .await
        .unwrap();

    assert_eq!(result.application_id, "123");
    assert_eq!(result.status, ApplicationStatus::Success);
    assert_eq!(result.description, "Both services are successful");
    assert_eq!(result.retry_count, None);
}

#[tokio::test]
async fn test_retry_limit_reached() {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let s1 = common::start_programmable_service(move |_| {
        let cc = cc.clone();
        async move {
            cc.fetch_add(1, Ordering::SeqCst);
            (200, r#"{"status": "retry"}"#.to_string())
        }
    })
    .await;
    let s2 = common::start_status_service("success").await;

    let result = common::driver(&common::local_config(s1, s2))
        .run("123", &CancelToken::never())
        .await
        .unwrap();

    assert_eq!(result.status, ApplicationStatus::Failed);
    assert_eq!(result.description, "Retry limit reached");
    assert_eq!(result.retry_count, Some(3));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_then_recovery() {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let s1 = common::start_programmable_service(move |_| {
        let cc = cc.clone();
        async move {
            let count = cc.fetch_add(1, Ordering::SeqCst);
            let status = if count < 2 { "retry" } else { "success" };
            (200, format!(r#"{{"status": "{}"}}"#, status))
        }
    })
    .await;
    let s2 = common::start_status_service("success").await;

    let result = common::driver(&common::local_config(s1, s2))
        .run("123", &CancelToken::never())
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_both_services_failed() {
    let s1 = common::start_programmable_service(|_| async { (500, "boom".to_string()) }).await;
    let s2 = common::start_status_service("down").await;

    let result = common::driver(&common::local_config(s1, s2))
        .run("123", &CancelToken::never())
        .await
        .unwrap();

    assert_eq!(result.status, ApplicationStatus::Failed);
    assert_eq!(result.description, "One or both services are failed");
    assert_eq!(result.retry_count, Some(0));
}

#[tokio::test]
async fn test_unreachable_service_fails_without_retry() {
    let s1 = common::closed_addr();
    let s2 = common::start_status_service("success").await;

    let result = common::driver(&common::local_config(s1, s2))
        .run("123", &CancelToken::never())
        .await
        .unwrap();

    assert_eq!(result.description, "One or both services are failed");
    assert_eq!(result.retry_count, Some(0));
}

#[tokio::test]
async fn test_probe_requests_status_path() {
    let paths = Arc::new(Mutex::new(Vec::new()));
    let seen = paths.clone();
    let addr = common::start_programmable_service(move |path| {
        seen.lock().unwrap().push(path);
        async { (200, r#"{"status": "success"}"#.to_string()) }
    })
    .await;

    let outcome = probe_for(addr, Duration::from_secs(5))
        .probe("app 42", &CancelToken::never())
        .await;

    assert_eq!(outcome, Ok(ProbeOutcome::Success));
    assert_eq!(*paths.lock().unwrap(), vec!["/status/app%2042".to_string()]);
}

#[tokio::test]
async fn test_non_2xx_and_timeout_classify_alike() {
    let erroring = common::start_programmable_service(|_| async { (503, "{}".to_string()) }).await;
    let slow = common::start_programmable_service(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, r#"{"status": "success"}"#.to_string())
    })
    .await;

    let timeout = ProbeConfig {
        timeout_secs: 1,
        ..ProbeConfig::default()
    }
    .timeout();

    let from_error = probe_for(erroring, timeout).probe("123", &CancelToken::never()).await;
    let from_timeout = probe_for(slow, timeout).probe("123", &CancelToken::never()).await;

    assert_eq!(from_error, Ok(ProbeOutcome::Failed));
    assert_eq!(from_timeout, from_error);
}

#[tokio::test]
async fn test_malformed_body_is_failed() {
    let addr = common::start_programmable_service(|_| async { (200, "not json".to_string()) }).await;
    let outcome = probe_for(addr, Duration::from_secs(5))
        .probe("123", &CancelToken::never())
        .await;
    assert_eq!(outcome, Ok(ProbeOutcome::Failed));

    let addr = common::start_programmable_service(|_| async { (200, r#"{"state": "success"}"#.to_string()) }).await;
    let outcome = probe_for(addr, Duration::from_secs(5))
        .probe("123", &CancelToken::never())
        .await;
    assert_eq!(outcome, Ok(ProbeOutcome::Failed));
}

#[tokio::test]
async fn test_coordinator_runs_probes_concurrently() {
    let slow = || {
        common::start_programmable_service(|_| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            (200, r#"{"status": "success"}"#.to_string())
        })
    };
    let s1 = slow().await;
    let s2 = slow().await;

    let config = common::local_config(s1, s2);
    let coordinator = DualProbeCoordinator::from_config(&config, common::test_client()).unwrap();

    let start = Instant::now();
    let outcomes = coordinator.check("123", &CancelToken::never()).await.unwrap();
    assert_eq!(outcomes, (ProbeOutcome::Success, ProbeOutcome::Success));
    assert!(start.elapsed() < Duration::from_millis(950));
}

#[tokio::test]
async fn test_cancellation_propagates_out_of_run() {
    let hanging = || {
        common::start_programmable_service(|_| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            (200, r#"{"status": "success"}"#.to_string())
        })
    };
    let s1 = hanging().await;
    let s2 = hanging().await;

    let shutdown = Arc::new(Shutdown::new());
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.trigger();
    });

    let start = Instant::now();
    let result = common::driver(&common::local_config(s1, s2))
        .run("123", &shutdown.token())
        .await;

    assert_eq!(result, Err(Cancelled));
    assert!(start.elapsed() < Duration::from_secs(5));
}
