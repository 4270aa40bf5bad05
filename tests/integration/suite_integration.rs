use mottooth_smoke::checks::CheckOutcome;
use mottooth_smoke::config::Overrides;
use mottooth_smoke::errors::SmokeError;
use mottooth_smoke::suite::run_suite;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{mount_all_ok, mount_get, mount_login, settings_for, settings_with, BEARER};

#[tokio::test]
async fn test_all_seven_checks_run_with_bearer_header() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_all_ok(&server).await;

    let report = run_suite(&settings_for(&server)).await.unwrap();

    assert_eq!(report.results.len(), 7);
    assert_eq!(report.passed(), 7);
    assert!(report.is_success());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 7);
    for req in requests.iter().filter(|r| r.method.as_str() == "GET") {
        let auth = req.headers.get("authorization").and_then(|v| v.to_str().ok());
        assert_eq!(auth, Some(BEARER), "missing bearer on {}", req.url);
    }
}

#[tokio::test]
async fn test_checks_run_in_fixed_order() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_all_ok(&server).await;

    run_suite(&settings_for(&server)).await.unwrap();

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "/api/auth/login",
            "/api/motos",
            "/api/motos/1",
            "/api/beacons",
            "/api/beacons/1",
            "/api/localizacoes",
            "/api/localizacoes/1",
        ]
    );
}

#[tokio::test]
async fn test_by_id_not_found_still_passes() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    for route in ["/api/motos", "/api/beacons", "/api/localizacoes"] {
        mount_get(&server, route, 200).await;
    }
    for route in ["/api/motos/1", "/api/beacons/1", "/api/localizacoes/1"] {
        mount_get(&server, route, 404).await;
    }

    let report = run_suite(&settings_for(&server)).await.unwrap();

    assert!(report.is_success());
    let by_id: Vec<Option<u16>> = report
        .results
        .iter()
        .skip(2)
        .step_by(2)
        .map(|r| r.status)
        .collect();
    assert_eq!(by_id, vec![Some(404), Some(404), Some(404)]);
}

#[tokio::test]
async fn test_failing_list_does_not_stop_later_checks() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_get(&server, "/api/motos", 500).await;
    for route in [
        "/api/motos/1",
        "/api/beacons",
        "/api/beacons/1",
        "/api/localizacoes",
        "/api/localizacoes/1",
    ] {
        mount_get(&server, route, 200).await;
    }

    let report = run_suite(&settings_for(&server)).await.unwrap();

    assert_eq!(report.results.len(), 7);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.passed(), 6);
    assert!(!report.is_success());
    assert_eq!(
        report.results[1].outcome,
        CheckOutcome::Failed("expected 200, got 500".to_string())
    );
}

#[tokio::test]
async fn test_by_id_unexpected_status_fails() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    for route in [
        "/api/motos",
        "/api/motos/1",
        "/api/beacons",
        "/api/localizacoes",
        "/api/localizacoes/1",
    ] {
        mount_get(&server, route, 200).await;
    }
    mount_get(&server, "/api/beacons/1", 403).await;

    let report = run_suite(&settings_for(&server)).await.unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(report.results[4].status, Some(403));
    assert_eq!(
        report.results[4].outcome,
        CheckOutcome::Failed("expected 200 or 404, got 403".to_string())
    );
}

#[tokio::test]
async fn test_invalid_login_aborts_before_any_check() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let err = run_suite(&settings_for(&server)).await.unwrap_err();

    assert!(matches!(err, SmokeError::LoginFailed { status: 403, .. }));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "no check may run after a failed login");
}

#[tokio::test]
async fn test_resource_id_override_changes_lookup_paths() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    for route in [
        "/api/motos",
        "/api/motos/9",
        "/api/beacons",
        "/api/beacons/9",
        "/api/localizacoes",
        "/api/localizacoes/9",
    ] {
        mount_get(&server, route, 200).await;
    }
    let settings = settings_with(
        &server,
        Overrides {
            resource_id: Some(9),
            ..Overrides::default()
        },
    );

    let report = run_suite(&settings).await.unwrap();
    assert_eq!(report.passed(), 7);
}
