use mottooth_smoke::config::{Overrides, Settings};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "abc123";
pub const BEARER: &str = "Bearer abc123";

/// Settings aimed at `server`, with no environment influence.
pub fn settings_for(server: &MockServer) -> Settings {
    settings_with(server, Overrides::default())
}

pub fn settings_with(server: &MockServer, overrides: Overrides) -> Settings {
    let overrides = Overrides {
        base_url: Some(server.uri()),
        ..overrides
    };
    Settings::resolve(&overrides, None, |_| None).expect("settings for mock server")
}

/// Login mock accepting the default credentials and returning `TOKEN`.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "joao@ex.com", "password": "fiap25"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": TOKEN})))
        .expect(1)
        .mount(server)
        .await;
}

/// Authenticated GET mock answering `status`, expected exactly once.
pub async fn mount_get(server: &MockServer, route: &str, status: u16) {
    let body = if route.matches('/').count() > 2 {
        json!({"id": 1})
    } else {
        json!([{"id": 1}, {"id": 2}])
    };
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("Authorization", BEARER))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Every resource route answering 200.
pub async fn mount_all_ok(server: &MockServer) {
    for route in [
        "/api/motos",
        "/api/motos/1",
        "/api/beacons",
        "/api/beacons/1",
        "/api/localizacoes",
        "/api/localizacoes/1",
    ] {
        mount_get(server, route, 200).await;
    }
}

/// Settings aimed at a local port nothing listens on.
pub fn unreachable_settings() -> Settings {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };
    let overrides = Overrides {
        base_url: Some(format!("http://127.0.0.1:{port}")),
        ..Overrides::default()
    };
    Settings::resolve(&overrides, None, |_| None).expect("settings for closed port")
}
