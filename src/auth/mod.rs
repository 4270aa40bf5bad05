use serde::Serialize;
use std::fmt;
use tracing::{info, instrument};

use crate::config::Settings;
use crate::errors::{Result, SmokeError};
use crate::http::ApiClient;

pub const LOGIN_PATH: &str = "/api/auth/login";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Bearer credential obtained from login, immutable for the rest of the run.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Wrap a raw token. Returns `None` for a blank token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self { token })
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header: `Bearer <token>`.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// POST the configured credentials to the login endpoint and extract the token.
///
/// Any non-200 status, or a 200 without a non-blank string `token`, is fatal.
#[instrument(skip_all, fields(user = %settings.username))]
pub async fn login(client: &ApiClient, settings: &Settings) -> Result<Session> {
    let url = settings.endpoint(LOGIN_PATH)?;
    let body = LoginRequest {
        username: &settings.username,
        password: &settings.password,
    };

    let resp = client.post_json(url, &body).await?;
    if resp.status != 200 {
        return Err(SmokeError::LoginFailed {
            status: resp.status,
            body: resp.body,
        });
    }

    let json = resp
        .json()
        .map_err(|e| SmokeError::MissingToken(format!("login body is not JSON: {e}")))?;
    let token = json
        .get("token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SmokeError::MissingToken("login response has no 'token' field".into()))?;

    let session = Session::new(token)
        .ok_or_else(|| SmokeError::MissingToken("token is blank".into()))?;
    info!("login succeeded, token acquired");
    Ok(session)
}
