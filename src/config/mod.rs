use std::fmt;
use std::{fs::File, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{Result, SmokeError};


pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_USER: &str = "joao@ex.com";
pub const DEFAULT_PASS: &str = "fiap25";
pub const DEFAULT_RESOURCE_ID: u64 = 1;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment keys read during settings resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiEnv {
    BaseUrl,
    User,
    Pass,
    ResourceId,
    TimeoutSecs,
}

impl ApiEnv {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "API_BASE_URL",
            Self::User => "API_USER",
            Self::Pass => "API_PASS",
            Self::ResourceId => "API_RESOURCE_ID",
            Self::TimeoutSecs => "API_TIMEOUT_SECS",
        }
    }
}

/// Optional YAML settings file (`--config`). Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub resource_id: Option<u64>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Values given explicitly on the command line; they beat every other layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub resource_id: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// Resolved run configuration. Built once, then only borrowed.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: Url,
    pub username: String,
    pub password: String,
    pub resource_id: u64,
    pub timeout: Duration,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("resource_id", &self.resource_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Settings {
    /// Resolve from the process environment.
    pub fn from_env(overrides: &Overrides, file: Option<&SettingsFile>) -> Result<Self> {
        Self::resolve(overrides, file, |key| std::env::var(key).ok())
    }

    /// Resolve with precedence command line > environment > file > default.
    /// Blank strings count as unset at every layer.
    pub fn resolve<F>(
        overrides: &Overrides,
        file: Option<&SettingsFile>,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let empty = SettingsFile::default();
        let file = file.unwrap_or(&empty);

        let base_url_raw = first_non_blank([
            overrides.base_url.clone(),
            lookup(ApiEnv::BaseUrl.as_str()),
            file.base_url.clone(),
        ])
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let username = first_non_blank([
            overrides.username.clone(),
            lookup(ApiEnv::User.as_str()),
            file.username.clone(),
        ])
        .unwrap_or_else(|| DEFAULT_USER.to_string());

        let password = first_non_blank([
            overrides.password.clone(),
            lookup(ApiEnv::Pass.as_str()),
            file.password.clone(),
        ])
        .unwrap_or_else(|| DEFAULT_PASS.to_string());

        let resource_id = match overrides.resource_id {
            Some(id) => id,
            None => match non_blank(lookup(ApiEnv::ResourceId.as_str())) {
                Some(raw) => parse_u64(ApiEnv::ResourceId.as_str(), &raw)?,
                None => file.resource_id.unwrap_or(DEFAULT_RESOURCE_ID),
            },
        };

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => match non_blank(lookup(ApiEnv::TimeoutSecs.as_str())) {
                Some(raw) => parse_u64(ApiEnv::TimeoutSecs.as_str(), &raw)?,
                None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
        };
        if timeout_secs == 0 {
            return Err(SmokeError::ConfigError(format!(
                "{} must be greater than zero",
                ApiEnv::TimeoutSecs.as_str()
            )));
        }

        Ok(Self {
            base_url: parse_base_url(&base_url_raw)?,
            username,
            password,
            resource_id,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Absolute URL for an API path such as `/api/motos`.
    ///
    /// Paths are appended to the base URL path, so a base with a path prefix
    /// (`http://host/app`) keeps it. Query and fragment of the base are dropped.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            self.base_url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }
}

/// The error worth reporting from a `.env` load: a file that exists but
/// cannot be read or parsed. A missing file is not a problem.
pub fn dotenv_warning<T>(res: &dotenvy::Result<T>) -> Option<&dotenvy::Error> {
    match res {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

pub fn load_settings_file<P: AsRef<Path>>(path: P) -> Result<SettingsFile> {
    let f = File::open(path)?;
    Ok(serde_yaml::from_reader(f)?)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().find_map(non_blank)
}

fn parse_u64(name: &str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|_| {
        SmokeError::ConfigError(format!("{name} must be a non-negative integer, got '{raw}'"))
    })
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SmokeError::ConfigError(format!(
            "{} must use http or https, got '{}'",
            ApiEnv::BaseUrl.as_str(),
            url.scheme()
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(SmokeError::ConfigError(format!(
            "{} must not carry a query or fragment, got '{url}'",
            ApiEnv::BaseUrl.as_str()
        )));
    }
    Ok(url)
}
