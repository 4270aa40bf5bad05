use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{debug, info, instrument};

use crate::config::{load_settings_file, Overrides, Settings};
use crate::errors::Result;
use crate::suite::{run_suite, Report};

pub const EXIT_OK: u8 = 0;
pub const EXIT_CHECK_FAILED: u8 = 1;
pub const EXIT_SETUP_FAILED: u8 = 2;

/// CLI
#[derive(Parser, Debug)]
#[command(
    name = "mottooth-smoke",
    version,
    about = "Log in to the Mottooth API and smoke-test its motos, beacons and localizacoes routes.",
    long_about = "Log in to the Mottooth API and smoke-test its endpoints.\n\n\
Configuration (highest precedence first):\n  • command-line flags\n  • environment: API_BASE_URL, API_USER, API_PASS, API_RESOURCE_ID, API_TIMEOUT_SECS (a .env file is honoured)\n  • YAML file given with --config\n  • built-in defaults\n\n\
Exit codes: 0 all checks passed or skipped, 1 a check failed, 2 setup failed."
)]
pub struct Cli {
    /// Target server root, e.g. http://localhost:8080
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Login username
    #[arg(long = "user", short = 'u', value_name = "NAME")]
    pub user: Option<String>,

    /// Login password
    #[arg(long = "pass", short = 'p', value_name = "SECRET")]
    pub pass: Option<String>,

    /// Id used by the fetch-by-id checks
    #[arg(long = "resource-id", value_name = "ID")]
    pub resource_id: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long = "timeout-secs", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Optional YAML settings file
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format written to stdout
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            username: self.user.clone(),
            password: self.pass.clone(),
            resource_id: self.resource_id,
            timeout_secs: self.timeout_secs,
        }
    }

    /// Resolve settings from flags, environment, and the optional YAML file.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Some(load_settings_file(path)?),
            None => None,
        };
        Settings::from_env(&self.overrides(), file.as_ref())
    }
}

#[instrument(skip_all)]
pub async fn run(cli: &Cli) -> Result<Report> {
    info!("starting smoke run");

    let settings = cli.settings()?;
    debug!(?settings, "resolved settings");

    let mut out = std::io::stdout();
    if cli.format == OutputFormat::Text {
        write_banner(&mut out, &settings)?;
        out.flush()?;
    }

    let report = run_suite(&settings).await?;

    write_report(&mut out, cli.format, &report)?;
    out.flush()?;
    Ok(report)
}

/// Resolved target and user, printed before login.
pub fn write_banner(out: &mut impl Write, settings: &Settings) -> Result<()> {
    writeln!(out, "Base URL........: {}", settings.base_url)?;
    writeln!(out, "User for login..: {}", settings.username)?;
    Ok(())
}

/// Per-check lines and summary. A report only exists after a successful
/// login, so the token line is always `true` here.
pub fn write_report(out: &mut impl Write, format: OutputFormat, report: &Report) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Token acquired?.: true")?;
            writeln!(out, "{report}")?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Process exit code: 0 all checks passed or skipped, 1 a check failed,
/// 2 setup (configuration or login) failed.
pub fn exit_code(res: &Result<Report>) -> u8 {
    match res {
        Ok(report) if report.is_success() => EXIT_OK,
        Ok(_) => EXIT_CHECK_FAILED,
        Err(_) => EXIT_SETUP_FAILED,
    }
}
