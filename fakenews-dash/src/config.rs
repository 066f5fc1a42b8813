use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const APP_NAME: &str = "fakenews-dash";

const ENV_BACKEND_URL: &str = "FAKENEWS_BACKEND_URL";
const ENV_TIMEOUT_SECS: &str = "FAKENEWS_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend_url: Url,
    /// `None` means requests may wait forever.
    pub request_timeout: Option<Duration>,
}

/// Values that may appear in `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    backend_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Overrides taken from the command line. They win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_path: Option<String>,
    pub backend_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}

pub fn load_settings(overrides: &Overrides) -> Result<Settings> {
    load_settings_with_env(overrides, |key| std::env::var(key).ok())
}

fn load_settings_with_env<F>(overrides: &Overrides, env: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut backend_url: Option<String> = None;
    let mut timeout_secs = DEFAULT_TIMEOUT_SECS;

    let file_cfg = match &overrides.config_path {
        Some(raw) => {
            let path = PathBuf::from(shellexpand::tilde(raw).into_owned());
            Some(read_file_config(&path)?)
        }
        None => match default_config_path() {
            Some(path) if path.exists() => Some(read_file_config(&path)?),
            _ => None,
        },
    };

    if let Some(cfg) = file_cfg {
        if cfg.backend_url.is_some() {
            backend_url = cfg.backend_url;
        }
        if let Some(v) = cfg.request_timeout_secs {
            timeout_secs = v;
        }
    }

    if let Some(v) = env(ENV_BACKEND_URL) {
        backend_url = Some(v);
    }
    if let Some(v) = env(ENV_TIMEOUT_SECS) {
        timeout_secs = v
            .trim()
            .parse()
            .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {v:?}"))?;
    }

    if let Some(v) = &overrides.backend_url {
        backend_url = Some(v.clone());
    }
    if let Some(v) = overrides.timeout_secs {
        timeout_secs = v;
    }

    let Some(raw_url) = backend_url else {
        bail!(
            "no backend URL configured; pass --backend-url, set {ENV_BACKEND_URL}, \
             or add backend_url to {}",
            default_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "config.toml".to_string())
        );
    };

    Ok(Settings {
        backend_url: parse_backend_url(&raw_url)?,
        request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
    })
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
}

fn parse_backend_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid backend URL {raw:?}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("backend URL must use http or https, got {other}://"),
    }
}
