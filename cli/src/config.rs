use anyhow::Context;
use grafana_folders::builder::ClientBuilder;
use grafana_folders::credentials::{Credentials, CredentialsError};
use grafana_folders::Client;
use serde::Deserialize;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const URL_ENV: &str = "GRAFANA_URL";
pub const AUTH_ENV: &str = "GRAFANA_AUTH";
pub const TIMEOUT_ENV: &str = "GRAFANA_TIMEOUT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing {name}: use --{flag}, set {env} or run in a terminal to be prompted")]
    Missing {
        name: &'static str,
        flag: &'static str,
        env: &'static str,
    },
    #[error("unable to read {name} from the terminal")]
    Prompt {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid authorization value")]
    InvalidAuth(#[from] CredentialsError),
    #[error("invalid timeout {0:?}, expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// A value that can come from the command line, the environment, the file or the terminal
#[derive(Clone, Copy, Debug)]
pub enum Setting {
    Url,
    Auth,
}

impl Setting {
    fn name(&self) -> &'static str {
        match self {
            Self::Url => "grafana url",
            Self::Auth => "grafana authorization",
        }
    }

    fn flag(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Auth => "auth",
        }
    }

    fn env(&self) -> &'static str {
        match self {
            Self::Url => URL_ENV,
            Self::Auth => AUTH_ENV,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Url => "Enter Grafana URL (e.g. http://localhost:3000)",
            Self::Auth => "Enter Grafana Auth (Basic username:password or Bearer token)",
        }
    }

    fn secret(&self) -> bool {
        matches!(self, Self::Auth)
    }
}

pub trait Prompt {
    fn is_interactive(&self) -> bool;

    fn ask(&self, label: &str, secret: bool) -> std::io::Result<String>;
}

/// Asks on the terminal, hiding secrets
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal()
    }

    fn ask(&self, label: &str, secret: bool) -> std::io::Result<String> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{label}: ")?;
        stdout.flush()?;
        if secret {
            rpassword::read_password()
        } else {
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        }
    }
}

/// Content of the json configuration file
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    url: Option<String>,
    auth: Option<String>,
    timeout: Option<u64>,
}

impl FileConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("grafana-folders.json"))
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let reader = std::fs::File::open(path)
            .with_context(|| format!("unable to open config file {path:?}"))?;
        serde_json::from_reader(reader)
            .with_context(|| format!("unable to parse config file {path:?}"))
    }

    /// Loads the given file, or the default one when it exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Option<Self>> {
        match path {
            Some(path) => Self::from_path(path).map(Some),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_path(&path).map(Some),
                _ => Ok(None),
            },
        }
    }

    fn get(&self, setting: Setting) -> Option<&str> {
        match setting {
            Setting::Url => self.url.as_deref(),
            Setting::Auth => self.auth.as_deref(),
        }
    }
}

/// Everything needed to build the client
#[derive(Debug)]
pub struct Settings {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout: Option<Duration>,
}

impl Settings {
    pub fn build(self) -> Result<Client, grafana_folders::builder::Error> {
        let mut builder = ClientBuilder::default()
            .with_base_url(self.base_url)
            .with_credentials(self.credentials);
        if let Some(timeout) = self.timeout {
            builder.set_timeout(timeout);
        }
        builder.build()
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// A timeout of zero would fail every call, so only strictly positive seconds are accepted.
fn parse_timeout(value: String) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(value)),
    }
}

/// Resolves each setting from the first source providing it:
/// command line, environment, configuration file, then terminal.
pub struct Resolver<'a> {
    env: &'a dyn Fn(&str) -> Option<String>,
    file: Option<FileConfig>,
    prompt: &'a dyn Prompt,
}

impl<'a> Resolver<'a> {
    pub fn new(
        env: &'a dyn Fn(&str) -> Option<String>,
        file: Option<FileConfig>,
        prompt: &'a dyn Prompt,
    ) -> Self {
        Self { env, file, prompt }
    }

    fn ask(&self, setting: Setting) -> Result<String, ConfigError> {
        let missing = ConfigError::Missing {
            name: setting.name(),
            flag: setting.flag(),
            env: setting.env(),
        };
        if !self.prompt.is_interactive() {
            return Err(missing);
        }
        let answer = self
            .prompt
            .ask(setting.label(), setting.secret())
            .map_err(|source| ConfigError::Prompt {
                name: setting.name(),
                source,
            })?;
        non_empty(answer).ok_or(missing)
    }

    pub fn resolve(
        &self,
        setting: Setting,
        explicit: Option<String>,
    ) -> Result<String, ConfigError> {
        if let Some(found) = explicit
            .and_then(non_empty)
            .or_else(|| (self.env)(setting.env()).and_then(non_empty))
            .or_else(|| {
                self.file
                    .as_ref()
                    .and_then(|file| file.get(setting))
                    .map(String::from)
                    .and_then(non_empty)
            })
        {
            tracing::debug!("{} resolved without prompting", setting.name());
            return Ok(found);
        }
        self.ask(setting)
    }

    fn resolve_timeout(&self, explicit: Option<u64>) -> Result<Option<Duration>, ConfigError> {
        let value = if let Some(value) = explicit {
            Some(value.to_string())
        } else if let Some(value) = (self.env)(TIMEOUT_ENV).and_then(non_empty) {
            Some(value)
        } else {
            self.file
                .as_ref()
                .and_then(|file| file.timeout)
                .map(|value| value.to_string())
        };
        value.map(parse_timeout).transpose()
    }

    pub fn settings(
        &self,
        url: Option<String>,
        auth: Option<String>,
        timeout: Option<u64>,
    ) -> Result<Settings, ConfigError> {
        let base_url = self.resolve(Setting::Url, url)?;
        let auth = self.resolve(Setting::Auth, auth)?;
        Ok(Settings {
            base_url,
            credentials: Credentials::parse(&auth)?,
            timeout: self.resolve_timeout(timeout)?,
        })
    }
}
