use crate::config::{ConfigError, FileConfig, Prompt, Resolver, TerminalPrompt};
use crate::report::ConsoleReporter;
use anyhow::Context;
use clap::Parser;
use grafana_folders::reconcile::{BatchResult, Reconciler};
use std::io::Write;
use std::path::PathBuf;

/// Deletes every Grafana folder, and the dashboards they contain, except "General".
#[derive(Parser)]
#[clap(about, author, version)]
pub struct Command {
    /// Grafana base url, like http://localhost:3000. Defaults to GRAFANA_URL.
    #[clap(long)]
    url: Option<String>,
    /// Authorization, "Basic username:password", "Bearer token" or a raw token. Defaults to GRAFANA_AUTH.
    #[clap(long)]
    auth: Option<String>,
    /// Path to a json configuration file. Default to ~/.config/grafana-folders.json when it exists.
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Timeout of each call, in seconds. Defaults to GRAFANA_TIMEOUT, then 30.
    #[clap(long)]
    timeout: Option<u64>,
    /// Number of folders deleted at the same time.
    #[clap(long, default_value = "1")]
    concurrency: usize,
    #[clap(short, long)]
    verbose: bool,
}

impl Command {
    pub fn set_log_level(&self) {
        let filter = std::env::var("RUST_LOG").ok().or_else(|| {
            if self.verbose {
                Some("info".to_string())
            } else {
                None
            }
        });
        if let Some(filter) = filter {
            if let Err(err) = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
            {
                eprintln!("couldn't init logger: {err:?}");
            }
        }
    }

    pub async fn execute(self) -> anyhow::Result<BatchResult> {
        let reporter = ConsoleReporter::new(std::io::stdout());
        reporter.banner();
        let file = FileConfig::load(self.config.as_deref())?;
        let env = |key: &str| std::env::var(key).ok();
        self.run(&env, file, &TerminalPrompt, &reporter).await
    }

    pub(crate) async fn run<W: Write>(
        self,
        env: &dyn Fn(&str) -> Option<String>,
        file: Option<FileConfig>,
        prompt: &dyn Prompt,
        reporter: &ConsoleReporter<W>,
    ) -> anyhow::Result<BatchResult> {
        let resolver = Resolver::new(env, file, prompt);
        let settings = resolver.settings(self.url, self.auth, self.timeout)?;
        tracing::info!("cleaning folders of {}", settings.base_url);
        let client = settings
            .build()
            .context("unable to build the grafana client")?;
        let result = Reconciler::default()
            .with_concurrency(self.concurrency)
            .reconcile(&client, reporter)
            .await
            .context("unable to list folders")?;
        reporter.summary(&result);
        Ok(result)
    }
}

fn find_cause<'a, T: std::error::Error + 'static>(err: &'a anyhow::Error) -> Option<&'a T> {
    err.chain().find_map(|cause| cause.downcast_ref::<T>())
}

/// Maps the error that stopped the run to an exit code
pub fn exit_code(err: &anyhow::Error) -> exitcode::ExitCode {
    if let Some(api) = find_cause::<grafana_folders::Error>(err) {
        match api {
            grafana_folders::Error::Unauthorized { .. } => exitcode::NOPERM,
            grafana_folders::Error::ResponseFormat(_) => exitcode::PROTOCOL,
            _ => exitcode::UNAVAILABLE,
        }
    } else if find_cause::<ConfigError>(err).is_some()
        || find_cause::<grafana_folders::builder::Error>(err).is_some()
        || find_cause::<serde_json::Error>(err).is_some()
        || find_cause::<std::io::Error>(err).is_some()
    {
        exitcode::CONFIG
    } else {
        exitcode::SOFTWARE
    }
}

/// Exit code of a run that listed the folders
pub fn result_code(result: &BatchResult) -> exitcode::ExitCode {
    if result.is_complete_success() {
        exitcode::OK
    } else {
        exitcode::DATAERR
    }
}
