mod app;
mod config;
mod report;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cmd = app::Command::parse();
    cmd.set_log_level();
    let code = match cmd.execute().await {
        Ok(result) => app::result_code(&result),
        Err(err) => {
            tracing::error!("{err:?}");
            eprintln!("Error: {err:#}");
            app::exit_code(&err)
        }
    };
    std::process::exit(code);
}
