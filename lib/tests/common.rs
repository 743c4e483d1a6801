use grafana_folders::builder::ClientBuilder;
use grafana_folders::{Client, Credentials};
use std::time::Duration;

pub fn init() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn client(server: &mockito::Server) -> Client {
    ClientBuilder::default()
        .with_base_url(format!("{}/", server.url()))
        .with_credentials(Credentials::basic("admin", "admin"))
        .build()
        .unwrap()
}

pub fn client_with_timeout(server: &mockito::Server, timeout: Duration) -> Client {
    ClientBuilder::default()
        .with_base_url(server.url())
        .with_credentials(Credentials::basic("admin", "admin"))
        .with_timeout(timeout)
        .build()
        .unwrap()
}

/// Sends a byte every 50ms for up to 5s, stops as soon as the client hangs up.
pub fn stalled_body(writer: &mut dyn std::io::Write) -> std::io::Result<()> {
    for _ in 0..100 {
        std::thread::sleep(Duration::from_millis(50));
        writer.write_all(b" ")?;
        writer.flush()?;
    }
    Ok(())
}
