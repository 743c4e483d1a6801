//! Client for the [Grafana folder API](https://grafana.com/docs/grafana/latest/developers/http_api/folder/)
//! and a reconciler deleting every folder but the default one.
//!
//! ```no_run
//! use grafana_folders::builder::ClientBuilder;
//! use grafana_folders::reconcile::Reconciler;
//!
//! # tokio_test::block_on(async {
//! let client = ClientBuilder::from_env().build().unwrap();
//! let result = Reconciler::default().reconcile(&client, &()).await.unwrap();
//! println!("{} folders deleted", result.succeeded().count());
//! # })
//! ```

use std::borrow::Cow;
use std::time::Duration;

pub mod builder;
pub mod credentials;
pub mod error;
pub mod folder;
pub mod prelude;
pub mod reconcile;
mod request;

pub use credentials::Credentials;
pub use error::Error;

/// The default user agent for the http client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
/// The timeout applied to every call when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Grafana HTTP API
///
/// Built with a [`ClientBuilder`](crate::builder::ClientBuilder).
#[derive(Clone, Debug)]
pub struct Client {
    base_url: Cow<'static, str>,
    credentials: Credentials,
    inner: reqwest::Client,
}

impl Client {
    pub fn base_url(&self) -> &str {
        self.base_url.as_ref()
    }
}
