use std::borrow::Cow;
use std::time::Duration;

/// Errors that may occur during client configuration and building.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when no base url was provided.
    #[error("the grafana url is missing")]
    MissingBaseUrl,
    /// Returned when no valid credentials were provided.
    #[error("the grafana credentials are missing")]
    MissingCredentials,
    /// Returned when the underlying HTTP client could not be built.
    #[error("unable to build reqwest client")]
    Reqwest(#[from] reqwest::Error),
    /// Returned when `GRAFANA_TIMEOUT` is not a positive number of seconds.
    #[error("invalid timeout {0:?}, expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Builder for constructing a [`Client`](crate::Client) with custom configuration.
///
/// ```
/// use grafana_folders::builder::ClientBuilder;
/// use grafana_folders::Credentials;
///
/// let client = ClientBuilder::default()
///     .with_base_url("http://localhost:3000/")
///     .with_credentials(Credentials::basic("admin", "admin"))
///     .build()
///     .expect("unable to build client");
/// assert_eq!(client.base_url(), "http://localhost:3000");
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<Cow<'static, str>>,
    client_builder: Option<reqwest::ClientBuilder>,
    credentials: Option<crate::Credentials>,
    timeout: Option<Duration>,
    invalid_timeout: Option<String>,
}

fn parse_timeout(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

impl ClientBuilder {
    /// Creates a builder pre-configured using environment variables.
    ///
    /// - Uses `GRAFANA_URL` for the endpoint.
    /// - Uses `GRAFANA_AUTH` for the credentials, see [`Credentials::parse`](crate::Credentials::parse).
    /// - Uses `GRAFANA_TIMEOUT`, in seconds, for the timeout of each call. An invalid value
    ///   makes [`build`](Self::build) fail unless a timeout is set afterwards.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Ok(value) = std::env::var("GRAFANA_URL") {
            builder.set_base_url(value);
        }
        builder.credentials = std::env::var("GRAFANA_AUTH")
            .ok()
            .and_then(|value| crate::Credentials::parse(&value).ok());
        if let Ok(value) = std::env::var("GRAFANA_TIMEOUT") {
            match parse_timeout(&value) {
                Some(timeout) => builder.set_timeout(timeout),
                None => builder.invalid_timeout = Some(value),
            }
        }
        builder
    }
}

impl ClientBuilder {
    /// Sets the base URL, dropping a trailing slash.
    pub fn set_base_url(&mut self, base_url: impl Into<Cow<'static, str>>) {
        let base_url = base_url.into();
        self.base_url = Some(if base_url.ends_with('/') {
            Cow::Owned(base_url[..base_url.len() - 1].to_string())
        } else {
            base_url
        });
    }

    /// Sets the base URL and returns the modified builder.
    pub fn with_base_url(mut self, base_url: impl Into<Cow<'static, str>>) -> Self {
        self.set_base_url(base_url);
        self
    }

    /// Sets a custom `reqwest::ClientBuilder`.
    pub fn set_client_builder(&mut self, client_builder: reqwest::ClientBuilder) {
        self.client_builder = Some(client_builder);
    }

    /// Sets a custom `reqwest::ClientBuilder` and returns the modified builder.
    pub fn with_client_builder(mut self, client_builder: reqwest::ClientBuilder) -> Self {
        self.set_client_builder(client_builder);
        self
    }

    /// Sets the credentials for API authentication.
    pub fn set_credentials(&mut self, credentials: crate::Credentials) {
        self.credentials = Some(credentials);
    }

    /// Sets the credentials and returns the modified builder.
    pub fn with_credentials(mut self, credentials: crate::Credentials) -> Self {
        self.set_credentials(credentials);
        self
    }

    /// Sets the timeout of each call.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
        self.invalid_timeout = None;
    }

    /// Sets the timeout of each call and returns the modified builder.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout(timeout);
        self
    }

    /// Builds the [`Client`](crate::Client) with the configured options.
    ///
    /// When no timeout is set, [`DEFAULT_TIMEOUT`](crate::DEFAULT_TIMEOUT) applies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBaseUrl`] if no base url was set.
    /// Returns [`Error::MissingCredentials`] if no credentials were set.
    /// Returns [`Error::InvalidTimeout`] if `GRAFANA_TIMEOUT` could not be parsed.
    /// Returns [`Error::Reqwest`] if the HTTP client could not be built.
    pub fn build(self) -> Result<crate::Client, Error> {
        if let Some(value) = self.invalid_timeout {
            return Err(Error::InvalidTimeout(value));
        }
        let base_url = self.base_url.ok_or(Error::MissingBaseUrl)?;
        let credentials = self.credentials.ok_or(Error::MissingCredentials)?;
        let builder = self
            .client_builder
            .unwrap_or_default()
            .user_agent(crate::USER_AGENT)
            .timeout(self.timeout.unwrap_or(crate::DEFAULT_TIMEOUT));
        Ok(crate::Client {
            base_url,
            credentials,
            inner: builder.build()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientBuilder, Error};
    use crate::Credentials;
    use std::time::Duration;

    #[test]
    fn should_strip_single_trailing_slash() {
        let client = ClientBuilder::default()
            .with_base_url("http://grafana.local:3000/")
            .with_credentials(Credentials::bearer("token"))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://grafana.local:3000");
    }

    #[test]
    fn should_keep_url_without_slash() {
        let client = ClientBuilder::default()
            .with_base_url(String::from("https://grafana.example.com/sub"))
            .with_credentials(Credentials::bearer("token"))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://grafana.example.com/sub");
    }

    #[test]
    fn should_fail_without_base_url() {
        let err = ClientBuilder::default()
            .with_credentials(Credentials::bearer("token"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingBaseUrl));
    }

    #[test]
    fn should_fail_without_credentials() {
        let err = ClientBuilder::default()
            .with_base_url("http://localhost:3000")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
    }

    // single test touching the environment, so nothing races on it
    #[test]
    fn should_read_from_env() {
        std::env::set_var("GRAFANA_URL", "http://grafana.env:3000/");
        std::env::set_var("GRAFANA_AUTH", "Bearer glsa_env");
        std::env::set_var("GRAFANA_TIMEOUT", "5");
        let builder = ClientBuilder::from_env();
        assert_eq!(builder.timeout, Some(Duration::from_secs(5)));
        assert_eq!(builder.credentials, Some(Credentials::bearer("glsa_env")));
        let client = builder.build().unwrap();
        assert_eq!(client.base_url(), "http://grafana.env:3000");

        std::env::set_var("GRAFANA_TIMEOUT", "0");
        let err = ClientBuilder::from_env().build().unwrap_err();
        assert!(matches!(err, Error::InvalidTimeout(ref value) if value == "0"));

        std::env::set_var("GRAFANA_TIMEOUT", "soon");
        let err = ClientBuilder::from_env().build().unwrap_err();
        assert!(matches!(err, Error::InvalidTimeout(ref value) if value == "soon"));
        let client = ClientBuilder::from_env()
            .with_timeout(Duration::from_secs(1))
            .build();
        assert!(client.is_ok());

        std::env::remove_var("GRAFANA_URL");
        std::env::remove_var("GRAFANA_AUTH");
        std::env::remove_var("GRAFANA_TIMEOUT");
        let err = ClientBuilder::from_env().build().unwrap_err();
        assert!(matches!(err, Error::MissingBaseUrl));
    }
}
