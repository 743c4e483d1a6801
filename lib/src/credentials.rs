//! The credentials used to authenticate against the Grafana API.
//!
//! Grafana accepts either a basic authentication with a user and a password or
//! a bearer token (service account token or API key).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::str::FromStr;

const BASIC_SCHEME: &str = "Basic";
const BEARER_SCHEME: &str = "Bearer";

/// Errors returned when parsing an authorization value
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("authorization value is empty")]
    Empty,
    #[error("basic authorization should be \"username:password\" or its base64 encoding")]
    InvalidBasic,
}

/// The different kind of credentials used for authentication
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    Bearer { token: String },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}

impl Credentials {
    pub fn basic<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer<T: Into<String>>(token: T) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Parses an authorization value.
    ///
    /// The scheme is only recognized when the value *starts* with the word `Basic` or `Bearer`,
    /// followed by whitespace or nothing. Any other value is used as a bearer token.
    ///
    /// ```rust
    /// use grafana_folders::credentials::Credentials;
    ///
    /// assert_eq!(
    ///     Credentials::parse("Basic admin:secret").unwrap(),
    ///     Credentials::basic("admin", "secret"),
    /// );
    /// assert_eq!(
    ///     Credentials::parse("glsa_MyBearerToken").unwrap(),
    ///     Credentials::bearer("glsa_MyBearerToken"),
    /// );
    /// ```
    pub fn parse(value: &str) -> Result<Self, CredentialsError> {
        let value = value.trim_start();
        if let Some(rest) = strip_scheme(value, BASIC_SCHEME) {
            parse_basic(rest.trim())
        } else if let Some(rest) = strip_scheme(value, BEARER_SCHEME) {
            non_empty(rest.trim()).map(Self::bearer)
        } else {
            non_empty(value.trim_end()).map(Self::bearer)
        }
    }

    pub(crate) fn apply(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Basic { username, password } => req.basic_auth(username, Some(password)),
            Self::Bearer { token } => req.bearer_auth(token),
        }
    }
}

impl FromStr for Credentials {
    type Err = CredentialsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    value
        .strip_prefix(scheme)
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

fn non_empty(value: &str) -> Result<&str, CredentialsError> {
    if value.is_empty() {
        Err(CredentialsError::Empty)
    } else {
        Ok(value)
    }
}

fn split_user_password(value: &str) -> Option<Credentials> {
    value
        .split_once(':')
        .map(|(username, password)| Credentials::basic(username, password))
}

fn parse_basic(value: &str) -> Result<Credentials, CredentialsError> {
    let value = non_empty(value)?;
    if let Some(found) = split_user_password(value) {
        return Ok(found);
    }
    let decoded = STANDARD
        .decode(value)
        .map_err(|_| CredentialsError::InvalidBasic)?;
    let decoded = String::from_utf8(decoded).map_err(|_| CredentialsError::InvalidBasic)?;
    split_user_password(&decoded).ok_or(CredentialsError::InvalidBasic)
}
