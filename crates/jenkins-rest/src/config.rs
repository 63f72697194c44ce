use std::fmt;
use std::path::Path;

use jenkins_rest_api::{
    JenkinsError,
    JenkinsResult,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::auth::{
    AuthenticationKind,
    Credential,
};
use crate::client::DEFAULT_ENDPOINT;
use crate::interpolation::interpolate_toml;

pub const ENDPOINT_VAR: &str = "JENKINS_REST_ENDPOINT";
pub const CREDENTIALS_VAR: &str = "JENKINS_REST_CREDENTIALS";
pub const API_TOKEN_VAR: &str = "JENKINS_REST_API_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Connection settings for a [`crate::JenkinsClient`].
///
/// `credentials` and `api_token` accept `user:secret` or its base64 form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JenkinsConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub credentials: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl fmt::Debug for JenkinsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("JenkinsConfig")
            .field("endpoint", &self.endpoint)
            .field("credentials", &redact(&self.credentials))
            .field("api_token", &redact(&self.api_token))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for JenkinsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            credentials: None,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl JenkinsConfig {
    /// Reads `JENKINS_REST_ENDPOINT`, `JENKINS_REST_CREDENTIALS` and
    /// `JENKINS_REST_API_TOKEN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint: non_empty(lookup(ENDPOINT_VAR)).unwrap_or_else(default_endpoint),
            credentials: non_empty(lookup(CREDENTIALS_VAR)),
            api_token: non_empty(lookup(API_TOKEN_VAR)),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Loads a TOML file, expanding `${VAR}` and `${VAR:-default}` in string
    /// values first.
    pub fn from_file(path: impl AsRef<Path>) -> JenkinsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            JenkinsError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> JenkinsResult<Self> {
        let mut value: toml::Value = toml::from_str(content)
            .map_err(|e| JenkinsError::Config(format!("Failed to parse TOML: {e}")))?;
        interpolate_toml(&mut value).map_err(|e| JenkinsError::Config(e.to_string()))?;

        let mut config: Self = value
            .try_into()
            .map_err(|e| JenkinsError::Config(format!("Invalid configuration: {e}")))?;
        config.credentials = non_empty(config.credentials);
        config.api_token = non_empty(config.api_token);
        Ok(config)
    }

    /// An API token wins over username/password; with neither the
    /// credential is anonymous.
    pub fn credential(&self) -> JenkinsResult<Credential> {
        let (raw, kind) = match (&self.api_token, &self.credentials) {
            (Some(token), _) => (Some(token.as_str()), AuthenticationKind::ApiToken),
            (None, Some(credentials)) => {
                (Some(credentials.as_str()), AuthenticationKind::UsernamePassword)
            }
            (None, None) => (None, AuthenticationKind::Anonymous),
        };
        Credential::from_config(raw, kind)
    }
}
