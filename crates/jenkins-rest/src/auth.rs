//! Credential parsing and authentication kind inference

use base64::{
    engine::general_purpose::STANDARD,
    Engine,
};
use jenkins_rest_api::{
    JenkinsError,
    JenkinsResult,
};
use secrecy::{
    ExposeSecret,
    SecretString,
};

pub(crate) const ANONYMOUS_IDENTITY: &str = "anonymous";

/// How the `Authorization` header is built for a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthenticationKind {
    UsernamePassword,
    ApiToken,
    Anonymous,
}

impl AuthenticationKind {
    /// HTTP authentication scheme, empty for anonymous access.
    pub fn scheme(&self) -> &'static str {
        match self {
            AuthenticationKind::UsernamePassword | AuthenticationKind::ApiToken => "Basic",
            AuthenticationKind::Anonymous => "",
        }
    }
}

/// Identity plus the base64 encoded `identity:secret` pair.
#[derive(Debug)]
pub struct EncodedIdentity {
    identity: String,
    encoded: SecretString,
}

impl EncodedIdentity {
    /// Accepts either `identity:secret` or its base64 encoding.
    fn detect(raw: &str) -> JenkinsResult<Self> {
        if let Some((identity, _)) = raw.split_once(':') {
            return Ok(Self {
                identity: identity.to_string(),
                encoded: SecretString::from(STANDARD.encode(raw.as_bytes())),
            });
        }

        let decoded = STANDARD
            .decode(raw.as_bytes())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(|| JenkinsError::IdentityDetection(raw.to_string()))?;

        match decoded.split_once(':') {
            Some((identity, _)) => Ok(Self {
                identity: identity.to_string(),
                encoded: SecretString::from(raw.to_string()),
            }),
            None => Err(JenkinsError::IdentityDetection(raw.to_string())),
        }
    }

    fn anonymous() -> Self {
        let pair = format!("{ANONYMOUS_IDENTITY}:");
        Self {
            identity: ANONYMOUS_IDENTITY.to_string(),
            encoded: SecretString::from(STANDARD.encode(pair.as_bytes())),
        }
    }
}

/// A validated credential, immutable once built.
///
/// The stored auth value is always already base64 encoded, so callers put it
/// into the `Authorization` header as is.
#[derive(Debug)]
pub enum Credential {
    UsernamePassword(EncodedIdentity),
    ApiToken(EncodedIdentity),
    Anonymous(EncodedIdentity),
}

impl Credential {
    pub fn from_username_password(raw: &str) -> JenkinsResult<Self> {
        EncodedIdentity::detect(raw).map(Credential::UsernamePassword)
    }

    pub fn from_api_token(raw: &str) -> JenkinsResult<Self> {
        EncodedIdentity::detect(raw).map(Credential::ApiToken)
    }

    pub fn anonymous() -> Self {
        Credential::Anonymous(EncodedIdentity::anonymous())
    }

    /// Builds a credential for the given kind; an absent raw value is always
    /// anonymous.
    pub fn from_config(raw: Option<&str>, kind: AuthenticationKind) -> JenkinsResult<Self> {
        match (raw, kind) {
            (None, _) | (_, AuthenticationKind::Anonymous) => Ok(Self::anonymous()),
            (Some(raw), AuthenticationKind::UsernamePassword) => Self::from_username_password(raw),
            (Some(raw), AuthenticationKind::ApiToken) => Self::from_api_token(raw),
        }
    }

    pub fn kind(&self) -> AuthenticationKind {
        match self {
            Credential::UsernamePassword(_) => AuthenticationKind::UsernamePassword,
            Credential::ApiToken(_) => AuthenticationKind::ApiToken,
            Credential::Anonymous(_) => AuthenticationKind::Anonymous,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Credential::Anonymous(_))
    }

    pub fn identity(&self) -> &str {
        &self.encoded_identity().identity
    }

    pub fn auth_value(&self) -> &str {
        self.encoded_identity().encoded.expose_secret()
    }

    /// Full `Authorization` header value, `None` for anonymous access.
    pub fn authorization_header(&self) -> Option<String> {
        if self.is_anonymous() {
            return None;
        }
        Some(format!("{} {}", self.kind().scheme(), self.auth_value()))
    }

    fn encoded_identity(&self) -> &EncodedIdentity {
        match self {
            Credential::UsernamePassword(id) | Credential::ApiToken(id) | Credential::Anonymous(id) => {
                id
            }
        }
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::anonymous()
    }
}
