//! Request decoration with credentials and CSRF crumbs
//!
//! Two filters exist on purpose and behave differently for anonymous access:
//! - [`AuthenticationFilter`] guards state-changing requests. It always looks
//!   up the crumb decision, anonymous or not, because Jenkins applies CSRF
//!   protection to anonymous POSTs too.
//! - [`NoCrumbAuthenticationFilter`] only attaches `Authorization` and leaves
//!   anonymous requests untouched. Reads and the crumb request itself use it.

use std::sync::Arc;

use async_trait::async_trait;
use jenkins_rest_api::{
    JenkinsError,
    JenkinsResult,
};
use reqwest::header::{
    HeaderName,
    HeaderValue,
    AUTHORIZATION,
    COOKIE,
};
use reqwest::Request;

use crate::auth::Credential;
use crate::crumb::{
    CrumbCache,
    CrumbDecision,
    CrumbFetcher,
};

pub const CRUMB_HEADER: &str = "Jenkins-Crumb";

/// Decorates an outgoing request before it reaches the transport.
#[async_trait]
pub trait RequestFilter: Send + Sync {
    async fn apply(&self, request: Request) -> JenkinsResult<Request>;
}

fn header_value(value: &str, what: &str) -> JenkinsResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| JenkinsError::InvalidConfig(format!("Invalid {what} header value: {e}")))
}

/// Inserts (never appends) `Authorization` for non-anonymous credentials.
fn authorize(request: &mut Request, credential: &Credential) -> JenkinsResult<()> {
    if let Some(auth) = credential.authorization_header() {
        let mut value = header_value(&auth, "authorization")?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
    }
    Ok(())
}

/// Attaches only the `Authorization` header.
#[derive(Clone)]
pub struct NoCrumbAuthenticationFilter {
    credential: Arc<Credential>,
}

impl NoCrumbAuthenticationFilter {
    pub fn new(credential: Arc<Credential>) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl RequestFilter for NoCrumbAuthenticationFilter {
    async fn apply(&self, mut request: Request) -> JenkinsResult<Request> {
        if self.credential.is_anonymous() {
            return Ok(request);
        }
        authorize(&mut request, &self.credential)?;
        Ok(request)
    }
}

/// Attaches `Authorization` plus the crumb when the server requires one.
#[derive(Clone)]
pub struct AuthenticationFilter {
    credential: Arc<Credential>,
    cache: Arc<CrumbCache>,
    fetcher: CrumbFetcher,
}

impl AuthenticationFilter {
    pub(crate) fn new(
        credential: Arc<Credential>, cache: Arc<CrumbCache>, fetcher: CrumbFetcher,
    ) -> Self {
        Self {
            credential,
            cache,
            fetcher,
        }
    }

    /// The cached decision, if a crumb-protected request has already run.
    pub fn crumb_decision(&self) -> Option<&CrumbDecision> {
        self.cache.get()
    }
}

#[async_trait]
impl RequestFilter for AuthenticationFilter {
    async fn apply(&self, mut request: Request) -> JenkinsResult<Request> {
        authorize(&mut request, &self.credential)?;

        let decision = self.cache.resolve(&self.fetcher).await;
        match decision.crumb.value.as_deref() {
            Some(crumb) => {
                let headers = request.headers_mut();
                headers.insert(
                    HeaderName::from_static("jenkins-crumb"),
                    header_value(crumb, CRUMB_HEADER)?,
                );
                if let Some(cookie) = decision.crumb.session_id_cookie.as_deref() {
                    headers.insert(COOKIE, header_value(cookie, "cookie")?);
                }
            }
            None if !decision.required => {}
            None => {
                let message = decision
                    .crumb
                    .errors
                    .first()
                    .map(|err| err.message.clone())
                    .unwrap_or_else(|| "crumb issuer returned no value".to_string());
                return Err(JenkinsError::CrumbResolution(message));
            }
        }

        Ok(request)
    }
}
