//! CSRF crumb retrieval and the per-client crumb decision cache

use std::sync::Arc;

use jenkins_rest_api::{
    ApiError,
    ErrorKind,
};
use tokio::sync::OnceCell;
use tracing::{
    debug,
    info,
    warn,
};

use crate::filter::{
    NoCrumbAuthenticationFilter,
    RequestFilter,
};
use crate::parsers;

pub(crate) const CRUMB_ISSUER_PATH: &str = "/crumbIssuer/api/xml";
const CRUMB_XPATH: &str = "concat(//crumbRequestField,\":\",//crumb)";

/// A CSRF token issued by Jenkins, or the errors that prevented issuing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Crumb {
    pub value: Option<String>,
    pub session_id_cookie: Option<String>,
    pub errors: Vec<ApiError>,
}

impl Crumb {
    pub fn new(value: impl Into<String>, session_id_cookie: Option<String>) -> Self {
        Self {
            value: Some(value.into()),
            session_id_cookie,
            errors: Vec::new(),
        }
    }

    pub fn failed(error: ApiError) -> Self {
        Self {
            value: None,
            session_id_cookie: None,
            errors: vec![error],
        }
    }
}

/// The crumb fetched for a client together with whether the server needs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrumbDecision {
    pub crumb: Crumb,
    pub required: bool,
}

impl CrumbDecision {
    /// A crumb is required unless the issuer answered "not found", which is how
    /// Jenkins reports that CSRF protection is switched off.
    pub fn from_crumb(crumb: Crumb) -> Self {
        let required = crumb
            .errors
            .first()
            .map(|err| err.kind != ErrorKind::NotFound)
            .unwrap_or(true);
        Self { crumb, required }
    }
}

/// Issues the crumb request against a Jenkins endpoint.
#[derive(Clone)]
pub(crate) struct CrumbFetcher {
    http: reqwest::Client,
    endpoint: String,
    filter: NoCrumbAuthenticationFilter,
}

impl CrumbFetcher {
    pub fn new(http: reqwest::Client, endpoint: String, filter: NoCrumbAuthenticationFilter) -> Self {
        Self {
            http,
            endpoint,
            filter,
        }
    }

    pub fn url(&self) -> String {
        format!(
            "{}{}?xpath={}",
            self.endpoint,
            CRUMB_ISSUER_PATH,
            urlencoding::encode(CRUMB_XPATH)
        )
    }

    /// Performs a single GET; every failure is reported inside the crumb.
    pub async fn fetch(&self) -> Crumb {
        let url = self.url();
        debug!(%url, "requesting crumb");

        let request = match self.http.get(&url).build() {
            Ok(request) => request,
            Err(e) => return Crumb::failed(ApiError::transport(e.to_string())),
        };
        let request = match self.filter.apply(request).await {
            Ok(request) => request,
            Err(e) => return Crumb::failed(ApiError::new(ErrorKind::Other, e.to_string())),
        };

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                return Crumb::failed(
                    ApiError::transport(format!("Failed to fetch crumb: {e}"))
                        .with_context(url),
                )
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Crumb::failed(ApiError::transport(format!(
                    "Failed to read crumb response: {e}"
                )))
            }
        };

        parsers::crumb_from_response(status, &headers, &body)
    }
}

/// Single slot holding the crumb decision for every clone of a client.
///
/// The slot is read without locking once set. Until then the first caller
/// takes the initialisation lock, re-checks and runs the one and only fetch;
/// other callers wait for it and observe the same decision. The decision is
/// never refreshed.
#[derive(Debug, Default)]
pub(crate) struct CrumbCache {
    decision: OnceCell<CrumbDecision>,
}

impl CrumbCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn get(&self) -> Option<&CrumbDecision> {
        self.decision.get()
    }

    pub async fn resolve(&self, fetcher: &CrumbFetcher) -> &CrumbDecision {
        self.decision
            .get_or_init(|| async {
                let decision = CrumbDecision::from_crumb(fetcher.fetch().await);
                if decision.crumb.value.is_some() {
                    info!("Jenkins crumb acquired");
                } else if !decision.required {
                    info!("crumb issuer not available, requests will be sent without a crumb");
                } else {
                    warn!(
                        error = ?decision.crumb.errors.first(),
                        "crumb request failed, crumb-protected requests will be refused"
                    );
                }
                decision
            })
            .await
    }
}
