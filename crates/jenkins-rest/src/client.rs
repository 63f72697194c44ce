//! Jenkins API client and request execution

use std::sync::Arc;
use std::time::Duration;

use jenkins_rest_api::{
    JenkinsError,
    JenkinsResult,
    RetryPolicy,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{
    Client,
    Method,
    Response,
};
use tracing::debug;

use crate::api::{
    CrumbIssuerApi,
    JobsApi,
    PluginManagerApi,
    QueueApi,
    StatisticsApi,
    SystemApi,
    UserApi,
};
use crate::auth::Credential;
use crate::config::JenkinsConfig;
use crate::crumb::{
    CrumbCache,
    CrumbDecision,
    CrumbFetcher,
};
use crate::filter::{
    AuthenticationFilter,
    NoCrumbAuthenticationFilter,
    RequestFilter,
};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the shared reqwest client. Redirects are returned to the caller
/// because Jenkins answers most writes with a redirect.
pub(crate) fn build_http_client(timeout: Duration) -> JenkinsResult<Client> {
    // Already installed by the host application is fine.
    let _ = rustls::crypto::ring::default_provider().install_default();

    Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(concat!("jenkins-rest/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| JenkinsError::InvalidConfig(format!("Failed to build HTTP client: {e}")))
}

/// Request body of a write operation.
pub(crate) enum Body {
    Empty,
    Form(Vec<(String, String)>),
    Xml(String),
}

struct ClientInner {
    http: Client,
    endpoint: String,
    credential: Arc<Credential>,
    auth_filter: AuthenticationFilter,
    plain_filter: NoCrumbAuthenticationFilter,
    crumb_fetcher: CrumbFetcher,
    retry: RetryPolicy,
}

/// Jenkins REST client.
///
/// Cloning is cheap and clones share the connection pool and the crumb
/// decision.
#[derive(Clone)]
pub struct JenkinsClient {
    inner: Arc<ClientInner>,
}

impl JenkinsClient {
    pub fn builder() -> JenkinsClientBuilder {
        JenkinsClientBuilder::default()
    }

    pub fn from_config(config: &JenkinsConfig) -> JenkinsResult<Self> {
        Self::builder()
            .endpoint(&config.endpoint)
            .credential(config.credential()?)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn credential(&self) -> &Credential {
        &self.inner.credential
    }

    /// Crumb decision, once the first crumb-protected request has run.
    pub fn crumb_decision(&self) -> Option<&CrumbDecision> {
        self.inner.auth_filter.crumb_decision()
    }

    pub fn jobs(&self) -> JobsApi<'_> {
        JobsApi::new(self)
    }

    pub fn queue(&self) -> QueueApi<'_> {
        QueueApi::new(self)
    }

    pub fn plugins(&self) -> PluginManagerApi<'_> {
        PluginManagerApi::new(self)
    }

    pub fn system(&self) -> SystemApi<'_> {
        SystemApi::new(self)
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn statistics(&self) -> StatisticsApi<'_> {
        StatisticsApi::new(self)
    }

    pub fn crumb_issuer(&self) -> CrumbIssuerApi<'_> {
        CrumbIssuerApi::new(self)
    }

    pub(crate) fn crumb_fetcher(&self) -> &CrumbFetcher {
        &self.inner.crumb_fetcher
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.endpoint, path)
    }

    pub(crate) async fn get(&self, path: &str) -> JenkinsResult<Response> {
        self.read(Method::GET, path).await
    }

    pub(crate) async fn head(&self, path: &str) -> JenkinsResult<Response> {
        self.read(Method::HEAD, path).await
    }

    /// Idempotent reads: plain authentication, transport failures retried.
    async fn read(&self, method: Method, path: &str) -> JenkinsResult<Response> {
        let url = self.url(path);
        self.inner
            .retry
            .retry(|| {
                let method = method.clone();
                let url = url.clone();
                async move {
                    let request = self.inner.http.request(method.clone(), &url).build()?;
                    let request = self.inner.plain_filter.apply(request).await?;
                    debug!(%method, %url, "sending request");
                    let response = self.inner.http.execute(request).await?;
                    debug!(%method, %url, status = %response.status(), "received response");
                    Ok(response)
                }
            })
            .await
    }

    /// Writes go through the crumb-aware filter and are never retried.
    pub(crate) async fn post(&self, path: &str, body: Body) -> JenkinsResult<Response> {
        let url = self.url(path);
        let builder = self.inner.http.post(&url);
        let builder = match body {
            Body::Empty => builder,
            Body::Form(pairs) => builder.form(&pairs),
            Body::Xml(xml) => builder
                .header(CONTENT_TYPE, "application/xml; charset=utf-8")
                .body(xml),
        };

        let request = self.inner.auth_filter.apply(builder.build()?).await?;
        debug!(method = "POST", %url, "sending request");
        let response = self.inner.http.execute(request).await?;
        debug!(method = "POST", %url, status = %response.status(), "received response");
        Ok(response)
    }
}

/// Builder for [`JenkinsClient`].
///
/// An API token takes precedence over username/password credentials; with
/// neither the client is anonymous.
pub struct JenkinsClientBuilder {
    endpoint: String,
    credentials: Option<String>,
    api_token: Option<String>,
    credential: Option<Credential>,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for JenkinsClientBuilder {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials: None,
            api_token: None,
            credential: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl JenkinsClientBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// `user:password` or its base64 encoding.
    pub fn credentials(mut self, credentials: impl Into<String>) -> Self {
        self.credentials = Some(credentials.into());
        self
    }

    /// `user:token` or its base64 encoding.
    pub fn api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    /// Uses an already validated credential, ignoring raw strings.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> JenkinsResult<JenkinsClient> {
        let endpoint = self.endpoint.trim().trim_end_matches('/').to_string();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(JenkinsError::InvalidConfig(format!(
                "Endpoint must be an http(s) URL: {endpoint}"
            )));
        }

        let credential = match (self.credential, self.api_token, self.credentials) {
            (Some(credential), _, _) => credential,
            (None, Some(token), _) => Credential::from_api_token(&token)?,
            (None, None, Some(credentials)) => Credential::from_username_password(&credentials)?,
            (None, None, None) => Credential::anonymous(),
        };
        let credential = Arc::new(credential);

        let http = build_http_client(self.timeout)?;
        let plain_filter = NoCrumbAuthenticationFilter::new(Arc::clone(&credential));
        let crumb_fetcher = CrumbFetcher::new(http.clone(), endpoint.clone(), plain_filter.clone());
        let auth_filter = AuthenticationFilter::new(
            Arc::clone(&credential),
            CrumbCache::new(),
            crumb_fetcher.clone(),
        );

        debug!(%endpoint, kind = ?credential.kind(), "created Jenkins client");

        Ok(JenkinsClient {
            inner: Arc::new(ClientInner {
                http,
                endpoint,
                credential,
                auth_filter,
                plain_filter,
                crumb_fetcher,
                retry: self.retry,
            }),
        })
    }
}
