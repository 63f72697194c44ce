use jenkins_rest_api::{
    ApiError,
    JenkinsError,
    JenkinsResult,
    RequestStatus,
};

use super::status_of;
use crate::client::{
    Body,
    JenkinsClient,
};
use crate::parsers;
use crate::types::SystemInfo;

pub struct SystemApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> SystemApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    /// Server identification from the headers of `HEAD /`.
    ///
    /// Jenkins sends these headers even when the caller is not allowed to read
    /// the root page, so they are parsed regardless of status; a failing status
    /// is added to `errors`.
    pub async fn system_info(&self) -> JenkinsResult<SystemInfo> {
        let response = match self.client.head("/").await {
            Ok(response) => response,
            Err(JenkinsError::Network(message)) => {
                return Ok(SystemInfo::failed(ApiError::transport(message)))
            }
            Err(e) => return Err(e),
        };

        let mut info = parsers::system_info_from_headers(response.headers());
        let status = response.status();
        if !parsers::is_success(status) {
            info.errors.push(ApiError::from_status(status, ""));
        }
        Ok(info)
    }

    /// Stops Jenkins from starting new builds.
    pub async fn quiet_down(&self) -> JenkinsResult<RequestStatus> {
        status_of(self.client.post("/quietDown", Body::Empty).await).await
    }

    pub async fn cancel_quiet_down(&self) -> JenkinsResult<RequestStatus> {
        status_of(self.client.post("/cancelQuietDown", Body::Empty).await).await
    }
}
