//! Typed groups of Jenkins operations

mod crumb_issuer;
mod jobs;
mod plugins;
mod queue;
mod statistics;
mod system;
mod users;

pub use crumb_issuer::CrumbIssuerApi;
use jenkins_rest_api::{
    ApiError,
    IntegerResponse,
    JenkinsError,
    JenkinsResult,
    RequestStatus,
};
pub use jobs::JobsApi;
pub use plugins::PluginManagerApi;
pub use queue::QueueApi;
use reqwest::Response;
pub use statistics::StatisticsApi;
pub use system::SystemApi;
pub use users::UserApi;

use crate::parsers;

/// Folds transport failures into the status; crumb and configuration errors
/// still reach the caller.
pub(crate) async fn status_of(result: JenkinsResult<Response>) -> JenkinsResult<RequestStatus> {
    match result {
        Ok(response) => Ok(parsers::request_status(response).await),
        Err(JenkinsError::Network(message)) => {
            Ok(RequestStatus::failure(ApiError::transport(message)))
        }
        Err(e) => Err(e),
    }
}

pub(crate) fn bool_of(result: JenkinsResult<Response>) -> JenkinsResult<bool> {
    match result {
        Ok(response) => Ok(parsers::status_to_bool(&response)),
        Err(JenkinsError::Network(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Queue id from the `Location` header of a build trigger.
pub(crate) async fn queue_id_of(result: JenkinsResult<Response>) -> JenkinsResult<IntegerResponse> {
    match result {
        Ok(response) => {
            let status = response.status();
            if parsers::is_success(status) {
                return Ok(parsers::location_to_queue_id(response.headers()));
            }
            let body = response.text().await.unwrap_or_default();
            Ok(IntegerResponse::failure(ApiError::from_status(status, &body)))
        }
        Err(JenkinsError::Network(message)) => {
            Ok(IntegerResponse::failure(ApiError::transport(message)))
        }
        Err(e) => Err(e),
    }
}
