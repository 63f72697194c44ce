use jenkins_rest_api::ApiError;
use serde::{
    Deserialize,
    Serialize,
};

/// Server identification read from response headers; absent headers are
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub hudson_version: Option<String>,
    pub jenkins_version: Option<String>,
    pub jenkins_session: Option<String>,
    pub hudson_cli_port: Option<String>,
    pub jenkins_cli_port: Option<String>,
    pub jenkins_cli2_port: Option<String>,
    pub instance_identity: Option<String>,
    pub ssh_endpoint: Option<String>,
    pub server: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub errors: Vec<ApiError>,
}

impl SystemInfo {
    pub fn failed(error: ApiError) -> Self {
        Self {
            errors: vec![error],
            ..Self::default()
        }
    }
}
