use jenkins_rest_api::{
    JenkinsResult,
    RequestStatus,
};

use super::status_of;
use crate::client::{
    Body,
    JenkinsClient,
};
use crate::parsers;
use crate::types::{
    ApiToken,
    User,
};

const TOKEN_DESCRIPTOR: &str = "/me/descriptorByName/jenkins.security.ApiTokenProperty";

/// Operations on the user behind the client's credential.
pub struct UserApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> JenkinsResult<Option<User>> {
        let identity = self.client.credential().identity();
        let path = format!("/user/{}/api/json", urlencoding::encode(identity));
        parsers::read_json(self.client.get(&path).await?).await
    }

    pub async fn generate_new_token(&self, token_name: &str) -> JenkinsResult<Option<ApiToken>> {
        let path = format!("{TOKEN_DESCRIPTOR}/generateNewToken");
        let form = vec![("newTokenName".to_string(), token_name.to_string())];
        parsers::read_json(self.client.post(&path, Body::Form(form)).await?).await
    }

    pub async fn revoke(&self, token_uuid: &str) -> JenkinsResult<RequestStatus> {
        let path = format!("{TOKEN_DESCRIPTOR}/revoke");
        let form = vec![("tokenUuid".to_string(), token_uuid.to_string())];
        status_of(self.client.post(&path, Body::Form(form)).await).await
    }
}
