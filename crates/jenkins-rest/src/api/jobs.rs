//! Job and build operations

use jenkins_rest_api::{
    IntegerResponse,
    JenkinsResult,
    RequestStatus,
};

use super::{
    bool_of,
    queue_id_of,
    status_of,
};
use crate::client::{
    Body,
    JenkinsClient,
};
use crate::paths::{
    folder_path,
    job_path,
};
use crate::parsers;
use crate::types::{
    BuildInfo,
    JobInfo,
    JobList,
    ProgressiveText,
};

/// Operations on jobs, optionally nested in a folder (`a/b` for `/job/a/job/b`).
pub struct JobsApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> JobsApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    pub async fn job_list(&self, folder: Option<&str>) -> JenkinsResult<Option<JobList>> {
        let path = format!("{}/api/json", folder_path(folder));
        parsers::read_json(self.client.get(&path).await?).await
    }

    pub async fn job_info(&self, folder: Option<&str>, job: &str) -> JenkinsResult<Option<JobInfo>> {
        let path = format!("{}/api/json", job_path(folder, job));
        parsers::read_json(self.client.get(&path).await?).await
    }

    pub async fn build_info(
        &self, folder: Option<&str>, job: &str, number: i64,
    ) -> JenkinsResult<Option<BuildInfo>> {
        let path = format!("{}/{number}/api/json", job_path(folder, job));
        parsers::read_json(self.client.get(&path).await?).await
    }

    /// Creates a job from its `config.xml`.
    pub async fn create(
        &self, folder: Option<&str>, job: &str, config_xml: &str,
    ) -> JenkinsResult<RequestStatus> {
        let path = format!(
            "{}/createItem?name={}",
            folder_path(folder),
            urlencoding::encode(job)
        );
        status_of(
            self.client
                .post(&path, Body::Xml(config_xml.to_string()))
                .await,
        )
        .await
    }

    pub async fn config(&self, folder: Option<&str>, job: &str) -> JenkinsResult<Option<String>> {
        let path = format!("{}/config.xml", job_path(folder, job));
        parsers::read_text(self.client.get(&path).await?).await
    }

    pub async fn update_config(
        &self, folder: Option<&str>, job: &str, config_xml: &str,
    ) -> JenkinsResult<bool> {
        let path = format!("{}/config.xml", job_path(folder, job));
        bool_of(
            self.client
                .post(&path, Body::Xml(config_xml.to_string()))
                .await,
        )
    }

    pub async fn description(
        &self, folder: Option<&str>, job: &str,
    ) -> JenkinsResult<Option<String>> {
        let path = format!("{}/description", job_path(folder, job));
        parsers::read_text(self.client.get(&path).await?).await
    }

    pub async fn set_description(
        &self, folder: Option<&str>, job: &str, description: &str,
    ) -> JenkinsResult<bool> {
        let path = format!("{}/description", job_path(folder, job));
        let form = vec![("description".to_string(), description.to_string())];
        bool_of(self.client.post(&path, Body::Form(form)).await)
    }

    pub async fn delete(&self, folder: Option<&str>, job: &str) -> JenkinsResult<RequestStatus> {
        let path = format!("{}/doDelete", job_path(folder, job));
        status_of(self.client.post(&path, Body::Empty).await).await
    }

    pub async fn enable(&self, folder: Option<&str>, job: &str) -> JenkinsResult<bool> {
        let path = format!("{}/enable", job_path(folder, job));
        bool_of(self.client.post(&path, Body::Empty).await)
    }

    pub async fn disable(&self, folder: Option<&str>, job: &str) -> JenkinsResult<bool> {
        let path = format!("{}/disable", job_path(folder, job));
        bool_of(self.client.post(&path, Body::Empty).await)
    }

    pub async fn rename(
        &self, folder: Option<&str>, job: &str, new_name: &str,
    ) -> JenkinsResult<bool> {
        let path = format!(
            "{}/doRename?newName={}",
            job_path(folder, job),
            urlencoding::encode(new_name)
        );
        bool_of(self.client.post(&path, Body::Empty).await)
    }

    /// Triggers a build; the value is the queue item id.
    pub async fn build(&self, folder: Option<&str>, job: &str) -> JenkinsResult<IntegerResponse> {
        let path = format!("{}/build", job_path(folder, job));
        queue_id_of(self.client.post(&path, Body::Empty).await).await
    }

    /// Triggers a parameterized build; repeated names are sent repeatedly.
    pub async fn build_with_parameters(
        &self, folder: Option<&str>, job: &str, parameters: &[(String, String)],
    ) -> JenkinsResult<IntegerResponse> {
        let path = format!("{}/buildWithParameters", job_path(folder, job));
        queue_id_of(
            self.client
                .post(&path, Body::Form(parameters.to_vec()))
                .await,
        )
        .await
    }

    pub async fn last_build_number(
        &self, folder: Option<&str>, job: &str,
    ) -> JenkinsResult<Option<i64>> {
        let path = format!("{}/lastBuild/buildNumber", job_path(folder, job));
        let text = parsers::read_text(self.client.get(&path).await?).await?;
        Ok(text.as_deref().and_then(parsers::text_to_integer))
    }

    pub async fn last_build_timestamp(
        &self, folder: Option<&str>, job: &str,
    ) -> JenkinsResult<Option<String>> {
        let path = format!("{}/lastBuild/buildTimestamp", job_path(folder, job));
        let text = parsers::read_text(self.client.get(&path).await?).await?;
        Ok(text.map(|t| t.trim().to_string()))
    }

    /// Console output from byte offset `start`.
    pub async fn progressive_text(
        &self, folder: Option<&str>, job: &str, number: i64, start: i64,
    ) -> JenkinsResult<Option<ProgressiveText>> {
        let path = format!(
            "{}/{number}/logText/progressiveText?start={start}",
            job_path(folder, job)
        );
        let response = self.client.get(&path).await?;
        let headers = response.headers().clone();
        let text = parsers::read_text(response).await?;
        Ok(text.map(|text| parsers::progressive_text(&headers, text)))
    }

    pub async fn stop(
        &self, folder: Option<&str>, job: &str, number: i64,
    ) -> JenkinsResult<RequestStatus> {
        self.build_action(folder, job, number, "stop").await
    }

    pub async fn term(
        &self, folder: Option<&str>, job: &str, number: i64,
    ) -> JenkinsResult<RequestStatus> {
        self.build_action(folder, job, number, "term").await
    }

    pub async fn kill(
        &self, folder: Option<&str>, job: &str, number: i64,
    ) -> JenkinsResult<RequestStatus> {
        self.build_action(folder, job, number, "kill").await
    }

    async fn build_action(
        &self, folder: Option<&str>, job: &str, number: i64, action: &str,
    ) -> JenkinsResult<RequestStatus> {
        let path = format!("{}/{number}/{action}", job_path(folder, job));
        status_of(self.client.post(&path, Body::Empty).await).await
    }
}
