use jenkins_rest_api::JenkinsResult;

use crate::client::JenkinsClient;
use crate::parsers;
use crate::types::OverallLoad;

pub struct StatisticsApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> StatisticsApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    pub async fn overall_load(&self) -> JenkinsResult<Option<OverallLoad>> {
        parsers::read_json(self.client.get("/overallLoad/api/json").await?).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{
        method,
        path,
    };
    use wiremock::{
        Mock,
        MockServer,
        ResponseTemplate,
    };

    use super::*;

    #[tokio::test]
    async fn test_overall_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/overallLoad/api/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"_class":"hudson.model.OverallLoadStatistics","availableExecutors":{},"busyExecutors":{"hour":{"latest":1.0}},"queueLength":{}}"#,
            ))
            .mount(&server)
            .await;

        let client = JenkinsClient::builder().endpoint(server.uri()).build().unwrap();
        let load = client.statistics().overall_load().await.unwrap().unwrap();

        assert!(load.available_executors.is_empty());
        assert_eq!(load.busy_executors["hour"]["latest"], 1.0);
        assert!(load.total_queue_length.is_empty());
    }
}
