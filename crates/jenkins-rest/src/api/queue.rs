use jenkins_rest_api::{
    JenkinsResult,
    RequestStatus,
};
use reqwest::StatusCode;

use super::status_of;
use crate::client::{
    Body,
    JenkinsClient,
};
use crate::parsers;
use crate::types::{
    QueueItem,
    QueueResponse,
};

pub struct QueueApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> QueueApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    pub async fn queue(&self) -> JenkinsResult<Vec<QueueItem>> {
        let response: Option<QueueResponse> =
            parsers::read_json(self.client.get("/queue/api/json").await?).await?;
        Ok(response.map(|r| r.items).unwrap_or_default())
    }

    pub async fn queue_item(&self, id: i64) -> JenkinsResult<Option<QueueItem>> {
        let path = format!("/queue/item/{id}/api/json");
        parsers::read_json(self.client.get(&path).await?).await
    }

    /// Cancels a queued item. Many Jenkins versions answer a successful cancel
    /// with 404, so that status counts as success.
    pub async fn cancel(&self, id: i64) -> JenkinsResult<RequestStatus> {
        let path = format!("/queue/cancelItem?id={id}");
        match self.client.post(&path, Body::Empty).await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                Ok(RequestStatus::success())
            }
            result => status_of(result).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{
        method,
        path,
        query_param,
    };
    use wiremock::{
        Mock,
        MockServer,
        ResponseTemplate,
    };

    use super::*;

    async fn setup() -> (MockServer, JenkinsClient) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/crumbIssuer/api/xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Jenkins-Crumb:c0ffee"))
            .mount(&server)
            .await;
        let client = JenkinsClient::builder()
            .endpoint(server.uri())
            .credentials("admin:admin")
            .build()
            .unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn test_queue_lists_items() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/queue/api/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"items":[{"id":12,"blocked":false,"buildable":true,"why":"Waiting for next available executor","task":{"name":"demo"}}]}"#,
            ))
            .mount(&server)
            .await;

        let items = client.queue().queue().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 12);
        assert!(items[0].buildable);
        assert_eq!(
            items[0].why.as_deref(),
            Some("Waiting for next available executor")
        );
    }

    #[tokio::test]
    async fn test_queue_item_left_queue() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/queue/item/143/api/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"id":143,"cancelled":false,"executable":{"number":4,"url":"http://h/job/demo/4/"}}"#,
            ))
            .mount(&server)
            .await;

        let item = client.queue().queue_item(143).await.unwrap().unwrap();
        assert_eq!(item.build_number(), Some(4));
        assert!(client.queue().queue_item(144).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cancel_treats_not_found_as_success() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/queue/cancelItem"))
            .and(query_param("id", "143"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/queue/cancelItem"))
            .and(query_param("id", "500"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert_eq!(
            client.queue().cancel(143).await.unwrap(),
            RequestStatus::success()
        );
        assert!(!client.queue().cancel(500).await.unwrap().value);
    }
}
