use crate::client::JenkinsClient;
use crate::crumb::Crumb;

pub struct CrumbIssuerApi<'a> {
    client: &'a JenkinsClient,
}

impl<'a> CrumbIssuerApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    /// Fetches a fresh crumb. This bypasses the client's cached decision;
    /// failures are reported in `Crumb::errors`.
    pub async fn crumb(&self) -> Crumb {
        self.client.crumb_fetcher().fetch().await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{
        header,
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

    #[tokio::test]
    async fn test_crumb_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/crumbIssuer/api/xml"))
            .and(query_param(
                "xpath",
                "concat(//crumbRequestField,\":\",//crumb)",
            ))
            .and(header("authorization", "Basic YWRtaW46YWRtaW4="))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Set-Cookie", "JSESSIONID.1f2e=node0abc;Path=/")
                    .set_body_string("Jenkins-Crumb:04a1109fc2db171362c966ebe9fc87f0"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = JenkinsClient::builder()
            .endpoint(server.uri())
            .credentials("admin:admin")
            .build()
            .unwrap();
        let crumb = client.crumb_issuer().crumb().await;

        assert_eq!(
            crumb.value.as_deref(),
            Some("04a1109fc2db171362c966ebe9fc87f0")
        );
        assert_eq!(
            crumb.session_id_cookie.as_deref(),
            Some("JSESSIONID.1f2e=node0abc")
        );
        assert!(client.crumb_decision().is_none());
    }

    #[tokio::test]
    async fn test_crumb_transport_failure_is_reported_not_raised() {
        let client = JenkinsClient::builder()
            .endpoint("http://127.0.0.1:9")
            .build()
            .unwrap();
        let crumb = client.crumb_issuer().crumb().await;

        assert!(crumb.value.is_none());
        assert_eq!(crumb.errors[0].kind, jenkins_rest_api::ErrorKind::Transport);
    }
}
