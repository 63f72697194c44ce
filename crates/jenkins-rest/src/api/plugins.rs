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
use crate::types::Plugins;

pub struct PluginManagerApi<'a> {
    client: &'a JenkinsClient,
}

fn escape_xml_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl<'a> PluginManagerApi<'a> {
    pub(crate) fn new(client: &'a JenkinsClient) -> Self {
        Self { client }
    }

    /// Installed plugins. `depth` and `tree` are passed through to the JSON API.
    pub async fn plugins(
        &self, depth: Option<u32>, tree: Option<&str>,
    ) -> JenkinsResult<Option<Plugins>> {
        let mut query = Vec::new();
        if let Some(depth) = depth {
            query.push(format!("depth={depth}"));
        }
        if let Some(tree) = tree {
            query.push(format!("tree={}", urlencoding::encode(tree)));
        }
        let path = if query.is_empty() {
            "/pluginManager/api/json".to_string()
        } else {
            format!("/pluginManager/api/json?{}", query.join("&"))
        };
        parsers::read_json(self.client.get(&path).await?).await
    }

    /// Asks Jenkins to install a plugin, e.g. `git@latest`.
    pub async fn install_necessary_plugins(&self, plugin_id: &str) -> JenkinsResult<RequestStatus> {
        let body = format!(
            "<jenkins><install plugin=\"{}\"/></jenkins>",
            escape_xml_attr(plugin_id)
        );
        status_of(
            self.client
                .post("/pluginManager/installNecessaryPlugins", Body::Xml(body))
                .await,
        )
        .await
    }
}
