use serde::{
    Deserialize,
    Serialize,
};

/// A build request waiting in, or just leaving, the Jenkins queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    pub id: i64,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub buildable: bool,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub stuck: bool,
    #[serde(default)]
    pub in_queue_since: i64,
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub why: Option<String>,
    #[serde(default)]
    pub task: Option<Task>,
    #[serde(default)]
    pub executable: Option<Executable>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub actions: Vec<serde_json::Value>,
}

impl QueueItem {
    /// Build number once the item has left the queue and started running.
    pub fn build_number(&self) -> Option<i64> {
        self.executable.as_ref().map(|e| e.number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executable {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    pub number: i64,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct QueueResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub items: Vec<QueueItem>,
}
