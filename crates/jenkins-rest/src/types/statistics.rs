use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

/// Load statistics; each series maps a time scale (`sec10`, `min`, `hour`) to
/// its measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallLoad {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub available_executors: HashMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub busy_executors: HashMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub connecting_executors: HashMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub defined_executors: HashMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub idle_executors: HashMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub online_executors: HashMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub queue_length: HashMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub total_executors: HashMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub total_queue_length: HashMap<String, serde_json::Value>,
}
