use serde::{
    Deserialize,
    Serialize,
};

use super::build::BuildRef;

/// Entry of a job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Job {
    /// Folders and multibranch projects contain further jobs.
    pub fn is_folder(&self) -> bool {
        self.class
            .as_deref()
            .map(|c| c.contains("Folder") || c.contains("MultiBranchProject"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobList {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub display_name_or_null: Option<String>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub buildable: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub builds: Vec<BuildRef>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub first_build: Option<BuildRef>,
    #[serde(default)]
    pub in_queue: bool,
    #[serde(default)]
    pub keep_dependencies: bool,
    #[serde(default)]
    pub last_build: Option<BuildRef>,
    #[serde(default)]
    pub last_completed_build: Option<BuildRef>,
    #[serde(default)]
    pub last_failed_build: Option<BuildRef>,
    #[serde(default)]
    pub last_stable_build: Option<BuildRef>,
    #[serde(default)]
    pub last_successful_build: Option<BuildRef>,
    #[serde(default)]
    pub last_unstable_build: Option<BuildRef>,
    #[serde(default)]
    pub last_unsuccessful_build: Option<BuildRef>,
    #[serde(default)]
    pub next_build_number: i64,
    #[serde(default)]
    pub queue_item: Option<serde_json::Value>,
    #[serde(default)]
    pub concurrent_build: bool,
}
