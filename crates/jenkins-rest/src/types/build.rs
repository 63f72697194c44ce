use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRef {
    pub number: i64,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub artifacts: Vec<Artifact>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub building: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub estimated_duration: i64,
    #[serde(default)]
    pub full_display_name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub keep_log: bool,
    pub number: i64,
    #[serde(default)]
    pub queue_id: i64,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub change_sets: Vec<ChangeSetList>,
    #[serde(default)]
    pub built_on: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub culprits: Vec<Culprit>,
}

impl BuildInfo {
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        if self.building || self.duration <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.timestamp.checked_add(self.duration)?)
    }

    /// Parameters from every `ParametersAction` on the build.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.actions.iter().flat_map(|action| action.parameters.iter())
    }

    /// First cause recorded on the build.
    pub fn cause(&self) -> Option<&Cause> {
        self.actions.iter().flat_map(|action| action.causes.iter()).next()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default)]
    pub display_path: Option<String>,
    pub file_name: String,
    pub relative_path: String,
}

/// Build action; only the fields Jenkins populates for causes, parameters and
/// git revisions are typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub causes: Vec<Cause>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub last_built_revision: Option<Revision>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub icon_file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cause {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    #[serde(rename = "SHA1")]
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub branch: Vec<Branch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "SHA1")]
    #[serde(default)]
    pub sha1: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSetList {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub items: Vec<ChangeSet>,
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub affected_paths: Vec<String>,
    #[serde(default)]
    pub commit_id: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub author: Option<Culprit>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Culprit {
    #[serde(default)]
    pub absolute_url: Option<String>,
    pub full_name: String,
}

/// A chunk of console output plus the offset to continue from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveText {
    pub text: String,
    pub size: i64,
    pub has_more_data: bool,
}
