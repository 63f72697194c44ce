use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugins {
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub plugins: Vec<Plugin>,
}

impl Plugins {
    pub fn find(&self, short_name: &str) -> Option<&Plugin> {
        self.plugins
            .iter()
            .find(|p| p.short_name.as_deref() == Some(short_name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub backup_version: Option<String>,
    #[serde(default)]
    pub bundled: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub downgradable: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub has_update: bool,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub required_core_version: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub supports_dynamic_load: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}
