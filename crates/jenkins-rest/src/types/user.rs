use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub absolute_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub property: Vec<serde_json::Value>,
}

/// Answer of the token generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiToken {
    pub status: String,
    #[serde(default)]
    pub data: Option<ApiTokenData>,
}

impl ApiToken {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTokenData {
    pub token_name: String,
    pub token_uuid: String,
    pub token_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_token_deserializes() {
        let token: ApiToken = serde_json::from_str(
            r#"{"status":"ok","data":{"tokenName":"ci","tokenUuid":"8f1c","tokenValue":"11abcdef"}}"#,
        )
        .unwrap();
        assert!(token.is_ok());
        assert_eq!(token.data.unwrap().token_uuid, "8f1c");
    }
}
