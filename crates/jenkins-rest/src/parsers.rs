//! Response parsers
//!
//! Each parser reads one shape of response (status, a header, or the body)
//! and returns a typed value. Expected failures end up inside the returned
//! value instead of an `Err`.

use std::sync::LazyLock;

use jenkins_rest_api::{
    ApiError,
    ErrorKind,
    IntegerResponse,
    JenkinsError,
    JenkinsResult,
    RequestStatus,
};
use regex::Regex;
use reqwest::header::{
    HeaderMap,
    LOCATION,
    SERVER,
    SET_COOKIE,
};
use reqwest::{
    Response,
    StatusCode,
};
use serde::de::DeserializeOwned;

use crate::crumb::Crumb;
use crate::types::{
    ProgressiveText,
    SystemInfo,
};

pub(crate) const NO_QUEUE_ITEM_MESSAGE: &str =
    "No queue item Location header could be found despite getting a valid HTTP response.";

const SESSION_COOKIE_PREFIX: &str = "JSESSIONID";

static QUEUE_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*/queue/item/(\d+)/?$").expect("Invalid regex pattern"));

/// Jenkins treats redirects as a successful outcome for write operations.
pub(crate) fn is_success(status: StatusCode) -> bool {
    status.is_success() || status.is_redirection()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
}

/// Parses the crumb issuer's `field:value` answer and the session cookie.
pub fn crumb_from_response(status: StatusCode, headers: &HeaderMap, body: &str) -> Crumb {
    if !is_success(status) {
        return Crumb::failed(ApiError::from_status(status, body));
    }

    match body.trim().split_once(':') {
        Some((_, value)) if !value.trim().is_empty() => {
            Crumb::new(value.trim(), session_id_cookie(headers))
        }
        _ => Crumb::failed(ApiError::new(
            ErrorKind::Parse,
            format!("Unexpected crumb issuer response: {}", body.trim()),
        )),
    }
}

/// First `Set-Cookie` carrying a Jenkins session id, reduced to `name=value`.
pub fn session_id_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|cookie| cookie.starts_with(SESSION_COOKIE_PREFIX))
        .map(|cookie| cookie.split(';').next().unwrap_or(cookie).trim().to_string())
}

/// Extracts the queue item id from `Location: .../queue/item/<id>/`.
pub fn location_to_queue_id(headers: &HeaderMap) -> IntegerResponse {
    header_str(headers, LOCATION.as_str())
        .and_then(|location| QUEUE_ITEM_PATTERN.captures(location))
        .and_then(|caps| caps.get(1))
        .and_then(|id| id.as_str().parse::<i64>().ok())
        .map(IntegerResponse::of)
        .unwrap_or_else(|| {
            IntegerResponse::failure(ApiError::new(ErrorKind::NumberFormat, NO_QUEUE_ITEM_MESSAGE))
        })
}

/// Reads the identification headers Jenkins sends on every response.
pub fn system_info_from_headers(headers: &HeaderMap) -> SystemInfo {
    let get = |name: &str| header_str(headers, name).map(str::to_string);
    SystemInfo {
        hudson_version: get("X-Hudson"),
        jenkins_version: get("X-Jenkins"),
        jenkins_session: get("X-Jenkins-Session"),
        hudson_cli_port: get("X-Hudson-CLI-Port"),
        jenkins_cli_port: get("X-Jenkins-CLI-Port"),
        jenkins_cli2_port: get("X-Jenkins-CLI2-Port"),
        instance_identity: get("X-Instance-Identity"),
        ssh_endpoint: get("X-SSH-Endpoint"),
        server: get(SERVER.as_str()),
        errors: Vec::new(),
    }
}

pub fn text_to_integer(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

pub fn progressive_text(headers: &HeaderMap, text: String) -> ProgressiveText {
    let size = header_str(headers, "X-Text-Size")
        .and_then(text_to_integer)
        .unwrap_or(-1);
    let has_more_data = header_str(headers, "X-More-Data")
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    ProgressiveText {
        text,
        size,
        has_more_data,
    }
}

/// Maps a status and body to the error raised by reads that cannot absorb it.
pub(crate) fn status_error(status: StatusCode, body: &str) -> JenkinsError {
    let err = ApiError::from_status(status, body);
    match err.kind {
        ErrorKind::Unauthorized | ErrorKind::Forbidden => {
            JenkinsError::AuthenticationFailed(err.message)
        }
        _ => JenkinsError::Api(err.message),
    }
}

/// Success for 2xx/3xx, otherwise the classified error.
pub async fn request_status(response: Response) -> RequestStatus {
    let status = response.status();
    if is_success(status) {
        return RequestStatus::success();
    }
    let body = response.text().await.unwrap_or_default();
    RequestStatus::failure(ApiError::from_status(status, &body))
}

/// Plain success check used by operations that only report a boolean.
pub fn status_to_bool(response: &Response) -> bool {
    is_success(response.status())
}

/// Decodes a JSON body, mapping 404 to `None`.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> JenkinsResult<Option<T>> {
    match read_text(response).await? {
        Some(body) => Ok(Some(serde_json::from_str(&body)?)),
        None => Ok(None),
    }
}

/// Reads a text body, mapping 404 to `None`.
pub async fn read_text(response: Response) -> JenkinsResult<Option<String>> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let body = response.text().await?;
    if !is_success(status) {
        return Err(status_error(status, &body));
    }
    Ok(Some(body))
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_location_to_queue_id() {
        let parsed = location_to_queue_id(&headers(&[("Location", "http://host/queue/item/143/")]));
        assert_eq!(parsed, IntegerResponse::of(143));

        let parsed = location_to_queue_id(&headers(&[("Location", "http://host/queue/item/7")]));
        assert_eq!(parsed.value, Some(7));
    }

    #[test]
    fn test_location_without_numeric_id_is_an_error_value() {
        for map in [
            headers(&[("Location", "http://host/queue/item/abc/")]),
            headers(&[("Location", "http://host/job/demo/")]),
            HeaderMap::new(),
        ] {
            let parsed = location_to_queue_id(&map);
            assert_eq!(parsed.value, None);
            assert_eq!(parsed.errors.len(), 1);
            assert_eq!(parsed.errors[0].kind, ErrorKind::NumberFormat);
            assert_eq!(parsed.errors[0].message, NO_QUEUE_ITEM_MESSAGE);
        }
    }

    #[test]
    fn test_crumb_from_response() {
        let crumb = crumb_from_response(
            StatusCode::OK,
            &headers(&[
                ("Set-Cookie", "other=1; Path=/"),
                ("Set-Cookie", "JSESSIONID.5c6a=node01abc; Path=/; HttpOnly"),
            ]),
            "Jenkins-Crumb:04a1109fc2db171362c966ebe9fc87f0\n",
        );
        assert_eq!(
            crumb.value.as_deref(),
            Some("04a1109fc2db171362c966ebe9fc87f0")
        );
        assert_eq!(
            crumb.session_id_cookie.as_deref(),
            Some("JSESSIONID.5c6a=node01abc")
        );
        assert!(crumb.errors.is_empty());
    }

    #[test]
    fn test_crumb_from_error_status() {
        let crumb = crumb_from_response(StatusCode::NOT_FOUND, &HeaderMap::new(), "");
        assert!(crumb.value.is_none());
        assert!(crumb.errors[0].is_not_found());

        let crumb = crumb_from_response(StatusCode::OK, &HeaderMap::new(), "garbage");
        assert_eq!(crumb.errors[0].kind, ErrorKind::Parse);
    }

    #[test]
    fn test_system_info_from_headers() {
        let info = system_info_from_headers(&headers(&[
            ("X-Hudson", "1.395"),
            ("X-Jenkins", "2.440.1"),
            ("X-Jenkins-Session", "c2d0d4f5"),
            ("X-SSH-Endpoint", "jenkins.local:2222"),
            ("Server", "Jetty(10.0.18)"),
        ]));
        assert_eq!(info.jenkins_version.as_deref(), Some("2.440.1"));
        assert_eq!(info.hudson_version.as_deref(), Some("1.395"));
        assert_eq!(info.ssh_endpoint.as_deref(), Some("jenkins.local:2222"));
        assert_eq!(info.server.as_deref(), Some("Jetty(10.0.18)"));
        assert!(info.jenkins_cli_port.is_none());
        assert!(info.instance_identity.is_none());
        assert!(info.errors.is_empty());
    }

    #[test]
    fn test_text_to_integer() {
        assert_eq!(text_to_integer(" 42\n"), Some(42));
        assert_eq!(text_to_integer("forty-two"), None);
    }

    #[test]
    fn test_progressive_text_headers() {
        let text = progressive_text(
            &headers(&[("X-Text-Size", "1024"), ("X-More-Data", "true")]),
            "Started by user admin".to_string(),
        );
        assert_eq!(text.size, 1024);
        assert!(text.has_more_data);

        let text = progressive_text(&HeaderMap::new(), String::new());
        assert_eq!(text.size, -1);
        assert!(!text.has_more_data);
    }

    #[test]
    fn test_status_error_classification() {
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, ""),
            JenkinsError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            JenkinsError::Api(_)
        ));
    }
}
