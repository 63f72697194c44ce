//! `${VAR}` and `${VAR:-default}` expansion for configuration files

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InterpolationError {
    #[error("Required environment variable not found: {0}")]
    RequiredVarNotFound(String),
}

pub(crate) type InterpolationResult<T> = Result<T, InterpolationError>;

static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("Invalid regex pattern")
});

/// Expands every variable reference in `input` in a single pass. Values and
/// defaults are inserted as is.
pub(crate) fn interpolate(input: &str) -> InterpolationResult<String> {
    let mut result = String::with_capacity(input.len());
    let mut last = 0;

    for cap in VAR_PATTERN.captures_iter(input) {
        let (Some(full), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        result.push_str(&input[last..full.start()]);

        let replacement = match std::env::var(name.as_str()) {
            Ok(value) => value,
            Err(_) => match cap.get(2) {
                Some(default) => default.as_str().to_string(),
                None => {
                    return Err(InterpolationError::RequiredVarNotFound(
                        name.as_str().to_string(),
                    ))
                }
            },
        };
        result.push_str(&replacement);
        last = full.end();
    }

    result.push_str(&input[last..]);
    Ok(result)
}

/// Expands strings anywhere inside a parsed TOML document.
pub(crate) fn interpolate_toml(value: &mut toml::Value) -> InterpolationResult<()> {
    match value {
        toml::Value::String(s) => {
            *s = interpolate(s)?;
        }
        toml::Value::Array(arr) => {
            for item in arr {
                interpolate_toml(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, v) in table.iter_mut() {
                interpolate_toml(v)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_var() {
        std::env::set_var("JENKINS_REST_TEST_SIMPLE", "hello");
        let result = interpolate("Hello ${JENKINS_REST_TEST_SIMPLE}!").unwrap();
        assert_eq!(result, "Hello hello!");
        std::env::remove_var("JENKINS_REST_TEST_SIMPLE");
    }

    #[test]
    fn test_missing_var_error() {
        let result = interpolate("${JENKINS_REST_TEST_DOES_NOT_EXIST}");
        assert_eq!(
            result,
            Err(InterpolationError::RequiredVarNotFound(
                "JENKINS_REST_TEST_DOES_NOT_EXIST".to_string()
            ))
        );
    }

    #[test]
    fn test_default_value() {
        let result = interpolate("${JENKINS_REST_TEST_UNSET_1:-http://127.0.0.1:8080}").unwrap();
        assert_eq!(result, "http://127.0.0.1:8080");

        let result = interpolate("prefix${JENKINS_REST_TEST_UNSET_2:-}suffix").unwrap();
        assert_eq!(result, "prefixsuffix");
    }

    #[test]
    fn test_multiple_vars() {
        std::env::set_var("JENKINS_REST_TEST_HOST", "ci.example.com");
        let result =
            interpolate("https://${JENKINS_REST_TEST_HOST}:${JENKINS_REST_TEST_UNSET_3:-8443}")
                .unwrap();
        assert_eq!(result, "https://ci.example.com:8443");
        std::env::remove_var("JENKINS_REST_TEST_HOST");
    }

    #[test]
    fn test_env_value_is_not_reexpanded() {
        std::env::set_var("JENKINS_REST_TEST_LITERAL", "${NOT_A_REFERENCE}");
        let result = interpolate("${JENKINS_REST_TEST_LITERAL}").unwrap();
        assert_eq!(result, "${NOT_A_REFERENCE}");
        std::env::remove_var("JENKINS_REST_TEST_LITERAL");
    }

    #[test]
    fn test_unbraced_reference_is_left_alone() {
        assert_eq!(interpolate("$HOME and plain text").unwrap(), "$HOME and plain text");
    }

    #[test]
    fn test_interpolate_toml() {
        std::env::set_var("JENKINS_REST_TEST_TOML", "admin:secret");

        let mut value: toml::Value = toml::from_str(
            r#"
            credentials = "${JENKINS_REST_TEST_TOML}"
            nested = { inner = "${JENKINS_REST_TEST_TOML:-fallback}" }
            array = ["${JENKINS_REST_TEST_TOML}", "static"]
            timeout_secs = 5
        "#,
        )
        .unwrap();
        interpolate_toml(&mut value).unwrap();

        assert_eq!(value["credentials"].as_str().unwrap(), "admin:secret");
        assert_eq!(value["nested"]["inner"].as_str().unwrap(), "admin:secret");
        assert_eq!(value["array"][1].as_str().unwrap(), "static");
        assert_eq!(value["timeout_secs"].as_integer(), Some(5));

        std::env::remove_var("JENKINS_REST_TEST_TOML");
    }
}
