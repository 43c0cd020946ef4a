//! Environment variable expansion for config values.
//!
//! Supports two forms inside string values:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// `field` is the config field path used in error messages
/// (e.g. `"confluence.api_key"`).
///
/// # Errors
///
/// Returns [`ConfigError::EnvVar`] when a referenced variable without a
/// default is unset, or when a `${` is never closed.
pub fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(ConfigError::EnvVar {
                field: field.to_owned(),
                message: "unclosed ${ in value".to_owned(),
            });
        };
        let reference = &after[..end];
        let (name, default) = match reference.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (reference, None),
        };
        match std::env::var(name) {
            Ok(resolved) => out.push_str(&resolved),
            Err(_) => match default {
                Some(default) => out.push_str(default),
                None => {
                    return Err(ConfigError::EnvVar {
                        field: field.to_owned(),
                        message: format!("${{{name}}} not set"),
                    });
                }
            },
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(expand_env("plain", "f").unwrap(), "plain");
    }

    #[test]
    fn test_expand_set_variable() {
        // SAFETY: test-local variable, no concurrent env access in this crate
        unsafe { std::env::set_var("WT_EXPAND_TEST", "value1") };
        assert_eq!(
            expand_env("pre-${WT_EXPAND_TEST}-post", "f").unwrap(),
            "pre-value1-post"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        assert_eq!(
            expand_env("${WT_EXPAND_UNSET_XYZ:-fallback}", "f").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_unset_without_default_errors() {
        let err = expand_env("${WT_EXPAND_UNSET_XYZ}", "confluence.api_key").unwrap_err();
        assert!(err.to_string().contains("confluence.api_key"));
    }

    #[test]
    fn test_unclosed_reference_errors() {
        assert!(expand_env("${OOPS", "f").is_err());
    }
}
