//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand `${VAR}` references in a configuration value.
///
/// Values without `${` are returned unchanged, so selector patterns using a
/// bare `$` anchor are safe. `field` names the setting in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("COMBO_TEST_BASE", "/combo/=");
        }
        let result = expand_env("${COMBO_TEST_BASE}", "base_path").unwrap();
        assert_eq!(result, "/combo/=");
        unsafe {
            std::env::remove_var("COMBO_TEST_BASE");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("COMBO_TEST_UNSET_SEP");
        }
        let result = expand_env("${COMBO_TEST_UNSET_SEP:-;}", "separator").unwrap();
        assert_eq!(result, ";");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("COMBO_TEST_MISSING");
        }
        let err = expand_env("/c/${COMBO_TEST_MISSING}", "base_path").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("COMBO_TEST_MISSING"));
        assert!(err.to_string().contains("base_path"));
    }

    #[test]
    fn test_pattern_with_bare_dollar_unchanged() {
        let result = expand_env(r"<(link)([^>]*?)/?>$", "selectors.link").unwrap();
        assert_eq!(result, r"<(link)([^>]*?)/?>$");
    }
}
