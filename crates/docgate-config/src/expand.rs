//! Environment variable expansion for configuration strings.
//!
//! Supports two forms:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// `field` names the configuration field for error messages
/// (e.g. `site.base_url`).
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
///
/// # Errors
///
/// Returns [`ConfigError::EnvVar`] if a referenced variable without a
/// default is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(|cow| cow.into_owned())
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("/docs/", "site.base_url").unwrap(), "/docs/");
    }

    #[test]
    fn test_expands_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCGATE_TEST_BASE", "/preview/");
        }

        let expanded = expand_env("${DOCGATE_TEST_BASE}", "site.base_url").unwrap();
        assert_eq!(expanded, "/preview/");

        unsafe {
            std::env::remove_var("DOCGATE_TEST_BASE");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCGATE_TEST_MISSING");
        }

        let expanded = expand_env("${DOCGATE_TEST_MISSING:-/docs/}", "site.base_url").unwrap();
        assert_eq!(expanded, "/docs/");
    }

    #[test]
    fn test_default_ignored_when_set() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCGATE_TEST_SET", "/preview/");
        }

        let expanded = expand_env("${DOCGATE_TEST_SET:-/docs/}", "site.base_url").unwrap();
        assert_eq!(expanded, "/preview/");

        unsafe {
            std::env::remove_var("DOCGATE_TEST_SET");
        }
    }

    #[test]
    fn test_missing_required_variable_errors() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCGATE_TEST_MISSING");
        }

        let err = expand_env("${DOCGATE_TEST_MISSING}", "site.url").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCGATE_TEST_MISSING"));
        assert!(err.to_string().contains("site.url"));
    }

    #[test]
    fn test_expands_inside_surrounding_text() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCGATE_TEST_HOST", "signedshot.io");
        }

        let expanded = expand_env("https://${DOCGATE_TEST_HOST}", "site.url").unwrap();
        assert_eq!(expanded, "https://signedshot.io");

        unsafe {
            std::env::remove_var("DOCGATE_TEST_HOST");
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        // $VAR without braces passes through untouched
        let expanded = expand_env("https://example.com/$path", "site.url").unwrap();
        assert_eq!(expanded, "https://example.com/$path");
    }
}
