//! Environment variable helpers shared by the `from_env()` constructors.
//!
//! Empty values are treated the same as unset ones, so a `.env` file with
//! `GITHUB_TOKEN=` fails fast instead of sending an empty bearer token.

use std::str::FromStr;

use crate::error::{Error, Result};

/// Read a variable that must be present and non-empty.
pub fn required(name: &str) -> Result<String> {
    optional(name).ok_or_else(|| Error::Config(format!("{} is not set", name)))
}

/// Read a variable, mapping unset and empty values to `None`.
pub fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse a variable, falling back to `default` when unset.
///
/// A value that is present but does not parse is a configuration error.
pub fn parsed_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    match optional(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::Config(format!("{} has an invalid value: {:?}", name, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_missing_names_variable() {
        let err = required("TRIAGE_TEST_ENV_REQUIRED_MISSING").unwrap_err();
        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains("TRIAGE_TEST_ENV_REQUIRED_MISSING"));
    }

    #[test]
    fn test_required_empty_counts_as_missing() {
        std::env::set_var("TRIAGE_TEST_ENV_REQUIRED_EMPTY", "   ");
        assert!(required("TRIAGE_TEST_ENV_REQUIRED_EMPTY").is_err());
    }

    #[test]
    fn test_required_trims_value() {
        std::env::set_var("TRIAGE_TEST_ENV_REQUIRED_SET", " octo-org ");
        assert_eq!(required("TRIAGE_TEST_ENV_REQUIRED_SET").unwrap(), "octo-org");
    }

    #[test]
    fn test_parsed_or_default_when_unset() {
        let port: u16 = parsed_or("TRIAGE_TEST_ENV_PORT_UNSET", 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parsed_or_parses_value() {
        std::env::set_var("TRIAGE_TEST_ENV_PORT_SET", "8080");
        let port: u16 = parsed_or("TRIAGE_TEST_ENV_PORT_SET", 3000).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parsed_or_rejects_garbage() {
        std::env::set_var("TRIAGE_TEST_ENV_PORT_BAD", "eighty");
        let result: Result<u16> = parsed_or("TRIAGE_TEST_ENV_PORT_BAD", 3000);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
