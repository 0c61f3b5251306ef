use std::fmt::Debug;
use std::str::FromStr;

use fds_core::overdue::{DEFAULT_WINDOW_MONTHS, MAX_WINDOW_MONTHS};

use crate::auth::token::TokenConfig;

/// Server configuration, read once at startup.
///
/// | Env Var                 | Default                 |
/// |-------------------------|-------------------------|
/// | `HOST`                  | `0.0.0.0`               |
/// | `PORT`                  | `3000`                  |
/// | `CORS_ORIGINS`          | `http://localhost:3000` |
/// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
/// | `OVERDUE_WINDOW_MONTHS` | `2`                     |
/// | `JWT_SECRET`            | required                |
/// | `JWT_EXPIRY_MINS`       | `480`                   |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Months checked by the overdue report when a request gives none.
    pub overdue_window_months: u32,
    pub token: TokenConfig,
}

impl ServerConfig {
    /// # Panics
    ///
    /// Panics on unparsable values, an overdue window outside
    /// `1..=MAX_WINDOW_MONTHS`, or a missing `JWT_SECRET`.
    pub fn from_env() -> Self {
        let overdue_window_months = env_or("OVERDUE_WINDOW_MONTHS", DEFAULT_WINDOW_MONTHS);
        assert!(
            (1..=MAX_WINDOW_MONTHS).contains(&overdue_window_months),
            "OVERDUE_WINDOW_MONTHS must be between 1 and {MAX_WINDOW_MONTHS}"
        );

        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins: parse_origins(&env_or(
                "CORS_ORIGINS",
                "http://localhost:3000".to_string(),
            )),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            overdue_window_months,
            token: TokenConfig::from_env(),
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e:?}")),
        Err(_) => default,
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn unset_variable_uses_default() {
        assert_eq!(env_or("FDS_TEST_SURELY_UNSET_VARIABLE", 42u16), 42);
    }
}
