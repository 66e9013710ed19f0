//! configuration validation stuff
use crate::{config::options::*, validator, validator_nested};

/// trait for validating config structs
pub trait Validate {
    /// validate the config
    fn validate(&self) -> Result<(), Vec<String>>;

    /// check if the config is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// whether a string looks like an http(s) url
fn is_http_url(v: &str) -> bool {
    url::Url::parse(v).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

validator! { ApiConfig,
    base_url => |v: &String| is_http_url(v),
        "must be a valid http(s) url";
    version => |v: &String| !v.trim().is_empty() && !v.contains('/'),
        "must be a single non-empty path segment";
}

validator! { HttpConfig,
    user_agent => |v: &String| !v.trim().is_empty(),
        "must not be empty";
    timeout_secs => |v: &u64| *v > 0,
        "must be greater than 0";
    connect_timeout_secs => |v: &u64| *v > 0,
        "must be greater than 0";
    pool_max_idle_per_host => |v: &usize| *v > 0,
        "must be greater than 0";
    pool_idle_timeout_secs => |v: &u64| *v > 0,
        "must be greater than 0";
    tcp_keepalive_secs => |v: &u64| *v > 0,
        "must be greater than 0";
}

/// levels `string_to_log_level` understands without falling back
const VALID_LOG_LEVELS: &[&str] = &[
    "t", "trace", "trc", "d", "debug", "dbg", "i", "info", "inf", "w", "warn", "wrn", "e",
    "error", "err",
];

validator! { LoggingConfig,
    level => |v: &String| VALID_LOG_LEVELS.contains(&v.to_lowercase().as_str()),
        "must be one of trace, debug, info, warn or error";
}

validator_nested! { PanicRs, nested: { api; http; logging; } }

/// format a list of validation errors
pub fn format_validation_errors(errors: &[String]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, err) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, err));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PanicRs::default().is_valid());
    }

    #[test]
    fn test_bad_values_are_reported() {
        let cfg = PanicRs {
            api: Some(ApiConfig {
                base_url: Some("ftp://cryptopanic.com".into()),
                ..Default::default()
            }),
            http: Some(HttpConfig {
                timeout_secs: Some(0),
                ..Default::default()
            }),
            logging: Some(LoggingConfig {
                level: Some("loud".into()),
                ..Default::default()
            }),
        };

        let errors = cfg.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], "api.base_url: must be a valid http(s) url");
        assert_eq!(errors[1], "http.timeout_secs: must be greater than 0");
        assert!(errors[2].starts_with("logging.level"));
    }

    #[test]
    fn test_format_validation_errors() {
        let out = format_validation_errors(&["a: bad".into(), "b: worse".into()]);
        assert_eq!(
            out,
            "Configuration validation failed:\n  1. a: bad\n  2. b: worse\n"
        );
    }
}
