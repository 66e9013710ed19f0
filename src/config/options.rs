//! every available configuration option and its type is listed in this file
use {
    crate::{
        config::validate::{Validate, format_validation_errors},
        error::{PanicError, Result},
    },
    config::{Config, ConfigBuilder, Environment},
    serde::{Deserialize, Serialize},
    smart_default::SmartDefault,
    std::path::{Path, PathBuf},
    tracing::{debug, info},
};

/// name of the config file looked up in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = "panicrs.toml";

/// prefix for environment variable overrides (`PANICRS_API__AUTH_TOKEN`, ...)
pub const ENV_PREFIX: &str = "PANICRS";

/// Settings for talking to the api
#[derive(Serialize, Deserialize, Clone, Debug, SmartDefault)]
pub struct ApiConfig {
    /// The auth token from <https://cryptopanic.com/developers/api/>
    #[default(None)]
    pub auth_token: Option<String>,

    /// Base url of the api, without the version segment
    #[default(Some("https://cryptopanic.com/api".to_string()))]
    pub base_url: Option<String>,

    /// Api version segment
    #[default(Some("v1".to_string()))]
    pub version: Option<String>,

    /// Ask for PRO-only post fields (image, description)
    #[default(Some(false))]
    pub extra_metadata: Option<bool>,

    /// Ask for original sources (approved partners keys only)
    #[default(Some(false))]
    pub original_source: Option<bool>,
}

/// Configuration options for making HTTP requests
#[derive(Serialize, Deserialize, Clone, Debug, SmartDefault)]
pub struct HttpConfig {
    /// User agent sent with every request
    #[default(Some(crate::USER_AGENT.to_string()))]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[default(Some(30))]
    pub timeout_secs: Option<u64>,

    /// Connection timeout in seconds
    #[default(Some(10))]
    pub connect_timeout_secs: Option<u64>,

    /// Connection pool size per host
    #[default(Some(8))]
    pub pool_max_idle_per_host: Option<usize>,

    /// Connection pool idle timeout in seconds
    #[default(Some(90))]
    pub pool_idle_timeout_secs: Option<u64>,

    /// Enable keep-alive
    #[default(Some(true))]
    pub tcp_keepalive: Option<bool>,

    /// How many seconds to keep TCP alive for
    #[default(Some(60))]
    pub tcp_keepalive_secs: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, SmartDefault)]
#[serde(rename_all = "lowercase")]
/// The format to log in
pub enum LoggingFormat {
    /// Use the compact output format
    Compact,

    /// Use the pretty multi-line output format
    #[default]
    Pretty,
}

/// Settings for logging
#[derive(Serialize, Deserialize, Clone, Debug, SmartDefault)]
pub struct LoggingConfig {
    /// Enable logging
    #[default(Some(true))]
    pub enable: Option<bool>,

    /// The max level to log at
    #[default(Some("info".to_string()))]
    pub level: Option<String>,

    /// Output format
    #[default(Some(LoggingFormat::Pretty))]
    pub format: Option<LoggingFormat>,

    /// Enable ANSI escape codes for colors
    #[default(Some(true))]
    pub ansi: Option<bool>,

    /// Display event targets in log messages
    #[default(Some(false))]
    pub event_targets: Option<bool>,

    /// Display line numbers in log messages
    #[default(Some(false))]
    pub line_numbers: Option<bool>,
}

/// The whole panicrs configuration
#[derive(Serialize, Deserialize, Clone, Debug, SmartDefault)]
pub struct PanicRs {
    /// Api settings
    #[default(Some(ApiConfig::default()))]
    pub api: Option<ApiConfig>,

    /// HTTP settings
    #[default(Some(HttpConfig::default()))]
    pub http: Option<HttpConfig>,

    /// Logging settings
    #[default(Some(LoggingConfig::default()))]
    pub logging: Option<LoggingConfig>,
}

impl PanicRs {
    /// load the config from defaults, the nearest `panicrs.toml` and the environment
    pub fn load() -> Result<Self> {
        let local = Self::find_local_config()?;
        Self::load_with(local.as_deref())
    }

    /// load the config from defaults, the given file and the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(Some(path.as_ref()))
    }

    /// load the config, optionally layering a file over the defaults
    fn load_with(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::create_builder(&Self::default())?;

        if let Some(path) = file {
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let cfg: PanicRs = builder.build()?.try_deserialize()?;
        cfg.run_validation()?;

        info!("configuration loaded");
        Ok(cfg)
    }

    /// create a config builder with defaults
    fn create_builder(defaults: &PanicRs) -> Result<ConfigBuilder<config::builder::DefaultState>> {
        let config_source = Config::try_from(defaults)?;

        Ok(Config::builder().add_source(config_source))
    }

    /// run validation and turn the collected errors into one
    fn run_validation(&self) -> Result<()> {
        self.validate()
            .map_err(|errors| PanicError::Validation(format_validation_errors(&errors)))
    }

    /// find the local config file
    fn find_local_config() -> Result<Option<PathBuf>> {
        let curr_dir = std::env::current_dir()?;

        Ok(curr_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.exists()))
    }

    /// save config to a file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let toml_str = toml::to_string_pretty(self)?;

        std::fs::write(path, &toml_str)?;
        info!(path = %path.display(), bytes = toml_str.len(), "saved config");

        Ok(())
    }

    /// the api section, or its defaults
    pub fn api(&self) -> ApiConfig {
        self.api.clone().unwrap_or_default()
    }

    /// the http section, or its defaults
    pub fn http(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }

    /// the logging section, or its defaults
    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::getopt, tempfile::TempDir};

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let cfg = PanicRs::default();

        assert_eq!(
            getopt!(cfg, api.base_url).as_deref(),
            Some("https://cryptopanic.com/api")
        );
        assert_eq!(getopt!(cfg, api.version).as_deref(), Some("v1"));
        assert_eq!(getopt!(cfg, api.auth_token), None);
        assert_eq!(getopt!(cfg, logging.format), Some(LoggingFormat::Pretty));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let (_dir, path) = write_config(
            r#"
            [api]
            auth_token = "secret"
            extra_metadata = true

            [http]
            timeout_secs = 5

            [logging]
            format = "compact"
            "#,
        );

        let cfg = PanicRs::load_from(&path).unwrap();

        assert_eq!(getopt!(cfg, api.auth_token).as_deref(), Some("secret"));
        assert_eq!(getopt!(cfg, api.extra_metadata), Some(true));
        assert_eq!(getopt!(cfg, api.original_source), Some(false));
        assert_eq!(getopt!(cfg, http.timeout_secs), Some(5));
        assert_eq!(getopt!(cfg, http.connect_timeout_secs), Some(10));
        assert_eq!(getopt!(cfg, logging.format), Some(LoggingFormat::Compact));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let (_dir, path) = write_config(
            r#"
            [api]
            base_url = "not a url"
            "#,
        );

        match PanicRs::load_from(&path) {
            Err(PanicError::Validation(msg)) => assert!(msg.contains("api.base_url")),
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let res = PanicRs::load_from(dir.path().join("nope.toml"));

        assert!(matches!(res, Err(PanicError::Config(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut cfg = PanicRs::default();
        cfg.api = Some(ApiConfig {
            auth_token: Some("tok".into()),
            original_source: Some(true),
            ..Default::default()
        });

        cfg.save_to_file(&path).unwrap();
        let loaded = PanicRs::load_from(&path).unwrap();

        assert_eq!(getopt!(loaded, api.auth_token).as_deref(), Some("tok"));
        assert_eq!(getopt!(loaded, api.original_source), Some(true));
    }

    #[test]
    fn test_section_accessors_fall_back() {
        let cfg = PanicRs {
            api: None,
            http: None,
            logging: None,
        };

        assert_eq!(cfg.http().timeout_secs, Some(30));
        assert_eq!(cfg.logging().enable, Some(true));
        assert!(cfg.api().auth_token.is_none());
    }
}
