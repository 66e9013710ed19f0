//! error handling stuff
use {miette::Diagnostic, thiserror::Error};

/// info text the api sends back for an unknown auth token
const INFO_BAD_TOKEN: &str = "Token not found";
/// info text the api sends back when `metadata` is used without PRO
const INFO_PRO_ONLY: &str = "Metadata param requires PRO account";
/// info text the api sends back when `approved` is used by a non-partner key
const INFO_APPROVED_ONLY: &str = "Access Denied. This API key is not approved for Partners API.";

#[derive(Debug, Error, Diagnostic)]
/// An error
pub enum PanicError {
    /// a reqwest error
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// a json error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// a url parse error
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// an IO error
    #[error("i/o error: {0}")]
    IO(#[from] std::io::Error),

    /// a config loading error
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    /// a toml serialization error
    #[error("toml serialization error: {0}")]
    TOMLSer(#[from] toml::ser::Error),

    /// one or more config values failed validation
    #[error("{0}")]
    #[diagnostic(help("check your panicrs.toml and PANICRS_* environment variables"))]
    Validation(String),

    /// a tracing subscriber install error
    #[error("error installing log subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// the auth token was not recognized by the server
    #[error("unrecognized auth token")]
    #[diagnostic(code(panicrs::bad_token))]
    BadToken,

    /// the query asked for PRO-only metadata
    #[error("you need to be PRO to get extra metadata")]
    #[diagnostic(
        code(panicrs::pro_only),
        help("disable `extra_metadata` or use a PRO account token")
    )]
    ProOnly,

    /// the query asked for partner-only original sources
    #[error("you need to be approved to get original sources")]
    #[diagnostic(
        code(panicrs::approved_only),
        help("disable `original_source` unless your key is an approved partners key")
    )]
    ApprovedOnly,

    /// the server reported an incomplete query
    #[error("incomplete query: {0}")]
    Incomplete(String),

    /// the server reported an invalid query
    #[error("invalid query: {0}")]
    Invalid(String),

    /// any other status the server reported
    #[error("server error ({status}): {info}")]
    Server {
        /// the raw status
        status: String,
        /// the raw info text
        info: String,
    },

    /// the response has no next page
    #[error("response has no next page")]
    NoNextPage,

    /// the response has no previous page
    #[error("response has no previous page")]
    NoPreviousPage,

    /// the response wasn't fetched through an [`crate::client::Api`]
    #[error("response is not attached to a client")]
    Detached,

    /// a custom error
    #[error("error: {0}")]
    Other(String),
}

impl PanicError {
    /// map a status/info pair sent by the server to an error
    ///
    /// statuses aren't documented upstream, so anything unknown lands in
    /// [`PanicError::Server`]
    pub fn from_status(status: &str, info: &str) -> Option<Self> {
        let err = match (status, info) {
            ("", _) => return None,
            ("Incomplete", INFO_BAD_TOKEN) => Self::BadToken,
            ("Incomplete", _) => Self::Incomplete(info.to_string()),
            ("invalid", INFO_PRO_ONLY) => Self::ProOnly,
            ("invalid", INFO_APPROVED_ONLY) => Self::ApprovedOnly,
            ("invalid", _) => Self::Invalid(info.to_string()),
            _ => Self::Server {
                status: status.to_string(),
                info: info.to_string(),
            },
        };

        Some(err)
    }

    /// whether the error came from the server rejecting the query
    pub fn is_server_reported(&self) -> bool {
        matches!(
            self,
            Self::BadToken
                | Self::ProOnly
                | Self::ApprovedOnly
                | Self::Incomplete(_)
                | Self::Invalid(_)
                | Self::Server { .. }
        )
    }
}

impl From<String> for PanicError {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

/// A result using [`PanicError`] as the `Err` variant
pub type Result<T, U = PanicError> = miette::Result<T, U>;

/// bail
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::PanicError::from(String::from($msg)))
    };

    ($err:expr $(,)?) => {
        return Err($crate::error::PanicError::from($err))
    };

    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::PanicError::from(format!($fmt, $($arg)*)))
    };
}
