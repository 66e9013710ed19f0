//! cryptopanic api stuff
use {
    crate::{
        client::transport::{Transport, build_http_client},
        config::options::{HttpConfig, PanicRs},
        error::{PanicError, Result},
        getopt,
        models::BaseResponse,
        query::Query,
    },
    serde::de::DeserializeOwned,
    std::{fmt, sync::Arc},
    tracing::{debug, info, warn},
};

pub mod pages;
pub mod portfolio;
pub mod posts;
pub mod transport;

/// base url of the api
pub const API_URL: &str = "https://cryptopanic.com/api";
/// api version segment
pub const API_VERSION: &str = "v1";

/// a response that carries the shared status/info block
pub(crate) trait ApiResponse: DeserializeOwned {
    /// the embedded base response
    fn base_mut(&mut self) -> &mut BaseResponse;
}

/// the client
#[derive(Clone)]
pub struct Api {
    /// the token sent as `auth_token`
    auth_token: String,
    /// what requests go through
    transport: Arc<dyn Transport>,
    /// base url for api requests
    base_url: String,
    /// version segment appended to the base url
    version: String,
    /// user agent sent with every request
    user_agent: String,
    /// ask for PRO-only post fields
    pub extra_metadata: bool,
    /// ask for original sources (approved partners only)
    pub original_source: bool,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("user_agent", &self.user_agent)
            .field("extra_metadata", &self.extra_metadata)
            .field("original_source", &self.original_source)
            .finish_non_exhaustive()
    }
}

impl Api {
    /// make a new client using a default blocking http client
    pub fn new(auth_token: impl Into<String>) -> Result<Self> {
        let client = build_http_client(&HttpConfig::default())?;
        Ok(Self::with_transport(auth_token, client))
    }

    /// make a new client sending requests through the given transport
    pub fn with_transport(auth_token: impl Into<String>, transport: impl Transport + 'static) -> Self {
        Self {
            auth_token: auth_token.into(),
            transport: Arc::new(transport),
            base_url: API_URL.to_string(),
            version: API_VERSION.to_string(),
            user_agent: crate::USER_AGENT.to_string(),
            extra_metadata: false,
            original_source: false,
        }
    }

    /// make a new client from a loaded config
    pub fn from_config(cfg: &PanicRs) -> Result<Self> {
        let client = build_http_client(&cfg.http())?;
        Self::from_config_with_transport(cfg, client)
    }

    /// make a new client from a loaded config, sending requests through the given transport
    pub fn from_config_with_transport(
        cfg: &PanicRs,
        transport: impl Transport + 'static,
    ) -> Result<Self> {
        let token = getopt!(cfg, api.auth_token).unwrap_or_default();

        if token.trim().is_empty() {
            return Err(PanicError::Validation(
                "api.auth_token: must be set to talk to the api".to_string(),
            ));
        }

        let api = Self {
            base_url: getopt!(cfg, api.base_url).unwrap_or_else(|| API_URL.to_string()),
            version: getopt!(cfg, api.version).unwrap_or_else(|| API_VERSION.to_string()),
            user_agent: getopt!(cfg, http.user_agent)
                .unwrap_or_else(|| crate::USER_AGENT.to_string()),
            extra_metadata: getopt!(cfg, api.extra_metadata).unwrap_or(false),
            original_source: getopt!(cfg, api.original_source).unwrap_or(false),
            ..Self::with_transport(token, transport)
        };

        info!(base_url = %api.base_url, version = %api.version, "initialized api client");
        Ok(api)
    }

    /// ask for PRO-only post fields (image, description) on every request
    pub fn extra_metadata(mut self, enabled: bool) -> Self {
        self.extra_metadata = enabled;
        self
    }

    /// ask for original sources on every request
    pub fn original_source(mut self, enabled: bool) -> Self {
        self.original_source = enabled;
        self
    }

    /// point the client at another base url (no trailing slash, no version)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// build the full url for an endpoint
    ///
    /// the auth token, `metadata` and `approved` are only added when the
    /// caller didn't set them already
    pub(crate) fn make_url(&self, path: &str, mut params: Query) -> String {
        params.set_default("auth_token", self.auth_token.as_str());

        if self.extra_metadata {
            params.set_default("metadata", "true");
        }

        if self.original_source {
            params.set_default("approved", "true");
        }

        format!("{}/{}{}?{}", self.base_url, self.version, path, params)
    }

    /// GET a url, decode the body and attach this client to the response
    ///
    /// server-reported errors are left in the response for the caller to map
    pub(crate) fn call<T: ApiResponse>(&self, url: &str) -> Result<T> {
        let body = self.transport.fetch(url, &self.user_agent)?;
        let mut resp: T = serde_json::from_slice(&body)?;
        let base = resp.base_mut();

        if !base.is_ok() {
            warn!(status = %base.status, info = %base.info, "api reported an error");
        }

        base.api = Some(self.clone());
        debug!(bytes = body.len(), "decoded api response");

        Ok(resp)
    }
}
