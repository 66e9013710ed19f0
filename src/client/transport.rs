//! the http layer requests go through
use {
    crate::{config::options::HttpConfig, error::Result},
    reqwest::{blocking::Client, header::USER_AGENT},
    std::time::Duration,
    tracing::debug,
};

/// something that can perform a blocking http GET
///
/// the body is returned whatever the http status is, since the api reports
/// most failures through a json `status`/`info` pair
pub trait Transport: Send + Sync {
    /// fetch `url` and return the raw response body
    fn fetch(&self, url: &str, user_agent: &str) -> Result<Vec<u8>>;
}

impl Transport for Client {
    fn fetch(&self, url: &str, user_agent: &str) -> Result<Vec<u8>> {
        let response = Client::get(self, url)
            .header(USER_AGENT, user_agent)
            .send()
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();

        if !status.is_success() {
            debug!(%status, "api answered with a non-success status");
        }

        Ok(response
            .bytes()
            .map_err(reqwest::Error::without_url)?
            .to_vec())
    }
}

/// build a blocking http client from the given settings
pub fn build_http_client(http: &HttpConfig) -> Result<Client> {
    let defaults = HttpConfig::default();
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(
            http.timeout_secs.or(defaults.timeout_secs).unwrap_or(30),
        ))
        .connect_timeout(Duration::from_secs(
            http.connect_timeout_secs
                .or(defaults.connect_timeout_secs)
                .unwrap_or(10),
        ))
        .pool_max_idle_per_host(
            http.pool_max_idle_per_host
                .or(defaults.pool_max_idle_per_host)
                .unwrap_or(8),
        )
        .pool_idle_timeout(Duration::from_secs(
            http.pool_idle_timeout_secs
                .or(defaults.pool_idle_timeout_secs)
                .unwrap_or(90),
        ));

    if http.tcp_keepalive.or(defaults.tcp_keepalive).unwrap_or(true) {
        builder = builder.tcp_keepalive(Duration::from_secs(
            http.tcp_keepalive_secs
                .or(defaults.tcp_keepalive_secs)
                .unwrap_or(60),
        ));
    }

    Ok(builder.build()?)
}
