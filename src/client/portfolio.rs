//! client extensions for the portfolio endpoint
use {
    crate::{
        client::{Api, ApiResponse},
        error::Result,
        models::{BaseResponse, PortfolioResponse},
        query::Query,
    },
    tracing::{debug, instrument},
};

impl ApiResponse for PortfolioResponse {
    fn base_mut(&mut self) -> &mut BaseResponse {
        &mut self.base
    }
}

impl Api {
    /// get the user and portfolio tied to the auth token
    ///
    /// a non-empty server status comes back as its [`PanicError`](crate::PanicError)
    /// and the decoded response is dropped. use [`Api::portfolio_raw`] to keep it
    pub fn portfolio(&self) -> Result<PortfolioResponse> {
        self.portfolio_raw()?.into_result()
    }

    /// get the portfolio without mapping the server status
    #[instrument(skip(self))]
    pub fn portfolio_raw(&self) -> Result<PortfolioResponse> {
        let url = self.make_url("/portfolio/", Query::new());
        let resp: PortfolioResponse = self.call(&url)?;

        debug!(
            entries = resp.portfolio.entries.len(),
            currency = %resp.portfolio.portfolio_currency,
            "fetched portfolio"
        );

        Ok(resp)
    }
}
