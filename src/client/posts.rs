//! client extensions for post operations on the cryptopanic api
use {
    crate::{
        client::{Api, ApiResponse},
        error::{PanicError, Result},
        models::{BaseResponse, PostsResponse},
        query::{Filter, PostKind, Query},
    },
    tracing::{debug, instrument},
    url::Url,
};

impl ApiResponse for PostsResponse {
    fn base_mut(&mut self) -> &mut BaseResponse {
        &mut self.base
    }
}

impl Api {
    /// get the latest posts, unfiltered
    pub fn posts(&self) -> Result<PostsResponse> {
        self.list_posts(&Filter::default())
    }

    /// get the latest news posts (no media)
    pub fn news(&self) -> Result<PostsResponse> {
        self.list_news(Filter::default())
    }

    /// get posts matching a filter
    ///
    /// a non-empty server status comes back as its [`PanicError`] and the
    /// decoded page is dropped. use [`Api::list_posts_raw`] to keep it
    #[instrument(skip(self))]
    pub fn list_posts(&self, filter: &Filter) -> Result<PostsResponse> {
        self.list_posts_with(filter.encode())
    }

    /// get posts matching a filter without mapping the server status
    ///
    /// only transport and decode failures are errors here. check
    /// [`PostsResponse::error`] on the result
    #[instrument(skip(self))]
    pub fn list_posts_raw(&self, filter: &Filter) -> Result<PostsResponse> {
        let url = self.make_url("/posts/", filter.encode());
        debug!(endpoint = "/posts/", "listing posts");

        self.fetch_posts(&url)
    }

    /// like [`Api::list_posts`] but always restricted to news
    pub fn list_news(&self, mut filter: Filter) -> Result<PostsResponse> {
        filter.kind = Some(PostKind::News);
        self.list_posts(&filter)
    }

    /// get posts using raw query params
    ///
    /// `auth_token`, `metadata` and `approved` set here win over the client's own
    pub fn list_posts_with(&self, params: Query) -> Result<PostsResponse> {
        let url = self.make_url("/posts/", params);
        debug!(endpoint = "/posts/", "listing posts");

        self.posts_call(&url)
    }

    /// fetch a page from an opaque next/previous token
    #[instrument(skip(self, token))]
    pub fn fetch_page(&self, token: &str) -> Result<PostsResponse> {
        let url = Url::parse(token)?;
        debug!(path = url.path(), "fetching page");

        self.posts_call(token)
    }

    /// GET a posts url and map any server-reported error
    fn posts_call(&self, url: &str) -> Result<PostsResponse> {
        self.fetch_posts(url)?.into_result()
    }

    /// GET a posts url and decode it, leaving the status alone
    fn fetch_posts(&self, url: &str) -> Result<PostsResponse> {
        let resp: PostsResponse = self.call(url)?;
        debug!(
            count = resp.posts.len(),
            total = resp.total_count,
            "fetched posts"
        );

        Ok(resp)
    }
}

impl PostsResponse {
    /// fetch the next page
    pub fn next(&self) -> Result<PostsResponse> {
        if !self.has_next() {
            return Err(PanicError::NoNextPage);
        }

        self.attached()?.fetch_page(&self.next)
    }

    /// fetch the previous page
    pub fn previous(&self) -> Result<PostsResponse> {
        if !self.has_previous() {
            return Err(PanicError::NoPreviousPage);
        }

        self.attached()?.fetch_page(&self.previous)
    }

    /// the client that fetched this response
    fn attached(&self) -> Result<&Api> {
        self.base.api().ok_or(PanicError::Detached)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::client::transport::mock::MockTransport};

    const PAGE_ONE: &str = r#"{
        "count": 3,
        "next": "https://cryptopanic.com/api/v1/posts/?auth_token=tok&page=2",
        "previous": null,
        "results": [{"kind": "news", "id": 1, "title": "one", "votes": {}}]
    }"#;

    const PAGE_TWO: &str = r#"{
        "count": 3,
        "next": null,
        "previous": "https://cryptopanic.com/api/v1/posts/?auth_token=tok",
        "results": [{"kind": "media", "id": 2, "title": "two", "votes": {"lol": 2}}]
    }"#;

    const BAD_TOKEN: &str = r#"{"status": "Incomplete", "info": "Token not found"}"#;

    fn api_with(bodies: &[&str]) -> (Api, MockTransport) {
        let mock = MockTransport::new(bodies.iter().copied());
        (Api::with_transport("tok", mock.clone()), mock)
    }

    #[test]
    fn test_posts_url() {
        let (api, mock) = api_with(&[PAGE_ONE]);
        let resp = api.posts().unwrap();

        assert_eq!(resp.posts.len(), 1);
        assert_eq!(
            mock.urls(),
            vec!["https://cryptopanic.com/api/v1/posts/?auth_token=tok"]
        );
    }

    #[test]
    fn test_list_posts_with_filter_and_flags() {
        let (api, mock) = api_with(&[PAGE_ONE]);
        let api = api.extra_metadata(true);
        let filter = Filter {
            currency_codes: vec!["BTC".into(), "ETH".into()],
            ui_filter: "hot".into(),
            ..Default::default()
        };

        api.list_posts(&filter).unwrap();

        assert_eq!(
            mock.urls(),
            vec![
                "https://cryptopanic.com/api/v1/posts/?auth_token=tok&currencies=BTC%2CETH&filter=hot&metadata=true"
            ]
        );
    }

    #[test]
    fn test_list_news_forces_kind() {
        let (api, mock) = api_with(&[PAGE_ONE, PAGE_ONE]);
        let filter = Filter {
            kind: Some(PostKind::Media),
            public: true,
            ..Default::default()
        };

        api.list_news(filter).unwrap();
        api.news().unwrap();

        let urls = mock.urls();
        assert_eq!(
            urls[0],
            "https://cryptopanic.com/api/v1/posts/?auth_token=tok&kind=news&public=true"
        );
        assert_eq!(
            urls[1],
            "https://cryptopanic.com/api/v1/posts/?auth_token=tok&kind=news"
        );
    }

    #[test]
    fn test_server_error_is_returned() {
        let (api, _) = api_with(&[BAD_TOKEN]);
        assert!(matches!(api.posts(), Err(PanicError::BadToken)));

        let (api, _) = api_with(&[r#"{"status": "invalid", "info": "Metadata param requires PRO account"}"#]);
        assert!(matches!(
            api.extra_metadata(true).posts(),
            Err(PanicError::ProOnly)
        ));
    }

    #[test]
    fn test_fetch_page_uses_token_verbatim() {
        let (api, mock) = api_with(&[PAGE_TWO]);
        let token = "https://cryptopanic.com/api/v1/posts/?auth_token=tok&page=2";
        let api = api.extra_metadata(true).original_source(true);

        let resp = api.fetch_page(token).unwrap();

        assert_eq!(mock.urls(), vec![token]);
        assert_eq!(resp.posts[0].lol_votes(), 2);
    }

    #[test]
    fn test_fetch_page_rejects_garbage_token() {
        let (api, mock) = api_with(&[PAGE_TWO]);

        assert!(matches!(api.fetch_page("page=2"), Err(PanicError::Url(_))));
        assert!(mock.urls().is_empty());
    }

    #[test]
    fn test_next_and_previous() {
        let (api, mock) = api_with(&[PAGE_ONE, PAGE_TWO, PAGE_ONE]);

        let first = api.posts().unwrap();
        assert!(first.has_next());
        assert!(!first.has_previous());

        let second = first.next().unwrap();
        assert_eq!(second.posts[0].id, 2);
        assert!(!second.has_next());
        assert!(second.has_previous());

        let back = second.previous().unwrap();
        assert_eq!(back.posts[0].id, 1);

        let urls = mock.urls();
        assert_eq!(urls.len(), 3);
        assert_eq!(urls[1], first.next_token());
        assert_eq!(urls[2], second.previous_token());
    }

    #[test]
    fn test_missing_pages_fail_without_network() {
        let (api, mock) = api_with(&[PAGE_TWO]);
        let page = api.posts().unwrap();

        assert!(matches!(page.next(), Err(PanicError::NoNextPage)));
        assert!(matches!(
            PostsResponse::default().previous(),
            Err(PanicError::NoPreviousPage)
        ));
        assert_eq!(mock.urls().len(), 1);
    }

    #[test]
    fn test_detached_response() {
        let resp: PostsResponse = serde_json::from_str(PAGE_ONE).unwrap();
        assert!(matches!(resp.next(), Err(PanicError::Detached)));
    }

    #[test]
    fn test_error_on_next_page_is_mapped() {
        let (api, _) = api_with(&[PAGE_ONE, BAD_TOKEN]);
        let first = api.posts().unwrap();

        assert!(matches!(first.next(), Err(PanicError::BadToken)));
    }

    #[test]
    fn test_raw_listing_keeps_response() {
        let (api, mock) = api_with(&[BAD_TOKEN, PAGE_ONE]);

        let resp = api.list_posts_raw(&Filter::default()).unwrap();
        assert_eq!(resp.base.status, "Incomplete");
        assert!(matches!(resp.error(), Some(PanicError::BadToken)));
        assert!(resp.base.api().is_some());

        let resp = api.list_posts_raw(&Filter::default()).unwrap();
        assert!(resp.error().is_none());
        assert_eq!(resp.posts.len(), 1);
        assert_eq!(mock.urls().len(), 2);
    }

    #[test]
    fn test_null_fields_do_not_fail_the_page() {
        let (api, _) = api_with(&[r#"{
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{
                "kind": "news",
                "title": null,
                "domain": null,
                "created_at": null,
                "currencies": null,
                "source": null,
                "votes": {"lol": null, "positive": 4}
            }]
        }"#]);

        let resp = api.posts().unwrap();
        let post = &resp.posts[0];

        assert_eq!(post.title, "");
        assert!(post.currency_codes().is_empty());
        assert_eq!(post.lol_votes(), 0);
        assert_eq!(post.positive_votes(), 4);
    }
}
