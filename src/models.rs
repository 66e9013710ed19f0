//! data types used for deserializing cryptopanic api responses
use {
    crate::{
        client::Api,
        error::{PanicError, Result},
        utils::{lenient_f64, lenient_f64_map, null_as_default, null_counts_as_zero},
    },
    chrono::{DateTime, FixedOffset},
    hashbrown::HashMap,
    serde::{Deserialize, Serialize},
};

/// the status/info pair every response carries, plus the client that fetched it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseResponse {
    /// the status the server reported (empty on success)
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,

    /// extra info about the status
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: String,

    /// the client this response came from
    #[serde(skip)]
    pub(crate) api: Option<Api>,
}

impl BaseResponse {
    /// whether the server reported success
    pub fn is_ok(&self) -> bool {
        self.status.is_empty()
    }

    /// the error the server reported, if any
    pub fn error(&self) -> Option<PanicError> {
        PanicError::from_status(&self.status, &self.info)
    }

    /// the client this response came from, if it came from one
    pub fn api(&self) -> Option<&Api> {
        self.api.as_ref()
    }
}

/// a page of posts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostsResponse {
    /// total number of posts matching the query (across all pages)
    #[serde(rename = "count", default, deserialize_with = "null_as_default")]
    pub total_count: u64,

    /// the posts on this page
    #[serde(rename = "results", default, deserialize_with = "null_as_default")]
    pub posts: Vec<Post>,

    /// url of the next page
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) next: String,

    /// url of the previous page
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) previous: String,

    /// status, info and the issuing client
    #[serde(flatten)]
    pub base: BaseResponse,
}

impl PostsResponse {
    /// whether there's a next page
    pub fn has_next(&self) -> bool {
        !self.next.is_empty()
    }

    /// whether there's a previous page
    pub fn has_previous(&self) -> bool {
        !self.previous.is_empty()
    }

    /// the opaque next page token
    pub fn next_token(&self) -> &str {
        &self.next
    }

    /// the opaque previous page token
    pub fn previous_token(&self) -> &str {
        &self.previous
    }

    /// the error the server reported, if any
    pub fn error(&self) -> Option<PanicError> {
        self.base.error()
    }

    /// turn a server-reported error into an `Err`
    pub fn into_result(self) -> Result<Self> {
        match self.error() {
            Some(e) => Err(e),
            None => Ok(self),
        }
    }
}

/// a news or media post
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// either "news" or "media"
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// domain of the linked site
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    /// post title
    pub title: String,
    /// url slug
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    /// unique id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    /// link to the post on cryptopanic
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// vote category => count
    #[serde(default, deserialize_with = "null_counts_as_zero")]
    pub votes: HashMap<String, i64>,
    /// currencies the post is about
    #[serde(default, deserialize_with = "null_as_default")]
    pub currencies: Vec<Currency>,
    /// where the post came from
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: Source,
    /// when the post was published (RFC 3339)
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_at: String,
    /// when the post was picked up by cryptopanic (RFC 3339)
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,

    /// preview image (PRO only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// short description (PRO only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Post {
    /// read a vote category, 0 if the server left it out
    fn vote(&self, key: &str) -> i64 {
        self.votes.get(key).copied().unwrap_or(0)
    }

    /// number of comments
    pub fn comments(&self) -> i64 {
        self.vote("comments")
    }

    /// how many times it was saved
    pub fn saved(&self) -> i64 {
        self.vote("saved")
    }

    /// 'like' votes
    pub fn likes(&self) -> i64 {
        self.vote("liked")
    }

    /// 'dislike' votes
    pub fn dislikes(&self) -> i64 {
        self.vote("disliked")
    }

    /// 'positive' votes
    pub fn positive_votes(&self) -> i64 {
        self.vote("positive")
    }

    /// 'negative' votes
    pub fn negative_votes(&self) -> i64 {
        self.vote("negative")
    }

    /// 'important' votes
    pub fn important_votes(&self) -> i64 {
        self.vote("important")
    }

    /// 'lol' votes
    pub fn lol_votes(&self) -> i64 {
        self.vote("lol")
    }

    /// 'toxic' votes
    pub fn toxic_votes(&self) -> i64 {
        self.vote("toxic")
    }

    /// codes of the currencies the post is about
    pub fn currency_codes(&self) -> Vec<String> {
        self.currencies.iter().map(|c| c.code.clone()).collect()
    }

    /// whether this is a news post
    pub fn is_news(&self) -> bool {
        self.kind == "news"
    }

    /// whether this is a media post
    pub fn is_media(&self) -> bool {
        self.kind == "media"
    }

    /// parsed `published_at`
    pub fn published_time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.published_at).ok()
    }

    /// parsed `created_at`
    pub fn created_time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }
}

/// a currency a post or portfolio entry refers to
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// ticker code, e.g. "BTC"
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    /// full name
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// url slug
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    /// link to the currency page
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// the site a post was taken from
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    /// site name
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// region code
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    /// site domain
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    /// path on the site, if any
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
}

/// a user and their portfolio
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioResponse {
    /// the owner of the token
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: User,

    /// their portfolio
    #[serde(default, deserialize_with = "null_as_default")]
    pub portfolio: Portfolio,

    /// status, info and the issuing client
    #[serde(flatten)]
    pub base: BaseResponse,
}

impl PortfolioResponse {
    /// the error the server reported, if any
    pub fn error(&self) -> Option<PanicError> {
        self.base.error()
    }

    /// turn a server-reported error into an `Err`
    pub fn into_result(self) -> Result<Self> {
        match self.error() {
            Some(e) => Err(e),
            None => Ok(self),
        }
    }
}

/// an api user
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// username
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    /// email address
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

/// a user's holdings
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// the currency totals are expressed in
    #[serde(default, deserialize_with = "null_as_default")]
    pub portfolio_currency: String,
    /// individual holdings
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<Entry>,
    /// portfolio value per currency
    #[serde(default, deserialize_with = "lenient_f64_map")]
    pub totals: HashMap<String, f64>,
    /// portfolio change per period
    #[serde(default, deserialize_with = "lenient_f64_map")]
    pub percent_changes: HashMap<String, f64>,
}

impl Portfolio {
    /// the total in the portfolio's own currency
    pub fn total(&self) -> Option<f64> {
        self.totals.get(&self.portfolio_currency).copied()
    }

    /// look up the entry for a currency code
    pub fn entry(&self, code: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.currency.code.eq_ignore_ascii_case(code))
    }
}

/// a single holding in a portfolio
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// entry id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    /// display title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// the held currency
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: Currency,
    /// amount held, in units of `currency`
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    /// amount held, in USD
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount_usd: f64,
    /// `amount_usd`, rounded for display
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount_usd_rounded: String,
    /// share of the whole portfolio
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage: f64,
    /// change over the last 24 hours
    #[serde(default, alias = "change_24h", deserialize_with = "lenient_f64")]
    pub percent_change_24h: f64,
    /// change over the last hour
    #[serde(default, alias = "change_1h", deserialize_with = "lenient_f64")]
    pub percent_change_1h: f64,
    /// change over the last 7 days
    #[serde(default, alias = "change_7d", deserialize_with = "lenient_f64")]
    pub percent_change_7d: f64,
}
