//! query string building
use {
    serde::{Deserialize, Serialize},
    std::{collections::BTreeMap, fmt},
    url::form_urlencoded,
};

/// the kind of post to ask for
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// news articles
    News,
    /// media (videos, podcasts, etc.)
    Media,
}

impl PostKind {
    /// the value the api expects
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Media => "media",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// a set of query parameters, always encoded in key order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    /// the params themselves
    params: BTreeMap<String, String>,
}

impl Query {
    /// make an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// get the value of a param, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// set a param, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// set a param only if it's missing or empty
    pub fn set_default(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        if self.get(key).is_none_or(str::is_empty) {
            self.set(key, value);
        }

        self
    }

    /// whether there are no params at all
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// form-urlencode the params
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.params)
            .finish()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// filters for narrowing down which posts get returned
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    /// only return public posts
    #[serde(default)]
    pub public: bool,

    /// one of the filters from the site ui (`rising`, `hot`, `bullish`, `bearish`,
    /// `important`, `saved`, `lol`)
    #[serde(default)]
    pub ui_filter: String,

    /// only return posts about these currency codes
    #[serde(default)]
    pub currency_codes: Vec<String>,

    /// only return posts in these regions
    #[serde(default)]
    pub regions: Vec<String>,

    /// only return posts of this kind (both kinds when `None`)
    #[serde(default)]
    pub kind: Option<PostKind>,
}

impl Filter {
    /// turn the filter into query params, leaving out anything unset
    pub fn encode(&self) -> Query {
        let mut q = Query::new();

        if self.public {
            q.set("public", "true");
        }

        if !self.ui_filter.is_empty() {
            q.set("filter", self.ui_filter.as_str());
        }

        if !self.currency_codes.is_empty() {
            q.set("currencies", self.currency_codes.join(","));
        }

        if !self.regions.is_empty() {
            q.set("regions", self.regions.join(","));
        }

        if let Some(kind) = self.kind {
            q.set("kind", kind.as_str());
        }

        q
    }
}
