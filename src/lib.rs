//! panicrs is a blocking client for the CryptoPanic news api
//!
//! ```no_run
//! use panicrs::{client::Api, query::{Filter, PostKind}};
//!
//! # fn main() -> panicrs::error::Result<()> {
//! let api = Api::new("your-auth-token")?;
//! let page = api.list_posts(&Filter {
//!     currency_codes: vec!["BTC".into()],
//!     kind: Some(PostKind::News),
//!     ..Default::default()
//! })?;
//!
//! for post in &page.posts {
//!     println!("{} ({} comments)", post.title, post.comments());
//! }
//!
//! if page.has_next() {
//!     let _older = page.next()?;
//! }
//! # Ok(())
//! # }
//! ```
#![forbid(missing_docs, rustdoc::missing_crate_level_docs)]

/// user agent sent with every request by default
pub static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod macros;
pub mod models;
pub mod query;
pub mod utils;

pub use {
    client::Api,
    error::{PanicError, Result},
    models::{Currency, Entry, Portfolio, PortfolioResponse, Post, PostsResponse, Source, User},
    query::{Filter, PostKind, Query},
};
