//! walking through every page of a listing
use {
    crate::{
        client::Api,
        error::Result,
        models::{Post, PostsResponse},
        query::Filter,
    },
    std::iter::FusedIterator,
};

/// iterator over pages of posts, following next tokens
///
/// one request is made per call to `next`; the first error ends the iteration
#[derive(Debug)]
pub struct Pages<'a> {
    /// the client requests go through
    api: &'a Api,
    /// what to fetch next
    state: PageState,
}

/// where a [`Pages`] iterator is at
#[derive(Debug)]
enum PageState {
    /// nothing fetched yet
    Start(Filter),
    /// fetch this token next
    Token(String),
    /// no more pages (or an error was yielded)
    Done,
}

impl Api {
    /// iterate over every page of posts matching a filter
    pub fn pages(&self, filter: Filter) -> Pages<'_> {
        Pages {
            api: self,
            state: PageState::Start(filter),
        }
    }
}

impl Pages<'_> {
    /// flatten the pages into individual posts
    pub fn posts(self) -> impl Iterator<Item = Result<Post>> {
        self.flat_map(|page| -> Box<dyn Iterator<Item = Result<Post>>> {
            match page {
                Ok(page) => Box::new(page.posts.into_iter().map(Ok)),
                Err(e) => Box::new(std::iter::once(Err(e))),
            }
        })
    }
}

impl Iterator for Pages<'_> {
    type Item = Result<PostsResponse>;

    fn next(&mut self) -> Option<Self::Item> {
        let res = match std::mem::replace(&mut self.state, PageState::Done) {
            PageState::Start(filter) => self.api.list_posts(&filter),
            PageState::Token(token) => self.api.fetch_page(&token),
            PageState::Done => return None,
        };

        if let Ok(page) = &res {
            if page.has_next() {
                self.state = PageState::Token(page.next_token().to_string());
            }
        }

        Some(res)
    }
}

impl FusedIterator for Pages<'_> {}
