//! Text Search pagination via `next_page_token`.
//!
//! A [`SearchPager`] is a lazy, finite, single-use sequence of result pages
//! for one search string. The first page is requested with no token; each
//! later page echoes the previous response's `next_page_token` after
//! sleeping the client's page delay, because Google rejects tokens that are
//! used too soon after being issued. The sequence ends when a response has no
//! token, after the first error, or once the client's page cap is hit.

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::types::PlaceSummary;

enum PagerState {
    Start,
    Token(String),
    Done,
}

/// Lazily fetches the pages of one search. Created by [`PlacesClient::search`].
pub struct SearchPager<'a> {
    client: &'a PlacesClient,
    search: String,
    state: PagerState,
    pages_fetched: usize,
}

impl<'a> SearchPager<'a> {
    pub(crate) fn new(client: &'a PlacesClient, search: String) -> Self {
        Self {
            client,
            search,
            state: PagerState::Start,
            pages_fetched: 0,
        }
    }

    /// The combined `"{query} in {location}"` string sent upstream.
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Number of pages successfully fetched so far.
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self.state, PagerState::Done)
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` once the sequence is exhausted. An `Err` item is always
    /// the last one: the token it would have needed is dropped, never
    /// retried.
    ///
    /// A page with zero results but a token is a normal page; the caller
    /// simply gets an empty `Vec` and keeps going.
    pub async fn next_page(&mut self) -> Option<Result<Vec<PlaceSummary>, PlacesError>> {
        let token = match std::mem::replace(&mut self.state, PagerState::Done) {
            PagerState::Done => return None,
            PagerState::Start => None,
            PagerState::Token(token) => {
                let max_pages = self.client.max_pages();
                if self.pages_fetched >= max_pages {
                    return Some(Err(PlacesError::PaginationLimit {
                        query: self.search.clone(),
                        max_pages,
                    }));
                }

                let delay = self.client.page_delay();
                if !delay.is_zero() {
                    tracing::debug!(
                        search = %self.search,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "waiting before continuation request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Some(token)
            }
        };

        match self.client.search_page(&self.search, token.as_deref()).await {
            Ok(page) => {
                self.pages_fetched += 1;
                if let Some(next) = page.next_page_token.filter(|t| !t.is_empty()) {
                    self.state = PagerState::Token(next);
                }
                Some(Ok(page.results))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
