use tracing::{debug, info, warn};

use super::source::{FetchError, MovieSource};
use crate::tmdb::{Movie, MoviePage};

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserState {
    pub page: u32,
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
}

impl BrowserState {
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            movies: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn view(&self) -> View<'_> {
        if self.loading {
            View::Loading
        } else if let Some(ref message) = self.error {
            View::Error(message)
        } else {
            View::List(&self.movies)
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1 && !self.loading
    }

    pub fn can_go_next(&self) -> bool {
        !self.loading
    }
}

/// The three things the page can show.
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    Loading,
    Error(&'a str),
    List(&'a [Movie]),
}

/// Identifies one fetch cycle. Only the most recently issued ticket may
/// update the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    page: u32,
}

/// Paginated list of popular movies backed by a [`MovieSource`].
pub struct MovieBrowser<S> {
    source: S,
    state: BrowserState,
    last_seq: u64,
}

impl<S: MovieSource> MovieBrowser<S> {
    pub fn new(source: S) -> Self {
        Self::with_page(source, 1)
    }

    pub fn with_page(source: S, page: u32) -> Self {
        Self {
            source,
            state: BrowserState::new(page),
            last_seq: 0,
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn can_go_previous(&self) -> bool {
        self.state.can_go_previous()
    }

    pub fn can_go_next(&self) -> bool {
        self.state.can_go_next()
    }

    /// Start a fetch cycle for the current page.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_seq += 1;
        self.state.loading = true;
        self.state.error = None;
        debug!(page = self.state.page, seq = self.last_seq, "Fetch started");
        FetchTicket {
            seq: self.last_seq,
            page: self.state.page,
        }
    }

    /// Apply the outcome of a fetch cycle. Returns false, leaving the state
    /// alone, when a newer cycle has been started since `ticket` was issued.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<MoviePage, FetchError>,
    ) -> bool {
        if ticket.seq != self.last_seq {
            debug!(
                page = ticket.page,
                seq = ticket.seq,
                latest = self.last_seq,
                "Discarding stale fetch result"
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.state.movies = page.into_movies();
                info!(
                    page = ticket.page,
                    count = self.state.movies.len(),
                    "Movies loaded"
                );
            }
            Err(e) => {
                warn!(page = ticket.page, error = %e, "Movie fetch failed");
                self.state.error = Some(e.to_string());
            }
        }
        self.state.loading = false;
        true
    }

    /// Run one full fetch cycle for the current page.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let result = self.source.fetch_page(ticket.page).await;
        self.complete_fetch(ticket, result);
    }

    /// Initial load.
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Go one page back. Does nothing while the control is disabled.
    pub async fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.state.page -= 1;
        self.refresh().await;
        true
    }

    /// Go one page forward. Does nothing while a fetch is in flight.
    pub async fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.state.page = self.state.page.saturating_add(1);
        self.refresh().await;
        true
    }
}
