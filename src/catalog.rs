use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, trace, warn};

use crate::api::CatalogApi;
use crate::error::{unpack_error, ApiError};
use crate::models::{Book, BookId, Genre};
use crate::tally::ReviewTally;
use crate::utils::{FutureUtil, PinFuture};

/// Where a click on a book card started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Card,
    TextInput,
    Select,
}

impl Origin {
    /// Clicks inside the review form must not fold the card away.
    pub fn is_form_control(&self) -> bool {
        matches!(self, Origin::TextInput | Origin::Select)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Expanded,
    Collapsed,
    Suppressed,
    /// The id belongs to no listed card; nothing changed.
    Unknown,
}

/// Handed out by [`CatalogView::begin_select`]; only the newest ticket may
/// change the book list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    genre: Genre,
}

impl FetchTicket {
    pub fn genre(&self) -> Genre {
        self.genre
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Replaced(usize),
    Stale,
    Failed,
}

/// Books for the active genre, plus which of them is open for review.
#[derive(Debug)]
pub struct CatalogView {
    genre: Genre,
    books: Vec<Book>,
    tally: ReviewTally,
    expanded: Option<BookId>,
    generation: u64,
}

impl CatalogView {
    pub fn new(count_max_age: Duration) -> CatalogView {
        CatalogView {
            genre: Genre::default(),
            books: vec![],
            tally: ReviewTally::new(count_max_age),
            expanded: None,
            generation: 0,
        }
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn expanded(&self) -> Option<&BookId> {
        self.expanded.as_ref()
    }

    pub fn tally(&self) -> &ReviewTally {
        &self.tally
    }

    pub fn review_count(&self, id: &BookId) -> u32 {
        self.tally.submitted(id)
    }

    /// Makes `genre` the active selection and supersedes any fetch still in flight.
    pub fn begin_select(&mut self, genre: Genre) -> FetchTicket {
        self.genre = genre;
        self.generation += 1;

        info!("genre {} selected (generation {})", genre, self.generation);

        FetchTicket {
            generation: self.generation,
            genre,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies a finished fetch. Results for a superseded ticket are dropped,
    /// failures leave the current list in place.
    pub fn apply(&mut self, ticket: FetchTicket, result: Result<Vec<Book>, ApiError>) -> Applied {
        if !self.is_current(&ticket) {
            debug!(
                "discarding {} results from generation {}, current is {}",
                ticket.genre, ticket.generation, self.generation
            );
            return Applied::Stale;
        }

        match result {
            Ok(books) => {
                self.tally.seed(books.iter().map(|b| &b.id));

                let delisted = self
                    .expanded
                    .as_ref()
                    .filter(|id| !books.iter().any(|b| &b.id == *id))
                    .cloned();
                if let Some(id) = delisted {
                    debug!("{} is not listed under {}, collapsing", id, ticket.genre);
                    self.expanded = None;
                }

                let n = books.len();
                self.books = books;
                info!("{} books listed for {}", n, ticket.genre);

                Applied::Replaced(n)
            }
            Err(err) => {
                warn!(
                    "catalog fetch for {} failed: {}",
                    ticket.genre,
                    unpack_error(&err)
                );
                Applied::Failed
            }
        }
    }

    /// Selects and fetches in one go.
    pub async fn select_genre(&mut self, api: &Arc<dyn CatalogApi>, genre: Genre) -> Applied {
        let ticket = self.begin_select(genre);
        let result = fetch_books(api.clone(), genre).await;

        self.apply(ticket, result)
    }

    pub fn toggle_expansion(&mut self, id: &BookId, origin: Origin) -> Toggle {
        if origin.is_form_control() {
            trace!("click on {} came from a form control, ignoring", id);
            return Toggle::Suppressed;
        }

        if !self.books.iter().any(|b| &b.id == id) {
            debug!("{} is not listed under {}, nothing to expand", id, self.genre);
            return Toggle::Unknown;
        }

        if self.expanded.as_ref() == Some(id) {
            self.expanded = None;
            Toggle::Collapsed
        } else {
            self.expanded = Some(id.clone());
            Toggle::Expanded
        }
    }

    pub fn record_review_submitted(&mut self, id: &BookId) -> u32 {
        self.tally.record_submitted(id)
    }

    pub fn refresh_review_count(&mut self, id: &BookId, count: usize) {
        self.tally.observe(id, count);
    }
}

/// Fetches every subject `genre` covers concurrently and concatenates the
/// results in subject order.
pub async fn fetch_books(api: Arc<dyn CatalogApi>, genre: Genre) -> Result<Vec<Book>, ApiError> {
    let futures: Vec<PinFuture<Vec<Book>, ApiError>> = genre
        .subjects()
        .into_iter()
        .map(|subject| {
            let api = api.clone();
            let future: PinFuture<Vec<Book>, ApiError> =
                Box::pin(async move { api.search(subject).await });
            future
        })
        .collect();

    let per_subject = futures.await_futures().await?;

    Ok(per_subject.into_iter().flatten().collect())
}
