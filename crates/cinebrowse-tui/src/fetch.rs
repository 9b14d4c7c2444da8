//! Per-screen fetch state.
//!
//! A screen calls [`FetchState::begin`] before dispatching a request and
//! hands the returned [`FetchTicket`] to the request. The outcome comes
//! back with the same ticket and goes through [`FetchState::complete`],
//! where the configured [`ResponsePolicy`] decides whether it lands.

use serde::{Deserialize, Serialize};

use crate::pagination::{self, PAGE_SIZE, ResultPage};

/// What to do with a response that is not from the latest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponsePolicy {
    /// Every response overwrites state when it arrives.
    #[default]
    LastArrivalWins,
    /// Responses from superseded requests are dropped.
    LatestRequestWins,
}

/// Identifies one dispatched request within a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub(crate) const fn new(generation: u64) -> Self {
        Self { generation }
    }

    /// Generation number of the request.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// Result of applying an outcome to a [`FetchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The list was replaced.
    Replaced,
    /// The request failed; the previous list is kept.
    Failed,
    /// The outcome was stale and ignored.
    Discarded,
}

/// Full result list, page cursor and request flags of one screen.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    items: Vec<T>,
    page: usize,
    loading: bool,
    failed: bool,
    generation: u64,
    policy: ResponsePolicy,
}

impl<T> FetchState<T> {
    /// Creates an empty state.
    #[must_use]
    pub const fn new(policy: ResponsePolicy) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            loading: false,
            failed: false,
            generation: 0,
            policy,
        }
    }

    /// Marks a new request as in flight and returns its ticket.
    ///
    /// The page resets to 1. Requests already in flight are not cancelled.
    pub const fn begin(&mut self) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        self.page = 1;
        FetchTicket::new(self.generation)
    }

    /// Whether `ticket` is from the most recent [`begin`](Self::begin).
    #[must_use]
    pub const fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies a request outcome.
    ///
    /// On success the list is replaced and the page reset to 1. On failure
    /// the previous list is kept and `failed` is set.
    pub fn complete<E>(&mut self, ticket: FetchTicket, outcome: Result<Vec<T>, E>) -> Applied {
        let current = self.is_current(ticket);
        if !current && self.policy == ResponsePolicy::LatestRequestWins {
            return Applied::Discarded;
        }
        if current {
            self.loading = false;
        }
        match outcome {
            Ok(items) => {
                self.items = items;
                self.page = 1;
                self.failed = false;
                Applied::Replaced
            }
            Err(_) => {
                self.failed = true;
                Applied::Failed
            }
        }
    }

    /// Full result list.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the last applied request failed.
    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.failed
    }

    /// Current 1-based page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of pages over the full list.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        pagination::total_pages(self.items.len(), PAGE_SIZE)
    }

    /// Visible window for the current page.
    #[must_use]
    pub fn current_page(&self) -> ResultPage<'_, T> {
        pagination::slice(&self.items, PAGE_SIZE, self.page)
    }

    /// Advances one page, stopping at the last.
    pub fn next_page(&mut self) {
        self.go_to_page(self.page.saturating_add(1));
    }

    /// Goes back one page, stopping at the first.
    pub fn prev_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    /// Jumps to `page`, clamped to `1..=total_pages`.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::new(ResponsePolicy::default())
    }
}
