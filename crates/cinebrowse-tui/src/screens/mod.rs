//! Per-screen state.
//!
//! Each screen owns its results and page cursor. Nothing is shared between
//! screens; the app routes fetch outcomes to the screen that asked.

mod category;
mod detail;
mod search;

pub use category::CategoryScreen;
pub use detail::{DEFAULT_HEADER, DetailScreen, DetailStatus, MSG_DETAIL_FAILED};
pub use search::SearchScreen;

use ratatui::widgets::TableState;

use crate::fetch::{FetchState, ResponsePolicy};
use crate::media::MediaSummary;

/// Fetched summaries plus the row cursor within the visible page.
#[derive(Debug)]
pub struct ResultList {
    /// Full list and page number.
    pub fetch: FetchState<MediaSummary>,
    /// Row selection within the current page.
    pub table_state: TableState,
}

impl ResultList {
    /// Creates an empty list.
    #[must_use]
    pub fn new(policy: ResponsePolicy) -> Self {
        Self {
            fetch: FetchState::new(policy),
            table_state: TableState::default(),
        }
    }

    /// Row cursor within the current page.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Number of rows on the current page.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.fetch.current_page().items.len()
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn selected(&self) -> Option<&MediaSummary> {
        self.fetch.current_page().items.get(self.cursor())
    }

    /// Moves the cursor up one row.
    pub fn move_up(&mut self) {
        let cursor = self.cursor();
        if cursor > 0 {
            self.table_state.select(Some(cursor.saturating_sub(1)));
        }
    }

    /// Moves the cursor down one row.
    pub fn move_down(&mut self) {
        let next = self.cursor().saturating_add(1);
        if next < self.visible_len() {
            self.table_state.select(Some(next));
        }
    }

    /// Next page.
    pub fn next_page(&mut self) {
        self.fetch.next_page();
        self.reset_cursor();
    }

    /// Previous page.
    pub fn prev_page(&mut self) {
        self.fetch.prev_page();
        self.reset_cursor();
    }

    /// Jumps to a 1-based page.
    pub fn go_to_page(&mut self, page: usize) {
        self.fetch.go_to_page(page);
        self.reset_cursor();
    }

    /// Puts the cursor on the first row, or clears it when there is none.
    pub fn reset_cursor(&mut self) {
        let selected = (self.visible_len() > 0).then_some(0);
        self.table_state.select(selected);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::media::{MediaKind, MediaSummary};

    /// Builds `n` movie summaries with IDs `1..=n`.
    pub fn movies(n: u64) -> Vec<MediaSummary> {
        (1..=n)
            .map(|id| MediaSummary {
                id,
                kind: MediaKind::Movie,
                display_title: format!("Movie {id}"),
                release_date: None,
                poster_path: None,
                popularity: None,
            })
            .collect()
    }
}
