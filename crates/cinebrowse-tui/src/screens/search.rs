//! Search Results screen.

use cinebrowse_api::tmdb::SearchType;

use super::ResultList;
use crate::fetch::{Applied, FetchTicket, ResponsePolicy};
use crate::media::{DetailRoute, MediaSummary, TypeHint};
use crate::search_form::{SearchForm, SearchQuery};

/// Search form plus its result list.
#[derive(Debug)]
pub struct SearchScreen {
    /// Input and validation state.
    pub form: SearchForm,
    /// Results and cursor.
    pub list: ResultList,
    /// Whether keystrokes go to the text input.
    pub editing: bool,
    results_hint: TypeHint,
}

impl SearchScreen {
    /// Creates an idle screen. Nothing is fetched until a search is submitted.
    #[must_use]
    pub fn new(search_type: SearchType, policy: ResponsePolicy) -> Self {
        Self {
            form: SearchForm::new(search_type),
            list: ResultList::new(policy),
            editing: false,
            results_hint: TypeHint::from(search_type),
        }
    }

    /// Validates the form and starts a fetch when the query is valid.
    pub fn submit(&mut self) -> Option<(SearchQuery, FetchTicket)> {
        let query = self.form.submit()?;
        self.editing = false;
        let ticket = self.list.fetch.begin();
        self.list.reset_cursor();
        Some((query, ticket))
    }

    /// Applies a search outcome.
    ///
    /// `search_type` is the type the request was made with; it becomes the
    /// navigation hint for the new results.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        search_type: SearchType,
        result: anyhow::Result<Vec<MediaSummary>>,
    ) -> Applied {
        let applied = match result {
            Ok(items) => self.list.fetch.complete::<()>(ticket, Ok(items)),
            Err(e) => {
                let applied = self.list.fetch.complete(ticket, Err(()));
                if applied == Applied::Failed {
                    tracing::warn!(error = %e, "Failed to search");
                    self.form.fail();
                }
                applied
            }
        };
        if applied == Applied::Replaced {
            self.results_hint = TypeHint::from(search_type);
            self.list.reset_cursor();
        }
        applied
    }

    /// Message drawn in place of the result table, if any.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.form
            .empty_message(self.list.fetch.items().len(), self.list.fetch.is_loading())
    }

    /// Detail route for the entry under the cursor.
    #[must_use]
    pub fn open_selected(&self) -> Option<DetailRoute> {
        self.list.selected()?.navigation_target(self.results_hint)
    }
}
