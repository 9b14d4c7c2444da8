//! Search form validation and status messages.

use cinebrowse_api::tmdb::{Category, SearchParams, SearchType};

/// Shown when a blank query is submitted.
pub const MSG_QUERY_REQUIRED: &str = "Movie/TV show name is required";
/// Shown when the search request fails.
pub const MSG_SEARCH_FAILED: &str = "Search failed. Please try again.";
/// Shown before the first search.
pub const MSG_INITIATE_SEARCH: &str = "Please initiate a search";
/// Shown after a search that returned nothing.
pub const MSG_NO_RESULTS: &str = "No results found";
/// Hint line shown while there is no error.
pub const MSG_SELECT_TYPE: &str = "Please select a search type";

/// A validated-or-not search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw text as typed.
    pub text: String,
    /// Endpoint selector.
    pub search_type: SearchType,
}

impl SearchQuery {
    /// Creates a query.
    pub fn new(text: impl Into<String>, search_type: SearchType) -> Self {
        Self {
            text: text.into(),
            search_type,
        }
    }

    /// A query is valid iff its trimmed text is non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Request parameters. The text is sent as typed.
    #[must_use]
    pub fn to_params(&self) -> SearchParams {
        SearchParams::new(self.text.clone(), self.search_type)
    }

    /// Checks the query, returning the user-facing message on failure.
    ///
    /// # Errors
    ///
    /// Returns [`MSG_QUERY_REQUIRED`] when the text is blank.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(MSG_QUERY_REQUIRED)
        }
    }
}

/// Input and validation flags of the search screen.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    text: String,
    search_type: SearchType,
    error_message: Option<&'static str>,
    show_validation_error: bool,
    has_searched: bool,
}

impl SearchForm {
    /// Creates an empty form with the given initial search type.
    #[must_use]
    pub fn new(search_type: SearchType) -> Self {
        Self {
            search_type,
            ..Self::default()
        }
    }

    /// Current input text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Selected search type.
    #[must_use]
    pub const fn search_type(&self) -> SearchType {
        self.search_type
    }

    /// Current error message, if any.
    #[must_use]
    pub const fn error_message(&self) -> Option<&'static str> {
        self.error_message
    }

    /// Whether the input should be highlighted as invalid.
    #[must_use]
    pub const fn show_validation_error(&self) -> bool {
        self.show_validation_error
    }

    /// Whether any search has been dispatched.
    #[must_use]
    pub const fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Replaces the text. Any visible error is cleared.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.clear_error();
    }

    /// Appends one character.
    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
        self.clear_error();
    }

    /// Removes the last character.
    pub fn pop_char(&mut self) {
        self.text.pop();
        self.clear_error();
    }

    /// Selects the next search type. Does not dispatch.
    pub fn cycle_type(&mut self) {
        self.search_type = self.search_type.next();
    }

    /// Selects a specific search type. Does not dispatch.
    pub const fn set_search_type(&mut self, search_type: SearchType) {
        self.search_type = search_type;
    }

    /// Validates and, on success, returns the query to dispatch.
    ///
    /// A blank query sets the validation error and leaves `has_searched`
    /// untouched.
    pub fn submit(&mut self) -> Option<SearchQuery> {
        let query = SearchQuery::new(self.text.clone(), self.search_type);
        match query.validate() {
            Ok(()) => {
                self.clear_error();
                self.has_searched = true;
                Some(query)
            }
            Err(msg) => {
                self.error_message = Some(msg);
                self.show_validation_error = true;
                None
            }
        }
    }

    /// Records a failed search request.
    pub const fn fail(&mut self) {
        self.error_message = Some(MSG_SEARCH_FAILED);
    }

    /// Message for the area below the input.
    #[must_use]
    pub fn status_line(&self) -> &'static str {
        self.error_message.unwrap_or(MSG_SELECT_TYPE)
    }

    /// Message shown in place of an empty result list, if any.
    #[must_use]
    pub const fn empty_message(&self, result_count: usize, loading: bool) -> Option<&'static str> {
        if !self.has_searched {
            Some(MSG_INITIATE_SEARCH)
        } else if result_count == 0 && !loading {
            Some(MSG_NO_RESULTS)
        } else {
            None
        }
    }

    const fn clear_error(&mut self) {
        self.error_message = None;
        self.show_validation_error = false;
    }
}
