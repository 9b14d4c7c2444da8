//! Detail view for a single movie or TV series.

use crate::fetch::{Applied, FetchTicket};
use crate::media::{DetailRoute, MediaDetail};

/// Header shown when the route carries no title.
pub const DEFAULT_HEADER: &str = "Details";

/// Body text shown when the detail request fails.
pub const MSG_DETAIL_FAILED: &str = "Failed to load details";

/// Load state of the detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    /// Request in flight.
    Loading,
    /// Detail received.
    Loaded(Box<MediaDetail>),
    /// Request failed.
    Failed,
}

/// A detail view pushed on top of the tabs.
#[derive(Debug)]
pub struct DetailScreen {
    route: DetailRoute,
    ticket: FetchTicket,
    status: DetailStatus,
}

impl DetailScreen {
    /// Opens a view for `route`; the request for `ticket` is expected to be
    /// in flight.
    #[must_use]
    pub const fn new(route: DetailRoute, ticket: FetchTicket) -> Self {
        Self {
            route,
            ticket,
            status: DetailStatus::Loading,
        }
    }

    /// Route this view was opened with.
    #[must_use]
    pub const fn route(&self) -> &DetailRoute {
        &self.route
    }

    /// Current load state.
    #[must_use]
    pub const fn status(&self) -> &DetailStatus {
        &self.status
    }

    /// Route title until the detail arrives, then the loaded title.
    #[must_use]
    pub fn header_title(&self) -> &str {
        match &self.status {
            DetailStatus::Loaded(detail) => detail.title_label(),
            DetailStatus::Loading | DetailStatus::Failed => {
                if self.route.title.is_empty() {
                    DEFAULT_HEADER
                } else {
                    &self.route.title
                }
            }
        }
    }

    /// Applies the detail outcome. Outcomes for other tickets are dropped.
    pub fn apply(&mut self, ticket: FetchTicket, result: anyhow::Result<MediaDetail>) -> Applied {
        if ticket != self.ticket {
            return Applied::Discarded;
        }
        match result {
            Ok(detail) => {
                self.status = DetailStatus::Loaded(Box::new(detail));
                Applied::Replaced
            }
            Err(e) => {
                tracing::warn!(
                    id = self.route.id,
                    kind = self.route.kind.as_str(),
                    error = %e,
                    "Failed to load details"
                );
                self.status = DetailStatus::Failed;
                Applied::Failed
            }
        }
    }

    /// Poster URL of the loaded detail.
    #[must_use]
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        match &self.status {
            DetailStatus::Loaded(detail) => detail.poster_url(image_base_url),
            DetailStatus::Loading | DetailStatus::Failed => None,
        }
    }
}
