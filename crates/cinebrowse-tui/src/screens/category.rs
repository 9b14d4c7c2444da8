//! Movies and TV Shows screens.

use cinebrowse_api::tmdb::Category;

use super::ResultList;
use crate::fetch::{Applied, FetchTicket, ResponsePolicy};
use crate::media::{DetailRoute, MediaSummary, TypeHint};

/// A list screen browsing one category at a time.
#[derive(Debug)]
pub struct CategoryScreen<C> {
    category: C,
    hint: TypeHint,
    mounted: bool,
    /// Results and cursor.
    pub list: ResultList,
}

impl<C: Category> CategoryScreen<C> {
    /// Creates an unmounted screen.
    #[must_use]
    pub fn new(category: C, hint: TypeHint, policy: ResponsePolicy) -> Self {
        Self {
            category,
            hint,
            mounted: false,
            list: ResultList::new(policy),
        }
    }

    /// Selected category.
    #[must_use]
    pub const fn category(&self) -> C {
        self.category
    }

    /// Navigation hint for the entries of this screen.
    #[must_use]
    pub const fn hint(&self) -> TypeHint {
        self.hint
    }

    /// First display. Returns a ticket only the first time.
    pub fn mount(&mut self) -> Option<FetchTicket> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(self.begin())
    }

    /// Switches category and starts a fetch for it.
    ///
    /// Re-selecting the current category fetches again.
    pub fn select_category(&mut self, category: C) -> FetchTicket {
        self.category = category;
        self.begin()
    }

    /// Selects the next category.
    pub fn next_category(&mut self) -> FetchTicket {
        self.select_category(self.category.next())
    }

    /// Selects the previous category.
    pub fn prev_category(&mut self) -> FetchTicket {
        self.select_category(self.category.prev())
    }

    /// Re-fetches the current category.
    pub fn refresh(&mut self) -> FetchTicket {
        self.begin()
    }

    /// Applies a list outcome. Failures are logged and otherwise silent.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: anyhow::Result<Vec<MediaSummary>>,
    ) -> Applied {
        let applied = match result {
            Ok(items) => self.list.fetch.complete::<()>(ticket, Ok(items)),
            Err(e) => {
                let applied = self.list.fetch.complete(ticket, Err(()));
                if applied == Applied::Failed {
                    tracing::warn!(
                        category = self.category.path_segment(),
                        error = %e,
                        "Failed to load list"
                    );
                }
                applied
            }
        };
        match applied {
            Applied::Replaced => self.list.reset_cursor(),
            Applied::Discarded => tracing::debug!(
                generation = ticket.generation(),
                "Discarded stale list response"
            ),
            Applied::Failed => {}
        }
        applied
    }

    /// Detail route for the entry under the cursor.
    #[must_use]
    pub fn open_selected(&self) -> Option<DetailRoute> {
        self.list.selected()?.navigation_target(self.hint)
    }

    fn begin(&mut self) -> FetchTicket {
        let ticket = self.list.fetch.begin();
        self.list.reset_cursor();
        ticket
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use anyhow::anyhow;
    use cinebrowse_api::tmdb::{MovieCategory, TvCategory};

    use super::super::test_support::movies;
    use super::*;
    use crate::media::DetailKind;

    fn movie_screen() -> CategoryScreen<MovieCategory> {
        CategoryScreen::new(
            MovieCategory::Popular,
            TypeHint::Movie,
            ResponsePolicy::LastArrivalWins,
        )
    }

    #[test]
    fn test_mount_fetches_once() {
        // Arrange
        let mut screen = movie_screen();

        // Act
        let first = screen.mount();
        let second = screen.mount();

        // Assert
        assert!(first.is_some());
        assert!(second.is_none());
        assert!(screen.list.fetch.is_loading());
    }

    #[test]
    fn test_category_change_resets_page() {
        // Arrange
        let mut screen = movie_screen();
        let ticket = screen.mount().unwrap();
        screen.apply(ticket, Ok(movies(25)));
        screen.list.go_to_page(3);

        // Act
        let _ = screen.select_category(MovieCategory::TopRated);

        // Assert
        assert_eq!(screen.category(), MovieCategory::TopRated);
        assert_eq!(screen.list.fetch.page(), 1);
    }

    #[test]
    fn test_reselecting_same_category_refetches() {
        // Arrange
        let mut screen = movie_screen();
        let first = screen.mount().unwrap();

        // Act
        let second = screen.select_category(MovieCategory::Popular);

        // Assert
        assert_ne!(first, second);
        assert!(screen.list.fetch.is_current(second));
    }

    #[test]
    fn test_failure_keeps_list_and_shows_nothing() {
        // Arrange
        let mut screen = movie_screen();
        let ticket = screen.mount().unwrap();
        screen.apply(ticket, Ok(movies(4)));
        let retry = screen.refresh();

        // Act
        let applied = screen.apply(retry, Err(anyhow!("connection reset")));

        // Assert
        assert_eq!(applied, Applied::Failed);
        assert_eq!(screen.list.fetch.items().len(), 4);
        assert!(screen.list.fetch.has_failed());
    }

    #[test]
    fn test_failure_logs_warning() {
        use tracing::subscriber::with_default;
        use tracing_mock::{expect, subscriber};

        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .event(
                expect::event()
                    .at_level(tracing::Level::WARN)
                    .with_fields(expect::msg("Failed to load list")),
            )
            .only()
            .run_with_handle();
        let mut screen = movie_screen();
        let ticket = screen.mount().unwrap();

        // Act
        with_default(subscriber, || {
            screen.apply(ticket, Err(anyhow!("HTTP 503")));
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_open_selected_uses_screen_hint() {
        // Arrange
        let mut screen = CategoryScreen::new(
            TvCategory::Popular,
            TypeHint::Tv,
            ResponsePolicy::default(),
        );
        let ticket = screen.mount().unwrap();
        screen.apply(ticket, Ok(movies(2)));
        screen.list.move_down();

        // Act
        let route = screen.open_selected().unwrap();

        // Assert
        assert_eq!(route.id, 2);
        assert_eq!(route.kind, DetailKind::Tv);
    }

    #[test]
    fn test_stale_category_response_under_each_policy() {
        for (policy, expected_len) in [
            (ResponsePolicy::LastArrivalWins, 3),
            (ResponsePolicy::LatestRequestWins, 7),
        ] {
            // Arrange
            let mut screen =
                CategoryScreen::new(MovieCategory::Popular, TypeHint::Movie, policy);
            let popular = screen.mount().unwrap();
            let top_rated = screen.select_category(MovieCategory::TopRated);

            // Act
            screen.apply(top_rated, Ok(movies(7)));
            screen.apply(popular, Ok(movies(3)));

            // Assert
            assert_eq!(screen.list.fetch.items().len(), expected_len, "{policy:?}");
            assert_eq!(screen.category(), MovieCategory::TopRated);
        }
    }
}
