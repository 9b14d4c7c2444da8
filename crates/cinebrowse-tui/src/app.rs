//! Top-level browser state: tabs, screens and the detail stack.
//!
//! Every state change that needs data returns a [`FetchRequest`]. The
//! caller dispatches it and later feeds the [`FetchOutcome`] back through
//! [`App::apply`].

use cinebrowse_api::tmdb::{
    Category, DEFAULT_IMAGE_BASE_URL, MovieCategory, SearchParams, SearchType, TvCategory,
};

use crate::fetch::{Applied, FetchTicket, ResponsePolicy};
use crate::media::{DetailKind, DetailRoute, MediaDetail, MediaSummary, TypeHint};
use crate::screens::{CategoryScreen, DetailScreen, SearchScreen};

/// Bottom-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Movie categories.
    #[default]
    Movies,
    /// Search form and results.
    Search,
    /// TV categories.
    Tv,
}

impl Tab {
    /// Tabs in display order.
    pub const ALL: [Self; 3] = [Self::Movies, Self::Search, Self::Tv];

    /// Tab title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movies => "Movies",
            Self::Search => "Search Results",
            Self::Tv => "TV Shows",
        }
    }

    /// Position in [`Tab::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Movies => 0,
            Self::Search => 1,
            Self::Tv => 2,
        }
    }

    /// Tab to the right (wrapping).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Movies => Self::Search,
            Self::Search => Self::Tv,
            Self::Tv => Self::Movies,
        }
    }

    /// Tab to the left (wrapping).
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Movies => Self::Tv,
            Self::Search => Self::Movies,
            Self::Tv => Self::Search,
        }
    }
}

/// Which screen a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    /// Movies tab.
    Movies,
    /// Search tab.
    Search,
    /// TV Shows tab.
    Tv,
    /// Detail view.
    Detail,
}

/// A request to be executed against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// `movie/{category}`.
    MovieList {
        /// Screen ticket.
        ticket: FetchTicket,
        /// Category to list.
        category: MovieCategory,
    },
    /// `tv/{category}`.
    TvList {
        /// Screen ticket.
        ticket: FetchTicket,
        /// Category to list.
        category: TvCategory,
    },
    /// `search/{type}`.
    Search {
        /// Screen ticket.
        ticket: FetchTicket,
        /// Query and type.
        params: SearchParams,
    },
    /// `movie/{id}` or `tv/{id}`.
    Details {
        /// Detail ticket.
        ticket: FetchTicket,
        /// TMDB ID.
        id: u64,
        /// Endpoint selector.
        kind: DetailKind,
    },
}

impl FetchRequest {
    /// Screen that issued the request.
    #[must_use]
    pub const fn screen(&self) -> ScreenId {
        match self {
            Self::MovieList { .. } => ScreenId::Movies,
            Self::TvList { .. } => ScreenId::Tv,
            Self::Search { .. } => ScreenId::Search,
            Self::Details { .. } => ScreenId::Detail,
        }
    }

    /// Ticket of the request.
    #[must_use]
    pub const fn ticket(&self) -> FetchTicket {
        match self {
            Self::MovieList { ticket, .. }
            | Self::TvList { ticket, .. }
            | Self::Search { ticket, .. }
            | Self::Details { ticket, .. } => *ticket,
        }
    }
}

/// Data returned by a request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPayload {
    /// List or search results.
    Summaries {
        /// Normalized entries, in server order.
        items: Vec<MediaSummary>,
        /// Search type the request used, for search results.
        search_type: Option<SearchType>,
    },
    /// A single detail record.
    Detail(Box<MediaDetail>),
}

/// A completed request, tagged with where it came from.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Screen that issued the request.
    pub screen: ScreenId,
    /// Ticket of the request.
    pub ticket: FetchTicket,
    /// Payload or error.
    pub result: anyhow::Result<FetchPayload>,
}

/// Startup settings for the browser.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Initial movie category.
    pub movie_category: MovieCategory,
    /// Initial TV category.
    pub tv_category: TvCategory,
    /// Initial search type.
    pub search_type: SearchType,
    /// Stale response handling for every screen.
    pub response_policy: ResponsePolicy,
    /// Prefix for poster paths.
    pub image_base_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            movie_category: MovieCategory::default(),
            tv_category: TvCategory::default(),
            search_type: SearchType::default(),
            response_policy: ResponsePolicy::default(),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
        }
    }
}

/// The browser.
#[derive(Debug)]
pub struct App {
    tab: Tab,
    /// Movies tab.
    pub movies: CategoryScreen<MovieCategory>,
    /// Search tab.
    pub search: SearchScreen,
    /// TV Shows tab.
    pub tv: CategoryScreen<TvCategory>,
    detail: Option<DetailScreen>,
    detail_generation: u64,
    image_base_url: String,
}

impl App {
    /// Creates the browser on the Movies tab. Nothing is mounted yet.
    #[must_use]
    pub fn new(settings: AppSettings) -> Self {
        let policy = settings.response_policy;
        Self {
            tab: Tab::default(),
            movies: CategoryScreen::new(settings.movie_category, TypeHint::Movie, policy),
            search: SearchScreen::new(settings.search_type, policy),
            tv: CategoryScreen::new(settings.tv_category, TypeHint::Tv, policy),
            detail: None,
            detail_generation: 0,
            image_base_url: settings.image_base_url,
        }
    }

    /// Active tab.
    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    /// Open detail view, if any.
    #[must_use]
    pub const fn detail(&self) -> Option<&DetailScreen> {
        self.detail.as_ref()
    }

    /// Poster URL prefix.
    #[must_use]
    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    /// Mounts the active tab. Only the first call per tab fetches.
    pub fn mount_current(&mut self) -> Option<FetchRequest> {
        match self.tab {
            Tab::Movies => self.movies.mount().map(|ticket| FetchRequest::MovieList {
                ticket,
                category: self.movies.category(),
            }),
            Tab::Tv => self.tv.mount().map(|ticket| FetchRequest::TvList {
                ticket,
                category: self.tv.category(),
            }),
            Tab::Search => None,
        }
    }

    /// Switches tab and mounts it.
    pub fn select_tab(&mut self, tab: Tab) -> Option<FetchRequest> {
        self.tab = tab;
        self.mount_current()
    }

    /// Switches to the tab on the right.
    pub fn next_tab(&mut self) -> Option<FetchRequest> {
        self.select_tab(self.tab.next())
    }

    /// Switches to the tab on the left.
    pub fn prev_tab(&mut self) -> Option<FetchRequest> {
        self.select_tab(self.tab.prev())
    }

    /// Advances the category of a list tab, or the type selector on the
    /// search tab. Changing the search type does not search.
    pub fn next_category(&mut self) -> Option<FetchRequest> {
        match self.tab {
            Tab::Movies => Some(self.movie_request(CategoryScreen::next_category)),
            Tab::Tv => Some(self.tv_request(CategoryScreen::next_category)),
            Tab::Search => {
                self.search.form.cycle_type();
                None
            }
        }
    }

    /// Reverse of [`next_category`](Self::next_category).
    pub fn prev_category(&mut self) -> Option<FetchRequest> {
        match self.tab {
            Tab::Movies => Some(self.movie_request(CategoryScreen::prev_category)),
            Tab::Tv => Some(self.tv_request(CategoryScreen::prev_category)),
            Tab::Search => {
                let prev = self.search.form.search_type().prev();
                self.search.form.set_search_type(prev);
                None
            }
        }
    }

    /// Reloads the current category of a list tab.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        match self.tab {
            Tab::Movies => Some(self.movie_request(CategoryScreen::refresh)),
            Tab::Tv => Some(self.tv_request(CategoryScreen::refresh)),
            Tab::Search => None,
        }
    }

    /// Submits the search form. Blank input yields no request.
    pub fn submit_search(&mut self) -> Option<FetchRequest> {
        let (query, ticket) = self.search.submit()?;
        tracing::debug!(
            query = %query.text,
            search_type = %query.search_type,
            "Search submitted"
        );
        Some(FetchRequest::Search {
            ticket,
            params: query.to_params(),
        })
    }

    /// Opens the detail view for the selected entry of the active tab.
    pub fn open_selected(&mut self) -> Option<FetchRequest> {
        let route = match self.tab {
            Tab::Movies => self.movies.open_selected(),
            Tab::Search => self.search.open_selected(),
            Tab::Tv => self.tv.open_selected(),
        }?;
        Some(self.open_detail(route))
    }

    /// Pushes a detail view and returns its request.
    pub fn open_detail(&mut self, route: DetailRoute) -> FetchRequest {
        self.detail_generation = self.detail_generation.wrapping_add(1);
        let ticket = FetchTicket::new(self.detail_generation);
        let request = FetchRequest::Details {
            ticket,
            id: route.id,
            kind: route.kind,
        };
        self.detail = Some(DetailScreen::new(route, ticket));
        request
    }

    /// Pops the detail view. Its pending request is ignored when it lands.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Routes an outcome to the screen that requested it.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        let FetchOutcome {
            screen,
            ticket,
            result,
        } = outcome;
        match screen {
            ScreenId::Movies => self.movies.apply(ticket, result.and_then(into_summaries)),
            ScreenId::Tv => self.tv.apply(ticket, result.and_then(into_summaries)),
            ScreenId::Search => {
                let search_type = match &result {
                    Ok(FetchPayload::Summaries {
                        search_type: Some(t),
                        ..
                    }) => *t,
                    _ => self.search.form.search_type(),
                };
                self.search
                    .apply(ticket, search_type, result.and_then(into_summaries))
            }
            ScreenId::Detail => {
                let Some(detail) = self.detail.as_mut() else {
                    tracing::debug!("Detail view closed before its response arrived");
                    return Applied::Discarded;
                };
                detail.apply(ticket, result.and_then(into_detail))
            }
        }
    }

    fn movie_request(
        &mut self,
        f: impl FnOnce(&mut CategoryScreen<MovieCategory>) -> FetchTicket,
    ) -> FetchRequest {
        let ticket = f(&mut self.movies);
        FetchRequest::MovieList {
            ticket,
            category: self.movies.category(),
        }
    }

    fn tv_request(
        &mut self,
        f: impl FnOnce(&mut CategoryScreen<TvCategory>) -> FetchTicket,
    ) -> FetchRequest {
        let ticket = f(&mut self.tv);
        FetchRequest::TvList {
            ticket,
            category: self.tv.category(),
        }
    }
}

fn into_summaries(payload: FetchPayload) -> anyhow::Result<Vec<MediaSummary>> {
    match payload {
        FetchPayload::Summaries { items, .. } => Ok(items),
        FetchPayload::Detail(_) => {
            anyhow::bail!("expected a result list, got a detail record")
        }
    }
}

fn into_detail(payload: FetchPayload) -> anyhow::Result<MediaDetail> {
    match payload {
        FetchPayload::Detail(detail) => Ok(*detail),
        FetchPayload::Summaries { .. } => {
            anyhow::bail!("expected a detail record, got a result list")
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use anyhow::anyhow;

    use super::*;
    use crate::screens::DetailStatus;
    use crate::screens::test_support::movies;

    fn summaries(n: u64) -> anyhow::Result<FetchPayload> {
        Ok(FetchPayload::Summaries {
            items: movies(n),
            search_type: None,
        })
    }

    fn detail_payload(id: u64) -> anyhow::Result<FetchPayload> {
        Ok(FetchPayload::Detail(Box::new(MediaDetail {
            id,
            kind: DetailKind::Movie,
            title: Some(String::from("Loaded")),
            release_date: None,
            poster_path: None,
            popularity: None,
            overview: None,
            tagline: None,
            genres: Vec::new(),
            status: None,
            runtime_min: None,
            seasons: None,
        })))
    }

    #[test]
    fn test_initial_mount_requests_default_movie_category() {
        // Arrange
        let mut app = App::new(AppSettings::default());

        // Act
        let request = app.mount_current().unwrap();

        // Assert
        assert!(matches!(
            request,
            FetchRequest::MovieList {
                category: MovieCategory::Popular,
                ..
            }
        ));
        assert_eq!(request.screen(), ScreenId::Movies);
        assert!(app.mount_current().is_none());
    }

    #[test]
    fn test_tabs_mount_once_and_search_never_autoloads() {
        // Arrange
        let mut app = App::new(AppSettings::default());
        let _ = app.mount_current();

        // Act
        let search = app.next_tab();
        let tv = app.next_tab();
        let movies = app.next_tab();
        let tv_again = app.prev_tab();

        // Assert
        assert!(search.is_none());
        assert!(matches!(
            tv,
            Some(FetchRequest::TvList {
                category: TvCategory::Popular,
                ..
            })
        ));
        assert!(movies.is_none());
        assert!(tv_again.is_none());
        assert_eq!(app.tab(), Tab::Tv);
    }

    #[test]
    fn test_outcome_routed_to_requesting_screen() {
        // Arrange
        let mut app = App::new(AppSettings::default());
        let movies_req = app.mount_current().unwrap();
        let tv_req = app.select_tab(Tab::Tv).unwrap();

        // Act
        app.apply(FetchOutcome {
            screen: movies_req.screen(),
            ticket: movies_req.ticket(),
            result: summaries(12),
        });
        app.apply(FetchOutcome {
            screen: tv_req.screen(),
            ticket: tv_req.ticket(),
            result: summaries(3),
        });

        // Assert
        assert_eq!(app.movies.list.fetch.items().len(), 12);
        assert_eq!(app.tv.list.fetch.items().len(), 3);
    }

    #[test]
    fn test_search_tab_category_keys_change_type_only() {
        // Arrange
        let mut app = App::new(AppSettings::default());
        let _ = app.select_tab(Tab::Search);

        // Act
        let next = app.next_category();
        let prev = app.prev_category();
        let prev_again = app.prev_category();

        // Assert
        assert!(next.is_none());
        assert!(prev.is_none());
        assert!(prev_again.is_none());
        assert_eq!(app.search.form.search_type(), SearchType::Tv);
        assert!(!app.search.list.fetch.is_loading());
    }

    #[test]
    fn test_blank_search_yields_no_request() {
        // Arrange
        let mut app = App::new(AppSettings::default());
        let _ = app.select_tab(Tab::Search);

        // Act
        let request = app.submit_search();

        // Assert
        assert!(request.is_none());
        assert!(app.search.form.show_validation_error());
    }

    #[test]
    fn test_search_request_carries_text_and_type() {
        // Arrange
        let mut app = App::new(AppSettings {
            search_type: SearchType::Movie,
            ..AppSettings::default()
        });
        app.search.form.set_text("James Bond");

        // Act
        let request = app.submit_search().unwrap();

        // Assert
        let FetchRequest::Search { params, .. } = request else {
            panic!("expected search request");
        };
        assert_eq!(params, SearchParams::new("James Bond", SearchType::Movie));
    }

    #[test]
    fn test_refresh_redispatches_current_category() {
        // Arrange
        let mut app = App::new(AppSettings::default());
        let first = app.mount_current().unwrap();
        let _ = app.next_category();

        // Act
        let refreshed = app.refresh().unwrap();

        // Assert
        assert_ne!(first.ticket(), refreshed.ticket());
        assert!(matches!(
            refreshed,
            FetchRequest::MovieList {
                category: MovieCategory::TopRated,
                ..
            }
        ));
    }

    #[test]
    fn test_detail_lifecycle() {
        // Arrange
        let mut app = App::new(AppSettings::default());
        let list = app.mount_current().unwrap();
        app.apply(FetchOutcome {
            screen: list.screen(),
            ticket: list.ticket(),
            result: summaries(3),
        });

        // Act
        let request = app.open_selected().unwrap();
        let applied = app.apply(FetchOutcome {
            screen: request.screen(),
            ticket: request.ticket(),
            result: detail_payload(1),
        });

        // Assert
        assert!(matches!(
            request,
            FetchRequest::Details {
                id: 1,
                kind: DetailKind::Movie,
                ..
            }
        ));
        assert_eq!(applied, Applied::Replaced);
        let detail = app.detail().unwrap();
        assert_eq!(detail.header_title(), "Loaded");
        assert!(matches!(detail.status(), DetailStatus::Loaded(_)));
    }

    #[test]
    fn test_detail_response_after_close_is_discarded() {
        // Arrange
        let mut app = App::new(AppSettings::default());
        let request = app.open_detail(DetailRoute {
            id: 1399,
            kind: DetailKind::Tv,
            title: String::from("Game of Thrones"),
        });
        app.close_detail();

        // Act
        let applied = app.apply(FetchOutcome {
            screen: request.screen(),
            ticket: request.ticket(),
            result: detail_payload(1399),
        });

        // Assert
        assert_eq!(applied, Applied::Discarded);
        assert!(app.detail().is_none());
    }

    #[test]
    fn test_response_for_previous_detail_is_discarded() {
        // Arrange
        let mut app = App::new(AppSettings::default());
        let first = app.open_detail(DetailRoute {
            id: 1,
            kind: DetailKind::Movie,
            title: String::from("First"),
        });
        app.close_detail();
        let _second = app.open_detail(DetailRoute {
            id: 2,
            kind: DetailKind::Movie,
            title: String::from("Second"),
        });

        // Act
        let applied = app.apply(FetchOutcome {
            screen: first.screen(),
            ticket: first.ticket(),
            result: detail_payload(1),
        });

        // Assert
        assert_eq!(applied, Applied::Discarded);
        assert_eq!(app.detail().unwrap().header_title(), "Second");
    }

    #[test]
    fn test_list_failure_is_silent() {
        // Arrange
        let mut app = App::new(AppSettings::default());
        let request = app.mount_current().unwrap();

        // Act
        let applied = app.apply(FetchOutcome {
            screen: request.screen(),
            ticket: request.ticket(),
            result: Err(anyhow!("HTTP 500")),
        });

        // Assert
        assert_eq!(applied, Applied::Failed);
        assert!(app.movies.list.fetch.items().is_empty());
        assert!(!app.movies.list.fetch.is_loading());
    }

    #[test]
    fn test_tab_labels() {
        // Arrange & Act
        let labels: Vec<&str> = Tab::ALL.iter().map(|t| t.label()).collect();

        // Assert
        assert_eq!(labels, vec!["Movies", "Search Results", "TV Shows"]);
    }
}
