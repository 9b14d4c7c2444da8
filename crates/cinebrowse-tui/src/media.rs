//! Normalization of TMDB records into display records.
//!
//! Movie, TV, and person records arrive in different shapes. Each shape has
//! its own constructor producing a [`MediaSummary`] tagged with a
//! [`MediaKind`]; list and detail formatting then work on that one shape.

use cinebrowse_api::tmdb::{
    SearchType, TmdbMovieDetails, TmdbMovieRecord, TmdbMultiRecord, TmdbPersonRecord,
    TmdbSearchResults, TmdbTvDetails, TmdbTvRecord,
};

/// Placeholder for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Detail title used when a record carries no title at all.
pub const UNTITLED: &str = "Untitled";

/// Detail overview used when a record carries no overview.
pub const NO_OVERVIEW: &str = "No overview available.";

/// Discriminant for normalized records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// A movie.
    Movie,
    /// A TV series.
    Tv,
    /// A person (shown in multi-search, never browsable).
    Person,
}

/// Screen-level hint for what a list contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    /// Every record is a movie.
    Movie,
    /// Every record is a TV series.
    Tv,
    /// Mixed records; each one's own kind decides.
    Multi,
}

impl From<SearchType> for TypeHint {
    fn from(value: SearchType) -> Self {
        match value {
            SearchType::Multi => Self::Multi,
            SearchType::Movie => Self::Movie,
            SearchType::Tv => Self::Tv,
        }
    }
}

/// Kinds that have a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    /// `movie/{id}`.
    Movie,
    /// `tv/{id}`.
    Tv,
}

impl DetailKind {
    /// Lowercase name used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

/// Navigation payload for opening a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRoute {
    /// TMDB ID.
    pub id: u64,
    /// Which detail endpoint to use.
    pub kind: DetailKind,
    /// Title shown in the header until the detail arrives.
    pub title: String,
}

/// A list entry normalized from any record shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSummary {
    /// TMDB ID.
    pub id: u64,
    /// Record kind.
    pub kind: MediaKind,
    /// Title (movie) or name (TV, person); empty if absent.
    pub display_title: String,
    /// Release or first air date, if known.
    pub release_date: Option<String>,
    /// Poster (or profile) image path.
    pub poster_path: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
}

/// Treats empty strings the same as missing ones.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

/// Zero popularity counts as absent.
fn known_popularity(value: Option<f64>) -> Option<f64> {
    value.filter(|p| *p != 0.0)
}

/// Rounds half away from zero before formatting, so exact ties round up.
fn format_popularity(value: Option<f64>, decimals: u8) -> String {
    known_popularity(value).map_or_else(
        || String::from(NOT_AVAILABLE),
        |p| {
            let scale = 10_f64.powi(i32::from(decimals));
            format!("{:.*}", usize::from(decimals), (p * scale).round() / scale)
        },
    )
}

fn poster_url(image_base_url: &str, path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{image_base_url}{p}"))
}

impl MediaSummary {
    /// Normalizes a movie record.
    #[must_use]
    pub fn from_movie(record: &TmdbMovieRecord) -> Self {
        Self {
            id: record.id,
            kind: MediaKind::Movie,
            display_title: record.title.clone().unwrap_or_default(),
            release_date: non_empty(record.release_date.as_ref()),
            poster_path: record.poster_path.clone(),
            popularity: record.popularity,
        }
    }

    /// Normalizes a TV record.
    #[must_use]
    pub fn from_tv(record: &TmdbTvRecord) -> Self {
        Self {
            id: record.id,
            kind: MediaKind::Tv,
            display_title: record.name.clone().unwrap_or_default(),
            release_date: non_empty(record.first_air_date.as_ref()),
            poster_path: record.poster_path.clone(),
            popularity: record.popularity,
        }
    }

    /// Normalizes a person record.
    #[must_use]
    pub fn from_person(record: &TmdbPersonRecord) -> Self {
        Self {
            id: record.id,
            kind: MediaKind::Person,
            display_title: record.name.clone().unwrap_or_default(),
            release_date: None,
            poster_path: record.profile_path.clone(),
            popularity: record.popularity,
        }
    }

    /// Normalizes a multi-search record. Unknown tags yield `None`.
    #[must_use]
    pub fn from_multi(record: &TmdbMultiRecord) -> Option<Self> {
        match record {
            TmdbMultiRecord::Movie(m) => Some(Self::from_movie(m)),
            TmdbMultiRecord::Tv(t) => Some(Self::from_tv(t)),
            TmdbMultiRecord::Person(p) => Some(Self::from_person(p)),
            TmdbMultiRecord::Other => None,
        }
    }

    /// Release date, or `"N/A"`.
    #[must_use]
    pub fn release_label(&self) -> &str {
        self.release_date.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Popularity rounded to one decimal, or `"N/A"`.
    #[must_use]
    pub fn popularity_label(&self) -> String {
        format_popularity(self.popularity, 1)
    }

    /// Full poster URL; `None` means a placeholder is shown.
    #[must_use]
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        poster_url(image_base_url, self.poster_path.as_deref())
    }

    /// Resolves where selecting this entry navigates to.
    ///
    /// Under [`TypeHint::Multi`] the record's own kind decides, and people
    /// are not navigable.
    #[must_use]
    pub fn navigation_target(&self, hint: TypeHint) -> Option<DetailRoute> {
        let kind = match hint {
            TypeHint::Movie => DetailKind::Movie,
            TypeHint::Tv => DetailKind::Tv,
            TypeHint::Multi => match self.kind {
                MediaKind::Movie => DetailKind::Movie,
                MediaKind::Tv => DetailKind::Tv,
                MediaKind::Person => return None,
            },
        };
        Some(DetailRoute {
            id: self.id,
            kind,
            title: self.display_title.clone(),
        })
    }
}

/// Normalizes search results of any shape, in server order.
#[must_use]
pub fn summaries_from_search(results: &TmdbSearchResults) -> Vec<MediaSummary> {
    match results {
        TmdbSearchResults::Multi(records) => {
            records.iter().filter_map(MediaSummary::from_multi).collect()
        }
        TmdbSearchResults::Movie(records) => records.iter().map(MediaSummary::from_movie).collect(),
        TmdbSearchResults::Tv(records) => records.iter().map(MediaSummary::from_tv).collect(),
    }
}

/// A single movie or TV series as shown on the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaDetail {
    /// TMDB ID.
    pub id: u64,
    /// Movie or TV.
    pub kind: DetailKind,
    /// Title or name, if any.
    pub title: Option<String>,
    /// Release or first air date.
    pub release_date: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Popularity at full precision.
    pub popularity: Option<f64>,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline (movies).
    pub tagline: Option<String>,
    /// Genre names.
    pub genres: Vec<String>,
    /// Release or production status.
    pub status: Option<String>,
    /// Runtime in minutes (movies).
    pub runtime_min: Option<u32>,
    /// Season and episode counts (TV).
    pub seasons: Option<(u32, u32)>,
}

impl MediaDetail {
    /// Builds a detail record from a movie response.
    #[must_use]
    pub fn from_movie(details: &TmdbMovieDetails) -> Self {
        Self {
            id: details.id,
            kind: DetailKind::Movie,
            title: non_empty(details.title.as_ref()),
            release_date: non_empty(details.release_date.as_ref()),
            poster_path: details.poster_path.clone(),
            popularity: details.popularity,
            overview: non_empty(details.overview.as_ref()),
            tagline: non_empty(details.tagline.as_ref()),
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            status: non_empty(details.status.as_ref()),
            runtime_min: details.runtime.filter(|r| *r > 0),
            seasons: None,
        }
    }

    /// Builds a detail record from a TV response.
    #[must_use]
    pub fn from_tv(details: &TmdbTvDetails) -> Self {
        Self {
            id: details.id,
            kind: DetailKind::Tv,
            title: non_empty(details.name.as_ref()),
            release_date: non_empty(details.first_air_date.as_ref()),
            poster_path: details.poster_path.clone(),
            popularity: details.popularity,
            overview: non_empty(details.overview.as_ref()),
            tagline: None,
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            status: non_empty(details.status.as_ref()),
            runtime_min: None,
            seasons: details.number_of_seasons.zip(details.number_of_episodes),
        }
    }

    /// Title, or `"Untitled"`.
    #[must_use]
    pub fn title_label(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Release date, or `"N/A"`.
    #[must_use]
    pub fn release_label(&self) -> &str {
        self.release_date.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Popularity rounded to three decimals, or `"N/A"`.
    #[must_use]
    pub fn popularity_label(&self) -> String {
        format_popularity(self.popularity, 3)
    }

    /// Overview, or a fixed fallback sentence.
    #[must_use]
    pub fn overview_label(&self) -> &str {
        self.overview.as_deref().unwrap_or(NO_OVERVIEW)
    }

    /// Full poster URL; `None` means a placeholder is shown.
    #[must_use]
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        poster_url(image_base_url, self.poster_path.as_deref())
    }

    /// `Popularity: x | Release Date: y` footer line.
    #[must_use]
    pub fn footer_line(&self) -> String {
        format!(
            "Popularity: {} | Release Date: {}",
            self.popularity_label(),
            self.release_label()
        )
    }
}
