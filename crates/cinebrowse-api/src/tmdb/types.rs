//! TMDB API response types and search parameters.

use serde::Deserialize;

use super::category::SearchType;

// --- Lists ---

/// Envelope shared by list and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbListResponse<T> {
    /// Server-side page number (always 1 for this client).
    #[serde(default)]
    pub page: u32,
    /// Records on this server page.
    pub results: Vec<T>,
    /// Total number of server pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A movie as returned by `movie/{category}` and `search/movie`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TmdbMovieRecord {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    pub release_date: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Overview text.
    pub overview: Option<String>,
}

/// A TV series as returned by `tv/{category}` and `search/tv`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TmdbTvRecord {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: Option<String>,
    /// First air date (YYYY-MM-DD, may be empty).
    pub first_air_date: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Overview text.
    pub overview: Option<String>,
}

/// A person as returned by `search/multi`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TmdbPersonRecord {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
}

/// A `search/multi` result, discriminated by its `media_type` tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "media_type", rename_all = "snake_case")]
pub enum TmdbMultiRecord {
    /// Movie result.
    Movie(TmdbMovieRecord),
    /// TV result.
    Tv(TmdbTvRecord),
    /// Person result.
    Person(TmdbPersonRecord),
    /// Any tag this client does not know.
    #[serde(other)]
    Other,
}

/// Search results in the shape of the requested search type.
#[derive(Debug, Clone, PartialEq)]
pub enum TmdbSearchResults {
    /// `search/multi` results.
    Multi(Vec<TmdbMultiRecord>),
    /// `search/movie` results.
    Movie(Vec<TmdbMovieRecord>),
    /// `search/tv` results.
    Tv(Vec<TmdbTvRecord>),
}

impl TmdbSearchResults {
    /// Number of records, regardless of shape.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Multi(r) => r.len(),
            Self::Movie(r) => r.len(),
            Self::Tv(r) => r.len(),
        }
    }

    /// Whether the search returned nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// --- Details ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `movie/{movie_id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: Option<String>,
    /// Release date.
    pub release_date: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Release status (e.g., "Released").
    pub status: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

/// Response from `tv/{series_id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TmdbTvDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: Option<String>,
    /// First air date.
    pub first_air_date: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Overview text.
    pub overview: Option<String>,
    /// Total number of seasons.
    pub number_of_seasons: Option<u32>,
    /// Total number of episodes.
    pub number_of_episodes: Option<u32>,
    /// Status (e.g., "Returning Series", "Ended").
    pub status: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    #[allow(dead_code)]
    pub success: bool,
}

// --- Search Parameters ---

/// Parameters for `search/{type}` endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Search query (required).
    pub query: String,
    /// Which search endpoint to hit.
    pub search_type: SearchType,
    /// Include adult content (always `false` from the browser).
    pub include_adult: bool,
}

impl SearchParams {
    /// Creates new search params with the given query and type.
    pub fn new(query: impl Into<String>, search_type: SearchType) -> Self {
        Self {
            query: query.into(),
            search_type,
            include_adult: false,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_multi_record_dispatches_on_media_type() {
        // Arrange
        let json = r#"[
            {"media_type":"movie","id":1,"title":"Dune","release_date":"2021-10-22"},
            {"media_type":"tv","id":2,"name":"Dune: Prophecy","first_air_date":"2024-11-17"},
            {"media_type":"person","id":3,"name":"Denis Villeneuve","known_for_department":"Directing"}
        ]"#;

        // Act
        let records: Vec<TmdbMultiRecord> = serde_json::from_str(json).unwrap();

        // Assert
        assert!(matches!(&records[0], TmdbMultiRecord::Movie(m) if m.title.as_deref() == Some("Dune")));
        assert!(matches!(&records[1], TmdbMultiRecord::Tv(t) if t.id == 2));
        assert!(matches!(&records[2], TmdbMultiRecord::Person(p) if p.name.as_deref() == Some("Denis Villeneuve")));
    }

    #[test]
    fn test_multi_record_unknown_tag_is_other() {
        // Arrange
        let json = r#"{"media_type":"collection","id":9,"name":"Dune Collection"}"#;

        // Act
        let record: TmdbMultiRecord = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(record, TmdbMultiRecord::Other);
    }

    #[test]
    fn test_movie_record_tolerates_nulls_and_missing_fields() {
        // Arrange
        let json = r#"{"id":438631,"title":"Dune","poster_path":null}"#;

        // Act
        let record: TmdbMovieRecord = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(record.id, 438_631);
        assert!(record.poster_path.is_none());
        assert!(record.release_date.is_none());
        assert!(record.popularity.is_none());
    }

    #[test]
    fn test_list_response_without_paging_fields() {
        // Arrange
        let json = r#"{"results":[{"id":1,"name":"Show"}]}"#;

        // Act
        let response: TmdbListResponse<TmdbTvRecord> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.page, 0);
        assert_eq!(response.results.len(), 1);
    }

    #[test]
    fn test_search_results_len() {
        // Arrange
        let results = TmdbSearchResults::Movie(vec![TmdbMovieRecord::default()]);

        // Act & Assert
        assert_eq!(results.len(), 1);
        assert!(!results.is_empty());
        assert!(TmdbSearchResults::Multi(Vec::new()).is_empty());
    }
}
