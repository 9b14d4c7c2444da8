//! Typed browse categories and search types.
//!
//! Each enum lists the buckets TMDB exposes for one screen, with the URL
//! path segment used in requests and the label shown in the selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a category or search type string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError {
    kind: &'static str,
    value: String,
    expected: Vec<&'static str>,
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown {} '{}' (expected one of: {})",
            self.kind,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for ParseCategoryError {}

/// A fixed, server-defined browse bucket for one screen.
pub trait Category: Copy + Eq + fmt::Debug + Send + 'static {
    /// All variants, in selector order.
    const ALL: &'static [Self];

    /// Path segment used in the request URL.
    fn path_segment(self) -> &'static str;

    /// Human-readable label for the selector.
    fn label(self) -> &'static str;

    /// Returns the category following `self` in selector order (wrapping).
    #[must_use]
    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL
            .get(idx.saturating_add(1))
            .or_else(|| Self::ALL.first())
            .copied()
            .unwrap_or(self)
    }

    /// Returns the category preceding `self` in selector order (wrapping).
    #[must_use]
    fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        idx.checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .or_else(|| Self::ALL.last())
            .copied()
            .unwrap_or(self)
    }
}

fn parse_from<C: Category>(kind: &'static str, s: &str) -> Result<C, ParseCategoryError> {
    C::ALL
        .iter()
        .find(|c| c.path_segment() == s)
        .copied()
        .ok_or_else(|| ParseCategoryError {
            kind,
            value: String::from(s),
            expected: C::ALL.iter().map(|c| c.path_segment()).collect(),
        })
}

/// Movie list categories (`movie/{category}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieCategory {
    /// Movies currently in theatres.
    NowPlaying,
    /// Most popular movies.
    #[default]
    Popular,
    /// Highest rated movies.
    TopRated,
    /// Upcoming releases.
    Upcoming,
}

impl Category for MovieCategory {
    const ALL: &'static [Self] = &[
        Self::NowPlaying,
        Self::Popular,
        Self::TopRated,
        Self::Upcoming,
    ];

    fn path_segment(self) -> &'static str {
        match self {
            Self::NowPlaying => "now_playing",
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::NowPlaying => "Now Playing",
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
            Self::Upcoming => "Upcoming",
        }
    }
}

/// TV list categories (`tv/{category}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvCategory {
    /// Shows with an episode airing today.
    AiringToday,
    /// Shows airing within the next seven days.
    OnTheAir,
    /// Most popular shows.
    #[default]
    Popular,
    /// Highest rated shows.
    TopRated,
}

impl Category for TvCategory {
    const ALL: &'static [Self] = &[
        Self::AiringToday,
        Self::OnTheAir,
        Self::Popular,
        Self::TopRated,
    ];

    fn path_segment(self) -> &'static str {
        match self {
            Self::AiringToday => "airing_today",
            Self::OnTheAir => "on_the_air",
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::AiringToday => "Airing Today",
            Self::OnTheAir => "On The Air",
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
        }
    }
}

/// Search endpoint selector (`search/{type}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// Movies, TV shows and people in one result list.
    #[default]
    Multi,
    /// Movies only.
    Movie,
    /// TV shows only.
    Tv,
}

impl Category for SearchType {
    const ALL: &'static [Self] = &[Self::Multi, Self::Movie, Self::Tv];

    fn path_segment(self) -> &'static str {
        match self {
            Self::Multi => "multi",
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Multi => "Multi",
            Self::Movie => "Movie",
            Self::Tv => "TV",
        }
    }
}

macro_rules! impl_str_conversions {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = ParseCategoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_from($kind, s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.path_segment())
            }
        }
    };
}

impl_str_conversions!(MovieCategory, "movie category");
impl_str_conversions!(TvCategory, "tv category");
impl_str_conversions!(SearchType, "search type");

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_movie_category_path_segments() {
        // Arrange & Act
        let segments: Vec<&str> = MovieCategory::ALL
            .iter()
            .map(|c| c.path_segment())
            .collect();

        // Assert
        assert_eq!(
            segments,
            vec!["now_playing", "popular", "top_rated", "upcoming"]
        );
    }

    #[test]
    fn test_tv_category_labels() {
        // Arrange & Act
        let labels: Vec<&str> = TvCategory::ALL.iter().map(|c| c.label()).collect();

        // Assert
        assert_eq!(
            labels,
            vec!["Airing Today", "On The Air", "Popular", "Top Rated"]
        );
    }

    #[test]
    fn test_parse_known_category() {
        // Arrange & Act
        let parsed: TvCategory = "on_the_air".parse().unwrap();

        // Assert
        assert_eq!(parsed, TvCategory::OnTheAir);
    }

    #[test]
    fn test_parse_unknown_category_lists_expected() {
        // Arrange & Act
        let err = "trending".parse::<MovieCategory>().unwrap_err();

        // Assert
        let msg = err.to_string();
        assert!(msg.contains("unknown movie category 'trending'"));
        assert!(msg.contains("now_playing, popular, top_rated, upcoming"));
    }

    #[test]
    fn test_next_and_prev_wrap() {
        // Arrange & Act & Assert
        assert_eq!(MovieCategory::Upcoming.next(), MovieCategory::NowPlaying);
        assert_eq!(MovieCategory::NowPlaying.prev(), MovieCategory::Upcoming);
        assert_eq!(SearchType::Multi.next(), SearchType::Movie);
        assert_eq!(SearchType::Tv.next(), SearchType::Multi);
    }

    #[test]
    fn test_defaults() {
        // Arrange & Act & Assert
        assert_eq!(MovieCategory::default(), MovieCategory::Popular);
        assert_eq!(TvCategory::default(), TvCategory::Popular);
        assert_eq!(SearchType::default(), SearchType::Multi);
    }

    #[test]
    fn test_display_matches_path_segment() {
        // Arrange & Act & Assert
        assert_eq!(SearchType::Tv.to_string(), "tv");
        assert_eq!(MovieCategory::TopRated.to_string(), "top_rated");
    }
}
