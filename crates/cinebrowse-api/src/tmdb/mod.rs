//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints
//! and retrieves movie lists, TV lists, search results, and details.

mod api;
mod category;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
pub use category::{Category, MovieCategory, ParseCategoryError, SearchType, TvCategory};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_IMAGE_BASE_URL, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    SearchParams, TmdbGenre, TmdbListResponse, TmdbMovieDetails, TmdbMovieRecord,
    TmdbMultiRecord, TmdbPersonRecord, TmdbSearchResults, TmdbTvDetails, TmdbTvRecord,
};
