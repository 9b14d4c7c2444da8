//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::category::{MovieCategory, TvCategory};
use super::types::{
    SearchParams, TmdbListResponse, TmdbMovieDetails, TmdbMovieRecord, TmdbSearchResults,
    TmdbTvDetails, TmdbTvRecord,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Lists movies in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_list(&self, category: MovieCategory)
    -> Result<TmdbListResponse<TmdbMovieRecord>>;

    /// Lists TV series in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_list(&self, category: TvCategory) -> Result<TmdbListResponse<TmdbTvRecord>>;

    /// Searches movies, TV series, or both (with people) depending on the search type.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search(&self, params: &SearchParams) -> Result<TmdbSearchResults>;

    /// Fetches movie details.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<TmdbMovieDetails>;

    /// Fetches TV series details.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_details(&self, series_id: u64) -> Result<TmdbTvDetails>;
}
