//! API client library for cinebrowse.
//!
//! Provides a client for The Movie Database (TMDB) v3 API and the typed
//! category and record models the browser is built on.

/// TMDB API client.
pub mod tmdb;
