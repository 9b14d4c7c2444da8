//! Interactive terminal browser for TMDB movies and TV shows.
//!
//! Screen state is plain structs updated by reducer-style methods. Fetches
//! run on spawned tasks and report back over a channel; see [`runner`].

pub mod app;
pub mod fetch;
pub mod loader;
pub mod media;
pub mod pagination;
pub mod runner;
pub mod screens;
pub mod search_form;
mod ui;

pub use app::{App, AppSettings};
pub use fetch::ResponsePolicy;
pub use runner::run_browser;
