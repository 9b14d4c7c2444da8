//! Executes [`FetchRequest`]s against a [`TmdbApi`].

use std::sync::Arc;

use anyhow::{Context, Result};
use cinebrowse_api::tmdb::TmdbApi;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::app::{FetchOutcome, FetchPayload, FetchRequest};
use crate::media::{self, DetailKind, MediaDetail, MediaSummary};

/// Runs one request and tags the result with its screen and ticket.
pub async fn load<A: TmdbApi + Sync>(api: &A, request: FetchRequest) -> FetchOutcome {
    let screen = request.screen();
    let ticket = request.ticket();
    let result = fetch_payload(api, request).await;
    FetchOutcome {
        screen,
        ticket,
        result,
    }
}

/// Runs [`load`] on a spawned task and sends the outcome to `tx`.
pub fn spawn_load<A>(
    api: Arc<A>,
    request: FetchRequest,
    tx: UnboundedSender<FetchOutcome>,
) -> JoinHandle<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let outcome = load(api.as_ref(), request).await;
        if tx.send(outcome).is_err() {
            tracing::debug!("Browser closed before the response arrived");
        }
    })
}

#[instrument(
    skip_all,
    fields(screen = ?request.screen(), generation = request.ticket().generation())
)]
async fn fetch_payload<A: TmdbApi + Sync>(api: &A, request: FetchRequest) -> Result<FetchPayload> {
    match request {
        FetchRequest::MovieList { category, .. } => {
            let response = api
                .movie_list(category)
                .await
                .with_context(|| format!("failed to load movie/{category}"))?;
            Ok(FetchPayload::Summaries {
                items: response.results.iter().map(MediaSummary::from_movie).collect(),
                search_type: None,
            })
        }
        FetchRequest::TvList { category, .. } => {
            let response = api
                .tv_list(category)
                .await
                .with_context(|| format!("failed to load tv/{category}"))?;
            Ok(FetchPayload::Summaries {
                items: response.results.iter().map(MediaSummary::from_tv).collect(),
                search_type: None,
            })
        }
        FetchRequest::Search { params, .. } => {
            let results = api
                .search(&params)
                .await
                .with_context(|| format!("failed to search/{}", params.search_type))?;
            tracing::debug!(count = results.len(), "Search completed");
            Ok(FetchPayload::Summaries {
                items: media::summaries_from_search(&results),
                search_type: Some(params.search_type),
            })
        }
        FetchRequest::Details {
            id,
            kind: DetailKind::Movie,
            ..
        } => {
            let details = api
                .movie_details(id)
                .await
                .with_context(|| format!("failed to load movie/{id}"))?;
            Ok(FetchPayload::Detail(Box::new(MediaDetail::from_movie(
                &details,
            ))))
        }
        FetchRequest::Details {
            id,
            kind: DetailKind::Tv,
            ..
        } => {
            let details = api
                .tv_details(id)
                .await
                .with_context(|| format!("failed to load tv/{id}"))?;
            Ok(FetchPayload::Detail(Box::new(MediaDetail::from_tv(&details))))
        }
    }
}
