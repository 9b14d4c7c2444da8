//! cinebrowse - terminal browser for TMDB movies and TV shows.

/// Application configuration (TOML).
mod config;

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cinebrowse_api::tmdb::{MovieCategory, SearchType, TmdbApi, TmdbClient, TvCategory};
use cinebrowse_tui::media::{self, DetailKind, MediaDetail, MediaKind, MediaSummary};
use cinebrowse_tui::pagination::{self, PAGE_SIZE};
use cinebrowse_tui::search_form::{MSG_NO_RESULTS, SearchQuery};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "cinebrowse", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Write logs to this file (the browser discards logs otherwise).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to `browse`).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Open the interactive browser.
    Browse,
    /// Print one page of a movie category.
    Movies(MoviesArgs),
    /// Print one page of a TV category.
    Tv(TvArgs),
    /// Search movies and TV shows.
    Search(SearchArgs),
    /// Print details for one movie or TV show.
    Details(DetailsArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesArgs {
    /// Category: `now_playing`, `popular`, `top_rated`, `upcoming`.
    #[arg(long, default_value_t = MovieCategory::Popular)]
    category: MovieCategory,

    /// Page number (10 results per page).
    #[arg(long, default_value_t = 1)]
    page: usize,
}

/// Arguments for the `tv` subcommand.
#[derive(clap::Args)]
struct TvArgs {
    /// Category: `airing_today`, `on_the_air`, `popular`, `top_rated`.
    #[arg(long, default_value_t = TvCategory::Popular)]
    category: TvCategory,

    /// Page number (10 results per page).
    #[arg(long, default_value_t = 1)]
    page: usize,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Movie or TV show name.
    #[arg(long)]
    query: String,

    /// Search type: `multi`, `movie`, `tv`.
    #[arg(long = "type", default_value_t = SearchType::Multi)]
    search_type: SearchType,

    /// Page number (10 results per page).
    #[arg(long, default_value_t = 1)]
    page: usize,
}

/// Media type accepted by `details`.
#[derive(Clone, Copy, clap::ValueEnum)]
enum DetailType {
    /// A movie.
    Movie,
    /// A TV series.
    Tv,
}

impl From<DetailType> for DetailKind {
    fn from(value: DetailType) -> Self {
        match value {
            DetailType::Movie => Self::Movie,
            DetailType::Tv => Self::Tv,
        }
    }
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB ID.
    #[arg(long)]
    id: u64,

    /// Media type.
    #[arg(long = "type", value_enum)]
    media_type: DetailType,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: Shell,
}

/// Builds a `TmdbClient` from environment credentials and config.
///
/// `TMDB_API_KEY` takes precedence over `TMDB_API_TOKEN`.
///
/// # Errors
///
/// Returns an error if neither variable is set, the configured base URL is
/// invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_key = std::env::var("TMDB_API_KEY").ok();
    let api_token = std::env::var("TMDB_API_TOKEN").ok();

    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    match (api_key, api_token) {
        (Some(key), _) => builder = builder.api_key(key),
        (None, Some(token)) => builder = builder.api_token(token),
        (None, None) => bail!("TMDB_API_KEY or TMDB_API_TOKEN environment variable is required"),
    }
    if let Some(url) = config.base_url()? {
        builder = builder.base_url(url);
    }
    if let Some(language) = &config.tmdb.language {
        builder = builder.language(language);
    }

    builder.build().context("failed to build TMDB client")
}

/// Short label for a record kind in printed lists.
const fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movie",
        MediaKind::Tv => "tv",
        MediaKind::Person => "person",
    }
}

/// Prints page `page` of `items` followed by the page footer.
fn print_page(items: &[MediaSummary], page: usize, image_base_url: &str) {
    let window = pagination::slice(items, PAGE_SIZE, page);

    tracing::info!("ID\tType\tTitle\t\t\tRelease Date\tPopularity\tPoster");
    for item in window.items {
        tracing::info!(
            "{}\t{}\t{}\t\t\t{}\t{}\t{}",
            item.id,
            kind_label(item.kind),
            item.display_title,
            item.release_label(),
            item.popularity_label(),
            item.poster_url(image_base_url)
                .unwrap_or_else(|| String::from("-")),
        );
    }
    tracing::info!(
        "Page {}/{} ({} results)",
        window.page_number,
        window.total_pages,
        items.len()
    );
}

/// Runs the `movies` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all, fields(category = %args.category))]
async fn run_movies(args: &MoviesArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let response = client
        .movie_list(args.category)
        .await
        .with_context(|| format!("TMDB movie/{} request failed", args.category))?;

    let items: Vec<MediaSummary> = response.results.iter().map(MediaSummary::from_movie).collect();
    print_page(&items, args.page, config.image_base_url());

    Ok(())
}

/// Runs the `tv` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all, fields(category = %args.category))]
async fn run_tv(args: &TvArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let response = client
        .tv_list(args.category)
        .await
        .with_context(|| format!("TMDB tv/{} request failed", args.category))?;

    let items: Vec<MediaSummary> = response.results.iter().map(MediaSummary::from_tv).collect();
    print_page(&items, args.page, config.image_base_url());

    Ok(())
}

/// Runs the `search` subcommand.
///
/// The query is validated before any credentials are read.
///
/// # Errors
///
/// Returns an error if the query is blank, the TMDB client fails to build, or
/// the API request fails.
#[instrument(skip_all, fields(search_type = %args.search_type))]
async fn run_search(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let query = SearchQuery::new(args.query.as_str(), args.search_type);
    if let Err(message) = query.validate() {
        bail!(message);
    }

    let client = build_tmdb_client(config)?;
    let results = client
        .search(&query.to_params())
        .await
        .with_context(|| format!("TMDB search/{} request failed", args.search_type))?;

    let items = media::summaries_from_search(&results);
    if items.is_empty() {
        tracing::info!("{MSG_NO_RESULTS}");
        return Ok(());
    }
    print_page(&items, args.page, config.image_base_url());

    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all, fields(id = args.id))]
async fn run_details(args: &DetailsArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let kind = DetailKind::from(args.media_type);
    let detail = match kind {
        DetailKind::Movie => client
            .movie_details(args.id)
            .await
            .map(|d| MediaDetail::from_movie(&d)),
        DetailKind::Tv => client
            .tv_details(args.id)
            .await
            .map(|d| MediaDetail::from_tv(&d)),
    }
    .with_context(|| format!("TMDB {}/{} request failed", kind.as_str(), args.id))?;

    tracing::info!("ID: {}", detail.id);
    tracing::info!("Title: {}", detail.title_label());
    if let Some(tagline) = &detail.tagline {
        tracing::info!("Tagline: {tagline}");
    }
    if !detail.genres.is_empty() {
        tracing::info!("Genres: {}", detail.genres.join(", "));
    }
    tracing::info!("Status: {}", detail.status.as_deref().unwrap_or("-"));
    if let Some(runtime) = detail.runtime_min {
        tracing::info!("Runtime: {runtime}min");
    }
    if let Some((seasons, episodes)) = detail.seasons {
        tracing::info!("Seasons: {seasons} ({episodes} episodes)");
    }
    tracing::info!(
        "Poster: {}",
        detail
            .poster_url(config.image_base_url())
            .unwrap_or_else(|| String::from("-"))
    );
    tracing::info!("Overview: {}", detail.overview_label());
    tracing::info!("---");
    tracing::info!("{}", detail.footer_line());

    Ok(())
}

/// Runs the interactive browser.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or terminal I/O fails.
async fn run_browse(config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;
    cinebrowse_tui::run_browser(Arc::new(client), config.to_settings()).await
}

/// Writes shell completions to stdout.
fn run_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_owned();
    clap_complete::generate(args.shell, &mut cmd, name, &mut io::stdout());
}

/// Chooses where log lines go and whether they carry ANSI colors.
///
/// `--log-file` wins. Otherwise the browser discards logs since it owns the
/// terminal, and subcommands print to stdout.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn log_writer(cli: &Cli) -> Result<(BoxMakeWriter, bool)> {
    if let Some(path) = &cli.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        return Ok((BoxMakeWriter::new(Arc::new(file)), false));
    }
    if matches!(cli.command, None | Some(Commands::Browse)) {
        return Ok((BoxMakeWriter::new(io::sink), false));
    }
    Ok((BoxMakeWriter::new(io::stdout), io::stdout().is_terminal()))
}

/// Installs the global tracing subscriber.
fn init_tracing(writer: BoxMakeWriter, ansi: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    #[cfg(not(feature = "otel"))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (writer, ansi) = log_writer(&cli)?;
    init_tracing(writer, ansi);

    let config_path = resolve_config_path(cli.dir.as_ref())?;
    let config = AppConfig::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "Loaded config");

    match &cli.command {
        None | Some(Commands::Browse) => run_browse(&config).await,
        Some(Commands::Movies(args)) => run_movies(args, &config).await,
        Some(Commands::Tv(args)) => run_tv(args, &config).await,
        Some(Commands::Search(args)) => run_search(args, &config).await,
        Some(Commands::Details(args)) => run_details(args, &config).await,
        Some(Commands::Completions(args)) => {
            run_completions(args);
            Ok(())
        }
    }
}
