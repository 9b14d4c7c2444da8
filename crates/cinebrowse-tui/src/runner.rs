//! Terminal setup and the browser event loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use cinebrowse_api::tmdb::TmdbApi;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::{App, AppSettings, FetchOutcome, FetchRequest, Tab};
use crate::loader;
use crate::screens::ResultList;
use crate::ui;

/// How long the loop waits for a fetch outcome before polling keys.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What the loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond the state change.
    None,
    /// Leave the browser.
    Quit,
    /// Dispatch a request.
    Fetch(FetchRequest),
    /// Open a URL in the system browser.
    OpenUrl(String),
}

impl From<Option<FetchRequest>> for Action {
    fn from(request: Option<FetchRequest>) -> Self {
        request.map_or(Self::None, Self::Fetch)
    }
}

/// Runs the interactive browser until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[allow(clippy::module_name_repetitions)]
pub async fn run_browser<A>(api: Arc<A>, settings: AppSettings) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    let mut app = App::new(settings);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let (tx, rx) = mpsc::unbounded_channel();
    let result = run_event_loop(&mut terminal, &mut app, &api, &tx, rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: &Arc<A>,
    tx: &UnboundedSender<FetchOutcome>,
    mut rx: UnboundedReceiver<FetchOutcome>,
) -> Result<()>
where
    A: TmdbApi + Send + Sync + 'static,
{
    if let Some(request) = app.mount_current() {
        dispatch(api, tx, request);
    }

    loop {
        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("failed to draw TUI")?;

        tokio::select! {
            outcome = rx.recv() => {
                if let Some(outcome) = outcome {
                    let applied = app.apply(outcome);
                    tracing::debug!(?applied, "Applied fetch outcome");
                }
            }
            () = tokio::time::sleep(POLL_INTERVAL) => {}
        }

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            let Event::Key(key) = event::read().context("failed to read event")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match handle_key(app, key) {
                Action::None => {}
                Action::Quit => return Ok(()),
                Action::Fetch(request) => dispatch(api, tx, request),
                Action::OpenUrl(url) => {
                    if let Err(e) = open::that(&url) {
                        tracing::warn!(%url, error = %e, "Failed to open URL");
                    }
                }
            }
        }
    }
}

fn dispatch<A>(api: &Arc<A>, tx: &UnboundedSender<FetchOutcome>, request: FetchRequest)
where
    A: TmdbApi + Send + Sync + 'static,
{
    tracing::debug!(?request, "Dispatching fetch");
    drop(loader::spawn_load(Arc::clone(api), request, tx.clone()));
}

/// Maps a key press to a state change and follow-up action.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if app.detail().is_some() {
        return handle_detail_key(app, key.code);
    }
    if app.tab() == Tab::Search && app.search.editing {
        return handle_editing_key(app, key.code);
    }
    handle_list_key(app, key.code)
}

/// Keys while a detail view is open.
fn handle_detail_key(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            app.close_detail();
            Action::None
        }
        KeyCode::Char('o') => app
            .detail()
            .and_then(|d| d.poster_url(app.image_base_url()))
            .map_or(Action::None, Action::OpenUrl),
        _ => Action::None,
    }
}

/// Keys while the search input has focus.
fn handle_editing_key(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc => {
            app.search.editing = false;
            Action::None
        }
        KeyCode::Enter => app.submit_search().into(),
        KeyCode::Backspace => {
            app.search.form.pop_char();
            Action::None
        }
        KeyCode::Char(c) => {
            app.search.form.push_char(c);
            Action::None
        }
        _ => Action::None,
    }
}

/// Keys on the tab screens.
fn handle_list_key(app: &mut App, key: KeyCode) -> Action {
    let on_search = app.tab() == Tab::Search;
    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab => app.next_tab().into(),
        KeyCode::BackTab => app.prev_tab().into(),
        KeyCode::Char('c') => app.next_category().into(),
        KeyCode::Char('C') => app.prev_category().into(),
        KeyCode::Char('r') => app.refresh().into(),
        KeyCode::Char('/' | 'i') if on_search => {
            app.search.editing = true;
            Action::None
        }
        KeyCode::Char('s') if on_search => app.submit_search().into(),
        KeyCode::Enter => app.open_selected().into(),
        other => {
            navigate(current_list(app), other);
            Action::None
        }
    }
}

fn current_list(app: &mut App) -> &mut ResultList {
    match app.tab() {
        Tab::Movies => &mut app.movies.list,
        Tab::Search => &mut app.search.list,
        Tab::Tv => &mut app.tv.list,
    }
}

/// Cursor and page movement within a result list.
fn navigate(list: &mut ResultList, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => list.move_up(),
        KeyCode::Down | KeyCode::Char('j') => list.move_down(),
        KeyCode::Left | KeyCode::Char('h') => list.prev_page(),
        KeyCode::Right | KeyCode::Char('l') => list.next_page(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(page) = c.to_digit(10).and_then(|d| usize::try_from(d).ok()) {
                list.go_to_page(page);
            }
        }
        _ => {}
    }
}
