//! Rendering for the browser.

use cinebrowse_api::tmdb::{Category, SearchType};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Tabs, Wrap};

use crate::app::{App, Tab};
use crate::media::{MediaDetail, MediaKind, MediaSummary};
use crate::screens::{
    CategoryScreen, DetailScreen, DetailStatus, MSG_DETAIL_FAILED, ResultList, SearchScreen,
};

const POSTER_PLACEHOLDER: &str = "[no poster]";
const SEARCH_PLACEHOLDER: &str = "i.e. James Bond, CSI";

fn highlight() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Draws the whole browser.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, app: &mut App) {
    if let Some(detail) = app.detail() {
        let image_base_url = app.image_base_url();
        draw_detail(frame, frame.area(), detail, image_base_url);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tabs
            Constraint::Min(8),    // screen
            Constraint::Length(3), // key hints
        ])
        .split(frame.area());

    draw_tabs(frame, chunks[0], app.tab());
    match app.tab() {
        Tab::Movies => draw_category(frame, chunks[1], &mut app.movies),
        Tab::Search => draw_search(frame, chunks[1], &mut app.search),
        Tab::Tv => draw_category(frame, chunks[1], &mut app.tv),
    }
    draw_footer(frame, chunks[2], app);
}

fn draw_tabs(frame: &mut Frame, area: Rect, active: Tab) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.label())).collect();
    let tabs = Tabs::new(titles)
        .select(active.index())
        .highlight_style(highlight())
        .block(Block::default().borders(Borders::ALL).title(" cinebrowse "));
    frame.render_widget(tabs, area);
}

/// Draws a row of option labels with the selected one highlighted.
fn selector_line<T: Category>(prefix: &str, selected: T) -> Line<'static> {
    let mut spans = vec![Span::raw(String::from(prefix))];
    for option in T::ALL {
        let style = if *option == selected {
            highlight()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", option.label()), style));
    }
    Line::from(spans)
}

#[allow(clippy::indexing_slicing)]
fn draw_category<C: Category>(frame: &mut Frame, area: Rect, screen: &mut CategoryScreen<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // category selector
            Constraint::Min(5),    // results
            Constraint::Length(1), // page switcher
        ])
        .split(area);

    let title = if screen.list.fetch.is_loading() {
        " Category (loading...) "
    } else {
        " Category "
    };
    let selector = Paragraph::new(selector_line("", screen.category()))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(selector, chunks[0]);

    draw_results(frame, chunks[1], &mut screen.list, None);
    draw_page_switcher(frame, chunks[2], &screen.list);
}

#[allow(clippy::indexing_slicing)]
fn draw_search(frame: &mut Frame, area: Rect, screen: &mut SearchScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // text input
            Constraint::Length(1), // search type
            Constraint::Length(1), // status line
            Constraint::Min(5),    // results
            Constraint::Length(1), // page switcher
        ])
        .split(area);

    let border_style = if screen.form.show_validation_error() {
        Style::default().fg(Color::Red)
    } else if screen.editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = if screen.form.text().is_empty() && !screen.editing {
        Paragraph::new(SEARCH_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(screen.form.text().to_owned())
    };
    let input = input.block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search Movie/TV Show Name* ")
            .border_style(border_style),
    );
    frame.render_widget(input, chunks[0]);

    let type_line: Line = selector_line::<SearchType>(
        " Choose Search Type*:",
        screen.form.search_type(),
    );
    frame.render_widget(Paragraph::new(type_line), chunks[1]);

    let status_style = if screen.form.error_message().is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let status = Paragraph::new(format!(" {}", screen.form.status_line())).style(status_style);
    frame.render_widget(status, chunks[2]);

    let empty = screen.empty_message();
    draw_results(frame, chunks[3], &mut screen.list, empty);
    draw_page_switcher(frame, chunks[4], &screen.list);
}

fn summary_row(item: &MediaSummary) -> Row<'static> {
    let style = if item.kind == MediaKind::Person {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let poster = if item.poster_path.is_some() {
        "poster"
    } else {
        POSTER_PLACEHOLDER
    };
    Row::new(vec![
        item.display_title.clone(),
        String::from(item.release_label()),
        item.popularity_label(),
        String::from(poster),
    ])
    .style(style)
}

fn draw_results(frame: &mut Frame, area: Rect, list: &mut ResultList, empty: Option<&str>) {
    let block = Block::default().borders(Borders::ALL).title(" Results ");

    if let Some(message) = empty {
        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let rows: Vec<Row> = list
        .fetch
        .current_page()
        .items
        .iter()
        .map(summary_row)
        .collect();

    let header = Row::new(vec!["Title", "Release Date", "Popularity", "Poster"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let widths = [
        Constraint::Min(20),    // Title
        Constraint::Length(12), // Release Date
        Constraint::Length(10), // Popularity
        Constraint::Length(11), // Poster
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(highlight());

    frame.render_stateful_widget(table, area, &mut list.table_state);
}

fn draw_page_switcher(frame: &mut Frame, area: Rect, list: &ResultList) {
    let page = list.fetch.current_page();
    if !page.shows_switcher() {
        return;
    }
    let mut spans = vec![Span::raw(" \u{2039} ")];
    for n in 1..=page.total_pages {
        let style = if n == page.page_number {
            highlight()
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {n} "), style));
    }
    spans.push(Span::raw(" \u{203a} "));
    spans.push(Span::styled(
        format!("  Page {}/{}", page.page_number, page.total_pages),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.tab() {
        Tab::Search if app.search.editing => "Type to edit | Enter: search | Esc: done",
        Tab::Search => {
            "Tab: switch  /: edit  c/C: type  Enter: search/open  \u{2190}\u{2192}: page  q: quit"
        }
        Tab::Movies | Tab::Tv => {
            "Tab: switch  c/C: category  r: reload  Enter: open  \u{2190}\u{2192}: page  q: quit"
        }
    };
    let footer = Paragraph::new(Line::from(help)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn detail_lines(detail: &MediaDetail, image_base_url: &str) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Yellow);
    let mut lines = vec![Line::from(Span::styled(
        detail.title_label().to_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(tagline) = &detail.tagline {
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::default());
    if !detail.genres.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genres:  ", label),
            Span::raw(detail.genres.join(", ")),
        ]));
    }
    if let Some(minutes) = detail.runtime_min {
        lines.push(Line::from(vec![
            Span::styled("Runtime: ", label),
            Span::raw(format!("{minutes} min")),
        ]));
    }
    if let Some((seasons, episodes)) = detail.seasons {
        lines.push(Line::from(vec![
            Span::styled("Seasons: ", label),
            Span::raw(format!("{seasons} ({episodes} episodes)")),
        ]));
    }
    if let Some(status) = &detail.status {
        lines.push(Line::from(vec![
            Span::styled("Status:  ", label),
            Span::raw(status.clone()),
        ]));
    }
    let poster = detail
        .poster_url(image_base_url)
        .unwrap_or_else(|| String::from(POSTER_PLACEHOLDER));
    lines.push(Line::from(vec![
        Span::styled("Poster:  ", label),
        Span::raw(poster),
    ]));
    lines.push(Line::default());
    lines.push(Line::from(detail.overview_label().to_owned()));
    lines
}

#[allow(clippy::indexing_slicing)]
fn draw_detail(frame: &mut Frame, area: Rect, screen: &DetailScreen, image_base_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // body
            Constraint::Length(3), // footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(Span::styled(
        screen.header_title().to_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).title(" \u{2190} Esc "));
    frame.render_widget(header, chunks[0]);

    let (body, footer_text) = match screen.status() {
        DetailStatus::Loading => (vec![Line::from("Loading...")], String::new()),
        DetailStatus::Failed => (
            vec![Line::from(Span::styled(
                MSG_DETAIL_FAILED,
                Style::default().fg(Color::Red),
            ))],
            String::new(),
        ),
        DetailStatus::Loaded(detail) => (detail_lines(detail, image_base_url), detail.footer_line()),
    };
    let body = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, chunks[1]);

    let footer = Paragraph::new(footer_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Esc: back  o: open poster  q: quit "),
    );
    frame.render_widget(footer, chunks[2]);
}
