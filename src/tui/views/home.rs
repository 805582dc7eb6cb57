// Home screen: the paged top-story collection
//
// Two layouts over the same data: a responsive card grid (1-3 columns by
// terminal width) and a dense single-column list. Both share the selection
// state and the trailing load-more control.

use crate::item::{Story, ViewMode};
use crate::tui::app::{App, HitTarget, HomeFocus};
use crate::tui::layout::Breakpoint;
use crate::util::{ellipsize, format_relative_time, url_host};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Height of one grid card, borders included
const CARD_HEIGHT: u16 = 5;
/// Height of the load-more control row
const LOAD_MORE_HEIGHT: u16 = 3;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.theme();

    if let Some(error) = &app.home.error {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Could not load stories: {}", error),
                theme.error_style(),
            )),
            Line::from(""),
            Line::from(Span::styled("r retry · q quit", theme.meta_style())),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border_style()));
        f.render_widget(msg, area);
        return;
    }

    if app.home.stories.is_empty() {
        let text = if app.home.loading {
            format!("{} fetching top stories", app.spinner_char())
        } else {
            "No stories".to_string()
        };
        let msg = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(theme.meta_style())
            .block(Block::default().borders(Borders::ALL).border_style(theme.border_style()));
        f.render_widget(msg, area);
        return;
    }

    // Reserve the bottom strip for the load-more control
    let collection_area = Rect {
        height: area.height.saturating_sub(LOAD_MORE_HEIGHT),
        ..area
    };
    let load_more_area = Rect {
        y: area.y + collection_area.height,
        height: LOAD_MORE_HEIGHT,
        ..area
    };

    match app.view_mode {
        ViewMode::Grid => render_grid(f, collection_area, app),
        ViewMode::List => render_list(f, collection_area, app),
    }

    render_load_more(f, load_more_area, app);
}

fn render_grid(f: &mut Frame, area: Rect, app: &mut App) {
    let columns = Breakpoint::from_width(area.width).columns();
    let total_rows = app.home.stories.len().div_ceil(columns);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;

    // Keep the selected row inside the viewport
    if let Some(selected) = app.home.selection.selected() {
        let row = selected / columns;
        if row < app.home.scroll_row {
            app.home.scroll_row = row;
        } else if row >= app.home.scroll_row + visible_rows {
            app.home.scroll_row = row + 1 - visible_rows;
        }
    }
    app.home.scroll_row = app.home.scroll_row.min(total_rows.saturating_sub(1));

    let card_width = area.width / columns as u16;
    let focused = app.home.focus == HomeFocus::Collection;

    for visible_row in 0..visible_rows {
        let row = app.home.scroll_row + visible_row;
        if row >= total_rows {
            break;
        }
        for col in 0..columns {
            let index = row * columns + col;
            let Some(story) = app.home.stories.get(index) else {
                break;
            };
            let cell = Rect {
                x: area.x + col as u16 * card_width,
                y: area.y + visible_row as u16 * CARD_HEIGHT,
                width: card_width,
                height: CARD_HEIGHT,
            };
            let selected = focused && app.home.selection.is_selected(index);
            render_card(f, cell, app, story, selected);
            app.hit_areas.push((cell, HitTarget::Story(index)));
        }
    }
}

fn render_card(f: &mut Frame, area: Rect, app: &App, story: &Story, selected: bool) {
    let theme = app.theme.theme();
    let inner_width = area.width.saturating_sub(2) as usize;

    let title_style = if selected {
        theme.selected_style()
    } else {
        Style::default().fg(theme.story_title)
    };
    let border_style = if selected {
        theme.border_focused_style()
    } else {
        theme.border_style()
    };

    let host = story
        .url
        .as_deref()
        .and_then(url_host)
        .map(|h| format!(" ({})", h))
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(
            ellipsize(&story.title, inner_width),
            title_style,
        )),
        Line::from(vec![
            Span::styled(
                format!("▲ {}", story.points),
                Style::default().fg(theme.points),
            ),
            Span::styled(
                format!(" · {} · {}", story.author, format_relative_time(story.time)),
                theme.meta_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("💬 {}", story.comment_count), theme.meta_style()),
            Span::styled(ellipsize(&host, inner_width.saturating_sub(6)), theme.meta_style()),
        ]),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(card, area);
}

fn render_list(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.theme();
    let visible = area.height.saturating_sub(2).max(1) as usize;

    if let Some(selected) = app.home.selection.selected() {
        if selected < app.home.scroll_row {
            app.home.scroll_row = selected;
        } else if selected >= app.home.scroll_row + visible {
            app.home.scroll_row = selected + 1 - visible;
        }
    }
    app.home.scroll_row = app
        .home
        .scroll_row
        .min(app.home.stories.len().saturating_sub(1));

    let focused = app.home.focus == HomeFocus::Collection;
    let width = area.width.saturating_sub(2) as usize;

    let mut lines = Vec::with_capacity(visible);
    for (index, story) in app
        .home
        .stories
        .iter()
        .enumerate()
        .skip(app.home.scroll_row)
        .take(visible)
    {
        let selected = focused && app.home.selection.is_selected(index);
        let marker = if selected { "▸ " } else { "  " };
        let meta = format!(
            " ▲{} 💬{} {}",
            story.points,
            story.comment_count,
            format_relative_time(story.time)
        );
        let title_width = title_budget(width, marker, &meta);
        let style = if selected {
            theme.selected_style()
        } else {
            Style::default().fg(theme.story_title)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}", marker, ellipsize(&story.title, title_width)), style),
            Span::styled(meta, theme.meta_style()),
        ]));

        let row_rect = Rect {
            x: area.x + 1,
            y: area.y + 1 + (index - app.home.scroll_row) as u16,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        app.hit_areas.push((row_rect, HitTarget::Story(index)));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style()),
    );
    f.render_widget(list, area);
}

fn render_load_more(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.theme();
    let focused = app.home.focus == HomeFocus::LoadMore;

    let label = if app.home.loading_more {
        format!("{} loading more…", app.spinner_char())
    } else {
        "Load more stories".to_string()
    };

    let style = if focused {
        theme.selected_style()
    } else {
        theme.meta_style()
    };
    let border_style = if focused {
        theme.border_focused_style()
    } else {
        theme.border_style()
    };

    let control = Paragraph::new(Span::styled(label, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    f.render_widget(control, area);
    app.hit_areas.push((area, HitTarget::LoadMore));
}

/// Cells left for a list row's title once the marker and meta are placed.
/// Budgeted in display cells, not bytes: the marker and meta carry
/// multi-byte glyphs that occupy one or two cells each.
fn title_budget(row_width: usize, marker: &str, meta: &str) -> usize {
    row_width.saturating_sub(marker.width() + meta.width())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_budget_counts_cells_not_bytes() {
        let marker = "▸ ";
        let meta = " ▲120 💬45 3h ago";
        // The glyphs inflate byte length well past display width
        assert!(meta.len() > meta.width());
        let budget = title_budget(60, marker, meta);
        assert_eq!(budget, 60 - 2 - meta.width());
        assert!(budget > 60usize.saturating_sub(marker.len() + meta.len()));
    }

    #[test]
    fn title_budget_saturates_on_narrow_rows() {
        assert_eq!(title_budget(3, "▸ ", " ▲1 💬0 just now"), 0);
    }
}
