// Item screen: ancestry breadcrumbs, the focused item card, and the
// horizontal reply carousel below it.

use crate::item::{Comment, Item};
use crate::tui::app::{App, HitTarget};
use crate::util::{ellipsize, format_relative_time, url_host};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Breadcrumb entries are hard-capped at this many characters
const CRUMB_MAX_CHARS: usize = 40;
/// Reply cards visible at once in the carousel
const CAROUSEL_WINDOW: usize = 3;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.theme();

    let Some(state) = &app.item else {
        return;
    };

    if let Some(error) = &state.error {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Could not load item: {}", error),
                theme.error_style(),
            )),
            Line::from(""),
            Line::from(Span::styled("r retry · Esc back", theme.meta_style())),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border_style()));
        f.render_widget(msg, area);
        return;
    }

    if state.loading {
        let msg = Paragraph::new(format!("{} fetching item", app.spinner_char()))
            .alignment(Alignment::Center)
            .style(theme.meta_style())
            .block(Block::default().borders(Borders::ALL).border_style(theme.border_style()));
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // breadcrumbs
            Constraint::Min(5),    // focus card
            Constraint::Length(8), // reply carousel
        ])
        .split(area);

    render_breadcrumbs(f, chunks[0], app);
    render_focus_card(f, chunks[1], app);
    render_carousel(f, chunks[2], app);
}

fn render_breadcrumbs(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.theme();
    let Some(state) = &app.item else { return };

    // One cell of left padding, then "title › title › current". Each
    // ancestor crumb is clickable; clicks route back to that item.
    let mut line = String::from(" ");
    let mut hits = Vec::new();
    for (i, entry) in state.path.iter().enumerate() {
        if i > 0 {
            line.push_str(" › ");
        }
        let label = ellipsize(&entry.title, CRUMB_MAX_CHARS);
        let start = line.width() as u16;
        line.push_str(&label);
        let end = line.width() as u16;
        if start < area.width {
            hits.push((
                Rect {
                    x: area.x + start,
                    y: area.y,
                    width: end.min(area.width) - start,
                    height: 1,
                },
                HitTarget::Crumb(entry.id),
            ));
        }
    }
    if let Some(item) = &state.item {
        if !state.path.is_empty() {
            line.push_str(" › ");
        }
        line.push_str(&ellipsize(&item.display_title(), CRUMB_MAX_CHARS));
    }

    let bar = Paragraph::new(ellipsize(&line, area.width as usize))
        .style(Style::default().fg(theme.breadcrumb));
    f.render_widget(bar, area);
    app.hit_areas.extend(hits);
}

fn render_focus_card(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.theme();
    let Some(state) = &app.item else { return };
    let Some(item) = &state.item else { return };

    let inner_width = area.width.saturating_sub(4) as usize;
    let mut lines = Vec::new();
    let mut link_hit: Option<(u16, String)> = None;

    match item {
        Item::Story(story) => {
            lines.push(Line::from(Span::styled(
                story.title.clone(),
                theme.title_style(),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "▲ {} · {} · {} · 💬 {}",
                    story.points,
                    story.author,
                    format_relative_time(story.time),
                    story.comment_count
                ),
                theme.meta_style(),
            )));
            if let Some(url) = &story.url {
                let host = url_host(url).unwrap_or(url);
                // Relative line offset inside the card; resolved to a cell
                // row below once the card rect is known
                link_hit = Some((lines.len() as u16, url.clone()));
                lines.push(Line::from(Span::styled(
                    format!("🔗 {}", ellipsize(host, inner_width.saturating_sub(3))),
                    Style::default().fg(theme.link),
                )));
            }
            if let Some(text) = &story.text {
                lines.push(Line::from(""));
                for paragraph in text.split('\n') {
                    lines.push(Line::from(Span::styled(
                        paragraph.to_string(),
                        Style::default().fg(theme.comment_text),
                    )));
                }
            }
        }
        Item::Comment(comment) => {
            lines.push(Line::from(Span::styled(
                format!(
                    "{} · {}{}",
                    comment.author,
                    format_relative_time(comment.time),
                    match comment.total_reply_count {
                        Some(n) => format!(" · {} replies in thread", n),
                        None => String::new(),
                    }
                ),
                theme.meta_style(),
            )));
            lines.push(Line::from(""));
            for paragraph in comment.text.split('\n') {
                lines.push(Line::from(Span::styled(
                    paragraph.to_string(),
                    Style::default().fg(theme.comment_text),
                )));
            }
        }
    }

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.text_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_focused_style()),
        );
    f.render_widget(card, area);

    if let Some((line_offset, url)) = link_hit {
        // Only register the hit row while it is actually on screen
        if line_offset >= state.text_scroll {
            let y = area.y + 1 + (line_offset - state.text_scroll);
            if y < area.y + area.height.saturating_sub(1) {
                let rect = Rect {
                    x: area.x + 1,
                    y,
                    width: area.width.saturating_sub(2),
                    height: 1,
                };
                app.hit_areas.push((rect, HitTarget::Link(url)));
            }
        }
    }
}

fn render_carousel(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.theme();
    let Some(state) = &app.item else { return };

    if state.replies_loading {
        let msg = Paragraph::new(format!("{} fetching replies", app.spinner_char()))
            .alignment(Alignment::Center)
            .style(theme.meta_style())
            .block(Block::default().borders(Borders::ALL).border_style(theme.border_style()));
        f.render_widget(msg, area);
        return;
    }

    if state.replies.is_empty() {
        let msg = Paragraph::new("No replies yet")
            .alignment(Alignment::Center)
            .style(theme.meta_style())
            .block(Block::default().borders(Borders::ALL).border_style(theme.border_style()));
        f.render_widget(msg, area);
        return;
    }

    let selected = state.carousel.selected().unwrap_or(0);
    let total = state.replies.len();

    // Window of replies around the selection, pinned at the edges
    let window = CAROUSEL_WINDOW.min(total);
    let first = selected
        .saturating_sub(window / 2)
        .min(total.saturating_sub(window));

    let card_width = area.width / window as u16;
    let mut hits = Vec::new();

    for (slot, index) in (first..first + window).enumerate() {
        let reply = &state.replies[index];
        let cell = Rect {
            x: area.x + slot as u16 * card_width,
            y: area.y,
            width: card_width,
            height: area.height,
        };
        let is_selected = state.carousel.is_selected(index);
        render_reply_card(f, cell, app, reply, index, total, is_selected);
        hits.push((cell, HitTarget::Reply(index)));
    }
    app.hit_areas.extend(hits);
}

fn render_reply_card(
    f: &mut Frame,
    area: Rect,
    app: &App,
    reply: &Comment,
    index: usize,
    total: usize,
    selected: bool,
) {
    let theme = app.theme.theme();
    let inner_width = area.width.saturating_sub(2) as usize;

    let border_style = if selected {
        theme.border_focused_style()
    } else {
        theme.border_style()
    };

    let reply_count = match reply.total_reply_count {
        Some(n) => format!(" · ↳ {}", n),
        None if !reply.child_ids.is_empty() => format!(" · ↳ {}+", reply.child_ids.len()),
        None => String::new(),
    };

    let mut lines = vec![Line::from(Span::styled(
        ellipsize(
            &format!(
                "{} · {}{}",
                reply.author,
                format_relative_time(reply.time),
                reply_count
            ),
            inner_width,
        ),
        if selected {
            theme.selected_style()
        } else {
            theme.meta_style()
        },
    ))];

    // A few lines of body text; the preview modal has the full thing
    let body_lines = area.height.saturating_sub(3) as usize;
    for chunk in reply
        .text
        .split('\n')
        .filter(|l| !l.is_empty())
        .take(body_lines)
    {
        lines.push(Line::from(Span::styled(
            ellipsize(chunk, inner_width),
            Style::default().fg(theme.comment_text),
        )));
    }

    let title = format!(" {}/{} ", index + 1, total);
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title_bottom(Line::from(title).right_aligned()),
    );
    f.render_widget(card, area);
}
