// Modal overlays: reply preview, captured logs, and the help screen.
// All render into a centered rect cleared on top of the current view.

use crate::logging::LogLevel;
use crate::tui::app::App;
use crate::tui::modal::Modal;
use crate::util::format_relative_time;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let Some(modal) = &app.modal else { return };
    let area = centered_rect(f.area(), 70, 70);
    f.render_widget(Clear, area);

    match modal {
        Modal::Preview(id) => render_preview(f, area, app, *id),
        Modal::Logs => render_logs(f, area, app),
        Modal::Help => render_help(f, area, app),
    }
}

fn render_preview(f: &mut Frame, area: Rect, app: &App, id: u64) {
    let theme = app.theme.theme();

    let Some(reply) = app.reply_by_id(id) else {
        // Reply vanished from under the modal (refresh mid-preview)
        let msg = Paragraph::new("Reply no longer available")
            .style(theme.meta_style())
            .block(Block::default().borders(Borders::ALL).border_style(theme.border_focused_style()));
        f.render_widget(msg, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "{} · {}{}",
                reply.author,
                format_relative_time(reply.time),
                match reply.total_reply_count {
                    Some(n) => format!(" · {} replies in thread", n),
                    None => String::new(),
                }
            ),
            theme.meta_style(),
        )),
        Line::from(""),
    ];
    for paragraph in reply.text.split('\n') {
        lines.push(Line::from(Span::styled(
            paragraph.to_string(),
            Style::default().fg(theme.comment_text),
        )));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.modal_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_focused_style())
                .title(Span::styled(" Preview ", theme.title_style()))
                .title_bottom(Line::from(" Enter open · Space close ").right_aligned()),
        );
    f.render_widget(body, area);
}

fn render_logs(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme.theme();
    let entries = app.log_buffer.get_all();

    let lines: Vec<Line> = entries
        .iter()
        .map(|entry| {
            let color = match entry.level {
                LogLevel::Error => theme.log_error,
                LogLevel::Warn => theme.log_warn,
                LogLevel::Info => theme.log_info,
                LogLevel::Debug => theme.log_debug,
                LogLevel::Trace => theme.log_trace,
            };
            Line::from(vec![
                Span::styled(
                    format!("{} {:5} ", entry.timestamp.format("%H:%M:%S"), entry.level.as_str()),
                    Style::default().fg(color),
                ),
                Span::styled(entry.message.clone(), theme.base_style()),
            ])
        })
        .collect();

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.modal_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_focused_style())
                .title(Span::styled(" Logs ", theme.title_style())),
        );
    f.render_widget(body, area);
}

fn render_help(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme.theme();

    let entries: &[(&str, &str)] = &[
        ("↑ ↓ ← →", "move focus (grid: all four; list: up/down)"),
        ("h j k l", "same moves, vim style"),
        ("Enter", "open story / reply / load more"),
        ("Esc", "back (no-op on home)"),
        ("← →", "move through replies (item view)"),
        ("Space", "preview the selected reply"),
        ("v", "toggle grid/list layout"),
        ("t", "cycle color theme"),
        ("r", "refresh current screen"),
        ("c", "copy focused story link"),
        ("L", "show captured logs"),
        ("?", "this help"),
        ("q", "quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, desc) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>8}  ", key), theme.selected_style()),
            Span::styled(*desc, theme.base_style()),
        ]));
    }

    let body = Paragraph::new(lines)
        .scroll((app.modal_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_focused_style())
                .title(Span::styled(" Help ", theme.title_style())),
        );
    f.render_widget(body, area);
}

/// Centered rect covering the given percentages of the frame
fn centered_rect(frame: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = frame.width * percent_x / 100;
    let height = frame.height * percent_y / 100;
    Rect {
        x: frame.x + (frame.width.saturating_sub(width)) / 2,
        y: frame.y + (frame.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
