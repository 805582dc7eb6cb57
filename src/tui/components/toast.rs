// Transient notification rendered over the bottom-right corner.
// Used for theme/view switches, clipboard results, and "no more stories".

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const TOAST_TTL: Duration = Duration::from_secs(2);
/// Cells between the toast border and the frame edge
const EDGE_GAP: u16 = 2;

pub struct Toast {
    pub message: String,
    shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    /// Expiry is polled from the app tick, not a timer.
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_TTL
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // Display width, not byte length: messages carry ✓/⚠ glyphs
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;
        let rect = Rect::new(
            area.right().saturating_sub(width + EDGE_GAP),
            area.bottom().saturating_sub(height + EDGE_GAP),
            width,
            height,
        );

        let body = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.fg))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border_focused))
                    .style(Style::default().bg(theme.bg)),
            );

        f.render_widget(Clear, rect);
        f.render_widget(body, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_toast_is_not_expired() {
        assert!(!Toast::new("Theme: Nord").is_expired());
    }
}
