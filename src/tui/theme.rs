// Theme system for the TUI
//
// Provides customizable color themes that can be switched at runtime.
// Each theme defines colors for all UI elements.

use ratatui::style::{Color, Modifier, Style};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Dracula,
    Nord,
    Solarized,
}

impl ThemeKind {
    /// Get all available themes
    pub fn all() -> &'static [ThemeKind] {
        &[
            ThemeKind::Dark,
            ThemeKind::Light,
            ThemeKind::Dracula,
            ThemeKind::Nord,
            ThemeKind::Solarized,
        ]
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Dracula => "Dracula",
            ThemeKind::Nord => "Nord",
            ThemeKind::Solarized => "Solarized",
        }
    }

    /// Parse a theme name from config (case-insensitive, unknown -> Dark)
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            "dracula" => ThemeKind::Dracula,
            "nord" => ThemeKind::Nord,
            "solarized" => ThemeKind::Solarized,
            _ => ThemeKind::Dark,
        }
    }

    /// Get the theme configuration
    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Dracula => Theme::dracula(),
            ThemeKind::Nord => Theme::nord(),
            ThemeKind::Solarized => Theme::solarized(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Selection
    pub selected_bg: Color,
    pub selected_fg: Color,

    // Story card elements
    pub story_title: Color,
    pub points: Color,
    pub meta: Color,
    pub link: Color,
    pub comment_text: Color,
    pub breadcrumb: Color,
    pub error: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            border: Color::Gray,
            border_focused: Color::Cyan,

            title: Color::Cyan,
            status_bar: Color::Green,

            selected_bg: Color::DarkGray,
            selected_fg: Color::Yellow,

            story_title: Color::White,
            points: Color::Yellow,
            meta: Color::Gray,
            link: Color::Blue,
            comment_text: Color::White,
            breadcrumb: Color::DarkGray,
            error: Color::Red,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            border: Color::DarkGray,
            border_focused: Color::Blue,

            title: Color::Blue,
            status_bar: Color::DarkGray,

            selected_bg: Color::LightBlue,
            selected_fg: Color::Black,

            story_title: Color::Black,
            points: Color::Rgb(184, 134, 11), // Dark goldenrod
            meta: Color::DarkGray,
            link: Color::Blue,
            comment_text: Color::Black,
            breadcrumb: Color::Gray,
            error: Color::Red,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11),
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
            log_trace: Color::Gray,
        }
    }

    /// Dracula theme
    pub fn dracula() -> Self {
        Self {
            bg: Color::Rgb(40, 42, 54),
            fg: Color::Rgb(248, 248, 242),
            border: Color::Rgb(68, 71, 90),
            border_focused: Color::Rgb(189, 147, 249), // Purple

            title: Color::Rgb(139, 233, 253),     // Cyan
            status_bar: Color::Rgb(80, 250, 123), // Green

            selected_bg: Color::Rgb(68, 71, 90),
            selected_fg: Color::Rgb(241, 250, 140), // Yellow

            story_title: Color::Rgb(248, 248, 242),
            points: Color::Rgb(255, 184, 108), // Orange
            meta: Color::Rgb(98, 114, 164),    // Comment color
            link: Color::Rgb(139, 233, 253),
            comment_text: Color::Rgb(248, 248, 242),
            breadcrumb: Color::Rgb(98, 114, 164),
            error: Color::Rgb(255, 85, 85),

            log_error: Color::Rgb(255, 85, 85),
            log_warn: Color::Rgb(241, 250, 140),
            log_info: Color::Rgb(139, 233, 253),
            log_debug: Color::Rgb(98, 114, 164),
            log_trace: Color::Rgb(68, 71, 90),
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(236, 239, 244),
            border: Color::Rgb(76, 86, 106),
            border_focused: Color::Rgb(136, 192, 208), // Frost

            title: Color::Rgb(136, 192, 208),      // Frost
            status_bar: Color::Rgb(163, 190, 140), // Green

            selected_bg: Color::Rgb(67, 76, 94),
            selected_fg: Color::Rgb(235, 203, 139), // Yellow

            story_title: Color::Rgb(236, 239, 244),
            points: Color::Rgb(235, 203, 139),
            meta: Color::Rgb(76, 86, 106),
            link: Color::Rgb(129, 161, 193), // Frost 2
            comment_text: Color::Rgb(236, 239, 244),
            breadcrumb: Color::Rgb(76, 86, 106),
            error: Color::Rgb(191, 97, 106),

            log_error: Color::Rgb(191, 97, 106),
            log_warn: Color::Rgb(235, 203, 139),
            log_info: Color::Rgb(129, 161, 193),
            log_debug: Color::Rgb(76, 86, 106),
            log_trace: Color::Rgb(59, 66, 82),
        }
    }

    /// Solarized dark theme
    pub fn solarized() -> Self {
        Self {
            bg: Color::Rgb(0, 43, 54),
            fg: Color::Rgb(131, 148, 150),
            border: Color::Rgb(88, 110, 117),
            border_focused: Color::Rgb(38, 139, 210), // Blue

            title: Color::Rgb(38, 139, 210),     // Blue
            status_bar: Color::Rgb(133, 153, 0), // Green

            selected_bg: Color::Rgb(7, 54, 66),
            selected_fg: Color::Rgb(181, 137, 0), // Yellow

            story_title: Color::Rgb(147, 161, 161),
            points: Color::Rgb(181, 137, 0),
            meta: Color::Rgb(88, 110, 117),
            link: Color::Rgb(42, 161, 152), // Cyan
            comment_text: Color::Rgb(131, 148, 150),
            breadcrumb: Color::Rgb(88, 110, 117),
            error: Color::Rgb(220, 50, 47),

            log_error: Color::Rgb(220, 50, 47),
            log_warn: Color::Rgb(181, 137, 0),
            log_info: Color::Rgb(38, 139, 210),
            log_debug: Color::Rgb(88, 110, 117),
            log_trace: Color::Rgb(101, 123, 131),
        }
    }

    // Helper methods for creating styles

    /// Base style with theme foreground
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Border style (unfocused)
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Border style (focused)
    pub fn border_focused_style(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    /// Title style
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Status bar style
    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_bar)
    }

    /// Focused card/row highlight
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Error style
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Dimmed metadata style (author, age, host)
    pub fn meta_style(&self) -> Style {
        Style::default().fg(self.meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycle_wraps() {
        let mut kind = ThemeKind::Dark;
        for _ in 0..ThemeKind::all().len() {
            kind = kind.next();
        }
        assert_eq!(kind, ThemeKind::Dark);
    }

    #[test]
    fn parse_round_trips_names() {
        for &kind in ThemeKind::all() {
            assert_eq!(ThemeKind::parse(kind.name()), kind);
        }
        assert_eq!(ThemeKind::parse("unknown"), ThemeKind::Dark);
    }
}
