//! Shared utility functions

use chrono::Utc;

/// Ellipsize a title for the breadcrumb stack: at most `max_chars` characters,
/// with a trailing "..." when shortened.
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars).collect();
    format!("{}...", cut)
}

/// Format a unix timestamp as relative time: "just now", "5m ago", "3h ago",
/// "2d ago", then a plain date beyond a week.
pub fn format_relative_time(unix_secs: i64) -> String {
    format_relative_time_at(unix_secs, Utc::now().timestamp())
}

fn format_relative_time_at(unix_secs: i64, now_secs: i64) -> String {
    let diff = now_secs.saturating_sub(unix_secs);
    if diff < 60 {
        return "just now".to_string();
    }
    if diff < 3600 {
        return format!("{}m ago", diff / 60);
    }
    if diff < 86_400 {
        return format!("{}h ago", diff / 3600);
    }
    if diff < 604_800 {
        return format!("{}d ago", diff / 86_400);
    }
    match chrono::DateTime::from_timestamp(unix_secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "long ago".to_string(),
    }
}

/// Extract the host part of a URL for compact display ("example.com").
pub fn url_host(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("https://").or(url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("short", 40), "short");
        let long = "a".repeat(50);
        let out = ellipsize(&long, 40);
        assert_eq!(out.len(), 43);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = 1_700_000_000;
        assert_eq!(format_relative_time_at(now - 10, now), "just now");
        assert_eq!(format_relative_time_at(now - 300, now), "5m ago");
        assert_eq!(format_relative_time_at(now - 7200, now), "2h ago");
        assert_eq!(format_relative_time_at(now - 3 * 86_400, now), "3d ago");
        assert_eq!(format_relative_time_at(now - 30 * 86_400, now), "2023-10-15");
    }

    #[test]
    fn test_url_host() {
        assert_eq!(url_host("https://www.example.com/a/b?q=1"), Some("example.com"));
        assert_eq!(url_host("http://blog.rust-lang.org"), Some("blog.rust-lang.org"));
        assert_eq!(url_host("not a url"), None);
    }
}
