use super::*;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.api.base_url, "https://hacker-news.firebaseio.com/v0");
    assert_eq!(config.api.enrich_url, "https://hn.algolia.com/api/v1");
    assert_eq!(config.api.page_size, 30);
    assert_eq!(config.ui.view_mode, ViewMode::Grid);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.file_enabled);
}

#[test]
fn test_to_toml_round_trips() {
    // The template we write must parse back as a valid FileConfig
    let config = Config::default();
    let toml_str = config.to_toml();
    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(parsed.is_ok(), "default template must parse: {:?}", parsed.err());

    let file = parsed.unwrap();
    let resolved = Config::resolve(file);
    assert_eq!(resolved.api.page_size, config.api.page_size);
    assert_eq!(resolved.ui.view_mode, config.ui.view_mode);
    assert_eq!(resolved.logging.file_rotation, config.logging.file_rotation);
}

#[test]
fn test_file_overrides_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
        [ui]
        view_mode = "list"

        [api]
        page_size = 10
        "#,
    )
    .unwrap();
    let config = Config::resolve(file);
    assert_eq!(config.ui.view_mode, ViewMode::List);
    assert_eq!(config.api.page_size, 10);
    // Untouched fields keep defaults
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.ui.theme, "Dark");
}

#[test]
fn test_zero_page_size_rejected() {
    let file: FileConfig = toml::from_str("[api]\npage_size = 0\n").unwrap();
    let config = Config::resolve(file);
    assert_eq!(config.api.page_size, 30);
}

#[test]
fn test_unknown_view_mode_falls_back() {
    let file: FileConfig = toml::from_str("[ui]\nview_mode = \"mosaic\"\n").unwrap();
    let config = Config::resolve(file);
    assert_eq!(config.ui.view_mode, ViewMode::Grid);
}

#[test]
fn test_partial_sections_allowed() {
    let parsed: Result<FileConfig, _> = toml::from_str("");
    assert!(parsed.is_ok());
    let parsed: Result<FileConfig, _> = toml::from_str("[logging]\nlevel = \"debug\"\n");
    let config = Config::resolve(parsed.unwrap());
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_log_rotation_parse() {
    assert_eq!(LogRotation::parse("hourly"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("DAILY"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}

#[test]
fn test_log_rotation_round_trip() {
    for rotation in [LogRotation::Hourly, LogRotation::Daily, LogRotation::Never] {
        assert_eq!(LogRotation::parse(rotation.as_str()), rotation);
    }
}
