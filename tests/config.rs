use feed_ranker::config::{FeedConfig, SourceConfig, SourceMode};

#[test]
fn config_roundtrips_through_toml_file() {
    let dir = std::env::temp_dir().join(format!("feed-ranker-config-{}", std::process::id()));
    let path = dir.join("feed.toml");

    let mut config = FeedConfig::default();
    config.feed.fixture_size = 12;
    config.feed.max_page_size = 40;
    config.write(&path).unwrap();

    let (loaded, loaded_path) = FeedConfig::load(Some(path.clone())).unwrap();
    assert_eq!(loaded_path, Some(path));
    assert_eq!(loaded.feed.fixture_size, 12);
    assert_eq!(loaded.feed.max_page_size, 40);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let config: FeedConfig = toml::from_str("[feed]\nfixture_seed = 7\n").unwrap();
    assert_eq!(config.feed.fixture_seed, 7);
    assert_eq!(config.feed.default_page_size, 20);
    assert_eq!(config.source.timeout_ms, 5000);
    assert_eq!(config.source.to_mode(), SourceMode::Local);
}

#[test]
fn source_mode_accepts_remote_aliases() {
    let mut source = SourceConfig::default();
    for (mode, expected) in [
        ("remote", SourceMode::Remote),
        ("API", SourceMode::Remote),
        ("local", SourceMode::Local),
        ("something-else", SourceMode::Local),
    ] {
        source.mode = mode.to_string();
        assert_eq!(source.to_mode(), expected, "mode {}", mode);
    }
}
