use super::*;

#[test]
fn default_strategy_formats_go_get_without_scheme() {
    let s = ModuleFetchStrategy::default();
    assert_eq!(
        s.install_command("https://github.com/x/fizz").as_deref(),
        Some("go get github.com/x/fizz")
    );
    assert_eq!(
        s.install_command("http://github.com/x/fizz").as_deref(),
        Some("go get github.com/x/fizz")
    );
    assert_eq!(
        s.install_command("github.com/x/fizz").as_deref(),
        Some("go get github.com/x/fizz")
    );
}

#[test]
fn unrecognized_hosts_produce_nothing() {
    let s = ModuleFetchStrategy::default();
    assert_eq!(s.install_command("https://example.com/x/fizz"), None);
    assert_eq!(s.install_command(""), None);
}

#[test]
fn custom_markers_and_command() {
    let s = ModuleFetchStrategy::new("cargo add", &["crates.io/crates/"]);
    assert_eq!(
        s.install_command("https://crates.io/crates/serde").as_deref(),
        Some("cargo add crates.io/crates/serde")
    );
    assert_eq!(s.language(), Language::Shell);
}

#[test]
fn empty_marker_never_matches() {
    let s = ModuleFetchStrategy::new("go get", &[""]);
    assert!(!s.recognizes("https://anything"));
}

#[test]
fn strip_scheme_only_touches_the_prefix() {
    assert_eq!(strip_scheme("https://a/https://b"), "a/https://b");
    assert_eq!(strip_scheme("ftp://a"), "ftp://a");
}

#[test]
fn language_follows_the_configured_hint() {
    assert_eq!(ModuleFetchStrategy::default().language(), Language::Shell);
    let go = ModuleFetchStrategy::default().with_language("go");
    assert_eq!(go.language(), Language::Go);
    let unknown = ModuleFetchStrategy::default().with_language("cobol");
    assert_eq!(unknown.language(), Language::Go);

    let parsed: ModuleFetchStrategy = serde_json::from_str(r#"{"language": "bash"}"#).unwrap();
    assert_eq!(parsed.language(), Language::Shell);
    assert_eq!(parsed.command, "go get");
}
