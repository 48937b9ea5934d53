use super::*;

#[test]
fn parses_minimal_record_with_defaults() {
    let r = ContentRecord::from_json_str(r#"{ "name": "fizz" }"#).unwrap();
    assert_eq!(r.name, "fizz");
    assert!(r.description.is_empty());
    assert!(r.tags.is_empty());
    assert_eq!(r.star_count(), 0);
    assert_eq!(r.author_name(), None);
}

#[test]
fn tags_are_a_sorted_set() {
    let r = ContentRecord::from_json_str(
        r#"{ "name": "x", "tags": ["web", "cli", "web"], "stars": 42, "author": "jdoe" }"#,
    )
    .unwrap();
    assert_eq!(r.tags.iter().collect::<Vec<_>>(), vec!["cli", "web"]);
    assert_eq!(r.star_count(), 42);
    assert_eq!(r.author_name(), Some("jdoe"));
}

#[test]
fn blank_author_counts_as_missing() {
    let mut r = ContentRecord::new("x");
    r.author = Some("   ".to_string());
    assert_eq!(r.author_name(), None);
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        ContentRecord::from_json_str("{"),
        Err(CarouselError::Serde(_))
    ));
}

#[test]
fn missing_file_is_a_config_error() {
    let err = ContentRecord::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, CarouselError::Config(_)));
}
