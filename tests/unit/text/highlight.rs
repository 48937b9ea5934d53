use super::*;

fn roles(line: &str, language: Language) -> Vec<(&str, ColorRole)> {
    highlight_line(line, language)
        .into_iter()
        .map(|t| (t.text, t.role))
        .collect()
}

#[test]
fn classifies_go_tokens() {
    assert_eq!(
        roles(r#"func main() return "hi" nil x"#, Language::Go),
        vec![
            ("func", ColorRole::Keyword),
            ("main()", ColorRole::Call),
            ("return", ColorRole::Keyword),
            ("\"hi\"", ColorRole::String),
            ("nil", ColorRole::Literal),
            ("x", ColorRole::Plain),
        ]
    );
}

#[test]
fn comment_marker_colors_rest_of_line_only() {
    let lines = highlight("x := 1 // set x func\nfunc f()", Language::Go);
    let first: Vec<ColorRole> = lines[0].iter().map(|t| t.role).collect();
    assert_eq!(
        first,
        vec![
            ColorRole::Plain,
            ColorRole::Plain,
            ColorRole::Plain,
            ColorRole::Comment,
            ColorRole::Comment,
            ColorRole::Comment,
            ColorRole::Comment,
        ]
    );
    assert_eq!(lines[1][0].role, ColorRole::Keyword);
    assert_eq!(lines[1][1].role, ColorRole::Call);
}

#[test]
fn marker_must_start_the_token() {
    let toks = roles("http://example.com go", Language::Go);
    assert_eq!(toks[0].1, ColorRole::Plain);
    assert_eq!(toks[1].1, ColorRole::Keyword);
}

#[test]
fn tokenizing_is_idempotent() {
    let line = r#"  if err != nil { return fmt.Errorf("x") } // done"#;
    assert_eq!(
        highlight_line(line, Language::Go),
        highlight_line(line, Language::Go)
    );
}

#[test]
fn consecutive_spaces_keep_empty_tokens() {
    let toks = roles("    return", Language::Go);
    assert_eq!(toks.len(), 5);
    assert!(toks[..4].iter().all(|(t, r)| t.is_empty() && *r == ColorRole::Plain));
    assert_eq!(toks[4], ("return", ColorRole::Keyword));
}

#[test]
fn shell_rules_use_hash_comments_and_single_quotes() {
    assert_eq!(
        roles("go get github.com/x/fizz # latest 'q'", Language::Shell),
        vec![
            ("go", ColorRole::Keyword),
            ("get", ColorRole::Plain),
            ("github.com/x/fizz", ColorRole::Plain),
            ("#", ColorRole::Comment),
            ("latest", ColorRole::Comment),
            ("'q'", ColorRole::Comment),
        ]
    );
    assert_eq!(roles("'a'", Language::Shell)[0].1, ColorRole::String);
    assert_eq!(roles("'a'", Language::Go)[0].1, ColorRole::Plain);
}

#[test]
fn hints_map_to_languages() {
    assert_eq!(Language::from_hint("bash"), Language::Shell);
    assert_eq!(Language::from_hint(" SH "), Language::Shell);
    assert_eq!(Language::from_hint("go"), Language::Go);
    assert_eq!(Language::from_hint("cobol"), Language::Go);
}

#[test]
fn roles_map_to_palette_colors() {
    let p = Palette::default();
    assert_eq!(ColorRole::Keyword.color(&p), p.syntax_keyword);
    assert_eq!(ColorRole::Call.color(&p), p.syntax_function);
    assert_eq!(ColorRole::Literal.color(&p), p.syntax_function);
    assert_eq!(ColorRole::Plain.color(&p), p.syntax_plain);
}
