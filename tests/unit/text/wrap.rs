use super::*;

fn wrap(text: &str, max_width: f32) -> Vec<String> {
    // 10px per char.
    wrap_text(text, Face::Regular, 20.0, max_width, &mut FixedAdvance::default())
}

#[test]
fn breaks_greedily_at_word_boundaries() {
    assert_eq!(
        wrap("aaa bbb ccc ddd", 70.0),
        vec!["aaa bbb".to_string(), "ccc ddd".to_string()]
    );
}

#[test]
fn line_that_exactly_fits_is_kept() {
    assert_eq!(wrap("ab cd", 50.0), vec!["ab cd".to_string()]);
    assert_eq!(wrap("ab cd", 49.0), vec!["ab".to_string(), "cd".to_string()]);
}

#[test]
fn overlong_word_gets_its_own_line() {
    let lines = wrap("a supercalifragilistic b", 60.0);
    assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
}

#[test]
fn newlines_start_paragraphs() {
    assert_eq!(
        wrap("Category: Web\n\nTags: a, b", 1000.0),
        vec!["Category: Web", "", "Tags: a, b"]
    );
}

#[test]
fn whitespace_runs_collapse() {
    assert_eq!(wrap("  hello \t  world  ", 1000.0), vec!["hello world"]);
}

#[test]
fn empty_text_is_one_empty_line() {
    assert_eq!(wrap("", 100.0), vec![String::new()]);
}

#[test]
fn every_fitting_line_stays_within_width() {
    let text = "the quick brown fox jumps over the lazy dog again and again";
    let mut m = FixedAdvance { ratio: 0.6 };
    for line in wrap_text(text, Face::Bold, 30.0, 200.0, &mut m) {
        if line.contains(' ') {
            assert!(m.measure(&line, Face::Bold, 30.0) <= 200.0, "{line}");
        }
    }
}

#[test]
fn shaped_lines_fit_and_keep_the_word_sequence() {
    use crate::text::fonts::{FontSet, fixture_font_config};
    use crate::text::shaper::TextShaper;

    let fonts = FontSet::load(&fixture_font_config()).unwrap();
    let mut shaper = TextShaper::new(&fonts).unwrap();
    let text = "Gin is a HTTP web framework written in Go. It features a martini-like API \
                with much better performance, up to 40 times faster. supercalifragilistic";
    let words: Vec<&str> = text.split_whitespace().collect();

    for face in Face::ALL {
        for size in [24.0, 42.0, 72.0] {
            for width in [120.0, 300.0, 557.0, 920.0] {
                let lines = wrap_text(text, face, size, width, &mut shaper);

                let rebuilt: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
                assert_eq!(rebuilt, words, "{face} {size} {width}");

                for line in &lines {
                    if line.contains(' ') {
                        let measured = shaper.measure(line, face, size);
                        assert!(
                            measured <= width,
                            "{face} {size} {width}: {line} = {measured}"
                        );
                    }
                }
            }
        }
    }
}
