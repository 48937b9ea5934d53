use crate::text::fonts::Face;

/// Width measurement used by the line breaker.
///
/// The renderer measures with shaped text; tests use [`FixedAdvance`].
pub trait TextMeasure {
    /// Advance width of `text` set in `face` at `size` pixels.
    fn measure(&mut self, text: &str, face: Face, size: f32) -> f32;
}

/// Monospace stand-in: every char advances `size * ratio` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub ratio: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { ratio: 0.5 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str, _face: Face, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.ratio
    }
}

/// Greedy word wrap.
///
/// `\n` starts a new paragraph; inside a paragraph words are separated by any whitespace and
/// rejoined with one space. A word is never broken, so a single word wider than `max_width`
/// occupies its own line and overflows it. Empty paragraphs become empty lines.
pub fn wrap_text(
    text: &str,
    face: Face,
    size: f32,
    max_width: f32,
    measure: &mut impl TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure.measure(&candidate, face, size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
