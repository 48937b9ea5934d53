//! Best-effort single-line syntax coloring for code cards.
//!
//! Lines are split on single spaces, not lexed. There is no awareness of block comments, nested
//! quotes or escape sequences, and no state survives from one line to the next: a `//` (or `#`)
//! token colors the rest of *its* line as a comment and nothing else.

use crate::foundation::core::Rgba8;
use crate::style::theme::Palette;

/// Highlighting rules for a code card.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Go,
    Shell,
}

const GO_KEYWORDS: &[&str] = &[
    "package",
    "import",
    "func",
    "return",
    "var",
    "const",
    "type",
    "struct",
    "interface",
    "map",
    "if",
    "else",
    "for",
    "range",
    "go",
    "defer",
];

const GO_LITERALS: &[&str] = &[
    "string", "int", "bool", "error", "nil", "true", "false", "byte",
];

const SHELL_KEYWORDS: &[&str] = &[
    "go", "cargo", "npm", "pip", "git", "curl", "sudo", "export", "if", "then", "else", "fi",
    "for", "do", "done",
];

const SHELL_LITERALS: &[&str] = &["true", "false"];

impl Language {
    /// Map a free-form language hint (`"bash"`, `"go"`, ...) to a rule set. Unknown hints use Go.
    pub fn from_hint(hint: &str) -> Self {
        match hint.trim().to_ascii_lowercase().as_str() {
            "bash" | "sh" | "shell" | "zsh" | "console" => Self::Shell,
            _ => Self::Go,
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Go => GO_KEYWORDS,
            Self::Shell => SHELL_KEYWORDS,
        }
    }

    pub fn literals(self) -> &'static [&'static str] {
        match self {
            Self::Go => GO_LITERALS,
            Self::Shell => SHELL_LITERALS,
        }
    }

    pub fn comment_marker(self) -> &'static str {
        match self {
            Self::Go => "//",
            Self::Shell => "#",
        }
    }

    pub fn quote_chars(self) -> &'static [char] {
        match self {
            Self::Go => &['"', '`'],
            Self::Shell => &['"', '\''],
        }
    }
}

/// Color role assigned to a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Keyword,
    Literal,
    String,
    Comment,
    /// Token containing `(`: probably a function or call.
    Call,
    Plain,
}

impl ColorRole {
    pub fn color(self, palette: &Palette) -> Rgba8 {
        match self {
            Self::Keyword => palette.syntax_keyword,
            Self::Literal | Self::Call => palette.syntax_function,
            Self::String => palette.syntax_string,
            Self::Comment => palette.syntax_comment,
            Self::Plain => palette.syntax_plain,
        }
    }
}

/// One space-delimited fragment of a code line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub role: ColorRole,
}

/// Split `line` on single spaces and assign each fragment a [`ColorRole`].
///
/// Empty fragments from consecutive spaces are kept so indentation still advances the cursor.
pub fn highlight_line(line: &str, language: Language) -> Vec<Token<'_>> {
    let marker = language.comment_marker();
    let mut in_comment = false;

    line.split(' ')
        .map(|text| {
            if in_comment || text.starts_with(marker) {
                in_comment = true;
                return Token {
                    text,
                    role: ColorRole::Comment,
                };
            }
            Token {
                text,
                role: classify(text, language),
            }
        })
        .collect()
}

/// Highlight every line of `code` independently.
pub fn highlight(code: &str, language: Language) -> Vec<Vec<Token<'_>>> {
    code.split('\n')
        .map(|line| highlight_line(line.strip_suffix('\r').unwrap_or(line), language))
        .collect()
}

fn classify(token: &str, language: Language) -> ColorRole {
    if language.keywords().contains(&token) {
        ColorRole::Keyword
    } else if language.literals().contains(&token) {
        ColorRole::Literal
    } else if token.starts_with(language.quote_chars()) {
        ColorRole::String
    } else if token.contains('(') {
        ColorRole::Call
    } else {
        ColorRole::Plain
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/highlight.rs"]
mod tests;
