use crate::foundation::core::{Canvas, Rgba8};

/// Colors used by the drawing routines.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Top stop of the full-bleed background gradient.
    pub background_start: Rgba8,
    /// Bottom stop of the full-bleed background gradient.
    pub background_end: Rgba8,
    pub text_primary: Rgba8,
    pub text_secondary: Rgba8,
    pub accent: Rgba8,

    pub code_background: Rgba8,
    pub code_shadow: Rgba8,
    pub control_red: Rgba8,
    pub control_yellow: Rgba8,
    pub control_green: Rgba8,

    pub syntax_keyword: Rgba8,
    pub syntax_string: Rgba8,
    pub syntax_comment: Rgba8,
    /// Literal names and probable call tokens.
    pub syntax_function: Rgba8,
    pub syntax_plain: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_start: Rgba8::rgb(0x0f, 0x17, 0x2a),
            background_end: Rgba8::rgb(0x1e, 0x29, 0x3b),
            text_primary: Rgba8::rgb(0xf8, 0xfa, 0xfc),
            text_secondary: Rgba8::rgb(0x94, 0xa3, 0xb8),
            accent: Rgba8::rgb(0x38, 0xbd, 0xf8),

            code_background: Rgba8::rgb(0x1e, 0x1e, 0x1e),
            code_shadow: Rgba8::rgba(0, 0, 0, 100),
            control_red: Rgba8::rgb(0xff, 0x5f, 0x56),
            control_yellow: Rgba8::rgb(0xff, 0xbd, 0x2e),
            control_green: Rgba8::rgb(0x27, 0xc9, 0x3f),

            syntax_keyword: Rgba8::rgb(0xc5, 0x86, 0xc0),
            syntax_string: Rgba8::rgb(0xce, 0x91, 0x78),
            syntax_comment: Rgba8::rgb(0x6a, 0x99, 0x55),
            syntax_function: Rgba8::rgb(0xdc, 0xdc, 0xaa),
            syntax_plain: Rgba8::rgb(0xd4, 0xd4, 0xd4),
        }
    }
}

/// Font sizes in pixels per text role.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Typography {
    pub title: f32,
    pub subtitle: f32,
    pub body: f32,
    pub code: f32,
    pub footer: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title: 72.0,
            subtitle: 48.0,
            body: 42.0,
            code: 32.0,
            footer: 24.0,
        }
    }
}

/// Immutable drawing configuration shared by every card render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    pub canvas: Canvas,
    /// Horizontal/vertical padding in pixels. Text wraps at `canvas.width - 2 * padding`.
    pub padding: f32,
    pub palette: Palette,
    pub typography: Typography,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1080,
                height: 1080,
            },
            padding: 80.0,
            palette: Palette::default(),
            typography: Typography::default(),
        }
    }
}

impl Theme {
    /// Width available to wrapped text.
    pub fn text_width(&self) -> f32 {
        (self.canvas.width as f32 - self.padding * 2.0).max(0.0)
    }
}

/// Fixed strings stamped onto slides and used as storyboard fallbacks.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Corner label drawn on every slide. Rendered upper-cased.
    pub label: String,
    /// Follow prompt drawn under the call-to-action.
    pub follow_prompt: String,
    /// Cover subtitle used when the record has no category.
    pub generic_subtitle: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            label: "GO DAILY".to_string(),
            follow_prompt: "Follow @go.daily for more!".to_string(),
            generic_subtitle: "Go Library".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/theme.rs"]
mod tests;
