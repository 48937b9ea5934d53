use std::sync::Arc;

use kurbo::{Point, Rect};

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{CarouselError, CarouselResult};
use crate::render::canvas::{Painter, canvas_dims};
use crate::render::frame::FrameRGBA;
use crate::render::renderer::{CardRenderer, CardWorker};
use crate::story::card::{Card, CardKind};
use crate::style::theme::{Branding, Theme};
use crate::text::fonts::{Face, FontConfig, FontSet};
use crate::text::highlight::{Language, highlight};
use crate::text::shaper::TextShaper;
use crate::text::wrap::{TextMeasure, wrap_text};

const ACCENT_BAR_HEIGHT: f64 = 20.0;
const COVER_TITLE_SCALE: f32 = 1.2;
const COVER_TITLE_LIFT: f64 = 100.0;
const COVER_SUBTITLE_DROP: f64 = 50.0;
const CTA_BODY_LIFT: f64 = 50.0;
const CTA_PROMPT_DROP: f64 = 100.0;

const CODE_WINDOW_MARGIN: f64 = 60.0;
const CODE_WINDOW_RADIUS: f64 = 20.0;
const CODE_SHADOW_OFFSET: f64 = 10.0;
const CODE_CONTROL_RADIUS: f64 = 8.0;
const CODE_TEXT_INSET: f64 = 40.0;
const CODE_FIRST_BASELINE: f64 = 80.0;
const CODE_LINE_SPACING: f32 = 1.5;

/// Horizontal alignment of lines within a wrapped block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// Placement of a wrapped text block.
///
/// `(x, y)` is the anchor point; `(ax, ay)` is the fraction of the block's width/height that sits
/// left of/above it, so `(0.5, 0.5)` centers the block on the point.
#[derive(Clone, Copy, Debug)]
struct Placement {
    x: f64,
    y: f64,
    ax: f64,
    ay: f64,
    width: f32,
    spacing: f32,
    align: Align,
}

/// Card rasterizer owning the loaded typefaces and the theme.
///
/// Immutable after construction and cheap to clone. Drawing happens in a [`RenderSession`], which
/// holds the mutable shaping and raster state; one session per thread.
#[derive(Clone, Debug)]
pub struct Engine {
    fonts: Arc<FontSet>,
    theme: Arc<Theme>,
    branding: Arc<Branding>,
}

impl Engine {
    pub fn new(fonts: FontSet, theme: Theme, branding: Branding) -> CarouselResult<Self> {
        validate_theme(&theme)?;
        Ok(Self {
            fonts: Arc::new(fonts),
            theme: Arc::new(theme),
            branding: Arc::new(branding),
        })
    }

    /// Resolve fonts from `config` and build the engine. Any missing face is a
    /// [`CarouselError::FontLoad`].
    pub fn from_config(
        config: &FontConfig,
        theme: Theme,
        branding: Branding,
    ) -> CarouselResult<Self> {
        Self::new(FontSet::load(config)?, theme, branding)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Start a drawing session.
    pub fn session(&self) -> CarouselResult<RenderSession<'_>> {
        let shaper =
            TextShaper::new(&self.fonts).map_err(|e| CarouselError::render(0, e.to_string()))?;
        let painter = Painter::new(self.theme.canvas)?;
        Ok(RenderSession {
            engine: self,
            shaper,
            painter,
        })
    }

    /// Render one card in a throwaway session.
    pub fn render(&self, card: &Card) -> CarouselResult<FrameRGBA> {
        self.session()
            .map_err(|e| e.with_card(card.index()))?
            .render(card)
    }
}

fn validate_theme(theme: &Theme) -> CarouselResult<()> {
    canvas_dims(theme.canvas)?;
    if !theme.padding.is_finite() || theme.padding < 0.0 {
        return Err(CarouselError::config("theme padding must be finite and >= 0"));
    }
    let t = &theme.typography;
    for (role, size) in [
        ("title", t.title),
        ("subtitle", t.subtitle),
        ("body", t.body),
        ("code", t.code),
        ("footer", t.footer),
    ] {
        if !size.is_finite() || size <= 0.0 {
            return Err(CarouselError::config(format!(
                "typography.{role} must be finite and > 0"
            )));
        }
    }
    Ok(())
}

impl CardRenderer for Engine {
    type Worker<'a>
        = RenderSession<'a>
    where
        Self: 'a;

    fn worker(&self) -> CarouselResult<Self::Worker<'_>> {
        self.session()
    }

    fn canvas(&self) -> Canvas {
        self.theme.canvas
    }
}

/// Per-thread drawing state borrowed from an [`Engine`].
pub struct RenderSession<'e> {
    engine: &'e Engine,
    shaper: TextShaper,
    painter: Painter,
}

impl CardWorker for RenderSession<'_> {
    fn render_card(&mut self, card: &Card) -> CarouselResult<FrameRGBA> {
        self.render(card)
    }
}

impl RenderSession<'_> {
    /// Draw `card` into a fresh frame of the theme's canvas size.
    ///
    /// Empty strings draw nothing; the only failure is the background paint allocation.
    #[tracing::instrument(skip_all, fields(card = card.index(), variant = ?card.variant()))]
    pub fn render(&mut self, card: &Card) -> CarouselResult<FrameRGBA> {
        self.painter.begin();
        self.draw_background()
            .map_err(|e| e.with_card(card.index()))?;

        match &card.kind {
            CardKind::Cover { title, subtitle } => self.draw_cover(title, subtitle),
            CardKind::Intro { title, body } | CardKind::Content { title, body } => {
                self.draw_content(title, body)
            }
            CardKind::Code {
                title,
                code,
                language,
            } => self.draw_code(title, code, *language),
            CardKind::Cta { body } => self.draw_cta(body),
        }

        self.draw_footer(card);
        Ok(self.painter.finish())
    }

    fn theme(&self) -> &Theme {
        &self.engine.theme
    }

    fn width(&self) -> f64 {
        self.theme().canvas.width_f()
    }

    fn height(&self) -> f64 {
        self.theme().canvas.height_f()
    }

    fn padding(&self) -> f64 {
        f64::from(self.theme().padding)
    }

    fn draw_background(&mut self) -> CarouselResult<()> {
        let palette = &self.engine.theme.palette;
        let width = self.width();
        self.painter
            .fill_vertical_gradient(palette.background_start, palette.background_end)?;
        self.painter.fill_rect(
            Rect::new(0.0, 0.0, width, ACCENT_BAR_HEIGHT),
            palette.accent,
        );
        Ok(())
    }

    fn draw_cover(&mut self, title: &str, subtitle: &str) {
        let engine = self.engine;
        let theme = engine.theme.as_ref();
        let (w, h) = (self.width(), self.height());

        self.draw_wrapped(
            &title.to_uppercase(),
            Face::Bold,
            theme.typography.title * COVER_TITLE_SCALE,
            theme.palette.text_primary,
            Placement {
                x: w / 2.0,
                y: h / 2.0 - COVER_TITLE_LIFT,
                ax: 0.5,
                ay: 0.5,
                width: theme.text_width(),
                spacing: 1.2,
                align: Align::Center,
            },
        );
        self.draw_anchored(
            subtitle,
            Face::Regular,
            theme.typography.subtitle,
            theme.palette.accent,
            Point::new(w / 2.0, h / 2.0 + COVER_SUBTITLE_DROP),
            (0.5, 0.5),
        );
    }

    fn draw_header(&mut self, title: &str) {
        let engine = self.engine;
        let theme = engine.theme.as_ref();
        let p = self.padding();
        self.draw_anchored(
            title,
            Face::Bold,
            theme.typography.subtitle,
            theme.palette.accent,
            Point::new(p, p * 2.0),
            (0.0, 0.5),
        );
    }

    fn draw_content(&mut self, title: &str, body: &str) {
        let engine = self.engine;
        let theme = engine.theme.as_ref();
        let p = self.padding();

        self.draw_header(title);
        self.draw_wrapped(
            body,
            Face::Regular,
            theme.typography.body,
            theme.palette.text_primary,
            Placement {
                x: p,
                y: p * 4.0,
                ax: 0.0,
                ay: 0.0,
                width: theme.text_width(),
                spacing: 1.5,
                align: Align::Left,
            },
        );
    }

    fn draw_code(&mut self, title: &str, code: &str, language: Language) {
        let engine = self.engine;
        let theme = engine.theme.as_ref();
        let palette = &theme.palette;
        let (w, h, p) = (self.width(), self.height(), self.padding());

        self.draw_header(title);

        let window = CodeWindow::for_canvas(w, h, p);
        self.painter.fill_rounded_rect(
            window.rect + kurbo::Vec2::new(CODE_SHADOW_OFFSET, CODE_SHADOW_OFFSET),
            CODE_WINDOW_RADIUS,
            palette.code_shadow,
        );
        self.painter
            .fill_rounded_rect(window.rect, CODE_WINDOW_RADIUS, palette.code_background);
        for (i, color) in [
            palette.control_red,
            palette.control_yellow,
            palette.control_green,
        ]
        .into_iter()
        .enumerate()
        {
            let cx = window.rect.x0 + 30.0 * (i as f64 + 1.0);
            self.painter.fill_circle(
                Point::new(cx, window.rect.y0 + 30.0),
                CODE_CONTROL_RADIUS,
                color,
            );
        }

        let size = theme.typography.code;
        let line_height = f64::from(size * CODE_LINE_SPACING);
        let space = f64::from(self.shaper.measure(" ", Face::Mono, size));
        let left = window.rect.x0 + CODE_TEXT_INSET;

        let lines = highlight(code, language);
        let visible = window.visible_lines(size);
        if lines.len() > visible {
            tracing::debug!(
                skipped = lines.len() - visible,
                "code lines past the window bottom not drawn"
            );
        }

        for (i, tokens) in lines.iter().take(visible).enumerate() {
            let baseline = window.rect.y0 + CODE_FIRST_BASELINE + i as f64 * line_height;
            let mut x = left;
            for token in tokens {
                let advance = self.draw_at_baseline(
                    token.text,
                    Face::Mono,
                    size,
                    token.role.color(palette),
                    Point::new(x, baseline),
                );
                x += advance + space;
            }
        }
    }

    fn draw_cta(&mut self, body: &str) {
        let engine = self.engine;
        let (theme, branding) = (engine.theme.as_ref(), engine.branding.as_ref());
        let (w, h) = (self.width(), self.height());

        self.draw_wrapped(
            body,
            Face::Bold,
            theme.typography.title,
            theme.palette.text_primary,
            Placement {
                x: w / 2.0,
                y: h / 2.0 - CTA_BODY_LIFT,
                ax: 0.5,
                ay: 0.5,
                width: theme.text_width(),
                spacing: 1.3,
                align: Align::Center,
            },
        );
        self.draw_anchored(
            &branding.follow_prompt,
            Face::Regular,
            theme.typography.subtitle,
            theme.palette.accent,
            Point::new(w / 2.0, h / 2.0 + CTA_PROMPT_DROP),
            (0.5, 0.5),
        );
    }

    fn draw_footer(&mut self, card: &Card) {
        let engine = self.engine;
        let (theme, branding) = (engine.theme.as_ref(), engine.branding.as_ref());
        let inset = self.padding() / 2.0;
        let (w, y) = (self.width(), self.height() - inset);
        let size = theme.typography.footer;
        let color = theme.palette.text_secondary;

        self.draw_anchored(
            &branding.label.to_uppercase(),
            Face::Bold,
            size,
            color,
            Point::new(inset, y),
            (0.0, 0.5),
        );
        if let Some(label) = card.pagination.and_then(|p| p.label()) {
            self.draw_anchored(
                &label,
                Face::Bold,
                size,
                color,
                Point::new(w - inset, y),
                (1.0, 0.5),
            );
        }
    }

    /// One line positioned so that `anchor` sits at fraction `(ax, ay)` of its line box.
    fn draw_anchored(
        &mut self,
        text: &str,
        face: Face,
        size: f32,
        color: Rgba8,
        anchor: Point,
        (ax, ay): (f64, f64),
    ) {
        if text.is_empty() {
            return;
        }
        let shaped = self.shaper.shape(text, face, size, color);
        let origin = Point::new(
            anchor.x - ax * f64::from(shaped.width),
            anchor.y - ay * f64::from(shaped.height),
        );
        self.painter
            .draw_text(&shaped, &self.engine.fonts.face(face).font, origin);
    }

    /// One line with its baseline starting at `at`. Returns the advance width.
    fn draw_at_baseline(
        &mut self,
        text: &str,
        face: Face,
        size: f32,
        color: Rgba8,
        at: Point,
    ) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let shaped = self.shaper.shape(text, face, size, color);
        let origin = Point::new(at.x, at.y - f64::from(shaped.baseline));
        self.painter
            .draw_text(&shaped, &self.engine.fonts.face(face).font, origin);
        f64::from(shaped.width)
    }

    /// Greedy-wrapped block; line pitch is `size * spacing`.
    fn draw_wrapped(&mut self, text: &str, face: Face, size: f32, color: Rgba8, at: Placement) {
        let lines = wrap_text(text, face, size, at.width, &mut self.shaper);
        let pitch = f64::from(size * at.spacing);
        let block_height =
            lines.len() as f64 * pitch - f64::from((at.spacing - 1.0) * size);

        let left = at.x - at.ax * f64::from(at.width);
        let mut top = at.y - at.ay * block_height;
        for line in &lines {
            match at.align {
                Align::Left => {
                    self.draw_anchored(line, face, size, color, Point::new(left, top), (0.0, 0.0))
                }
                Align::Center => self.draw_anchored(
                    line,
                    face,
                    size,
                    color,
                    Point::new(left + f64::from(at.width) / 2.0, top),
                    (0.5, 0.0),
                ),
            }
            top += pitch;
        }
    }
}

/// Rounded "editor window" behind code text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CodeWindow {
    pub rect: Rect,
}

impl CodeWindow {
    pub fn for_canvas(width: f64, height: f64, padding: f64) -> Self {
        let y0 = padding * 3.5;
        let y1 = (height - padding * 3.0).max(y0);
        let x1 = (width - CODE_WINDOW_MARGIN).max(CODE_WINDOW_MARGIN);
        Self {
            rect: Rect::new(CODE_WINDOW_MARGIN, y0, x1, y1),
        }
    }

    /// Number of code lines whose baseline falls inside the window at `code_size`.
    pub fn visible_lines(&self, code_size: f32) -> usize {
        let pitch = f64::from(code_size * CODE_LINE_SPACING);
        let first = self.rect.y0 + CODE_FIRST_BASELINE;
        if first > self.rect.y1 || pitch <= 0.0 {
            return 0;
        }
        ((self.rect.y1 - first) / pitch).floor() as usize + 1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
