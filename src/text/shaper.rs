use crate::foundation::core::Rgba8;
use crate::foundation::error::{CarouselError, CarouselResult};
use crate::text::fonts::{Face, FontSet};
use crate::text::wrap::TextMeasure;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A single shaped line of text.
pub struct ShapedText {
    pub layout: parley::Layout<TextBrushRgba8>,
    pub face: Face,
    /// Advance width in pixels.
    pub width: f32,
    /// Line box height in pixels.
    pub height: f32,
    /// Distance from the top of the line box to the first baseline.
    pub baseline: f32,
}

/// Shapes text with Parley against the three faces of a [`FontSet`] and nothing else.
///
/// System fonts are disabled in the private collection, so measurement only ever depends on the
/// loaded faces.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: [String; 3],
}

impl TextShaper {
    pub fn new(fonts: &FontSet) -> CarouselResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        font_ctx.collection =
            parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                shared: false,
                system_fonts: false,
            });

        let mut families: [String; 3] = Default::default();
        for (slot, face) in families.iter_mut().zip(Face::ALL) {
            let loaded = fonts.face(face);
            let registered = font_ctx.collection.register_fonts(
                parley::fontique::Blob::from(loaded.bytes.as_ref().clone()),
                None,
            );
            let names: Vec<String> = registered
                .iter()
                .filter_map(|(id, _)| font_ctx.collection.family_name(*id).map(str::to_string))
                .collect();
            *slot = names
                .iter()
                .find(|n| **n == loaded.family)
                .or(names.first())
                .cloned()
                .ok_or_else(|| {
                    CarouselError::font_load(face.name(), "registered font family has no name")
                })?;
        }

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            families,
        })
    }

    fn family(&self, face: Face) -> &str {
        match face {
            Face::Regular => &self.families[0],
            Face::Bold => &self.families[1],
            Face::Mono => &self.families[2],
        }
    }

    /// Shape `text` on one line (no wrapping).
    pub fn shape(&mut self, text: &str, face: Face, size: f32, color: Rgba8) -> ShapedText {
        let family = self.family(face).to_string();
        let weight = match face {
            Face::Bold => parley::style::FontWeight::BOLD,
            Face::Regular | Face::Mono => parley::style::FontWeight::NORMAL,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        builder.push_default(parley::style::StyleProperty::Brush(color.into()));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let baseline = layout
            .lines()
            .next()
            .map_or(size, |line| line.metrics().baseline);
        ShapedText {
            width: layout.full_width(),
            height: layout.height(),
            baseline,
            face,
            layout,
        }
    }
}

impl TextMeasure for TextShaper {
    fn measure(&mut self, text: &str, face: Face, size: f32) -> f32 {
        self.shape(text, face, size, Rgba8::rgb(0, 0, 0)).width
    }
}
