//! Drawing primitives over a `vello_cpu` render context.

use std::sync::Arc;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{CarouselError, CarouselResult};
use crate::render::frame::FrameRGBA;
use crate::text::shaper::ShapedText;

const SHAPE_TOLERANCE: f64 = 0.1;

/// One reusable CPU drawing surface, sized once for a canvas.
pub struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    gradient: Option<((Rgba8, Rgba8), vello_cpu::Image)>,
}

impl Painter {
    pub fn new(canvas: Canvas) -> CarouselResult<Self> {
        let (width, height) = canvas_dims(canvas)?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
            gradient: None,
        })
    }

    /// Drop everything drawn since the last [`Painter::finish`].
    pub fn begin(&mut self) {
        self.ctx.reset();
    }

    /// Cover the whole canvas with a top-to-bottom linear gradient.
    pub fn fill_vertical_gradient(&mut self, top: Rgba8, bottom: Rgba8) -> CarouselResult<()> {
        let paint = match &self.gradient {
            Some((stops, paint)) if *stops == (top, bottom) => paint.clone(),
            _ => {
                let (w, h) = (u32::from(self.width), u32::from(self.height));
                let bytes = vertical_gradient_premul(w, h, top, bottom);
                let pixmap = pixmap_from_premul_bytes(&bytes, w, h)?;
                let paint = vello_cpu::Image {
                    image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                    sampler: vello_cpu::peniko::ImageSampler::default(),
                };
                self.gradient = Some(((top, bottom), paint.clone()));
                paint
            }
        };

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        Ok(())
    }

    pub fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub fn fill_rounded_rect(&mut self, rect: kurbo::Rect, radius: f64, color: Rgba8) {
        self.fill_shape(&kurbo::RoundedRect::from_rect(rect, radius), color);
    }

    pub fn fill_circle(&mut self, center: kurbo::Point, radius: f64, color: Rgba8) {
        self.fill_shape(&kurbo::Circle::new(center, radius), color);
    }

    fn fill_shape(&mut self, shape: &impl kurbo::Shape, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        self.ctx.fill_path(&shape_to_cpu(shape));
    }

    /// Paint a shaped line with its line box's top-left corner at `origin`.
    pub fn draw_text(
        &mut self,
        text: &ShapedText,
        font: &vello_cpu::peniko::FontData,
        origin: kurbo::Point,
    ) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything drawn since [`Painter::begin`].
    pub fn finish(&mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

pub(crate) fn canvas_dims(canvas: Canvas) -> CarouselResult<(u16, u16)> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| CarouselError::config("canvas width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| CarouselError::config("canvas height exceeds u16"))?;
    if width == 0 || height == 0 {
        return Err(CarouselError::config("canvas width/height must be > 0"));
    }
    Ok((width, height))
}

/// Premultiplied RGBA8 rows lerped from `top` (first row) to `bottom` (last row).
pub fn vertical_gradient_premul(width: u32, height: u32, top: Rgba8, bottom: Rgba8) -> Vec<u8> {
    let lerp = |a: u8, b: u8, t: f64| -> u8 {
        (f64::from(a) + (f64::from(b) - f64::from(a)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    let denom = f64::from(height.saturating_sub(1).max(1));
    for y in 0..height {
        let t = f64::from(y) / denom;
        let row = Rgba8::rgba(
            lerp(top.r, bottom.r, t),
            lerp(top.g, bottom.g, t),
            lerp(top.b, bottom.b, t),
            lerp(top.a, bottom.a, t),
        )
        .premultiplied();
        for _ in 0..width {
            out.extend_from_slice(&row);
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CarouselResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CarouselError::render(0, "image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CarouselError::render(0, "image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(CarouselError::render(0, "image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn shape_to_cpu(shape: &impl kurbo::Shape) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(SHAPE_TOLERANCE) {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
