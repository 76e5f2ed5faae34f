//! CPU raster surface.

use kurbo::{BezPath, PathEl, Rect, Size};
use peniko::Color;
use sigpad_core::{StrokeStyle, Surface, SurfaceError};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

/// Pixel buffer implementing [`Surface`] with anti-aliased strokes.
///
/// Strokes use round caps and joins. Each `stroke_path` call is filled as one
/// outline, so overlapping segments of one path do not darken.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    /// Underlying pixmap (premultiplied alpha).
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Raw RGBA bytes with straight alpha, row-major.
    pub fn rgba_data(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of one pixel, transparent outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixmap
            .pixel(x, y)
            .map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .unwrap_or([0; 4])
    }
}

impl Surface for RasterSurface {
    fn create(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::Allocate { width, height })?;
        Ok(Self { pixmap })
    }

    fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = rect.abs();
        let Some(rect) = tiny_skia::Rect::from_ltrb(
            rect.x0 as f32,
            rect.y0 as f32,
            rect.x1 as f32,
            rect.y1 as f32,
        ) else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &paint(color), Transform::identity(), None);
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        if style.width <= 0.0 {
            return;
        }
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let stroke = tiny_skia::Stroke {
            width: style.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint(style.color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let bytes = self
            .pixmap
            .encode_png()
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        log::debug!(
            "Encoded {}x{} surface as {} PNG bytes",
            self.width(),
            self.height(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn paint(color: Color) -> Paint<'static> {
    let rgba = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

/// Convert a kurbo path. `None` when nothing drawable remains, e.g. a lone
/// move-to.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => {
                builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32)
            }
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}
