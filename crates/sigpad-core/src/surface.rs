//! Drawing surface abstraction.

use crate::error::SurfaceError;
use kurbo::{BezPath, Rect, Size};
use peniko::Color;

/// Stroke appearance for a path.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// A 2D bitmap target the widget draws on.
///
/// Implementations can wrap a browser canvas, a CPU pixel buffer or anything
/// else that can stroke paths and encode itself as PNG.
pub trait Surface {
    /// Allocate a transparent surface of the given pixel size.
    fn create(width: u32, height: u32) -> Result<Self, SurfaceError>
    where
        Self: Sized;

    /// Pixel size of the surface.
    fn size(&self) -> Size;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Fill a rectangle with an opaque or translucent color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a path in one pass.
    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle);

    /// Encode the surface contents as a PNG file.
    fn encode_png(&self) -> Result<Vec<u8>, SurfaceError>;
}

/// Drawing call captured by [`RecordingSurface`].
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear,
    FillRect { rect: Rect, color: Color },
    StrokePath { path: BezPath, style: StrokeStyle },
}

/// Surface that records drawing calls instead of rasterizing them.
///
/// `encode_png` returns a deterministic byte dump of the recorded commands,
/// so two recordings with the same history export identically.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// All commands since the surface was created.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Stroked paths since the last clear.
    pub fn strokes(&self) -> Vec<&BezPath> {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map_or(0, |i| i + 1);
        self.commands[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokePath { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn create(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::Allocate { width, height });
        }
        Ok(Self {
            size: Size::new(width as f64, height as f64),
            commands: Vec::new(),
        })
    }

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            style: *style,
        });
    }

    fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map_or(0, |i| i + 1);
        Ok(format!("{:?}", &self.commands[start..]).into_bytes())
    }
}
