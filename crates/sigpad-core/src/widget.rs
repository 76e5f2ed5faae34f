//! The signature widget: display surface, result surface and strokes.

use crate::config::WidgetConfig;
use crate::error::{SignatureError, SignatureResult};
use crate::input::{Gesture, InputDevice, InputRouter, PointerEvent};
use crate::layout::{Container, pixel_size};
use crate::session::CaptureSession;
use crate::stroke::{Coordinates, Stroke, StrokeList, format_coordinate_string};
use crate::surface::{StrokeStyle, Surface};
use crate::transform::ScaleTransform;
use crate::watermark;
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::{Point, Rect, Size};
use peniko::Color;

/// Data URI header of an exported PNG. On its own it is the empty image.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Surfaces and derived geometry, present once the widget is initialized.
#[derive(Debug)]
struct Surfaces<S> {
    container: Container,
    display_size: Size,
    display: S,
    result: S,
    transform: ScaleTransform,
    display_style: StrokeStyle,
    result_style: StrokeStyle,
    /// Watermark text fixed at init so reset repaints the same background.
    watermark: Option<String>,
}

/// A signature capture widget over a [`Surface`] implementation.
///
/// Until [`init`](Self::init) is called there are no surfaces: drawing is
/// ignored and exports return empty values.
#[derive(Debug)]
pub struct SignatureWidget<S: Surface> {
    config: WidgetConfig,
    router: InputRouter,
    surfaces: Option<Surfaces<S>>,
    strokes: StrokeList,
    session: CaptureSession,
}

impl<S: Surface> Default for SignatureWidget<S> {
    fn default() -> Self {
        Self::new(WidgetConfig::default())
    }
}

impl<S: Surface> SignatureWidget<S> {
    /// Create an uninitialized widget listening to mouse input.
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            router: InputRouter::new(InputDevice::Mouse),
            surfaces: None,
            strokes: StrokeList::new(),
            session: CaptureSession::new(),
        }
    }

    /// Select the input device family.
    pub fn with_device(mut self, device: InputDevice) -> Self {
        self.router = InputRouter::new(device);
        self
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn device(&self) -> InputDevice {
        self.router.device()
    }

    pub fn is_initialized(&self) -> bool {
        self.surfaces.is_some()
    }

    /// Whether a stroke is currently being drawn.
    pub fn is_capturing(&self) -> bool {
        self.session.is_active()
    }

    /// Display size, unrounded. `None` before init.
    pub fn display_size(&self) -> Option<Size> {
        self.surfaces.as_ref().map(|s| s.display_size)
    }

    /// Display size divided by result size. `None` before init.
    pub fn scale_factor(&self) -> Option<f64> {
        self.surfaces.as_ref().map(|s| s.transform.factor())
    }

    /// Result surface size in pixels. `None` before init.
    pub fn result_size(&self) -> Option<(u32, u32)> {
        self.surfaces.as_ref().map(|s| {
            let size = s.result.size();
            (size.width as u32, size.height as u32)
        })
    }

    /// Finalized strokes in result space, unrounded.
    pub fn strokes(&self) -> &StrokeList {
        &self.strokes
    }

    pub fn display_surface(&self) -> Option<&S> {
        self.surfaces.as_ref().map(|s| &s.display)
    }

    pub fn result_surface(&self) -> Option<&S> {
        self.surfaces.as_ref().map(|s| &s.result)
    }

    /// Initialize with the configured result size and no strokes.
    pub fn init_default(&mut self, container: Container) -> SignatureResult<()> {
        let (width, height) = self.config.result_size();
        self.init(container, width, height, &StrokeList::new())
    }

    /// (Re)initialize the widget.
    ///
    /// The display surface takes the largest size with the result aspect
    /// ratio that fits the container. `seed` strokes, in result space, are
    /// replayed through the normal begin/extend/end path at the new scale.
    ///
    /// A container that leaves no room for the display surface is rejected
    /// with [`SignatureError::EmptyDisplay`] and the widget is left as it was.
    pub fn init(
        &mut self,
        container: Container,
        result_width: u32,
        result_height: u32,
        seed: &StrokeList,
    ) -> SignatureResult<()> {
        if result_width == 0 || result_height == 0 {
            return Err(SignatureError::InvalidSize {
                width: result_width,
                height: result_height,
            });
        }

        let ratio = result_width as f64 / result_height as f64;
        let display_size = container.fit(ratio);
        if !has_room(display_size) {
            return Err(SignatureError::EmptyDisplay {
                width: display_size.width,
                height: display_size.height,
            });
        }
        let transform = ScaleTransform::new(display_size.width, result_width as f64);
        let (display_w, display_h) = pixel_size(display_size);

        let display = S::create(display_w, display_h)?;
        let result = S::create(result_width, result_height)?;

        self.config.result_width = result_width;
        self.config.result_height = result_height;

        let ink: Color = self.config.ink.into();
        let watermark = self
            .config
            .watermark
            .enabled
            .then(|| self.config.watermark.text());

        let mut surfaces = Surfaces {
            container,
            display_size,
            display,
            result,
            transform,
            display_style: StrokeStyle::new(ink, transform.factor() * self.config.line_width),
            result_style: StrokeStyle::new(ink, self.config.line_width),
            watermark,
        };
        paint_result_background(&mut surfaces, &self.config);

        log::info!(
            "Signature initialized: display {:.1}x{:.1}, result {}x{}, scale {:.4}, {} seed strokes",
            display_size.width,
            display_size.height,
            result_width,
            result_height,
            transform.factor(),
            seed.len()
        );

        self.surfaces = Some(surfaces);
        self.strokes = StrokeList::new();
        self.session.cancel();

        for stroke in seed {
            self.replay(stroke, &transform);
        }
        Ok(())
    }

    /// Re-initialize for a new container, redrawing the current strokes.
    ///
    /// Does nothing before the widget has been initialized, or while the
    /// container leaves no room (e.g. it is hidden): the current surfaces
    /// and strokes are kept until a usable size arrives.
    pub fn resize(&mut self, container: Container) -> SignatureResult<()> {
        if !self.is_initialized() {
            return Ok(());
        }
        let (width, height) = self.config.result_size();
        let display_size = container.fit(width as f64 / height as f64);
        if !has_room(display_size) {
            log::debug!(
                "Skipping resize to empty display {:.1}x{:.1}",
                display_size.width,
                display_size.height
            );
            return Ok(());
        }
        let seed = self.strokes.clone();
        self.init(container, width, height, &seed)
    }

    /// Re-run [`resize`](Self::resize) with the container last used.
    pub fn refresh(&mut self) -> SignatureResult<()> {
        match self.surfaces.as_ref().map(|s| s.container) {
            Some(container) => self.resize(container),
            None => Ok(()),
        }
    }

    fn replay(&mut self, stroke: &Stroke, transform: &ScaleTransform) {
        let mut points = stroke.points.iter().map(|p| transform.result_to_display(*p));
        let Some(first) = points.next() else {
            return;
        };
        self.begin(first);
        for point in points {
            self.extend(point);
        }
        self.end();
    }

    /// Start a stroke at a display position.
    pub fn begin(&mut self, position: Point) {
        if self.surfaces.is_none() {
            log::warn!("Ignoring stroke start on an uninitialized signature");
            return;
        }
        self.session.begin(position);
    }

    /// Continue the active stroke. Ignored when no stroke is active.
    pub fn extend(&mut self, position: Point) {
        if let Some(surfaces) = self.surfaces.as_mut() {
            self.session
                .extend(&mut surfaces.display, &surfaces.display_style, position);
        }
    }

    /// Finish the active stroke. Ignored when no stroke is active.
    pub fn end(&mut self) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        if let Some(stroke) =
            self.session
                .end(&surfaces.transform, &mut surfaces.result, &surfaces.result_style)
        {
            self.strokes.push(stroke);
        }
    }

    /// Feed a raw host event through the input router.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match self.router.route(event) {
            Some(Gesture::Begin(p)) => self.begin(p),
            Some(Gesture::Extend(p)) => self.extend(p),
            Some(Gesture::End) => self.end(),
            None => {}
        }
    }

    /// Remove every stroke and repaint both surfaces to their initial state.
    pub fn reset(&mut self) {
        self.session.cancel();
        self.strokes.clear();
        if let Some(surfaces) = self.surfaces.as_mut() {
            surfaces.display.clear();
            paint_result_background(surfaces, &self.config);
            log::info!("Signature reset");
        }
    }

    /// The result surface as a PNG data URI.
    ///
    /// Returns [`PNG_DATA_URI_PREFIX`] alone before init.
    pub fn export_image(&self) -> SignatureResult<String> {
        let Some(surfaces) = self.surfaces.as_ref() else {
            return Ok(PNG_DATA_URI_PREFIX.to_string());
        };
        let png = surfaces.result.encode_png()?;
        Ok(format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(png)))
    }

    /// The base64 PNG payload without the data URI header.
    pub fn export_raw_image_bytes(&self) -> SignatureResult<String> {
        let uri = self.export_image()?;
        Ok(uri
            .split_once(',')
            .map(|(_, payload)| payload.to_string())
            .unwrap_or_default())
    }

    /// Strokes with every coordinate rounded to the nearest integer.
    pub fn export_coordinates(&self) -> Coordinates {
        self.strokes.to_coordinates()
    }

    /// Rounded strokes as `x,y,x,y:x,y,...`.
    pub fn export_coordinate_string(&self) -> String {
        format_coordinate_string(&self.export_coordinates())
    }

    /// Rounded strokes as JSON, `[[[x, y], ...], ...]`.
    pub fn export_coordinates_json(&self) -> SignatureResult<String> {
        Ok(serde_json::to_string(&self.export_coordinates())?)
    }
}

/// Whether a fitted display size can carry a finite, non-zero scale.
fn has_room(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

/// Clear the result surface, fill the background and draw the watermark.
fn paint_result_background<S: Surface>(surfaces: &mut Surfaces<S>, config: &WidgetConfig) {
    let result = &mut surfaces.result;
    let size = result.size();
    result.clear();
    result.fill_rect(Rect::from_origin_size(Point::ZERO, size), config.background.into());

    if let Some(text) = surfaces.watermark.as_deref() {
        let color: Color = config.watermark.color.into();
        for rect in watermark::layout_text(text, size) {
            result.fill_rect(rect, color);
        }
    }
}
