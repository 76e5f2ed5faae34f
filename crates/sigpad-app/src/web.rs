//! WebAssembly host binding.
//!
//! The page measures the container, forwards pointer events and blits
//! `display_rgba()` into its canvas. Exports go through `call`, which keeps
//! the by-name method interface JavaScript callers expect.

use kurbo::{Point, Vec2};
use sigpad_core::{
    BorderInsets, Container, InputDevice, OperationOutput, PointerEvent,
    StrokeList, WidgetConfig, parse_coordinate_string,
};
use sigpad_render::{RasterSignature, RasterSurface};
use wasm_bindgen::prelude::*;

/// One signature widget exposed to JavaScript.
#[wasm_bindgen]
pub struct SignaturePad {
    widget: RasterSignature,
    container: Container,
}

#[wasm_bindgen]
impl SignaturePad {
    /// Create a pad. `touch` selects touch events instead of mouse events.
    #[wasm_bindgen(constructor)]
    pub fn new(touch: bool) -> SignaturePad {
        SignaturePad {
            widget: RasterSignature::new(WidgetConfig::default())
                .with_device(InputDevice::detect(touch)),
            container: Container::new(0.0, 0.0),
        }
    }

    /// Border width subtracted on every side of the container. Applies from
    /// the next `init` or `resize`.
    pub fn set_border(&mut self, border: f64) {
        self.container = self.container.with_borders(BorderInsets::uniform(border));
    }

    /// Size the pad to its container and replay `seed` (a coordinate string).
    pub fn init(
        &mut self,
        container_width: f64,
        container_height: f64,
        result_width: u32,
        result_height: u32,
        seed: &str,
    ) -> Result<(), JsValue> {
        self.container = Container::new(container_width, container_height)
            .with_borders(self.container.borders);
        let seed = StrokeList::from(&parse_coordinate_string(seed).map_err(to_js)?[..]);
        self.widget
            .init(self.container, result_width, result_height, &seed)
            .map_err(to_js)
    }

    /// Re-fit after a viewport resize, keeping the drawing.
    pub fn resize(&mut self, container_width: f64, container_height: f64) -> Result<(), JsValue> {
        self.container = Container::new(container_width, container_height)
            .with_borders(self.container.borders);
        self.widget.resize(self.container).map_err(to_js)
    }

    /// Pointer pressed at an offset position inside the canvas.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.widget.handle_pointer(&PointerEvent::MouseDown {
            position: Point::new(x, y),
        });
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.widget.handle_pointer(&PointerEvent::MouseMove {
            position: Point::new(x, y),
        });
    }

    /// Pointer released or left the canvas.
    pub fn pointer_up(&mut self) {
        self.widget.handle_pointer(&PointerEvent::MouseOut);
    }

    /// First touch in page coordinates plus the canvas page offset.
    pub fn touch_start(&mut self, page_x: f64, page_y: f64, offset_x: f64, offset_y: f64) {
        self.widget.handle_pointer(&PointerEvent::TouchStart {
            touches: vec![Point::new(page_x, page_y)],
            offset: Vec2::new(offset_x, offset_y),
        });
    }

    pub fn touch_move(&mut self, page_x: f64, page_y: f64, offset_x: f64, offset_y: f64) {
        self.widget.handle_pointer(&PointerEvent::TouchMove {
            touches: vec![Point::new(page_x, page_y)],
            offset: Vec2::new(offset_x, offset_y),
        });
    }

    pub fn touch_end(&mut self) {
        self.widget.handle_pointer(&PointerEvent::TouchEnd);
    }

    /// Call a plugin method by name: `init`, `reset`, `dataUrl`, `pngData`,
    /// `coordData` or `coordString`. Unknown names throw.
    pub fn call(&mut self, method: &str) -> Result<JsValue, JsValue> {
        match self.widget.invoke_by_name(method, self.container).map_err(to_js)? {
            OperationOutput::Done => Ok(JsValue::UNDEFINED),
            OperationOutput::Text(text) => Ok(JsValue::from_str(&text)),
            OperationOutput::Coordinates(coords) => {
                let json = serde_json::to_string(&coords).map_err(|e| to_js(e.to_string()))?;
                js_sys::JSON::parse(&json)
            }
        }
    }

    pub fn display_width(&self) -> u32 {
        self.widget.display_surface().map_or(0, RasterSurface::width)
    }

    pub fn display_height(&self) -> u32 {
        self.widget.display_surface().map_or(0, RasterSurface::height)
    }

    /// RGBA pixels of the display surface for `ImageData`.
    pub fn display_rgba(&self) -> Vec<u8> {
        self.widget
            .display_surface()
            .map(RasterSurface::rgba_data)
            .unwrap_or_default()
    }

    pub fn scale(&self) -> f64 {
        self.widget.scale_factor().unwrap_or(1.0)
    }

    pub fn result_width(&self) -> u32 {
        self.widget.result_size().map_or(0, |(width, _)| width)
    }

    pub fn result_height(&self) -> u32 {
        self.widget.result_size().map_or(0, |(_, height)| height)
    }
}

fn to_js(error: impl ToString) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("SigPad loaded (WASM)");
}
