//! SigPad Core Library
//!
//! Platform-agnostic signature capture: a display surface sized to its
//! container, a fixed-size result surface, and the stroke transform and
//! export logic between them.

pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod operation;
pub mod session;
pub mod stroke;
pub mod surface;
pub mod transform;
pub mod watermark;
pub mod widget;

pub use config::{SerializableColor, WatermarkConfig, WidgetConfig};
pub use error::{SignatureError, SignatureResult, SurfaceError};
pub use input::{Gesture, InputDevice, InputRouter, PointerEvent};
pub use layout::{BorderInsets, Container};
pub use operation::{Operation, OperationName, OperationOutput};
pub use session::CaptureSession;
pub use stroke::{
    CoordPoint, Coordinates, Stroke, StrokeList, format_coordinate_string,
    parse_coordinate_string,
};
pub use surface::{DrawCommand, RecordingSurface, StrokeStyle, Surface};
pub use transform::ScaleTransform;
pub use widget::{PNG_DATA_URI_PREFIX, SignatureWidget};
