//! Typed widget operations and their host-facing names.

use crate::error::{SignatureError, SignatureResult};
use crate::layout::Container;
use crate::stroke::{Coordinates, StrokeList};
use crate::surface::Surface;
use crate::widget::SignatureWidget;
use std::fmt;
use std::str::FromStr;

/// Names a host uses to call into the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationName {
    Init,
    Reset,
    DataUrl,
    PngData,
    CoordData,
    CoordString,
}

impl OperationName {
    pub const ALL: [OperationName; 6] = [
        OperationName::Init,
        OperationName::Reset,
        OperationName::DataUrl,
        OperationName::PngData,
        OperationName::CoordData,
        OperationName::CoordString,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationName::Init => "init",
            OperationName::Reset => "reset",
            OperationName::DataUrl => "dataUrl",
            OperationName::PngData => "pngData",
            OperationName::CoordData => "coordData",
            OperationName::CoordString => "coordString",
        }
    }
}

impl FromStr for OperationName {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| SignatureError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully specified operation on a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Init {
        container: Container,
        result_width: u32,
        result_height: u32,
        seed: StrokeList,
    },
    Reset,
    DataUrl,
    PngData,
    CoordData,
    CoordString,
}

impl Operation {
    pub fn name(&self) -> OperationName {
        match self {
            Operation::Init { .. } => OperationName::Init,
            Operation::Reset => OperationName::Reset,
            Operation::DataUrl => OperationName::DataUrl,
            Operation::PngData => OperationName::PngData,
            Operation::CoordData => OperationName::CoordData,
            Operation::CoordString => OperationName::CoordString,
        }
    }

    /// Build an argument-free operation from its name.
    ///
    /// `init` needs arguments and is rejected here; use [`Operation::Init`].
    pub fn from_name(name: OperationName) -> Option<Self> {
        match name {
            OperationName::Init => None,
            OperationName::Reset => Some(Operation::Reset),
            OperationName::DataUrl => Some(Operation::DataUrl),
            OperationName::PngData => Some(Operation::PngData),
            OperationName::CoordData => Some(Operation::CoordData),
            OperationName::CoordString => Some(Operation::CoordString),
        }
    }
}

/// Value produced by [`SignatureWidget::invoke`].
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput {
    /// The operation only changed widget state.
    Done,
    Text(String),
    Coordinates(Coordinates),
}

impl<S: Surface> SignatureWidget<S> {
    /// Run one operation.
    pub fn invoke(&mut self, operation: Operation) -> SignatureResult<OperationOutput> {
        log::debug!("Invoking {}", operation.name());
        match operation {
            Operation::Init {
                container,
                result_width,
                result_height,
                seed,
            } => {
                self.init(container, result_width, result_height, &seed)?;
                Ok(OperationOutput::Done)
            }
            Operation::Reset => {
                self.reset();
                Ok(OperationOutput::Done)
            }
            Operation::DataUrl => self.export_image().map(OperationOutput::Text),
            Operation::PngData => self.export_raw_image_bytes().map(OperationOutput::Text),
            Operation::CoordData => Ok(OperationOutput::Coordinates(self.export_coordinates())),
            Operation::CoordString => Ok(OperationOutput::Text(self.export_coordinate_string())),
        }
    }

    /// Parse a host method name and run it.
    ///
    /// Unknown names fail immediately with
    /// [`SignatureError::UnknownOperation`]. `init` is served with the
    /// configured result size, no seed, and `container`.
    pub fn invoke_by_name(
        &mut self,
        name: &str,
        container: Container,
    ) -> SignatureResult<OperationOutput> {
        let name: OperationName = name.parse()?;
        let operation = match Operation::from_name(name) {
            Some(operation) => operation,
            None => Operation::Init {
                container,
                result_width: self.config().result_width,
                result_height: self.config().result_height,
                seed: StrokeList::new(),
            },
        };
        self.invoke(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use kurbo::Point;

    type Widget = SignatureWidget<RecordingSurface>;

    #[test]
    fn test_parse_names() {
        for name in OperationName::ALL {
            assert_eq!(name.as_str().parse::<OperationName>().unwrap(), name);
        }
    }

    #[test]
    fn test_unknown_name_fails() {
        let result = "clear".parse::<OperationName>();
        assert!(matches!(result, Err(SignatureError::UnknownOperation(ref n)) if n == "clear"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!("dataurl".parse::<OperationName>().is_err());
    }

    #[test]
    fn test_invoke_by_name_unknown() {
        let mut widget = Widget::default();
        let result = widget.invoke_by_name("undo", Container::new(100.0, 50.0));
        assert!(matches!(result, Err(SignatureError::UnknownOperation(_))));
    }

    #[test]
    fn test_invoke_sequence() {
        let mut widget = Widget::default();
        let output = widget
            .invoke(Operation::Init {
                container: Container::new(320.0, 160.0),
                result_width: 320,
                result_height: 160,
                seed: StrokeList::new(),
            })
            .unwrap();
        assert_eq!(output, OperationOutput::Done);

        widget.begin(Point::new(2.0, 4.0));
        widget.extend(Point::new(6.0, 8.0));
        widget.end();

        assert_eq!(
            widget.invoke(Operation::CoordString).unwrap(),
            OperationOutput::Text("2,4,6,8".to_string())
        );
        assert_eq!(widget.invoke(Operation::Reset).unwrap(), OperationOutput::Done);
        assert_eq!(
            widget.invoke(Operation::CoordData).unwrap(),
            OperationOutput::Coordinates(Vec::new())
        );
    }

    #[test]
    fn test_invoke_by_name_init_uses_config_size() {
        let mut widget = Widget::default();
        widget
            .invoke_by_name("init", Container::new(640.0, 640.0))
            .unwrap();
        assert!((widget.scale_factor().unwrap() - 2.0).abs() < f64::EPSILON);

        match widget.invoke_by_name("dataUrl", Container::new(0.0, 0.0)).unwrap() {
            OperationOutput::Text(uri) => assert!(uri.starts_with("data:image/png;base64,")),
            other => panic!("unexpected output {:?}", other),
        }
    }
}
