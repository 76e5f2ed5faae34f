//! Fitting the display surface into its container.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Border widths around the display surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BorderInsets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl BorderInsets {
    /// Same border width on every side.
    pub fn uniform(width: f64) -> Self {
        Self {
            left: width,
            right: width,
            top: width,
            bottom: width,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Measured container of the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub borders: BorderInsets,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            borders: BorderInsets::default(),
        }
    }

    pub fn with_borders(mut self, borders: BorderInsets) -> Self {
        self.borders = borders;
        self
    }

    /// Space left for the surface once borders are taken off.
    pub fn available(&self) -> Size {
        Size::new(
            (self.width - self.borders.horizontal()).max(0.0),
            (self.height - self.borders.vertical()).max(0.0),
        )
    }

    /// Largest size with the given width/height ratio that fits the
    /// available space.
    pub fn fit(&self, ratio: f64) -> Size {
        let max = self.available();
        if max.width > max.height * ratio {
            Size::new(max.height * ratio, max.height)
        } else {
            Size::new(max.width, max.width / ratio)
        }
    }
}

/// Whole pixel size of a surface, never smaller than 1x1.
pub fn pixel_size(size: Size) -> (u32, u32) {
    (
        (size.width.trunc() as u32).max(1),
        (size.height.trunc() as u32).max(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_height_limited() {
        let size = Container::new(1000.0, 200.0).fit(2.0);
        assert!((size.width - 400.0).abs() < f64::EPSILON);
        assert!((size.height - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_width_limited() {
        let size = Container::new(300.0, 600.0).fit(2.0);
        assert!((size.width - 300.0).abs() < f64::EPSILON);
        assert!((size.height - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_borders_reduce_available_space() {
        let container = Container::new(644.0, 1000.0).with_borders(BorderInsets::uniform(2.0));
        let size = container.fit(2.0);
        assert!((size.width - 640.0).abs() < f64::EPSILON);
        assert!((size.height - 320.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_preserves_ratio() {
        for (w, h) in [(517.0, 233.0), (100.0, 900.0), (1920.0, 1080.0), (333.3, 166.7)] {
            let size = Container::new(w, h).fit(320.0 / 160.0);
            let sx = size.width / 320.0;
            let sy = size.height / 160.0;
            assert!((sx - sy).abs() < 1e-10, "{}x{}", w, h);
        }
    }

    #[test]
    fn test_negative_space_clamps() {
        let container = Container::new(2.0, 2.0).with_borders(BorderInsets::uniform(5.0));
        assert_eq!(container.fit(2.0), Size::ZERO);
        assert_eq!(pixel_size(Size::ZERO), (1, 1));
    }
}
