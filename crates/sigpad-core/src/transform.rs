//! Conversion between display and result coordinate spaces.

use kurbo::{Affine, Point, Size};

/// Uniform scale between the display surface and the result surface.
///
/// `factor` is display size divided by result size. It is fixed for the
/// lifetime of one initialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    factor: f64,
}

impl ScaleTransform {
    /// Create a transform from a display width and the result width.
    pub fn new(display_width: f64, result_width: f64) -> Self {
        Self {
            factor: display_width / result_width,
        }
    }

    /// Create a transform from a raw factor.
    pub fn from_factor(factor: f64) -> Self {
        Self { factor }
    }

    /// Display size divided by result size.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Affine transform taking result coordinates to display coordinates.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.factor)
    }

    /// Convert a display point to result coordinates.
    pub fn display_to_result(&self, point: Point) -> Point {
        Point::new(point.x / self.factor, point.y / self.factor)
    }

    /// Convert a result point to display coordinates.
    pub fn result_to_display(&self, point: Point) -> Point {
        Point::new(point.x * self.factor, point.y * self.factor)
    }

    /// Scale a result-space size up to display space.
    pub fn result_size_to_display(&self, size: Size) -> Size {
        Size::new(size.width * self.factor, size.height * self.factor)
    }
}

impl Default for ScaleTransform {
    fn default() -> Self {
        Self::from_factor(1.0)
    }
}

/// Round a display position toward zero, the cheap integer conversion used
/// while drawing interactively.
pub fn truncate_point(point: Point) -> Point {
    Point::new(point.x.trunc(), point.y.trunc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let transform = ScaleTransform::default();
        let p = Point::new(12.5, 7.25);
        assert_eq!(transform.display_to_result(p), p);
    }

    #[test]
    fn test_display_to_result() {
        let transform = ScaleTransform::new(640.0, 320.0);
        let p = transform.display_to_result(Point::new(100.0, 50.0));
        assert!((p.x - 50.0).abs() < f64::EPSILON);
        assert!((p.y - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let transform = ScaleTransform::new(517.0, 320.0);
        let original = Point::new(123.0, 45.6);
        let back = transform.display_to_result(transform.result_to_display(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_affine_matches_result_to_display() {
        let transform = ScaleTransform::from_factor(1.75);
        let p = Point::new(10.0, 20.0);
        let a = transform.transform() * p;
        let b = transform.result_to_display(p);
        assert!((a.x - b.x).abs() < 1e-10);
        assert!((a.y - b.y).abs() < 1e-10);
    }

    #[test]
    fn test_truncate_toward_zero() {
        assert_eq!(truncate_point(Point::new(3.9, -2.7)), Point::new(3.0, -2.0));
    }
}
