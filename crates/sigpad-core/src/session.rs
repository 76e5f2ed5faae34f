//! Stroke capture session.
//!
//! Turns a begin / extend* / end sequence of raw display positions into one
//! finalized [`Stroke`] in result space.

use crate::stroke::Stroke;
use crate::surface::{StrokeStyle, Surface};
use crate::transform::{ScaleTransform, truncate_point};
use kurbo::{BezPath, Point};

/// In-progress stroke state between `begin` and `end`.
#[derive(Debug, Clone)]
struct ActiveStroke {
    /// Raw display positions, unrounded.
    points: Vec<Point>,
    /// Last truncated position painted on the display surface.
    last_drawn: Point,
}

/// Capture session for one widget. At most one stroke is active at a time.
#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    active: Option<ActiveStroke>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stroke is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Number of raw points recorded in the active stroke.
    pub fn point_count(&self) -> usize {
        self.active.as_ref().map_or(0, |a| a.points.len())
    }

    /// Start a stroke at a display position.
    ///
    /// Nothing is painted until the first `extend`. An already open stroke is
    /// dropped.
    pub fn begin(&mut self, position: Point) {
        if let Some(previous) = self.active.take() {
            log::warn!(
                "Stroke begun while another was active; discarding {} points",
                previous.points.len()
            );
        }
        log::debug!("Stroke begin at ({:.1}, {:.1})", position.x, position.y);

        self.active = Some(ActiveStroke {
            points: vec![position],
            last_drawn: truncate_point(position),
        });
    }

    /// Append a display position and paint only the new segment.
    pub fn extend<S: Surface>(&mut self, display: &mut S, style: &StrokeStyle, position: Point) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let to = truncate_point(position);
        let mut segment = BezPath::new();
        segment.move_to(active.last_drawn);
        segment.line_to(to);
        display.stroke_path(&segment, style);

        active.last_drawn = to;
        active.points.push(position);
    }

    /// Finish the stroke: rescale it to result space and, if it has more than
    /// one point, replay it unrounded onto the result surface.
    ///
    /// Returns `None` when no stroke was active.
    pub fn end<S: Surface>(
        &mut self,
        transform: &ScaleTransform,
        result: &mut S,
        style: &StrokeStyle,
    ) -> Option<Stroke> {
        let active = self.active.take()?;

        let stroke = Stroke::from_points(active.points).scaled_down(transform.factor());
        if stroke.is_visible() {
            result.stroke_path(&stroke.to_path(), style);
        }
        log::debug!("Stroke end with {} points", stroke.len());

        Some(stroke)
    }

    /// Drop any in-progress stroke without finalizing it.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use peniko::Color;

    fn style() -> StrokeStyle {
        StrokeStyle::new(Color::from_rgba8(0, 0, 0, 255), 2.0)
    }

    #[test]
    fn test_extend_without_begin_is_noop() {
        let mut session = CaptureSession::new();
        let mut display = RecordingSurface::create(100, 50).unwrap();

        session.extend(&mut display, &style(), Point::new(5.0, 5.0));

        assert!(!session.is_active());
        assert!(display.commands().is_empty());
    }

    #[test]
    fn test_end_without_begin_is_noop() {
        let mut session = CaptureSession::new();
        let mut result = RecordingSurface::create(100, 50).unwrap();

        let stroke = session.end(&ScaleTransform::from_factor(2.0), &mut result, &style());

        assert!(stroke.is_none());
        assert!(result.commands().is_empty());
    }

    #[test]
    fn test_extend_paints_single_truncated_segment() {
        let mut session = CaptureSession::new();
        let mut display = RecordingSurface::create(100, 50).unwrap();

        session.begin(Point::new(1.7, 2.2));
        session.extend(&mut display, &style(), Point::new(10.9, 20.5));
        session.extend(&mut display, &style(), Point::new(15.1, 25.9));

        let strokes = display.strokes();
        assert_eq!(strokes.len(), 2);
        let mut expected = BezPath::new();
        expected.move_to(Point::new(10.0, 20.0));
        expected.line_to(Point::new(15.0, 25.0));
        assert_eq!(strokes[1], &expected);
        assert_eq!(session.point_count(), 3);
    }

    #[test]
    fn test_end_rescales_unrounded() {
        let mut session = CaptureSession::new();
        let mut display = RecordingSurface::create(200, 100).unwrap();
        let mut result = RecordingSurface::create(100, 50).unwrap();
        let transform = ScaleTransform::from_factor(2.0);

        session.begin(Point::new(3.0, 5.0));
        session.extend(&mut display, &style(), Point::new(9.0, 11.0));
        let stroke = session.end(&transform, &mut result, &style()).unwrap();

        assert_eq!(stroke.points, vec![Point::new(1.5, 2.5), Point::new(4.5, 5.5)]);
        assert_eq!(result.strokes().len(), 1);
        assert!(!session.is_active());
    }

    #[test]
    fn test_tap_draws_nothing() {
        let mut session = CaptureSession::new();
        let mut result = RecordingSurface::create(100, 50).unwrap();

        session.begin(Point::new(4.0, 4.0));
        let stroke = session
            .end(&ScaleTransform::from_factor(2.0), &mut result, &style())
            .unwrap();

        assert_eq!(stroke.len(), 1);
        assert!(result.commands().is_empty());
    }

    #[test]
    fn test_begin_discards_open_stroke() {
        let mut session = CaptureSession::new();
        let mut display = RecordingSurface::create(100, 50).unwrap();

        session.begin(Point::new(1.0, 1.0));
        session.extend(&mut display, &style(), Point::new(2.0, 2.0));
        session.begin(Point::new(8.0, 8.0));

        assert_eq!(session.point_count(), 1);
    }
}
