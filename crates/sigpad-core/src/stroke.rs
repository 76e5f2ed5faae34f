//! Strokes and their exported forms.

use crate::error::{SignatureError, SignatureResult};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Separator between strokes in the coordinate string.
pub const STROKE_SEPARATOR: char = ':';
/// Separator between values inside one stroke of the coordinate string.
pub const VALUE_SEPARATOR: char = ',';

/// One continuous pointer-down-to-pointer-up gesture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    /// Points in the stroke, stored unrounded.
    #[serde(with = "point_pairs")]
    pub points: Vec<Point>,
}

impl Stroke {
    /// Create a new empty stroke.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Add a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the stroke leaves a visible mark (more than one point).
    pub fn is_visible(&self) -> bool {
        self.points.len() > 1
    }

    /// Divide every point by `factor`.
    pub fn scaled_down(&self, factor: f64) -> Self {
        Self::from_points(
            self.points
                .iter()
                .map(|p| Point::new(p.x / factor, p.y / factor))
                .collect(),
        )
    }

    /// One connected path through all points.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };

        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }

        path
    }

    /// Copy of this stroke with every coordinate rounded to the nearest integer.
    pub fn rounded(&self) -> Vec<CoordPoint> {
        self.points.iter().copied().map(CoordPoint::round).collect()
    }
}

/// Points as `[x, y]` pairs, matching the exported coordinate shape.
mod point_pairs {
    use kurbo::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error> {
        points
            .iter()
            .map(|p| [p.x, p.y])
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
        Ok(Vec::<[f64; 2]>::deserialize(deserializer)?
            .into_iter()
            .map(|[x, y]| Point::new(x, y))
            .collect())
    }
}

/// Integer point in result space, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordPoint(pub i32, pub i32);

impl CoordPoint {
    /// Round a floating point position to the nearest integer position.
    pub fn round(point: Point) -> Self {
        Self(point.x.round() as i32, point.y.round() as i32)
    }

    pub fn x(self) -> i32 {
        self.0
    }

    pub fn y(self) -> i32 {
        self.1
    }
}

impl From<CoordPoint> for Point {
    fn from(point: CoordPoint) -> Self {
        Point::new(point.0 as f64, point.1 as f64)
    }
}

/// Rounded, display-friendly copy of a stroke list.
pub type Coordinates = Vec<Vec<CoordPoint>>;

/// Ordered strokes captured by one widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeList {
    strokes: Vec<Stroke>,
}

impl StrokeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized stroke.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    /// Rounded copy of every stroke. Stored precision is left untouched.
    pub fn to_coordinates(&self) -> Coordinates {
        self.strokes.iter().map(Stroke::rounded).collect()
    }
}

impl From<Vec<Stroke>> for StrokeList {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }
}

impl From<&[Vec<CoordPoint>]> for StrokeList {
    fn from(coordinates: &[Vec<CoordPoint>]) -> Self {
        coordinates
            .iter()
            .map(|stroke| Stroke::from_points(stroke.iter().copied().map(Point::from).collect()))
            .collect::<Vec<_>>()
            .into()
    }
}

impl<'a> IntoIterator for &'a StrokeList {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}

/// Flatten coordinates into `x,y,x,y:x,y,...`.
pub fn format_coordinate_string(coordinates: &[Vec<CoordPoint>]) -> String {
    coordinates
        .iter()
        .map(|stroke| {
            stroke
                .iter()
                .map(|p| format!("{}{}{}", p.0, VALUE_SEPARATOR, p.1))
                .collect::<Vec<_>>()
                .join(&VALUE_SEPARATOR.to_string())
        })
        .collect::<Vec<_>>()
        .join(&STROKE_SEPARATOR.to_string())
}

/// Parse a coordinate string produced by [`format_coordinate_string`].
///
/// An empty (or whitespace-only) string is an empty list.
pub fn parse_coordinate_string(s: &str) -> SignatureResult<Coordinates> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }

    s.split(STROKE_SEPARATOR)
        .enumerate()
        .map(|(index, stroke)| parse_stroke(index, stroke))
        .collect()
}

fn parse_stroke(index: usize, stroke: &str) -> SignatureResult<Vec<CoordPoint>> {
    if stroke.is_empty() {
        return Ok(Vec::new());
    }

    let values = stroke
        .split(VALUE_SEPARATOR)
        .map(|v| {
            v.trim().parse::<i32>().map_err(|_| {
                SignatureError::InvalidCoordinates(format!(
                    "stroke {}: '{}' is not an integer",
                    index, v
                ))
            })
        })
        .collect::<SignatureResult<Vec<i32>>>()?;

    if values.len() % 2 != 0 {
        return Err(SignatureError::InvalidCoordinates(format!(
            "stroke {} has an odd number of values ({})",
            index,
            values.len()
        )));
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| CoordPoint(pair[0], pair[1]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_two_points() {
        let coords = vec![vec![CoordPoint(1, 2), CoordPoint(3, 4)]];
        assert_eq!(format_coordinate_string(&coords), "1,2,3,4");
    }

    #[test]
    fn test_format_multiple_strokes() {
        let coords = vec![
            vec![CoordPoint(1, 2), CoordPoint(3, 4)],
            vec![CoordPoint(5, 6)],
        ];
        assert_eq!(format_coordinate_string(&coords), "1,2,3,4:5,6");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_coordinate_string(&[]), "");
    }

    #[test]
    fn test_parse_reconstructs_coordinates() {
        let coords = vec![
            vec![CoordPoint(10, 20), CoordPoint(-3, 4), CoordPoint(7, 8)],
            vec![CoordPoint(0, 0)],
        ];
        let parsed = parse_coordinate_string(&format_coordinate_string(&coords)).unwrap();
        assert_eq!(parsed, coords);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_coordinate_string("").unwrap().is_empty());
        assert!(parse_coordinate_string("  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_odd_values() {
        let result = parse_coordinate_string("1,2,3");
        assert!(matches!(result, Err(SignatureError::InvalidCoordinates(_))));
    }

    #[test]
    fn test_parse_not_a_number() {
        let result = parse_coordinate_string("1,2:a,b");
        assert!(matches!(result, Err(SignatureError::InvalidCoordinates(_))));
    }

    #[test]
    fn test_rounding_does_not_mutate() {
        let mut list = StrokeList::new();
        list.push(Stroke::from_points(vec![Point::new(1.4, 2.6), Point::new(-1.5, 0.5)]));

        let coords = list.to_coordinates();
        assert_eq!(coords, vec![vec![CoordPoint(1, 3), CoordPoint(-2, 1)]]);

        let stored = list.iter().next().unwrap();
        assert!((stored.points[0].x - 1.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_shape() {
        let coords = vec![vec![CoordPoint(1, 2), CoordPoint(3, 4)]];
        let json = serde_json::to_string(&coords).unwrap();
        assert_eq!(json, "[[[1,2],[3,4]]]");
    }

    #[test]
    fn test_stroke_list_json() {
        let list = StrokeList::from(vec![Stroke::from_points(vec![
            Point::new(1.5, 2.0),
            Point::new(3.0, 4.25),
        ])]);
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, "[[[1.5,2.0],[3.0,4.25]]]");

        let back: StrokeList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn test_to_path() {
        let stroke = Stroke::from_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)]);
        assert_eq!(stroke.to_path().elements().len(), 2);
        assert!(Stroke::new().to_path().elements().is_empty());
    }

    #[test]
    fn test_scaled_down() {
        let stroke = Stroke::from_points(vec![Point::new(30.0, 15.0)]);
        let scaled = stroke.scaled_down(1.5);
        assert!((scaled.points[0].x - 20.0).abs() < 1e-10);
        assert!((scaled.points[0].y - 10.0).abs() < 1e-10);
    }
}
