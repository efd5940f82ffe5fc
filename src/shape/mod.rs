//! Stateless path-string generation for line and area series.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::core::format::format_number;
use crate::core::{Scale, ScaleValue, SeriesItem};
use crate::error::{ChartError, ChartResult};

/// Vertex in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Interpolation between consecutive vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Curve {
    #[default]
    Linear,
    /// Uniform Catmull-Rom spline emitted as cubic Bézier segments.
    CatmullRom,
}

/// Projects items through the x and y scales.
///
/// Fails on the first item whose key or value has no pixel position, so a
/// caller never draws a partial series.
pub fn project_points<X, Y>(items: &[SeriesItem], x_scale: &X, y_scale: &Y) -> ChartResult<Vec<PathPoint>>
where
    X: Scale + ?Sized,
    Y: Scale + ?Sized,
{
    let offset = x_scale.tick_offset();
    let mut points = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let x = x_scale.to_position(&item.key).filter(|x| x.is_finite());
        let y = y_scale
            .to_position(&ScaleValue::Number(item.value))
            .filter(|y| y.is_finite());
        let (Some(x), Some(y)) = (x, y) else {
            return Err(ChartError::InvalidInput(format!(
                "item {index} cannot be positioned on the chart scales"
            )));
        };
        points.push(PathPoint::new(x + offset, y));
    }
    Ok(points)
}

/// SVG path data through `points`; empty input yields an empty string.
#[must_use]
pub fn line_path(points: &[PathPoint], curve: Curve) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut path = String::new();
    push_command(&mut path, 'M', &[*first]);
    append_segments(&mut path, points, curve);
    path
}

/// Closed SVG path between `points` and the horizontal line `y = baseline`.
#[must_use]
pub fn area_path(points: &[PathPoint], baseline: f64, curve: Curve) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    let mut path = line_path(points, curve);
    push_command(&mut path, 'L', &[PathPoint::new(last.x, baseline)]);
    push_command(&mut path, 'L', &[PathPoint::new(first.x, baseline)]);
    path.push('Z');
    path
}

/// Length of the drawn line, used for dash-offset reveal animations.
#[must_use]
pub fn path_length(points: &[PathPoint], curve: Curve) -> f64 {
    match curve {
        Curve::Linear => points.windows(2).map(|pair| pair[0].distance(pair[1])).sum(),
        Curve::CatmullRom => (0..points.len().saturating_sub(1))
            .map(|segment| {
                let [p0, c1, c2, p3] = bezier_segment(points, segment);
                bezier_length(p0, c1, c2, p3)
            })
            .sum(),
    }
}

fn append_segments(path: &mut String, points: &[PathPoint], curve: Curve) {
    match curve {
        Curve::Linear => {
            for point in &points[1..] {
                push_command(path, 'L', &[*point]);
            }
        }
        Curve::CatmullRom => {
            for segment in 0..points.len().saturating_sub(1) {
                let [_, c1, c2, end] = bezier_segment(points, segment);
                push_command(path, 'C', &[c1, c2, end]);
            }
        }
    }
}

/// Bézier control polygon for the span `points[segment] -> points[segment + 1]`.
fn bezier_segment(points: &[PathPoint], segment: usize) -> [PathPoint; 4] {
    let last = points.len() - 1;
    let p0 = points[segment.saturating_sub(1)];
    let p1 = points[segment];
    let p2 = points[(segment + 1).min(last)];
    let p3 = points[(segment + 2).min(last)];
    let c1 = PathPoint::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
    let c2 = PathPoint::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);
    [p1, c1, c2, p2]
}

fn bezier_length(p0: PathPoint, c1: PathPoint, c2: PathPoint, p3: PathPoint) -> f64 {
    const STEPS: usize = 16;
    let at = |t: f64| {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        PathPoint::new(
            a * p0.x + b * c1.x + c * c2.x + d * p3.x,
            a * p0.y + b * c1.y + c * c2.y + d * p3.y,
        )
    };
    let mut length = 0.0;
    let mut previous = p0;
    for step in 1..=STEPS {
        let next = at(step as f64 / STEPS as f64);
        length += previous.distance(next);
        previous = next;
    }
    length
}

fn push_command(path: &mut String, command: char, points: &[PathPoint]) {
    path.push(command);
    for (index, point) in points.iter().enumerate() {
        if index > 0 {
            path.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(path, "{},{}", format_number(point.x), format_number(point.y));
    }
}
