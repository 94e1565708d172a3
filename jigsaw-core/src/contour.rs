//! Piece outlines.
//!
//! A contour starts at the piece's bottom-left corner and walks the square
//! counter-clockwise: bottom edge left to right, right edge upward, top edge
//! right to left, left edge downward. Tab and socket edges replace the middle
//! 40% of the edge with a cubic bezier bump.

use geo::{Area, Contains};
use geo_types::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

use crate::constants::{CURVE_BULGE, CURVE_END, CURVE_START};
use crate::edge::{EdgeSet, EdgeShape, Side};
use crate::models::Point;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Line { to: Point },
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
}

impl Segment {
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line { to } | Segment::Cubic { to, .. } => to,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub start: Point,
    pub segments: Vec<Segment>,
}

/// Corner the edge starts from, its unit direction and its outward normal,
/// following the counter-clockwise walk.
fn edge_frame(side: Side, size: f64) -> (Point, Point, Point) {
    match side {
        Side::Bottom => (Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, -1.0)),
        Side::Right => (Point::new(size, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 0.0)),
        Side::Top => (Point::new(size, size), Point::new(-1.0, 0.0), Point::new(0.0, 1.0)),
        Side::Left => (Point::new(0.0, size), Point::new(0.0, -1.0), Point::new(-1.0, 0.0)),
    }
}

const WALK: [Side; 4] = [Side::Bottom, Side::Right, Side::Top, Side::Left];

/// Outline of a square piece of edge `size` with the given borders.
pub fn synthesize(edges: &EdgeSet, size: f64) -> Contour {
    let mut segments = Vec::with_capacity(12);
    for side in WALK {
        let (corner, dir, normal) = edge_frame(side, size);
        let end = corner + dir * size;
        let sign = match edges.get(side) {
            EdgeShape::Flat => {
                segments.push(Segment::Line { to: end });
                continue;
            }
            EdgeShape::Tab => 1.0,
            EdgeShape::Socket => -1.0,
        };
        let bulge = normal * (sign * CURVE_BULGE * size);
        let a = corner + dir * (CURVE_START * size);
        let b = corner + dir * (CURVE_END * size);
        segments.push(Segment::Line { to: a });
        segments.push(Segment::Cubic {
            ctrl1: a + bulge,
            ctrl2: b + bulge,
            to: b,
        });
        segments.push(Segment::Line { to: end });
    }
    Contour {
        start: Point::new(0.0, 0.0),
        segments,
    }
}

fn cubic_at(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

impl Contour {
    pub fn end_point(&self) -> Point {
        self.segments.last().map(Segment::end).unwrap_or(self.start)
    }

    /// An outline with no segments is a bare point, not a closed loop.
    pub fn is_closed(&self) -> bool {
        if self.segments.is_empty() {
            return false;
        }
        let e = self.end_point();
        (e.x - self.start.x).abs() < 1e-9 && (e.y - self.start.y).abs() < 1e-9
    }

    /// Closed polyline approximation, without repeating the start point.
    pub fn flatten(&self, segments_per_curve: usize) -> Vec<Point> {
        let steps = segments_per_curve.max(1);
        let mut pts = vec![self.start];
        let mut cur = self.start;
        for seg in &self.segments {
            match *seg {
                Segment::Line { to } => pts.push(to),
                Segment::Cubic { ctrl1, ctrl2, to } => {
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        pts.push(cubic_at(cur, ctrl1, ctrl2, to, t));
                    }
                }
            }
            cur = seg.end();
        }
        if self.is_closed() {
            pts.pop();
        }
        pts
    }

    pub fn to_polygon(&self, segments_per_curve: usize) -> Polygon<f64> {
        let ring: Vec<Coord<f64>> = self
            .flatten(segments_per_curve)
            .into_iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        Polygon::new(LineString::from(ring), vec![])
    }

    pub fn area(&self, segments_per_curve: usize) -> f64 {
        self.to_polygon(segments_per_curve).unsigned_area()
    }

    /// Hit test in piece-local coordinates.
    pub fn contains(&self, p: Point, segments_per_curve: usize) -> bool {
        self.to_polygon(segments_per_curve)
            .contains(&Coord { x: p.x, y: p.y })
    }

    /// SVG path data for 2D previews.
    pub fn to_svg_path(&self) -> String {
        let mut d = format!("M{} {}", fmt_num(self.start.x), fmt_num(self.start.y));
        for seg in &self.segments {
            match seg {
                Segment::Line { to } => {
                    d.push_str(&format!(" L{} {}", fmt_num(to.x), fmt_num(to.y)));
                }
                Segment::Cubic { ctrl1, ctrl2, to } => {
                    d.push_str(&format!(
                        " C{} {} {} {} {} {}",
                        fmt_num(ctrl1.x),
                        fmt_num(ctrl1.y),
                        fmt_num(ctrl2.x),
                        fmt_num(ctrl2.y),
                        fmt_num(to.x),
                        fmt_num(to.y)
                    ));
                }
            }
        }
        d.push_str(" Z");
        d
    }
}

fn fmt_num(v: f64) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EdgeShape::*;

    #[test]
    fn flat_piece_is_the_unit_square() {
        let c = synthesize(&EdgeSet::default(), 1.0);
        assert_eq!(c.segments.len(), 4);
        assert!(c.is_closed());
        assert_eq!(c.to_svg_path(), "M0 0 L1 0 L1 1 L0 1 L0 0 Z");
        assert!((c.area(12) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tab_bulges_outward_and_socket_inward() {
        let tab = synthesize(&EdgeSet::new(Flat, Flat, Tab, Flat), 1.0);
        let socket = synthesize(&EdgeSet::new(Flat, Flat, Socket, Flat), 1.0);
        match tab.segments[1] {
            Segment::Cubic { ctrl1, ctrl2, to } => {
                assert_eq!(ctrl1, Point::new(0.3, -0.3));
                assert_eq!(ctrl2, Point::new(0.7, -0.3));
                assert_eq!(to, Point::new(0.7, 0.0));
            }
            other => panic!("expected a curve, got {other:?}"),
        }
        assert!(tab.area(16) > 1.0);
        assert!(socket.area(16) < 1.0);
        assert!(tab.contains(Point::new(0.5, -0.1), 16));
        assert!(!socket.contains(Point::new(0.5, 0.1), 16));
    }

    #[test]
    fn every_side_bulges_away_from_the_centre() {
        let c = synthesize(&EdgeSet::new(Tab, Tab, Tab, Tab), 2.0);
        let outside = [
            Point::new(1.0, -0.2),
            Point::new(2.2, 1.0),
            Point::new(1.0, 2.2),
            Point::new(-0.2, 1.0),
        ];
        for p in outside {
            assert!(c.contains(p, 16), "{p:?} should be inside the tab");
        }
        assert!(c.is_closed());
    }

    #[test]
    fn flatten_drops_the_closing_point() {
        let c = synthesize(&EdgeSet::new(Tab, Flat, Flat, Flat), 1.0);
        let pts = c.flatten(4);
        // 4 corners, the curve start mark, 4 samples ending on the curve end mark.
        assert_eq!(pts.len(), 4 + 1 + 4);
        assert_ne!(pts.last(), Some(&c.start));
    }

    #[test]
    fn empty_contour_flattens_to_its_start() {
        let c = Contour {
            start: Point::new(0.5, 0.5),
            segments: vec![],
        };
        assert!(!c.is_closed());
        assert_eq!(c.flatten(8), vec![Point::new(0.5, 0.5)]);
        assert_eq!(c.to_svg_path(), "M0.5 0.5 Z");
    }
}
