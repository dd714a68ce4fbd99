use glam::Vec2;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// One animated bezier outline (`sh` shapes and mask paths): vertices with
/// in/out tangents stored relative to their vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    pub closed: bool,
    pub vertices: Vec<Vec2>,
    pub in_tangents: Vec<Vec2>,
    pub out_tangents: Vec<Vec2>,
}

impl ShapeData {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut bp = BezPath::new();
        let count = self.vertices.len();
        if count == 0 {
            return bp;
        }
        bp.move_to(to_point(self.vertices[0]));
        for i in 0..count {
            let next_idx = (i + 1) % count;
            if next_idx == 0 && !self.closed {
                break;
            }
            let p0 = self.vertices[i];
            let p1 = self.vertices[next_idx];
            let out = self.out_tangents.get(i).copied().unwrap_or(Vec2::ZERO);
            let in_ = self.in_tangents.get(next_idx).copied().unwrap_or(Vec2::ZERO);
            bp.curve_to(to_point(p0 + out), to_point(p1 + in_), to_point(p1));
        }
        if self.closed {
            bp.close_path();
        }
        bp
    }
}

pub(crate) fn to_point(v: Vec2) -> Point {
    Point::new(v.x as f64, v.y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    fn triangle(closed: bool) -> ShapeData {
        ShapeData {
            closed,
            vertices: vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
            in_tangents: vec![Vec2::ZERO; 3],
            out_tangents: vec![Vec2::new(1.0, 0.0), Vec2::ZERO, Vec2::ZERO],
        }
    }

    #[test]
    fn test_open_shape_has_one_curve_per_edge() {
        let path = triangle(false).to_bez_path();
        let elements = path.elements();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(
            elements[1],
            PathEl::CurveTo(
                Point::new(1.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 0.0)
            )
        );
    }

    #[test]
    fn test_closed_shape_wraps_and_closes() {
        let path = triangle(true).to_bez_path();
        let elements = path.elements();
        assert_eq!(elements.len(), 5);
        assert_eq!(elements[4], PathEl::ClosePath);
    }

    #[test]
    fn test_empty_shape() {
        assert!(ShapeData::default().to_bez_path().elements().is_empty());
    }
}
