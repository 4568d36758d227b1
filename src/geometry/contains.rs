//! Point-in-boundary containment test.

use geo::{BoundingRect, Contains, MultiPolygon, Point};

/// Test whether `point` lies inside `boundary`.
///
/// A cheap bounding-box rejection runs before the exact containment test.
/// A point is inside a polygon when it is within the outer ring and not
/// within any hole ring; a multipolygon contains a point when any member
/// polygon does. A point exactly on a ring edge (outer or hole) counts as
/// outside: `geo::Contains` tests the interior only, and that rule is
/// applied consistently.
///
/// Degenerate geometry never panics; an empty boundary contains nothing.
pub fn contains(point: Point<f64>, boundary: &MultiPolygon<f64>) -> bool {
    let Some(rect) = boundary.bounding_rect() else {
        return false;
    };

    let p = point.0;
    if p.x < rect.min().x || p.x > rect.max().x || p.y < rect.min().y || p.y > rect.max().y {
        return false;
    }

    boundary.contains(&point)
}
