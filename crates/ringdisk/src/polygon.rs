//! Regular polygon inscribed in a circle.
//!
//! The circle of diameter `D` is placed tangent to the positive axes, so its
//! center sits at `(D/2, D/2)` rather than at the origin. Callers that need a
//! different frame translate the vertices themselves.

use std::f64::consts::PI;

use nalgebra::{Point2, Vector2};

/// Vertices and edge length of a regular N-gon inscribed in a circle.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFit {
    /// Vertices in winding order, starting at angle 0 and turning
    /// counter-clockwise in the math frame.
    pub vertices: Vec<[f64; 2]>,
    /// Chord length between consecutive vertices.
    pub edge_length: f64,
    /// Diameter of the circumscribing circle.
    pub circle_diameter: f64,
}

impl PolygonFit {
    /// Center of the circumscribing circle, `(D/2, D/2)`.
    pub fn circle_center(&self) -> [f64; 2] {
        let r = self.circle_diameter / 2.0;
        [r, r]
    }

    /// Number of vertices.
    pub fn n_sides(&self) -> usize {
        self.vertices.len()
    }
}

/// Fit a regular polygon with `num_sides` vertices inside a circle of
/// diameter `circle_diameter`.
///
/// Preconditions (not checked): `num_sides >= 3`, `circle_diameter > 0`.
pub fn fit_inscribed_polygon(num_sides: usize, circle_diameter: f64) -> PolygonFit {
    PolygonFit {
        vertices: polygon_corner_positions(num_sides, circle_diameter),
        edge_length: polygon_side_length(num_sides, circle_diameter),
        circle_diameter,
    }
}

/// Corner positions of the inscribed polygon.
pub fn polygon_corner_positions(num_sides: usize, circle_diameter: f64) -> Vec<[f64; 2]> {
    let radius = circle_diameter / 2.0;
    let center = Point2::new(radius, radius);
    let step = 2.0 * PI / num_sides as f64;

    (0..num_sides)
        .map(|i| {
            let angle = i as f64 * step;
            let p = center + Vector2::new(angle.cos(), angle.sin()) * radius;
            [p.x, p.y]
        })
        .collect()
}

/// Closed-form chord length `2r·sin(π/N)` of the inscribed polygon.
pub fn polygon_side_length(num_sides: usize, circle_diameter: f64) -> f64 {
    let radius = circle_diameter / 2.0;
    2.0 * radius * (PI / num_sides as f64).sin()
}
