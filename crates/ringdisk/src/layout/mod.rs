//! Marker placement on the disk.
//!
//! [`solve_marker_layout`] computes marker centers and a shared marker radius
//! in a local millimeter frame. [`MarkerLayout`] carries the result and the
//! frame transforms used to move it onto a page.

mod label;
mod solver;

pub use label::{label_offset, LabelQuadrant};
pub use solver::{
    solve_marker_layout, LayoutParams, LayoutPass, LayoutSolution, LayoutWarning,
    MIN_MARKER_RADIUS_MM,
};

/// How a solved layout is moved onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Centering {
    /// Center the bounding box of marker centers on the target.
    #[default]
    BoundingBox,
    /// Center the placement circle on the target, keeping markers concentric
    /// with the disk for any marker count.
    PlacementCircle,
}

/// Marker centers plus one radius shared by all markers.
///
/// Index `i` of `positions` corresponds to pattern line `i`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarkerLayout {
    pub positions: Vec<[f64; 2]>,
    pub marker_radius: f64,
}

impl MarkerLayout {
    /// Number of markers.
    pub fn n_markers(&self) -> usize {
        self.positions.len()
    }

    /// Axis-aligned bounds over marker centers.
    ///
    /// Returns `(min_xy, max_xy)`, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let first = self.positions.first()?;
        let mut min_x = first[0];
        let mut max_x = first[0];
        let mut min_y = first[1];
        let mut max_y = first[1];

        for p in &self.positions[1..] {
            min_x = min_x.min(p[0]);
            max_x = max_x.max(p[0]);
            min_y = min_y.min(p[1]);
            max_y = max_y.max(p[1]);
        }

        Some(([min_x, min_y], [max_x, max_y]))
    }

    /// Axis-aligned span of marker centers (`[width, height]`).
    pub fn span(&self) -> Option<[f64; 2]> {
        self.bounds()
            .map(|(min_xy, max_xy)| [max_xy[0] - min_xy[0], max_xy[1] - min_xy[1]])
    }

    /// Center of the bounding box of marker centers.
    pub fn bbox_center(&self) -> Option<[f64; 2]> {
        self.bounds().map(|(min_xy, max_xy)| {
            [
                0.5 * (min_xy[0] + max_xy[0]),
                0.5 * (min_xy[1] + max_xy[1]),
            ]
        })
    }

    /// Copy of the layout with every center shifted by `offset`.
    pub fn translated(&self, offset: [f64; 2]) -> Self {
        Self {
            positions: self
                .positions
                .iter()
                .map(|p| [p[0] + offset[0], p[1] + offset[1]])
                .collect(),
            marker_radius: self.marker_radius,
        }
    }

    /// Copy of the layout translated so its bounding-box center lands on
    /// `target`.
    pub fn centered_on(&self, target: [f64; 2]) -> Self {
        match self.bbox_center() {
            Some(c) => self.translated([target[0] - c[0], target[1] - c[1]]),
            None => self.clone(),
        }
    }

    /// Copy of the layout with the point `anchor` moved onto `target`.
    pub fn anchored_on(&self, anchor: [f64; 2], target: [f64; 2]) -> Self {
        self.translated([target[0] - anchor[0], target[1] - anchor[1]])
    }

    /// Copy of the layout with positions and radius multiplied by `factor`
    /// (unit conversion about the origin).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            positions: self
                .positions
                .iter()
                .map(|p| [p[0] * factor, p[1] * factor])
                .collect(),
            marker_radius: self.marker_radius * factor,
        }
    }

    /// Smallest distance between two consecutive markers (wrapping), or `None`
    /// with fewer than two markers.
    pub fn min_adjacent_distance(&self) -> Option<f64> {
        let n = self.positions.len();
        if n < 2 {
            return None;
        }
        (0..n)
            .map(|i| {
                let a = self.positions[i];
                let b = self.positions[(i + 1) % n];
                (a[0] - b[0]).hypot(a[1] - b[1])
            })
            .reduce(f64::min)
    }
}
