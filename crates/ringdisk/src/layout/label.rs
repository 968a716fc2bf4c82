//! Index-label offsets.
//!
//! Markers are split into four index ranges on the real-valued boundaries
//! `N/4`, `N/2` and `3N/4`. Because the polygon starts at angle 0 and winds
//! counter-clockwise, each range covers roughly one quarter turn, and its
//! diagonal points away from the disk center.

/// One of the four index ranges used to pick a label direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelQuadrant {
    First,
    Second,
    Third,
    Fourth,
}

impl LabelQuadrant {
    /// Quadrant for marker `index` out of `count`.
    ///
    /// Comparisons use `index < k * count / 4` without flooring, so counts not
    /// divisible by four split on fractional boundaries.
    pub fn for_index(index: usize, count: usize) -> Self {
        let i = index as f64;
        let quarter = count as f64 / 4.0;
        if i < quarter {
            Self::First
        } else if i < 2.0 * quarter {
            Self::Second
        } else if i < 3.0 * quarter {
            Self::Third
        } else {
            Self::Fourth
        }
    }

    /// Unit diagonal `(±1, ±1)` for this quadrant.
    pub fn direction(self) -> [f64; 2] {
        match self {
            Self::First => [1.0, 1.0],
            Self::Second => [-1.0, 1.0],
            Self::Third => [-1.0, -1.0],
            Self::Fourth => [1.0, -1.0],
        }
    }
}

/// Offset from a marker center to its index label.
pub fn label_offset(index: usize, count: usize, marker_radius: f64, offset_ratio: f64) -> [f64; 2] {
    let dir = LabelQuadrant::for_index(index, count).direction();
    let scale = marker_radius * offset_ratio;
    [dir[0] * scale, dir[1] * scale]
}
