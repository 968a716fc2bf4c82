use crate::polygon::{fit_inscribed_polygon, PolygonFit};

use super::MarkerLayout;

/// Marker radii at or below this (mm) are treated as zero.
pub const MIN_MARKER_RADIUS_MM: f64 = 1e-9;

/// Spacing controls for [`solve_marker_layout`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Amount subtracted from half the polygon edge to get the marker radius
    /// (mm). Adjacent marker edges end up `2 * clearance_mm` apart.
    pub clearance_mm: f64,
    /// How many marker diameters the placement circle is shrunk by relative
    /// to the disk, so markers stay inside the disk edge.
    pub diameter_reduction_ratio: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            clearance_mm: 2.0,
            diameter_reduction_ratio: 2.0,
        }
    }
}

/// Which fitting pass produced a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPass {
    /// Polygon inscribed in the full disk.
    Provisional,
    /// Polygon inscribed in the reduced placement circle.
    Final,
}

impl std::fmt::Display for LayoutPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provisional => write!(f, "provisional"),
            Self::Final => write!(f, "final"),
        }
    }
}

/// Recoverable layout conditions. The layout is still produced.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// Clearance exceeds half the polygon edge; the radius was clamped so
    /// adjacent markers touch.
    MarkersTooClose {
        pass: LayoutPass,
        edge_length: f64,
        unclamped_radius: f64,
        clamped_radius: f64,
    },
    /// The reduced placement circle came out non-positive and was clamped to
    /// zero diameter.
    PlacementCircleCollapsed { unclamped_diameter: f64 },
    /// The marker radius is at or below [`MIN_MARKER_RADIUS_MM`] and was
    /// snapped to zero.
    MarkerRadiusVanished { pass: LayoutPass, radius: f64 },
}

impl std::fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MarkersTooClose {
                pass,
                unclamped_radius,
                clamped_radius,
                ..
            } => write!(
                f,
                "markers are too close to each other in the {} pass (radius {:.4} clamped to {:.4}); reduce the clearance",
                pass, unclamped_radius, clamped_radius
            ),
            Self::PlacementCircleCollapsed { unclamped_diameter } => write!(
                f,
                "placement circle diameter {:.4} is not positive; clamped to 0",
                unclamped_diameter
            ),
            Self::MarkerRadiusVanished { pass, radius } => write!(
                f,
                "marker radius {:e} in the {} pass is effectively zero; reduce the clearance or the diameter reduction ratio",
                radius, pass
            ),
        }
    }
}

/// Output of [`solve_marker_layout`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutSolution {
    /// Final marker centers in the `(d/2, d/2)` frame of the placement
    /// circle, plus the final marker radius.
    pub layout: MarkerLayout,
    /// Diameter of the circle the final polygon is inscribed in.
    pub marker_circle_diameter: f64,
    /// Edge length of the provisional polygon inscribed in the full disk.
    pub provisional_edge_length: f64,
    /// Marker radius from the provisional pass (after any clamp).
    pub provisional_radius: f64,
    /// Edge length of the final polygon.
    pub final_edge_length: f64,
    /// Conditions that degraded the layout, in the order they occurred.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LayoutWarning>,
}

impl LayoutSolution {
    /// Whether the layout is free of clamps.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Whether nothing printable is left: the placement circle collapsed or
    /// the final marker radius vanished.
    pub fn is_degenerate(&self) -> bool {
        self.marker_circle_diameter <= 0.0 || self.layout.marker_radius <= MIN_MARKER_RADIUS_MM
    }
}

/// Place `marker_count` markers on a disk of diameter `disk_diameter`.
///
/// Runs exactly two polygon fits: the first against the full disk to size
/// the markers, the second against a placement circle shrunk by
/// `diameter_reduction_ratio` marker diameters. Only the second fit's
/// vertices are returned.
///
/// Preconditions (not checked): `marker_count >= 3`, `disk_diameter > 0`,
/// non-negative `params` fields.
pub fn solve_marker_layout(
    disk_diameter: f64,
    marker_count: usize,
    params: &LayoutParams,
) -> LayoutSolution {
    let mut warnings = Vec::new();

    let provisional = fit_inscribed_polygon(marker_count, disk_diameter);
    let provisional_radius = marker_radius_for(
        &provisional,
        params.clearance_mm,
        LayoutPass::Provisional,
        &mut warnings,
    );

    let mut marker_circle_diameter =
        disk_diameter - params.diameter_reduction_ratio * (2.0 * provisional_radius);
    if marker_circle_diameter <= 0.0 {
        warnings.push(LayoutWarning::PlacementCircleCollapsed {
            unclamped_diameter: marker_circle_diameter,
        });
        marker_circle_diameter = 0.0;
    }

    let fit = fit_inscribed_polygon(marker_count, marker_circle_diameter);
    let marker_radius =
        marker_radius_for(&fit, params.clearance_mm, LayoutPass::Final, &mut warnings);

    LayoutSolution {
        layout: MarkerLayout {
            positions: fit.vertices,
            marker_radius,
        },
        marker_circle_diameter,
        provisional_edge_length: provisional.edge_length,
        provisional_radius,
        final_edge_length: fit.edge_length,
        warnings,
    }
}

fn marker_radius_for(
    fit: &PolygonFit,
    clearance: f64,
    pass: LayoutPass,
    warnings: &mut Vec<LayoutWarning>,
) -> f64 {
    let half_edge = fit.edge_length / 2.0;
    let mut radius = half_edge - clearance;
    if radius.abs() <= MIN_MARKER_RADIUS_MM {
        warnings.push(LayoutWarning::MarkerRadiusVanished { pass, radius });
        return 0.0;
    }
    if radius < 0.0 {
        let clamped = half_edge.max(0.0);
        warnings.push(LayoutWarning::MarkersTooClose {
            pass,
            edge_length: fit.edge_length,
            unclamped_radius: radius,
            clamped_radius: clamped,
        });
        radius = clamped;
    }

    if radius <= MIN_MARKER_RADIUS_MM {
        warnings.push(LayoutWarning::MarkerRadiusVanished { pass, radius });
        return 0.0;
    }
    radius
}
