//! High-level disk generation API.
//!
//! [`DiskGenerator`] wraps a [`DiskConfig`], solves the marker layout for a
//! [`PatternSet`] and places it on the page. The resulting [`GeneratedDisk`]
//! renders to SVG and serializes its layout to JSON.
//!
//! # Examples
//!
//! ```no_run
//! use ringdisk::{DiskConfig, DiskGenerator, PatternSet, RingCount};
//! use std::path::Path;
//!
//! let patterns = PatternSet::from_file(Path::new("cctag3.txt"), RingCount::Three).unwrap();
//! let disk = DiskGenerator::new(DiskConfig::default()).generate(&patterns).unwrap();
//! disk.write_svg(Path::new("target_disk.svg"), &patterns).unwrap();
//! ```

use std::path::Path;

use crate::config::{ConfigError, DiskConfig};
use crate::layout::{solve_marker_layout, Centering, LayoutSolution, LayoutWarning, MarkerLayout};
use crate::page::{mm_to_pt, PageSize, MM_TO_PT};
use crate::pattern::{PatternError, PatternSet, RingCount};
use crate::render::render_disk_svg;

/// Fewest markers that form a polygon.
pub const MIN_MARKERS: usize = 3;

/// Errors that abort disk generation. No output is written when one occurs.
#[derive(Debug)]
pub enum GenerateError {
    Config(ConfigError),
    Pattern(PatternError),
    /// Pattern source has fewer than [`MIN_MARKERS`] entries.
    TooFewMarkers { found: usize },
    /// Pattern set was parsed for a different ring variant than configured.
    RingCountMismatch {
        configured: RingCount,
        patterns: RingCount,
    },
    /// Pattern set length differs from the generated layout.
    MarkerCountMismatch { layout: usize, patterns: usize },
    /// The solved layout has no printable markers: the placement circle
    /// collapsed or the marker radius vanished.
    DegenerateLayout {
        marker_count: usize,
        marker_circle_diameter_mm: f64,
        marker_radius_mm: f64,
    },
    /// Writing output failed.
    Io(std::io::Error),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{}", e),
            Self::Pattern(e) => write!(f, "{}", e),
            Self::TooFewMarkers { found } => write!(
                f,
                "need at least {} markers to form a polygon (got {})",
                MIN_MARKERS, found
            ),
            Self::RingCountMismatch {
                configured,
                patterns,
            } => write!(
                f,
                "configured for {}-ring markers but patterns are {}-ring",
                configured, patterns
            ),
            Self::MarkerCountMismatch { layout, patterns } => write!(
                f,
                "layout has {} markers but {} patterns were supplied",
                layout, patterns
            ),
            Self::DegenerateLayout {
                marker_count,
                marker_circle_diameter_mm,
                marker_radius_mm,
            } => write!(
                f,
                "{} markers do not fit: placement circle {:.4}mm, marker radius {:.4}mm; \
                 lower layout.diameter_reduction_ratio or layout.clearance_mm",
                marker_count, marker_circle_diameter_mm, marker_radius_mm
            ),
            Self::Io(e) => write!(f, "failed to write output: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Pattern(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for GenerateError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<PatternError> for GenerateError {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

impl From<std::io::Error> for GenerateError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Primary generation interface.
///
/// Create once, generate for any number of pattern sets.
#[derive(Debug, Clone, Default)]
pub struct DiskGenerator {
    config: DiskConfig,
}

impl DiskGenerator {
    pub fn new(config: DiskConfig) -> Self {
        Self { config }
    }

    /// Load config JSON and create a generator in one step.
    pub fn from_config_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::new(DiskConfig::from_json_file(path)?))
    }

    pub fn config(&self) -> &DiskConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DiskConfig {
        &mut self.config
    }

    /// Read a pattern file for the configured ring variant.
    pub fn load_patterns(&self, path: &Path) -> Result<PatternSet, PatternError> {
        PatternSet::from_file(path, self.config.ring_count)
    }

    /// Solve the layout for one marker per pattern and place it on the page.
    ///
    /// Layout warnings are logged and kept on the result; they do not fail
    /// generation unless the layout is degenerate.
    pub fn generate(&self, patterns: &PatternSet) -> Result<GeneratedDisk, GenerateError> {
        self.config.validate()?;

        if patterns.ring_count() != self.config.ring_count {
            return Err(GenerateError::RingCountMismatch {
                configured: self.config.ring_count,
                patterns: patterns.ring_count(),
            });
        }
        if patterns.len() < MIN_MARKERS {
            return Err(GenerateError::TooFewMarkers {
                found: patterns.len(),
            });
        }

        let inner_mm = self.config.inner_disk_diameter_mm();
        let solution = solve_marker_layout(inner_mm, patterns.len(), &self.config.layout);

        tracing::debug!(
            provisional_edge_mm = solution.provisional_edge_length,
            provisional_radius_mm = solution.provisional_radius,
            marker_circle_diameter_mm = solution.marker_circle_diameter,
            final_edge_mm = solution.final_edge_length,
            "solved marker layout"
        );
        for warning in &solution.warnings {
            tracing::warn!("{}", warning);
        }
        if solution.is_degenerate() {
            return Err(GenerateError::DegenerateLayout {
                marker_count: patterns.len(),
                marker_circle_diameter_mm: solution.marker_circle_diameter,
                marker_radius_mm: solution.layout.marker_radius,
            });
        }

        let page = self.config.page.size();
        let page_layout = place_on_page(&solution, self.config.centering, page.center());

        tracing::info!(
            "Placed {} markers of radius {:.3}mm on a {:.1}mm disk",
            page_layout.n_markers(),
            solution.layout.marker_radius,
            self.config.disk_diameter_mm,
        );

        Ok(GeneratedDisk {
            config: self.config.clone(),
            page,
            solution,
            page_layout,
        })
    }
}

fn place_on_page(
    solution: &LayoutSolution,
    centering: Centering,
    target: [f64; 2],
) -> MarkerLayout {
    let layout_pt = solution.layout.scaled(MM_TO_PT);
    match centering {
        Centering::BoundingBox => layout_pt.centered_on(target),
        Centering::PlacementCircle => {
            let c = mm_to_pt(solution.marker_circle_diameter) / 2.0;
            layout_pt.anchored_on([c, c], target)
        }
    }
}

/// A solved disk, ready to render.
#[derive(Debug, Clone)]
pub struct GeneratedDisk {
    config: DiskConfig,
    page: PageSize,
    solution: LayoutSolution,
    page_layout: MarkerLayout,
}

/// Serializable summary written by [`GeneratedDisk::layout_json`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LayoutReport {
    pub marker_count: usize,
    pub disk_diameter_mm: f64,
    pub inner_disk_diameter_mm: f64,
    pub marker_circle_diameter_mm: f64,
    pub marker_radius_mm: f64,
    /// Marker centers in the local frame of the placement circle (mm).
    pub positions_mm: Vec<[f64; 2]>,
    pub page_size_pt: [f64; 2],
    pub marker_radius_pt: f64,
    /// Marker centers on the page (pt).
    pub positions_pt: Vec<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LayoutWarning>,
}

impl GeneratedDisk {
    pub fn config(&self) -> &DiskConfig {
        &self.config
    }

    pub fn page(&self) -> PageSize {
        self.page
    }

    /// Solver output in the local millimeter frame.
    pub fn solution(&self) -> &LayoutSolution {
        &self.solution
    }

    /// Marker layout in page points.
    pub fn page_layout(&self) -> &MarkerLayout {
        &self.page_layout
    }

    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.solution.warnings
    }

    /// Ensure `patterns` can be drawn onto this layout.
    pub fn check_patterns(&self, patterns: &PatternSet) -> Result<(), GenerateError> {
        if patterns.ring_count() != self.config.ring_count {
            return Err(GenerateError::RingCountMismatch {
                configured: self.config.ring_count,
                patterns: patterns.ring_count(),
            });
        }
        if patterns.len() != self.page_layout.n_markers() {
            return Err(GenerateError::MarkerCountMismatch {
                layout: self.page_layout.n_markers(),
                patterns: patterns.len(),
            });
        }
        Ok(())
    }

    /// Render the disk as an SVG document.
    pub fn render_svg(&self, patterns: &PatternSet) -> Result<svg::Document, GenerateError> {
        render_disk_svg(self, patterns)
    }

    /// Render and save the disk as SVG.
    pub fn write_svg(&self, path: &Path, patterns: &PatternSet) -> Result<(), GenerateError> {
        let doc = self.render_svg(patterns)?;
        svg::save(path, &doc)?;
        tracing::info!("Disk SVG written to {}", path.display());
        Ok(())
    }

    pub fn report(&self) -> LayoutReport {
        LayoutReport {
            marker_count: self.page_layout.n_markers(),
            disk_diameter_mm: self.config.disk_diameter_mm,
            inner_disk_diameter_mm: self.config.inner_disk_diameter_mm(),
            marker_circle_diameter_mm: self.solution.marker_circle_diameter,
            marker_radius_mm: self.solution.layout.marker_radius,
            positions_mm: self.solution.layout.positions.clone(),
            page_size_pt: [self.page.width_pt, self.page.height_pt],
            marker_radius_pt: self.page_layout.marker_radius,
            positions_pt: self.page_layout.positions.clone(),
            warnings: self.solution.warnings.clone(),
        }
    }

    /// Pretty-printed JSON of [`GeneratedDisk::report`].
    pub fn layout_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.report())
    }
}
