//! ringdisk: layout and rendering of circular calibration disks carrying
//! concentric-ring (CCTag-style) markers.
//!
//! The pipeline stages are:
//!
//! 1. **Patterns** – read ring-ratio lines, one marker per line.
//! 2. **Polygon** – regular polygon inscribed in a circle.
//! 3. **Layout** – two-pass fit of marker centers and a shared marker radius
//!    that keeps markers apart and inside the disk.
//! 4. **Page** – convert millimeters to points and center on the page.
//! 5. **Render** – emit the disk, rings, labels and crosshairs as SVG.
//!
//! # Public API
//! - [`DiskGenerator`] and [`DiskConfig`] as primary entry points
//! - [`solve_marker_layout`] and [`fit_inscribed_polygon`] for the bare
//!   geometry, free of I/O and logging
//! - pattern loading via [`PatternSet`]

mod config;
mod generator;
mod layout;
mod page;
mod pattern;
mod polygon;
mod render;

pub use config::{ConfigError, DiskConfig};
pub use generator::{DiskGenerator, GenerateError, GeneratedDisk, LayoutReport, MIN_MARKERS};
pub use layout::{
    label_offset, solve_marker_layout, Centering, LabelQuadrant, LayoutParams, LayoutPass,
    LayoutSolution, LayoutWarning, MarkerLayout, MIN_MARKER_RADIUS_MM,
};
pub use page::{mm_to_pt, PageFormat, PageSize, MM_TO_PT};
pub use pattern::{PatternError, PatternSet, RingCount, RingPattern};
pub use polygon::{fit_inscribed_polygon, polygon_corner_positions, polygon_side_length, PolygonFit};
pub use render::render_disk_svg;
