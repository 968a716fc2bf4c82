//! Disk generation configuration.
//!
//! Config JSON is a flat document tagged with `"schema": "ringdisk.disk.v1"`.
//! Every other field is optional and falls back to [`DiskConfig::default`].

use std::path::Path;

use crate::layout::{Centering, LayoutParams};
use crate::page::PageFormat;
use crate::pattern::RingCount;

const DISK_SCHEMA_V1: &str = "ringdisk.disk.v1";

const DEFAULT_DISK_DIAMETER_MM: f64 = 120.0;
const DEFAULT_BORDER_THICKNESS_MM: f64 = 2.0;
const DEFAULT_LABEL_OFFSET_RATIO: f64 = 1.0;
const DEFAULT_LABEL_FONT_RATIO: f64 = 0.5;
const DEFAULT_CROSS_RATIO: f64 = 0.7;

/// Errors raised while loading or validating a [`DiskConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Io(std::io::Error),
    /// Config JSON is malformed or carries unknown fields.
    Parse(serde_json::Error),
    /// `schema` is missing or not the supported version.
    UnsupportedSchema(String),
    /// A field value is out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {}", e),
            Self::Parse(e) => write!(f, "invalid config JSON: {}", e),
            Self::UnsupportedSchema(found) => write!(
                f,
                "unsupported config schema '{}' (expected '{}')",
                found, DISK_SCHEMA_V1
            ),
            Self::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Full set of disk generation parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiskConfig {
    /// Outer disk diameter (mm).
    pub disk_diameter_mm: f64,
    /// Width of the black ring around the disk (mm).
    pub border_thickness_mm: f64,
    /// Marker variant; selects the pattern line length (5 or 7).
    pub ring_count: RingCount,
    /// Marker spacing controls passed to the layout solver. The gap between
    /// adjacent markers is `2 * layout.clearance_mm`.
    pub layout: LayoutParams,
    /// Draw the 1-based marker index next to each marker.
    pub add_id: bool,
    /// Label distance from the marker center, in marker radii along the
    /// quadrant diagonal.
    pub label_offset_ratio: f64,
    /// Label font size as a fraction of the marker radius.
    pub label_font_ratio: f64,
    /// Draw a crosshair at each marker center.
    pub add_cross: bool,
    /// Crosshair half-length as a fraction of the innermost ring radius.
    pub cross_ratio: f64,
    /// Output page format.
    pub page: PageFormat,
    /// How the marker polygon is positioned on the page.
    pub centering: Centering,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            disk_diameter_mm: DEFAULT_DISK_DIAMETER_MM,
            border_thickness_mm: DEFAULT_BORDER_THICKNESS_MM,
            ring_count: RingCount::default(),
            layout: LayoutParams::default(),
            add_id: true,
            label_offset_ratio: DEFAULT_LABEL_OFFSET_RATIO,
            label_font_ratio: DEFAULT_LABEL_FONT_RATIO,
            add_cross: true,
            cross_ratio: DEFAULT_CROSS_RATIO,
            page: PageFormat::default(),
            centering: Centering::default(),
        }
    }
}

impl DiskConfig {
    /// Diameter of the white area inside the border (mm).
    pub fn inner_disk_diameter_mm(&self) -> f64 {
        self.disk_diameter_mm - 2.0 * self.border_thickness_mm
    }

    /// Load and validate a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&data).map_err(Into::into)
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let mut value: serde_json::Value =
            serde_json::from_str(data).map_err(ConfigError::Parse)?;
        let schema = value
            .as_object_mut()
            .and_then(|obj| obj.remove("schema"))
            .and_then(|s| s.as_str().map(str::to_string))
            .unwrap_or_default();
        if schema != DISK_SCHEMA_V1 {
            return Err(ConfigError::UnsupportedSchema(schema));
        }

        let config: Self = serde_json::from_value(value).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a JSON document accepted by [`DiskConfig::from_json_str`].
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "schema".to_string(),
                serde_json::Value::String(DISK_SCHEMA_V1.to_string()),
            );
        }
        serde_json::to_string_pretty(&value)
    }

    /// Check that all fields describe a printable disk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self).map_err(ConfigError::Invalid)
    }
}

fn validate_config(cfg: &DiskConfig) -> Result<(), String> {
    if !cfg.disk_diameter_mm.is_finite() || cfg.disk_diameter_mm <= 0.0 {
        return Err("disk_diameter_mm must be finite and > 0".to_string());
    }

    if !cfg.border_thickness_mm.is_finite() || cfg.border_thickness_mm < 0.0 {
        return Err("border_thickness_mm must be finite and >= 0".to_string());
    }

    if cfg.inner_disk_diameter_mm() <= 0.0 {
        return Err(format!(
            "border ({:.4}mm) leaves no room inside a {:.4}mm disk",
            cfg.border_thickness_mm, cfg.disk_diameter_mm
        ));
    }

    if !cfg.layout.clearance_mm.is_finite() || cfg.layout.clearance_mm < 0.0 {
        return Err("layout.clearance_mm must be finite and >= 0".to_string());
    }

    if !cfg.layout.diameter_reduction_ratio.is_finite()
        || cfg.layout.diameter_reduction_ratio < 0.0
    {
        return Err("layout.diameter_reduction_ratio must be finite and >= 0".to_string());
    }

    if !cfg.label_offset_ratio.is_finite() || cfg.label_offset_ratio < 0.0 {
        return Err("label_offset_ratio must be finite and >= 0".to_string());
    }

    if !cfg.label_font_ratio.is_finite() || cfg.label_font_ratio <= 0.0 {
        return Err("label_font_ratio must be finite and > 0".to_string());
    }

    if !cfg.cross_ratio.is_finite() || cfg.cross_ratio <= 0.0 || cfg.cross_ratio > 1.0 {
        return Err("cross_ratio must be in (0, 1]".to_string());
    }

    let page_min_mm = cfg.page.size().min_side_mm();
    if cfg.disk_diameter_mm > page_min_mm {
        return Err(format!(
            "disk diameter ({:.4}mm) does not fit on a {:?} page ({:.4}mm)",
            cfg.disk_diameter_mm, cfg.page, page_min_mm
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = DiskConfig::default();
        cfg.validate().expect("default config must be valid");
        assert_eq!(cfg.inner_disk_diameter_mm(), 116.0);
        assert_eq!(cfg.ring_count, RingCount::Three);
    }

    #[test]
    fn from_json_requires_v1_schema() {
        let raw = r#"{ "schema": "ringdisk.disk.v0", "disk_diameter_mm": 100.0 }"#;
        let err = DiskConfig::from_json_str(raw).expect_err("expected error");
        assert!(err.to_string().contains("unsupported config schema"));

        let missing = r#"{ "disk_diameter_mm": 100.0 }"#;
        assert!(matches!(
            DiskConfig::from_json_str(missing),
            Err(ConfigError::UnsupportedSchema(_))
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let raw = r#"{
            "schema": "ringdisk.disk.v1",
            "disk_diameter_mm": 150.0,
            "ring_count": 4,
            "layout": { "clearance_mm": 1.0 },
            "page": "a4"
        }"#;
        let cfg = DiskConfig::from_json_str(raw).expect("valid");
        assert_eq!(cfg.disk_diameter_mm, 150.0);
        assert_eq!(cfg.ring_count, RingCount::Four);
        assert_eq!(cfg.layout.clearance_mm, 1.0);
        assert_eq!(cfg.layout.diameter_reduction_ratio, 2.0);
        assert_eq!(cfg.page, PageFormat::A4);
        assert!(cfg.add_id);
    }

    #[test]
    fn from_json_rejects_unsupported_ring_count() {
        let raw = r#"{ "schema": "ringdisk.disk.v1", "ring_count": 5 }"#;
        assert!(matches!(
            DiskConfig::from_json_str(raw),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        let raw = r#"{ "schema": "ringdisk.disk.v1", "marker_radius_mm": 10 }"#;
        assert!(matches!(
            DiskConfig::from_json_str(raw),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn json_round_trip_keeps_schema() {
        let cfg = DiskConfig {
            add_cross: false,
            ..Default::default()
        };
        let json = cfg.to_json_string().expect("serialize");
        let back = DiskConfig::from_json_str(&json).expect("parse");
        assert_eq!(back, cfg);
    }

    #[test]
    fn rejects_border_consuming_disk() {
        let cfg = DiskConfig {
            disk_diameter_mm: 10.0,
            border_thickness_mm: 5.0,
            ..Default::default()
        };
        let err = cfg.validate().expect_err("invalid");
        assert!(err.to_string().contains("leaves no room"));
    }

    #[test]
    fn rejects_disk_larger_than_page() {
        let cfg = DiskConfig {
            disk_diameter_mm: 250.0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_out_of_range_ratios() {
        let mut cfg = DiskConfig {
            cross_ratio: 1.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        cfg.cross_ratio = 0.7;
        cfg.layout.clearance_mm = -1.0;
        assert!(cfg.validate().is_err());
        cfg.layout.clearance_mm = 2.0;
        cfg.label_font_ratio = 0.0;
        assert!(cfg.validate().is_err());
    }
}
