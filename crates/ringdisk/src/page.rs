//! Page sizes and unit conversion.
//!
//! Layout is computed in millimeters; rendering works in PostScript points.

/// Points per millimeter.
pub const MM_TO_PT: f64 = 72.0 / 25.4;

/// Convert millimeters to points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * MM_TO_PT
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageSize {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl PageSize {
    /// US Letter, 8.5 x 11 in.
    pub const LETTER: Self = Self {
        width_pt: 612.0,
        height_pt: 792.0,
    };

    /// ISO A4, 210 x 297 mm.
    pub const A4: Self = Self {
        width_pt: 210.0 * MM_TO_PT,
        height_pt: 297.0 * MM_TO_PT,
    };

    pub fn center(&self) -> [f64; 2] {
        [self.width_pt / 2.0, self.height_pt / 2.0]
    }

    /// Shorter page side in millimeters.
    pub fn min_side_mm(&self) -> f64 {
        self.width_pt.min(self.height_pt) / MM_TO_PT
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Named page formats accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFormat {
    #[default]
    Letter,
    A4,
}

impl PageFormat {
    pub fn size(self) -> PageSize {
        match self {
            Self::Letter => PageSize::LETTER,
            Self::A4 => PageSize::A4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inch_is_72_points() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-12);
    }

    #[test]
    fn letter_center_and_min_side() {
        assert_eq!(PageSize::LETTER.center(), [306.0, 396.0]);
        assert!((PageSize::LETTER.min_side_mm() - 215.9).abs() < 1e-9);
        assert!((PageSize::A4.min_side_mm() - 210.0).abs() < 1e-9);
    }

    #[test]
    fn page_format_parses_snake_case() {
        let f: PageFormat = serde_json::from_str("\"a4\"").expect("valid");
        assert_eq!(f.size(), PageSize::A4);
        assert_eq!(PageFormat::default().size(), PageSize::LETTER);
    }
}
