//! Ring-ratio pattern source.
//!
//! A pattern file holds one marker per line. Each line lists the radii of
//! the marker's inner circles, outermost first, as integer percentages of a
//! nominal 100-unit outer radius. Three-ring markers carry 5 values per line,
//! four-ring markers carry 7.

use std::path::Path;

/// Supported marker variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RingCount {
    #[default]
    Three,
    Four,
}

impl RingCount {
    /// Number of ratio values each pattern line must carry.
    pub fn values_per_line(self) -> usize {
        match self {
            Self::Three => 5,
            Self::Four => 7,
        }
    }

    /// Conventional pattern file name for this variant.
    pub fn default_pattern_file(self) -> &'static str {
        match self {
            Self::Three => "cctag3.txt",
            Self::Four => "cctag4.txt",
        }
    }

    pub fn rings(self) -> u8 {
        match self {
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

impl TryFrom<u8> for RingCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(format!("marker ring count must be 3 or 4 (got {})", other)),
        }
    }
}

impl From<RingCount> for u8 {
    fn from(value: RingCount) -> Self {
        value.rings()
    }
}

impl std::fmt::Display for RingCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rings())
    }
}

/// Errors returned while reading a pattern source.
#[derive(Debug)]
pub enum PatternError {
    /// Source file could not be read.
    Io(std::io::Error),
    /// A value on `line` is not an unsigned integer.
    InvalidValue { line: usize, token: String },
    /// `line` holds the wrong number of ratios for the ring variant.
    ValueCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// No pattern lines were found.
    Empty,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read pattern source: {}", e),
            Self::InvalidValue { line, token } => {
                write!(f, "line {}: '{}' is not a ring ratio", line, token)
            }
            Self::ValueCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} ring ratios, found {}",
                line, expected, found
            ),
            Self::Empty => write!(f, "pattern source contains no markers"),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PatternError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Ring radii of one marker, in percent of the nominal outer radius.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RingPattern {
    pub ratios: Vec<u32>,
}

impl RingPattern {
    /// Radius of the smallest circle (last value on the line).
    pub fn innermost_ratio(&self) -> Option<u32> {
        self.ratios.last().copied()
    }

    /// Circle radii scaled to a marker of radius `marker_radius`.
    pub fn scaled_radii(&self, marker_radius: f64) -> impl Iterator<Item = f64> + '_ {
        let scale = marker_radius / 100.0;
        self.ratios.iter().map(move |&r| scale * r as f64)
    }
}

/// All marker patterns of one ring variant, in marker index order.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSet {
    ring_count: RingCount,
    patterns: Vec<RingPattern>,
}

impl PatternSet {
    /// Parse pattern text. Blank lines are skipped; line numbers in errors
    /// are 1-based positions in `text`.
    pub fn parse(text: &str, ring_count: RingCount) -> Result<Self, PatternError> {
        let expected = ring_count.values_per_line();
        let mut patterns = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let ratios = raw
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<u32>().map_err(|_| PatternError::InvalidValue {
                        line,
                        token: tok.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if ratios.len() != expected {
                return Err(PatternError::ValueCount {
                    line,
                    expected,
                    found: ratios.len(),
                });
            }
            patterns.push(RingPattern { ratios });
        }

        if patterns.is_empty() {
            return Err(PatternError::Empty);
        }

        Ok(Self {
            ring_count,
            patterns,
        })
    }

    /// Read and parse a pattern file.
    pub fn from_file(path: &Path, ring_count: RingCount) -> Result<Self, PatternError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, ring_count)
    }

    pub fn ring_count(&self) -> RingCount {
        self.ring_count
    }

    /// Number of markers, one per pattern.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RingPattern> {
        self.patterns.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RingPattern> {
        self.patterns.iter()
    }

    /// Smallest and largest innermost ratio across all markers.
    pub fn innermost_ratio_range(&self) -> Option<(u32, u32)> {
        let mut it = self.patterns.iter().filter_map(RingPattern::innermost_ratio);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), r| (lo.min(r), hi.max(r))))
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a RingPattern;
    type IntoIter = std::slice::Iter<'a, RingPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_RING: &str = "\
92 72 55 38 20
88 70 51 35 18

90 66 50 30 15
";

    #[test]
    fn parses_three_ring_patterns() {
        let set = PatternSet::parse(THREE_RING, RingCount::Three).expect("valid");
        assert_eq!(set.len(), 3);
        assert_eq!(set.ring_count(), RingCount::Three);
        assert_eq!(set.get(0).unwrap().ratios, vec![92, 72, 55, 38, 20]);
        assert_eq!(set.get(2).unwrap().innermost_ratio(), Some(15));
        assert_eq!(set.innermost_ratio_range(), Some((15, 20)));
    }

    #[test]
    fn rejects_wrong_value_count_for_variant() {
        let err = PatternSet::parse(THREE_RING, RingCount::Four).expect_err("mismatch");
        match err {
            PatternError::ValueCount {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 1);
                assert_eq!(expected, 7);
                assert_eq!(found, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_line_number_of_bad_token() {
        let text = "92 72 55 38 20\n90 66 x 30 15\n";
        let err = PatternSet::parse(text, RingCount::Three).expect_err("bad token");
        assert!(err.to_string().starts_with("line 2:"));
    }

    #[test]
    fn empty_source_is_an_error() {
        assert!(matches!(
            PatternSet::parse("\n  \n", RingCount::Three),
            Err(PatternError::Empty)
        ));
    }

    #[test]
    fn ring_count_selector_accepts_only_three_or_four() {
        assert_eq!(RingCount::try_from(3u8), Ok(RingCount::Three));
        assert_eq!(RingCount::try_from(4u8), Ok(RingCount::Four));
        assert!(RingCount::try_from(5u8).is_err());
        assert_eq!(RingCount::Four.values_per_line(), 7);
        assert_eq!(RingCount::Four.default_pattern_file(), "cctag4.txt");
    }

    #[test]
    fn scaled_radii_use_percent_of_marker_radius() {
        let p = RingPattern {
            ratios: vec![50, 25],
        };
        let radii: Vec<f64> = p.scaled_radii(8.0).collect();
        assert_eq!(radii, vec![4.0, 2.0]);
    }

    #[test]
    fn missing_file_maps_to_io_error() {
        let err = PatternSet::from_file(Path::new("/nonexistent/cctag3.txt"), RingCount::Three)
            .expect_err("missing");
        assert!(matches!(err, PatternError::Io(_)));
    }
}
