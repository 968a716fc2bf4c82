//! SVG rendering of a generated disk.

use svg::node::element::{Circle, Line, Text};
use svg::node::Text as TextContent;
use svg::Document;

use crate::generator::{GenerateError, GeneratedDisk};
use crate::layout::label_offset;
use crate::page::mm_to_pt;
use crate::pattern::{PatternSet, RingPattern};

const FOREGROUND: &str = "black";
const BACKGROUND: &str = "white";
const CROSS_STROKE: &str = "gray";

/// Build the SVG document for `disk`, drawing marker `i` with pattern `i`.
pub fn render_disk_svg(
    disk: &GeneratedDisk,
    patterns: &PatternSet,
) -> Result<Document, GenerateError> {
    disk.check_patterns(patterns)?;

    let page = disk.page();
    let config = disk.config();
    let center = page.center();

    let mut doc = Document::new()
        .set("width", format!("{}pt", page.width_pt))
        .set("height", format!("{}pt", page.height_pt))
        .set("viewBox", (0.0, 0.0, page.width_pt, page.height_pt));

    let disk_radius = mm_to_pt(config.disk_diameter_mm) / 2.0;
    let inner_radius = mm_to_pt(config.inner_disk_diameter_mm()) / 2.0;
    doc = doc
        .add(filled_circle(center, disk_radius, FOREGROUND))
        .add(filled_circle(center, inner_radius, BACKGROUND));

    let layout = disk.page_layout();
    let n = layout.n_markers();
    let radius = layout.marker_radius;

    for (idx, (pos, pattern)) in layout.positions.iter().zip(patterns.iter()).enumerate() {
        if config.add_id {
            let off = label_offset(idx, n, radius, config.label_offset_ratio);
            doc = doc.add(label(
                [pos[0] + off[0], pos[1] + off[1]],
                idx + 1,
                config.label_font_ratio * radius,
            ));
        }

        doc = doc.add(filled_circle(*pos, radius, FOREGROUND));
        doc = add_rings(doc, *pos, radius, pattern);

        if config.add_cross {
            let inner = pattern.scaled_radii(radius).last().unwrap_or(radius);
            let half = inner * config.cross_ratio;
            doc = doc
                .add(line([pos[0] - half, pos[1]], [pos[0] + half, pos[1]]))
                .add(line([pos[0], pos[1] - half], [pos[0], pos[1] + half]));
        }
    }

    tracing::debug!(markers = n, radius_pt = radius, "rendered disk SVG");
    Ok(doc)
}

fn add_rings(mut doc: Document, center: [f64; 2], radius: f64, pattern: &RingPattern) -> Document {
    // Circles alternate starting with the background color inside the
    // black outer disk of the marker.
    for (i, r) in pattern.scaled_radii(radius).enumerate() {
        let fill = if i % 2 == 0 { BACKGROUND } else { FOREGROUND };
        doc = doc.add(filled_circle(center, r, fill));
    }
    doc
}

fn filled_circle(center: [f64; 2], r: f64, fill: &str) -> Circle {
    Circle::new()
        .set("cx", center[0])
        .set("cy", center[1])
        .set("r", r)
        .set("fill", fill)
}

fn line(start: [f64; 2], end: [f64; 2]) -> Line {
    Line::new()
        .set("x1", start[0])
        .set("y1", start[1])
        .set("x2", end[0])
        .set("y2", end[1])
        .set("stroke", CROSS_STROKE)
}

fn label(insert: [f64; 2], id: usize, font_size: f64) -> Text {
    Text::new()
        .set("x", insert[0])
        .set("y", insert[1])
        .set("font-size", font_size)
        .add(TextContent::new(id.to_string()))
}
