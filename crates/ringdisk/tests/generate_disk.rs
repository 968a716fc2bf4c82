use std::path::Path;

use ringdisk::{
    Centering, DiskConfig, DiskGenerator, GenerateError, LayoutParams, LayoutWarning,
    PatternError, PatternSet, RingCount,
};

const THREE_MARKERS: &str = "\
94 74 54 36 18
90 70 52 34 16
86 66 50 30 14
";

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

fn dist(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

#[test]
fn three_markers_on_120mm_disk_form_equilateral_triangle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pattern_path = write_file(dir.path(), "cctag3.txt", THREE_MARKERS);

    let config = DiskConfig {
        disk_diameter_mm: 120.0,
        border_thickness_mm: 2.0,
        layout: LayoutParams {
            diameter_reduction_ratio: 1.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let generator = DiskGenerator::new(config);
    let patterns = generator.load_patterns(&pattern_path).expect("patterns");
    let disk = generator.generate(&patterns).expect("generate");

    let layout = &disk.solution().layout;
    assert_eq!(layout.n_markers(), 3);
    assert!(layout.marker_radius > 0.0);
    assert!(disk.warnings().is_empty());

    let p = &layout.positions;
    let ab = dist(p[0], p[1]);
    let bc = dist(p[1], p[2]);
    let ca = dist(p[2], p[0]);
    assert!((ab - bc).abs() < 1e-9);
    assert!((bc - ca).abs() < 1e-9);

    // Page-space layout keeps the triangle, scaled to points.
    let q = &disk.page_layout().positions;
    assert!((dist(q[0], q[1]) - ringdisk::mm_to_pt(ab)).abs() < 1e-9);
}

#[test]
fn three_markers_with_default_reduction_are_rejected_before_writing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pattern_path = write_file(dir.path(), "cctag3.txt", THREE_MARKERS);
    let svg_path = dir.path().join("target_disk.svg");

    let config = DiskConfig::default();
    assert_eq!(config.disk_diameter_mm, 120.0);
    assert_eq!(config.border_thickness_mm, 2.0);
    let generator = DiskGenerator::new(config.clone());
    let patterns = generator.load_patterns(&pattern_path).expect("patterns");

    let err = generator.generate(&patterns).expect_err("collapsed layout");
    assert!(matches!(
        err,
        GenerateError::DegenerateLayout {
            marker_count: 3,
            marker_circle_diameter_mm,
            marker_radius_mm,
        } if marker_circle_diameter_mm == 0.0 && marker_radius_mm == 0.0
    ));
    assert!(!svg_path.exists());

    let sol = ringdisk::solve_marker_layout(config.inner_disk_diameter_mm(), 3, &config.layout);
    assert!(sol
        .warnings
        .iter()
        .any(|w| matches!(w, LayoutWarning::PlacementCircleCollapsed { .. })));
}

#[test]
fn writes_svg_and_layout_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let text: String = (0..24)
        .map(|i| format!("{} 75 55 35 {}\n", 90 + i % 5, 10 + i % 7))
        .collect();
    let pattern_path = write_file(dir.path(), "cctag3.txt", &text);
    let svg_path = dir.path().join("target_disk.svg");

    let generator = DiskGenerator::default();
    let patterns = generator.load_patterns(&pattern_path).expect("patterns");
    let disk = generator.generate(&patterns).expect("generate");
    disk.write_svg(&svg_path, &patterns).expect("write svg");

    let svg = std::fs::read_to_string(&svg_path).expect("read svg");
    assert!(svg.contains("<svg"));
    assert_eq!(svg.matches("<circle").count(), 2 + 24 * 6);
    assert_eq!(svg.matches("<line").count(), 24 * 2);

    let report = disk.report();
    assert_eq!(report.marker_count, 24);
    assert!(report.marker_radius_mm > 0.0);
    assert!(report.marker_circle_diameter_mm < report.inner_disk_diameter_mm);
}

#[test]
fn markers_stay_inside_the_disk() {
    let text = "92 80 66 50 38 24 12\n".repeat(20);
    let patterns = PatternSet::parse(&text, RingCount::Four).expect("patterns");
    let config = DiskConfig {
        ring_count: RingCount::Four,
        centering: Centering::PlacementCircle,
        ..Default::default()
    };
    let disk = DiskGenerator::new(config.clone())
        .generate(&patterns)
        .expect("generate");

    let center = disk.page().center();
    let inner_r_pt = ringdisk::mm_to_pt(config.inner_disk_diameter_mm()) / 2.0;
    let layout = disk.page_layout();
    for p in &layout.positions {
        assert!(dist(*p, center) + layout.marker_radius <= inner_r_pt + 1e-9);
    }
}

#[test]
fn four_ring_patterns_rejected_for_three_ring_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pattern_path = write_file(dir.path(), "cctag4.txt", "92 80 66 50 38 24 12\n");
    let err = DiskGenerator::default()
        .load_patterns(&pattern_path)
        .expect_err("wrong line length");
    assert!(matches!(
        err,
        PatternError::ValueCount {
            line: 1,
            expected: 5,
            found: 7
        }
    ));
}

#[test]
fn config_file_drives_generation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = write_file(
        dir.path(),
        "disk.json",
        r#"{
            "schema": "ringdisk.disk.v1",
            "disk_diameter_mm": 100.0,
            "border_thickness_mm": 3.0,
            "layout": { "diameter_reduction_ratio": 1.0 },
            "add_id": false
        }"#,
    );
    let generator = DiskGenerator::from_config_json_file(&config_path).expect("config");
    assert_eq!(generator.config().inner_disk_diameter_mm(), 94.0);

    let patterns = PatternSet::parse(THREE_MARKERS, RingCount::Three).expect("patterns");
    let disk = generator.generate(&patterns).expect("generate");
    assert!(disk.warnings().is_empty());
    let svg = disk.render_svg(&patterns).expect("render").to_string();
    assert!(!svg.contains("<text"));
}

#[test]
fn too_few_markers_is_fatal() {
    let patterns = PatternSet::parse("94 74 54 36 18\n", RingCount::Three).expect("patterns");
    let err = DiskGenerator::default()
        .generate(&patterns)
        .expect_err("too few");
    assert!(matches!(err, GenerateError::TooFewMarkers { found: 1 }));
}
