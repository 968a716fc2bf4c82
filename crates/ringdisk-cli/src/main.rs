//! ringdisk CLI: generate printable ring-marker calibration disks.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use ringdisk::{
    solve_marker_layout, DiskConfig, DiskGenerator, LayoutParams, PageFormat, PatternSet,
    RingCount,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ringdisk")]
#[command(about = "Lay out concentric-ring markers on a circular calibration disk and render SVG")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a disk SVG from a ring pattern file.
    Generate(CliGenerateArgs),

    /// Solve the marker layout for a given marker count and print it.
    Layout(CliLayoutArgs),

    /// Print statistics of a ring pattern file.
    PatternInfo {
        /// Path to the pattern file.
        #[arg(long)]
        patterns: PathBuf,

        /// Marker ring count (3 or 4).
        #[arg(long, default_value_t = 3)]
        ring_count: u8,
    },
}

#[derive(Debug, Clone, Args)]
struct CliGenerateArgs {
    /// Path to write the disk SVG.
    #[arg(long)]
    out: PathBuf,

    /// Disk config JSON (`ringdisk.disk.v1`). Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ring pattern file. Defaults to cctag3.txt / cctag4.txt inside --pattern-dir.
    #[arg(long)]
    patterns: Option<PathBuf>,

    /// Directory searched for the default pattern file.
    #[arg(long, default_value = ".")]
    pattern_dir: PathBuf,

    /// Marker ring count (3 or 4).
    #[arg(long)]
    ring_count: Option<u8>,

    /// Do not draw marker index labels.
    #[arg(long)]
    no_id: bool,

    /// Do not draw center crosshairs.
    #[arg(long)]
    no_cross: bool,

    /// Crosshair half-length as a fraction of the innermost ring radius.
    #[arg(long)]
    cross_ratio: Option<f64>,

    /// Output page format.
    #[arg(long, value_enum)]
    page: Option<PageArg>,

    /// Path to write the solved layout (JSON).
    #[arg(long)]
    layout_json: Option<PathBuf>,

    #[command(flatten)]
    geometry: CliGeometryArgs,
}

#[derive(Debug, Clone, Args)]
struct CliLayoutArgs {
    /// Number of markers to place.
    #[arg(long)]
    markers: usize,

    #[command(flatten)]
    geometry: CliGeometryArgs,
}

#[derive(Debug, Clone, Args, Default)]
struct CliGeometryArgs {
    /// Outer disk diameter (mm).
    #[arg(long)]
    disk_diameter_mm: Option<f64>,
    /// Disk border thickness (mm).
    #[arg(long)]
    border_mm: Option<f64>,
    /// Clearance subtracted from half the polygon edge (mm). Adjacent
    /// markers end up twice this far apart.
    #[arg(long)]
    clearance_mm: Option<f64>,
    /// Placement circle reduction, in marker diameters.
    #[arg(long)]
    reduction_ratio: Option<f64>,
}

impl CliGeometryArgs {
    fn apply(&self, config: &mut DiskConfig) {
        if let Some(v) = self.disk_diameter_mm {
            config.disk_diameter_mm = v;
        }
        if let Some(v) = self.border_mm {
            config.border_thickness_mm = v;
        }
        if let Some(v) = self.clearance_mm {
            config.layout.clearance_mm = v;
        }
        if let Some(v) = self.reduction_ratio {
            config.layout.diameter_reduction_ratio = v;
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PageArg {
    Letter,
    A4,
}

impl PageArg {
    fn to_core(self) -> PageFormat {
        match self {
            Self::Letter => PageFormat::Letter,
            Self::A4 => PageFormat::A4,
        }
    }
}

fn parse_ring_count(value: u8) -> CliResult<RingCount> {
    RingCount::try_from(value).map_err(Into::into)
}

impl CliGenerateArgs {
    fn to_config(&self) -> CliResult<DiskConfig> {
        let mut config = match &self.config {
            Some(path) => DiskConfig::from_json_file(path)?,
            None => DiskConfig::default(),
        };

        if let Some(rc) = self.ring_count {
            config.ring_count = parse_ring_count(rc)?;
        }
        self.geometry.apply(&mut config);
        if self.no_id {
            config.add_id = false;
        }
        if self.no_cross {
            config.add_cross = false;
        }
        if let Some(v) = self.cross_ratio {
            config.cross_ratio = v;
        }
        if let Some(page) = self.page {
            config.page = page.to_core();
        }

        config.validate()?;
        Ok(config)
    }

    fn pattern_path(&self, ring_count: RingCount) -> PathBuf {
        self.patterns
            .clone()
            .unwrap_or_else(|| self.pattern_dir.join(ring_count.default_pattern_file()))
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Layout(args) => run_layout(&args),
        Commands::PatternInfo {
            patterns,
            ring_count,
        } => run_pattern_info(&patterns, ring_count),
    }
}

// ── generate ──────────────────────────────────────────────────────────

fn run_generate(args: &CliGenerateArgs) -> CliResult<()> {
    let config = args.to_config()?;
    let pattern_path = args.pattern_path(config.ring_count);

    tracing::info!("Loading patterns: {}", pattern_path.display());
    let generator = DiskGenerator::new(config);
    let patterns = generator.load_patterns(&pattern_path).map_err(|e| -> CliError {
        format!("Failed to load patterns {}: {}", pattern_path.display(), e).into()
    })?;
    tracing::info!("{} markers with {} rings", patterns.len(), patterns.ring_count());

    let disk = generator.generate(&patterns)?;
    if !disk.warnings().is_empty() {
        tracing::warn!(
            "Layout degraded by {} warning(s); markers may touch",
            disk.warnings().len()
        );
    }

    disk.write_svg(&args.out, &patterns)?;

    if let Some(ref json_path) = args.layout_json {
        let json = disk.layout_json()?;
        std::fs::write(json_path, &json)?;
        tracing::info!("Layout written to {}", json_path.display());
    }

    Ok(())
}

// ── layout ────────────────────────────────────────────────────────────

fn run_layout(args: &CliLayoutArgs) -> CliResult<()> {
    let mut config = DiskConfig::default();
    args.geometry.apply(&mut config);
    config.validate()?;

    if args.markers < ringdisk::MIN_MARKERS {
        return Err(format!(
            "need at least {} markers (got {})",
            ringdisk::MIN_MARKERS,
            args.markers
        )
        .into());
    }

    let params: LayoutParams = config.layout;
    let inner = config.inner_disk_diameter_mm();
    let sol = solve_marker_layout(inner, args.markers, &params);
    for w in &sol.warnings {
        tracing::warn!("{}", w);
    }
    if sol.is_degenerate() {
        tracing::warn!("{} markers leave nothing printable on this disk", args.markers);
    }

    println!("ringdisk marker layout");
    println!("  disk diameter:        {:.3} mm", config.disk_diameter_mm);
    println!("  inner diameter:       {:.3} mm", inner);
    println!("  markers:              {}", sol.layout.n_markers());
    println!("  provisional radius:   {:.3} mm", sol.provisional_radius);
    println!("  placement diameter:   {:.3} mm", sol.marker_circle_diameter);
    println!("  marker radius:        {:.3} mm", sol.layout.marker_radius);
    for (i, p) in sol.layout.positions.iter().enumerate() {
        println!("  marker {:>3}:           ({:.3}, {:.3}) mm", i + 1, p[0], p[1]);
    }

    Ok(())
}

// ── pattern-info ──────────────────────────────────────────────────────

fn run_pattern_info(path: &Path, ring_count: u8) -> CliResult<()> {
    let ring_count = parse_ring_count(ring_count)?;
    let patterns = PatternSet::from_file(path, ring_count)?;

    println!("ringdisk pattern file {}", path.display());
    println!("  ring count:           {}", patterns.ring_count());
    println!("  values per line:      {}", ring_count.values_per_line());
    println!("  markers:              {}", patterns.len());

    if let Some((lo, hi)) = patterns.innermost_ratio_range() {
        println!("  innermost ratio:      {}..={} %", lo, hi);
    }
    if let Some(first) = patterns.get(0) {
        println!("  marker 1 ratios:      {:?}", first.ratios);
    }

    Ok(())
}
