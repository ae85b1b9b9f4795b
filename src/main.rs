//! Steganography detection CLI.
//!
//! Thin adapter around the `stegdet` library: decodes image files
//! into pixel grids, runs the detection pipeline, and renders the
//! resulting reports (console, CSV, bit-plane PNGs). All filesystem
//! and codec concerns live here, not in the core.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use stegdet::{
    AnalysisConfig, AnalysisError, BatchAggregator, BatchResult, BitPlane, Channel, FileConfig,
    ImageReport, PixelGrid, PixelSource, PLANE_COUNT,
};
use tracing::info;

/// File extensions accepted for analysis. Lossy formats recompress
/// pixel data and destroy LSB payloads, so only lossless ones qualify.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "bmp"];

#[derive(Parser)]
#[command(name = "stegdet", version, about = "LSB steganography detection tool")]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a single image.
    Analyze {
        /// Path to the image file.
        image: PathBuf,
        /// Color channel to analyze.
        #[arg(short, long, value_enum)]
        channel: Option<Channel>,
        /// Write PNG visualizations of all 8 bit-planes.
        #[arg(short = 'b', long)]
        save_bit_planes: bool,
    },
    /// Analyze every image in a directory and write a CSV report.
    Batch {
        /// Directory containing PNG/BMP images.
        directory: PathBuf,
        /// Report path (defaults next to the scanned directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Loads pixel data from an image file via the codec crate.
struct FileSource {
    path: PathBuf,
    identifier: String,
}

impl FileSource {
    fn new(path: PathBuf) -> Self {
        let identifier = path.display().to_string();
        Self { path, identifier }
    }
}

impl PixelSource for FileSource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn load(&self) -> Result<PixelGrid, AnalysisError> {
        let decoded = image::open(&self.path)
            .map_err(|e| AnalysisError::UnreadableInput(e.to_string()))?
            .to_rgb8();
        let (width, height) = (decoded.width(), decoded.height());
        PixelGrid::new(decoded.into_raw(), width, height, 3)
            .map_err(|e| AnalysisError::UnreadableInput(e.to_string()))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => FileConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => FileConfig::default(),
    };

    match cli.command {
        Command::Analyze {
            image,
            channel,
            save_bit_planes,
        } => {
            let mut config = file_config.analysis;
            if let Some(channel) = channel {
                config.channel = channel;
            }
            if save_bit_planes {
                config.bit_plane_export = true;
            }
            config.validate().context("invalid analysis configuration")?;
            analyze_single(&image, &config, save_bit_planes)
        }
        Command::Batch { directory, output } => {
            let config = file_config.analysis;
            config.validate().context("invalid analysis configuration")?;
            let report_path =
                output.unwrap_or_else(|| directory.join(&file_config.output.report_name));
            batch_analyze(&directory, &report_path, config)
        }
    }
}

fn analyze_single(path: &Path, config: &AnalysisConfig, save_bit_planes: bool) -> Result<()> {
    let source = FileSource::new(path.to_path_buf());
    let grid = source.load()?;

    info!(
        "Analyzing {} ({}x{} pixels, {} channel)",
        source.identifier(),
        grid.width(),
        grid.height(),
        config.channel
    );

    let report = ImageReport::analyze(&grid, source.identifier(), config)?;

    match &report.decoded_message {
        Some(message) => {
            println!("Hidden message found:");
            println!("{:-<40}", "");
            println!("{message}");
            println!("{:-<40}", "");
        }
        None => println!("No obvious LSB message detected."),
    }

    if let Some(stats) = &report.stats {
        println!(
            "\nLSB stream: entropy {:.4}, chi-square {:.2} over {} bits",
            stats.entropy, stats.chi_square, stats.sample_size
        );
    }
    if let Some(suspicion) = &report.suspicion {
        println!("Flagged: {suspicion}");
    }

    if !report.plane_stats.is_empty() {
        println!("\nBit plane statistics:");
        println!("{:>5} | {:>10} | {:>10}", "Plane", "Entropy", "Chi2");
        println!("{:-<31}", "");
        for plane in &report.plane_stats {
            println!(
                "{:>5} | {:>10.4} | {:>10.2}",
                plane.plane, plane.stats.entropy, plane.stats.chi_square
            );
        }
    }

    if save_bit_planes {
        let dir = export_bit_planes(path, &grid, config)?;
        println!("\nBit plane visualizations saved to: {}", dir.display());
    }

    Ok(())
}

/// Writes all 8 bit-planes of the configured channel as PNGs next to
/// the source image. Returns the output directory.
fn export_bit_planes(path: &Path, grid: &PixelGrid, config: &AnalysisConfig) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .ok_or_else(|| anyhow!("image path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}_bit_planes", stem.to_string_lossy()));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let plane = grid.channel_plane(config.channel)?;
    for bit_index in 0..PLANE_COUNT {
        let bits = BitPlane::extract(&plane, bit_index)?;
        let pixels = bits.to_grayscale();
        let visual = image::GrayImage::from_raw(bits.width(), bits.height(), pixels)
            .ok_or_else(|| anyhow!("bit plane buffer does not match image dimensions"))?;
        let out = dir.join(format!("plane_{bit_index}.png"));
        visual
            .save(&out)
            .with_context(|| format!("writing {}", out.display()))?;
    }

    Ok(dir)
}

fn batch_analyze(directory: &Path, report_path: &Path, config: AnalysisConfig) -> Result<()> {
    let paths = collect_image_paths(directory)
        .with_context(|| format!("scanning directory {}", directory.display()))?;
    if paths.is_empty() {
        println!("No PNG/BMP images found in {}", directory.display());
        return Ok(());
    }

    info!("Found {} images in {}", paths.len(), directory.display());

    let stop = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::Relaxed);
    })
    .context("installing interrupt handler")?;

    let aggregator = BatchAggregator::with_stop_flag(config, stop);
    let result = aggregator.run(paths.into_iter().map(FileSource::new));

    for (i, report) in result.reports().iter().enumerate() {
        print!("{}. {}: ", i + 1, report.source);
        if let Some(error) = &report.error {
            println!("error ({error})");
        } else if report.flagged {
            println!("FLAGGED");
        } else {
            println!("clean");
        }
    }

    println!(
        "\nProcessed {} images: {} flagged, {} failed{}",
        result.len(),
        result.flagged(),
        result.failed(),
        if result.aborted() {
            format!(", {} skipped (interrupted)", result.skipped())
        } else {
            String::new()
        }
    );

    write_csv(&result, report_path)?;
    println!("CSV report saved to: {}", report_path.display());

    Ok(())
}

/// Collects analyzable image paths, one directory level deep, sorted
/// by name so batch order is deterministic across platforms.
fn collect_image_paths(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false)
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Renders a batch result as CSV, one row per image.
fn write_csv(result: &BatchResult, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV report {}", path.display()))?;

    writer.write_record([
        "source",
        "channel",
        "flagged",
        "message",
        "entropy",
        "chi_square",
        "sample_size",
        "error",
    ])?;

    for report in result.reports() {
        let (entropy, chi_square, sample_size) = match &report.stats {
            Some(stats) => (
                format!("{:.6}", stats.entropy),
                format!("{:.6}", stats.chi_square),
                stats.sample_size.to_string(),
            ),
            None => (String::new(), String::new(), String::new()),
        };

        let channel = report.channel.to_string();
        writer.write_record([
            report.source.as_str(),
            channel.as_str(),
            if report.flagged { "true" } else { "false" },
            report.decoded_message.as_deref().unwrap_or(""),
            entropy.as_str(),
            chi_square.as_str(),
            sample_size.as_str(),
            report.error.as_ref().map(|e| e.kind()).unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stegdet::MemorySource;

    #[test]
    fn test_collect_image_paths_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.PNG", "c.bmp", "notes.txt", "d.jpg"] {
            std::fs::write(dir.path().join(name), b"stub").unwrap();
        }

        let paths = collect_image_paths(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png", "c.bmp"]);
    }

    #[test]
    fn test_write_csv_includes_error_rows() {
        let samples: Vec<u8> = (0..300).flat_map(|i| [i as u8, 7, 42]).collect();
        let sources = vec![
            MemorySource::new("ok.png", PixelGrid::new(samples, 30, 10, 3).unwrap()),
            MemorySource::unreadable("bad.png", "truncated"),
        ];
        let result = BatchAggregator::new(AnalysisConfig::default()).run(sources);

        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("report.csv");
        write_csv(&result, &report_path).unwrap();

        let content = std::fs::read_to_string(&report_path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("source,channel,flagged"));

        let ok_row = lines.next().unwrap();
        assert!(ok_row.starts_with("ok.png,blue,false"));

        let bad_row = lines.next().unwrap();
        assert!(bad_row.contains("unreadable_input"));
    }

    #[test]
    fn test_file_source_reports_missing_file_as_unreadable() {
        let source = FileSource::new(PathBuf::from("/nonexistent/missing.png"));
        assert!(matches!(
            source.load(),
            Err(AnalysisError::UnreadableInput(_))
        ));
    }
}
