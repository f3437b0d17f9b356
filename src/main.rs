use anyhow::{Context, Result};
use clap::Parser;
use hwe_scan::config::{EngineConfig, DEFAULT_ALPHA, DEFAULT_SAMPLE_SIZE};
use hwe_scan::types::{DeviationSummary, HweResult};
use hwe_scan::{output, significance, statistics, table_reader};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

#[derive(Parser)]
#[command(name = "hwe-scan")]
#[command(version)]
#[command(about = "Test SNP genotype counts against Hardy-Weinberg equilibrium", long_about = None)]
struct Args {
    /// Whitespace-delimited genotype count table (can be gzipped)
    #[arg(short, long)]
    input: String,

    /// Second table to analyse side by side (e.g. the other chromosome arm)
    #[arg(short, long)]
    compare: Option<String>,

    /// Display label for --input (defaults to the file name)
    #[arg(long)]
    label: Option<String>,

    /// Display label for --compare (defaults to the file name)
    #[arg(long)]
    compare_label: Option<String>,

    /// Number of individuals genotyped (N)
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: u32,

    /// Significance threshold for flagging HWE deviation
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,

    /// Name of the identifier column
    #[arg(long, default_value = table_reader::DEFAULT_ID_COLUMN)]
    id_column: String,

    /// Output directory for result CSVs (one `<name>_hwe.csv` per input)
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// Rows of the result table to print per region
    #[arg(long, default_value = "10")]
    head: usize,

    /// Generate the observed vs expected frequency plot
    #[arg(long)]
    plot: bool,

    /// Output directory for plots (defaults to --output-dir)
    #[arg(long)]
    plot_dir: Option<String>,

    /// Plot output format: "png" (default) or "svg"
    #[arg(long, default_value = "png")]
    plot_format: String,

    /// Maximum number of SNPs drawn per panel
    #[arg(long, default_value = "1000")]
    plot_points: usize,

    /// Seed for the plotted SNP subset (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of threads for parallel processing
    #[arg(long, default_value_t = num_cpus())]
    threads: usize,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

macro_rules! progress {
    ($quiet:expr) => {
        if !$quiet {
            eprintln!();
        }
    };
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            eprintln!($($arg)*);
        }
    };
}

fn make_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb
}

#[cfg(feature = "plotting")]
fn parse_plot_format(s: &str) -> Result<hwe_scan::plotting::PlotFormat> {
    match s.to_lowercase().as_str() {
        "png" => Ok(hwe_scan::plotting::PlotFormat::Png),
        "svg" => Ok(hwe_scan::plotting::PlotFormat::Svg),
        other => anyhow::bail!("Invalid --plot-format '{}'. Must be 'png' or 'svg'", other),
    }
}

/// File name without directories and without .gz/.txt/.csv/.tsv extensions.
fn file_stem(path: &str) -> String {
    let name = Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "hwe".to_string());
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    [".txt", ".csv", ".tsv"]
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
        .to_string()
}

/// One analysed dataset.
struct Region {
    label: String,
    stem: String,
    results: Vec<HweResult>,
    summary: DeviationSummary,
}

fn analyse_region(args: &Args, config: &EngineConfig, input: &str, label: String) -> Result<Region> {
    let stem = file_stem(input);

    progress!(args.quiet, "Reading genotype counts: {}", input);
    let pb = make_spinner(args.quiet);
    pb.set_message("parsing table");
    let records = table_reader::read_genotype_table(Path::new(input), &args.id_column)
        .with_context(|| format!("Failed to load genotype table {}", input))?;
    pb.finish_and_clear();
    progress!(args.quiet, "  {} variants loaded", records.len());

    progress!(args.quiet, "Computing allele frequencies and chi-square tests...");
    let results = statistics::annotate_all(&records, config);
    let summary = significance::summarize(&results);

    let output_path = Path::new(&args.output_dir).join(format!("{}_hwe.csv", stem));
    output::write_results(&results, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    progress!(args.quiet, "  Results written to: {}", output_path.display());

    Ok(Region {
        label,
        stem,
        results,
        summary,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .context("Failed to configure thread pool")?;

    let config = EngineConfig::new(args.sample_size, args.alpha)?;

    let mut inputs = vec![(
        args.input.clone(),
        args.label.clone().unwrap_or_else(|| file_stem(&args.input)),
    )];
    if let Some(ref compare) = args.compare {
        inputs.push((
            compare.clone(),
            args.compare_label.clone().unwrap_or_else(|| file_stem(compare)),
        ));
    }

    for (path, _) in &inputs {
        if !Path::new(path).exists() {
            anyhow::bail!("Input file not found: {}", path);
        }
    }
    if inputs.len() == 2 && file_stem(&inputs[0].0) == file_stem(&inputs[1].0) {
        anyhow::bail!("--input and --compare resolve to the same output name; rename one of the files");
    }

    std::fs::create_dir_all(&args.output_dir)?;

    progress!(args.quiet, "Hardy-Weinberg Equilibrium Scan");
    progress!(args.quiet, "=========================================");
    for (path, label) in &inputs {
        progress!(args.quiet, "Region '{}': {}", label, path);
    }
    progress!(args.quiet, "Sample size (N): {}", config.sample_size);
    progress!(args.quiet, "Alpha: {}", config.alpha);
    progress!(args.quiet, "Threads: {}", args.threads);
    progress!(args.quiet);

    let mut regions = Vec::with_capacity(inputs.len());
    for (path, label) in inputs {
        regions.push(analyse_region(&args, &config, &path, label)?);
    }

    for region in &regions {
        output::report_summary(&region.label, &region.results, &region.summary, config.alpha, args.head);
    }

    #[cfg(feature = "plotting")]
    if args.plot {
        run_plot(&args, &regions)?;
    }

    #[cfg(not(feature = "plotting"))]
    if args.plot {
        eprintln!("Warning: plotting feature not enabled. Rebuild with default features to enable plots.");
    }

    progress!(args.quiet);
    progress!(args.quiet, "Done!");

    Ok(())
}

/// Draw every region into one side-by-side figure.
#[cfg(feature = "plotting")]
fn run_plot(args: &Args, regions: &[Region]) -> Result<()> {
    use hwe_scan::plotting;

    let config = plotting::PlotConfig {
        format: parse_plot_format(&args.plot_format)?,
        max_points: args.plot_points,
        seed: args.seed,
        ..Default::default()
    };

    let plot_dir = std::path::PathBuf::from(args.plot_dir.as_deref().unwrap_or(&args.output_dir));
    std::fs::create_dir_all(&plot_dir)?;

    let stem = regions
        .iter()
        .map(|r| r.stem.as_str())
        .collect::<Vec<_>>()
        .join("_vs_");
    let path = plot_dir.join(format!("{}_hwe.{}", stem, config.format.extension()));

    let panels: Vec<plotting::RegionPanel> = regions
        .iter()
        .map(|r| plotting::RegionPanel {
            label: &r.label,
            results: &r.results,
        })
        .collect();

    progress!(args.quiet, "Generating plot...");
    plotting::plot_hwe(&panels, &path, &config)?;
    progress!(args.quiet, "  Plot saved to: {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_strips_extensions() {
        assert_eq!(file_stem("data/short_arm.txt"), "short_arm");
        assert_eq!(file_stem("long_arm.txt.gz"), "long_arm");
        assert_eq!(file_stem("counts"), "counts");
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["hwe-scan", "--input", "a.txt"]);
        assert_eq!(args.sample_size, 108);
        assert_eq!(args.alpha, 0.05);
        assert_eq!(args.id_column, "rsid");
        assert_eq!(args.plot_points, 1000);
        assert!(args.compare.is_none());
    }
}
