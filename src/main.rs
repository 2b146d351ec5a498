use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cobi::models::{AppConfig, CONFIG_ENV};
use cobi::services::CodecPipeline;

#[derive(Parser)]
#[command(name = "cobi")]
#[command(about = "Corner-based interpolated image codec")]
struct Cli {
    /// YAML configuration file (falls back to $COBI_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Quality threshold, overrides the configuration file
    #[arg(long, global = true)]
    threshold: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a PNG into a .cobi file
    Compress {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output .cobi file (defaults to the input with a .cobi extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the decoded image and a corner map next to the output
        #[arg(long)]
        debug: bool,
    },
    /// Decode a .cobi file into a PNG
    Decompress {
        /// Input .cobi file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file (defaults to the input with a .png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print record counts and size of a .cobi file
    Inspect {
        /// Input .cobi file
        #[arg(short, long)]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        run_status_command(cli.config.as_deref());
        return Ok(());
    };

    let debug = matches!(command, Commands::Compress { debug: true, .. });
    init_tracing(debug);

    let mut config = AppConfig::resolve(cli.config.as_deref());
    if let Some(threshold) = cli.threshold {
        config.quality.threshold = threshold;
    }
    let pipeline = CodecPipeline::from_config(&config);

    match command {
        Commands::Compress {
            input,
            output,
            debug,
        } => run_compress_command(&pipeline, &input, output, debug),
        Commands::Decompress { input, output } => {
            run_decompress_command(&pipeline, &input, output)
        }
        Commands::Inspect { input, json } => run_inspect_command(&pipeline, &input, json),
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "cobi=debug" } else { "cobi=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn run_compress_command(
    pipeline: &CodecPipeline,
    input: &Path,
    output: Option<PathBuf>,
    debug: bool,
) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| input.with_extension("cobi"));
    let encoded = pipeline.encode_source(&cobi::rendering::PngSource::from_path(input))?;
    let report = pipeline.write_encoded(&encoded, &output)?;

    println!(
        "Compressed {} -> {} ({} areas, {} bytes, {:.1}% of raw)",
        input.display(),
        output.display(),
        report.total_areas(),
        report.encoded_bytes,
        report.ratio() * 100.0
    );

    if debug {
        let outputs = pipeline.write_debug_images(&encoded, &output)?;
        println!("Decoded image: {}", outputs.decoded.display());
        println!("Corner map:    {}", outputs.corner_map.display());
    }
    Ok(())
}

fn run_decompress_command(
    pipeline: &CodecPipeline,
    input: &Path,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| input.with_extension("png"));
    let image = pipeline.decompress_file(input, &output)?;
    println!(
        "Decompressed {} -> {} ({}x{})",
        input.display(),
        output.display(),
        image.width(),
        image.height()
    );
    Ok(())
}

fn run_inspect_command(pipeline: &CodecPipeline, input: &Path, json: bool) -> anyhow::Result<()> {
    let report = pipeline.inspect_file(input)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", input.display());
    println!("  Size:    {}x{}", report.width, report.height);
    println!(
        "  Areas:   R {}  G {}  B {}  A {}  (total {})",
        report.areas[0],
        report.areas[1],
        report.areas[2],
        report.areas[3],
        report.total_areas()
    );
    println!(
        "  Bytes:   {} encoded / {} raw ({:.1}%)",
        report.encoded_bytes,
        report.raw_bytes,
        report.ratio() * 100.0
    );
    Ok(())
}

/// Display version and configuration information
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("cobi v{VERSION} - Corner-based interpolated image codec\n");

    let env_config = std::env::var(CONFIG_ENV).ok();
    println!("Configuration:");
    println!(
        "  {CONFIG_ENV} = {}",
        env_config.as_deref().unwrap_or("(not set)")
    );

    let source = match (config_path, env_config.as_deref()) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(path)) => path.to_string(),
        (None, None) => "defaults".to_string(),
    };
    let config = AppConfig::resolve(config_path);
    println!("  Source      = {source}");
    println!("  Threshold   = {}", config.quality.threshold);
    println!("  Aspect exp. = {}", config.quality.aspect_exponent);
    println!("  Size scale  = {}", config.quality.size_scale);
    println!("  Optimize    = {}", config.output.optimize_png);

    println!("\nCommands:");
    println!("  cobi compress    Encode a PNG into a .cobi file");
    println!("  cobi decompress  Decode a .cobi file into a PNG");
    println!("  cobi inspect     Show record counts of a .cobi file");
    println!("\nRun 'cobi --help' for more details.");
}
