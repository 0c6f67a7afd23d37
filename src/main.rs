//! uniform-border - Normalize uniform-color image borders
//!
//! CLI entry point

use chrono::Local;
use clap::Parser;
use std::path::Path;
use uniform_border::{
    exit_codes, logging, validate_root, BatchProcessor, BatchSummary, Cli, CliOverrides, Commands,
    Config, InspectArgs, LogReporter, NormalizeArgs,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize(args) => run_normalize(&args),
        Commands::Inspect(args) => run_inspect(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

// ============ Normalize Command ============

fn run_normalize(args: &NormalizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Validate before any log file is created
    if let Err(e) = validate_root(&args.input) {
        eprintln!("Error: {}", e);
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let config = load_config(args.config.as_deref(), &args.overrides());
    logging::init(&config.log_file)?;

    log_run_header(&args.input, &config);

    let processor = BatchProcessor::new(config.batch_options());
    let summary = processor.process_directory(&args.input, &LogReporter)?;

    log_run_footer(&config, &summary);

    if summary.has_failures() {
        return Err(format!("{} file(s) failed to process", summary.failed).into());
    }
    Ok(())
}

// ============ Inspect Command ============

fn run_inspect(args: &InspectArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.is_file() {
        eprintln!("Error: Input file does not exist: {}", args.file.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    let config = load_config(args.config.as_deref(), &args.overrides());
    logging::init_console()?;

    let root = args.file.parent().unwrap_or(Path::new("."));
    let processor = BatchProcessor::new(config.batch_options());
    processor.process_file(root, &args.file, &LogReporter)?;
    Ok(())
}

// ============ Info Command ============

fn run_info() -> Result<(), Box<dyn std::error::Error>> {
    println!("uniform-border v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Supported extensions: {}", uniform_border::IMAGE_EXTENSIONS.join(", "));
    println!();
    println!("Config File Locations:");
    for path in Config::search_paths() {
        let state = if path.is_file() { "found" } else { "not found" };
        println!("  {} ({})", path.display(), state);
    }
    println!();
    println!("Effective Configuration:");
    let config = Config::load().unwrap_or_default();
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }
    Ok(())
}

// ============ Helper Functions ============

/// Load the config file (explicit path or search) and apply CLI overrides
fn load_config(explicit: Option<&Path>, overrides: &CliOverrides) -> Config {
    let file_config = match explicit {
        Some(path) => match Config::load_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::load().unwrap_or_default(),
    };
    file_config.merge_with_cli(overrides)
}

fn log_run_header(input: &Path, config: &Config) {
    let rule = uniform_border::report::rule();
    tracing::info!("{}", rule);
    tracing::info!("UNIFORM BORDER - Image Border Normalization Tool");
    tracing::info!("{}", rule);
    tracing::info!("Started: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    tracing::info!("Directory: {}", input.display());
    tracing::info!("Padding: {} pixels", config.padding);
    match &config.output_dir {
        Some(dir) => tracing::info!("Output directory: {}", dir.display()),
        None => tracing::info!("Output directory: (in place)"),
    }
    tracing::info!("Log file: {}", config.log_file.display());
    tracing::info!("Mode: {}", if config.dry_run { "DRY-RUN" } else { "LIVE" });
    tracing::info!("{}", rule);
}

fn log_run_footer(config: &Config, summary: &BatchSummary) {
    let rule = uniform_border::report::rule();
    tracing::info!("\n{}", rule);
    tracing::info!("Processing complete!");
    tracing::info!("Log saved to: {}", config.log_file.display());
    if !config.dry_run && summary.written > 0 {
        match &config.output_dir {
            Some(dir) => tracing::info!("Processed images saved to: {}", dir.display()),
            None => tracing::info!("Processed images replaced in place"),
        }
    }
    tracing::info!("{}", rule);
}
