//! orrery CLI - Command-line interface for the alignment and clock analyses
//!
//! This binary uses Clap for argument parsing. All core logic lives in the
//! library; this file resolves configuration, picks a renderer and writes
//! the result.
//!
//! # Design Philosophy
//!
//! - **Thin interface**: Clap handles parsing and --help/--version
//! - **Report, don't abort**: malformed clock readings are part of the output
//! - **Clean stdout**: diagnostics go to stderr through tracing

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use orrery::core::{animate_shadows, survey};
use orrery::formats::{self, SvgConfig};
use orrery::{analyze, classify_system, parse_time, Config, OrreryError, OutputFormat};

/// Shadow alignment and clock synchronization analysis.
#[derive(Parser, Debug)]
#[command(name = "orrery")]
#[command(version = orrery::VERSION)]
#[command(about = "Shadow alignment and clock synchronization analysis")]
#[command(after_help = "EXAMPLES:
  # Light intensity of the default Lumoria system
  orrery align

  # Draw the alignment as SVG
  orrery align --format svg -o lumoria.svg

  # Compare town clocks with the tower
  orrery clocks --reference 15:00 14:45 15:05 15:00 14:40

  # Compare against the current local time, with clock faces
  orrery clocks --reference now 9:30 --ascii

  # Celestial report with shadow animation frames
  orrery report --frames 10
")]
struct Cli {
    /// Path to a JSON configuration file. Defaults to ./.orrery.json
    #[arg(short = 'c', long = "config", value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output file path. Defaults to standard output.
    #[arg(short = 'o', long = "output", value_name = "OUTPUT", global = true)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the light each body receives
    Align {
        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: FormatArg,

        /// SVG canvas width (overrides config)
        #[arg(long = "width", value_name = "PX")]
        width: Option<u32>,

        /// SVG canvas height (overrides config)
        #[arg(long = "height", value_name = "PX")]
        height: Option<u32>,
    },

    /// Compare clock readings against a reference time
    Clocks {
        /// Reference time as HH:MM, or "now" for the local time
        #[arg(short = 'r', long = "reference", value_name = "TIME")]
        reference: Option<String>,

        /// Readings to compare (defaults to the configured readings)
        #[arg(value_name = "READING")]
        readings: Vec<String>,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: ReportFormatArg,

        /// Append ASCII clock faces (text format only)
        #[arg(long = "ascii")]
        ascii: bool,
    },

    /// Celestial report with shadow lengths and animation frames
    Report {
        /// Animation frames per orbit (overrides config, 0 to skip)
        #[arg(long = "frames", value_name = "N")]
        frames: Option<usize>,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: ReportFormatArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    #[value(alias = "txt")]
    Text,
    Json,
    Svg,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Svg => OutputFormat::Svg,
        }
    }
}

/// Formats for reports without a drawing.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormatArg {
    #[value(alias = "txt")]
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => {
            let level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            EnvFilter::new(format!("orrery={}", level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve a `--reference` argument, where "now" means the local time.
fn resolve_reference(raw: &str) -> String {
    if raw.eq_ignore_ascii_case("now") {
        chrono::Local::now().format("%H:%M").to_string()
    } else {
        raw.to_string()
    }
}

fn emit(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| {
                OrreryError::from(e).with_context(format!("writing {}", path.display()))
            })?;
            eprintln!("Output written to: {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, source) = Config::resolve(cli.config.as_deref())?;
    debug!(?source, "configuration resolved");

    let rendered = match cli.command {
        Command::Align { format, width, height } => {
            let system = &config.system;
            let (sorted, results) = classify_system(&system.bodies);
            info!(system = %system.name, bodies = sorted.len(), "alignment classified");

            match OutputFormat::from(format) {
                OutputFormat::Text => formats::alignment_table(&system.name, &results),
                OutputFormat::Json => {
                    let mut json = serde_json::to_string_pretty(&json!({
                        "system": system.name,
                        "results": results,
                    }))?;
                    json.push('\n');
                    json
                }
                OutputFormat::Svg => {
                    let svg_config = SvgConfig {
                        width: width.unwrap_or(config.render.width),
                        height: height.unwrap_or(config.render.height),
                    };
                    let star_name = system.primary().map(|s| s.name.as_str()).unwrap_or("Star");
                    formats::render_alignment(svg_config, star_name, &sorted, &results)?
                }
            }
        }

        Command::Clocks { reference, readings, format, ascii } => {
            let reference = match reference {
                Some(raw) => resolve_reference(&raw),
                None => config.clocks.reference.clone(),
            };
            let reference_time =
                parse_time(&reference).map_err(|e| e.with_context("reference time"))?;
            let readings = if readings.is_empty() {
                config.clocks.readings.clone()
            } else {
                readings
            };

            let report = analyze(&reference, &readings);
            info!(
                reference = %reference,
                readings = report.readings.len(),
                adjustments = report.adjustments_needed,
                "clocks analysed"
            );

            match format {
                ReportFormatArg::Text => {
                    let mut text = formats::sync_report(&report);
                    if ascii {
                        text.push('\n');
                        text.push_str(&formats::ascii_report(reference_time, &report));
                    }
                    text
                }
                ReportFormatArg::Json => {
                    let mut json = serde_json::to_string_pretty(&report)?;
                    json.push('\n');
                    json
                }
            }
        }

        Command::Report { frames, format } => {
            let system = &config.system;
            let steps = frames.unwrap_or(config.render.frames);
            let animation = match system.primary() {
                Some(star) => animate_shadows(&system.bodies, star, steps),
                None => Vec::new(),
            };
            debug!(frames = animation.len(), "shadows animated");

            match format {
                ReportFormatArg::Text => {
                    let mut text = formats::celestial_report(system);
                    if !animation.is_empty() {
                        text.push_str("\nShadow Animation Frames:\n");
                        text.push_str(&formats::frames_text(&animation));
                    }
                    text
                }
                ReportFormatArg::Json => {
                    let mut json = serde_json::to_string_pretty(&json!({
                        "system": system.name,
                        "stars": system.stars,
                        "bodies": survey(system),
                        "frames": animation,
                    }))?;
                    json.push('\n');
                    json
                }
            }
        }
    };

    emit(cli.output.as_deref(), &rendered)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
