use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use plotspec::config::FigureSpec;
use plotspec::{layout, schema};

#[derive(Parser)]
#[command(name = "plotspec")]
#[command(
    about = "Render declarative subplot layouts to SVG",
    long_about = "Turns a JSON description of a subplot grid, with one left y-axis and any number of twin right y-axes per subplot, into an SVG figure."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    /// Append to log file instead of truncating
    #[arg(long, global = true)]
    append_log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a figure description to an SVG file
    Render {
        /// JSON figure description
        spec: PathBuf,
        /// Output SVG path
        #[arg(short, long)]
        output: PathBuf,
        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },
    /// Validate a figure description without rendering it
    Check {
        /// JSON figure description
        spec: PathBuf,
    },
    /// Print the JSON Schema of figure descriptions
    Schema {
        /// Write the schema to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },
}

// Create the output's directory and refuse to clobber an existing file
fn check_output_path(path: &Path, force: bool) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create directory {}", parent.display()))?;
        }

    if !force && path.exists() {
        bail!(
            "Output file {} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    Ok(())
}

// Parse and schema-check a description before deserializing it
fn read_spec(path: &Path) -> Result<FigureSpec> {
    let file = File::open(path)
        .with_context(|| format!("Could not open figure description {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    if let Err(report) = schema::validate(&value) {
        bail!("{}: {}", path.display(), report);
    }

    let spec: FigureSpec = serde_json::from_value(value)
        .with_context(|| format!("Could not read figure description {}", path.display()))?;
    Ok(spec)
}

fn run(command: &Commands) -> Result<()> {
    match command {
        Commands::Render { spec, output, force } => {
            let start = Instant::now();
            let description = read_spec(spec)?;
            let mut figure = layout::render(&description)
                .with_context(|| format!("Could not render {}", spec.display()))?;
            // Nothing touches the output location until the figure exists
            check_output_path(output, *force)?;
            figure.save(output)?;
            info!(
                "Rendered {} subplot(s) in {:.2?}",
                description.subplot_count(),
                start.elapsed()
            );
        }
        Commands::Check { spec } => {
            let description = read_spec(spec)?;
            layout::check(&description)
                .with_context(|| format!("{} failed validation", spec.display()))?;
            let (rows, cols) = description.shape();
            info!("{}: valid {}x{} figure", spec.display(), rows, cols);
        }
        Commands::Schema { output, force } => {
            let schema = schema::schema_json_pretty()?;
            match output {
                Some(path) => {
                    check_output_path(path, *force)?;
                    std::fs::write(path, schema)
                        .with_context(|| format!("Could not write {}", path.display()))?;
                    info!("Wrote schema to {}", path.display());
                }
                None => println!("{}", schema),
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        let file = if cli.append_log {
            File::options().create(true).append(true).open(path)
        } else {
            File::create(path)
        };
        match file {
            Ok(file) => {
                log_builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Could not open log file '{}': {}", path, e);
                std::process::exit(2);
            }
        }
    }
    log_builder.init();

    if let Err(e) = run(&cli.command) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("plotspec-cli-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_invalid_spec_leaves_no_output_dir() {
        let dir = scratch("invalid");
        let spec = dir.join("two-left.json");
        std::fs::write(
            &spec,
            r#"{"rows": [[{"axes": [
                {"side": "left", "series": []},
                {"side": "left", "series": []}
            ]}]]}"#,
        )
        .unwrap();
        let output = dir.join("out").join("figure.svg");

        let command = Commands::Render { spec, output: output.clone(), force: false };
        assert!(run(&command).is_err());
        assert!(!dir.join("out").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_render_creates_output_dir() {
        let dir = scratch("valid");
        let spec = dir.join("figure.json");
        std::fs::write(
            &spec,
            r#"{"rows": [[{"axes": [{"series": [{"kind": "line", "y": [1, 2, 3]}]}]}]]}"#,
        )
        .unwrap();
        let output = dir.join("out").join("figure.svg");

        let command = Commands::Render { spec: spec.clone(), output: output.clone(), force: false };
        run(&command).unwrap();
        assert!(std::fs::read_to_string(&output).unwrap().contains("<svg"));

        // A second run without --force refuses to overwrite
        let command = Commands::Render { spec, output, force: false };
        assert!(run(&command).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
