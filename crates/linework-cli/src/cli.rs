//! Command-line interface for the linework utility
//!
//! Provides a CLI to trace ASCII line drawings into segments, anchors,
//! bullets, cycles and filaments.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use linework::core::logging::init_logging;
use linework::{extract_all_primitives, parse_text, shape_graph, ParseResult, Primitives};

/// Linework - Trace ASCII line drawings into geometric structure
#[derive(Parser)]
#[command(name = "linework")]
#[command(about = "A Rust utility to trace ASCII line drawings into geometric structure")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a drawing and extract its cycles and filaments
    Trace {
        /// Input file containing the drawing (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the report (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a drawing and report segments, anchors and bullets only
    Parse {
        /// Input file containing the drawing (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the report (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a drawing and print its canonical serialized form
    Normalize {
        /// Input file containing the drawing (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the normalized drawing (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Main CLI application
pub struct LineworkApp;

impl LineworkApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        self.setup_logging(&cli);

        if cli.verbose {
            eprintln!("linework {}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Trace {
                input,
                output,
                json,
            } => self.trace_command(input, output, json, cli.verbose),
            Commands::Parse {
                input,
                output,
                json,
            } => self.parse_command(input, output, json, cli.verbose),
            Commands::Normalize { input, output } => {
                self.normalize_command(input, output, cli.verbose)
            }
        }
    }

    /// Install the tracing subscriber. The CLI flags supply defaults; a
    /// set environment variable wins over its flag.
    fn setup_logging(&self, cli: &Cli) {
        let level = std::env::var("LINEWORK_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| cli.log_level.as_str().to_owned());
        let format = std::env::var("LINEWORK_LOG_FORMAT")
            .unwrap_or_else(|_| cli.log_format.as_str().to_owned());

        if let Err(e) = init_logging(Some(&level), Some(&format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }
    }

    /// Handle the trace command
    fn trace_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let parsed = parse_text(&content);
        let (cycles, filaments) = extract_all_primitives(shape_graph(&parsed));
        let primitives = Primitives { cycles, filaments };

        let report = if json {
            let mut document = parse_report_json(&parsed);
            document["cycles"] = serde_json::to_value(&primitives.cycles)?;
            document["filaments"] = serde_json::to_value(&primitives.filaments)?;
            serde_json::to_string_pretty(&document)?
        } else {
            let mut report = parse_report(&parsed);
            report.push_str(&primitives_report(&primitives));
            report
        };

        self.write_output(output, &report)
    }

    /// Handle the parse command
    fn parse_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let parsed = parse_text(&content);
        let report = if json {
            serde_json::to_string_pretty(&parse_report_json(&parsed))?
        } else {
            parse_report(&parsed)
        };

        self.write_output(output, &report)
    }

    /// Handle the normalize command
    fn normalize_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let parsed = parse_text(&content);
        self.write_output(output, &parsed.to_lines().join("\n"))
    }

    /// Read the drawing from a file, or from stdin when the path is
    /// missing or `-`
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input.filter(|path| path.as_os_str() != "-") {
            Some(path) => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            None => {
                let mut drawing = String::new();
                io::stdin().read_to_string(&mut drawing)?;
                Ok(drawing)
            }
        }
    }

    /// Write the report to a file, or to stdout (newline-terminated) when
    /// the path is missing or `-`
    pub fn write_output(&self, output: Option<PathBuf>, report: &str) -> Result<()> {
        match output.filter(|path| path.as_os_str() != "-") {
            Some(path) => fs::write(&path, report)
                .map_err(|e| anyhow!("Failed to write output file '{}': {}", path.display(), e)),
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(report.as_bytes())?;
                if !report.is_empty() && !report.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

impl Default for LineworkApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a parse result as a human-readable report
fn parse_report(parsed: &ParseResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("segments ({}):\n", parsed.segments.len()));
    for segment in &parsed.segments {
        out.push_str(&format!("  {}\n", segment));
    }
    out.push_str(&format!("anchors ({}):\n", parsed.anchors.len()));
    for (point, anchor) in &parsed.anchors {
        out.push_str(&format!("  {} {}\n", point, anchor));
    }
    out.push_str(&format!("bullets ({}):\n", parsed.bullets.len()));
    for point in &parsed.bullets {
        out.push_str(&format!("  {}\n", point));
    }
    out
}

/// Render extracted primitives as a human-readable report
fn primitives_report(primitives: &Primitives) -> String {
    let mut out = String::new();
    out.push_str(&format!("cycles ({}):\n", primitives.cycles.len()));
    for cycle in &primitives.cycles {
        out.push_str(&format!("  {}\n", walk_line(cycle)));
    }
    out.push_str(&format!("filaments ({}):\n", primitives.filaments.len()));
    for filament in &primitives.filaments {
        out.push_str(&format!("  {}\n", walk_line(filament)));
    }
    out
}

fn walk_line(walk: &[linework::Point]) -> String {
    walk.iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Render a parse result as a JSON document
fn parse_report_json(parsed: &ParseResult) -> serde_json::Value {
    serde_json::json!({
        "segments": parsed.segments.iter().collect::<Vec<_>>(),
        "anchors": parsed
            .anchors
            .iter()
            .map(|(point, anchor)| serde_json::json!({ "at": point, "kind": anchor }))
            .collect::<Vec<_>>(),
        "bullets": parsed.bullets.iter().collect::<Vec<_>>(),
    })
}
