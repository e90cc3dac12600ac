//! pipeline-dag CLI entry point.
//!
//! Reads a pipeline in the editor's JSON export format from a file or stdin,
//! then validates it or auto-arranges it.

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pipeline_dag::{Direction, LayoutConfig, Pipeline, RankAlign, ValidationResult};

/// Exit status of `validate` when the pipeline breaks a rule.
const EXIT_INVALID: i32 = 2;

/// DAG validation and auto-layout for pipeline diagrams.
#[derive(Parser, Debug)]
#[command(
    name = "pipeline-dag",
    version = env!("PIPELINE_DAG_VERSION"),
    about = "DAG validation and auto-layout for pipeline diagrams"
)]
struct Cli {
    /// Log debug output to stderr (same as PIPELINE_DAG_LOG=pipeline_dag=debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the pipeline is a connected DAG with at least two nodes
    Validate {
        /// Input file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// Print a human-readable status report instead of JSON
        #[arg(short = 's', long = "summary")]
        summary: bool,
    },
    /// Auto-arrange node positions in layered top-to-bottom order
    Layout {
        /// Input file (reads from stdin if not provided)
        input: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Write output to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// Print the built-in five-node sample pipeline
    Sample {
        /// Write output to this file instead of stdout
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// TOML file with layout options; flags below override it
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Node box width
    #[arg(long = "node-width")]
    node_width: Option<f64>,

    /// Node box height
    #[arg(long = "node-height")]
    node_height: Option<f64>,

    /// Gap between nodes of the same rank
    #[arg(long = "node-sep")]
    node_separation: Option<f64>,

    /// Gap between ranks
    #[arg(long = "rank-sep")]
    rank_separation: Option<f64>,

    /// Outer margin on both axes
    #[arg(long = "margin")]
    margin: Option<f64>,

    /// Flow direction (TB or LR)
    #[arg(short = 'd', long = "direction")]
    direction: Option<Direction>,

    /// Number of crossing-reduction sweeps
    #[arg(long = "passes")]
    passes: Option<usize>,

    /// Center each rank instead of left-aligning it
    #[arg(long = "center")]
    center: bool,
}

impl LayoutArgs {
    fn resolve(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => LayoutConfig::from_path(path)
                .with_context(|| format!("cannot load config '{}'", path.display()))?,
            None => LayoutConfig::default(),
        };
        if let Some(w) = self.node_width {
            config.node_width = w;
        }
        if let Some(h) = self.node_height {
            config.node_height = h;
        }
        if let Some(sep) = self.node_separation {
            config.node_separation = sep;
        }
        if let Some(sep) = self.rank_separation {
            config.rank_separation = sep;
        }
        if let Some(m) = self.margin {
            config.margin_x = m;
            config.margin_y = m;
        }
        if let Some(d) = self.direction {
            config.direction = d;
        }
        if let Some(p) = self.passes {
            config.ordering_passes = p;
        }
        if self.center {
            config.rank_align = RankAlign::Center;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PIPELINE_DAG_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "pipeline_dag=debug"
        } else {
            "pipeline_dag=warn"
        })
    });

    let format = env::var("PIPELINE_DAG_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(command: Command) -> Result<i32> {
    match command {
        Command::Validate { input, summary } => {
            let pipeline = read_pipeline(input.as_deref())?;
            let result = pipeline.validate();
            let text = if summary {
                render_summary(&pipeline, &result)
            } else {
                serde_json::to_string_pretty(&result)?
            };
            write_output(None, &text)?;
            Ok(if result.is_valid { 0 } else { EXIT_INVALID })
        }
        Command::Layout {
            input,
            layout,
            output,
        } => {
            let config = layout.resolve()?;
            let pipeline = read_pipeline(input.as_deref())?;
            debug!(?config, "arranging pipeline");
            let arranged = pipeline.arranged(&config);
            write_output(output.as_deref(), &arranged.to_json_pretty()?)?;
            Ok(0)
        }
        Command::Sample { output } => {
            write_output(output.as_deref(), &Pipeline::sample().to_json_pretty()?)?;
            Ok(0)
        }
    }
}

fn read_pipeline(path: Option<&Path>) -> Result<Pipeline> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            buf
        }
    };
    Ok(Pipeline::from_json(&text)?)
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, format!("{text}\n"))
            .with_context(|| format!("cannot write '{}'", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}").context("cannot write stdout")?;
            stdout.flush().context("cannot flush stdout")
        }
    }
}

/// Status report in the same words the editor's status panel uses.
fn render_summary(pipeline: &Pipeline, result: &ValidationResult) -> String {
    let mut out = String::new();
    if result.is_valid {
        out.push_str("Valid DAG: Ready for execution\n");
    } else {
        out.push_str("Invalid Pipeline: Issues need to be resolved\n");
    }
    out.push_str(&format!(
        "Nodes: {}  Connections: {}\n",
        pipeline.nodes.len(),
        pipeline.edges.len()
    ));
    if !result.errors.is_empty() {
        out.push_str("Issues Found:\n");
        for error in &result.errors {
            out.push_str(&format!("  - {error}\n"));
        }
    }
    out.trim_end().to_string()
}
