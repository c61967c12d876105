use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info, trace};
use tracing_subscriber::EnvFilter;

use movie_genre_etl::config::EtlConfig;
use movie_genre_etl::pipeline::{
    run_pipeline, CompositeObserver, FileObserver, PipelineObserver, PipelineOptions, RunSummary,
    TracingObserver,
};

/// Count genres per movie and write an enhanced CSV
#[derive(Parser)]
#[command(name = "movie-genre-etl")]
#[command(about = "Add a genre_count column to a movies CSV and report genre statistics", long_about = None)]
struct Cli {
    /// TOML file with input_file / output_file / summary_file / event_log
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Movies CSV to read (default: movies.csv)
    #[arg(short, long, env = "ETL_INPUT_FILE")]
    input: Option<PathBuf>,

    /// Enhanced CSV to write (default: movie_enhanced.csv)
    #[arg(short, long, env = "ETL_OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Also write the run summary as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Append stage events to this file
    #[arg(long)]
    event_log: Option<PathBuf>,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<EtlConfig> {
        let mut config = match &self.config {
            Some(path) => EtlConfig::from_toml_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => EtlConfig::default(),
        };
        if let Some(input) = self.input {
            config.input_file = input;
        }
        if let Some(output) = self.output {
            config.output_file = output;
        }
        if self.summary_json.is_some() {
            config.summary_file = self.summary_json;
        }
        if self.event_log.is_some() {
            config.event_log = self.event_log;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // RUST_LOG, when set, takes precedence over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("movie-genre-etl started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.into_config()?;
    debug!(?config, "resolved configuration");

    let mut observers: Vec<Arc<dyn PipelineObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(path) = &config.event_log {
        observers.push(Arc::new(FileObserver::new(path)));
    }
    let options = PipelineOptions {
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        ..Default::default()
    };

    let summary = run_pipeline(&config.input_file, &config.output_file, &options)
        .with_context(|| {
            format!(
                "pipeline failed ({} -> {})",
                config.input_file.display(),
                config.output_file.display()
            )
        })?;

    log_summary(&summary);

    if let Some(path) = &config.summary_file {
        summary
            .write_json(path)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
    }
    Ok(())
}

fn log_summary(summary: &RunSummary) {
    match summary.average {
        Some(avg) => info!("Average is: {}", avg),
        None => info!("Average is: n/a (no rows read)"),
    }
    info!(
        "most common genre is {} with {} count.",
        summary.top_genre.name, summary.top_genre.count
    );
}
