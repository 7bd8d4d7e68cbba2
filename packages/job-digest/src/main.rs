//! Job digest CLI
//!
//! Fetches listings for every configured query, runs the pipeline, and
//! writes the digest in each configured format.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use job_digest::config::DigestConfig;
use job_digest::output::write_reports;
use job_digest::pipeline::{JobPipeline, RunStats};
use job_digest::render::{self, RenderOptions, ReportFormat};
use job_digest::sources::{build_sources, collect, Collected};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "job-digest")]
#[command(about = "Collect recent job listings and render a digest", version)]
struct Cli {
    /// TOML config file
    #[arg(long, short, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Bundled preset (see --list-presets)
    #[arg(long)]
    preset: Option<String>,

    /// List bundled presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Search query; repeat to search several (replaces configured queries)
    #[arg(long = "query", short)]
    queries: Vec<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    max_age_hours: Option<u32>,

    #[arg(long)]
    max_jobs: Option<usize>,

    /// Must-match keyword; repeat for several (replaces configured keywords)
    #[arg(long = "keyword", short)]
    keywords: Vec<String>,

    /// Publisher to drop; repeatable (adds to configured exclusions)
    #[arg(long = "exclude-publisher")]
    excluded_publishers: Vec<String>,

    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// File name without extension
    #[arg(long)]
    stem: Option<String>,

    /// Report format; repeat for several (replaces configured formats)
    #[arg(long = "format", short, value_enum)]
    formats: Vec<ReportFormat>,

    /// Name used to sign outreach messages
    #[arg(long)]
    candidate: Option<String>,

    /// Skip the JSearch API even if a key is set
    #[arg(long)]
    no_jsearch: bool,

    #[arg(long)]
    concurrency: Option<usize>,

    /// Print the text report instead of writing files
    #[arg(long)]
    dry_run: bool,

    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<DigestConfig> {
        let mut config = match (&self.config, &self.preset) {
            (Some(path), _) => DigestConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            (None, Some(name)) => {
                DigestConfig::preset(name).with_context(|| format!("Failed to load preset {}", name))?
            }
            (None, None) => DigestConfig::default(),
        };

        if !self.queries.is_empty() {
            config.search.queries = self.queries.clone();
        }
        if let Some(location) = &self.location {
            config.search.location = location.clone();
        }
        if let Some(hours) = self.max_age_hours {
            config.filters.max_age_hours = hours;
        }
        if let Some(max_jobs) = self.max_jobs {
            config.max_jobs = max_jobs;
        }
        if !self.keywords.is_empty() {
            config.filters.must_keywords = self.keywords.clone();
        }
        config
            .filters
            .excluded_publishers
            .extend(self.excluded_publishers.iter().cloned());
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(stem) = &self.stem {
            config.output.stem = stem.clone();
        }
        if !self.formats.is_empty() {
            config.output.formats = self.formats.clone();
        }
        if let Some(candidate) = &self.candidate {
            config.outreach.candidate_name = candidate.clone();
        }
        if self.no_jsearch {
            config.fetch.jsearch_enabled = false;
        }
        if let Some(concurrency) = self.concurrency {
            config.fetch.concurrency = concurrency;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn print_summary(collected: &Collected, stats: &RunStats) {
    eprintln!(
        "Fetched {} records ({} of {} searches failed)",
        collected.records.len(),
        collected.failed,
        collected.attempted
    );
    for (filter, count) in &stats.rejected {
        eprintln!("  rejected by {}: {}", filter, count);
    }
    eprintln!("  duplicates collapsed: {}", stats.duplicates);
    if stats.truncated > 0 {
        eprintln!("  dropped over limit: {}", stats.truncated);
    }
    eprintln!("Found {} jobs from multiple platforms!", stats.kept);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "debug"
    } else {
        "info,job_digest=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.list_presets {
        for name in DigestConfig::preset_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = cli.load_config()?;
    let now = Utc::now();

    tracing::info!(
        queries = config.search.queries.len(),
        location = %config.search.location,
        max_age_hours = config.filters.max_age_hours,
        "Fetching jobs"
    );

    let sources = build_sources(&config);
    if sources.is_empty() {
        tracing::warn!("No sources available; the report will be empty");
    }

    let collected = collect(
        &sources,
        &config.search.queries,
        &config.search.location,
        config.fetch.concurrency,
    )
    .await;

    let output = JobPipeline::from_config(&config, now).run(&collected.records);
    print_summary(&collected, &output.stats);

    let options = RenderOptions::from_config(&config);

    if cli.dry_run {
        let report = render::render(ReportFormat::Text, &output.jobs, &options)
            .context("Failed to render report")?;
        print!("{}", report);
        return Ok(());
    }

    let paths = write_reports(&output.jobs, &config.output, &options)
        .context("Failed to write reports")?;
    for path in paths {
        eprintln!("Saved to {}", path.display());
    }

    Ok(())
}
