use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use segset::{Config, SegmentOrigin, SegmentSampler};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Walk an audio manifest once and report the segment drawn for every index
#[derive(Parser, Debug)]
#[command(name = "segset")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config with [dataset] and optional [check] sections
    #[arg(default_value = "config.toml")]
    config: PathBuf,
}

#[derive(Debug, Serialize)]
struct ItemReport {
    index: usize,
    path: String,
    origin: Option<SegmentOrigin>,
    peak: Option<f32>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let mut sampler = SegmentSampler::new(&config.dataset.manifest, config.dataset.sampler)?;
    if let Some(seed) = config.check.seed {
        sampler.reseed(seed);
    }

    let total = config.check.limit.map_or(sampler.len(), |limit| limit.min(sampler.len()));
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    pb.set_message("Sampling segments");

    let mut reports = Vec::with_capacity(total);
    let mut failures = 0usize;
    for index in 0..total {
        let path = sampler.files()[index].clone();
        let report = match sampler.get_with_origin(index) {
            Ok((segment, origin)) => ItemReport {
                index,
                path,
                origin: Some(origin),
                peak: Some(segment.peak()),
                error: None,
            },
            Err(e) => {
                failures += 1;
                pb.suspend(|| error!("index {}: {}", index, e));
                ItemReport { index, path, origin: None, peak: None, error: Some(e.to_string()) }
            }
        };
        reports.push(report);
        pb.inc(1);
    }
    pb.finish_with_message("Sampling completed!");
    info!("{} of {} segments sampled, {} failed", total - failures, total, failures);

    if let Some(report_file) = &config.check.report_file {
        let json = serde_json::to_string_pretty(&reports)?;
        let mut file = File::create(report_file)
            .with_context(|| format!("creating report {}", report_file.display()))?;
        file.write_all(json.as_bytes())?;
        info!("report written to {}", report_file.display());
    }

    Ok(())
}
