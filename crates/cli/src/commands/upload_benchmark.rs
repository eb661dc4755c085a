//! Benchmark upload: one system per dataset of a benchmark

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use evalboard_domain::{order_output_files, pair_with_manifest, SharedSubmission};

use crate::batch::{BatchError, BatchSubmitter, FixedDelay};
use crate::commands::{load_manifest, load_system_details, CommandContext};
use crate::output::{batch_summary_table, colors};

/// Arguments of `upload-benchmark`
#[derive(Args, Debug, Clone)]
pub struct UploadBenchmarkArgs {
    /// Name of the system
    #[arg(long)]
    pub system_name: String,

    /// Benchmark manifest (JSON)
    #[arg(long, value_name = "FILE")]
    pub benchmark: PathBuf,

    /// One output file per benchmark dataset, named <number>.<ext> or <number>_<label>.<ext>
    #[arg(long, num_args = 1.., required = true, value_name = "FILE")]
    pub system_outputs: Vec<PathBuf>,

    /// JSON file describing the system
    #[arg(long, value_name = "FILE")]
    pub system_details: Option<PathBuf>,

    /// Users to share the results with
    #[arg(long, num_args = 1..)]
    pub shared_users: Vec<String>,

    /// Make the results publicly visible
    #[arg(long)]
    pub public: bool,

    /// Pause between two submissions (defaults to the configured delay)
    #[arg(long, value_name = "SECONDS")]
    pub delay_seconds: Option<u64>,
}

/// Submit every dataset of a benchmark, then print a summary table
pub async fn upload_benchmark(ctx: &CommandContext, args: UploadBenchmarkArgs) -> Result<()> {
    ctx.require_auth()?;

    let manifest = load_manifest(&args.benchmark)?;
    let files = order_output_files(args.system_outputs.iter().cloned())?;
    let pairs = pair_with_manifest(&manifest.datasets, &files)?;

    let shared = SharedSubmission {
        system_name: args.system_name.clone(),
        public: args.public,
        shared_users: args.shared_users.clone(),
        system_details: load_system_details(args.system_details.as_deref())?,
        languages: ctx.config.languages(),
    };

    let delay = args
        .delay_seconds
        .map(Duration::from_secs)
        .unwrap_or_else(|| ctx.config.submission_delay());

    println!(
        "{}",
        colors::info(&format!(
            "Submitting system {} for {} datasets",
            shared.system_name,
            pairs.len()
        ))
    );

    let systems = ctx.client.systems();
    let submitter = BatchSubmitter::new(&systems, FixedDelay::new(delay), &shared);

    let report = match submitter.submit_all(&pairs).await {
        Ok(report) => report,
        Err(e) => {
            let BatchError::CreateFailed { completed, .. } = &e;
            if !completed.items.is_empty() {
                println!();
                println!("{}", batch_summary_table(completed));
            }
            return Err(e.into());
        }
    };

    println!();
    println!("{}", batch_summary_table(&report));

    let summary = format!("{} posted, {} failed", report.confirmed(), report.failed());
    if report.failed() == 0 {
        println!("{}", colors::success(&summary));
    } else {
        println!("{}", colors::warning(&summary));
    }

    Ok(())
}
