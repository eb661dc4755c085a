//! Single-system evaluation

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{ArgGroup, Args};
use evalboard_domain::submission::TASK_TYPES;
use evalboard_domain::{
    CustomDataset, DatasetSelection, EvaluationRequest, FileType, LanguagePair, SubmissionResult,
    SystemOutput,
};
use tracing::info;

use crate::commands::{load_system_details, CommandContext};
use crate::interactive::spinner;
use crate::output::{colors, write_report};

/// Arguments of `evaluate`
#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("dataset_source")
        .required(true)
        .args(["dataset", "custom_dataset_file"])
))]
pub struct EvaluateArgs {
    /// Task type, for example text-classification
    #[arg(long, value_parser = PossibleValuesParser::new(TASK_TYPES.iter().copied()))]
    pub task: String,

    /// Name of the system
    #[arg(long)]
    pub system_name: String,

    /// File with the system's predictions
    #[arg(long, value_name = "FILE")]
    pub system_output_file: PathBuf,

    /// Format of the system output file (text, json, tsv, conll)
    #[arg(long, value_name = "TYPE")]
    pub system_output_file_type: Option<FileType>,

    /// Registered dataset to evaluate against
    #[arg(long)]
    pub dataset: Option<String>,

    /// Sub-dataset of the registered dataset
    #[arg(long, requires = "dataset")]
    pub sub_dataset: Option<String>,

    /// Split of the registered dataset
    #[arg(long, default_value = "test")]
    pub split: String,

    /// Dataset file to evaluate against instead of a registered dataset
    #[arg(long, value_name = "FILE")]
    pub custom_dataset_file: Option<PathBuf>,

    /// Format of the custom dataset file
    #[arg(long, value_name = "TYPE", requires = "custom_dataset_file")]
    pub custom_dataset_file_type: Option<FileType>,

    /// Metrics to compute; the task's defaults when omitted
    #[arg(long, num_args = 1..)]
    pub metric_names: Vec<String>,

    /// Source language (defaults to the configured language)
    #[arg(long)]
    pub source_language: Option<String>,

    /// Target language (defaults to the configured language)
    #[arg(long)]
    pub target_language: Option<String>,

    /// JSON file describing the system
    #[arg(long, value_name = "FILE")]
    pub system_details_file: Option<PathBuf>,

    /// Make the results publicly visible
    #[arg(long)]
    pub public: bool,

    /// Users to share the results with
    #[arg(long, num_args = 1..)]
    pub shared_users: Vec<String>,

    /// Write the full service response to this file
    #[arg(long, value_name = "FILE")]
    pub report_file: Option<PathBuf>,
}

impl EvaluateArgs {
    /// Build the evaluation request, loading the system details file
    pub fn to_request(&self, defaults: LanguagePair) -> Result<EvaluationRequest> {
        let dataset = match (&self.dataset, &self.custom_dataset_file) {
            (Some(dataset), _) => DatasetSelection::Registered {
                dataset: dataset.clone(),
                sub_dataset: self.sub_dataset.clone(),
                split: self.split.clone(),
            },
            (None, Some(path)) => DatasetSelection::Custom(CustomDataset {
                path: path.clone(),
                file_type: self.custom_dataset_file_type,
            }),
            (None, None) => anyhow::bail!("Either --dataset or --custom-dataset-file is required"),
        };

        Ok(EvaluationRequest {
            task: self.task.clone(),
            system_name: self.system_name.clone(),
            system_output: SystemOutput {
                path: self.system_output_file.clone(),
                file_type: self.system_output_file_type,
            },
            dataset,
            metric_names: self.metric_names.clone(),
            languages: LanguagePair {
                source: self.source_language.clone().unwrap_or(defaults.source),
                target: self.target_language.clone().unwrap_or(defaults.target),
            },
            public: self.public,
            shared_users: self.shared_users.clone(),
            system_details: load_system_details(self.system_details_file.as_deref())?,
        })
    }
}

/// Evaluate one system output file and print its overall metrics.
///
/// Any failure of the attempt is printed and swallowed; metrics are printed
/// only when the service returned them.
pub async fn evaluate(ctx: &CommandContext, args: EvaluateArgs) -> Result<()> {
    ctx.require_auth()?;

    let result = match attempt(ctx, &args).await {
        Ok(result) => Some(result),
        Err(e) => {
            eprintln!("{} {:?}", colors::error("Evaluation failed:"), e);
            None
        }
    };

    let lines = overall_lines(result.as_ref());
    if !lines.is_empty() {
        println!();
        for line in lines {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Overall metric lines of an evaluation attempt, empty when there is nothing to show
pub fn overall_lines(result: Option<&SubmissionResult>) -> Vec<String> {
    result
        .and_then(SubmissionResult::overall_metrics)
        .map(|overall| overall.lines())
        .unwrap_or_default()
}

async fn attempt(ctx: &CommandContext, args: &EvaluateArgs) -> Result<SubmissionResult> {
    let request = args.to_request(ctx.config.languages())?;
    info!(
        system_name = %request.system_name,
        task = %request.task,
        output = %request.system_output.path.display(),
        "evaluating system"
    );

    let sp = spinner("Evaluating system...");
    let result = ctx.client.systems().evaluate_file(request).await;
    sp.finish_and_clear();
    let result = result.context("Failed to evaluate system")?;

    let system_id = result.system_id();
    println!(
        "{}",
        colors::success(&format!(
            "Successfully evaluated system {} with ID {}",
            args.system_name, system_id
        ))
    );
    println!(
        "View it at {}",
        colors::info(&ctx.client.config().system_url(system_id.as_str()))
    );

    if let Some(path) = &args.report_file {
        write_report(path, &result)?;
        println!("{}", colors::dim(&format!("Report written to {}", path.display())));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: EvaluateArgs,
    }

    fn parse(extra: &[&str]) -> Result<EvaluateArgs, clap::Error> {
        let mut argv = vec![
            "evalboard",
            "--task",
            "text-classification",
            "--system-name",
            "sys",
            "--system-output-file",
            "out.txt",
        ];
        argv.extend_from_slice(extra);
        TestCli::try_parse_from(argv).map(|cli| cli.args)
    }

    #[test]
    fn test_dataset_source_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_dataset_sources_are_exclusive() {
        assert!(parse(&["--dataset", "sst2", "--custom-dataset-file", "d.tsv"]).is_err());
    }

    #[test]
    fn test_registered_dataset_request() {
        let args = parse(&[
            "--dataset",
            "xtreme",
            "--sub-dataset",
            "panx_de",
            "--metric-names",
            "F1",
            "Accuracy",
            "--target-language",
            "de",
        ])
        .unwrap();
        let request = args.to_request(LanguagePair::default()).unwrap();

        assert_eq!(request.metric_names, vec!["F1", "Accuracy"]);
        assert_eq!(request.languages.source, "en");
        assert_eq!(request.languages.target, "de");
        let record = request.into_record();
        assert_eq!(
            record.metadata.dataset_metadata_id.map(|id| id.into_inner()),
            Some("xtreme.panx_de".to_string())
        );
        assert_eq!(record.metadata.dataset_split.as_deref(), Some("test"));
    }

    #[test]
    fn test_custom_dataset_request() {
        let args = parse(&[
            "--custom-dataset-file",
            "data.tsv",
            "--custom-dataset-file-type",
            "tsv",
            "--system-output-file-type",
            "text",
            "--public",
        ])
        .unwrap();
        let request = args.to_request(LanguagePair::default()).unwrap();

        assert!(request.public);
        assert_eq!(request.system_output.file_type, Some(FileType::Text));
        match request.dataset {
            DatasetSelection::Custom(custom) => {
                assert_eq!(custom.path, PathBuf::from("data.tsv"));
                assert_eq!(custom.file_type, Some(FileType::Tsv));
            }
            other => panic!("unexpected dataset: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_task_is_rejected() {
        let argv = [
            "evalboard",
            "--task",
            "poetry-writing",
            "--system-name",
            "sys",
            "--system-output-file",
            "out.txt",
            "--dataset",
            "sst2",
        ];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_unknown_file_type_is_rejected() {
        assert!(parse(&["--dataset", "sst2", "--system-output-file-type", "xml"]).is_err());
    }
}
