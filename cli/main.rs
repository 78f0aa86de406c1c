//! This module contains the main entrypoint to the neuroscan cli.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod config;
mod dataset;
mod evaluate;
mod load;

#[derive(Parser)]
#[command(
	name = "neuroscan",
	version,
	about = "Evaluate a tumor / no_tumor MRI classifier from its predicted probabilities.",
	disable_help_subcommand = true
)]
struct Options {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	Evaluate(EvaluateOptions),
	Reorganize(ReorganizeOptions),
}

/// compute metrics at a locked threshold and sweep thresholds for the best f1
#[derive(Args, Debug)]
#[command(
	long_about = "compute metrics at a locked threshold and sweep thresholds for the best f1, then write metrics.json and results.md"
)]
struct EvaluateOptions {
	/// the path to a .csv file with the columns `probability` and `label`
	#[arg(short, long)]
	predictions: PathBuf,
	/// the path to a yaml config file
	#[arg(short, long)]
	config: Option<PathBuf>,
	/// the locked threshold, overriding the config file
	#[arg(short, long)]
	threshold: Option<f64>,
	/// the directory to write metrics.json and results.md to, overriding the config file
	#[arg(short, long)]
	output: Option<PathBuf>,
}

/// copy a four class mri dataset into the binary tumor / no_tumor layout
#[derive(Args, Debug)]
struct ReorganizeOptions {
	/// the directory containing `Training` and `Testing`
	#[arg(short, long, default_value = "input")]
	source: PathBuf,
	/// the directory to create `train` and `test` in
	#[arg(short, long, default_value = "data/binary_split")]
	dest: PathBuf,
}

fn main() {
	let env = env_logger::Env::default().default_filter_or("neuroscan=info");
	env_logger::Builder::from_env(env)
		.format_level(false)
		.format_target(false)
		.format_timestamp(None)
		.init();
	let options = Options::parse();
	let result = match options.command {
		Command::Evaluate(options) => cli_evaluate(options),
		Command::Reorganize(options) => cli_reorganize(options),
	};
	if let Err(error) = result {
		eprintln!("{}: {:#}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_evaluate(options: EvaluateOptions) -> anyhow::Result<()> {
	evaluate::run(evaluate::EvaluateArgs {
		predictions: &options.predictions,
		config: options.config.as_deref(),
		threshold: options.threshold,
		output_dir: options.output.as_deref(),
	})
}

fn cli_reorganize(options: ReorganizeOptions) -> anyhow::Result<()> {
	let copied = dataset::reorganize(&options.source, &options.dest)?;
	for class in copied.iter() {
		eprintln!(
			"{:>5}  {:<10} -> {:<8} {} files",
			class.split, class.source_class, class.target_class, class.n_files
		);
	}
	let n_files: usize = copied.iter().map(|class| class.n_files).sum();
	eprintln!(
		"Copied {} images into {} for binary classification (tumor / no_tumor).",
		n_files,
		options.dest.display()
	);
	Ok(())
}

#[test]
fn test_options() {
	use clap::CommandFactory;
	Options::command().debug_assert();
	let options = Options::try_parse_from([
		"neuroscan",
		"evaluate",
		"--predictions",
		"predictions.csv",
		"--threshold",
		"0.3",
	])
	.unwrap();
	match options.command {
		Command::Evaluate(options) => {
			assert_eq!(options.predictions, PathBuf::from("predictions.csv"));
			assert_eq!(options.threshold, Some(0.3));
			assert!(options.config.is_none());
		}
		Command::Reorganize(_) => panic!("expected the evaluate command"),
	}
}
