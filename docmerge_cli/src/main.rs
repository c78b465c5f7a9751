use std::process;

use clap::Parser;
use docmerge_cli::DEFAULT_LOG_FILTER;
use docmerge_cli::DocmergeCli;
use docmerge_cli::LOG_ENV_VAR;
use docmerge_core::MergeResult;
use docmerge_core::SystemClock;
use tracing_subscriber::EnvFilter;

fn main() {
	let _args = DocmergeCli::parse();
	let use_color = std::env::var_os("NO_COLOR").is_none();

	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_env(LOG_ENV_VAR)
				.unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
		)
		.with_ansi(use_color)
		.with_writer(std::io::stderr)
		.init();

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if let Err(e) = run() {
		let report: miette::Report = e.into();
		eprintln!("{report:?}");
		process::exit(2);
	}
}

fn run() -> MergeResult<()> {
	let root = std::env::current_dir()?;
	tracing::debug!(root = %root.display(), "starting merge");
	let (job, report) = docmerge_cli::run(&root, &SystemClock)?;

	if report.is_empty() {
		println!("No placeholders found in {}.", job.template.display());
	}
	println!(
		"Merged {} paragraph(s), {} table cell(s) and {} logo(s).",
		report.paragraphs, report.cells, report.logos
	);
	println!("Written to {}", job.output.display());

	Ok(())
}
