use std::path::Path;

use clap::Parser;
use docmerge_core::Clock;
use docmerge_core::MergeJob;
use docmerge_core::MergeReport;
use docmerge_core::MergeResult;

/// Environment variable holding the `tracing` filter directives.
pub const LOG_ENV_VAR: &str = "DOCMERGE_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Fill a docx template from an XML data record.",
	long_about = "docmerge reads `resources/raw.xml`, `resources/raw.docx` and \
	              `resources/logo.png` from the working directory, replaces the template \
	              placeholders with values from the data record and writes \
	              `xml_to_docx_result.docx`.\n\nThe file names can be changed in an optional \
	              `docmerge.toml`. Set DOCMERGE_LOG=debug to trace every rewritten paragraph \
	              and cell."
)]
pub struct DocmergeCli {}

/// Run the merge job configured for `root`.
pub fn run(root: &Path, clock: &dyn Clock) -> MergeResult<(MergeJob, MergeReport)> {
	let job = MergeJob::discover(root)?;
	let report = job.run(clock)?;

	Ok((job, report))
}
