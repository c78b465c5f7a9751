use std::path::Path;
use std::path::PathBuf;

use crate::Clock;
use crate::DataRecord;
use crate::LogoImage;
use crate::MergeConfig;
use crate::MergeReport;
use crate::MergeResult;
use crate::document::DocxDocument;
use crate::merge_document;

/// A fully resolved merge run: where to read from and where to write to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeJob {
	pub data: PathBuf,
	pub template: PathBuf,
	pub logo: PathBuf,
	pub output: PathBuf,
	pub logo_marker: String,
}

impl MergeJob {
	/// Resolve every path of `config` against `root`. Fails with
	/// [`MergeError::MissingResource`](crate::MergeError::MissingResource) if
	/// an input file does not exist.
	pub fn from_config(root: &Path, config: &MergeConfig) -> MergeResult<Self> {
		let resources = &config.resources;

		Ok(Self {
			data: resources.resolve(root, &resources.data)?,
			template: resources.resolve(root, &resources.template)?,
			logo: resources.resolve(root, &resources.logo)?,
			output: root.join(&config.output.path),
			logo_marker: config.placeholders.logo_marker.clone(),
		})
	}

	/// Load the config discovered at `root` (or the defaults) and resolve it.
	pub fn discover(root: &Path) -> MergeResult<Self> {
		let config = MergeConfig::load(root)?.unwrap_or_default();
		Self::from_config(root, &config)
	}

	/// Load every input, merge, and save the result to [`Self::output`].
	///
	/// Every input is loaded before the document is touched. The output is
	/// written only after every pass succeeded.
	#[tracing::instrument(skip_all, fields(template = %self.template.display()))]
	pub fn run(&self, clock: &dyn Clock) -> MergeResult<MergeReport> {
		let record = DataRecord::load(&self.data)?;
		let mut document = DocxDocument::open(&self.template)?;
		let logo = LogoImage::open(&self.logo)?;

		let report = merge_document(&mut document, &record, &logo, &self.logo_marker, clock)?;
		document.save(&self.output)?;
		tracing::info!(
			output = %self.output.display(),
			paragraphs = report.paragraphs,
			cells = report.cells,
			logos = report.logos,
			"merge complete"
		);

		Ok(report)
	}
}
