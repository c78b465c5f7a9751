use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::MergeError;
use crate::MergeResult;
use crate::pattern::DEFAULT_LOGO_MARKER;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"docmerge.toml",
	".docmerge.toml",
	".config/docmerge.toml",
];

/// Default name of the merged document.
pub const DEFAULT_OUTPUT_FILE: &str = "xml_to_docx_result.docx";

/// Configuration loaded from a `docmerge.toml` file. Every key is optional.
///
/// ```toml
/// [resources]
/// dir = "resources"
/// data = "raw.xml"
/// template = "raw.docx"
/// logo = "logo.png"
///
/// [output]
/// path = "xml_to_docx_result.docx"
///
/// [placeholders]
/// logo_marker = "[logo]"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct MergeConfig {
	/// Locations of the data file, template and logo.
	#[serde(default)]
	pub resources: ResourcesConfig,
	/// Where the merged document is written.
	#[serde(default)]
	pub output: OutputConfig,
	/// Placeholder markers.
	#[serde(default)]
	pub placeholders: PlaceholdersConfig,
}

/// The bundled resource files. File names are relative to `dir`, which is
/// relative to the project root.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResourcesConfig {
	pub dir: PathBuf,
	pub data: PathBuf,
	pub template: PathBuf,
	pub logo: PathBuf,
}

impl Default for ResourcesConfig {
	fn default() -> Self {
		Self {
			dir: PathBuf::from("resources"),
			data: PathBuf::from("raw.xml"),
			template: PathBuf::from("raw.docx"),
			logo: PathBuf::from("logo.png"),
		}
	}
}

impl ResourcesConfig {
	/// Resolve a resource file name to an existing path.
	pub fn resolve(&self, root: &Path, name: &Path) -> MergeResult<PathBuf> {
		let path = root.join(&self.dir).join(name);

		if path.is_file() {
			Ok(path)
		} else {
			Err(MergeError::MissingResource {
				name: name.display().to_string(),
				path: path.display().to_string(),
			})
		}
	}
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
	/// Destination of the merged document, relative to the project root.
	pub path: PathBuf,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			path: PathBuf::from(DEFAULT_OUTPUT_FILE),
		}
	}
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlaceholdersConfig {
	/// Literal text marking header paragraphs replaced by the logo.
	pub logo_marker: String,
}

impl Default for PlaceholdersConfig {
	fn default() -> Self {
		Self {
			logo_marker: DEFAULT_LOGO_MARKER.to_string(),
		}
	}
}

impl MergeConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> MergeResult<Option<MergeConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: MergeConfig =
			toml::from_str(&content).map_err(|e| MergeError::ConfigParse(e.to_string()))?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}
}
