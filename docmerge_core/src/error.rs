use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MergeError {
	#[error(transparent)]
	#[diagnostic(code(docmerge::io_error))]
	Io(#[from] std::io::Error),

	#[error("missing resource `{name}`: expected it at `{path}`")]
	#[diagnostic(
		code(docmerge::missing_resource),
		help("place the file in the resources directory or point `[resources]` in docmerge.toml at it")
	)]
	MissingResource { name: String, path: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(docmerge::config_parse),
		help("check that docmerge.toml is valid TOML with [resources], [output] and/or [placeholders] sections")
	)]
	ConfigParse(String),

	#[error("failed to load data file `{path}`: {reason}")]
	#[diagnostic(code(docmerge::data_file))]
	DataFile { path: String, reason: String },

	#[error("unsupported data file format: `{0}`")]
	#[diagnostic(
		code(docmerge::unsupported_format),
		help("supported formats: xml, json, toml, yaml, yml")
	)]
	UnsupportedDataFormat(String),

	#[error("data section must hold exactly {expected} entries, found {found}")]
	#[diagnostic(
		code(docmerge::invalid_data_section),
		help("add one `<data>` element per `<data1>`..`<data4>` placeholder")
	)]
	InvalidDataSection { expected: usize, found: usize },

	#[error("failed to load document `{path}`: {reason}")]
	#[diagnostic(code(docmerge::document_load))]
	DocumentLoad { path: String, reason: String },

	#[error("no order status with id {0} found")]
	#[diagnostic(
		code(docmerge::unknown_status_code),
		help("customer_type must be 1 (not placed), 2 (placed) or 3 (delivered)")
	)]
	UnknownStatusCode(i64),

	#[error(
		"table {table} row {row} has no matching row data: only {available} row(s) available"
	)]
	#[diagnostic(
		code(docmerge::row_index_out_of_range),
		help("add a `<row-data>` entry for every data row of the template table")
	)]
	RowIndexOutOfRange {
		table: usize,
		row: usize,
		available: usize,
	},

	#[error("failed to decode image `{path}`: {reason}")]
	#[diagnostic(code(docmerge::image_decode))]
	ImageDecode { path: String, reason: String },

	#[error("document rejected the embedded image: {0}")]
	#[diagnostic(
		code(docmerge::image_embed),
		help("convert the logo to PNG or JPEG")
	)]
	ImageEmbed(String),

	#[error("failed to save document to `{path}`: {reason}")]
	#[diagnostic(code(docmerge::save))]
	Save { path: String, reason: String },
}

impl MergeError {
	/// Returns true for failures raised before the document is mutated.
	pub fn is_load_error(&self) -> bool {
		matches!(
			self,
			Self::MissingResource { .. }
				| Self::ConfigParse(_)
				| Self::DataFile { .. }
				| Self::UnsupportedDataFormat(_)
				| Self::InvalidDataSection { .. }
				| Self::DocumentLoad { .. }
		)
	}
}

pub type MergeResult<T> = Result<T, MergeError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
