//! The document model the merge passes operate on.
//!
//! A template is seen as body paragraphs, body tables (rows of cells) and
//! header paragraphs. Merge passes only read text and replace runs or cell
//! text wholesale, so any rich-text container exposing these operations can be
//! merged. [`MemoryDocument`] is a plain in-memory model and [`DocxDocument`]
//! adapts `docx-rs`.

use std::path::Path;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

pub use docx::*;
pub use memory::*;

use crate::LogoImage;
use crate::MergeError;
use crate::MergeResult;

mod docx;
mod memory;

/// A paragraph: a sequence of styled runs.
pub trait TemplateParagraph {
	/// Concatenated text of every run.
	fn text(&self) -> String;

	/// Discard all runs and write `text` as a single new run.
	fn replace_runs_with_text(&mut self, text: &str);

	/// Discard all runs and write one run embedding `image` at its pixel size.
	fn replace_runs_with_image(&mut self, image: &LogoImage) -> MergeResult<()>;
}

/// A table cell holding text.
pub trait TemplateCell {
	/// Text of the cell, paragraphs separated by `\n`.
	fn text(&self) -> String;

	/// Replace the whole content of the cell with `text`.
	fn set_text(&mut self, text: &str);
}

/// A mutable template document.
pub trait TemplateDocument {
	type Paragraph: TemplateParagraph;
	type Cell: TemplateCell;

	/// Top-level body paragraphs in document order. Paragraphs nested in
	/// tables are not included.
	fn body_paragraphs_mut(&mut self) -> Vec<&mut Self::Paragraph>;

	/// Body tables in document order, each as rows of cells. Row `0` is the
	/// header row.
	fn tables_mut(&mut self) -> Vec<Vec<Vec<&mut Self::Cell>>>;

	/// Paragraphs of every header region.
	fn header_paragraphs_mut(&mut self) -> Vec<&mut Self::Paragraph>;
}

/// Write `bytes` to `path` through a sibling temporary file, so the
/// destination is either left untouched or fully written.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> MergeResult<()> {
	let save_error = |reason: String| {
		MergeError::Save {
			path: path.display().to_string(),
			reason,
		}
	};

	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent).map_err(|e| save_error(e.to_string()))?;
	}

	let file_name = path
		.file_name()
		.ok_or_else(|| save_error("destination has no file name".to_string()))?;
	let temp_path = path.with_file_name(format!(
		".{}.tmp-{}-{}",
		file_name.to_string_lossy(),
		std::process::id(),
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_or(0, |duration| duration.as_nanos())
	));

	std::fs::write(&temp_path, bytes).map_err(|e| save_error(e.to_string()))?;

	if let Err(e) = std::fs::rename(&temp_path, path) {
		let _ = std::fs::remove_file(&temp_path);
		return Err(save_error(e.to_string()));
	}

	Ok(())
}
