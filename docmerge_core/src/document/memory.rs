use image::ImageFormat;

use super::TemplateCell;
use super::TemplateDocument;
use super::TemplateParagraph;
use crate::LogoImage;
use crate::MergeResult;

/// An in-memory rich-text document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
	pub paragraphs: Vec<MemoryParagraph>,
	pub tables: Vec<MemoryTable>,
	pub headers: Vec<MemoryHeader>,
}

impl MemoryDocument {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn paragraph(mut self, paragraph: MemoryParagraph) -> Self {
		self.paragraphs.push(paragraph);
		self
	}

	#[must_use]
	pub fn table(mut self, table: MemoryTable) -> Self {
		self.tables.push(table);
		self
	}

	#[must_use]
	pub fn header(mut self, header: MemoryHeader) -> Self {
		self.headers.push(header);
		self
	}
}

/// A single run of a [`MemoryParagraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryRun {
	Text(String),
	Image {
		width_emu: u32,
		height_emu: u32,
		format: ImageFormat,
	},
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryParagraph {
	pub runs: Vec<MemoryRun>,
}

impl MemoryParagraph {
	/// A paragraph whose text is split across the given runs.
	pub fn from_runs<I, S>(runs: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			runs: runs
				.into_iter()
				.map(|text| MemoryRun::Text(text.into()))
				.collect(),
		}
	}

	/// A paragraph with a single text run.
	pub fn with_text(text: impl Into<String>) -> Self {
		Self {
			runs: vec![MemoryRun::Text(text.into())],
		}
	}

	pub fn images(&self) -> impl Iterator<Item = &MemoryRun> {
		self.runs
			.iter()
			.filter(|run| matches!(run, MemoryRun::Image { .. }))
	}
}

impl TemplateParagraph for MemoryParagraph {
	fn text(&self) -> String {
		self.runs
			.iter()
			.filter_map(|run| {
				match run {
					MemoryRun::Text(text) => Some(text.as_str()),
					MemoryRun::Image { .. } => None,
				}
			})
			.collect()
	}

	fn replace_runs_with_text(&mut self, text: &str) {
		self.runs = vec![MemoryRun::Text(text.to_string())];
	}

	fn replace_runs_with_image(&mut self, image: &LogoImage) -> MergeResult<()> {
		self.runs = vec![MemoryRun::Image {
			width_emu: image.width_emu(),
			height_emu: image.height_emu(),
			format: image.format(),
		}];
		Ok(())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCell {
	pub paragraphs: Vec<MemoryParagraph>,
}

impl MemoryCell {
	pub fn with_text(text: impl Into<String>) -> Self {
		Self {
			paragraphs: vec![MemoryParagraph::with_text(text)],
		}
	}
}

impl TemplateCell for MemoryCell {
	fn text(&self) -> String {
		self.paragraphs
			.iter()
			.map(TemplateParagraph::text)
			.collect::<Vec<_>>()
			.join("\n")
	}

	fn set_text(&mut self, text: &str) {
		self.paragraphs = vec![MemoryParagraph::with_text(text)];
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTable {
	pub rows: Vec<Vec<MemoryCell>>,
}

impl MemoryTable {
	/// Build a table from rows of cell texts.
	pub fn from_rows<R, C, S>(rows: R) -> Self
	where
		R: IntoIterator<Item = C>,
		C: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			rows: rows
				.into_iter()
				.map(|row| row.into_iter().map(MemoryCell::with_text).collect())
				.collect(),
		}
	}

	/// Text of the cell at `row`, `column`.
	pub fn cell_text(&self, row: usize, column: usize) -> Option<String> {
		self.rows
			.get(row)
			.and_then(|cells| cells.get(column))
			.map(TemplateCell::text)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHeader {
	pub paragraphs: Vec<MemoryParagraph>,
}

impl MemoryHeader {
	pub fn new(paragraphs: Vec<MemoryParagraph>) -> Self {
		Self { paragraphs }
	}
}

impl TemplateDocument for MemoryDocument {
	type Cell = MemoryCell;
	type Paragraph = MemoryParagraph;

	fn body_paragraphs_mut(&mut self) -> Vec<&mut MemoryParagraph> {
		self.paragraphs.iter_mut().collect()
	}

	fn tables_mut(&mut self) -> Vec<Vec<Vec<&mut MemoryCell>>> {
		self.tables
			.iter_mut()
			.map(|table| {
				table
					.rows
					.iter_mut()
					.map(|row| row.iter_mut().collect())
					.collect()
			})
			.collect()
	}

	fn header_paragraphs_mut(&mut self) -> Vec<&mut MemoryParagraph> {
		self.headers
			.iter_mut()
			.flat_map(|header| header.paragraphs.iter_mut())
			.collect()
	}
}
