use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

use docx_rs::DocumentChild;
use docx_rs::Docx;
use docx_rs::FooterChild;
use docx_rs::HeaderChild;
use docx_rs::Paragraph;
use docx_rs::ParagraphChild;
use docx_rs::Pic;
use docx_rs::Run;
use docx_rs::RunChild;
use docx_rs::Table;
use docx_rs::TableCell;
use docx_rs::TableCellContent;
use docx_rs::TableChild;
use docx_rs::TableRowChild;
use image::ImageFormat;
use quick_xml::escape::escape;
use quick_xml::escape::unescape;

use super::TemplateCell;
use super::TemplateDocument;
use super::TemplateParagraph;
use super::write_atomically;
use crate::LogoImage;
use crate::MergeError;
use crate::MergeResult;

/// A `.docx` document backed by `docx-rs`.
#[derive(Debug)]
pub struct DocxDocument {
	docx: Docx,
}

impl DocxDocument {
	/// Read a `.docx` file.
	#[tracing::instrument(skip_all, fields(path = %path.display()))]
	pub fn open(path: &Path) -> MergeResult<Self> {
		let load_error = |reason: String| {
			MergeError::DocumentLoad {
				path: path.display().to_string(),
				reason,
			}
		};

		let bytes = std::fs::read(path).map_err(|e| load_error(e.to_string()))?;
		let mut docx = docx_rs::read_docx(&bytes).map_err(|e| load_error(e.to_string()))?;
		escape_run_texts(&mut docx);
		tracing::debug!(bytes = bytes.len(), "loaded document");

		Ok(Self { docx })
	}

	/// Wrap a document built with the `docx-rs` builders. Run text must be
	/// XML-escaped, as `Run::add_text` stores it.
	pub fn from_docx(docx: Docx) -> Self {
		Self { docx }
	}

	pub fn as_docx(&self) -> &Docx {
		&self.docx
	}

	pub fn into_docx(self) -> Docx {
		self.docx
	}

	/// Serialize the document into the `.docx` container format.
	pub fn to_bytes(self) -> MergeResult<Vec<u8>> {
		let mut buffer = Vec::new();
		self.docx
			.build()
			.pack(&mut Cursor::new(&mut buffer))
			.map_err(|e| {
				MergeError::Save {
					path: "<memory>".to_string(),
					reason: e.to_string(),
				}
			})?;

		Ok(buffer)
	}

	/// Write the document to `path`. The destination is replaced only once the
	/// whole document has been serialized.
	#[tracing::instrument(skip_all, fields(path = %path.display()))]
	pub fn save(self, path: &Path) -> MergeResult<()> {
		let bytes = self.to_bytes().map_err(|e| {
			match e {
				MergeError::Save { reason, .. } => {
					MergeError::Save {
						path: path.display().to_string(),
						reason,
					}
				}
				other => other,
			}
		})?;
		write_atomically(path, &bytes)?;
		tracing::debug!(bytes = bytes.len(), "saved document");

		Ok(())
	}
}

impl From<Docx> for DocxDocument {
	fn from(docx: Docx) -> Self {
		Self::from_docx(docx)
	}
}

impl TemplateDocument for DocxDocument {
	type Cell = TableCell;
	type Paragraph = Paragraph;

	fn body_paragraphs_mut(&mut self) -> Vec<&mut Paragraph> {
		self.docx
			.document
			.children
			.iter_mut()
			.filter_map(|child| {
				match child {
					DocumentChild::Paragraph(paragraph) => {
						let paragraph: &mut Paragraph = paragraph;
						Some(paragraph)
					}
					_ => None,
				}
			})
			.collect()
	}

	fn tables_mut(&mut self) -> Vec<Vec<Vec<&mut TableCell>>> {
		self.docx
			.document
			.children
			.iter_mut()
			.filter_map(|child| {
				match child {
					DocumentChild::Table(table) => Some(table_cells_mut(table)),
					_ => None,
				}
			})
			.collect()
	}

	fn header_paragraphs_mut(&mut self) -> Vec<&mut Paragraph> {
		let section = &mut self.docx.document.section_property;

		[
			section.header.as_mut(),
			section.first_header.as_mut(),
			section.even_header.as_mut(),
		]
		.into_iter()
		.flatten()
		.flat_map(|(_, header)| {
			header.children.iter_mut().filter_map(|child| {
				match child {
					HeaderChild::Paragraph(paragraph) => {
						let paragraph: &mut Paragraph = paragraph;
						Some(paragraph)
					}
					_ => None,
				}
			})
		})
		.collect()
	}
}

fn table_cells_mut(table: &mut Table) -> Vec<Vec<&mut TableCell>> {
	table
		.rows
		.iter_mut()
		.map(|row| {
			let TableChild::TableRow(row) = row;
			row.cells
				.iter_mut()
				.map(|cell| {
					let TableRowChild::TableCell(cell) = cell;
					cell
				})
				.collect()
		})
		.collect()
}

/// Escape the text of every run in `docx` in place.
///
/// `read_docx` stores run text unescaped while `Run::add_text` stores it
/// escaped, and the writer emits `Text::text` verbatim. Documents are kept in
/// the escaped form.
fn escape_run_texts(docx: &mut Docx) {
	for child in &mut docx.document.children {
		match child {
			DocumentChild::Paragraph(paragraph) => escape_paragraph(paragraph),
			DocumentChild::Table(table) => escape_table(table),
			_ => {}
		}
	}

	let section = &mut docx.document.section_property;
	let headers = [
		section.header.as_mut(),
		section.first_header.as_mut(),
		section.even_header.as_mut(),
	];
	for (_, header) in headers.into_iter().flatten() {
		for child in &mut header.children {
			match child {
				HeaderChild::Paragraph(paragraph) => escape_paragraph(paragraph),
				HeaderChild::Table(table) => escape_table(table),
				_ => {}
			}
		}
	}

	let footers = [
		section.footer.as_mut(),
		section.first_footer.as_mut(),
		section.even_footer.as_mut(),
	];
	for (_, footer) in footers.into_iter().flatten() {
		for child in &mut footer.children {
			match child {
				FooterChild::Paragraph(paragraph) => escape_paragraph(paragraph),
				FooterChild::Table(table) => escape_table(table),
				_ => {}
			}
		}
	}
}

fn escape_table(table: &mut Table) {
	for row in &mut table.rows {
		let TableChild::TableRow(row) = row;
		for cell in &mut row.cells {
			let TableRowChild::TableCell(cell) = cell;
			for content in &mut cell.children {
				match content {
					TableCellContent::Paragraph(paragraph) => escape_paragraph(paragraph),
					TableCellContent::Table(table) => escape_table(table),
					_ => {}
				}
			}
		}
	}
}

fn escape_paragraph(paragraph: &mut Paragraph) {
	escape_children(&mut paragraph.children);
}

fn escape_children(children: &mut [ParagraphChild]) {
	for child in children {
		match child {
			ParagraphChild::Run(run) => {
				for run_child in &mut run.children {
					if let RunChild::Text(text) = run_child {
						let escaped = escape(text.text.as_str()).into_owned();
						text.text = escaped;
					}
				}
			}
			ParagraphChild::Hyperlink(link) => escape_children(&mut link.children),
			_ => {}
		}
	}
}

fn paragraph_text(paragraph: &Paragraph) -> String {
	let mut text = String::new();
	push_children_text(&mut text, &paragraph.children);
	text
}

fn push_children_text(buffer: &mut String, children: &[ParagraphChild]) {
	for child in children {
		match child {
			ParagraphChild::Run(run) => push_run_text(buffer, run),
			ParagraphChild::Hyperlink(link) => push_children_text(buffer, &link.children),
			_ => {}
		}
	}
}

fn push_run_text(buffer: &mut String, run: &Run) {
	for child in &run.children {
		if let RunChild::Text(text) = child {
			let plain = unescape(&text.text).unwrap_or(Cow::Borrowed(text.text.as_str()));
			buffer.push_str(&plain);
		}
	}
}

/// Remove every run from `paragraph`, including runs inside hyperlinks, and
/// append `run`. Other children such as bookmarks are kept.
fn replace_runs(paragraph: &mut Paragraph, run: Run) {
	paragraph.children.retain(|child| {
		!matches!(
			child,
			ParagraphChild::Run(_) | ParagraphChild::Hyperlink(_)
		)
	});
	let stripped = std::mem::replace(paragraph, Paragraph::new());
	*paragraph = stripped.add_run(run);
}

impl TemplateParagraph for Paragraph {
	fn text(&self) -> String {
		paragraph_text(self)
	}

	fn replace_runs_with_text(&mut self, text: &str) {
		replace_runs(self, Run::new().add_text(text));
	}

	fn replace_runs_with_image(&mut self, image: &LogoImage) -> MergeResult<()> {
		let data: Cow<'_, [u8]> = match image.format() {
			ImageFormat::Png | ImageFormat::Jpeg => Cow::Borrowed(image.bytes()),
			_ => Cow::Owned(image.to_png()?),
		};
		let pic = Pic::new(&data).size(image.width_emu(), image.height_emu());
		replace_runs(self, Run::new().add_image(pic));

		Ok(())
	}
}

impl TemplateCell for TableCell {
	fn text(&self) -> String {
		self.children
			.iter()
			.filter_map(|content| {
				match content {
					TableCellContent::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
					_ => None,
				}
			})
			.collect::<Vec<_>>()
			.join("\n")
	}

	fn set_text(&mut self, text: &str) {
		let mut seen_paragraph = false;
		self.children.retain(|content| {
			if !matches!(content, TableCellContent::Paragraph(_)) {
				return true;
			}
			let keep = !seen_paragraph;
			seen_paragraph = true;
			keep
		});

		let first = self.children.iter_mut().find_map(|content| {
			match content {
				TableCellContent::Paragraph(paragraph) => Some(paragraph),
				_ => None,
			}
		});

		if let Some(paragraph) = first {
			replace_runs(paragraph, Run::new().add_text(text));
		} else {
			let cell = std::mem::replace(self, TableCell::new());
			*self = cell.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
		}
	}
}
