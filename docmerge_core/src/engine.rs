use crate::Clock;
use crate::DataRecord;
use crate::LogoImage;
use crate::MergeError;
use crate::MergeResult;
use crate::document::TemplateCell;
use crate::document::TemplateDocument;
use crate::document::TemplateParagraph;
use crate::pattern::contains_placeholder;
use crate::pattern::first_placeholder;
use crate::pattern::replace_placeholders;
use crate::resolver::resolve;

/// Counts of the items rewritten by a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
	/// Body paragraphs rewritten by the paragraph pass.
	pub paragraphs: usize,
	/// Table cells rewritten by the table pass.
	pub cells: usize,
	/// Header paragraphs replaced by the logo.
	pub logos: usize,
}

impl MergeReport {
	/// Returns true if nothing in the document matched.
	pub fn is_empty(&self) -> bool {
		self.paragraphs == 0 && self.cells == 0 && self.logos == 0
	}
}

/// Replace the placeholders of every body paragraph.
///
/// Only the first placeholder key of a paragraph is resolved. Every
/// placeholder span in that paragraph receives the same value, so
/// `"<name> <date>"` becomes `"Jane Jane"`. A rewritten paragraph holds one
/// run with the substituted text.
pub fn merge_paragraphs<D: TemplateDocument>(
	document: &mut D,
	record: &DataRecord,
	clock: &dyn Clock,
) -> MergeResult<usize> {
	let mut rewritten = 0;

	for paragraph in document.body_paragraphs_mut() {
		let text = paragraph.text();
		let Some(key) = first_placeholder(&text) else {
			continue;
		};

		let value = resolve(key, record, clock)?;
		let merged = replace_placeholders(&text, &value);
		tracing::debug!(key, text = %merged, "merged paragraph");
		paragraph.replace_runs_with_text(&merged);
		rewritten += 1;
	}

	tracing::info!(rewritten, "paragraph pass complete");
	Ok(rewritten)
}

/// Fill the data rows of every table from the record's row data.
///
/// Rows after the header row map to row data by position: table row `i`
/// reads `rows[i - 1]`. Within a row, placeholder cells in even columns take
/// `value1` and odd columns take `value2`. The placeholder key itself is
/// ignored.
pub fn merge_tables<D: TemplateDocument>(
	document: &mut D,
	record: &DataRecord,
) -> MergeResult<usize> {
	let rows = record.rows();
	let mut rewritten = 0;

	for (table_index, table) in document.tables_mut().into_iter().enumerate() {
		for (row_index, cells) in table.into_iter().enumerate().skip(1) {
			for (column, cell) in cells.into_iter().enumerate() {
				let text = cell.text();
				if !contains_placeholder(&text) {
					continue;
				}

				let row_data =
					rows.get(row_index - 1)
						.ok_or_else(|| MergeError::RowIndexOutOfRange {
							table: table_index,
							row: row_index,
							available: rows.len(),
						})?;
				let merged = replace_placeholders(&text, row_data.value_for_column(column));
				tracing::debug!(
					table = table_index,
					row = row_index,
					column,
					text = %merged,
					"merged table cell"
				);
				cell.set_text(&merged);
				rewritten += 1;
			}
		}
	}

	tracing::info!(rewritten, "table pass complete");
	Ok(rewritten)
}

/// Replace every header paragraph containing `marker` with `logo`.
///
/// Matching is plain substring containment.
pub fn merge_logo<D: TemplateDocument>(
	document: &mut D,
	logo: &LogoImage,
	marker: &str,
) -> MergeResult<usize> {
	let mut rewritten = 0;

	for paragraph in document.header_paragraphs_mut() {
		if !paragraph.text().contains(marker) {
			continue;
		}

		paragraph.replace_runs_with_image(logo)?;
		tracing::debug!(marker, width = logo.width_px(), height = logo.height_px(), "embedded logo");
		rewritten += 1;
	}

	tracing::info!(rewritten, "logo pass complete");
	Ok(rewritten)
}

/// Run the paragraph, table and logo passes in that order.
///
/// The first failing pass aborts the merge and leaves `document` partially
/// merged. Callers must not persist it in that case.
pub fn merge_document<D: TemplateDocument>(
	document: &mut D,
	record: &DataRecord,
	logo: &LogoImage,
	marker: &str,
	clock: &dyn Clock,
) -> MergeResult<MergeReport> {
	let paragraphs = merge_paragraphs(document, record, clock)?;
	let cells = merge_tables(document, record)?;
	let logos = merge_logo(document, logo, marker)?;

	Ok(MergeReport {
		paragraphs,
		cells,
		logos,
	})
}
