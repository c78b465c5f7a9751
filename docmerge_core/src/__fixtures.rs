use std::io::Cursor;
use std::path::Path;

use chrono::NaiveDate;
use docx_rs::Docx;
use docx_rs::Header;
use docx_rs::Paragraph;
use docx_rs::Run;
use docx_rs::Table;
use docx_rs::TableCell;
use docx_rs::TableRow;
use image::DynamicImage;
use image::ImageFormat;
use image::Rgb;
use image::RgbImage;
use image::Rgba;
use image::RgbaImage;

use crate::DataRecord;
use crate::FixedClock;
use crate::LogoImage;
use crate::RowData;
use crate::document::DocxDocument;
use crate::document::MemoryDocument;
use crate::document::MemoryHeader;
use crate::document::MemoryParagraph;
use crate::document::MemoryTable;

pub const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<root>
	<customer_details>
		<name>Jane Doe</name>
		<birthday>1990-04-12T00:00:00</birthday>
		<birthplace>Springfield</birthplace>
		<customer_type>2</customer_type>
		<address_data>
			<postal_code>1234</postal_code>
			<city>Springfield</city>
			<street_address>Main Street 1</street_address>
		</address_data>
	</customer_details>
	<document_data>
		<data_section1>
			<data>A</data>
			<data>B</data>
			<data>C</data>
			<data>D</data>
		</data_section1>
		<table>
			<row-data>
				<value1>x1</value1>
				<value2>y1</value2>
			</row-data>
			<row-data>
				<value1>x2</value1>
				<value2>y2</value2>
			</row-data>
		</table>
	</document_data>
</root>
"#;

pub const SAMPLE_JSON: &str = r#"{
	"customer_details": {
		"name": "Jane Doe",
		"birthday": "1990-04-12T00:00:00",
		"birthplace": "Springfield",
		"customer_type": 2,
		"address_data": {
			"postal_code": 1234,
			"city": "Springfield",
			"street_address": "Main Street 1"
		}
	},
	"document_data": {
		"data_section1": { "data": ["A", "B", "C", "D"] },
		"table": {
			"row-data": [
				{ "value1": "x1", "value2": "y1" },
				{ "value1": "x2", "value2": "y2" }
			]
		}
	}
}
"#;

pub const SAMPLE_TOML: &str = r#"
[customer_details]
name = "Jane Doe"
birthday = "1990-04-12T00:00:00"
birthplace = "Springfield"
customer_type = 2

[customer_details.address_data]
postal_code = 1234
city = "Springfield"
street_address = "Main Street 1"

[document_data.data_section1]
data = ["A", "B", "C", "D"]

[[document_data.table.row-data]]
value1 = "x1"
value2 = "y1"

[[document_data.table.row-data]]
value1 = "x2"
value2 = "y2"
"#;

pub const SAMPLE_YAML: &str = r#"
customer_details:
  name: Jane Doe
  birthday: "1990-04-12T00:00:00"
  birthplace: Springfield
  customer_type: 2
  address_data:
    postal_code: 1234
    city: Springfield
    street_address: Main Street 1
document_data:
  data_section1:
    data: [A, B, C, D]
  table:
    row-data:
      - value1: x1
        value2: y1
      - value1: x2
        value2: y2
"#;

pub fn sample_record() -> DataRecord {
	DataRecord::parse(SAMPLE_XML, "xml", "sample.xml").expect("sample record parses")
}

/// The sample record with a different order status code.
pub fn record_with_status(customer_type: i64) -> DataRecord {
	let mut record = sample_record();
	record.customer.customer_type = customer_type;
	record
}

/// The sample record with the given row data.
pub fn record_with_rows(rows: &[(&str, &str)]) -> DataRecord {
	let mut record = sample_record();
	record.document.table.rows = rows
		.iter()
		.map(|(value1, value2)| RowData::new(*value1, *value2))
		.collect();
	record
}

pub fn fixed_clock() -> FixedClock {
	FixedClock(NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date"))
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
	let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
		width,
		height,
		Rgba([200, 30, 30, 255]),
	));
	encode(&image, ImageFormat::Png)
}

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
	let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 80, 160])));
	encode(&image, ImageFormat::Bmp)
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
	let mut buffer = Vec::new();
	image
		.write_to(&mut Cursor::new(&mut buffer), format)
		.expect("image encodes");
	buffer
}

pub fn logo(width: u32, height: u32) -> LogoImage {
	LogoImage::from_bytes("logo.png", png_bytes(width, height)).expect("logo decodes")
}

/// A template with one paragraph per placeholder family, a 3x2 table with a
/// header row and a header holding the logo marker.
pub fn memory_template() -> MemoryDocument {
	MemoryDocument::new()
		.paragraph(MemoryParagraph::with_text("Order confirmation"))
		.paragraph(MemoryParagraph::from_runs(["Hello <na", "me>", ", welcome back"]))
		.paragraph(MemoryParagraph::with_text("Status: <order_status>"))
		.paragraph(MemoryParagraph::with_text("Issued on <date>"))
		.table(MemoryTable::from_rows([
			["Item", "Amount"],
			["<value1>", "<value2>"],
			["<value1>", "<value2>"],
		]))
		.header(MemoryHeader::new(vec![
			MemoryParagraph::from_runs(["Company ", "[logo]"]),
			MemoryParagraph::with_text("Customer copy"),
		]))
}

fn text_paragraph(text: &str) -> Paragraph {
	Paragraph::new().add_run(Run::new().add_text(text))
}

fn text_cell(text: &str) -> TableCell {
	TableCell::new().add_paragraph(text_paragraph(text))
}

/// A `.docx` equivalent of [`memory_template`].
pub fn docx_template(data_rows: usize) -> Docx {
	let mut rows = vec![TableRow::new(vec![text_cell("Item"), text_cell("Amount")])];
	rows.extend(
		(0..data_rows).map(|_| TableRow::new(vec![text_cell("<value1>"), text_cell("<value2>")])),
	);

	Docx::new()
		.header(Header::new().add_paragraph(text_paragraph("[logo]")))
		.add_paragraph(text_paragraph("Order confirmation"))
		.add_paragraph(
			Paragraph::new()
				.add_run(Run::new().add_text("Hello <na"))
				.add_run(Run::new().add_text("me>"))
				.add_run(Run::new().add_text(", welcome back")),
		)
		.add_paragraph(text_paragraph("Status: <order_status>"))
		.add_paragraph(text_paragraph("Issued on <date>"))
		.add_table(Table::new(rows))
}

/// A template whose untouched body paragraph, table header row and header
/// paragraph hold XML-special characters.
pub fn special_characters_template() -> Docx {
	Docx::new()
		.header(
			Header::new()
				.add_paragraph(text_paragraph("Smith & Sons <Ltd>"))
				.add_paragraph(text_paragraph("[logo]")),
		)
		.add_paragraph(text_paragraph("Terms & conditions apply"))
		.add_paragraph(text_paragraph("Hello <name>, welcome back"))
		.add_paragraph(text_paragraph("Quotes: \"double\" & 'single'"))
		.add_table(Table::new(vec![
			TableRow::new(vec![text_cell("Item & <code>"), text_cell("Price (<EUR>)")]),
			TableRow::new(vec![text_cell("<value1>"), text_cell("<value2>")]),
		]))
}

/// Write the bundled resources of a merge project under `root/resources`.
pub fn write_project(root: &Path, data_xml: &str, data_rows: usize) {
	write_project_with(root, data_xml, docx_template(data_rows));
}

pub fn write_project_with(root: &Path, data_xml: &str, template: Docx) {
	let resources = root.join("resources");
	std::fs::create_dir_all(&resources).expect("resources dir");
	std::fs::write(resources.join("raw.xml"), data_xml).expect("data file");
	std::fs::write(resources.join("logo.png"), png_bytes(4, 2)).expect("logo file");
	DocxDocument::from_docx(template)
		.save(&resources.join("raw.docx"))
		.expect("template file");
}
