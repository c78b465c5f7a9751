#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

use assert_cmd::Command;
use docx_rs::Docx;
use docx_rs::Header;
use docx_rs::Paragraph;
use docx_rs::Run;
use docx_rs::Table;
use docx_rs::TableCell;
use docx_rs::TableRow;
use image::DynamicImage;
use image::ImageFormat;
use image::Rgba;
use image::RgbaImage;

pub const RAW_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
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
			<row-data><value1>x1</value1><value2>y1</value2></row-data>
			<row-data><value1>x2</value1><value2>y2</value2></row-data>
		</table>
	</document_data>
</root>
"#;

pub fn docmerge_cmd() -> Command {
	let mut cmd = Command::new(env!("CARGO_BIN_EXE_docmerge"));
	cmd.env("NO_COLOR", "1").env_remove("DOCMERGE_LOG");
	cmd
}

fn text_paragraph(text: &str) -> Paragraph {
	Paragraph::new().add_run(Run::new().add_text(text))
}

fn text_cell(text: &str) -> TableCell {
	TableCell::new().add_paragraph(text_paragraph(text))
}

/// A template with body placeholders, a table with `data_rows` placeholder
/// rows and a logo marker in the header.
pub fn template(data_rows: usize) -> Vec<u8> {
	let mut rows = vec![TableRow::new(vec![text_cell("Item"), text_cell("Amount")])];
	for _ in 0..data_rows {
		rows.push(TableRow::new(vec![
			text_cell("<value1>"),
			text_cell("<value2>"),
		]));
	}

	let docx = Docx::new()
		.header(Header::new().add_paragraph(text_paragraph("[logo]")))
		.add_paragraph(text_paragraph("Hello <name>, welcome back"))
		.add_paragraph(text_paragraph("Status: <order_status>"))
		.add_paragraph(text_paragraph("Data: <data2>"))
		.add_table(Table::new(rows));

	let mut buffer = Vec::new();
	docx.build()
		.pack(&mut Cursor::new(&mut buffer))
		.expect("template packs");
	buffer
}

pub fn logo_png() -> Vec<u8> {
	let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 255])));
	let mut buffer = Vec::new();
	image
		.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
		.expect("logo encodes");
	buffer
}

/// Lay out `resources/` under `root` with the given data file and template.
pub fn write_resources(root: &Path, data_xml: &str, data_rows: usize) {
	let resources = root.join("resources");
	std::fs::create_dir_all(&resources).expect("resources dir");
	std::fs::write(resources.join("raw.xml"), data_xml).expect("raw.xml");
	std::fs::write(resources.join("raw.docx"), template(data_rows)).expect("raw.docx");
	std::fs::write(resources.join("logo.png"), logo_png()).expect("logo.png");
}

/// Concatenated run text of every top-level paragraph of a `.docx` file.
pub fn body_texts(path: &Path) -> Vec<String> {
	let bytes = std::fs::read(path).expect("output exists");
	let docx = docx_rs::read_docx(&bytes).expect("output is a docx");

	docx.document
		.children
		.iter()
		.filter_map(|child| {
			match child {
				docx_rs::DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
				_ => None,
			}
		})
		.collect()
}

fn paragraph_text(paragraph: &Paragraph) -> String {
	let mut text = String::new();
	for child in &paragraph.children {
		if let docx_rs::ParagraphChild::Run(run) = child {
			for run_child in &run.children {
				if let docx_rs::RunChild::Text(t) = run_child {
					text.push_str(&t.text);
				}
			}
		}
	}
	text
}
