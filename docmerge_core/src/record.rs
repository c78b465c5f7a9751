use std::fmt;
use std::path::Path;

use chrono::DateTime;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Deserializer;

use crate::MergeError;
use crate::MergeResult;

/// Output format shared by `<birthday>` and `<date>`: `YYYY.MM.DD.` with
/// the trailing period.
pub const DATE_FORMAT: &str = "%Y.%m.%d.";

/// Number of generic `<dataN>` entries in the data section.
pub const DATA_ENTRY_COUNT: usize = 4;

/// The structured data merged into a template.
///
/// The serialized tag names are fixed by the serde attributes below, so the
/// same mapping applies to every supported format:
///
/// ```xml
/// <root>
///   <customer_details>
///     <name>Jane Doe</name>
///     <birthday>1990-04-12T00:00:00</birthday>
///     <birthplace>Springfield</birthplace>
///     <customer_type>2</customer_type>
///     <address_data>
///       <postal_code>1234</postal_code>
///       <city>Springfield</city>
///       <street_address>Main Street 1</street_address>
///     </address_data>
///   </customer_details>
///   <document_data>
///     <data_section1>
///       <data>A</data><data>B</data><data>C</data><data>D</data>
///     </data_section1>
///     <table>
///       <row-data><value1>x</value1><value2>y</value2></row-data>
///     </table>
///   </document_data>
/// </root>
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataRecord {
	#[serde(rename = "customer_details")]
	pub customer: CustomerDetails,
	#[serde(rename = "document_data")]
	pub document: DocumentData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerDetails {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub birthday: Birthday,
	#[serde(default)]
	pub birthplace: String,
	/// Raw order status code. Validated when `<order_status>` is resolved,
	/// not when the record is loaded.
	pub customer_type: i64,
	#[serde(rename = "address_data", default)]
	pub address: AddressData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressData {
	#[serde(default)]
	pub postal_code: u32,
	#[serde(default)]
	pub city: String,
	#[serde(rename = "street_address", default)]
	pub street: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentData {
	#[serde(rename = "data_section1")]
	pub data_section: DataSection,
	#[serde(rename = "table", default)]
	pub table: TableSection,
}

/// The generic `<data>` entries. Element `0` backs `<data1>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDataSection")]
pub struct DataSection {
	pub data: [String; DATA_ENTRY_COUNT],
}

#[derive(Deserialize)]
struct RawDataSection {
	#[serde(default)]
	data: Vec<String>,
}

impl TryFrom<RawDataSection> for DataSection {
	type Error = MergeError;

	fn try_from(raw: RawDataSection) -> Result<Self, Self::Error> {
		let found = raw.data.len();
		let data = <[String; DATA_ENTRY_COUNT]>::try_from(raw.data).map_err(|_| {
			MergeError::InvalidDataSection {
				expected: DATA_ENTRY_COUNT,
				found,
			}
		})?;

		Ok(Self { data })
	}
}

/// Row data driving the positional table merge. Row `i` of a template table
/// (1-based, the header row is `0`) reads `rows[i - 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableSection {
	#[serde(rename = "row-data", default)]
	pub rows: Vec<RowData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RowData {
	#[serde(default)]
	pub value1: String,
	#[serde(default)]
	pub value2: String,
}

impl RowData {
	pub fn new(value1: impl Into<String>, value2: impl Into<String>) -> Self {
		Self {
			value1: value1.into(),
			value2: value2.into(),
		}
	}

	/// Even columns take `value1`, odd columns take `value2`.
	pub fn value_for_column(&self, column: usize) -> &str {
		if column % 2 == 0 {
			&self.value1
		} else {
			&self.value2
		}
	}
}

/// A birthday formatted at load time.
///
/// ISO-8601 date-times are rewritten to [`DATE_FORMAT`]; anything else is kept
/// verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Birthday(String);

impl Birthday {
	pub fn from_raw(raw: &str) -> Self {
		match parse_iso_date_time(raw) {
			Some(date_time) => Self(date_time.format(DATE_FORMAT).to_string()),
			None => Self(raw.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Birthday {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Birthday {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		Ok(Self::from_raw(&raw))
	}
}

/// Parse an ISO-8601 date-time: `2000-01-31T10:15`, `2000-01-31T10:15:30`,
/// fractional seconds, an optional `Z`/`+01:00` offset and an optional
/// trailing `[Region/Zone]` id. The separator must be an upper-case `T`. The
/// offset is dropped, keeping the local date and time as written.
fn parse_iso_date_time(raw: &str) -> Option<NaiveDateTime> {
	let raw = match raw.find('[') {
		Some(index) if raw.ends_with(']') => &raw[..index],
		_ => raw,
	};

	if let Some(local) = raw.strip_suffix('Z') {
		return parse_local_date_time(local);
	}

	["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"]
		.iter()
		.find_map(|format| DateTime::parse_from_str(raw, format).ok())
		.map(|date_time| date_time.naive_local())
		.or_else(|| parse_local_date_time(raw))
}

fn parse_local_date_time(raw: &str) -> Option<NaiveDateTime> {
	["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
		.iter()
		.find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// The closed set of order states encoded by `customer_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
	NotPlaced,
	Placed,
	Delivered,
}

impl OrderStatus {
	pub const ALL: [Self; 3] = [Self::NotPlaced, Self::Placed, Self::Delivered];

	pub fn id(self) -> i64 {
		match self {
			Self::NotPlaced => 1,
			Self::Placed => 2,
			Self::Delivered => 3,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::NotPlaced => "not placed",
			Self::Placed => "placed",
			Self::Delivered => "delivered",
		}
	}
}

impl TryFrom<i64> for OrderStatus {
	type Error = MergeError;

	fn try_from(id: i64) -> Result<Self, Self::Error> {
		Self::ALL
			.into_iter()
			.find(|status| status.id() == id)
			.ok_or(MergeError::UnknownStatusCode(id))
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl DataRecord {
	/// Read and parse a data file, picking the format from its extension.
	pub fn load(path: &Path) -> MergeResult<Self> {
		let path_display = path.display().to_string();
		let content = std::fs::read_to_string(path).map_err(|e| {
			MergeError::DataFile {
				path: path_display.clone(),
				reason: e.to_string(),
			}
		})?;
		let format = path
			.extension()
			.and_then(|e| e.to_str())
			.unwrap_or("")
			.to_ascii_lowercase();

		let record = Self::parse(&content, &format, &path_display)?;
		tracing::debug!(
			path = %path_display,
			rows = record.document.table.rows.len(),
			"loaded data record"
		);

		Ok(record)
	}

	/// Parse a data record from `content` in the given format.
	pub fn parse(content: &str, format: &str, path_display: &str) -> MergeResult<Self> {
		let data_error = |reason: String| {
			MergeError::DataFile {
				path: path_display.to_string(),
				reason,
			}
		};

		match format {
			"xml" => quick_xml::de::from_str(content).map_err(|e| data_error(e.to_string())),
			"json" => serde_json::from_str(content).map_err(|e| data_error(e.to_string())),
			"toml" => toml::from_str(content).map_err(|e| data_error(e.to_string())),
			"yaml" | "yml" => {
				serde_yaml_ng::from_str(content).map_err(|e| data_error(e.to_string()))
			}
			other => Err(MergeError::UnsupportedDataFormat(other.to_string())),
		}
	}

	pub fn order_status(&self) -> MergeResult<OrderStatus> {
		OrderStatus::try_from(self.customer.customer_type)
	}

	/// Entry `index` (0-based) of the generic data section.
	pub fn data_entry(&self, index: usize) -> Option<&str> {
		self.document
			.data_section
			.data
			.get(index)
			.map(String::as_str)
	}

	pub fn rows(&self) -> &[RowData] {
		&self.document.table.rows
	}
}
