use std::fmt;

use crate::Clock;
use crate::DataRecord;
use crate::MergeResult;
use crate::record::DATE_FORMAT;

/// Value substituted for placeholder keys outside the known vocabulary.
pub const UNKNOWN_VALUE: &str = "Unknown";

/// A placeholder key as written between `<` and `>` in a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Placeholder {
	/// `<name>`: the customer name.
	Name,
	/// `<data1>`..`<data4>`: a generic data entry. Holds the 1-based number.
	Data(usize),
	/// `<birthplace>`: the customer birthplace.
	Birthplace,
	/// `<birthday>`: the customer birthday, formatted at load time.
	Birthday,
	/// `<date>`: today's date as `YYYY.MM.DD.`.
	Date,
	/// `<order_status>`: the name of the customer's order status.
	OrderStatus,
	/// Any other key. Resolves to [`UNKNOWN_VALUE`].
	Unknown(String),
}

impl From<&str> for Placeholder {
	fn from(key: &str) -> Self {
		match key {
			"name" => Self::Name,
			"birthplace" => Self::Birthplace,
			"birthday" => Self::Birthday,
			"date" => Self::Date,
			"order_status" => Self::OrderStatus,
			"data1" => Self::Data(1),
			"data2" => Self::Data(2),
			"data3" => Self::Data(3),
			"data4" => Self::Data(4),
			_ => Self::Unknown(key.to_string()),
		}
	}
}

impl fmt::Display for Placeholder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Name => write!(f, "name"),
			Self::Data(n) => write!(f, "data{n}"),
			Self::Birthplace => write!(f, "birthplace"),
			Self::Birthday => write!(f, "birthday"),
			Self::Date => write!(f, "date"),
			Self::OrderStatus => write!(f, "order_status"),
			Self::Unknown(key) => write!(f, "{key}"),
		}
	}
}

impl Placeholder {
	/// Resolve this placeholder against `record`.
	///
	/// Only `<order_status>` can fail, with
	/// [`MergeError::UnknownStatusCode`](crate::MergeError::UnknownStatusCode).
	/// Unknown keys are not an error.
	pub fn resolve(&self, record: &DataRecord, clock: &dyn Clock) -> MergeResult<String> {
		let value = match self {
			Self::Name => record.customer.name.clone(),
			Self::Data(n) => {
				n.checked_sub(1)
					.and_then(|index| record.data_entry(index))
					.map_or_else(|| UNKNOWN_VALUE.to_string(), str::to_string)
			}
			Self::Birthplace => record.customer.birthplace.clone(),
			Self::Birthday => record.customer.birthday.as_str().to_string(),
			Self::Date => clock.today().format(DATE_FORMAT).to_string(),
			Self::OrderStatus => record.order_status()?.name().to_string(),
			Self::Unknown(key) => {
				tracing::warn!(key = %key, "unknown placeholder key");
				UNKNOWN_VALUE.to_string()
			}
		};

		Ok(value)
	}
}

/// Resolve a raw placeholder key against `record`.
pub fn resolve(key: &str, record: &DataRecord, clock: &dyn Clock) -> MergeResult<String> {
	Placeholder::from(key).resolve(record, clock)
}
