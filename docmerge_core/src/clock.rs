use chrono::Local;
use chrono::NaiveDate;

/// Source of the current calendar date for the `<date>` placeholder.
pub trait Clock {
	fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn today(&self) -> NaiveDate {
		Local::now().date_naive()
	}
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
	fn today(&self) -> NaiveDate {
		self.0
	}
}
