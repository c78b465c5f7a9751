use std::sync::LazyLock;

use regex::NoExpand;
use regex::Regex;

/// Placeholder token grammar: `<` + any characters (non-greedy) + `>`. The
/// inner text is the placeholder key.
pub const PLACEHOLDER_PATTERN: &str = "<(.*?)>";

/// Marker replaced by the logo image in header paragraphs.
pub const DEFAULT_LOGO_MARKER: &str = "[logo]";

static PLACEHOLDER_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"));

/// Returns the key of the first placeholder in `text`.
pub fn first_placeholder(text: &str) -> Option<&str> {
	PLACEHOLDER_REGEX
		.captures(text)
		.and_then(|captures| captures.get(1))
		.map(|key| key.as_str())
}

pub fn contains_placeholder(text: &str) -> bool {
	PLACEHOLDER_REGEX.is_match(text)
}

/// Replace every placeholder span in `text` with `value`. The value is
/// inserted literally, `$` sequences are not expanded.
pub fn replace_placeholders(text: &str, value: &str) -> String {
	PLACEHOLDER_REGEX
		.replace_all(text, NoExpand(value))
		.into_owned()
}
