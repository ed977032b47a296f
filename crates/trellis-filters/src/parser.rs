//! Query parameter → form value coercion
//!
//! URL values are always strings. Each key is coerced according to its
//! declared [`FieldKind`]; undeclared keys fall back to the global
//! [`ParseOptions`] flags. A value that does not parse passes through as
//! text, so parsing never fails.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use trellis_types::{FieldValue, FormValues, QueryParams, QueryValue};

/// Coercion applied to a field's URL value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	/// Raw string passthrough
	Text,
	/// `"true"` / `"false"`
	Boolean,
	/// Finite decimal number
	Number,
	/// ISO-8601 date or millisecond timestamp
	Date,
}

/// Per-field coercion declarations, fixed at form-definition time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldConfig {
	kinds: BTreeMap<String, FieldKind>,
}

impl FieldConfig {
	/// Creates a configuration with no declarations.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a field (builder style).
	pub fn with(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
		self.kinds.insert(name.into(), kind);
		self
	}

	/// Declared kind of a field.
	pub fn kind(&self, name: &str) -> Option<FieldKind> {
		self.kinds.get(name).copied()
	}

	/// Iterates over declarations.
	pub fn iter(&self) -> impl Iterator<Item = (&str, FieldKind)> {
		self.kinds.iter().map(|(k, v)| (k.as_str(), *v))
	}
}

/// Global coercion flags for undeclared keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
	/// Coerce `"true"` / `"false"` (default: enabled)
	pub parse_boolean: bool,
	/// Coerce dates (default: disabled)
	pub parse_dates: bool,
	/// Coerce numbers (default: disabled)
	pub parse_numbers: bool,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self {
			parse_boolean: true,
			parse_dates: false,
			parse_numbers: false,
		}
	}
}

impl ParseOptions {
	/// All flags disabled.
	pub fn none() -> Self {
		Self {
			parse_boolean: false,
			parse_dates: false,
			parse_numbers: false,
		}
	}

	/// Sets the boolean flag.
	pub fn with_parse_boolean(mut self, enabled: bool) -> Self {
		self.parse_boolean = enabled;
		self
	}

	/// Sets the date flag.
	pub fn with_parse_dates(mut self, enabled: bool) -> Self {
		self.parse_dates = enabled;
		self
	}

	/// Sets the number flag.
	pub fn with_parse_numbers(mut self, enabled: bool) -> Self {
		self.parse_numbers = enabled;
		self
	}
}

/// Coerces URL parameters into typed form values.
///
/// Keys absent from `filters` are absent from the result.
///
/// # Example
///
/// ```
/// use trellis_filters::{FieldConfig, FieldKind, ParseOptions, parse_filters};
/// use trellis_types::{FieldValue, QueryParams};
///
/// let params = QueryParams::from_pairs([("active", "true"), ("age", "30"), ("q", "ann")]);
/// let config = FieldConfig::new().with("age", FieldKind::Number);
///
/// let values = parse_filters(&params, &config, &ParseOptions::default());
///
/// assert_eq!(values.get("active"), Some(&FieldValue::Bool(true)));
/// assert_eq!(values.get("age"), Some(&FieldValue::Number(30.0)));
/// assert_eq!(values.get("q"), Some(&FieldValue::text("ann")));
/// ```
pub fn parse_filters(
	filters: &QueryParams,
	config: &FieldConfig,
	options: &ParseOptions,
) -> FormValues {
	filters
		.iter()
		.map(|(key, value)| {
			let declared = config.kind(key);
			let coerced = match value {
				QueryValue::One(raw) => coerce(raw, declared, options),
				QueryValue::Many(raws) => FieldValue::List(
					raws.iter()
						.map(|raw| coerce(raw, declared, options))
						.collect(),
				),
			};
			(key.clone(), Some(coerced))
		})
		.collect()
}

fn coerce(raw: &str, declared: Option<FieldKind>, options: &ParseOptions) -> FieldValue {
	let parsed = match declared {
		Some(FieldKind::Text) => None,
		Some(FieldKind::Boolean) => parse_bool(raw).map(FieldValue::Bool),
		Some(FieldKind::Number) => parse_number(raw).map(FieldValue::Number),
		Some(FieldKind::Date) => parse_date(raw).map(FieldValue::Date),
		None => infer(raw, options),
	};

	parsed.unwrap_or_else(|| {
		if declared.is_some_and(|kind| kind != FieldKind::Text) {
			tracing::trace!(raw, ?declared, "value did not parse, passing through");
		}
		FieldValue::text(raw)
	})
}

fn infer(raw: &str, options: &ParseOptions) -> Option<FieldValue> {
	if options.parse_boolean
		&& let Some(b) = parse_bool(raw)
	{
		return Some(FieldValue::Bool(b));
	}
	if options.parse_numbers
		&& let Some(n) = parse_number(raw)
	{
		return Some(FieldValue::Number(n));
	}
	if options.parse_dates
		&& let Some(d) = parse_date(raw)
	{
		return Some(FieldValue::Date(d));
	}
	None
}

/// Parses `"true"` / `"false"`, case-sensitively.
pub fn parse_bool(raw: &str) -> Option<bool> {
	match raw {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}

/// Parses a finite decimal number. Empty input, `NaN` and infinities fail.
pub fn parse_number(raw: &str) -> Option<f64> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return None;
	}
	trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%dT%H:%M",
	"%Y-%m-%d %H:%M:%S%.f",
];

/// Parses an ISO-8601 date-time, date, or millisecond timestamp.
///
/// Date-times without an offset and bare dates are taken as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
	let raw = raw.trim();
	if raw.is_empty() {
		return None;
	}

	if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
		return Some(dt.with_timezone(&Utc));
	}

	for format in NAIVE_DATETIME_FORMATS {
		if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
			return Some(naive.and_utc());
		}
	}

	if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
		return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
	}

	raw.parse::<i64>()
		.ok()
		.and_then(DateTime::from_timestamp_millis)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use rstest::rstest;

	fn single(raw: &str, declared: Option<FieldKind>, options: ParseOptions) -> FieldValue {
		let params = QueryParams::from_pairs([("k", raw)]);
		let config = match declared {
			Some(kind) => FieldConfig::new().with("k", kind),
			None => FieldConfig::new(),
		};
		parse_filters(&params, &config, &options)
			.get("k")
			.cloned()
			.unwrap()
	}

	#[rstest]
	#[case("true", FieldValue::Bool(true))]
	#[case("false", FieldValue::Bool(false))]
	#[case("True", FieldValue::text("True"))]
	#[case("yes", FieldValue::text("yes"))]
	#[case("", FieldValue::text(""))]
	fn test_boolean_field(#[case] raw: &str, #[case] expected: FieldValue) {
		let value = single(raw, Some(FieldKind::Boolean), ParseOptions::none());

		assert_eq!(value, expected);
	}

	#[rstest]
	#[case("30", FieldValue::Number(30.0))]
	#[case("-1.5", FieldValue::Number(-1.5))]
	#[case("1e3", FieldValue::Number(1000.0))]
	#[case("abc", FieldValue::text("abc"))]
	#[case("", FieldValue::text(""))]
	#[case("NaN", FieldValue::text("NaN"))]
	#[case("inf", FieldValue::text("inf"))]
	fn test_number_field(#[case] raw: &str, #[case] expected: FieldValue) {
		let value = single(raw, Some(FieldKind::Number), ParseOptions::none());

		assert_eq!(value, expected);
	}

	#[rstest]
	#[case("2024-03-01T10:30:00Z", Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap())]
	#[case("2024-03-01T12:30:00+02:00", Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap())]
	#[case("2024-03-01T10:30:00", Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap())]
	#[case("2024-03-01", Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())]
	#[case("1709289000000", Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap())]
	fn test_date_field(#[case] raw: &str, #[case] expected: DateTime<Utc>) {
		let value = single(raw, Some(FieldKind::Date), ParseOptions::none());

		assert_eq!(value, FieldValue::Date(expected));
	}

	#[rstest]
	fn test_invalid_date_passes_through() {
		let value = single("next tuesday", Some(FieldKind::Date), ParseOptions::none());

		assert_eq!(value, FieldValue::text("next tuesday"));
	}

	#[rstest]
	fn test_declared_text_wins_over_flags() {
		let options = ParseOptions::default().with_parse_numbers(true);

		assert_eq!(
			single("true", Some(FieldKind::Text), options),
			FieldValue::text("true")
		);
		assert_eq!(
			single("42", Some(FieldKind::Text), options),
			FieldValue::text("42")
		);
	}

	#[rstest]
	#[case(ParseOptions::default(), "true", FieldValue::Bool(true))]
	#[case(ParseOptions::default(), "42", FieldValue::text("42"))]
	#[case(ParseOptions::none(), "true", FieldValue::text("true"))]
	#[case(ParseOptions::none().with_parse_numbers(true), "42", FieldValue::Number(42.0))]
	#[case(
		ParseOptions::none().with_parse_dates(true),
		"2024-03-01",
		FieldValue::Date(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
	)]
	// Numbers are tried before dates
	#[case(
		ParseOptions::none().with_parse_numbers(true).with_parse_dates(true),
		"1709289000000",
		FieldValue::Number(1_709_289_000_000.0)
	)]
	fn test_undeclared_uses_flags(
		#[case] options: ParseOptions,
		#[case] raw: &str,
		#[case] expected: FieldValue,
	) {
		assert_eq!(single(raw, None, options), expected);
	}

	#[rstest]
	fn test_multi_valued_keys_become_lists() {
		let mut params = QueryParams::new();
		params.append("ids", "1");
		params.append("ids", "x");
		let config = FieldConfig::new().with("ids", FieldKind::Number);

		let values = parse_filters(&params, &config, &ParseOptions::default());

		assert_eq!(
			values.get("ids"),
			Some(&FieldValue::List(vec![
				FieldValue::Number(1.0),
				FieldValue::text("x"),
			]))
		);
	}

	#[rstest]
	fn test_absent_keys_stay_absent() {
		let params = QueryParams::from_pairs([("a", "1")]);
		let config = FieldConfig::new().with("b", FieldKind::Number);

		let values = parse_filters(&params, &config, &ParseOptions::default());

		assert_eq!(values.len(), 1);
		assert!(!values.contains_key("b"));
	}

	#[rstest]
	fn test_field_config_deserializes() {
		let config: FieldConfig =
			serde_json::from_str(r#"{"active": "boolean", "from": "date"}"#).unwrap();

		assert_eq!(config.kind("active"), Some(FieldKind::Boolean));
		assert_eq!(config.kind("from"), Some(FieldKind::Date));
		assert_eq!(config.kind("q"), None);
	}
}
