//! Typed form field values

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::query::QueryValue;

/// A single typed form field value.
///
/// The variant is decided by the field's static configuration, never by
/// inspecting the value at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
	/// Plain string value
	Text(String),
	/// Checkbox-style boolean
	Bool(bool),
	/// Numeric value
	Number(f64),
	/// Point in time
	Date(DateTime<Utc>),
	/// Multi-valued field
	List(Vec<FieldValue>),
}

impl FieldValue {
	/// Creates a text value.
	pub fn text(value: impl Into<String>) -> Self {
		Self::Text(value.into())
	}

	/// Returns `true` for the values that mean "nothing selected":
	/// `false`, the empty string and a list holding nothing else.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_types::FieldValue;
	///
	/// assert!(FieldValue::Bool(false).is_empty_sentinel());
	/// assert!(FieldValue::text("").is_empty_sentinel());
	/// assert!(FieldValue::List(vec![FieldValue::Bool(false)]).is_empty_sentinel());
	/// assert!(!FieldValue::Number(0.0).is_empty_sentinel());
	/// ```
	pub fn is_empty_sentinel(&self) -> bool {
		match self {
			Self::Bool(b) => !b,
			Self::Text(s) => s.is_empty(),
			Self::List(items) => items.iter().all(Self::is_empty_sentinel),
			Self::Number(_) | Self::Date(_) => false,
		}
	}

	/// Returns the text content if this is a text value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the boolean if this is a boolean value.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Returns the number if this is a numeric value.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the timestamp if this is a date value.
	pub fn as_date(&self) -> Option<&DateTime<Utc>> {
		match self {
			Self::Date(d) => Some(d),
			_ => None,
		}
	}

	/// Converts this value into its query string representation.
	///
	/// Scalars become a single string, lists become one string per
	/// element. Nested lists are flattened and empty sentinel elements
	/// are skipped.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_types::{FieldValue, QueryValue};
	///
	/// assert_eq!(FieldValue::Number(30.0).to_query_value(), QueryValue::from("30"));
	/// assert_eq!(
	///     FieldValue::List(vec!["a".into(), "b".into()]).to_query_value(),
	///     QueryValue::Many(vec!["a".to_string(), "b".to_string()])
	/// );
	/// ```
	pub fn to_query_value(&self) -> QueryValue {
		match self {
			Self::List(items) => {
				let mut flat = Vec::with_capacity(items.len());
				collect_scalars(items, &mut flat);
				QueryValue::Many(flat)
			}
			scalar => QueryValue::One(scalar.to_string()),
		}
	}
}

fn collect_scalars(items: &[FieldValue], out: &mut Vec<String>) {
	for item in items {
		match item {
			FieldValue::List(nested) => collect_scalars(nested, out),
			scalar if scalar.is_empty_sentinel() => {}
			scalar => out.push(scalar.to_string()),
		}
	}
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(s) => f.write_str(s),
			Self::Bool(b) => write!(f, "{}", b),
			Self::Number(n) => write!(f, "{}", n),
			Self::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
			Self::List(items) => {
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(",")?;
					}
					write!(f, "{}", item)?;
				}
				Ok(())
			}
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for FieldValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i64> for FieldValue {
	fn from(value: i64) -> Self {
		Self::Number(value as f64)
	}
}

impl From<i32> for FieldValue {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<DateTime<Utc>> for FieldValue {
	fn from(value: DateTime<Utc>) -> Self {
		Self::Date(value)
	}
}

impl From<Vec<FieldValue>> for FieldValue {
	fn from(value: Vec<FieldValue>) -> Self {
		Self::List(value)
	}
}

/// Field name → value mapping as held by a form controller.
///
/// A `None` entry is a registered field that currently has no value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
	fields: BTreeMap<String, Option<FieldValue>>,
}

impl FormValues {
	/// Creates an empty value set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert of a present value.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
		self.fields.insert(name.into(), Some(value.into()));
		self
	}

	/// Builder-style insert of a field without a value.
	pub fn with_empty(mut self, name: impl Into<String>) -> Self {
		self.fields.insert(name.into(), None);
		self
	}

	/// Inserts or replaces a field, returning the previous entry.
	pub fn insert(
		&mut self,
		name: impl Into<String>,
		value: Option<FieldValue>,
	) -> Option<Option<FieldValue>> {
		self.fields.insert(name.into(), value)
	}

	/// Removes a field entirely.
	pub fn remove(&mut self, name: &str) -> Option<Option<FieldValue>> {
		self.fields.remove(name)
	}

	/// Returns the value of a field, `None` if unknown or without value.
	pub fn get(&self, name: &str) -> Option<&FieldValue> {
		self.fields.get(name).and_then(Option::as_ref)
	}

	/// Returns the raw entry of a field, distinguishing unknown fields
	/// (`None`) from fields without value (`Some(None)`).
	pub fn entry(&self, name: &str) -> Option<&Option<FieldValue>> {
		self.fields.get(name)
	}

	/// Returns whether the field is known.
	pub fn contains_key(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	/// Iterates over field names.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.fields.keys().map(String::as_str)
	}

	/// Iterates over all entries.
	pub fn iter(&self) -> btree_map::Iter<'_, String, Option<FieldValue>> {
		self.fields.iter()
	}

	/// Overwrites entries with those of `other`.
	pub fn merge(&mut self, other: FormValues) {
		self.fields.extend(other.fields);
	}

	/// Returns the number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns whether there are no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl FromIterator<(String, Option<FieldValue>)> for FormValues {
	fn from_iter<I: IntoIterator<Item = (String, Option<FieldValue>)>>(iter: I) -> Self {
		Self {
			fields: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for FormValues {
	type Item = (String, Option<FieldValue>);
	type IntoIter = btree_map::IntoIter<String, Option<FieldValue>>;

	fn into_iter(self) -> Self::IntoIter {
		self.fields.into_iter()
	}
}

impl<'a> IntoIterator for &'a FormValues {
	type Item = (&'a String, &'a Option<FieldValue>);
	type IntoIter = btree_map::Iter<'a, String, Option<FieldValue>>;

	fn into_iter(self) -> Self::IntoIter {
		self.fields.iter()
	}
}
