//! Query string value model
//!
//! [`QueryParams`] is what a query parameter store reads, [`QueryUpdate`] is
//! what it is asked to write. Applying an update merges it over the current
//! parameters: keys the update does not name are left untouched.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Value of a single query parameter key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
	/// `?key=value`
	One(String),
	/// `?key=a&key=b`
	Many(Vec<String>),
}

impl QueryValue {
	/// Returns the first value.
	pub fn first(&self) -> Option<&str> {
		match self {
			Self::One(v) => Some(v),
			Self::Many(vs) => vs.first().map(String::as_str),
		}
	}

	/// Returns all values in order.
	pub fn values(&self) -> Vec<&str> {
		match self {
			Self::One(v) => vec![v.as_str()],
			Self::Many(vs) => vs.iter().map(String::as_str).collect(),
		}
	}

	/// Appends a value, turning a single value into a list.
	pub fn push(&mut self, value: impl Into<String>) {
		let value = value.into();
		match self {
			Self::One(existing) => {
				let first = std::mem::take(existing);
				*self = Self::Many(vec![first, value]);
			}
			Self::Many(vs) => vs.push(value),
		}
	}
}

impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::One(value.to_string())
	}
}

impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		Self::One(value)
	}
}

impl From<Vec<String>> for QueryValue {
	fn from(value: Vec<String>) -> Self {
		Self::Many(value)
	}
}

/// Current query string as a key → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
	params: BTreeMap<String, QueryValue>,
}

impl QueryParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds parameters from decoded `(key, value)` pairs, folding
	/// repeated keys into [`QueryValue::Many`].
	///
	/// # Examples
	///
	/// ```
	/// use trellis_types::{QueryParams, QueryValue};
	///
	/// let params = QueryParams::from_pairs([("tag", "a"), ("tag", "b"), ("q", "x")]);
	/// assert_eq!(
	///     params.get("tag"),
	///     Some(&QueryValue::Many(vec!["a".to_string(), "b".to_string()]))
	/// );
	/// assert_eq!(params.get_str("q"), Some("x"));
	/// ```
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut params = Self::new();
		for (key, value) in pairs {
			params.append(key, value);
		}
		params
	}

	/// Sets a key, replacing any previous value.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
		self.params.insert(key.into(), value.into());
	}

	/// Adds a value to a key, keeping values already present.
	pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
		match self.params.entry(key.into()) {
			btree_map::Entry::Occupied(mut entry) => entry.get_mut().push(value),
			btree_map::Entry::Vacant(entry) => {
				entry.insert(QueryValue::One(value.into()));
			}
		}
	}

	/// Removes a key.
	pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
		self.params.remove(key)
	}

	/// Returns the value of a key.
	pub fn get(&self, key: &str) -> Option<&QueryValue> {
		self.params.get(key)
	}

	/// Returns the first string value of a key.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.params.get(key).and_then(QueryValue::first)
	}

	/// Returns whether the key is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.params.contains_key(key)
	}

	/// Iterates over keys in sorted order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.params.keys().map(String::as_str)
	}

	/// Iterates over all entries in key order.
	pub fn iter(&self) -> btree_map::Iter<'_, String, QueryValue> {
		self.params.iter()
	}

	/// Returns the number of keys.
	pub fn len(&self) -> usize {
		self.params.len()
	}

	/// Returns whether there are no keys.
	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}

	/// Merges an update over these parameters.
	///
	/// [`ParamChange::Remove`] deletes the key, [`ParamChange::Set`] replaces
	/// it; keys the update does not mention are kept as they are.
	pub fn apply(&mut self, update: &QueryUpdate) {
		for (key, change) in update.iter() {
			match change {
				// Stored the way it would read back from the encoded URL
				ParamChange::Set(QueryValue::Many(vs)) if vs.is_empty() => {
					self.params.remove(key);
				}
				ParamChange::Set(QueryValue::Many(vs)) if vs.len() == 1 => {
					self.params
						.insert(key.clone(), QueryValue::One(vs[0].clone()));
				}
				ParamChange::Set(value) => {
					self.params.insert(key.clone(), value.clone());
				}
				ParamChange::Remove => {
					self.params.remove(key);
				}
			}
		}
	}

	/// Returns a copy with `update` applied.
	pub fn merged(&self, update: &QueryUpdate) -> Self {
		let mut next = self.clone();
		next.apply(update);
		next
	}
}

impl<'a> IntoIterator for &'a QueryParams {
	type Item = (&'a String, &'a QueryValue);
	type IntoIter = btree_map::Iter<'a, String, QueryValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.params.iter()
	}
}

/// Change to a single key within a [`QueryUpdate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamChange {
	/// Replace the key's value
	Set(QueryValue),
	/// Delete the key
	Remove,
}

/// Partial write to the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryUpdate {
	changes: BTreeMap<String, ParamChange>,
}

impl QueryUpdate {
	/// Creates an empty update.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style set.
	pub fn set(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
		self.insert(key, ParamChange::Set(value.into()));
		self
	}

	/// Builder-style removal.
	pub fn remove(mut self, key: impl Into<String>) -> Self {
		self.insert(key, ParamChange::Remove);
		self
	}

	/// Records a change, replacing an earlier change to the same key.
	pub fn insert(&mut self, key: impl Into<String>, change: ParamChange) {
		self.changes.insert(key.into(), change);
	}

	/// Returns the change recorded for a key.
	pub fn get(&self, key: &str) -> Option<&ParamChange> {
		self.changes.get(key)
	}

	/// Iterates over changes in key order.
	pub fn iter(&self) -> btree_map::Iter<'_, String, ParamChange> {
		self.changes.iter()
	}

	/// Returns the number of changed keys.
	pub fn len(&self) -> usize {
		self.changes.len()
	}

	/// Returns whether the update changes nothing.
	pub fn is_empty(&self) -> bool {
		self.changes.is_empty()
	}
}

impl FromIterator<(String, ParamChange)> for QueryUpdate {
	fn from_iter<I: IntoIterator<Item = (String, ParamChange)>>(iter: I) -> Self {
		Self {
			changes: iter.into_iter().collect(),
		}
	}
}
