//! Message catalog for storing translations

use std::collections::HashMap;

use serde_json::Value;

use crate::error::I18nError;

/// Translations of one namespace for one locale.
///
/// Keys are dotted paths. Nested JSON objects flatten into them, so
/// `{"default": {"reset": "Reset"}}` yields the key `default.reset`.
///
/// # Example
/// ```
/// use trellis_i18n::MessageCatalog;
///
/// let catalog = MessageCatalog::from_json(
///     "en-EN",
///     "translation",
///     r#"{"default": {"reset": "Reset"}, "title": "Users"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(catalog.get("default.reset"), Some("Reset"));
/// assert_eq!(catalog.get("title"), Some("Users"));
/// assert_eq!(catalog.get("default"), None);
/// ```
#[derive(Debug, Clone)]
pub struct MessageCatalog {
	locale: String,
	namespace: String,
	messages: HashMap<String, String>,
}

impl MessageCatalog {
	/// Create an empty catalog
	pub fn new(locale: impl Into<String>, namespace: impl Into<String>) -> Self {
		Self {
			locale: locale.into(),
			namespace: namespace.into(),
			messages: HashMap::new(),
		}
	}

	/// Parse a nested JSON object into a catalog
	///
	/// # Errors
	///
	/// Returns [`I18nError::InvalidResource`] when `json` does not parse.
	pub fn from_json(
		locale: impl Into<String>,
		namespace: impl Into<String>,
		json: &str,
	) -> Result<Self, I18nError> {
		let tree: Value = serde_json::from_str(json)?;
		Ok(Self::from_value(locale, namespace, &tree))
	}

	/// Build a catalog from an already parsed JSON tree
	///
	/// Leaves that are neither strings nor objects are stored in their JSON
	/// text form; `null` leaves are skipped.
	pub fn from_value(
		locale: impl Into<String>,
		namespace: impl Into<String>,
		tree: &Value,
	) -> Self {
		let mut catalog = Self::new(locale, namespace);
		flatten_into(&mut catalog.messages, String::new(), tree);
		catalog
	}

	/// Get the locale for this catalog
	pub fn locale(&self) -> &str {
		&self.locale
	}

	/// Get the namespace for this catalog
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// Add a translation, replacing any previous one
	pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
		self.messages.insert(key.into(), message.into());
	}

	/// Merge another catalog's messages into this one
	pub fn extend(&mut self, other: MessageCatalog) {
		self.messages.extend(other.messages);
	}

	/// Get a translation
	pub fn get(&self, key: &str) -> Option<&str> {
		self.messages.get(key).map(String::as_str)
	}

	/// Number of messages
	pub fn len(&self) -> usize {
		self.messages.len()
	}

	/// Whether the catalog holds no messages
	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}
}

fn flatten_into(messages: &mut HashMap<String, String>, prefix: String, node: &Value) {
	match node {
		Value::Object(map) => {
			for (key, child) in map {
				let path = if prefix.is_empty() {
					key.clone()
				} else {
					format!("{prefix}.{key}")
				};
				flatten_into(messages, path, child);
			}
		}
		Value::String(s) => {
			messages.insert(prefix, s.clone());
		}
		Value::Null => {}
		other => {
			messages.insert(prefix, other.to_string());
		}
	}
}
