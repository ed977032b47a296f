//! Field validation rules and errors

use std::collections::BTreeMap;
use std::sync::Arc;

use trellis_types::FieldValue;

/// Default message for a missing required value.
pub const REQUIRED_MESSAGE: &str = "This field is required";

type CustomValidator = Arc<dyn Fn(Option<&FieldValue>) -> Result<(), String> + Send + Sync>;

/// A validation rule attached to a field.
#[derive(Clone)]
pub enum Rule {
	/// The field must hold a non-blank value.
	Required {
		/// Message reported on failure
		message: String,
	},
	/// Arbitrary check returning an error message on failure.
	Custom(CustomValidator),
}

impl Rule {
	/// Required rule with the default message.
	pub fn required() -> Self {
		Self::Required {
			message: REQUIRED_MESSAGE.to_string(),
		}
	}

	/// Custom rule from a closure.
	pub fn custom<F>(check: F) -> Self
	where
		F: Fn(Option<&FieldValue>) -> Result<(), String> + Send + Sync + 'static,
	{
		Self::Custom(Arc::new(check))
	}

	/// Runs the rule against a value.
	pub fn check(&self, value: Option<&FieldValue>) -> Result<(), String> {
		match self {
			Self::Required { message } => {
				if is_blank(value) {
					Err(message.clone())
				} else {
					Ok(())
				}
			}
			Self::Custom(check) => check(value),
		}
	}
}

impl std::fmt::Debug for Rule {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Required { message } => f
				.debug_struct("Required")
				.field("message", message)
				.finish(),
			Self::Custom(_) => f.write_str("Custom(<function>)"),
		}
	}
}

// A checked checkbox and an unchecked one are both answers.
fn is_blank(value: Option<&FieldValue>) -> bool {
	match value {
		None => true,
		Some(FieldValue::Text(s)) => s.trim().is_empty(),
		Some(FieldValue::List(items)) => items.is_empty(),
		Some(_) => false,
	}
}

/// Field name → error messages, produced by a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed for {} field(s)", .errors.len())]
pub struct ValidationErrors {
	errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
	/// Creates an empty error set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records an error for a field.
	pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.errors
			.entry(field.into())
			.or_default()
			.push(message.into());
	}

	/// Returns the messages of a field.
	pub fn get(&self, field: &str) -> Option<&[String]> {
		self.errors.get(field).map(Vec::as_slice)
	}

	/// Iterates over failing field names.
	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.errors.keys().map(String::as_str)
	}

	/// Returns whether no errors were recorded.
	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	/// Returns the number of failing fields.
	pub fn len(&self) -> usize {
		self.errors.len()
	}
}
