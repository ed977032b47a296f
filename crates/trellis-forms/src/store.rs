//! In-memory form controller

use trellis_types::{FieldValue, FormValues};

use crate::controller::FormController;
use crate::validation::{Rule, ValidationErrors};

/// Registration of a single form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
	name: String,
	rules: Vec<Rule>,
}

impl FieldSpec {
	/// Registers a field without rules.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			rules: Vec::new(),
		}
	}

	/// Adds the required rule.
	pub fn required(self) -> Self {
		self.rule(Rule::required())
	}

	/// Adds a rule.
	pub fn rule(mut self, rule: Rule) -> Self {
		self.rules.push(rule);
		self
	}

	/// Field name.
	pub fn name(&self) -> &str {
		&self.name
	}
}

/// Form state kept entirely in memory.
///
/// Values for unregistered names are stored so that later registration
/// picks them up.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
	fields: Vec<FieldSpec>,
	initial: FormValues,
	current: FormValues,
}

impl FormStore {
	/// Creates a form with no fields.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a field (builder style).
	pub fn field(mut self, spec: FieldSpec) -> Self {
		self.register(spec);
		self
	}

	/// Registers a field. Registering an existing name replaces its rules.
	pub fn register(&mut self, spec: FieldSpec) {
		if let Some(existing) = self.fields.iter_mut().find(|f| f.name == spec.name) {
			*existing = spec;
		} else {
			self.fields.push(spec);
		}
	}

	/// Names of the registered fields.
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(FieldSpec::name)
	}

	/// Returns whether a field is registered.
	pub fn is_registered(&self, name: &str) -> bool {
		self.fields.iter().any(|f| f.name == name)
	}

	/// Current value of one field.
	pub fn field_value(&self, name: &str) -> Option<&FieldValue> {
		self.current.get(name)
	}

	/// Sets one field, as an input change would, and returns the changed
	/// values.
	pub fn set_field_value(
		&mut self,
		name: impl Into<String>,
		value: Option<FieldValue>,
	) -> FormValues {
		let name = name.into();
		self.current.insert(name.clone(), value.clone());
		let mut changed = FormValues::new();
		changed.insert(name, value);
		changed
	}

	/// Initial values as last set.
	pub fn initial_values(&self) -> &FormValues {
		&self.initial
	}

	/// Returns whether any registered field differs from its initial value.
	pub fn is_dirty(&self) -> bool {
		self.fields
			.iter()
			.any(|f| self.current.get(&f.name) != self.initial.get(&f.name))
	}
}

impl FormController for FormStore {
	fn fields_value(&self) -> FormValues {
		self.fields
			.iter()
			.map(|f| (f.name.clone(), self.current.get(&f.name).cloned()))
			.collect()
	}

	fn set_fields_value(&mut self, values: FormValues) {
		self.current.merge(values);
	}

	fn set_initial_values(&mut self, values: FormValues) {
		self.initial = values;
	}

	fn reset_fields(&mut self) {
		tracing::trace!(fields = self.fields.len(), "resetting form fields");
		self.current = self.initial.clone();
	}

	fn validate(&self) -> Result<FormValues, ValidationErrors> {
		let mut errors = ValidationErrors::new();
		for field in &self.fields {
			let value = self.current.get(&field.name);
			for rule in &field.rules {
				if let Err(message) = rule.check(value) {
					errors.add(field.name.clone(), message);
				}
			}
		}

		if errors.is_empty() {
			Ok(self.fields_value())
		} else {
			tracing::debug!(failed = errors.len(), "form validation failed");
			Err(errors)
		}
	}
}
