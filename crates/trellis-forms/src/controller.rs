//! The form controller contract

use trellis_types::FormValues;

use crate::validation::ValidationErrors;

/// Capabilities a coordinator needs from a form.
///
/// The controller owns field registration, value storage and validation.
/// Only registered fields appear in [`fields_value`](Self::fields_value);
/// values set for unknown names are kept but not reported.
pub trait FormController {
	/// Returns the current value of every registered field.
	fn fields_value(&self) -> FormValues;

	/// Overwrites the given fields' current values.
	fn set_fields_value(&mut self, values: FormValues);

	/// Replaces the initial values that [`reset_fields`](Self::reset_fields)
	/// restores.
	fn set_initial_values(&mut self, values: FormValues);

	/// Restores every field to its initial value.
	fn reset_fields(&mut self);

	/// Validates every registered field.
	///
	/// # Errors
	///
	/// Returns [`ValidationErrors`] listing the failing fields.
	fn validate(&self) -> Result<FormValues, ValidationErrors>;
}
