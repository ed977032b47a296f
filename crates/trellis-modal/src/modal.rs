//! Form modal state machine

use trellis_forms::FormController;
use trellis_i18n::Translate;
use trellis_types::{Callback, FieldValue, FormValues};

use crate::error::ModalError;
use crate::options::{ModalFooter, ModalOptions};
use crate::prompt::UnsavedPrompt;

/// Observable state of a [`FormModal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
	/// Not shown.
	Closed,
	/// Shown, no edits.
	OpenClean,
	/// Shown with unsaved edits.
	OpenDirty,
	/// Values were handed to `on_finish`; waiting for the caller to close.
	Submitting,
}

/// A form inside a modal dialog.
///
/// Visibility is owned by the caller through [`set_visible`](Self::set_visible).
/// A successful [`submit`](Self::submit) leaves the modal in
/// [`ModalState::Submitting`] until the caller hides it.
///
/// # Example
///
/// ```
/// use trellis_forms::{FieldSpec, FormStore};
/// use trellis_modal::{FormModal, ModalOptions, ModalState};
/// use trellis_types::FieldValue;
///
/// let form = FormStore::new().field(FieldSpec::new("role").required());
/// let mut modal = FormModal::new(form, ModalOptions::new().with_title("Edit role"));
///
/// modal.set_visible(true);
/// assert!(modal.submit().is_err());
///
/// modal.change_field("role", Some(FieldValue::text("admin")));
/// assert_eq!(modal.state(), ModalState::OpenDirty);
///
/// modal.submit().unwrap();
/// assert_eq!(modal.state(), ModalState::Submitting);
///
/// modal.set_visible(false);
/// assert_eq!(modal.state(), ModalState::Closed);
/// ```
pub struct FormModal<F: FormController> {
	form: F,
	options: ModalOptions,
	visible: bool,
	prompt: UnsavedPrompt,
	on_finish: Option<Callback<FormValues>>,
	on_close: Option<Callback>,
}

impl<F: FormController> FormModal<F> {
	/// Creates a closed modal.
	pub fn new(form: F, options: ModalOptions) -> Self {
		Self {
			form,
			options,
			visible: false,
			prompt: UnsavedPrompt::new(),
			on_finish: None,
			on_close: None,
		}
	}

	/// Sets the callback receiving validated values.
	pub fn with_on_finish(mut self, callback: Callback<FormValues>) -> Self {
		self.on_finish = Some(callback);
		self
	}

	/// Sets the callback fired on cancel.
	pub fn with_on_close(mut self, callback: Callback) -> Self {
		self.on_close = Some(callback);
		self
	}

	/// Current state.
	pub fn state(&self) -> ModalState {
		if !self.visible {
			ModalState::Closed
		} else if self.prompt.is_submitting() {
			ModalState::Submitting
		} else if self.prompt.is_dirty() {
			ModalState::OpenDirty
		} else {
			ModalState::OpenClean
		}
	}

	/// Shows or hides the modal. Hiding, or showing a closed modal, clears
	/// the submitting flag.
	pub fn set_visible(&mut self, visible: bool) {
		if !visible || !self.visible {
			self.prompt.set_submitting(false);
		}
		if self.visible != visible {
			tracing::debug!(visible, "form modal visibility changed");
		}
		self.visible = visible;
	}

	/// Whether the modal is shown.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Form change event; marks the form dirty.
	pub fn on_values_change(&mut self, changed: &FormValues) {
		if !changed.is_empty() {
			self.prompt.mark_dirty();
		}
	}

	/// Writes one field into the form and records the change.
	pub fn change_field(&mut self, name: impl Into<String>, value: Option<FieldValue>) {
		let mut changed = FormValues::new();
		changed.insert(name, value);
		self.form.set_fields_value(changed.clone());
		self.on_values_change(&changed);
	}

	/// Validates the form and, on success, hands the values to `on_finish`.
	///
	/// # Errors
	///
	/// Returns [`ModalError::NotOpen`] unless the modal is `OpenClean` or
	/// `OpenDirty`, and [`ModalError::Validation`] when the form does not
	/// validate. In both cases the state is left unchanged and `on_finish`
	/// is not called.
	pub fn submit(&mut self) -> Result<(), ModalError> {
		let state = self.state();
		if !matches!(state, ModalState::OpenClean | ModalState::OpenDirty) {
			tracing::warn!(?state, "form modal submit ignored");
			return Err(ModalError::NotOpen(state));
		}
		let values = self.form.validate()?;
		self.prompt.set_submitting(true);
		tracing::debug!(fields = values.len(), "form modal submitted");
		if let Some(callback) = &self.on_finish {
			callback.call(values);
		}
		Ok(())
	}

	/// Closes without validating and fires `on_close`.
	pub fn cancel(&mut self) {
		self.prompt.set_submitting(false);
		self.set_visible(false);
		if let Some(callback) = &self.on_close {
			callback.call(());
		}
	}

	/// Clean-up once the close animation finished: fields go back to their
	/// initial values and the dirty flag is cleared.
	///
	/// With `destroy_on_close` the initial values are dropped as well.
	pub fn after_close(&mut self) {
		if self.options.destroy_on_close {
			self.form.set_initial_values(FormValues::new());
		}
		self.form.reset_fields();
		self.prompt.reset();
		tracing::trace!("form modal fields reset after close");
	}

	/// Whether leaving now should warn about unsaved edits.
	pub fn should_prompt(&self) -> bool {
		self.prompt.should_prompt()
	}

	/// Unsaved-changes tracker.
	pub fn prompt(&self) -> &UnsavedPrompt {
		&self.prompt
	}

	/// Footer buttons with resolved labels.
	pub fn footer(&self, translator: &dyn Translate) -> ModalFooter {
		self.options.footer(translator)
	}

	/// Dialog title.
	pub fn title(&self) -> Option<&str> {
		self.options.title.as_deref()
	}

	/// Options.
	pub fn options(&self) -> &ModalOptions {
		&self.options
	}

	/// Replaces the options, e.g. when loading flags change.
	pub fn set_options(&mut self, options: ModalOptions) {
		self.options = options;
	}

	/// The form controller.
	pub fn form(&self) -> &F {
		&self.form
	}

	/// The form controller, mutably.
	pub fn form_mut(&mut self) -> &mut F {
		&mut self.form
	}
}

impl<F: FormController + std::fmt::Debug> std::fmt::Debug for FormModal<F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormModal")
			.field("form", &self.form)
			.field("options", &self.options)
			.field("state", &self.state())
			.finish_non_exhaustive()
	}
}
