//! Modal presentation options

use serde::{Deserialize, Serialize};
use trellis_i18n::Translate;

/// Options of a [`FormModal`](crate::FormModal).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalOptions {
	/// Dialog title
	pub title: Option<String>,
	/// Submit button label, `default.saveTitle` when unset
	pub submit_button_text: Option<String>,
	/// Cancel button label, `default.cancelTitle` when unset
	pub cancel_button_text: Option<String>,
	/// Drop prefilled initial values when the modal closes
	pub destroy_on_close: bool,
	/// Disable the submit button
	pub disable_submit: bool,
	/// Show the submit button as loading
	pub loading_submit: bool,
	/// Content is loading; when set it decides the submit button's
	/// disabled state instead of `disable_submit`
	pub loading_content: Option<bool>,
}

impl ModalOptions {
	/// Default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the title.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Sets the submit button label.
	pub fn with_submit_button_text(mut self, text: impl Into<String>) -> Self {
		self.submit_button_text = Some(text.into());
		self
	}

	/// Sets the cancel button label.
	pub fn with_cancel_button_text(mut self, text: impl Into<String>) -> Self {
		self.cancel_button_text = Some(text.into());
		self
	}

	/// Sets `destroy_on_close`.
	pub fn with_destroy_on_close(mut self, destroy: bool) -> Self {
		self.destroy_on_close = destroy;
		self
	}

	/// Sets `disable_submit`.
	pub fn with_disable_submit(mut self, disabled: bool) -> Self {
		self.disable_submit = disabled;
		self
	}

	/// Sets `loading_submit`.
	pub fn with_loading_submit(mut self, loading: bool) -> Self {
		self.loading_submit = loading;
		self
	}

	/// Sets `loading_content`.
	pub fn with_loading_content(mut self, loading: bool) -> Self {
		self.loading_content = Some(loading);
		self
	}

	/// Resolves the footer buttons.
	pub fn footer(&self, translator: &dyn Translate) -> ModalFooter {
		ModalFooter {
			submit_text: self
				.submit_button_text
				.clone()
				.unwrap_or_else(|| translator.t("default.saveTitle")),
			cancel_text: self
				.cancel_button_text
				.clone()
				.unwrap_or_else(|| translator.t("default.cancelTitle")),
			submit_disabled: self.loading_content.unwrap_or(self.disable_submit),
			submit_loading: self.loading_submit,
		}
	}
}

/// Footer buttons of a form modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalFooter {
	/// Submit button label
	pub submit_text: String,
	/// Cancel button label
	pub cancel_text: String,
	/// Submit button disabled
	pub submit_disabled: bool,
	/// Submit button shows a spinner
	pub submit_loading: bool,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use trellis_i18n::Localization;

	#[fixture]
	fn i18n() -> Localization {
		Localization::bundled().unwrap()
	}

	#[rstest]
	fn test_footer_defaults(i18n: Localization) {
		let footer = ModalOptions::new().footer(&i18n);

		assert_eq!(footer.submit_text, "Save");
		assert_eq!(footer.cancel_text, "Cancel");
		assert!(!footer.submit_disabled);
		assert!(!footer.submit_loading);
	}

	#[rstest]
	fn test_footer_custom_labels(i18n: Localization) {
		let footer = ModalOptions::new()
			.with_submit_button_text("Update")
			.with_cancel_button_text("Back")
			.with_loading_submit(true)
			.footer(&i18n);

		assert_eq!(footer.submit_text, "Update");
		assert_eq!(footer.cancel_text, "Back");
		assert!(footer.submit_loading);
	}

	#[rstest]
	#[case(None, false, false)]
	#[case(None, true, true)]
	#[case(Some(true), false, true)]
	// Loading content overrides disable_submit even when it is false
	#[case(Some(false), true, false)]
	fn test_submit_disabled(
		i18n: Localization,
		#[case] loading_content: Option<bool>,
		#[case] disable_submit: bool,
		#[case] expected: bool,
	) {
		let options = ModalOptions {
			loading_content,
			disable_submit,
			..ModalOptions::default()
		};

		assert_eq!(options.footer(&i18n).submit_disabled, expected);
	}

	#[rstest]
	fn test_options_deserialize() {
		let options: ModalOptions =
			serde_json::from_str(r#"{"title": "Edit", "loading_content": true}"#).unwrap();

		assert_eq!(options.title.as_deref(), Some("Edit"));
		assert_eq!(options.loading_content, Some(true));
		assert!(!options.destroy_on_close);
	}
}
