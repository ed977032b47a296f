//! Filter coordinator configuration

use serde::{Deserialize, Serialize};
use trellis_i18n::Translate;

use crate::parser::ParseOptions;

/// Query key holding the current page.
pub const PAGE_KEY: &str = "page";

/// How form changes reach the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionMode {
	/// Every field change is committed immediately.
	LiveUpdate,
	/// Changes are committed only when the form is submitted.
	ExplicitSubmit,
}

/// What [`reset`](crate::PageFilter::reset) does with the page key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageReset {
	/// Remove `page` from the URL.
	#[default]
	Remove,
	/// Set `page=1`.
	FirstPage,
}

/// Options of a [`PageFilter`](crate::PageFilter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
	/// Show a reset button
	pub has_reset: bool,
	/// Show an apply button and switch to explicit-submit mode
	pub has_submit: bool,
	/// Reset button label, `default.reset` when unset
	pub reset_text: Option<String>,
	/// Apply button label, `default.apply` when unset
	pub submit_text: Option<String>,
	/// Pagination handling on reset
	pub page_reset: PageReset,
	/// Coercion flags for undeclared keys
	pub parse: ParseOptions,
}

impl FilterOptions {
	/// Default options: live update, no buttons.
	pub fn new() -> Self {
		Self::default()
	}

	/// Shows or hides the reset button.
	pub fn with_reset(mut self, enabled: bool) -> Self {
		self.has_reset = enabled;
		self
	}

	/// Shows or hides the apply button.
	pub fn with_submit(mut self, enabled: bool) -> Self {
		self.has_submit = enabled;
		self
	}

	/// Sets the reset button label.
	pub fn with_reset_text(mut self, text: impl Into<String>) -> Self {
		self.reset_text = Some(text.into());
		self
	}

	/// Sets the apply button label.
	pub fn with_submit_text(mut self, text: impl Into<String>) -> Self {
		self.submit_text = Some(text.into());
		self
	}

	/// Sets the pagination reset.
	pub fn with_page_reset(mut self, page_reset: PageReset) -> Self {
		self.page_reset = page_reset;
		self
	}

	/// Sets the parse flags.
	pub fn with_parse(mut self, parse: ParseOptions) -> Self {
		self.parse = parse;
		self
	}

	/// Submission mode implied by `has_submit`.
	pub fn mode(&self) -> SubmissionMode {
		if self.has_submit {
			SubmissionMode::ExplicitSubmit
		} else {
			SubmissionMode::LiveUpdate
		}
	}

	/// Resolves the action buttons to show.
	pub fn actions(&self, translator: &dyn Translate) -> FilterActions {
		FilterActions {
			reset: self.has_reset.then(|| {
				self.reset_text
					.clone()
					.unwrap_or_else(|| translator.t("default.reset"))
			}),
			submit: self.has_submit.then(|| {
				self.submit_text
					.clone()
					.unwrap_or_else(|| translator.t("default.apply"))
			}),
		}
	}
}

/// Action buttons of a filter form, with resolved labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterActions {
	/// Reset button label, if shown
	pub reset: Option<String>,
	/// Apply button label, if shown
	pub submit: Option<String>,
}

impl FilterActions {
	/// Whether any button row is rendered at all.
	pub fn is_empty(&self) -> bool {
		self.reset.is_none() && self.submit.is_none()
	}
}
