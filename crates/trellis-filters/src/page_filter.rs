//! Filter form ↔ URL coordinator

use std::sync::Arc;

use trellis_forms::FormController;
use trellis_i18n::Translate;
use trellis_query::QueryParamStore;
use trellis_types::{Callback, FieldValue, FormValues, ParamChange, QueryUpdate};

use crate::error::FilterError;
use crate::options::{FilterActions, FilterOptions, PAGE_KEY, PageReset, SubmissionMode};
use crate::parser::{FieldConfig, ParseOptions, parse_filters};

/// Keeps a filter form and the URL query string in sync.
///
/// The URL is read through the injected [`QueryParamStore`] and parsed into
/// the form's initial values. Form changes (live-update mode) or submissions
/// (explicit-submit mode) are written back with merge semantics, so keys the
/// form does not know about, such as sorting, are left alone.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use trellis_filters::{FieldConfig, FieldKind, FilterOptions, PageFilter};
/// use trellis_forms::{FieldSpec, FormStore};
/// use trellis_query::MemoryQueryStore;
/// use trellis_types::FieldValue;
///
/// let store = Arc::new(MemoryQueryStore::from_url("/users?active=true&sort=name"));
/// let form = FormStore::new().field(FieldSpec::new("active"));
/// let config = FieldConfig::new().with("active", FieldKind::Boolean);
///
/// let mut filter = PageFilter::new(form, store.clone(), config, FilterOptions::new());
/// filter.initialize();
/// assert_eq!(filter.values().get("active"), Some(&FieldValue::Bool(true)));
///
/// filter.change_field("active", Some(FieldValue::Bool(false))).unwrap();
/// assert_eq!(store.url(), "/users?sort=name");
/// ```
pub struct PageFilter<F: FormController> {
	form: F,
	store: Arc<dyn QueryParamStore>,
	config: FieldConfig,
	options: FilterOptions,
	data: FormValues,
	on_submit: Option<Callback>,
	on_reset: Option<Callback>,
}

impl<F: FormController> PageFilter<F> {
	/// Creates a coordinator. Call [`initialize`](Self::initialize) to seed
	/// the form from the URL.
	pub fn new(
		form: F,
		store: Arc<dyn QueryParamStore>,
		config: FieldConfig,
		options: FilterOptions,
	) -> Self {
		Self {
			form,
			store,
			config,
			options,
			data: FormValues::new(),
			on_submit: None,
			on_reset: None,
		}
	}

	/// Sets the callback fired after every commit.
	pub fn with_on_submit(mut self, callback: Callback) -> Self {
		self.on_submit = Some(callback);
		self
	}

	/// Sets the callback fired after a reset.
	pub fn with_on_reset(mut self, callback: Callback) -> Self {
		self.on_reset = Some(callback);
		self
	}

	/// Parses the current URL and seeds the form with the result.
	pub fn initialize(&mut self) -> &FormValues {
		self.data = self.parse_current();
		self.seed_form();
		tracing::debug!(fields = self.data.len(), "filter form seeded from url");
		&self.data
	}

	/// Form change event.
	///
	/// Commits `all` and fires `on_submit` in live-update mode; does nothing
	/// in explicit-submit mode.
	///
	/// # Errors
	///
	/// Returns [`FilterError::Query`] when the URL cannot be written.
	pub fn on_values_change(
		&mut self,
		changed: &FormValues,
		all: FormValues,
	) -> Result<(), FilterError> {
		match self.mode() {
			SubmissionMode::LiveUpdate => {
				let changed: Vec<&str> = changed.keys().collect();
				tracing::trace!(?changed, "live filter change");
				self.on_submit(all)
			}
			SubmissionMode::ExplicitSubmit => Ok(()),
		}
	}

	/// Writes one field into the form and dispatches the change event.
	///
	/// # Errors
	///
	/// Returns [`FilterError::Query`] when a live update cannot be written.
	pub fn change_field(
		&mut self,
		name: impl Into<String>,
		value: Option<FieldValue>,
	) -> Result<(), FilterError> {
		let mut changed = FormValues::new();
		changed.insert(name, value);
		self.form.set_fields_value(changed.clone());
		let all = self.form.fields_value();
		self.on_values_change(&changed, all)
	}

	/// Form submission with already validated values: commit, then fire
	/// `on_submit`.
	///
	/// # Errors
	///
	/// Returns [`FilterError::Query`] when the URL cannot be written; the
	/// callback is not fired in that case.
	pub fn on_submit(&mut self, values: FormValues) -> Result<(), FilterError> {
		self.commit(&values)?;
		if let Some(callback) = &self.on_submit {
			callback.call(());
		}
		Ok(())
	}

	/// Validates the form and submits its values.
	///
	/// # Errors
	///
	/// Returns [`FilterError::Validation`] without writing anything when the
	/// form does not validate, or [`FilterError::Query`] when the URL cannot
	/// be written.
	pub fn submit(&mut self) -> Result<(), FilterError> {
		let values = self.form.validate()?;
		self.on_submit(values)
	}

	/// Merges `values` into the URL. Empty values remove their key.
	///
	/// # Errors
	///
	/// Returns [`FilterError::Query`] when the URL cannot be written.
	pub fn commit(&self, values: &FormValues) -> Result<(), FilterError> {
		let update = commit_update(values);
		self.store.update(&update)?;
		tracing::debug!(keys = update.len(), "filters committed to url");
		Ok(())
	}

	/// Removes every form field and the page key from the URL, then fires
	/// `on_reset`.
	///
	/// The form's own field state is left as it is.
	///
	/// # Errors
	///
	/// Returns [`FilterError::Query`] when the URL cannot be written.
	pub fn reset(&mut self) -> Result<(), FilterError> {
		let update = reset_update(&self.form.fields_value(), self.options.page_reset);
		self.store.update(&update)?;
		tracing::debug!(keys = update.len(), page_reset = ?self.options.page_reset, "filters reset");
		if let Some(callback) = &self.on_reset {
			callback.call(());
		}
		Ok(())
	}

	/// Re-reads the URL after a navigation.
	///
	/// The form is not touched, so in-progress edits survive.
	pub fn refresh(&mut self) -> &FormValues {
		self.data = self.parse_current();
		&self.data
	}

	/// Replaces the parse flags. Returns whether anything changed; when it
	/// did the URL is re-parsed and the form re-seeded.
	pub fn set_parse_options(&mut self, parse: ParseOptions) -> bool {
		if self.options.parse == parse {
			return false;
		}
		self.options.parse = parse;
		self.data = self.parse_current();
		self.seed_form();
		tracing::debug!(?parse, "parse options changed, filter form re-seeded");
		true
	}

	/// Action buttons with resolved labels.
	pub fn actions(&self, translator: &dyn Translate) -> FilterActions {
		self.options.actions(translator)
	}

	/// Submission mode.
	pub fn mode(&self) -> SubmissionMode {
		self.options.mode()
	}

	/// Values parsed from the URL at the last initialize/refresh.
	pub fn values(&self) -> &FormValues {
		&self.data
	}

	/// Options.
	pub fn options(&self) -> &FilterOptions {
		&self.options
	}

	/// Field coercion declarations.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// The form controller.
	pub fn form(&self) -> &F {
		&self.form
	}

	/// The form controller, mutably.
	pub fn form_mut(&mut self) -> &mut F {
		&mut self.form
	}

	/// The query parameter store.
	pub fn store(&self) -> &Arc<dyn QueryParamStore> {
		&self.store
	}

	fn parse_current(&self) -> FormValues {
		parse_filters(&self.store.read(), &self.config, &self.options.parse)
	}

	fn seed_form(&mut self) {
		self.form.set_initial_values(self.data.clone());
		self.form.reset_fields();
	}
}

impl<F: FormController + std::fmt::Debug> std::fmt::Debug for PageFilter<F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PageFilter")
			.field("form", &self.form)
			.field("config", &self.config)
			.field("options", &self.options)
			.field("data", &self.data)
			.finish_non_exhaustive()
	}
}

/// Builds the URL update for a commit.
///
/// Empty sentinels (`None`, `false`, `""`, a list of nothing but those)
/// become removals;
/// everything else is set to its query string form.
pub fn commit_update(values: &FormValues) -> QueryUpdate {
	values
		.iter()
		.map(|(key, value)| {
			let change = match value {
				Some(v) if !v.is_empty_sentinel() => ParamChange::Set(v.to_query_value()),
				_ => ParamChange::Remove,
			};
			(key.clone(), change)
		})
		.collect()
}

/// Builds the URL update for a reset of `fields`.
pub fn reset_update(fields: &FormValues, page_reset: PageReset) -> QueryUpdate {
	let update = fields
		.keys()
		.fold(QueryUpdate::new(), |update, key| update.remove(key));
	match page_reset {
		PageReset::Remove => update.remove(PAGE_KEY),
		PageReset::FirstPage => update.set(PAGE_KEY, "1"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use trellis_types::QueryValue;

	#[rstest]
	#[case(None)]
	#[case(Some(FieldValue::Bool(false)))]
	#[case(Some(FieldValue::text("")))]
	#[case(Some(FieldValue::List(vec![])))]
	#[case(Some(FieldValue::List(vec![FieldValue::Bool(false)])))]
	#[case(Some(FieldValue::List(vec![FieldValue::text(""), FieldValue::Bool(false)])))]
	fn test_empty_sentinels_become_removals(#[case] value: Option<FieldValue>) {
		let mut values = FormValues::new();
		values.insert("k", value);

		let update = commit_update(&values);

		assert_eq!(update.get("k"), Some(&ParamChange::Remove));
	}

	#[rstest]
	#[case(FieldValue::Bool(true), QueryValue::from("true"))]
	#[case(FieldValue::Number(30.0), QueryValue::from("30"))]
	#[case(FieldValue::Number(0.0), QueryValue::from("0"))]
	#[case(FieldValue::text("ann"), QueryValue::from("ann"))]
	#[case(
		FieldValue::List(vec![FieldValue::text("a"), FieldValue::text("b")]),
		QueryValue::Many(vec!["a".to_string(), "b".to_string()])
	)]
	#[case(
		FieldValue::List(vec![FieldValue::text("a"), FieldValue::text(""), FieldValue::text("b")]),
		QueryValue::Many(vec!["a".to_string(), "b".to_string()])
	)]
	fn test_values_become_sets(#[case] value: FieldValue, #[case] expected: QueryValue) {
		let values = FormValues::new().with("k", value);

		let update = commit_update(&values);

		assert_eq!(update.get("k"), Some(&ParamChange::Set(expected)));
	}

	#[rstest]
	#[case(PageReset::Remove, ParamChange::Remove)]
	#[case(PageReset::FirstPage, ParamChange::Set(QueryValue::from("1")))]
	fn test_reset_update(#[case] page_reset: PageReset, #[case] page: ParamChange) {
		let fields = FormValues::new().with("a", "x").with_empty("b");

		let update = reset_update(&fields, page_reset);

		assert_eq!(update.len(), 3);
		assert_eq!(update.get("a"), Some(&ParamChange::Remove));
		assert_eq!(update.get("b"), Some(&ParamChange::Remove));
		assert_eq!(update.get(PAGE_KEY), Some(&page));
	}
}
