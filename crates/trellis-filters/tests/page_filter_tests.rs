//! PageFilter integration tests against the in-memory URL store

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::{fixture, rstest};
use trellis_filters::{
	FieldConfig, FieldKind, FilterError, FilterOptions, PageFilter, PageReset, ParseOptions,
	SubmissionMode,
};
use trellis_forms::{FieldSpec, FormController, FormStore};
use trellis_i18n::Localization;
use trellis_query::{MemoryQueryStore, QueryError, QueryParamStore};
use trellis_types::{Callback, FieldValue, FormValues, QueryParams, QueryUpdate};

fn counter() -> (Arc<AtomicUsize>, Callback) {
	let count = Arc::new(AtomicUsize::new(0));
	let handle = count.clone();
	let callback = Callback::new(move |()| {
		handle.fetch_add(1, Ordering::SeqCst);
	});
	(count, callback)
}

fn user_form() -> FormStore {
	FormStore::new()
		.field(FieldSpec::new("active"))
		.field(FieldSpec::new("age"))
		.field(FieldSpec::new("q"))
}

fn user_config() -> FieldConfig {
	FieldConfig::new()
		.with("active", FieldKind::Boolean)
		.with("age", FieldKind::Number)
}

fn filter_at(url: &str, options: FilterOptions) -> (Arc<MemoryQueryStore>, PageFilter<FormStore>) {
	let store = Arc::new(MemoryQueryStore::from_url(url));
	let mut filter = PageFilter::new(user_form(), store.clone(), user_config(), options);
	filter.initialize();
	(store, filter)
}

#[fixture]
fn live() -> (Arc<MemoryQueryStore>, PageFilter<FormStore>) {
	filter_at("/users?active=true&age=30", FilterOptions::new())
}

#[rstest]
fn test_scenario_live_update_removes_false(live: (Arc<MemoryQueryStore>, PageFilter<FormStore>)) {
	let (store, mut filter) = live;

	assert_eq!(filter.values().get("active"), Some(&FieldValue::Bool(true)));
	assert_eq!(filter.values().get("age"), Some(&FieldValue::Number(30.0)));
	assert_eq!(filter.form().field_value("age"), Some(&FieldValue::Number(30.0)));

	filter
		.change_field("active", Some(FieldValue::Bool(false)))
		.unwrap();

	assert_eq!(store.url(), "/users?age=30");
}

#[rstest]
fn test_live_change_fires_on_submit() {
	let (count, callback) = counter();
	let store = Arc::new(MemoryQueryStore::from_url("/users"));
	let mut filter = PageFilter::new(user_form(), store.clone(), user_config(), FilterOptions::new())
		.with_on_submit(callback);
	filter.initialize();

	filter.change_field("q", Some(FieldValue::text("ann"))).unwrap();

	assert_eq!(count.load(Ordering::SeqCst), 1);
	assert_eq!(store.url(), "/users?q=ann");
}

#[rstest]
fn test_commit_preserves_disjoint_keys() {
	let (store, filter) = filter_at("/users?active=true&sort=name", FilterOptions::new());

	filter
		.commit(&FormValues::new().with("age", 1_i64))
		.unwrap();

	let params = store.read();
	assert_eq!(params.get_str("age"), Some("1"));
	assert_eq!(params.get_str("active"), Some("true"));
	assert_eq!(params.get_str("sort"), Some("name"));
}

#[rstest]
fn test_commit_twice_equals_once(live: (Arc<MemoryQueryStore>, PageFilter<FormStore>)) {
	let (store, filter) = live;
	let values = FormValues::new()
		.with("q", "ann")
		.with("active", false)
		.with_empty("age");

	filter.commit(&values).unwrap();
	let once = store.read();
	filter.commit(&values).unwrap();

	assert_eq!(store.read(), once);
	assert_eq!(once, QueryParams::from_pairs([("q", "ann")]));
}

#[rstest]
#[case(PageReset::Remove, "/users?sort=name")]
#[case(PageReset::FirstPage, "/users?page=1&sort=name")]
fn test_reset_clears_fields_and_page(#[case] page_reset: PageReset, #[case] expected: &str) {
	let (count, callback) = counter();
	let store = Arc::new(MemoryQueryStore::from_url(
		"/users?active=true&q=ann&page=4&sort=name",
	));
	let options = FilterOptions::new()
		.with_reset(true)
		.with_page_reset(page_reset);
	let mut filter =
		PageFilter::new(user_form(), store.clone(), user_config(), options).with_on_reset(callback);
	filter.initialize();

	filter.reset().unwrap();

	assert_eq!(store.url(), expected);
	assert_eq!(count.load(Ordering::SeqCst), 1);
	// Visual state is untouched by reset
	assert_eq!(filter.form().field_value("q"), Some(&FieldValue::text("ann")));
}

#[rstest]
fn test_explicit_submit_writes_once() {
	let (store, mut filter) = filter_at(
		"/users?age=30",
		FilterOptions::new().with_submit(true),
	);
	assert_eq!(filter.mode(), SubmissionMode::ExplicitSubmit);

	filter.change_field("q", Some(FieldValue::text("ann"))).unwrap();
	filter
		.change_field("active", Some(FieldValue::Bool(true)))
		.unwrap();
	assert_eq!(store.write_count(), 0);

	filter.submit().unwrap();

	assert_eq!(store.write_count(), 1);
	assert_eq!(store.url(), "/users?active=true&age=30&q=ann");
}

#[rstest]
fn test_submit_validation_failure_writes_nothing() {
	let store = Arc::new(MemoryQueryStore::from_url("/users"));
	let form = FormStore::new().field(FieldSpec::new("q").required());
	let (count, callback) = counter();
	let mut filter = PageFilter::new(
		form,
		store.clone(),
		FieldConfig::new(),
		FilterOptions::new().with_submit(true),
	)
	.with_on_submit(callback);
	filter.initialize();

	let err = filter.submit().unwrap_err();

	assert!(matches!(err, FilterError::Validation(_)));
	assert_eq!(store.write_count(), 0);
	assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[rstest]
fn test_refresh_keeps_form_edits(live: (Arc<MemoryQueryStore>, PageFilter<FormStore>)) {
	let (store, mut filter) = live;
	filter
		.form_mut()
		.set_fields_value(FormValues::new().with("q", "draft"));

	store.navigate("/users?age=40");
	let values = filter.refresh().clone();

	assert_eq!(values.get("age"), Some(&FieldValue::Number(40.0)));
	assert!(!values.contains_key("active"));
	assert_eq!(filter.form().field_value("q"), Some(&FieldValue::text("draft")));
}

#[rstest]
fn test_set_parse_options_reseeds_only_on_change() {
	let store = Arc::new(MemoryQueryStore::from_url("/users?limit=20"));
	let form = FormStore::new().field(FieldSpec::new("limit"));
	let mut filter = PageFilter::new(form, store, FieldConfig::new(), FilterOptions::new());
	filter.initialize();
	assert_eq!(filter.values().get("limit"), Some(&FieldValue::text("20")));

	assert!(!filter.set_parse_options(ParseOptions::default()));
	assert!(filter.set_parse_options(ParseOptions::default().with_parse_numbers(true)));

	assert_eq!(filter.values().get("limit"), Some(&FieldValue::Number(20.0)));
	assert_eq!(filter.form().field_value("limit"), Some(&FieldValue::Number(20.0)));
}

#[rstest]
fn test_actions_labels() {
	let i18n = Localization::bundled().unwrap();
	let (_, filter) = filter_at(
		"/users",
		FilterOptions::new()
			.with_reset(true)
			.with_submit(true)
			.with_submit_text("Search"),
	);

	let actions = filter.actions(&i18n);

	assert_eq!(actions.reset.as_deref(), Some("Reset"));
	assert_eq!(actions.submit.as_deref(), Some("Search"));
}

struct BrokenStore;

impl QueryParamStore for BrokenStore {
	fn read(&self) -> QueryParams {
		QueryParams::new()
	}

	fn update(&self, _update: &QueryUpdate) -> Result<(), QueryError> {
		Err(QueryError::Navigation("pushState rejected".to_string()))
	}
}

#[rstest]
fn test_navigation_failure_propagates() {
	let (count, callback) = counter();
	let mut filter = PageFilter::new(
		user_form(),
		Arc::new(BrokenStore),
		user_config(),
		FilterOptions::new(),
	)
	.with_on_submit(callback);
	filter.initialize();

	let err = filter
		.change_field("q", Some(FieldValue::text("ann")))
		.unwrap_err();

	assert!(matches!(err, FilterError::Query(QueryError::Navigation(_))));
	assert_eq!(count.load(Ordering::SeqCst), 0);
}
