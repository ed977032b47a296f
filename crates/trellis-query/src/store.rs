//! Query parameter store abstraction and in-memory implementation

use parking_lot::Mutex;
use trellis_types::{QueryParams, QueryUpdate};

use crate::codec::{build_url, parse_query, split_url};
use crate::error::QueryError;

/// Read/write access to the current URL's query string.
///
/// Implementations must apply updates with merge semantics (see
/// [`QueryParams::apply`]) and push a new history entry per update.
pub trait QueryParamStore {
	/// Returns the current query parameters.
	fn read(&self) -> QueryParams;

	/// Merges `update` over the current parameters and navigates to the
	/// resulting URL.
	///
	/// # Errors
	///
	/// Returns [`QueryError`] when navigation fails. Callers are not expected
	/// to recover; the error is surfaced to the application.
	fn update(&self, update: &QueryUpdate) -> Result<(), QueryError>;
}

#[derive(Debug)]
struct MemoryLocation {
	path: String,
	params: QueryParams,
	fragment: String,
	history: Vec<String>,
}

impl MemoryLocation {
	fn url(&self) -> String {
		build_url(&self.path, &self.params, &self.fragment)
	}
}

/// In-memory URL with a navigation log.
///
/// Used on native targets and as the test double for coordinators. Every
/// [`update`](QueryParamStore::update) appends the resulting URL to the
/// history, like `history.pushState` would.
#[derive(Debug)]
pub struct MemoryQueryStore {
	location: Mutex<MemoryLocation>,
}

impl Default for MemoryQueryStore {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryQueryStore {
	/// Creates a store positioned at `/` with no parameters.
	pub fn new() -> Self {
		Self::from_url("/")
	}

	/// Creates a store positioned at a relative URL such as `/users?page=2`.
	pub fn from_url(url: &str) -> Self {
		let (path, query, fragment) = split_url(url);
		let location = MemoryLocation {
			path: if path.is_empty() { "/".to_string() } else { path.to_string() },
			params: parse_query(query),
			fragment: fragment.to_string(),
			history: Vec::new(),
		};
		let initial = location.url();
		Self {
			location: Mutex::new(MemoryLocation {
				history: vec![initial],
				..location
			}),
		}
	}

	/// Returns the current relative URL.
	pub fn url(&self) -> String {
		self.location.lock().url()
	}

	/// Simulates a user navigation (link click, back button) to `url`.
	///
	/// Unlike [`update`](QueryParamStore::update) this replaces the whole
	/// location instead of merging.
	pub fn navigate(&self, url: &str) {
		let (path, query, fragment) = split_url(url);
		let mut location = self.location.lock();
		if !path.is_empty() {
			location.path = path.to_string();
		}
		location.params = parse_query(query);
		location.fragment = fragment.to_string();
		let url = location.url();
		location.history.push(url);
	}

	/// Returns every URL visited, starting with the initial one.
	pub fn history(&self) -> Vec<String> {
		self.location.lock().history.clone()
	}

	/// Returns how many writes (updates and navigations) happened since creation.
	pub fn write_count(&self) -> usize {
		self.location.lock().history.len() - 1
	}
}

impl QueryParamStore for MemoryQueryStore {
	fn read(&self) -> QueryParams {
		self.location.lock().params.clone()
	}

	fn update(&self, update: &QueryUpdate) -> Result<(), QueryError> {
		let mut location = self.location.lock();
		location.params.apply(update);
		let url = location.url();
		tracing::debug!(url = %url, changed = update.len(), "query parameters updated");
		location.history.push(url);
		Ok(())
	}
}
