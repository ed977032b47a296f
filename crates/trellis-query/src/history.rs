//! Browser store backed by `window.location` and the History API

use trellis_types::{QueryParams, QueryUpdate};
use wasm_bindgen::JsValue;

use crate::codec::{build_url, parse_query};
use crate::error::QueryError;
use crate::store::QueryParamStore;

/// Query store reading `location.search` and writing through
/// `history.pushState`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HistoryQueryStore;

impl HistoryQueryStore {
	/// Creates a store for the current window.
	pub fn new() -> Self {
		Self
	}
}

fn window() -> Result<web_sys::Window, QueryError> {
	web_sys::window().ok_or_else(|| QueryError::Unavailable("window".to_string()))
}

fn js_error(err: JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl QueryParamStore for HistoryQueryStore {
	fn read(&self) -> QueryParams {
		window()
			.ok()
			.and_then(|w| w.location().search().ok())
			.map(|search| parse_query(&search))
			.unwrap_or_default()
	}

	fn update(&self, update: &QueryUpdate) -> Result<(), QueryError> {
		let window = window()?;
		let location = window.location();
		let search = location
			.search()
			.map_err(|e| QueryError::Unavailable(js_error(e)))?;
		let path = location
			.pathname()
			.map_err(|e| QueryError::Unavailable(js_error(e)))?;
		let hash = location.hash().unwrap_or_default();

		let params = parse_query(&search).merged(update);
		let url = build_url(&path, &params, hash.trim_start_matches('#'));

		let history = window
			.history()
			.map_err(|e| QueryError::Unavailable(js_error(e)))?;
		history
			.push_state_with_url(&JsValue::NULL, "", Some(&url))
			.map_err(|e| QueryError::Navigation(js_error(e)))?;

		tracing::debug!(url = %url, "history entry pushed");
		Ok(())
	}
}
