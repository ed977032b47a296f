//! Filter coordinator errors

use trellis_forms::ValidationErrors;
use trellis_query::QueryError;

/// Errors surfaced by [`PageFilter`](crate::PageFilter) operations.
///
/// Malformed URL values are never errors; they pass through as text.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
	/// Writing the URL failed.
	#[error(transparent)]
	Query(#[from] QueryError),
	/// The form did not validate; nothing was written.
	#[error(transparent)]
	Validation(#[from] ValidationErrors),
}
