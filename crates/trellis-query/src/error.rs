//! Query store errors

/// Error raised while reading or writing the URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
	/// The browser refused the history update.
	#[error("Navigation failed: {0}")]
	Navigation(String),
	/// A required browser object is missing.
	#[error("Browser API unavailable: {0}")]
	Unavailable(String),
}
