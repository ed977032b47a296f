//! Localization errors

/// Errors raised while loading resources or switching language.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
	/// A resource is not valid JSON or not a JSON object.
	#[error("Invalid translation resource: {0}")]
	InvalidResource(#[from] serde_json::Error),
	/// No catalog is registered for the requested language.
	#[error("Unknown locale: {0}")]
	UnknownLocale(String),
}
