//! Active-language translation lookup

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EN_EN_RESOURCES;
use crate::catalog::MessageCatalog;
use crate::error::I18nError;

/// Anything that can resolve a message key to display text.
///
/// Implementations fall back to returning the key itself.
pub trait Translate {
	/// Translate a key.
	fn t(&self, key: &str) -> String;
}

impl<T: Translate + ?Sized> Translate for &T {
	fn t(&self, key: &str) -> String {
		(**self).t(key)
	}
}

/// Bootstrap settings for [`Localization`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationSettings {
	/// Language active after startup
	pub initial_lang: String,
	/// Language consulted when the active one lacks a key
	pub fallback_lng: String,
	/// Namespace used for keys without a `ns:` prefix
	pub default_ns: String,
}

impl Default for LocalizationSettings {
	fn default() -> Self {
		Self {
			initial_lang: "en-EN".to_string(),
			fallback_lng: "en-EN".to_string(),
			default_ns: "translation".to_string(),
		}
	}
}

/// Registered catalogs plus the active language.
#[derive(Debug, Clone)]
pub struct Localization {
	settings: LocalizationSettings,
	language: String,
	// language -> namespace -> catalog
	catalogs: HashMap<String, HashMap<String, MessageCatalog>>,
}

impl Localization {
	/// Create a localization with no catalogs.
	pub fn new(settings: LocalizationSettings) -> Self {
		Self {
			language: settings.initial_lang.clone(),
			settings,
			catalogs: HashMap::new(),
		}
	}

	/// Default settings with the bundled `en-EN` resource loaded.
	///
	/// # Errors
	///
	/// Returns [`I18nError::InvalidResource`] if the bundled resource is
	/// malformed.
	pub fn bundled() -> Result<Self, I18nError> {
		Self::with_bundled(LocalizationSettings::default())
	}

	/// Given settings with the bundled `en-EN` resource loaded.
	///
	/// # Errors
	///
	/// Returns [`I18nError::InvalidResource`] if the bundled resource is
	/// malformed.
	pub fn with_bundled(settings: LocalizationSettings) -> Result<Self, I18nError> {
		let mut localization = Self::new(settings);
		localization.add_resources("en-EN", EN_EN_RESOURCES)?;
		Ok(localization)
	}

	/// Load a resource whose top-level keys are namespaces.
	///
	/// Catalogs already registered for the same language and namespace are
	/// extended, later keys winning.
	///
	/// # Errors
	///
	/// Returns [`I18nError::InvalidResource`] when `json` does not parse or is
	/// not an object of namespaces.
	pub fn add_resources(&mut self, language: &str, json: &str) -> Result<(), I18nError> {
		let tree: Value = serde_json::from_str(json)?;
		let Value::Object(namespaces) = tree else {
			return Err(I18nError::InvalidResource(serde::de::Error::custom(
				"resource root must be an object of namespaces",
			)));
		};

		for (namespace, messages) in &namespaces {
			self.add_catalog(MessageCatalog::from_value(language, namespace, messages));
		}
		tracing::debug!(
			language,
			namespaces = namespaces.len(),
			"translation resources loaded"
		);
		Ok(())
	}

	/// Register a catalog under its own locale and namespace.
	pub fn add_catalog(&mut self, catalog: MessageCatalog) {
		let namespaces = self
			.catalogs
			.entry(catalog.locale().to_string())
			.or_default();
		match namespaces.get_mut(catalog.namespace()) {
			Some(existing) => existing.extend(catalog),
			None => {
				namespaces.insert(catalog.namespace().to_string(), catalog);
			}
		}
	}

	/// Active language.
	pub fn language(&self) -> &str {
		&self.language
	}

	/// Settings this localization was created with.
	pub fn settings(&self) -> &LocalizationSettings {
		&self.settings
	}

	/// Languages with at least one catalog.
	pub fn languages(&self) -> Vec<&str> {
		let mut languages: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
		languages.sort_unstable();
		languages
	}

	/// Switch the active language.
	///
	/// # Errors
	///
	/// Returns [`I18nError::UnknownLocale`] when no catalog is registered for
	/// `language`; the active language is left unchanged.
	pub fn change_language(&mut self, language: &str) -> Result<(), I18nError> {
		if !self.catalogs.contains_key(language) {
			return Err(I18nError::UnknownLocale(language.to_string()));
		}
		tracing::debug!(from = %self.language, to = language, "language changed");
		self.language = language.to_string();
		Ok(())
	}

	/// Translate a key and substitute `{{name}}` placeholders.
	pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
		interpolate(&self.t(key), args)
	}

	fn lookup(&self, language: &str, namespace: &str, key: &str) -> Option<&str> {
		self.catalogs.get(language)?.get(namespace)?.get(key)
	}

	fn resolve(&self, key: &str) -> Option<&str> {
		let (namespace, key) = match key.split_once(':') {
			Some((ns, rest)) if !ns.is_empty() => (ns, rest),
			_ => (self.settings.default_ns.as_str(), key),
		};

		if !self.catalogs.contains_key(&self.language) {
			tracing::warn!(language = %self.language, "no translation catalog for active language");
		}

		self.lookup(&self.language, namespace, key).or_else(|| {
			if self.settings.fallback_lng == self.language {
				None
			} else {
				self.lookup(&self.settings.fallback_lng, namespace, key)
			}
		})
	}
}

impl Default for Localization {
	fn default() -> Self {
		Self::new(LocalizationSettings::default())
	}
}

impl Translate for Localization {
	fn t(&self, key: &str) -> String {
		self.resolve(key)
			.map(str::to_string)
			.unwrap_or_else(|| key.to_string())
	}
}

impl Translate for MessageCatalog {
	fn t(&self, key: &str) -> String {
		self.get(key)
			.map(str::to_string)
			.unwrap_or_else(|| key.to_string())
	}
}

/// Replace `{{name}}` placeholders with their values.
///
/// Whitespace inside the braces is ignored. Unknown placeholders stay as they
/// are. Values are inserted verbatim, without escaping.
///
/// ```
/// use trellis_i18n::interpolate;
///
/// assert_eq!(
///     interpolate("Hello {{ name }}, {{missing}}", &[("name", "Ann")]),
///     "Hello Ann, {{missing}}"
/// );
/// ```
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
	let mut out = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(start) = rest.find("{{") {
		out.push_str(&rest[..start]);
		let after_open = &rest[start + 2..];
		let Some(end) = after_open.find("}}") else {
			out.push_str(&rest[start..]);
			return out;
		};

		let name = after_open[..end].trim();
		match args.iter().find(|(k, _)| *k == name) {
			Some((_, value)) => out.push_str(value),
			None => out.push_str(&rest[start..start + 2 + end + 2]),
		}
		rest = &after_open[end + 2..];
	}

	out.push_str(rest);
	out
}
