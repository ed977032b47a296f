//! Translation lookup for Trellis
//!
//! Messages live in per-locale, per-namespace [`MessageCatalog`]s loaded from
//! nested JSON resources. [`Localization`] holds the active language and falls
//! back to a configured language, then to the key itself.
//!
//! ## Example
//!
//! ```
//! use trellis_i18n::{Localization, Translate};
//!
//! let mut i18n = Localization::bundled().unwrap();
//! assert_eq!(i18n.t("default.saveTitle"), "Save");
//! assert_eq!(i18n.t("missing.key"), "missing.key");
//!
//! assert!(i18n.change_language("xx-XX").is_err());
//! assert_eq!(i18n.language(), "en-EN");
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod localization;

pub use catalog::MessageCatalog;
pub use error::I18nError;
pub use localization::{Localization, LocalizationSettings, Translate, interpolate};

/// Bundled `en-EN` resource, one top-level key per namespace.
pub const EN_EN_RESOURCES: &str = include_str!("../resources/en-EN.json");
