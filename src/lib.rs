//! # Trellis
//!
//! Building blocks for admin panel frontends: filter forms whose state lives
//! in the URL query string, form modals with unsaved-changes tracking, and a
//! small localization layer.
//!
//! Everything here is UI-framework agnostic. Rendering is left to the
//! application; the crates own the state transitions and the URL plumbing.
//!
//! ## Feature Flags
//!
//! - `filters` - [`PageFilter`] and the query parameter stores
//! - `modal` - [`FormModal`]
//! - `settings` - settings screen modals (enables `filters` and `modal`)
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use trellis::prelude::*;
//!
//! let store = Arc::new(MemoryQueryStore::from_url("/users?active=true&age=30"));
//! let form = FormStore::new()
//!     .field(FieldSpec::new("active"))
//!     .field(FieldSpec::new("age"));
//! let config = FieldConfig::new()
//!     .with("active", FieldKind::Boolean)
//!     .with("age", FieldKind::Number);
//!
//! let mut filter = PageFilter::new(form, store.clone(), config, FilterOptions::new());
//! filter.initialize();
//! filter.change_field("active", Some(FieldValue::Bool(false))).unwrap();
//!
//! assert_eq!(store.url(), "/users?age=30");
//! ```

#![warn(missing_docs)]

#[cfg(feature = "settings")]
pub mod settings;

// Crate re-exports
pub use trellis_forms as forms;
pub use trellis_i18n as i18n;
pub use trellis_types as types;

#[cfg(feature = "filters")]
pub use trellis_filters as filters;
#[cfg(feature = "filters")]
pub use trellis_query as query;

#[cfg(feature = "modal")]
pub use trellis_modal as modal;

// Shared value model
pub use trellis_types::{
	Callback, FieldValue, FormValues, ParamChange, QueryParams, QueryUpdate, QueryValue,
};

// Forms
pub use trellis_forms::{FieldSpec, FormController, FormStore, Rule, ValidationErrors};

// Localization
pub use trellis_i18n::{I18nError, Localization, LocalizationSettings, MessageCatalog, Translate};

// Filters
#[cfg(feature = "filters")]
pub use trellis_filters::{
	FieldConfig, FieldKind, FilterActions, FilterError, FilterOptions, PageFilter, PageReset,
	ParseOptions, SubmissionMode, parse_filters,
};
#[cfg(feature = "filters")]
pub use trellis_query::{MemoryQueryStore, QueryError, QueryParamStore};
#[cfg(all(feature = "filters", target_family = "wasm", target_os = "unknown"))]
pub use trellis_query::HistoryQueryStore;

// Modal
#[cfg(feature = "modal")]
pub use trellis_modal::{FormModal, ModalError, ModalFooter, ModalOptions, ModalState, UnsavedPrompt};

// Settings
#[cfg(feature = "settings")]
pub use settings::{ModalRequest, UserRoleModal};

/// Commonly used types.
pub mod prelude {
	// Always available
	pub use crate::{
		Callback, FieldSpec, FieldValue, FormController, FormStore, FormValues, Localization,
		QueryParams, QueryUpdate, Translate,
	};

	#[cfg(feature = "filters")]
	pub use crate::{
		FieldConfig, FieldKind, FilterOptions, MemoryQueryStore, PageFilter, PageReset,
		ParseOptions, QueryParamStore,
	};

	#[cfg(feature = "modal")]
	pub use crate::{FormModal, ModalOptions, ModalState};

	#[cfg(feature = "settings")]
	pub use crate::{ModalRequest, UserRoleModal};
}
