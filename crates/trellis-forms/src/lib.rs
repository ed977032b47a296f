//! Form controller abstraction for Trellis
//!
//! Coordinators never own field state themselves; they talk to a
//! [`FormController`]. [`FormStore`] is the in-memory implementation: a field
//! registry holding initial and current values with simple validation rules.
//!
//! ## Example
//!
//! ```
//! use trellis_forms::{FieldSpec, FormController, FormStore};
//! use trellis_types::{FieldValue, FormValues};
//!
//! let mut form = FormStore::new()
//!     .field(FieldSpec::new("name").required())
//!     .field(FieldSpec::new("role"));
//!
//! assert!(form.validate().is_err());
//!
//! form.set_fields_value(FormValues::new().with("name", "Ann"));
//! let values = form.validate().unwrap();
//! assert_eq!(values.get("name"), Some(&FieldValue::text("Ann")));
//! assert_eq!(values.entry("role"), Some(&None));
//! ```

#![warn(missing_docs)]

pub mod controller;
pub mod store;
pub mod validation;

pub use controller::FormController;
pub use store::{FieldSpec, FormStore};
pub use validation::{Rule, ValidationErrors};
