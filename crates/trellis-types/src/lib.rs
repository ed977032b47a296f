//! Shared value types for Trellis
//!
//! This crate holds the data model every other Trellis crate speaks:
//!
//! - [`FieldValue`] / [`FormValues`]: typed form field values as held by a form controller
//! - [`QueryValue`] / [`QueryParams`]: the URL query string as a key → string(s) mapping
//! - [`QueryUpdate`]: a partial, merge-style write to the query string
//! - [`Callback`]: cloneable optional-callback wrapper used by the coordinators
//!
//! ## Example
//!
//! ```
//! use trellis_types::{FieldValue, FormValues, QueryParams, QueryUpdate};
//!
//! let values = FormValues::new()
//!     .with("active", true)
//!     .with("age", 30_i64);
//! assert_eq!(values.get("age"), Some(&FieldValue::Number(30.0)));
//!
//! let mut params = QueryParams::new();
//! params.insert("page", "2");
//! params.apply(&QueryUpdate::new().remove("page").set("q", "rust"));
//! assert_eq!(params.get_str("q"), Some("rust"));
//! assert!(!params.contains_key("page"));
//! ```

#![warn(missing_docs)]

pub mod callback;
pub mod query;
pub mod value;

pub use callback::Callback;
pub use query::{ParamChange, QueryParams, QueryUpdate, QueryValue};
pub use value::{FieldValue, FormValues};
