//! URL-synchronized filter forms
//!
//! [`parse_filters`] turns query parameters into typed form values and
//! [`PageFilter`] keeps a filter form and the URL in sync in either
//! live-update or explicit-submit mode.

#![warn(missing_docs)]

pub mod error;
pub mod options;
pub mod page_filter;
pub mod parser;

pub use error::FilterError;
pub use options::{FilterActions, FilterOptions, PAGE_KEY, PageReset, SubmissionMode};
pub use page_filter::{PageFilter, commit_update, reset_update};
pub use parser::{
	FieldConfig, FieldKind, ParseOptions, parse_bool, parse_date, parse_filters, parse_number,
};
