//! URL query parameter stores
//!
//! A [`QueryParamStore`] is the only place Trellis touches the URL. Coordinators
//! receive one by injection, so the browser-backed store and the in-memory
//! store are interchangeable.
//!
//! - [`MemoryQueryStore`]: in-memory URL with a navigation log (native targets, tests, SSR)
//! - `HistoryQueryStore`: `window.location` + `history.pushState` (wasm32 only)
//!
//! ## Example
//!
//! ```
//! use trellis_query::{MemoryQueryStore, QueryParamStore};
//! use trellis_types::QueryUpdate;
//!
//! let store = MemoryQueryStore::from_url("/users?page=3&q=ann");
//! store.update(&QueryUpdate::new().remove("page")).unwrap();
//!
//! assert_eq!(store.url(), "/users?q=ann");
//! assert_eq!(store.read().get_str("q"), Some("ann"));
//! ```

#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod store;

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub mod history;

pub use codec::{build_url, parse_query, split_url, to_query_string};
pub use error::QueryError;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use history::HistoryQueryStore;
pub use store::{MemoryQueryStore, QueryParamStore};
