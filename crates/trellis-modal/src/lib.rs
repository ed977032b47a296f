//! Form modal coordination
//!
//! [`FormModal`] wires a form controller into a modal dialog: validated
//! submission, cancel, and clean-up after the close animation. The
//! [`UnsavedPrompt`] tracker decides whether leaving should warn about
//! unsaved edits.

#![warn(missing_docs)]

pub mod error;
pub mod modal;
pub mod options;
pub mod prompt;

pub use error::ModalError;
pub use modal::{FormModal, ModalState};
pub use options::{ModalFooter, ModalOptions};
pub use prompt::UnsavedPrompt;
