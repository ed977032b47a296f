//! Modal errors

use trellis_forms::ValidationErrors;

use crate::modal::ModalState;

/// Errors surfaced by [`FormModal`](crate::FormModal).
#[derive(Debug, thiserror::Error)]
pub enum ModalError {
	/// The form did not validate; `on_finish` was not called.
	#[error(transparent)]
	Validation(#[from] ValidationErrors),

	/// Submit was called outside `OpenClean` / `OpenDirty`.
	#[error("cannot submit a modal in state {0:?}")]
	NotOpen(ModalState),
}
