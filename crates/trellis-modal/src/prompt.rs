//! Unsaved-changes tracking

/// Tracks whether a form holds unsaved edits and whether it is being
/// submitted.
///
/// Leaving a dirty form should warn, unless the edits are on their way to
/// the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnsavedPrompt {
	dirty: bool,
	submitting: bool,
}

impl UnsavedPrompt {
	/// A clean, idle tracker.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a field change.
	pub fn mark_dirty(&mut self) {
		self.dirty = true;
	}

	/// Sets the submitting flag.
	pub fn set_submitting(&mut self, submitting: bool) {
		self.submitting = submitting;
	}

	/// Whether a field changed since the last reset.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Whether a submission is in progress.
	pub fn is_submitting(&self) -> bool {
		self.submitting
	}

	/// Whether leaving now should ask for confirmation.
	pub fn should_prompt(&self) -> bool {
		self.dirty && !self.submitting
	}

	/// Back to clean and idle.
	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(false, false, false)]
	#[case(true, false, true)]
	#[case(true, true, false)]
	#[case(false, true, false)]
	fn test_should_prompt(#[case] dirty: bool, #[case] submitting: bool, #[case] expected: bool) {
		let mut prompt = UnsavedPrompt::new();
		if dirty {
			prompt.mark_dirty();
		}
		prompt.set_submitting(submitting);

		assert_eq!(prompt.should_prompt(), expected);
	}

	#[rstest]
	fn test_reset_clears_both_flags() {
		let mut prompt = UnsavedPrompt::new();
		prompt.mark_dirty();
		prompt.set_submitting(true);

		prompt.reset();

		assert_eq!(prompt, UnsavedPrompt::new());
	}
}
