//! Settings screens
//!
//! Item modals on the settings screens are driven by the URL: the query keys
//! `action`, `entryType` and `entryId` say which modal is open, for which
//! entry. [`UserRoleModal`] is the user-role editor of the users screen.

use std::sync::Arc;

use trellis_forms::{FieldSpec, FormStore};
use trellis_i18n::Translate;
use trellis_modal::{FormModal, ModalOptions};
use trellis_query::{QueryError, QueryParamStore};
use trellis_types::{Callback, FormValues, QueryParams, QueryUpdate};

/// Query key holding the modal action.
pub const ACTION_KEY: &str = "action";
/// Query key holding the entry type.
pub const ENTRY_TYPE_KEY: &str = "entryType";
/// Query key holding the entry id.
pub const ENTRY_ID_KEY: &str = "entryId";

/// Entry type of the user-role modal.
pub const ENTRY_TYPE_USER_ROLE: &str = "user-role";

/// What an item modal is opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemModalAction {
	/// Creating a new entry.
	Create,
	/// Editing an existing entry.
	Edit,
}

impl ItemModalAction {
	/// Query string form.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Create => "create",
			Self::Edit => "edit",
		}
	}

	fn parse(raw: &str) -> Option<Self> {
		match raw {
			"create" => Some(Self::Create),
			"edit" => Some(Self::Edit),
			_ => None,
		}
	}
}

/// An item modal requested through the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalRequest {
	/// Create or edit
	pub action: ItemModalAction,
	/// Which modal, e.g. [`ENTRY_TYPE_USER_ROLE`]
	pub entry_type: Option<String>,
	/// Entry being edited
	pub entry_id: Option<String>,
}

impl ModalRequest {
	/// Reads the request from query parameters. `None` when no valid action
	/// is present.
	///
	/// ```
	/// use trellis::settings::{ItemModalAction, ModalRequest};
	/// use trellis::QueryParams;
	///
	/// let params = QueryParams::from_pairs([
	///     ("action", "edit"),
	///     ("entryType", "user-role"),
	///     ("entryId", "7"),
	/// ]);
	/// let request = ModalRequest::from_query(&params).unwrap();
	///
	/// assert_eq!(request.action, ItemModalAction::Edit);
	/// assert!(request.is_for("user-role"));
	/// assert_eq!(request.entry_id.as_deref(), Some("7"));
	/// ```
	pub fn from_query(params: &QueryParams) -> Option<Self> {
		let action = params.get_str(ACTION_KEY).and_then(ItemModalAction::parse)?;
		Some(Self {
			action,
			entry_type: params.get_str(ENTRY_TYPE_KEY).map(str::to_string),
			entry_id: params.get_str(ENTRY_ID_KEY).map(str::to_string),
		})
	}

	/// Request for an entry type.
	pub fn new(action: ItemModalAction, entry_type: impl Into<String>) -> Self {
		Self {
			action,
			entry_type: Some(entry_type.into()),
			entry_id: None,
		}
	}

	/// Sets the entry id.
	pub fn with_entry_id(mut self, id: impl Into<String>) -> Self {
		self.entry_id = Some(id.into());
		self
	}

	/// Whether this request targets `entry_type`.
	pub fn is_for(&self, entry_type: &str) -> bool {
		self.entry_type.as_deref() == Some(entry_type)
	}

	/// URL update opening this modal.
	pub fn to_update(&self) -> QueryUpdate {
		let update = QueryUpdate::new().set(ACTION_KEY, self.action.as_str());
		let update = match &self.entry_type {
			Some(t) => update.set(ENTRY_TYPE_KEY, t.as_str()),
			None => update.remove(ENTRY_TYPE_KEY),
		};
		match &self.entry_id {
			Some(id) => update.set(ENTRY_ID_KEY, id.as_str()),
			None => update.remove(ENTRY_ID_KEY),
		}
	}

	/// URL update closing any item modal.
	pub fn clear() -> QueryUpdate {
		QueryUpdate::new()
			.remove(ACTION_KEY)
			.remove(ENTRY_TYPE_KEY)
			.remove(ENTRY_ID_KEY)
	}
}

/// The "edit user role" modal of the users settings screen.
///
/// Visible while the URL requests the [`ENTRY_TYPE_USER_ROLE`] entry type.
pub struct UserRoleModal {
	modal: FormModal<FormStore>,
	store: Arc<dyn QueryParamStore>,
	request: Option<ModalRequest>,
}

impl UserRoleModal {
	/// Builds the modal and syncs its visibility with the URL.
	///
	/// `on_submitted` fires after a valid submission, `on_close` when the
	/// modal is cancelled.
	pub fn new(
		store: Arc<dyn QueryParamStore>,
		translator: &dyn Translate,
		on_submitted: Callback,
		on_close: Callback,
	) -> Self {
		let form = FormStore::new().field(FieldSpec::new("role"));
		let options = ModalOptions::new().with_title(translator.t("settingsUsers.editUserRole"));
		let on_finish = Callback::new(move |values: FormValues| {
			tracing::info!(role = ?values.get("role"), "user role submitted");
			on_submitted.call(());
		});
		let modal = FormModal::new(form, options)
			.with_on_finish(on_finish)
			.with_on_close(on_close);

		let mut this = Self {
			modal,
			store,
			request: None,
		};
		this.sync();
		this
	}

	/// Re-reads the URL and shows or hides the modal accordingly.
	///
	/// Hiding a shown modal also runs its close clean-up, so the next
	/// opening starts from blank fields.
	pub fn sync(&mut self) {
		let was_visible = self.modal.is_visible();
		self.request = ModalRequest::from_query(&self.store.read())
			.filter(|request| request.is_for(ENTRY_TYPE_USER_ROLE));
		if let Some(request) = &self.request
			&& request.action == ItemModalAction::Edit
		{
			tracing::debug!(entry_id = ?request.entry_id, "editing user role");
		}
		self.modal.set_visible(self.request.is_some());
		if was_visible && !self.modal.is_visible() {
			self.modal.after_close();
		}
	}

	/// Opens the modal by writing the request into the URL.
	///
	/// # Errors
	///
	/// Returns [`QueryError`] when the URL cannot be written.
	pub fn open(&mut self, request: &ModalRequest) -> Result<(), QueryError> {
		self.store.update(&request.to_update())?;
		self.sync();
		Ok(())
	}

	/// Closes the modal by clearing the request from the URL.
	///
	/// # Errors
	///
	/// Returns [`QueryError`] when the URL cannot be written.
	pub fn close(&mut self) -> Result<(), QueryError> {
		self.store.update(&ModalRequest::clear())?;
		self.sync();
		Ok(())
	}

	/// Whether the URL requests this modal.
	pub fn show_modal(&self) -> bool {
		self.request.is_some()
	}

	/// Whether an existing user is being edited.
	pub fn edit_mode(&self) -> bool {
		self.request
			.as_ref()
			.is_some_and(|r| r.action == ItemModalAction::Edit)
	}

	/// Id of the user being edited.
	pub fn entry_id(&self) -> Option<&str> {
		self.request.as_ref()?.entry_id.as_deref()
	}

	/// Label of the role field.
	pub fn role_label(translator: &dyn Translate) -> String {
		translator.t("settingsUsers.fieldRole")
	}

	/// The underlying form modal.
	pub fn modal(&self) -> &FormModal<FormStore> {
		&self.modal
	}

	/// The underlying form modal, mutably.
	pub fn modal_mut(&mut self) -> &mut FormModal<FormStore> {
		&mut self.modal
	}
}
