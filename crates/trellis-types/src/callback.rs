//! Cloneable callback wrapper
//!
//! Coordinators accept optional user callbacks (`on_submit`, `on_reset`,
//! `on_finish`, `on_close`). [`Callback`] wraps the closure in an `Arc` so the
//! owning configuration stays `Clone`.
//!
//! ## Example
//!
//! ```
//! use trellis_types::Callback;
//!
//! let double = Callback::new(|x: i32| x * 2);
//! let copy = double.clone();
//! assert_eq!(copy.call(21), 42);
//! ```

use std::sync::Arc;

/// A type-safe, cloneable callback.
///
/// ## Type Parameters
///
/// - `Args`: The argument type the callback receives (defaults to `()`)
/// - `Ret`: The return type of the callback (defaults to `()`)
///
/// In the browser the closure has no thread bounds, so it may capture
/// `JsValue`s and other `!Send` handles.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub struct Callback<Args = (), Ret = ()> {
	inner: Arc<dyn Fn(Args) -> Ret + 'static>,
}

/// A type-safe, cloneable callback.
///
/// ## Type Parameters
///
/// - `Args`: The argument type the callback receives (defaults to `()`)
/// - `Ret`: The return type of the callback (defaults to `()`)
///
/// Outside the browser the closure must be `Send + Sync`, so coordinators
/// holding it can move between threads.
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub struct Callback<Args = (), Ret = ()> {
	inner: Arc<dyn Fn(Args) -> Ret + Send + Sync + 'static>,
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Arc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + Send + Sync + 'static,
	{
		Self { inner: Arc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> std::fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}
