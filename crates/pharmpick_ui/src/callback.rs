//! Callback abstraction for dropdown outputs
//!
//! The dropdown reports selections, add-new requests, blurs and open changes
//! through callbacks that map the event to the caller's message type. Instead
//! of writing `Option<Box<dyn Fn(T) -> M>>` for each of them, the widget holds
//! a `Callback<T, M>`.
//!
//! # Examples
//!
//! ```ignore
//! use pharmpick_ui::Callback;
//!
//! enum Msg {
//!     SupplierChanged(SelectionValue),
//! }
//!
//! let on_change = Callback::new(Msg::SupplierChanged);
//! if let Some(msg) = on_change.call(SelectionValue::single("sup-12")) {
//!     // Route msg to the form
//! }
//! ```

use std::fmt;

/// A callback wrapper that encapsulates an optional event handler.
///
/// # Type Parameters
///
/// - `T`: The input type for the callback (selection value, search term, ...)
/// - `M`: The message type returned by the callback
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `Some(message)` if the callback is set, or `None` if no callback is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

/// A callback that takes no parameters.
pub type Callback0<M> = Callback<(), M>;

impl<M> Callback0<M> {
    /// Call the callback without any parameters.
    ///
    /// This is a convenience method that's equivalent to `call(())`.
    pub fn emit(&self) -> Option<M> {
        self.call(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_set_callback() {
        let cb: Callback<u32, String> = Callback::new(|v| format!("got {v}"));
        assert!(cb.is_some());
        assert_eq!(cb.call(3), Some("got 3".to_string()));
    }

    #[test]
    fn test_unset_callback_returns_none() {
        let cb: Callback<u32, String> = Callback::none();
        assert!(cb.is_none());
        assert_eq!(cb.call(3), None);
    }

    #[test]
    fn test_emit_unit_callback() {
        let cb: Callback0<&'static str> = Callback::new(|()| "blurred");
        assert_eq!(cb.emit(), Some("blurred"));
    }
}
