//! Macros for reducing boilerplate in builder-style configuration.

/// Generates a builder-style setter method for a field.
///
/// # Usage
///
/// ```ignore
/// // When method name matches field name:
/// builder_field!(searchable, bool);
/// // Generates: pub fn searchable(mut self, value: bool) -> Self { self.searchable = value; self }
///
/// // When method name differs from field name:
/// builder_field!(multi_select, mode, SelectionMode);
/// ```
#[macro_export]
macro_rules! builder_field {
    // Method name matches field name
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = value;
            self
        }
    };
    // Method name differs from field name
    ($method:ident, $field:ident, $type:ty) => {
        pub fn $method(mut self, value: $type) -> Self {
            self.$field = value;
            self
        }
    };
}

/// Generates a builder-style setter method for an Option field.
///
/// # Usage
///
/// ```ignore
/// builder_option!(width, f32);
/// // Generates: pub fn width(mut self, value: f32) -> Self { self.width = Some(value); self }
/// ```
#[macro_export]
macro_rules! builder_option {
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = Some(value);
            self
        }
    };
    ($method:ident, $field:ident, $type:ty) => {
        pub fn $method(mut self, value: $type) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Generates a callback setter on a widget generic over `Message`, storing the
/// closure in a [`crate::Callback`] field of the same name.
///
/// # Usage
///
/// ```ignore
/// // For callbacks with no parameters:
/// callback_setter!(on_blur);
/// // Generates: pub fn on_blur<F>(mut self, f: F) -> Self where F: Fn() -> Message + 'static
///
/// // For callbacks with a parameter:
/// callback_setter!(on_add_new, String);
/// // Generates: pub fn on_add_new<F>(mut self, f: F) -> Self
/// //     where F: Fn(String) -> Message + 'static
/// ```
#[macro_export]
macro_rules! callback_setter {
    // Callback with no parameters
    ($name:ident) => {
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn() -> Message + 'static,
        {
            self.$name = $crate::Callback::new(move |()| f());
            self
        }
    };
    // Callback with single parameter
    ($name:ident, $param:ty) => {
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn($param) -> Message + 'static,
        {
            self.$name = $crate::Callback::new(f);
            self
        }
    };
}
