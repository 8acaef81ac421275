//! Required-field validation.
//!
//! A blur with an empty value flags the field and shows the message. The
//! message may auto-hide (the owning dropdown schedules that), is shown again
//! on every blur while the value stays empty, and everything clears once the
//! caller supplies a value.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    required: bool,
    message: String,
    has_error: bool,
    is_visible: bool,
}

impl Validation {
    pub fn new(required: bool, message: impl Into<String>) -> Self {
        Self {
            required,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Message to show, if any.
    pub fn error_message(&self) -> Option<&str> {
        (self.has_error && self.is_visible).then_some(self.message.as_str())
    }

    /// Validate on blur. Returns true when the message became visible and an
    /// auto-hide should be scheduled.
    pub fn on_blur(&mut self, value_is_empty: bool) -> bool {
        if !self.required || !value_is_empty {
            return false;
        }
        self.has_error = true;
        self.is_visible = true;
        true
    }

    /// The caller supplied a new value.
    pub fn on_value_change(&mut self, value_is_empty: bool) -> bool {
        if value_is_empty || !self.has_error {
            return false;
        }
        self.clear();
        true
    }

    /// Hide the message but keep the error flag.
    pub fn hide(&mut self) {
        self.is_visible = false;
    }

    pub fn clear(&mut self) {
        self.has_error = false;
        self.is_visible = false;
    }
}
