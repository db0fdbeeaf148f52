#![forbid(unsafe_code)]

//! Form binding.
//!
//! A form layer reads and drives a control through [`FormControl`]: it writes
//! values in, registers one change callback and one touched callback, and
//! toggles the disabled state. Re-registering a callback replaces the old one.

use core::fmt;

use tristate_core::FormValue;

/// Callback receiving the control's new value.
pub type OnChange = Box<dyn FnMut(bool)>;

/// Callback fired when the control is touched (blurred).
pub type OnTouched = Box<dyn FnMut()>;

/// Contract between a control and a form-management layer.
pub trait FormControl {
    /// Write a value from the model into the control. Never reported back
    /// through the change callback.
    fn write_value(&mut self, value: FormValue);

    /// Replace the change callback.
    fn register_on_change(&mut self, f: OnChange);

    /// Replace the touched callback.
    fn register_on_touched(&mut self, f: OnTouched);

    /// Enable or disable the control from the form layer.
    fn set_disabled_state(&mut self, disabled: bool);
}

/// The currently registered callbacks. Absent callbacks are no-ops.
#[derive(Default)]
pub struct FormCallbacks {
    on_change: Option<OnChange>,
    on_touched: Option<OnTouched>,
}

impl FormCallbacks {
    pub fn set_on_change(&mut self, f: OnChange) {
        self.on_change = Some(f);
    }

    pub fn set_on_touched(&mut self, f: OnTouched) {
        self.on_touched = Some(f);
    }

    pub fn notify_change(&mut self, value: bool) {
        if let Some(f) = self.on_change.as_mut() {
            f(value);
        }
    }

    pub fn notify_touched(&mut self) {
        if let Some(f) = self.on_touched.as_mut() {
            f();
        }
    }

    #[must_use]
    pub fn has_on_change(&self) -> bool {
        self.on_change.is_some()
    }

    #[must_use]
    pub fn has_on_touched(&self) -> bool {
        self.on_touched.is_some()
    }
}

impl fmt::Debug for FormCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormCallbacks")
            .field("on_change", &self.has_on_change())
            .field("on_touched", &self.has_on_touched())
            .finish()
    }
}
