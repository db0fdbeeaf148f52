#![forbid(unsafe_code)]

//! Public change events.

/// Change record emitted after a user interaction flips the checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxChange {
    /// Id of the checkbox that changed.
    pub source: String,
    /// The new `checked` value.
    pub checked: bool,
}

/// Builds the change event from the source id and the new checked value.
pub type ChangeEventFactory<E> = fn(&str, bool) -> E;

/// The default factory, producing [`CheckboxChange`].
#[must_use]
pub fn checkbox_change(source: &str, checked: bool) -> CheckboxChange {
    CheckboxChange {
        source: source.to_owned(),
        checked,
    }
}
