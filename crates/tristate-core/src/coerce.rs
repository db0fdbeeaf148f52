#![forbid(unsafe_code)]

//! Permissive boolean coercion for property setters and form writes.
//!
//! Form frameworks hand controls loosely typed values. Nothing here rejects
//! input: absent values and `false` become `false`, everything else becomes
//! `true`.
//!
//! ```
//! use tristate_core::coerce::{BooleanInput, FormValue};
//!
//! assert!(!None::<bool>.coerce_bool());
//! assert!("false-ish".coerce_bool());
//! assert!(FormValue::Number(0.0).coerce_bool());
//! assert!(!FormValue::Null.coerce_bool());
//! ```

use core::fmt;

/// A value that can be coerced to a boolean.
pub trait BooleanInput {
    /// Coerce to `bool`. Null/absent/`false` map to `false`, everything else
    /// to `true`.
    fn coerce_bool(&self) -> bool;
}

impl BooleanInput for bool {
    fn coerce_bool(&self) -> bool {
        *self
    }
}

impl BooleanInput for () {
    fn coerce_bool(&self) -> bool {
        false
    }
}

impl<T: BooleanInput> BooleanInput for Option<T> {
    fn coerce_bool(&self) -> bool {
        self.as_ref().is_some_and(BooleanInput::coerce_bool)
    }
}

impl<T: BooleanInput + ?Sized> BooleanInput for &T {
    fn coerce_bool(&self) -> bool {
        (**self).coerce_bool()
    }
}

impl BooleanInput for str {
    fn coerce_bool(&self) -> bool {
        true
    }
}

impl BooleanInput for String {
    fn coerce_bool(&self) -> bool {
        true
    }
}

macro_rules! present_is_true {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BooleanInput for $ty {
                fn coerce_bool(&self) -> bool {
                    true
                }
            }
        )*
    };
}

present_is_true!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char);

#[cfg(feature = "serde")]
impl BooleanInput for serde_json::Value {
    fn coerce_bool(&self) -> bool {
        !matches!(self, Self::Null | Self::Bool(false))
    }
}

/// Loosely typed value written into a control by a form layer.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FormValue {
    /// No value (null / undefined).
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FormValue {
    /// Returns true for [`FormValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl BooleanInput for FormValue {
    fn coerce_bool(&self) -> bool {
        !matches!(self, Self::Null | Self::Bool(false))
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FormValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
