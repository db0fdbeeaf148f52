#![forbid(unsafe_code)]

//! Cross-cutting control capabilities.
//!
//! Each capability is a small trait. Controls hold a [`Capabilities`] bundle
//! and implement the traits by delegating to it, so hosts can treat any
//! control generically (e.g. "every `Colorable` child gets the theme color").

use crate::options::ThemeColor;

/// A control that is drawn with a theme palette.
pub trait Colorable {
    /// The color in effect.
    fn color(&self) -> ThemeColor;

    /// Set the color; `None` restores [`default_color`](Self::default_color).
    fn set_color(&mut self, color: Option<ThemeColor>);

    /// Color used when none is set explicitly.
    fn default_color(&self) -> ThemeColor;
}

/// A control that can be disabled.
pub trait Disableable {
    fn is_disabled(&self) -> bool;
}

/// A control whose ripple feedback can be switched off.
pub trait RippleDisableable {
    fn disable_ripple(&self) -> bool;

    fn set_disable_ripple(&mut self, disable: bool);
}

/// A control that participates in sequential keyboard focus.
pub trait TabIndexable {
    /// The effective tab index. Disabled controls report `-1`.
    fn tab_index(&self) -> i32;

    fn set_tab_index(&mut self, index: i32);
}

/// Orthogonal presentation flags shared by form controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    color: ThemeColor,
    default_color: ThemeColor,
    disable_ripple: bool,
    tab_index: i32,
}

impl Capabilities {
    /// Create a bundle whose current and default color are `color`.
    #[must_use]
    pub fn new(color: ThemeColor) -> Self {
        Self {
            color,
            default_color: color,
            disable_ripple: false,
            tab_index: 0,
        }
    }

    #[must_use]
    pub fn with_tab_index(mut self, index: i32) -> Self {
        self.tab_index = index;
        self
    }

    /// The stored tab index, ignoring any disabled state.
    #[must_use]
    pub fn raw_tab_index(&self) -> i32 {
        self.tab_index
    }
}

impl Colorable for Capabilities {
    fn color(&self) -> ThemeColor {
        self.color
    }

    fn set_color(&mut self, color: Option<ThemeColor>) {
        self.color = color.unwrap_or(self.default_color);
    }

    fn default_color(&self) -> ThemeColor {
        self.default_color
    }
}

impl RippleDisableable for Capabilities {
    fn disable_ripple(&self) -> bool {
        self.disable_ripple
    }

    fn set_disable_ripple(&mut self, disable: bool) {
        self.disable_ripple = disable;
    }
}

impl TabIndexable for Capabilities {
    fn tab_index(&self) -> i32 {
        self.tab_index
    }

    fn set_tab_index(&mut self, index: i32) {
        self.tab_index = index;
    }
}

/// Parse a host `tabindex` attribute.
///
/// Reads an optional sign and the leading digits after any whitespace;
/// anything unparseable (or absent) yields `0`.
///
/// ```
/// use tristate_core::capability::parse_tab_index;
///
/// assert_eq!(parse_tab_index(Some("3")), 3);
/// assert_eq!(parse_tab_index(Some(" -1")), -1);
/// assert_eq!(parse_tab_index(Some("2px")), 2);
/// assert_eq!(parse_tab_index(Some("abc")), 0);
/// assert_eq!(parse_tab_index(None), 0);
/// ```
#[must_use]
pub fn parse_tab_index(attr: Option<&str>) -> i32 {
    let Some(attr) = attr else {
        return 0;
    };
    let s = attr.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let Ok(value) = digits[..end].parse::<i32>() else {
        return 0;
    };
    if negative { -value } else { value }
}
