#![forbid(unsafe_code)]

//! Transition classification.
//!
//! Maps a move between logical states to the name of the animation marker
//! the host should apply for it.
//!
//! | old → new | marker |
//! |-----------|--------|
//! | Init → Checked | `unchecked_to_checked` |
//! | Init → Indeterminate | `checked_to_indeterminate` if checked, else `unchecked_to_indeterminate` |
//! | Init → Unchecked | none |
//! | Unchecked → Checked | `unchecked_to_checked` |
//! | Unchecked → other | `unchecked_to_indeterminate` |
//! | Checked → Unchecked | `checked_to_unchecked` |
//! | Checked → other | `checked_to_indeterminate` |
//! | Indeterminate → Checked | `indeterminate_to_checked` |
//! | Indeterminate → other | `indeterminate_to_unchecked` |
//!
//! Callers skip classification entirely when `old == new`.

use std::borrow::Cow;

use tristate_core::AnimationMode;

/// Logical state as last seen by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckState {
    /// Before any classified transition. Never re-entered.
    #[default]
    Init,
    Checked,
    Unchecked,
    Indeterminate,
}

impl CheckState {
    /// The resting state for a concrete `checked` value.
    #[must_use]
    pub const fn from_checked(checked: bool) -> Self {
        if checked { Self::Checked } else { Self::Unchecked }
    }
}

/// An animated move between two logical states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    UncheckedToChecked,
    UncheckedToIndeterminate,
    CheckedToUnchecked,
    CheckedToIndeterminate,
    IndeterminateToChecked,
    IndeterminateToUnchecked,
}

impl Transition {
    /// Kebab-case suffix used to build marker names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UncheckedToChecked => "unchecked-checked",
            Self::UncheckedToIndeterminate => "unchecked-indeterminate",
            Self::CheckedToUnchecked => "checked-unchecked",
            Self::CheckedToIndeterminate => "checked-indeterminate",
            Self::IndeterminateToChecked => "indeterminate-checked",
            Self::IndeterminateToUnchecked => "indeterminate-unchecked",
        }
    }

    /// The animated move for `old → new`, if it has one.
    ///
    /// `checked` only matters when leaving [`CheckState::Init`] for
    /// [`CheckState::Indeterminate`].
    #[must_use]
    pub fn between(old: CheckState, new: CheckState, checked: bool) -> Option<Self> {
        match old {
            CheckState::Init => match new {
                CheckState::Checked => Some(Self::UncheckedToChecked),
                CheckState::Indeterminate => Some(if checked {
                    Self::CheckedToIndeterminate
                } else {
                    Self::UncheckedToIndeterminate
                }),
                CheckState::Init | CheckState::Unchecked => None,
            },
            CheckState::Unchecked => Some(if new == CheckState::Checked {
                Self::UncheckedToChecked
            } else {
                Self::UncheckedToIndeterminate
            }),
            CheckState::Checked => Some(if new == CheckState::Unchecked {
                Self::CheckedToUnchecked
            } else {
                Self::CheckedToIndeterminate
            }),
            CheckState::Indeterminate => Some(if new == CheckState::Checked {
                Self::IndeterminateToChecked
            } else {
                Self::IndeterminateToUnchecked
            }),
        }
    }
}

/// Marker names for each animated transition.
///
/// Names are `Cow` so a table can be a compile-time constant or built at
/// runtime, e.g. with [`with_prefix`](Self::with_prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionClasses {
    pub unchecked_to_checked: Cow<'static, str>,
    pub unchecked_to_indeterminate: Cow<'static, str>,
    pub checked_to_unchecked: Cow<'static, str>,
    pub checked_to_indeterminate: Cow<'static, str>,
    pub indeterminate_to_checked: Cow<'static, str>,
    pub indeterminate_to_unchecked: Cow<'static, str>,
}

impl TransitionClasses {
    /// Material-style marker names.
    pub const MDC: Self = Self {
        unchecked_to_checked: Cow::Borrowed("mdc-checkbox--anim-unchecked-checked"),
        unchecked_to_indeterminate: Cow::Borrowed("mdc-checkbox--anim-unchecked-indeterminate"),
        checked_to_unchecked: Cow::Borrowed("mdc-checkbox--anim-checked-unchecked"),
        checked_to_indeterminate: Cow::Borrowed("mdc-checkbox--anim-checked-indeterminate"),
        indeterminate_to_checked: Cow::Borrowed("mdc-checkbox--anim-indeterminate-checked"),
        indeterminate_to_unchecked: Cow::Borrowed("mdc-checkbox--anim-indeterminate-unchecked"),
    };

    /// A table whose names are `prefix` followed by [`Transition::as_str`].
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        let name = |t: Transition| Cow::Owned(format!("{prefix}{}", t.as_str()));
        Self {
            unchecked_to_checked: name(Transition::UncheckedToChecked),
            unchecked_to_indeterminate: name(Transition::UncheckedToIndeterminate),
            checked_to_unchecked: name(Transition::CheckedToUnchecked),
            checked_to_indeterminate: name(Transition::CheckedToIndeterminate),
            indeterminate_to_checked: name(Transition::IndeterminateToChecked),
            indeterminate_to_unchecked: name(Transition::IndeterminateToUnchecked),
        }
    }

    /// The marker name for `transition`.
    #[must_use]
    pub fn name(&self, transition: Transition) -> &Cow<'static, str> {
        match transition {
            Transition::UncheckedToChecked => &self.unchecked_to_checked,
            Transition::UncheckedToIndeterminate => &self.unchecked_to_indeterminate,
            Transition::CheckedToUnchecked => &self.checked_to_unchecked,
            Transition::CheckedToIndeterminate => &self.checked_to_indeterminate,
            Transition::IndeterminateToChecked => &self.indeterminate_to_checked,
            Transition::IndeterminateToUnchecked => &self.indeterminate_to_unchecked,
        }
    }

    /// Owned marker for `old → new`; `None` when animations are disabled or
    /// the move has no marker. Cloning a borrowed name does not allocate.
    #[must_use]
    pub fn marker(
        &self,
        old: CheckState,
        new: CheckState,
        checked: bool,
        mode: AnimationMode,
    ) -> Option<Cow<'static, str>> {
        if mode.is_disabled() {
            return None;
        }
        Transition::between(old, new, checked).map(|t| self.name(t).clone())
    }
}

impl Default for TransitionClasses {
    fn default() -> Self {
        Self::MDC
    }
}

/// Pick the marker name for `old → new`.
///
/// `checked` is the current checked value; it only matters when leaving
/// [`CheckState::Init`] for [`CheckState::Indeterminate`]. Returns `None` when
/// animations are disabled or the move has no marker.
#[must_use]
pub fn classify<'a>(
    old: CheckState,
    new: CheckState,
    checked: bool,
    classes: &'a TransitionClasses,
    mode: AnimationMode,
) -> Option<&'a str> {
    if mode.is_disabled() {
        return None;
    }
    Transition::between(old, new, checked).map(|t| &**classes.name(t))
}
