#![forbid(unsafe_code)]

//! Host element contracts.
//!
//! The state machine never renders. It talks to the host UI through a
//! [`HostElement`]: a handle on the native toggle it mirrors and the element
//! that receives transient animation markers.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryHost`]: in-memory host for headless use and tests;
//! - [`DetachedHost`]: no toggle and no animation target.

use std::collections::BTreeSet;

/// Read/write handle on the rendered toggle.
pub trait NativeToggle {
    fn checked(&self) -> bool;
    fn set_checked(&mut self, checked: bool);
    fn indeterminate(&self) -> bool;
    fn set_indeterminate(&mut self, indeterminate: bool);
    fn focus(&mut self);
}

/// The rendering-layer handle a checkbox drives.
pub trait HostElement {
    /// The native toggle, if it has been rendered.
    fn native_toggle(&mut self) -> Option<&mut dyn NativeToggle>;

    /// Whether an element exists to receive animation markers.
    fn has_animation_target(&self) -> bool;

    /// Apply a marker to the animation target.
    fn add_marker(&mut self, marker: &str);

    /// Remove a marker. Removing an absent marker is a no-op.
    fn remove_marker(&mut self, marker: &str);
}

/// Host with nothing rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetachedHost;

impl HostElement for DetachedHost {
    fn native_toggle(&mut self) -> Option<&mut dyn NativeToggle> {
        None
    }

    fn has_animation_target(&self) -> bool {
        false
    }

    fn add_marker(&mut self, _marker: &str) {}

    fn remove_marker(&mut self, _marker: &str) {}
}

/// In-memory native toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryToggle {
    pub checked: bool,
    pub indeterminate: bool,
    /// Number of times `focus` was called.
    pub focus_count: usize,
}

impl NativeToggle for MemoryToggle {
    fn checked(&self) -> bool {
        self.checked
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    fn indeterminate(&self) -> bool {
        self.indeterminate
    }

    fn set_indeterminate(&mut self, indeterminate: bool) {
        self.indeterminate = indeterminate;
    }

    fn focus(&mut self) {
        self.focus_count += 1;
    }
}

/// A change made to the marker set, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerOp {
    Added(String),
    Removed(String),
}

/// Host that keeps everything in memory.
///
/// `attached == false` models a host whose view has not been created yet:
/// there is no native toggle and no animation target.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    pub toggle: MemoryToggle,
    pub attached: bool,
    markers: BTreeSet<String>,
    history: Vec<MarkerOp>,
}

impl MemoryHost {
    /// An attached host with an unchecked toggle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            toggle: MemoryToggle::default(),
            attached: true,
            markers: BTreeSet::new(),
            history: Vec::new(),
        }
    }

    /// A host whose view is not rendered yet.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            attached: false,
            ..Self::new()
        }
    }

    /// Markers currently applied, sorted.
    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.contains(marker)
    }

    /// Every add/remove performed, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MarkerOp] {
        &self.history
    }

    /// Simulate the browser flipping the toggle before the handler runs.
    pub fn flip_native(&mut self) {
        self.toggle.checked = !self.toggle.checked;
        self.toggle.indeterminate = false;
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostElement for MemoryHost {
    fn native_toggle(&mut self) -> Option<&mut dyn NativeToggle> {
        if self.attached {
            Some(&mut self.toggle as &mut dyn NativeToggle)
        } else {
            None
        }
    }

    fn has_animation_target(&self) -> bool {
        self.attached
    }

    fn add_marker(&mut self, marker: &str) {
        self.markers.insert(marker.to_owned());
        self.history.push(MarkerOp::Added(marker.to_owned()));
    }

    fn remove_marker(&mut self, marker: &str) {
        if self.markers.remove(marker) {
            self.history.push(MarkerOp::Removed(marker.to_owned()));
        }
    }
}
