#![forbid(unsafe_code)]

//! Tri-state checkbox.
//!
//! [`Checkbox`] tracks `checked`, `indeterminate` and `disabled`, turns user
//! clicks into state changes according to its [`ClickAction`], classifies
//! every visible change into an animation marker, and keeps a form layer and
//! the rendered native toggle in sync.
//!
//! Rendering is the host's job. The checkbox drives it through
//! [`HostElement`] and asks for a repaint through
//! [`Checkbox::take_render_request`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tristate_checkbox::{Checkbox, CheckState, MemoryHost};
//!
//! let mut cb = Checkbox::new(MemoryHost::new());
//! cb.set_indeterminate(true);
//! cb.handle_interaction();
//! assert!(cb.checked());
//! assert_eq!(cb.check_state(), CheckState::Checked);
//!
//! // The indeterminate flag clears on the next microtask flush.
//! assert!(cb.indeterminate());
//! cb.run_microtasks();
//! assert!(!cb.indeterminate());
//!
//! // Markers expire after a second.
//! cb.advance(Duration::from_secs(1));
//! assert_eq!(cb.host().marker_count(), 0);
//! ```

pub mod checkbox;
pub mod event;
pub mod flags;
pub mod form;
pub mod host;
pub mod transition;

pub use checkbox::{Checkbox, CheckboxBuilder, DEFAULT_ID_PREFIX, MARKER_LIFETIME};
pub use event::{ChangeEventFactory, CheckboxChange, checkbox_change};
pub use flags::CheckboxFlags;
pub use form::{FormCallbacks, FormControl, OnChange, OnTouched};
pub use host::{DetachedHost, HostElement, MarkerOp, MemoryHost, MemoryToggle, NativeToggle};
pub use transition::{CheckState, Transition, TransitionClasses, classify};

pub use tristate_core::{
    AnimationMode, BooleanInput, CheckboxConfig, CheckboxDefaults, CheckboxOptions, ClickAction,
    Colorable, Disableable, FormValue, LabelPosition, RippleDisableable, SubscriptionId,
    TabIndexable, ThemeColor,
};
