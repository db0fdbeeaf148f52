#![forbid(unsafe_code)]

//! Core: coercion, identity, configuration and event plumbing for tristate
//! form controls.

pub mod capability;
pub mod coerce;
pub mod emitter;
pub mod id;
pub mod logging;
pub mod options;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};

pub use capability::{Capabilities, Colorable, Disableable, RippleDisableable, TabIndexable};
pub use coerce::{BooleanInput, FormValue};
pub use emitter::{EventEmitter, SubscriptionId};
pub use options::{
    AnimationMode, CheckboxConfig, CheckboxDefaults, CheckboxOptions, ClickAction, ConfigError,
    ConfigParse, LabelPosition, ParseEnumError, ThemeColor,
};
