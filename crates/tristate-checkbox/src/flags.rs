#![forbid(unsafe_code)]

//! State snapshot flags hosts use to derive their state classes.

use bitflags::bitflags;

bitflags! {
    /// Host-visible checkbox state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CheckboxFlags: u8 {
        const CHECKED             = 0b0000_0001;
        const DISABLED            = 0b0000_0010;
        const INDETERMINATE       = 0b0000_0100;
        /// Animations are globally off; the host may skip transition styling.
        const ANIMATIONS_DISABLED = 0b0000_1000;
        const REQUIRED            = 0b0001_0000;
    }
}
