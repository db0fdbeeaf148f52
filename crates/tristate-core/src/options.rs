#![forbid(unsafe_code)]

//! Checkbox configuration: click policy, animation mode, theme color, and the
//! process-wide defaults that per-instance options are merged over.
//!
//! # Environment Variables
//! - `TRISTATE_CHECKBOX_COLOR` = primary|accent|warn
//! - `TRISTATE_CHECKBOX_CLICK_ACTION` = default|noop|check
//! - `TRISTATE_ANIMATIONS` = normal|noop|disabled
//!
//! Parsing never fails as a whole. Unknown values are reported in
//! [`ConfigParse::errors`] and the built-in default is kept for that field.

use core::fmt;
use core::str::FromStr;
use std::env;
use std::sync::OnceLock;

const ENV_CHECKBOX_COLOR: &str = "TRISTATE_CHECKBOX_COLOR";
const ENV_CHECKBOX_CLICK_ACTION: &str = "TRISTATE_CHECKBOX_CLICK_ACTION";
const ENV_ANIMATIONS: &str = "TRISTATE_ANIMATIONS";

static GLOBAL_CONFIG: OnceLock<CheckboxConfig> = OnceLock::new();

/// Error returned when a string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    /// Kind of value being parsed (e.g. `"click action"`).
    pub kind: &'static str,
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.input)
    }
}

impl std::error::Error for ParseEnumError {}

fn normalized(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

/// What a click is allowed to do to the logical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ClickAction {
    /// Toggle `checked` and clear `indeterminate`.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "check-indeterminate"))]
    Default,
    /// Clicks never change logical state.
    Noop,
    /// Toggle `checked`, leave `indeterminate` alone.
    Check,
}

impl ClickAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Noop => "noop",
            Self::Check => "check",
        }
    }
}

impl FromStr for ClickAction {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "default" | "check-indeterminate" => Ok(Self::Default),
            "noop" => Ok(Self::Noop),
            "check" => Ok(Self::Check),
            _ => Err(ParseEnumError {
                kind: "click action",
                input: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ClickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global animation mode signal, resolved once per instance at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AnimationMode {
    #[default]
    Normal,
    /// Animations are globally off; transitions produce no marker.
    #[cfg_attr(feature = "serde", serde(alias = "noop"))]
    Disabled,
}

impl AnimationMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Disabled => "disabled",
        }
    }

    #[must_use]
    pub const fn is_disabled(self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl FromStr for AnimationMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "normal" | "enabled" => Ok(Self::Normal),
            "noop" | "disabled" | "off" => Ok(Self::Disabled),
            _ => Err(ParseEnumError {
                kind: "animation mode",
                input: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme palette a control is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ThemeColor {
    Primary,
    #[default]
    Accent,
    Warn,
}

impl ThemeColor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Accent => "accent",
            Self::Warn => "warn",
        }
    }
}

impl FromStr for ThemeColor {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "primary" => Ok(Self::Primary),
            "accent" => Ok(Self::Accent),
            "warn" => Ok(Self::Warn),
            _ => Err(ParseEnumError {
                kind: "theme color",
                input: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of the toggle the label is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LabelPosition {
    Before,
    #[default]
    After,
}

impl FromStr for LabelPosition {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            _ => Err(ParseEnumError {
                kind: "label position",
                input: s.to_owned(),
            }),
        }
    }
}

/// Process-wide checkbox defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct CheckboxDefaults {
    pub color: ThemeColor,
    pub click_action: ClickAction,
}

impl CheckboxDefaults {
    /// Merge per-instance options over these defaults. Each field set in
    /// `options` wins.
    #[must_use]
    pub fn merge(&self, options: &CheckboxOptions) -> Self {
        Self {
            color: options.color.unwrap_or(self.color),
            click_action: options.click_action.unwrap_or(self.click_action),
        }
    }

    /// The process-wide defaults (see [`CheckboxConfig::global`]).
    #[must_use]
    pub fn global() -> Self {
        CheckboxConfig::global().defaults
    }
}

/// Per-instance overrides; `None` fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct CheckboxOptions {
    pub color: Option<ThemeColor>,
    pub click_action: Option<ClickAction>,
}

impl CheckboxOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn color(mut self, color: ThemeColor) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn click_action(mut self, action: ClickAction) -> Self {
        self.click_action = Some(action);
        self
    }
}

/// Everything a checkbox reads from its environment at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct CheckboxConfig {
    pub defaults: CheckboxDefaults,
    pub animation_mode: AnimationMode,
}

/// One rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Configuration plus the diagnostics collected while parsing it.
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: CheckboxConfig,
    pub errors: Vec<ConfigError>,
}

impl CheckboxConfig {
    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// The process-wide configuration.
    ///
    /// Initialized from the environment on first use unless
    /// [`install_global`](Self::install_global) ran earlier.
    pub fn global() -> &'static Self {
        GLOBAL_CONFIG.get_or_init(|| {
            let parsed = Self::from_env_with_diagnostics();
            #[cfg(feature = "tracing")]
            for err in &parsed.errors {
                crate::warn!(field = err.field, value = %err.value, "ignoring checkbox setting");
            }
            parsed.config
        })
    }

    /// Install the process-wide configuration.
    ///
    /// Returns the rejected value if the global was already initialized.
    pub fn install_global(config: Self) -> Result<(), Self> {
        GLOBAL_CONFIG.set(config)
    }
}

fn parse_field<T: FromStr<Err = ParseEnumError>>(
    field: &'static str,
    raw: Option<String>,
    slot: &mut T,
    errors: &mut Vec<ConfigError>,
) {
    let Some(raw) = raw else {
        return;
    };
    if raw.trim().is_empty() {
        return;
    }
    match raw.parse::<T>() {
        Ok(value) => *slot = value,
        Err(err) => errors.push(ConfigError::new(field, raw, err.to_string())),
    }
}

/// Parse configuration using a custom lookup (used by tests and embedders).
pub fn from_env_with<F>(lookup: F) -> ConfigParse
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = CheckboxConfig::default();
    let mut errors = Vec::new();

    parse_field(
        ENV_CHECKBOX_COLOR,
        lookup(ENV_CHECKBOX_COLOR),
        &mut config.defaults.color,
        &mut errors,
    );
    parse_field(
        ENV_CHECKBOX_CLICK_ACTION,
        lookup(ENV_CHECKBOX_CLICK_ACTION),
        &mut config.defaults.click_action,
        &mut errors,
    );
    parse_field(
        ENV_ANIMATIONS,
        lookup(ENV_ANIMATIONS),
        &mut config.animation_mode,
        &mut errors,
    );

    ConfigParse { config, errors }
}
