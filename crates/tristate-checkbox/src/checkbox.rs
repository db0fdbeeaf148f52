#![forbid(unsafe_code)]

//! The tri-state checkbox state machine.
//!
//! A [`Checkbox`] owns `checked`, `disabled` and `indeterminate`, classifies
//! every visible change into an animation marker, and bridges user
//! interaction to a form layer and to public listeners.
//!
//! # Invariants
//!
//! 1. The classified state leaves [`CheckState::Init`] at most once and never
//!    returns to it.
//! 2. At most one animation marker is applied by this checkbox at a time; a
//!    new marker always removes the previous one first.
//! 3. Changing `disabled` never changes `checked`/`indeterminate` and never
//!    emits an event.
//! 4. The public change event is emitted only from [`Checkbox::handle_interaction`].
//! 5. `indeterminate_change` fires only when `indeterminate` actually changes.
//!
//! # Deferred work
//!
//! | Work | Queue | When it runs |
//! |------|-------|--------------|
//! | Clearing `indeterminate` after a click | microtask | [`Checkbox::run_microtasks`] |
//! | Touched notification after blur | microtask | [`Checkbox::run_microtasks`] |
//! | Removing an animation marker | timer, 1000 ms | [`Checkbox::advance`] |
//!
//! Nothing runs on its own. Hosts flush microtasks after each event and call
//! [`Checkbox::advance`] from their tick; until then an expired marker stays
//! applied and every state change adds another pending timer.
//!
//! # Failure Modes
//!
//! | Condition | Effect |
//! |-----------|--------|
//! | `disabled` | Clicks change nothing and emit nothing |
//! | No animation target | State changes; no classification, no marker |
//! | No native toggle | State changes; native sync skipped |
//! | No registered callback | Notification skipped |

use core::fmt;
use std::borrow::Cow;
use std::time::Duration;

use tristate_core::capability::parse_tab_index;
use tristate_core::id::next_unique_id;
use tristate_core::{
    AnimationMode, BooleanInput, Capabilities, CheckboxConfig, CheckboxDefaults, CheckboxOptions,
    ClickAction, Colorable, Disableable, EventEmitter, FormValue, LabelPosition,
    RippleDisableable, SubscriptionId, TabIndexable, ThemeColor,
};
use tristate_runtime::{DeferredQueue, Pending};

use crate::event::{ChangeEventFactory, CheckboxChange, checkbox_change};
use crate::flags::CheckboxFlags;
use crate::form::{FormCallbacks, FormControl, OnChange, OnTouched};
use crate::host::{HostElement, MemoryHost};
use crate::transition::{CheckState, TransitionClasses};

/// Prefix for generated ids.
pub const DEFAULT_ID_PREFIX: &str = "tristate-checkbox-";

/// How long an animation marker stays applied.
pub const MARKER_LIFETIME: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Task {
    ClearIndeterminate,
    NotifyTouched,
    RemoveMarker(Cow<'static, str>),
}

/// Builder for [`Checkbox`].
///
/// Anything not set explicitly comes from the process-wide
/// [`CheckboxConfig::global`].
pub struct CheckboxBuilder<H, E = CheckboxChange> {
    host: H,
    id_prefix: String,
    id: Option<String>,
    defaults: Option<CheckboxDefaults>,
    options: CheckboxOptions,
    animation_mode: Option<AnimationMode>,
    tab_index: i32,
    classes: TransitionClasses,
    make_change_event: ChangeEventFactory<E>,
}

impl<H: HostElement> CheckboxBuilder<H> {
    /// Builder with default settings for `host`.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            id_prefix: DEFAULT_ID_PREFIX.to_owned(),
            id: None,
            defaults: None,
            options: CheckboxOptions::default(),
            animation_mode: None,
            tab_index: 0,
            classes: TransitionClasses::default(),
            make_change_event: checkbox_change,
        }
    }
}

impl<H: HostElement, E> CheckboxBuilder<H, E> {
    /// Prefix for the generated unique id.
    #[must_use]
    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Caller-supplied id; overrides the generated one.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Defaults to merge the instance options over, instead of the global ones.
    #[must_use]
    pub fn defaults(mut self, defaults: CheckboxDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Per-instance options merged over the defaults.
    #[must_use]
    pub fn options(mut self, options: CheckboxOptions) -> Self {
        self.options = options;
        self
    }

    /// Animation mode; falls back to the global config.
    #[must_use]
    pub fn animation_mode(mut self, mode: AnimationMode) -> Self {
        self.animation_mode = Some(mode);
        self
    }

    /// Tab index used while enabled.
    #[must_use]
    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = index;
        self
    }

    /// Tab index from the host's raw `tabindex` attribute.
    #[must_use]
    pub fn tab_index_attr(mut self, attr: Option<&str>) -> Self {
        self.tab_index = parse_tab_index(attr);
        self
    }

    /// Marker names applied on transitions. Defaults to [`TransitionClasses::MDC`].
    #[must_use]
    pub fn transition_classes(mut self, classes: TransitionClasses) -> Self {
        self.classes = classes;
        self
    }

    /// Use a custom change event type.
    #[must_use]
    pub fn change_event<F>(self, factory: ChangeEventFactory<F>) -> CheckboxBuilder<H, F> {
        CheckboxBuilder {
            host: self.host,
            id_prefix: self.id_prefix,
            id: self.id,
            defaults: self.defaults,
            options: self.options,
            animation_mode: self.animation_mode,
            tab_index: self.tab_index,
            classes: self.classes,
            make_change_event: factory,
        }
    }

    /// Finish construction and generate the unique id.
    #[must_use]
    pub fn build(self) -> Checkbox<H, E> {
        let defaults = self
            .defaults
            .unwrap_or_else(CheckboxDefaults::global)
            .merge(&self.options);
        let animation_mode = self
            .animation_mode
            .unwrap_or_else(|| CheckboxConfig::global().animation_mode);
        let unique_id = next_unique_id(&self.id_prefix);

        tristate_core::debug!(
            id = %unique_id,
            click_action = %defaults.click_action,
            animation_mode = %animation_mode,
            "checkbox created"
        );

        Checkbox {
            unique_id,
            id: self.id,
            checked: false,
            disabled: false,
            indeterminate: false,
            required: false,
            name: None,
            value: None,
            label_position: LabelPosition::default(),
            click_action: defaults.click_action,
            animation_mode,
            capabilities: Capabilities::new(defaults.color).with_tab_index(self.tab_index),
            check_state: CheckState::Init,
            marker: None,
            classes: self.classes,
            make_change_event: self.make_change_event,
            host: self.host,
            form: FormCallbacks::default(),
            change: EventEmitter::new(),
            indeterminate_change: EventEmitter::new(),
            tasks: DeferredQueue::new(),
            render_requested: false,
        }
    }
}

/// A tri-state checkbox bound to a host element.
pub struct Checkbox<H = MemoryHost, E = CheckboxChange> {
    unique_id: String,
    id: Option<String>,
    checked: bool,
    disabled: bool,
    indeterminate: bool,
    required: bool,
    name: Option<String>,
    value: Option<String>,
    label_position: LabelPosition,
    click_action: ClickAction,
    animation_mode: AnimationMode,
    capabilities: Capabilities,
    check_state: CheckState,
    marker: Option<Cow<'static, str>>,
    classes: TransitionClasses,
    make_change_event: ChangeEventFactory<E>,
    host: H,
    form: FormCallbacks,
    change: EventEmitter<E>,
    indeterminate_change: EventEmitter<bool>,
    tasks: DeferredQueue<Task>,
    render_requested: bool,
}

impl<H: HostElement> Checkbox<H> {
    /// Create a checkbox with the global defaults.
    #[must_use]
    pub fn new(host: H) -> Self {
        CheckboxBuilder::new(host).build()
    }

    /// Start a [`CheckboxBuilder`] for `host`.
    #[must_use]
    pub fn builder(host: H) -> CheckboxBuilder<H> {
        CheckboxBuilder::new(host)
    }
}

impl<H: HostElement, E> Checkbox<H, E> {
    // ── Identity and plain properties ───────────────────────────────────

    /// The effective id: the caller's id if non-empty, else the generated one.
    #[must_use]
    pub fn id(&self) -> &str {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => &self.unique_id,
        }
    }

    /// The id generated at construction.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Set or clear the caller-supplied id.
    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    /// Id for the native toggle element.
    #[must_use]
    pub fn input_id(&self) -> String {
        format!("{}-input", self.id())
    }

    /// Whether the checkbox is checked.
    #[must_use]
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Whether clicks are ignored.
    #[must_use]
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the checkbox shows the mixed state.
    #[must_use]
    pub fn indeterminate(&self) -> bool {
        self.indeterminate
    }

    /// Whether the form requires this checkbox to be checked.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Coerce and store `required`.
    pub fn set_required(&mut self, value: impl BooleanInput) {
        self.required = value.coerce_bool();
    }

    /// The native toggle's `name` attribute.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set or clear the `name` attribute.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// The native toggle's `value` attribute.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Set or clear the `value` attribute.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// Which side of the toggle the label sits on.
    #[must_use]
    pub fn label_position(&self) -> LabelPosition {
        self.label_position
    }

    /// Move the label.
    pub fn set_label_position(&mut self, position: LabelPosition) {
        self.label_position = position;
    }

    /// Click policy resolved at construction.
    #[must_use]
    pub fn click_action(&self) -> ClickAction {
        self.click_action
    }

    /// Animation mode resolved at construction.
    #[must_use]
    pub fn animation_mode(&self) -> AnimationMode {
        self.animation_mode
    }

    /// Last classified logical state.
    #[must_use]
    pub fn check_state(&self) -> CheckState {
        self.check_state
    }

    /// Marker currently applied by this checkbox, if any.
    #[must_use]
    pub fn animation_marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// Color, ripple and tab-index settings.
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Ripple feedback is off when disabled or switched off explicitly.
    #[must_use]
    pub fn is_ripple_disabled(&self) -> bool {
        self.capabilities.disable_ripple() || self.disabled
    }

    /// The host element.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host element, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Snapshot of the boolean state as flags.
    #[must_use]
    pub fn state_flags(&self) -> CheckboxFlags {
        let mut flags = CheckboxFlags::empty();
        flags.set(CheckboxFlags::CHECKED, self.checked);
        flags.set(CheckboxFlags::DISABLED, self.disabled);
        flags.set(CheckboxFlags::INDETERMINATE, self.indeterminate);
        flags.set(
            CheckboxFlags::ANIMATIONS_DISABLED,
            self.animation_mode.is_disabled(),
        );
        flags.set(CheckboxFlags::REQUIRED, self.required);
        flags
    }

    // ── Listeners ───────────────────────────────────────────────────────

    /// Listen for user-originated changes.
    pub fn on_change(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        self.change.subscribe(listener)
    }

    /// Remove a change listener. Returns `false` if `id` was unknown.
    pub fn off_change(&mut self, id: SubscriptionId) -> bool {
        self.change.unsubscribe(id)
    }

    /// Listen for changes of `indeterminate`.
    pub fn on_indeterminate_change(
        &mut self,
        listener: impl FnMut(&bool) + 'static,
    ) -> SubscriptionId {
        self.indeterminate_change.subscribe(listener)
    }

    /// Remove an `indeterminate` listener. Returns `false` if `id` was unknown.
    pub fn off_indeterminate_change(&mut self, id: SubscriptionId) -> bool {
        self.indeterminate_change.unsubscribe(id)
    }

    // ── Re-render requests ──────────────────────────────────────────────

    fn mark_for_check(&mut self) {
        self.render_requested = true;
    }

    /// Whether the host should re-render this checkbox.
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.render_requested
    }

    /// Consume the pending re-render request.
    pub fn take_render_request(&mut self) -> bool {
        core::mem::take(&mut self.render_requested)
    }

    /// The label content changed; the host should re-render.
    pub fn label_text_changed(&mut self) {
        self.mark_for_check();
    }

    // ── State machine core ──────────────────────────────────────────────

    /// Programmatic write of `checked`. No classification, no event.
    pub fn set_checked(&mut self, value: impl BooleanInput) {
        let checked = value.coerce_bool();
        if checked != self.checked {
            self.checked = checked;
            self.mark_for_check();
        }
    }

    /// Programmatic write of `disabled`. Never emits.
    pub fn set_disabled(&mut self, value: impl BooleanInput) {
        let disabled = value.coerce_bool();
        if disabled != self.disabled {
            self.disabled = disabled;
            self.mark_for_check();
        }
    }

    /// Programmatic write of `indeterminate`.
    ///
    /// A real change is classified and reported through
    /// `indeterminate_change`. The native toggle is re-synced either way.
    pub fn set_indeterminate(&mut self, value: impl BooleanInput) {
        let indeterminate = value.coerce_bool();
        let changed = indeterminate != self.indeterminate;
        self.indeterminate = indeterminate;

        if changed {
            let next = if indeterminate {
                CheckState::Indeterminate
            } else {
                CheckState::from_checked(self.checked)
            };
            self.transition_check_state(next);
            self.indeterminate_change.emit(&indeterminate);
        }

        self.sync_indeterminate();
    }

    /// Flip `checked` regardless of `disabled` and report it to the form
    /// layer. Does not animate or emit the public change event.
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
        self.mark_for_check();
        self.form.notify_change(self.checked);
    }

    /// Handle a click on the native toggle.
    pub fn handle_interaction(&mut self) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "checkbox_interaction",
            id = %self.id(),
            click_action = %self.click_action,
            disabled = self.disabled,
            indeterminate = self.indeterminate
        )
        .entered();

        if self.disabled {
            if self.click_action == ClickAction::Noop {
                self.resync_native();
            }
            return;
        }

        if self.click_action == ClickAction::Noop {
            self.resync_native();
            return;
        }

        if self.indeterminate && self.click_action != ClickAction::Check {
            self.tasks.defer(Task::ClearIndeterminate);
        }

        self.checked = !self.checked;
        self.mark_for_check();
        self.transition_check_state(CheckState::from_checked(self.checked));
        self.emit_change_event();
    }

    /// Handle a click on the enlarged touch target around the toggle.
    pub fn handle_touch_target_click(&mut self) {
        self.handle_interaction();
        if !self.disabled {
            self.focus();
        }
    }

    /// Move focus to the native toggle.
    pub fn focus(&mut self) {
        if let Some(toggle) = self.host.native_toggle() {
            toggle.focus();
        }
    }

    /// The native toggle lost focus. The touched notification is deferred to
    /// the microtask queue.
    pub fn on_blur(&mut self) {
        self.tasks.defer(Task::NotifyTouched);
    }

    /// The host finished rendering the view for the first time.
    pub fn after_view_init(&mut self) {
        self.sync_indeterminate();
    }

    fn emit_change_event(&mut self) {
        let checked = self.checked;
        self.form.notify_change(checked);
        let event = (self.make_change_event)(self.id(), checked);
        self.change.emit(&event);

        // A listener may have touched the native toggle.
        if let Some(toggle) = self.host.native_toggle() {
            toggle.set_checked(checked);
        }
    }

    fn transition_check_state(&mut self, new_state: CheckState) {
        let old_state = self.check_state;
        if old_state == new_state || !self.host.has_animation_target() {
            return;
        }

        if let Some(previous) = self.marker.take() {
            self.host.remove_marker(&previous);
        }

        self.marker = self
            .classes
            .marker(old_state, new_state, self.checked, self.animation_mode);
        self.check_state = new_state;

        if let Some(marker) = self.marker.clone() {
            self.host.add_marker(&marker);
            tristate_core::trace!(id = %self.id(), ?old_state, ?new_state, marker = %marker, "marker applied");
            self.tasks.defer_after(MARKER_LIFETIME, Task::RemoveMarker(marker));
        }
    }

    fn sync_indeterminate(&mut self) {
        let indeterminate = self.indeterminate;
        if let Some(toggle) = self.host.native_toggle() {
            toggle.set_indeterminate(indeterminate);
        }
    }

    fn resync_native(&mut self) {
        let (checked, indeterminate) = (self.checked, self.indeterminate);
        if let Some(toggle) = self.host.native_toggle() {
            toggle.set_checked(checked);
            toggle.set_indeterminate(indeterminate);
        }
    }

    // ── Deferred work ───────────────────────────────────────────────────

    fn run_task(&mut self, task: Task) {
        match task {
            Task::ClearIndeterminate => {
                if self.indeterminate {
                    self.indeterminate = false;
                    self.indeterminate_change.emit(&false);
                }
                self.sync_indeterminate();
            }
            Task::NotifyTouched => {
                self.form.notify_touched();
                self.mark_for_check();
            }
            Task::RemoveMarker(marker) => {
                self.host.remove_marker(&marker);
                if self.marker.as_deref() == Some(&*marker) {
                    self.marker = None;
                }
                tristate_core::trace!(id = %self.id(), marker = %marker, "marker expired");
            }
        }
    }

    /// Run every queued microtask, including ones queued while running.
    /// Returns how many ran.
    pub fn run_microtasks(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.tasks.pop_microtask() {
            self.run_task(task);
            ran += 1;
        }
        if ran > 0 {
            tristate_core::trace!(id = %self.id(), ran, "microtasks flushed");
        }
        ran
    }

    /// Advance the virtual clock by `delta`, running timers that come due.
    /// Returns how many ran.
    pub fn advance(&mut self, delta: Duration) -> usize {
        let deadline = self.tasks.deadline_after(delta);
        let mut ran = 0;
        while let Some(task) = self.tasks.pop_due(deadline) {
            self.run_task(task);
            ran += 1;
        }
        self.tasks.advance_clock_to(deadline);
        ran
    }

    /// Run all microtasks, then every pending timer.
    pub fn settle(&mut self) {
        self.run_microtasks();
        if let Some(last) = self.tasks.last_due() {
            let delta = last.saturating_sub(self.tasks.now());
            self.advance(delta);
        }
        self.run_microtasks();
    }

    /// Queued microtasks and timers.
    #[must_use]
    pub fn pending_tasks(&self) -> Pending {
        self.tasks.pending()
    }

    /// Current virtual time of this checkbox's timer queue.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.tasks.now()
    }
}

impl<H: HostElement, E> FormControl for Checkbox<H, E> {
    fn write_value(&mut self, value: FormValue) {
        self.set_checked(value);
    }

    fn register_on_change(&mut self, f: OnChange) {
        self.form.set_on_change(f);
    }

    fn register_on_touched(&mut self, f: OnTouched) {
        self.form.set_on_touched(f);
    }

    fn set_disabled_state(&mut self, disabled: bool) {
        self.set_disabled(disabled);
    }
}

impl<H: HostElement, E> Colorable for Checkbox<H, E> {
    fn color(&self) -> ThemeColor {
        self.capabilities.color()
    }

    fn set_color(&mut self, color: Option<ThemeColor>) {
        self.capabilities.set_color(color);
    }

    fn default_color(&self) -> ThemeColor {
        self.capabilities.default_color()
    }
}

impl<H: HostElement, E> Disableable for Checkbox<H, E> {
    fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl<H: HostElement, E> RippleDisableable for Checkbox<H, E> {
    fn disable_ripple(&self) -> bool {
        self.capabilities.disable_ripple()
    }

    fn set_disable_ripple(&mut self, disable: bool) {
        self.capabilities.set_disable_ripple(disable);
    }
}

impl<H: HostElement, E> TabIndexable for Checkbox<H, E> {
    fn tab_index(&self) -> i32 {
        if self.disabled {
            -1
        } else {
            self.capabilities.raw_tab_index()
        }
    }

    fn set_tab_index(&mut self, index: i32) {
        self.capabilities.set_tab_index(index);
    }
}

impl<H: fmt::Debug, E> fmt::Debug for Checkbox<H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkbox")
            .field("unique_id", &self.unique_id)
            .field("id", &self.id)
            .field("checked", &self.checked)
            .field("disabled", &self.disabled)
            .field("indeterminate", &self.indeterminate)
            .field("required", &self.required)
            .field("click_action", &self.click_action)
            .field("animation_mode", &self.animation_mode)
            .field("check_state", &self.check_state)
            .field("marker", &self.marker)
            .field("host", &self.host)
            .field("form", &self.form)
            .field("pending", &self.tasks.pending())
            .finish_non_exhaustive()
    }
}
