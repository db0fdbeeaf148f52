#![forbid(unsafe_code)]

//! End-to-end behavior of the checkbox: click policies, form binding,
//! deferred work and animation markers.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tristate_checkbox::{
    AnimationMode, CheckState, Checkbox, CheckboxChange, CheckboxDefaults, CheckboxFlags,
    CheckboxOptions, ClickAction, Disableable, FormControl, FormValue, MARKER_LIFETIME, MarkerOp,
    MemoryHost, TabIndexable, TransitionClasses,
};

const C: TransitionClasses = TransitionClasses::MDC;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Seen {
    Change(bool),
    Indeterminate(bool),
    FormChange(bool),
    Touched,
}

/// Checkbox wired to a shared log of everything it reports.
fn harness(action: ClickAction) -> (Checkbox, Rc<RefCell<Vec<Seen>>>) {
    let mut cb = Checkbox::builder(MemoryHost::new())
        .defaults(CheckboxDefaults::default())
        .options(CheckboxOptions::new().click_action(action))
        .animation_mode(AnimationMode::Normal)
        .build();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&log);
    cb.on_change(move |e: &CheckboxChange| l.borrow_mut().push(Seen::Change(e.checked)));
    let l = Rc::clone(&log);
    cb.on_indeterminate_change(move |v| l.borrow_mut().push(Seen::Indeterminate(*v)));
    let l = Rc::clone(&log);
    cb.register_on_change(Box::new(move |v| l.borrow_mut().push(Seen::FormChange(v))));
    let l = Rc::clone(&log);
    cb.register_on_touched(Box::new(move || l.borrow_mut().push(Seen::Touched)));

    (cb, log)
}

fn count(log: &Rc<RefCell<Vec<Seen>>>, pred: impl Fn(&Seen) -> bool) -> usize {
    log.borrow().iter().filter(|s| pred(s)).count()
}

fn changes(log: &Rc<RefCell<Vec<Seen>>>) -> usize {
    count(log, |s| matches!(s, Seen::Change(_)))
}

fn indeterminate_changes(log: &Rc<RefCell<Vec<Seen>>>) -> usize {
    count(log, |s| matches!(s, Seen::Indeterminate(_)))
}

/// Simulate a user click: the native toggle flips, then the handler runs.
fn click(cb: &mut Checkbox) {
    cb.host_mut().flip_native();
    cb.handle_interaction();
}

// ═══════════════════════════════════════════════════════════════════════
// Form binding
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn write_value_coerces_and_never_emits() {
    let (mut cb, log) = harness(ClickAction::Default);

    let cases = [
        (FormValue::Null, false),
        (FormValue::Bool(false), false),
        (FormValue::Bool(true), true),
        (FormValue::Text(String::new()), true),
        (FormValue::Text("false".into()), true),
        (FormValue::Number(0.0), true),
        (FormValue::from(None::<bool>), false),
    ];
    for (value, expected) in cases {
        let shown = value.to_string();
        cb.write_value(value);
        assert_eq!(cb.checked(), expected, "write_value({shown})");
    }

    assert!(log.borrow().is_empty(), "write_value emitted: {:?}", log.borrow());
    assert_eq!(cb.check_state(), CheckState::Init);
}

#[test]
fn set_disabled_state_emits_nothing() {
    let (mut cb, log) = harness(ClickAction::Default);
    cb.set_checked(true);
    cb.set_indeterminate(true);
    log.borrow_mut().clear();

    cb.set_disabled_state(true);
    assert!(cb.is_disabled());
    assert!(cb.checked());
    assert!(cb.indeterminate());
    cb.set_disabled_state(false);
    assert!(!cb.disabled());
    assert!(log.borrow().is_empty());
}

#[test]
fn blur_reports_touched_after_flush() {
    let (mut cb, log) = harness(ClickAction::Default);
    cb.on_blur();
    assert!(log.borrow().is_empty());
    cb.run_microtasks();
    assert_eq!(*log.borrow(), vec![Seen::Touched]);
}

#[test]
fn toggle_reports_only_to_form() {
    let (mut cb, log) = harness(ClickAction::Default);
    cb.toggle();
    cb.toggle();
    assert!(!cb.checked());
    assert_eq!(
        *log.borrow(),
        vec![Seen::FormChange(true), Seen::FormChange(false)]
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Indeterminate
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn set_indeterminate_is_idempotent() {
    let (mut cb, log) = harness(ClickAction::Default);
    cb.set_indeterminate(true);
    cb.set_indeterminate(true);
    assert_eq!(*log.borrow(), vec![Seen::Indeterminate(true)]);

    cb.set_indeterminate(false);
    cb.set_indeterminate(false);
    assert_eq!(indeterminate_changes(&log), 2);
}

#[test]
fn set_indeterminate_accepts_loose_input() {
    let (mut cb, log) = harness(ClickAction::Default);
    cb.set_indeterminate("");
    assert!(cb.indeterminate());
    cb.set_indeterminate(None::<bool>);
    assert!(!cb.indeterminate());
    assert_eq!(indeterminate_changes(&log), 2);
}

// ═══════════════════════════════════════════════════════════════════════
// Click policies
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn default_click_clears_indeterminate_on_flush() {
    let (mut cb, log) = harness(ClickAction::Default);
    cb.set_indeterminate(true);
    log.borrow_mut().clear();

    click(&mut cb);
    assert!(cb.checked());
    assert!(cb.indeterminate(), "clear is deferred");
    assert_eq!(changes(&log), 1);
    assert_eq!(indeterminate_changes(&log), 0);

    cb.run_microtasks();
    assert!(!cb.indeterminate());
    assert!(!cb.host().toggle.indeterminate);
    assert_eq!(changes(&log), 1);
    assert_eq!(indeterminate_changes(&log), 1);

    let public: Vec<_> = log
        .borrow()
        .iter()
        .filter(|s| !matches!(s, Seen::FormChange(_)))
        .cloned()
        .collect();
    assert_eq!(public, vec![Seen::Change(true), Seen::Indeterminate(false)]);
}

#[test]
fn default_click_notifies_form_before_listeners() {
    let (mut cb, log) = harness(ClickAction::Default);
    click(&mut cb);
    assert_eq!(*log.borrow(), vec![Seen::FormChange(true), Seen::Change(true)]);
    assert!(cb.host().toggle.checked);
}

#[test]
fn noop_click_changes_nothing() {
    for disabled in [false, true] {
        let (mut cb, log) = harness(ClickAction::Noop);
        cb.set_indeterminate(true);
        cb.set_disabled(disabled);
        log.borrow_mut().clear();

        click(&mut cb);
        cb.settle();

        assert!(!cb.checked(), "disabled={disabled}");
        assert!(cb.indeterminate(), "disabled={disabled}");
        assert_eq!(changes(&log), 0);
        assert!(!cb.host().toggle.checked, "native checked resynced");
        assert!(cb.host().toggle.indeterminate, "native indeterminate resynced");
    }
}

#[test]
fn check_click_keeps_indeterminate() {
    let (mut cb, log) = harness(ClickAction::Check);
    cb.set_indeterminate(true);
    log.borrow_mut().clear();

    click(&mut cb);
    cb.settle();

    assert!(cb.checked());
    assert!(cb.indeterminate());
    assert_eq!(changes(&log), 1);
    assert_eq!(indeterminate_changes(&log), 0);
}

#[test]
fn disabled_click_is_inert() {
    for action in [ClickAction::Default, ClickAction::Check] {
        let (mut cb, log) = harness(action);
        cb.set_indeterminate(true);
        cb.set_disabled(true);
        cb.settle();
        log.borrow_mut().clear();
        let markers_before = cb.host().history().len();

        cb.handle_interaction();
        cb.settle();

        assert!(!cb.checked(), "{action}");
        assert!(cb.indeterminate(), "{action}");
        assert!(log.borrow().is_empty(), "{action}: {:?}", log.borrow());
        assert_eq!(cb.host().history().len(), markers_before);
    }
}

#[test]
fn change_event_carries_effective_id() {
    let mut cb = Checkbox::builder(MemoryHost::new())
        .defaults(CheckboxDefaults::default())
        .id("newsletter")
        .build();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    cb.on_change(move |e: &CheckboxChange| s.borrow_mut().push(e.clone()));

    cb.handle_interaction();
    assert_eq!(
        *seen.borrow(),
        vec![CheckboxChange {
            source: "newsletter".into(),
            checked: true
        }]
    );
}

#[test]
fn unsubscribed_listener_is_silent() {
    let (mut cb, _log) = harness(ClickAction::Default);
    let hits = Rc::new(RefCell::new(0));
    let h = Rc::clone(&hits);
    let id = cb.on_change(move |_| *h.borrow_mut() += 1);

    cb.handle_interaction();
    assert!(cb.off_change(id));
    assert!(!cb.off_change(id));
    cb.handle_interaction();
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn custom_event_factory() {
    fn as_tuple(source: &str, checked: bool) -> (String, bool) {
        (source.to_uppercase(), checked)
    }

    let mut cb = Checkbox::builder(MemoryHost::new())
        .defaults(CheckboxDefaults::default())
        .id("x")
        .change_event(as_tuple)
        .build();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    cb.on_change(move |e: &(String, bool)| s.borrow_mut().push(e.clone()));

    cb.handle_interaction();
    assert_eq!(*seen.borrow(), vec![("X".to_owned(), true)]);
}

// ═══════════════════════════════════════════════════════════════════════
// Animation markers
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn marker_sequence_follows_table() {
    let (mut cb, _log) = harness(ClickAction::Default);

    cb.set_indeterminate(true);
    assert_eq!(cb.animation_marker(), Some(&*C.unchecked_to_indeterminate));

    click(&mut cb);
    assert_eq!(cb.animation_marker(), Some(&*C.indeterminate_to_checked));
    cb.run_microtasks();

    click(&mut cb);
    assert_eq!(cb.animation_marker(), Some(&*C.checked_to_unchecked));

    assert_eq!(
        cb.host().history(),
        &[
            MarkerOp::Added(C.unchecked_to_indeterminate.into()),
            MarkerOp::Removed(C.unchecked_to_indeterminate.into()),
            MarkerOp::Added(C.indeterminate_to_checked.into()),
            MarkerOp::Removed(C.indeterminate_to_checked.into()),
            MarkerOp::Added(C.checked_to_unchecked.into()),
        ]
    );
    assert_eq!(cb.host().marker_count(), 1);
}

#[test]
fn markers_expire_after_lifetime() {
    let (mut cb, _log) = harness(ClickAction::Default);
    click(&mut cb);
    cb.advance(MARKER_LIFETIME - Duration::from_millis(1));
    assert_eq!(cb.host().marker_count(), 1);
    cb.advance(Duration::from_millis(1));
    assert_eq!(cb.host().marker_count(), 0);
    assert_eq!(cb.animation_marker(), None);
    assert_eq!(cb.pending_tasks().total(), 0);
    assert_eq!(cb.now(), MARKER_LIFETIME);
}

#[test]
fn superseded_marker_timer_is_harmless() {
    let (mut cb, _log) = harness(ClickAction::Default);
    click(&mut cb);
    cb.advance(Duration::from_millis(500));
    click(&mut cb);
    assert_eq!(cb.animation_marker(), Some(&*C.checked_to_unchecked));

    // First timer fires; its marker is already gone.
    cb.advance(Duration::from_millis(500));
    assert!(cb.host().has_marker(&C.checked_to_unchecked));
    assert_eq!(cb.animation_marker(), Some(&*C.checked_to_unchecked));

    cb.advance(Duration::from_millis(500));
    assert_eq!(cb.host().marker_count(), 0);
}

#[test]
fn disabled_animations_never_apply_markers() {
    let mut cb = Checkbox::builder(MemoryHost::new())
        .defaults(CheckboxDefaults::default())
        .animation_mode(AnimationMode::Disabled)
        .build();
    cb.set_indeterminate(true);
    cb.handle_interaction();
    cb.settle();
    assert!(cb.host().history().is_empty());
    assert_eq!(cb.check_state(), CheckState::Checked);
}

#[test]
fn clearing_indeterminate_swaps_marker() {
    let (mut cb, _log) = harness(ClickAction::Default);
    cb.set_checked(true);
    cb.set_indeterminate(true);
    assert_eq!(cb.animation_marker(), Some(&*C.checked_to_indeterminate));

    cb.set_indeterminate(false);
    assert_eq!(cb.animation_marker(), Some(&*C.indeterminate_to_checked));
    assert_eq!(cb.host().marker_count(), 1);
}

#[test]
fn runtime_built_marker_names() {
    let mut cb = Checkbox::builder(MemoryHost::new())
        .defaults(CheckboxDefaults::default())
        .animation_mode(AnimationMode::Normal)
        .transition_classes(TransitionClasses::with_prefix("app-cb--"))
        .build();
    click(&mut cb);
    assert_eq!(cb.animation_marker(), Some("app-cb--unchecked-checked"));
    assert!(cb.host().has_marker("app-cb--unchecked-checked"));

    cb.advance(MARKER_LIFETIME);
    assert_eq!(cb.animation_marker(), None);
    assert_eq!(
        cb.host().history(),
        &[
            MarkerOp::Added("app-cb--unchecked-checked".into()),
            MarkerOp::Removed("app-cb--unchecked-checked".into()),
        ]
    );
}

#[test]
fn timers_wait_for_advance() {
    let (mut cb, _log) = harness(ClickAction::Default);
    click(&mut cb);
    click(&mut cb);
    click(&mut cb);
    cb.run_microtasks();

    assert_eq!(cb.pending_tasks().timers, 3);
    assert_eq!(cb.animation_marker(), Some(&*C.unchecked_to_checked));
    assert_eq!(cb.host().marker_count(), 1);

    cb.advance(MARKER_LIFETIME);
    assert_eq!(cb.pending_tasks().total(), 0);
    assert_eq!(cb.host().marker_count(), 0);
}

// ═══════════════════════════════════════════════════════════════════════
// Identity and capabilities
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn generated_ids_are_unique() {
    let a = Checkbox::new(MemoryHost::new());
    let b = Checkbox::new(MemoryHost::new());
    assert_ne!(a.unique_id(), b.unique_id());
    assert_ne!(a.input_id(), b.input_id());
}

#[test]
fn custom_id_prefix() {
    let cb = Checkbox::builder(MemoryHost::new())
        .defaults(CheckboxDefaults::default())
        .id_prefix("consent-")
        .build();
    assert!(cb.unique_id().starts_with("consent-"));
    assert!(cb.input_id().ends_with("-input"));
}

#[test]
fn disabled_checkbox_leaves_tab_order() {
    let (mut cb, _log) = harness(ClickAction::Default);
    cb.set_tab_index(2);
    assert_eq!(cb.tab_index(), 2);
    cb.set_disabled(true);
    assert_eq!(cb.tab_index(), -1);
    assert!(cb.state_flags().contains(CheckboxFlags::DISABLED));
    assert!(cb.is_ripple_disabled());
}

#[test]
fn touch_target_click_focuses_toggle() {
    let (mut cb, log) = harness(ClickAction::Default);
    cb.handle_touch_target_click();
    assert!(cb.checked());
    assert_eq!(cb.host().toggle.focus_count, 1);
    assert_eq!(changes(&log), 1);
}

#[test]
fn label_change_requests_render() {
    let (mut cb, _log) = harness(ClickAction::Default);
    cb.take_render_request();
    cb.label_text_changed();
    assert!(cb.take_render_request());
    assert!(!cb.needs_render());
}
