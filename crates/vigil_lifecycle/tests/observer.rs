//! Integration tests for `#[lifecycle_observer]` adapters.
//!
//! These tests dispatch events through generated adapters and check:
//! - Callbacks bound to an event run in declaration order
//! - Any-event callbacks run after the event's own callbacks
//! - Arguments match each callback's declared arity
//! - A shared `MethodCallsLogger` suppresses repeated callbacks

use std::sync::atomic::{AtomicUsize, Ordering};

use vigil_lifecycle::{
    GeneratedAdapter, LifecycleEvent, LifecycleObserver, LifecycleOwner, LifecycleState,
    MethodCallsLogger, dispatch, dispatch_all, lifecycle_observer,
};

// ─────────────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────────────

struct Owner(LifecycleState);

impl LifecycleOwner for Owner {
    fn current_state(&self) -> LifecycleState {
        self.0
    }
}

static CREATED: AtomicUsize = AtomicUsize::new(0);

#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

#[lifecycle_observer]
impl Recorder {
    #[on_lifecycle_event(OnStop)]
    fn stop_first(&mut self) {
        self.calls.push("stop_first".to_string());
    }

    #[on_lifecycle_event(OnStop)]
    fn stop_second(&mut self, owner: &dyn LifecycleOwner) {
        self.calls
            .push(format!("stop_second:{:?}", owner.current_state()));
    }

    #[on_lifecycle_event(OnStart, OnStop)]
    fn visibility(&mut self, _owner: &dyn LifecycleOwner, event: LifecycleEvent) {
        self.calls.push(format!("visibility:{event}"));
    }

    #[on_lifecycle_event]
    fn any(&mut self, _owner: &dyn LifecycleOwner, event: LifecycleEvent) {
        self.calls.push(format!("any:{event}"));
    }

    #[on_lifecycle_event(OnCreate)]
    fn created() {
        CREATED.fetch_add(1, Ordering::SeqCst);
    }

    #[on_lifecycle_event(OnResume)]
    fn count(&self) -> usize {
        self.calls.len()
    }

    fn take(&mut self) -> Vec<String> {
        core::mem::take(&mut self.calls)
    }
}

#[derive(Default)]
struct Quiet {
    stops: usize,
}

#[lifecycle_observer(call_logger = false)]
impl Quiet {
    #[on_lifecycle_event(vigil_lifecycle::LifecycleEvent::OnStop)]
    fn any(&mut self) {
        self.stops += 1;
    }
}

fn started() -> Owner {
    Owner(LifecycleState::Started)
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch order
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn event_callbacks_fan_out_in_declaration_order() {
    let mut recorder = Recorder::default();
    dispatch(&mut recorder, &started(), LifecycleEvent::OnStop);

    assert_eq!(
        recorder.take(),
        vec![
            "stop_first",
            "stop_second:Started",
            "visibility:ON_STOP",
            "any:ON_STOP",
        ]
    );
}

#[test]
fn multi_event_callback_runs_for_each_listed_event() {
    let mut recorder = Recorder::default();
    let owner = started();

    dispatch(&mut recorder, &owner, LifecycleEvent::OnStart);
    assert_eq!(recorder.take(), vec!["visibility:ON_START", "any:ON_START"]);

    dispatch(&mut recorder, &owner, LifecycleEvent::OnPause);
    assert_eq!(recorder.take(), vec!["any:ON_PAUSE"]);
}

#[test]
fn any_event_itself_is_not_dispatched() {
    let mut recorder = Recorder::default();
    let owner = started();

    dispatch(&mut recorder, &owner, LifecycleEvent::OnAny);
    assert!(recorder.take().is_empty());

    {
        let mut adapter = recorder.lifecycle_adapter();
        dispatch_all(&mut [&mut adapter], &owner, LifecycleEvent::OnAny);
    }
    assert!(recorder.take().is_empty());
}

#[test]
fn associated_function_callbacks_are_called() {
    let before = CREATED.load(Ordering::SeqCst);
    let mut recorder = Recorder::default();
    dispatch(&mut recorder, &started(), LifecycleEvent::OnCreate);

    assert!(CREATED.load(Ordering::SeqCst) > before);
    assert_eq!(recorder.take(), vec!["any:ON_CREATE"]);
}

#[test]
fn return_values_are_ignored() {
    let mut recorder = Recorder::default();
    dispatch(&mut recorder, &started(), LifecycleEvent::OnResume);
    assert_eq!(recorder.take(), vec!["any:ON_RESUME"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Call logger
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn logger_suppresses_repeated_calls() {
    let mut recorder = Recorder::default();
    let owner = started();
    let mut logger = MethodCallsLogger::new();

    let mut adapter = recorder.lifecycle_adapter();
    adapter.call_methods(&owner, LifecycleEvent::OnStop, Some(&mut logger));
    adapter.call_methods(&owner, LifecycleEvent::OnStop, Some(&mut logger));

    assert_eq!(recorder.take().len(), 4);
    assert_eq!(logger.len(), 4);
}

#[test]
fn dispatch_all_shares_one_logger() {
    let mut first = Recorder::default();
    let mut second = Recorder::default();
    let owner = started();

    {
        let mut first_adapter = first.lifecycle_adapter();
        let mut second_adapter = second.lifecycle_adapter();
        dispatch_all(
            &mut [&mut first_adapter, &mut second_adapter],
            &owner,
            LifecycleEvent::OnStop,
        );
    }

    assert_eq!(first.take().len(), 4);
    assert!(second.take().is_empty());
}

#[test]
fn adapters_without_logger_guards_always_run() {
    let mut quiet = Quiet::default();
    let owner = started();
    let mut logger = MethodCallsLogger::new();

    let mut adapter = quiet.lifecycle_adapter();
    adapter.call_methods(&owner, LifecycleEvent::OnStop, Some(&mut logger));
    adapter.call_methods(&owner, LifecycleEvent::OnStop, Some(&mut logger));
    adapter.call_methods(&owner, LifecycleEvent::OnStart, None);

    assert_eq!(quiet.stops, 2);
    assert!(logger.is_empty());
}
