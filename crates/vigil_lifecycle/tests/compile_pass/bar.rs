use vigil_lifecycle::{
    LifecycleEvent, LifecycleOwner, LifecycleState, dispatch, lifecycle_observer,
};

struct Activity;

impl LifecycleOwner for Activity {
    fn current_state(&self) -> LifecycleState {
        LifecycleState::Resumed
    }
}

#[derive(Default)]
struct Bar {
    stopped: bool,
    events: usize,
}

/// Zero, one and two parameter callbacks side by side.
#[lifecycle_observer]
impl Bar {
    #[on_lifecycle_event(OnStop)]
    fn on_stop(&mut self, owner: &dyn LifecycleOwner) {
        self.stopped = owner.current_state().is_at_least(LifecycleState::Created);
    }

    #[on_lifecycle_event(OnStart, OnResume)]
    fn on_visible(&self) {}

    #[on_lifecycle_event]
    fn any(&mut self, _owner: &dyn LifecycleOwner, _event: LifecycleEvent) {
        self.events += 1;
    }
}

fn main() {
    let mut bar = Bar::default();
    for event in LifecycleEvent::DISPATCHABLE {
        dispatch(&mut bar, &Activity, event);
    }
    assert!(bar.stopped);
    assert_eq!(bar.events, 6);
}
