use vigil_lifecycle::{LifecycleEvent, LifecycleOwner, LifecycleState, dispatch, lifecycle_observer};

struct Activity;

impl LifecycleOwner for Activity {
    fn current_state(&self) -> LifecycleState {
        LifecycleState::Started
    }
}

#[derive(Default)]
struct Tracker {
    last: Option<LifecycleState>,
    paused: bool,
}

/// Lifetime-annotated owner parameters and a path-qualified callback attribute.
#[lifecycle_observer]
impl Tracker {
    #[on_lifecycle_event(OnStop)]
    fn record<'a>(&mut self, owner: &'a dyn LifecycleOwner) {
        self.last = Some(owner.current_state());
    }

    #[on_lifecycle_event(OnStart)]
    fn record_bounded<'a, 'b: 'a>(&mut self, owner: &'a (dyn LifecycleOwner + 'b), _event: LifecycleEvent) {
        self.last = Some(owner.current_state());
    }

    #[vigil_lifecycle::on_lifecycle_event(OnPause)]
    fn pause(&mut self) {
        self.paused = true;
    }
}

fn main() {
    let mut tracker = Tracker::default();
    dispatch(&mut tracker, &Activity, LifecycleEvent::OnStop);
    assert_eq!(tracker.last, Some(LifecycleState::Started));
    dispatch(&mut tracker, &Activity, LifecycleEvent::OnPause);
    assert!(tracker.paused);
}
