mod screens {
    use vigil_lifecycle::{LifecycleOwner, lifecycle_observer};

    pub struct Detail {
        pub visible: bool,
    }

    #[lifecycle_observer(crate = "::vigil_lifecycle")]
    impl Detail {
        #[on_lifecycle_event(OnStart)]
        fn show(&mut self, _owner: &dyn LifecycleOwner) {
            self.visible = true;
        }

        #[on_lifecycle_event(OnStop)]
        fn hide(&mut self) {
            self.visible = false;
        }
    }
}

use vigil_lifecycle::{LifecycleEvent, LifecycleOwner, LifecycleState, dispatch};

struct Host;

impl LifecycleOwner for Host {
    fn current_state(&self) -> LifecycleState {
        LifecycleState::Started
    }
}

fn main() {
    let mut detail = screens::Detail { visible: false };
    dispatch(&mut detail, &Host, LifecycleEvent::OnStart);
    assert!(detail.visible);
    dispatch(&mut detail, &Host, LifecycleEvent::OnStop);
    assert!(!detail.visible);
}
