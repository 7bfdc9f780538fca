//! The dispatch contract implemented by generated adapters.

use crate::event::LifecycleEvent;
use crate::logger::MethodCallsLogger;
use crate::owner::LifecycleOwner;

/// Dispatches lifecycle events to a receiver's callbacks.
///
/// Implemented by the adapters `#[lifecycle_observer]` generates. On each
/// event the adapter calls the callbacks bound to that event, then the
/// any-event callbacks, each group in declaration order.
pub trait GeneratedAdapter {
    /// Calls every callback registered for `event`.
    ///
    /// With a `logger`, a callback already approved for this event (through
    /// another adapter sharing the logger) is skipped.
    fn call_methods(
        &mut self,
        owner: &dyn LifecycleOwner,
        event: LifecycleEvent,
        logger: Option<&mut MethodCallsLogger>,
    );
}

/// A type with a generated lifecycle adapter.
pub trait LifecycleObserver {
    /// The generated adapter, borrowing the observer.
    type Adapter<'r>: GeneratedAdapter
    where
        Self: 'r;

    /// Returns an adapter dispatching to `self`.
    fn lifecycle_adapter(&mut self) -> Self::Adapter<'_>;
}

/// Dispatches `event` to a single observer.
///
/// [`LifecycleEvent::OnAny`] only selects callbacks and is ignored here.
pub fn dispatch<O>(observer: &mut O, owner: &dyn LifecycleOwner, event: LifecycleEvent)
where
    O: LifecycleObserver + ?Sized,
{
    if event == LifecycleEvent::OnAny {
        tracing::debug!("ignoring dispatch of ON_ANY");
        return;
    }
    tracing::trace!(%event, "dispatching lifecycle event");
    observer.lifecycle_adapter().call_methods(owner, event, None);
}

/// Dispatches `event` through several adapters sharing one call logger.
///
/// Callbacks are identified by method name and call kind, so a callback
/// reachable through more than one adapter runs once. Intended for adapters
/// serving the same receiver. [`LifecycleEvent::OnAny`] is ignored.
pub fn dispatch_all(
    adapters: &mut [&mut dyn GeneratedAdapter],
    owner: &dyn LifecycleOwner,
    event: LifecycleEvent,
) {
    if event == LifecycleEvent::OnAny {
        tracing::debug!("ignoring dispatch of ON_ANY");
        return;
    }
    tracing::trace!(%event, adapters = adapters.len(), "dispatching lifecycle event");
    let mut logger = MethodCallsLogger::new();
    for adapter in adapters.iter_mut() {
        adapter.call_methods(owner, event, Some(&mut logger));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LifecycleState;
    use crate::logger::CallKind;

    struct Owner;

    impl LifecycleOwner for Owner {
        fn current_state(&self) -> LifecycleState {
            LifecycleState::Started
        }
    }

    /// Hand-written adapter calling a shared `on_stop` through the logger.
    struct Counting<'a> {
        calls: &'a mut Vec<&'static str>,
        label: &'static str,
    }

    impl GeneratedAdapter for Counting<'_> {
        fn call_methods(
            &mut self,
            _owner: &dyn LifecycleOwner,
            event: LifecycleEvent,
            mut logger: Option<&mut MethodCallsLogger>,
        ) {
            if event == LifecycleEvent::OnStop
                && logger
                    .as_deref_mut()
                    .is_none_or(|logger| logger.approve_call("on_stop", CallKind::NoArgs))
            {
                self.calls.push(self.label);
            }
        }
    }

    #[test]
    fn shared_logger_runs_each_callback_once() {
        let mut first_calls = Vec::new();
        let mut second_calls = Vec::new();
        let mut first = Counting {
            calls: &mut first_calls,
            label: "first",
        };
        let mut second = Counting {
            calls: &mut second_calls,
            label: "second",
        };

        dispatch_all(&mut [&mut first, &mut second], &Owner, LifecycleEvent::OnStop);

        assert_eq!(first_calls, vec!["first"]);
        assert!(second_calls.is_empty());
    }

    #[test]
    fn any_event_is_not_dispatched() {
        let mut calls = Vec::new();
        let mut adapter = Counting {
            calls: &mut calls,
            label: "a",
        };
        dispatch_all(&mut [&mut adapter], &Owner, LifecycleEvent::OnAny);
        assert!(calls.is_empty());
    }

    #[test]
    fn without_logger_every_adapter_runs() {
        let mut calls = Vec::new();
        let mut adapter = Counting {
            calls: &mut calls,
            label: "a",
        };
        adapter.call_methods(&Owner, LifecycleEvent::OnStop, None);
        adapter.call_methods(&Owner, LifecycleEvent::OnStop, None);
        assert_eq!(calls, vec!["a", "a"]);
    }
}
