//! The lifecycle owner capability.

use crate::event::LifecycleState;

/// A component with a lifecycle: the source of every dispatched event.
///
/// Callbacks taking one or two parameters receive the owner as
/// `&dyn LifecycleOwner`. References to concrete owner types are rejected,
/// since the adapter only holds the trait object.
pub trait LifecycleOwner {
    /// The owner's current state.
    fn current_state(&self) -> LifecycleState;
}

impl<T: LifecycleOwner + ?Sized> LifecycleOwner for &T {
    fn current_state(&self) -> LifecycleState {
        (**self).current_state()
    }
}

impl<T: LifecycleOwner + ?Sized> LifecycleOwner for Box<T> {
    fn current_state(&self) -> LifecycleState {
        (**self).current_state()
    }
}
