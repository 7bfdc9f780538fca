//! Lifecycle events and states.

use core::fmt;

/// An event delivered to lifecycle observers.
///
/// [`OnAny`](Self::OnAny) only selects callbacks: those bound to it run for
/// every other event, and [`dispatch`](crate::dispatch) ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The owner was created.
    OnCreate,
    /// The owner became visible.
    OnStart,
    /// The owner gained focus.
    OnResume,
    /// The owner lost focus.
    OnPause,
    /// The owner is no longer visible.
    OnStop,
    /// The owner is being destroyed.
    OnDestroy,
    /// Matches every event.
    OnAny,
}

impl LifecycleEvent {
    /// The six dispatchable events, in lifecycle order.
    pub const DISPATCHABLE: [Self; 6] = [
        Self::OnCreate,
        Self::OnStart,
        Self::OnResume,
        Self::OnPause,
        Self::OnStop,
        Self::OnDestroy,
    ];

    /// State the owner is in once this event has been dispatched.
    ///
    /// `None` for [`OnAny`](Self::OnAny).
    #[must_use]
    pub const fn target_state(self) -> Option<LifecycleState> {
        match self {
            Self::OnCreate | Self::OnStop => Some(LifecycleState::Created),
            Self::OnStart | Self::OnPause => Some(LifecycleState::Started),
            Self::OnResume => Some(LifecycleState::Resumed),
            Self::OnDestroy => Some(LifecycleState::Destroyed),
            Self::OnAny => None,
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OnCreate => "ON_CREATE",
            Self::OnStart => "ON_START",
            Self::OnResume => "ON_RESUME",
            Self::OnPause => "ON_PAUSE",
            Self::OnStop => "ON_STOP",
            Self::OnDestroy => "ON_DESTROY",
            Self::OnAny => "ON_ANY",
        };
        f.write_str(name)
    }
}

/// Where a lifecycle owner currently is.
///
/// Ordered so that `Destroyed < Initialized < Created < Started < Resumed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LifecycleState {
    /// Destroyed; no more events will be dispatched.
    Destroyed,
    /// Constructed but not yet created.
    #[default]
    Initialized,
    /// Created, or stopped.
    Created,
    /// Started, or paused.
    Started,
    /// Resumed.
    Resumed,
}

impl LifecycleState {
    /// Returns `true` if this state is `state` or later.
    #[must_use]
    pub fn is_at_least(self, state: Self) -> bool {
        self >= state
    }
}
