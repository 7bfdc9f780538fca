//! # Vigil Internal Library
//!
//! Re-exports the core Vigil crates for convenience.

/// Runtime: lifecycle capability types, the adapter contract and the macros.
pub use vigil_lifecycle;

/// Compile time: the validation and generation engine behind the macros.
pub use vigil_codegen;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use vigil_lifecycle::{
        GeneratedAdapter, LifecycleEvent, LifecycleObserver, LifecycleOwner, LifecycleState,
        MethodCallsLogger, dispatch, dispatch_all, lifecycle_observer, on_lifecycle_event,
    };
}
