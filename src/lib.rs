//! Reflection-free lifecycle observers for Rust.
//!
//! Annotate lifecycle callbacks on an impl block with `#[lifecycle_observer]`
//! and `#[on_lifecycle_event]`; callback signatures are validated at compile
//! time and a dispatching adapter is generated for the type.

pub use vigil_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use vigil_internal::prelude::*;
}
