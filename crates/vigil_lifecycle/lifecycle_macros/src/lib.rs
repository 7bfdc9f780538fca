//! Procedural macros for Vigil lifecycle observers.
//!
//! Provides `#[lifecycle_observer]` for inherent impl blocks and the
//! `#[on_lifecycle_event]` marker for the callbacks inside them.

mod extract;
mod observer;

use proc_macro::TokenStream;

/// Generates a lifecycle adapter for the annotated callbacks of an impl block.
///
/// Every method marked `#[on_lifecycle_event(...)]` becomes a callback. A
/// callback may take no parameters, the owner (`&dyn LifecycleOwner`, lifetime
/// parameters allowed), or the owner and the event (`LifecycleEvent`). All
/// signature errors of the block are reported together, at the offending
/// methods.
///
/// # Arguments
///
/// - `crate = "path"`: path to `vigil_lifecycle` in generated code (detected
///   from `Cargo.toml` by default)
/// - `call_logger = false`: omit `MethodCallsLogger` guards
///
/// # Example
///
/// ```
/// use vigil_lifecycle::{LifecycleEvent, LifecycleOwner, lifecycle_observer};
///
/// struct Bar;
///
/// #[lifecycle_observer]
/// impl Bar {
///     #[on_lifecycle_event(OnStop)]
///     fn on_stop(&self, owner: &dyn LifecycleOwner) {}
///
///     #[on_lifecycle_event]
///     fn any(&self, owner: &dyn LifecycleOwner, event: LifecycleEvent) {}
/// }
/// ```
#[proc_macro_attribute]
pub fn lifecycle_observer(attr: TokenStream, item: TokenStream) -> TokenStream {
    observer::expand(attr.into(), item.into()).into()
}

/// Marks a method as a lifecycle callback.
///
/// Only meaningful inside a `#[lifecycle_observer]` impl block, which strips
/// it. `#[on_lifecycle_event(OnStart, OnStop)]` binds the method to the listed
/// events; a bare `#[on_lifecycle_event]` binds it to every event.
#[proc_macro_attribute]
pub fn on_lifecycle_event(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut out = syn::Error::new(
        proc_macro2::Span::call_site(),
        "#[on_lifecycle_event] must be used on a method inside a #[lifecycle_observer] impl block",
    )
    .to_compile_error();
    out.extend(proc_macro2::TokenStream::from(item));
    out.into()
}
