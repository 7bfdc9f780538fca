//! Lifecycle observers without runtime reflection.
//!
//! Annotate callback methods on an inherent impl block and let
//! `#[lifecycle_observer]` generate the adapter that dispatches events to
//! them. Callback signatures are checked at compile time: a callback takes no
//! parameters, the owner, or the owner and the event.
//!
//! # Quick Start
//!
//! ```
//! use vigil_lifecycle::{
//!     LifecycleEvent, LifecycleOwner, LifecycleState, dispatch, lifecycle_observer,
//! };
//!
//! struct Screen;
//!
//! impl LifecycleOwner for Screen {
//!     fn current_state(&self) -> LifecycleState {
//!         LifecycleState::Started
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Player {
//!     playing: bool,
//! }
//!
//! #[lifecycle_observer]
//! impl Player {
//!     #[on_lifecycle_event(OnStart)]
//!     fn resume(&mut self) {
//!         self.playing = true;
//!     }
//!
//!     #[on_lifecycle_event(OnStop)]
//!     fn halt(&mut self, _owner: &dyn LifecycleOwner) {
//!         self.playing = false;
//!     }
//! }
//!
//! let mut player = Player::default();
//! dispatch(&mut player, &Screen, LifecycleEvent::OnStart);
//! assert!(player.playing);
//! ```
//!
//! # Architecture
//!
//! - [`LifecycleOwner`] / [`LifecycleEvent`]: the two capability types
//!   callbacks may receive
//! - [`GeneratedAdapter`]: implemented by every generated adapter
//! - [`LifecycleObserver`]: implemented for the annotated type, hands out
//!   its adapter
//! - [`MethodCallsLogger`]: runs each callback once when adapters share a
//!   receiver

// Self-reference so `#[lifecycle_observer]` output can use `vigil_lifecycle::` paths within this crate.
extern crate self as vigil_lifecycle;

pub mod adapter;
pub mod event;
pub mod logger;
pub mod owner;

pub use adapter::{GeneratedAdapter, LifecycleObserver, dispatch, dispatch_all};
pub use event::{LifecycleEvent, LifecycleState};
pub use logger::{CallKind, MethodCallsLogger};
pub use owner::LifecycleOwner;

// Re-export proc macros.
pub use vigil_lifecycle_macros::{lifecycle_observer, on_lifecycle_event};
