//! De-duplication of callback calls across adapters.
//!
//! When several generated adapters serve the same receiver (for example an
//! adapter per type in a hierarchy), an inherited callback could be reached
//! through more than one of them. A shared [`MethodCallsLogger`] makes sure
//! each `(method, call kind)` runs at most once per dispatched event.

use hashbrown::HashMap;

/// Which leading slice of `(owner, event)` a callback receives.
///
/// The discriminants are bit flags in the logger's per-method mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CallKind {
    /// No arguments.
    NoArgs = 1,
    /// The owner only.
    Owner = 2,
    /// The owner and the event.
    OwnerEvent = 4,
}

impl CallKind {
    const fn bit(self) -> u8 {
        self as u8
    }
}

/// Records which callbacks already ran for the current event.
///
/// Create one per dispatched event and pass it to every adapter.
#[derive(Debug, Default)]
pub struct MethodCallsLogger {
    called: HashMap<String, u8>,
}

impl MethodCallsLogger {
    /// Creates an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `name` has not yet been called with `kind`, and
    /// records the call.
    pub fn approve_call(&mut self, name: &str, kind: CallKind) -> bool {
        let mask = self.called.entry_ref(name).or_insert(0);
        let seen = *mask & kind.bit() != 0;
        *mask |= kind.bit();
        if seen {
            tracing::trace!(method = name, ?kind, "duplicate callback suppressed");
        }
        !seen
    }

    /// Number of distinct method names recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.called.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.called.is_empty()
    }
}
