//! Grouping of accepted callbacks by event.
//!
//! A [`CallbackRegistry`] is created for one class, fed every
//! [`Acceptance`] of that class in discovery order, and then turned into the
//! [`ClassRegistryEntry`] the generator consumes.

use indexmap::IndexMap;

use crate::model::{ClassRef, LifecycleEventKind, MethodDescriptor};
use crate::validate::Acceptance;

/// Which leading slice of `(owner, event)` a callback receives.
///
/// The discriminants are bit flags so a call logger can record several call
/// shapes of the same method name in one mask. They match
/// `vigil_lifecycle::CallKind`, which generated code names by variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// No arguments.
    NoArgs = 1,
    /// The owner only.
    Owner = 2,
    /// The owner and the event.
    OwnerEvent = 4,
}

impl CallKind {
    /// Call kind for a method with `arity` parameters.
    ///
    /// Only meaningful for validated methods (arity 0 to 2).
    #[must_use]
    pub const fn from_arity(arity: usize) -> Self {
        match arity {
            0 => Self::NoArgs,
            1 => Self::Owner,
            _ => Self::OwnerEvent,
        }
    }

    /// Variant name used in generated code.
    #[must_use]
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::NoArgs => "NoArgs",
            Self::Owner => "Owner",
            Self::OwnerEvent => "OwnerEvent",
        }
    }
}

/// Accepted callbacks of one class, grouped by event.
///
/// Each group keeps discovery order: the class's own methods in declaration
/// order, then inherited methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRegistryEntry {
    class: ClassRef,
    callbacks: IndexMap<LifecycleEventKind, Vec<MethodDescriptor>>,
}

impl ClassRegistryEntry {
    /// The owning class.
    #[must_use]
    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    /// Callbacks registered for `event`, in discovery order.
    #[must_use]
    pub fn callbacks_for(&self, event: LifecycleEventKind) -> &[MethodDescriptor] {
        self.callbacks.get(&event).map_or(&[], Vec::as_slice)
    }

    /// Named events with at least one callback, in first-registration order.
    pub fn named_events(&self) -> impl Iterator<Item = LifecycleEventKind> + '_ {
        self.callbacks.keys().copied().filter(|event| !event.is_any())
    }

    /// Callbacks registered for the any-event id.
    #[must_use]
    pub fn any_callbacks(&self) -> &[MethodDescriptor] {
        self.callbacks_for(LifecycleEventKind::OnAny)
    }

    /// Iterates every registered callback, grouped by event.
    pub fn iter(&self) -> impl Iterator<Item = (LifecycleEventKind, &MethodDescriptor)> {
        self.callbacks
            .iter()
            .flat_map(|(event, methods)| methods.iter().map(move |method| (*event, method)))
    }

    /// Total number of registrations (a method bound to two events counts twice).
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.callbacks.values().map(Vec::len).sum()
    }
}

/// Collects accepted callbacks for one class.
#[derive(Debug)]
pub struct CallbackRegistry {
    class: ClassRef,
    callbacks: IndexMap<LifecycleEventKind, Vec<MethodDescriptor>>,
}

impl CallbackRegistry {
    /// Creates an empty registry owned by `class`.
    #[must_use]
    pub fn new(class: ClassRef) -> Self {
        Self {
            class,
            callbacks: IndexMap::new(),
        }
    }

    /// Registers an accepted method under each of its resolved events.
    ///
    /// Several methods may share an event; all are kept and all will be
    /// invoked, in registration order.
    pub fn register(&mut self, acceptance: Acceptance) {
        let Acceptance { method, events } = acceptance;
        tracing::trace!(
            class = %self.class,
            method = method.name(),
            ?events,
            "callback registered"
        );
        for event in events {
            self.callbacks.entry(event).or_default().push(method.clone());
        }
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Finishes the registry, returning `None` when nothing was registered.
    #[must_use]
    pub fn into_entry(self) -> Option<ClassRegistryEntry> {
        if self.callbacks.is_empty() {
            return None;
        }
        Some(ClassRegistryEntry {
            class: self.class,
            callbacks: self.callbacks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MethodId;
    use crate::validate::EventSet;

    fn accepted(id: u32, name: &str, events: &[LifecycleEventKind]) -> Acceptance {
        Acceptance {
            method: MethodDescriptor::new(MethodId(id), ClassRef::new("Foo"), name),
            events: events.iter().copied().collect::<EventSet>(),
        }
    }

    fn names(methods: &[MethodDescriptor]) -> Vec<&str> {
        methods.iter().map(MethodDescriptor::name).collect()
    }

    #[test]
    fn empty_registry_yields_no_entry() {
        let registry = CallbackRegistry::new(ClassRef::new("Foo"));
        assert!(registry.is_empty());
        assert!(registry.into_entry().is_none());
    }

    #[test]
    fn same_event_fans_out_in_registration_order() {
        let mut registry = CallbackRegistry::new(ClassRef::new("Foo"));
        registry.register(accepted(0, "first", &[LifecycleEventKind::OnStop]));
        registry.register(accepted(1, "second", &[LifecycleEventKind::OnStop]));

        let entry = registry.into_entry().expect("entry");
        assert_eq!(
            names(entry.callbacks_for(LifecycleEventKind::OnStop)),
            vec!["first", "second"]
        );
    }

    #[test]
    fn multi_event_method_registers_under_each_event() {
        let mut registry = CallbackRegistry::new(ClassRef::new("Foo"));
        registry.register(accepted(
            0,
            "visibility",
            &[LifecycleEventKind::OnStart, LifecycleEventKind::OnStop],
        ));
        registry.register(accepted(1, "any", &[LifecycleEventKind::OnAny]));

        let entry = registry.into_entry().expect("entry");
        assert_eq!(entry.registration_count(), 3);
        assert_eq!(
            entry.named_events().collect::<Vec<_>>(),
            vec![LifecycleEventKind::OnStart, LifecycleEventKind::OnStop]
        );
        assert_eq!(names(entry.any_callbacks()), vec!["any"]);
        assert_eq!(
            entry
                .iter()
                .map(|(event, method)| (event, method.name()))
                .collect::<Vec<_>>(),
            vec![
                (LifecycleEventKind::OnStart, "visibility"),
                (LifecycleEventKind::OnStop, "visibility"),
                (LifecycleEventKind::OnAny, "any"),
            ]
        );
        assert!(entry.callbacks_for(LifecycleEventKind::OnPause).is_empty());
    }

    #[test]
    fn call_kind_follows_arity() {
        assert_eq!(CallKind::from_arity(0), CallKind::NoArgs);
        assert_eq!(CallKind::from_arity(1), CallKind::Owner);
        assert_eq!(CallKind::from_arity(2), CallKind::OwnerEvent);
        assert_eq!(CallKind::OwnerEvent as u8, 4);
    }
}
