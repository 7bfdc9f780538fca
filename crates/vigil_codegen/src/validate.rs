//! Signature validation for callback methods.
//!
//! A callback may declare up to two parameters. When present, the first must
//! be assignable to the lifecycle owner capability and the second must be
//! exactly the lifecycle event type. Rules are checked in that order and the
//! first failure wins, so every method yields at most one [`ErrorKind`].

use core::fmt;

use indexmap::IndexSet;
use serde::Serialize;

use crate::config::ProcessorConfig;
use crate::diagnostics::{INVALID_FIRST_ARGUMENT, INVALID_SECOND_ARGUMENT, TOO_MANY_ARGS_ERROR_MSG};
use crate::model::{LifecycleEventKind, MethodDescriptor};

/// Maximum number of parameters a callback may declare.
pub const MAX_CALLBACK_PARAMS: usize = 2;

/// Why a callback signature was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// More than [`MAX_CALLBACK_PARAMS`] parameters.
    TooManyArguments,
    /// The first parameter is not owner-compatible.
    InvalidFirstArgument,
    /// The second parameter is not the event type.
    InvalidSecondArgument,
}

impl ErrorKind {
    /// The fixed diagnostic text for this kind.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::TooManyArguments => TOO_MANY_ARGS_ERROR_MSG,
            Self::InvalidFirstArgument => INVALID_FIRST_ARGUMENT,
            Self::InvalidSecondArgument => INVALID_SECOND_ARGUMENT,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Events a method is registered under after resolution.
///
/// Either the reserved [`OnAny`](LifecycleEventKind::OnAny) id alone, or the
/// distinct named events in declaration order.
pub type EventSet = IndexSet<LifecycleEventKind>;

/// A method that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    /// The validated method.
    pub method: MethodDescriptor,
    /// Events to register the method under.
    pub events: EventSet,
}

/// A method that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The offending method.
    pub method: MethodDescriptor,
    /// The first rule it broke.
    pub kind: ErrorKind,
}

/// Result of validating one method.
///
/// Each outcome is moved into exactly one consumer: the
/// [`DiagnosticReporter`](crate::diagnostics::DiagnosticReporter) for
/// rejections or the [`CallbackRegistry`](crate::registry::CallbackRegistry)
/// for acceptances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The signature is well-formed.
    Accepted(Acceptance),
    /// The signature broke a rule.
    Rejected(Rejection),
}

impl ValidationOutcome {
    /// Returns the error kind for a rejection.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(rejection.kind),
        }
    }

    /// Returns `true` for an acceptance.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Checks callback signatures against the owner and event capability types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureValidator {
    owner_type: String,
    event_type: String,
}

impl SignatureValidator {
    /// Creates a validator for the given capability type names.
    #[must_use]
    pub fn new(owner_type: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            owner_type: owner_type.into(),
            event_type: event_type.into(),
        }
    }

    /// Creates a validator from the capability types in `config`.
    #[must_use]
    pub fn from_config(config: &ProcessorConfig) -> Self {
        Self::new(config.owner_type.clone(), config.event_type.clone())
    }

    /// Validates one method.
    #[must_use]
    pub fn validate(&self, method: MethodDescriptor) -> ValidationOutcome {
        match self.check(&method) {
            Ok(()) => {
                let events = resolve_events(method.declared_events());
                ValidationOutcome::Accepted(Acceptance { method, events })
            }
            Err(kind) => ValidationOutcome::Rejected(Rejection { method, kind }),
        }
    }

    fn check(&self, method: &MethodDescriptor) -> Result<(), ErrorKind> {
        let params = method.params();
        if params.len() > MAX_CALLBACK_PARAMS {
            return Err(ErrorKind::TooManyArguments);
        }
        if let Some(first) = params.first()
            && !first.is_assignable_to(&self.owner_type)
        {
            return Err(ErrorKind::InvalidFirstArgument);
        }
        if let Some(second) = params.get(1)
            && second.name() != self.event_type
        {
            return Err(ErrorKind::InvalidSecondArgument);
        }
        Ok(())
    }
}

impl Default for SignatureValidator {
    fn default() -> Self {
        Self::from_config(&ProcessorConfig::default())
    }
}

/// Collapses declared events into the set the method is registered under.
///
/// No declared events, or `OnAny` among them, resolves to `OnAny` alone so a
/// method is never invoked twice for one event.
fn resolve_events(declared: &[LifecycleEventKind]) -> EventSet {
    if declared.is_empty() || declared.iter().any(|event| event.is_any()) {
        return IndexSet::from([LifecycleEventKind::OnAny]);
    }
    declared.iter().copied().collect()
}
