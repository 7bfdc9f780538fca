//! Diagnostics for rejected callback signatures.
//!
//! Message texts are fixed. Tests and IDE integrations match on them
//! verbatim, so they are exported as constants and never formatted with
//! method names.

use core::fmt;

use serde::Serialize;

use crate::model::{MethodId, SourceLocation};
use crate::validate::{ErrorKind, Rejection};

/// Reported when a callback declares more than two parameters.
pub const TOO_MANY_ARGS_ERROR_MSG: &str = "callback method cannot have more than 2 parameters";

/// Reported when a callback's first parameter is not a lifecycle owner.
pub const INVALID_FIRST_ARGUMENT: &str = "1st argument of a callback method must be a LifecycleOwner which represents the source of the event";

/// Reported when a callback's second parameter is not the lifecycle event.
pub const INVALID_SECOND_ARGUMENT: &str =
    "2nd argument of a callback method must be LifecycleEvent and represent the current event";

/// One reported error, located at the offending method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Host handle of the offending method.
    pub method: MethodId,
    /// Qualified name of the class declaring the method.
    pub class: String,
    /// Name of the offending method.
    pub method_name: String,
    /// Source location, if the host provided one.
    pub location: Option<SourceLocation>,
    /// The rule that failed.
    pub kind: ErrorKind,
    /// Fixed message text for `kind`.
    pub message: &'static str,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{location}: error: {}", self.message),
            None => write!(
                f,
                "{}::{}: error: {}",
                self.class, self.method_name, self.message
            ),
        }
    }
}

/// Accumulates diagnostics for one class.
///
/// Reporting never fails and never stops the pass; the driver inspects
/// [`has_errors`](Self::has_errors) once every method has been validated.
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic for a rejected method.
    pub fn report(&mut self, rejection: Rejection) {
        let Rejection { method, kind } = rejection;
        tracing::debug!(
            class = %method.declaring_class(),
            method = method.name(),
            ?kind,
            "callback rejected"
        );
        self.diagnostics.push(Diagnostic {
            method: method.id(),
            class: method.declaring_class().qualified_name(),
            method_name: method.name().to_string(),
            location: method.location().cloned(),
            kind,
            message: kind.message(),
        });
    }

    /// Returns `true` once anything has been reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Diagnostics in report order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the reporter, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
