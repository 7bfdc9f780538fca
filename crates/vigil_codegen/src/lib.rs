//! Compile-time processing of lifecycle callback classes.
//!
//! This crate is the host-independent engine behind `#[lifecycle_observer]`.
//! A host (the proc macro, a build script, an IDE plugin) describes candidate
//! classes with the [`model`] types; the engine validates every annotated
//! callback's signature, reports all violations, and emits one adapter source
//! unit per valid class. The emitted adapter dispatches lifecycle events to
//! the callbacks with direct calls, so the runtime needs no reflection.
//!
//! # Quick Start
//!
//! ```
//! use vigil_codegen::prelude::*;
//!
//! let bar = ClassRef::new("Bar");
//! let owner = TypeRef::named("&dyn LifecycleOwner").assignable_to("LifecycleOwner");
//! let decl = ClassDecl::new(bar.clone()).with_method(
//!     MethodDescriptor::new(MethodId(0), bar, "on_stop")
//!         .with_param(owner)
//!         .on_event(LifecycleEventKind::OnStop),
//! );
//!
//! let processor = Processor::new(ProcessorConfig::default()).unwrap();
//! let report = processor.process([&decl]).unwrap();
//!
//! assert!(report.is_success());
//! assert!(report.units()[0].body().contains("on_stop"));
//! ```
//!
//! # Architecture
//!
//! - [`SignatureValidator`] checks one method against the parameter rules
//! - [`DiagnosticReporter`] collects rejections as [`Diagnostic`]s
//! - [`CallbackRegistry`] groups accepted methods by event
//! - [`AdapterGenerator`] turns a registry entry into a [`GeneratedUnit`]
//! - [`Processor`] drives each class through all of the above

pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod generate;
pub mod model;
pub mod registry;
pub mod validate;

pub use config::ProcessorConfig;
pub use diagnostics::{
    Diagnostic, DiagnosticReporter, INVALID_FIRST_ARGUMENT, INVALID_SECOND_ARGUMENT,
    TOO_MANY_ARGS_ERROR_MSG,
};
pub use driver::{ClassOutcome, ProcessingReport, Processor};
pub use error::ProcessorError;
pub use generate::{AdapterGenerator, GENERATED_HEADER, GeneratedUnit};
pub use model::{
    ClassDecl, ClassRef, LifecycleEventKind, MethodDescriptor, MethodId, Receiver, SourceLocation,
    TypeRef,
};
pub use registry::{CallKind, CallbackRegistry, ClassRegistryEntry};
pub use validate::{
    Acceptance, ErrorKind, EventSet, MAX_CALLBACK_PARAMS, Rejection, SignatureValidator,
    ValidationOutcome,
};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::{
        ClassDecl, ClassOutcome, ClassRef, Diagnostic, ErrorKind, GeneratedUnit, LifecycleEventKind,
        MethodDescriptor, MethodId, ProcessingReport, Processor, ProcessorConfig, Receiver,
        SourceLocation, TypeRef,
    };
}
