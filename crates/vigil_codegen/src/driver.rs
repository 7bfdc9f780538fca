//! The pass driver.
//!
//! [`Processor`] runs every candidate class through
//! `Discover → Validate → (Fail | Generate)`:
//!
//! - **Discover** takes the class's flattened annotated methods and drops
//!   inherited ones overridden by an earlier method with the same signature.
//! - **Validate** checks every remaining method. It never stops early, so one
//!   pass reports every independent error of the class.
//! - **Fail** if anything was rejected: the class gets no generated unit.
//! - **Generate** otherwise: exactly one unit for the class.
//!
//! Classes share no state. Each gets its own reporter and registry, so
//! processing order does not change outcomes and hosts may fan classes out
//! across threads.
//!
//! # Example
//!
//! ```
//! use vigil_codegen::config::ProcessorConfig;
//! use vigil_codegen::driver::Processor;
//! use vigil_codegen::model::{ClassDecl, ClassRef, LifecycleEventKind, MethodDescriptor, MethodId};
//!
//! let processor = Processor::new(ProcessorConfig::default()).unwrap();
//! let class = ClassDecl::new(ClassRef::new("Bar")).with_method(
//!     MethodDescriptor::new(MethodId(0), ClassRef::new("Bar"), "on_start")
//!         .on_event(LifecycleEventKind::OnStart),
//! );
//!
//! let report = processor.process([&class]).unwrap();
//! assert!(report.is_success());
//! assert_eq!(report.units()[0].name(), "BarLifecycleAdapter");
//! ```

use serde::Serialize;

use crate::config::ProcessorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticReporter};
use crate::error::ProcessorError;
use crate::generate::{AdapterGenerator, GeneratedUnit};
use crate::model::{ClassDecl, ClassRef, MethodDescriptor};
use crate::registry::CallbackRegistry;
use crate::validate::{SignatureValidator, ValidationOutcome};

/// Terminal state of one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassOutcome {
    /// The class has no annotated methods; nothing is generated.
    Skipped,
    /// At least one method was rejected; nothing is generated.
    Failed(Vec<Diagnostic>),
    /// Every method passed; one unit was generated.
    Generated(GeneratedUnit),
}

impl ClassOutcome {
    /// Returns `true` unless the class failed validation.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingReport {
    diagnostics: Vec<Diagnostic>,
    units: Vec<GeneratedUnit>,
    failed_classes: Vec<String>,
}

impl ProcessingReport {
    /// `true` when nothing was rejected anywhere in the run.
    ///
    /// Hosts must fail the overall compilation when this is `false`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics across all classes, in processing order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Generated units, in processing order.
    #[must_use]
    pub fn units(&self) -> &[GeneratedUnit] {
        &self.units
    }

    /// Qualified names of classes that failed.
    #[must_use]
    pub fn failed_classes(&self) -> &[String] {
        &self.failed_classes
    }

    /// Returns the unit generated for `class`, if any.
    #[must_use]
    pub fn unit_for(&self, class: &ClassRef, generator: &AdapterGenerator) -> Option<&GeneratedUnit> {
        let name = generator.adapter_name(class);
        let namespace = class.namespace();
        self.units
            .iter()
            .find(|unit| unit.name() == name && unit.namespace() == namespace)
    }

    /// Serializes the report for IDE and build-tool consumers.
    ///
    /// # Errors
    ///
    /// Propagates [`serde_json::Error`].
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn record(&mut self, class: &ClassRef, outcome: ClassOutcome) {
        match outcome {
            ClassOutcome::Skipped => {}
            ClassOutcome::Failed(diagnostics) => {
                self.failed_classes.push(class.qualified_name());
                self.diagnostics.extend(diagnostics);
            }
            ClassOutcome::Generated(unit) => self.units.push(unit),
        }
    }
}

/// Validates callback classes and generates their adapters.
#[derive(Debug, Clone)]
pub struct Processor {
    validator: SignatureValidator,
    generator: AdapterGenerator,
}

impl Processor {
    /// Creates a processor for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::InvalidRuntimePath`] for an unparsable
    /// runtime path.
    pub fn new(config: ProcessorConfig) -> Result<Self, ProcessorError> {
        Ok(Self {
            validator: SignatureValidator::from_config(&config),
            generator: AdapterGenerator::new(&config)?,
        })
    }

    /// The generator used for successful classes.
    #[must_use]
    pub fn generator(&self) -> &AdapterGenerator {
        &self.generator
    }

    /// Processes every class of a source-model snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProcessorError`] raised while generating. Signature
    /// problems are reported in the returned report, not as errors.
    pub fn process<'a, I>(&self, classes: I) -> Result<ProcessingReport, ProcessorError>
    where
        I: IntoIterator<Item = &'a ClassDecl>,
    {
        let _span = tracing::info_span!("vigil_process").entered();
        let mut report = ProcessingReport::default();
        for class in classes {
            let outcome = self.process_class(class)?;
            report.record(class.class(), outcome);
        }
        tracing::info!(
            units = report.units.len(),
            diagnostics = report.diagnostics.len(),
            success = report.is_success(),
            "processing finished"
        );
        Ok(report)
    }

    /// Processes one class.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessorError`] if generation hits a name that is not a
    /// Rust identifier.
    pub fn process_class(&self, decl: &ClassDecl) -> Result<ClassOutcome, ProcessorError> {
        let class = decl.class();
        let _span = tracing::debug_span!("process_class", class = %class).entered();

        let methods = discover(decl);
        if methods.is_empty() {
            tracing::debug!("no annotated methods, skipping");
            return Ok(ClassOutcome::Skipped);
        }

        let mut reporter = DiagnosticReporter::new();
        let mut registry = CallbackRegistry::new(class.clone());
        for method in methods {
            match self.validator.validate(method) {
                ValidationOutcome::Accepted(acceptance) => registry.register(acceptance),
                ValidationOutcome::Rejected(rejection) => reporter.report(rejection),
            }
        }

        if reporter.has_errors() {
            tracing::debug!(
                errors = reporter.diagnostics().len(),
                "class failed validation"
            );
            return Ok(ClassOutcome::Failed(reporter.into_diagnostics()));
        }

        match registry.into_entry() {
            Some(entry) => Ok(ClassOutcome::Generated(self.generator.generate(&entry)?)),
            None => Ok(ClassOutcome::Skipped),
        }
    }
}

/// Flattened methods with overridden inherited methods removed.
///
/// Earlier descriptors win: the host lists the class's own methods before
/// inherited ones, so a subclass override hides the superclass method.
fn discover(decl: &ClassDecl) -> Vec<MethodDescriptor> {
    let mut methods: Vec<MethodDescriptor> = Vec::with_capacity(decl.methods().len());
    for method in decl.methods() {
        let shadowed = method.declaring_class() != decl.class()
            && methods.iter().any(|kept| kept.same_signature(method));
        if shadowed {
            tracing::trace!(
                method = method.name(),
                declaring_class = %method.declaring_class(),
                "inherited callback shadowed"
            );
            continue;
        }
        methods.push(method.clone());
    }
    methods
}
