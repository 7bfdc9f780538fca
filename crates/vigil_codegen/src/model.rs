//! Abstract source model consumed by the engine.
//!
//! Hosts (the `#[lifecycle_observer]` macro, a build script, an IDE plugin)
//! translate their own view of the code into these types. The engine never
//! inspects host syntax directly.
//!
//! # Inheritance
//!
//! The engine does not walk type hierarchies. A [`ClassDecl`] carries a flat,
//! pre-resolved list of annotated methods: the class's own methods first, in
//! declaration order, followed by inherited methods. Shadowed inherited
//! methods are removed by the [`Processor`](crate::driver::Processor) during
//! discovery.

use core::fmt;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Host-assigned handle for an annotated method.
///
/// The engine copies it into every [`Diagnostic`](crate::diagnostics::Diagnostic)
/// so the host can map the error back to its own element (a span, an AST node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MethodId(pub u32);

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A position in host source code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// File path as reported by the host.
    pub file: String,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

impl SourceLocation {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Identity of a class (a Rust type owning an inherent impl block).
///
/// `module_path` is relative to the crate root. An empty module path means
/// "the module the generated unit is emitted into".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassRef {
    module_path: Vec<String>,
    name: String,
}

impl ClassRef {
    /// A class living in the current module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            module_path: Vec::new(),
            name: name.into(),
        }
    }

    /// A class living in the given module, relative to the crate root.
    #[must_use]
    pub fn in_module<I, S>(module_path: I, name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module_path: module_path.into_iter().map(Into::into).collect(),
            name: name.into(),
        }
    }

    /// The simple type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module path segments, relative to the crate root.
    #[must_use]
    pub fn module_path(&self) -> &[String] {
        &self.module_path
    }

    /// Module path joined with `::`. Empty for the current module.
    #[must_use]
    pub fn namespace(&self) -> String {
        self.module_path.join("::")
    }

    /// Fully qualified name, e.g. `ui::screens::Bar`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.module_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace(), self.name)
        }
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// A parameter or return type as resolved by the host.
///
/// `name` is the host's canonical spelling of the type. `assignable_to` lists
/// every capability the type can be used as; the host resolves this up front
/// so validation needs no access to the host's type system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    name: String,
    assignable_to: BTreeSet<String>,
}

impl TypeRef {
    /// A type with no known capabilities beyond itself.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assignable_to: BTreeSet::new(),
        }
    }

    /// Declares that this type is assignable to `capability`.
    #[must_use]
    pub fn assignable_to(mut self, capability: impl Into<String>) -> Self {
        self.assignable_to.insert(capability.into());
        self
    }

    /// The canonical type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capabilities this type is assignable to, in sorted order.
    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.assignable_to.iter().map(String::as_str)
    }

    /// Returns `true` if a value of this type can be used where `target` is expected.
    #[must_use]
    pub fn is_assignable_to(&self, target: &str) -> bool {
        self.name == target || self.assignable_to.contains(target)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle event identifiers a callback can be bound to.
///
/// [`OnAny`](Self::OnAny) is the reserved id meaning "invoked for every
/// lifecycle event".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifecycleEventKind {
    /// The owner was created.
    OnCreate,
    /// The owner became visible.
    OnStart,
    /// The owner gained focus.
    OnResume,
    /// The owner lost focus.
    OnPause,
    /// The owner is no longer visible.
    OnStop,
    /// The owner is being destroyed.
    OnDestroy,
    /// Matches every event.
    OnAny,
}

impl LifecycleEventKind {
    /// Every event id, in lifecycle order, ending with `OnAny`.
    pub const ALL: [Self; 7] = [
        Self::OnCreate,
        Self::OnStart,
        Self::OnResume,
        Self::OnPause,
        Self::OnStop,
        Self::OnDestroy,
        Self::OnAny,
    ];

    /// The variant name used in source, e.g. `"OnStop"`.
    #[must_use]
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::OnCreate => "OnCreate",
            Self::OnStart => "OnStart",
            Self::OnResume => "OnResume",
            Self::OnPause => "OnPause",
            Self::OnStop => "OnStop",
            Self::OnDestroy => "OnDestroy",
            Self::OnAny => "OnAny",
        }
    }

    /// Parses a variant name produced by [`variant_name`](Self::variant_name).
    #[must_use]
    pub fn from_variant_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.variant_name() == name)
    }

    /// Returns `true` for the reserved any-event id.
    #[must_use]
    pub const fn is_any(self) -> bool {
        matches!(self, Self::OnAny)
    }
}

impl fmt::Display for LifecycleEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.variant_name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Methods
// ─────────────────────────────────────────────────────────────────────────────

/// How generated code reaches the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Receiver {
    /// No receiver; called as an associated function on the declaring class.
    None,
    /// `&self`.
    #[default]
    Shared,
    /// `&mut self`.
    Mutable,
}

/// One annotated callback method, as extracted from the host.
///
/// Built once with the `with_*` methods and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    id: MethodId,
    declaring_class: ClassRef,
    name: String,
    params: Vec<TypeRef>,
    return_type: Option<TypeRef>,
    events: Vec<LifecycleEventKind>,
    receiver: Receiver,
    location: Option<SourceLocation>,
}

impl MethodDescriptor {
    /// Starts a descriptor for `name` declared on `declaring_class`.
    ///
    /// The descriptor has no parameters, returns `()`, takes `&self` and
    /// handles any event until configured otherwise.
    #[must_use]
    pub fn new(id: MethodId, declaring_class: ClassRef, name: impl Into<String>) -> Self {
        Self {
            id,
            declaring_class,
            name: name.into(),
            params: Vec::new(),
            return_type: None,
            events: Vec::new(),
            receiver: Receiver::default(),
            location: None,
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_param(mut self, ty: TypeRef) -> Self {
        self.params.push(ty);
        self
    }

    /// Appends several parameters in order.
    #[must_use]
    pub fn with_params(mut self, params: impl IntoIterator<Item = TypeRef>) -> Self {
        self.params.extend(params);
        self
    }

    /// Sets a non-unit return type.
    #[must_use]
    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Adds an event named by the callback annotation.
    #[must_use]
    pub fn on_event(mut self, event: LifecycleEventKind) -> Self {
        self.events.push(event);
        self
    }

    /// Sets how the method is reached from generated code.
    #[must_use]
    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = receiver;
        self
    }

    /// Attaches a source location.
    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// The host-assigned handle.
    #[must_use]
    pub fn id(&self) -> MethodId {
        self.id
    }

    /// The class that declares this method (a superclass for inherited methods).
    #[must_use]
    pub fn declaring_class(&self) -> &ClassRef {
        &self.declaring_class
    }

    /// The method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameters, excluding the receiver.
    #[must_use]
    pub fn params(&self) -> &[TypeRef] {
        &self.params
    }

    /// The return type, `None` for `()`.
    #[must_use]
    pub fn return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref()
    }

    /// Events named by the annotation. Empty means "any event".
    #[must_use]
    pub fn declared_events(&self) -> &[LifecycleEventKind] {
        &self.events
    }

    /// The receiver kind.
    #[must_use]
    pub fn receiver(&self) -> Receiver {
        self.receiver
    }

    /// Source location, if the host provided one.
    #[must_use]
    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Returns `true` if `other` has the same name and parameter types.
    ///
    /// Used to drop inherited methods overridden by the subclass.
    #[must_use]
    pub fn same_signature(&self, other: &Self) -> bool {
        self.name == other.name
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(lhs, rhs)| lhs.name() == rhs.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Classes
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate class and its flattened annotated methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    class: ClassRef,
    methods: Vec<MethodDescriptor>,
}

impl ClassDecl {
    /// Creates a class with no annotated methods.
    #[must_use]
    pub fn new(class: ClassRef) -> Self {
        Self {
            class,
            methods: Vec::new(),
        }
    }

    /// Appends an annotated method in discovery order.
    #[must_use]
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// The class identity.
    #[must_use]
    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    /// Annotated methods in discovery order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }
}
