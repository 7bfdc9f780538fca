//! Adapter source generation.
//!
//! [`AdapterGenerator::generate`] turns a [`ClassRegistryEntry`] into a
//! [`GeneratedUnit`]: an adapter struct borrowing the receiver, a
//! `GeneratedAdapter` impl dispatching events with direct method calls, and a
//! `LifecycleObserver` impl handing out the adapter.
//!
//! # Generated Code
//!
//! For a class `Bar` with an `OnStop` callback taking the owner and an
//! any-event callback taking nothing, the unit reads (modulo formatting):
//!
//! ```ignore
//! pub struct BarLifecycleAdapter<'r> {
//!     receiver: &'r mut Bar,
//! }
//!
//! impl ::vigil_lifecycle::GeneratedAdapter for BarLifecycleAdapter<'_> {
//!     fn call_methods(
//!         &mut self,
//!         owner: &dyn ::vigil_lifecycle::LifecycleOwner,
//!         event: ::vigil_lifecycle::LifecycleEvent,
//!         mut logger: Option<&mut ::vigil_lifecycle::MethodCallsLogger>,
//!     ) {
//!         match event {
//!             ::vigil_lifecycle::LifecycleEvent::OnStop => {
//!                 if logger.as_deref_mut().is_none_or(|logger| {
//!                     logger.approve_call("on_stop", ::vigil_lifecycle::CallKind::Owner)
//!                 }) {
//!                     self.receiver.on_stop(owner);
//!                 }
//!             }
//!             _ => {}
//!         }
//!         if logger.as_deref_mut().is_none_or(|logger| {
//!             logger.approve_call("any", ::vigil_lifecycle::CallKind::NoArgs)
//!         }) {
//!             self.receiver.any();
//!         }
//!     }
//! }
//!
//! impl ::vigil_lifecycle::LifecycleObserver for Bar {
//!     type Adapter<'r> = BarLifecycleAdapter<'r> where Self: 'r;
//!
//!     fn lifecycle_adapter(&mut self) -> Self::Adapter<'_> {
//!         BarLifecycleAdapter { receiver: self }
//!     }
//! }
//! ```
//!
//! Output depends only on the entry and the configuration: no hashing order,
//! no timestamps.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use serde::{Deserialize, Serialize};

use crate::config::ProcessorConfig;
use crate::error::ProcessorError;
use crate::model::{ClassRef, MethodDescriptor, Receiver};
use crate::registry::{CallKind, ClassRegistryEntry};

/// First line of every generated body.
pub const GENERATED_HEADER: &str = "// @generated by vigil_codegen. Do not edit.";

/// A generated source artifact, ready for the host to persist or splice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratedUnit {
    name: String,
    namespace: String,
    body: String,
}

impl GeneratedUnit {
    /// The adapter type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module path (joined with `::`) the unit belongs to. Empty for the
    /// module of the owning class.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Rust source text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Fully qualified adapter name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }
}

/// Emits adapter units from registry entries.
///
/// Holds only owned strings so it can be shared across threads; token types
/// are built per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterGenerator {
    runtime: String,
    adapter_suffix: String,
    call_logger: bool,
}

impl AdapterGenerator {
    /// Creates a generator for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::InvalidRuntimePath`] if the configured
    /// runtime path is not a Rust path.
    pub fn new(config: &ProcessorConfig) -> Result<Self, ProcessorError> {
        parse_runtime_path(&config.runtime_path)?;
        Ok(Self {
            runtime: config.runtime_path.clone(),
            adapter_suffix: config.adapter_suffix.clone(),
            call_logger: config.call_logger,
        })
    }

    /// Name of the unit generated for `class`.
    #[must_use]
    pub fn adapter_name(&self, class: &ClassRef) -> String {
        format!("{}{}", class.name(), self.adapter_suffix)
    }

    /// Generates the unit for one class.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::EmptyClassName`] for an unnamed class and
    /// [`ProcessorError::InvalidIdentifier`] if a class, method or adapter
    /// name cannot be spelled as a Rust identifier.
    pub fn generate(&self, entry: &ClassRegistryEntry) -> Result<GeneratedUnit, ProcessorError> {
        let class = entry.class();
        if class.name().is_empty() {
            return Err(ProcessorError::EmptyClassName);
        }
        let name = self.adapter_name(class);
        let _span = tracing::debug_span!("generate", class = %class, adapter = %name).entered();

        let rt = &parse_runtime_path(&self.runtime)?;
        let adapter = ident(&name)?;
        let receiver_ty = ident(class.name())?;
        let doc = format!("Lifecycle adapter generated for [`{}`].", class.name());

        let mut uses_owner = false;
        let mut uses_event = false;

        let mut arms = Vec::new();
        for event in entry.named_events() {
            let variant = ident(event.variant_name())?;
            let calls =
                self.guarded_calls(rt, entry.callbacks_for(event), &mut uses_owner, &mut uses_event)?;
            arms.push(quote! {
                #rt::LifecycleEvent::#variant => {
                    #(#calls)*
                }
            });
        }
        let dispatch_named = if arms.is_empty() {
            quote! {}
        } else {
            uses_event = true;
            quote! {
                match event {
                    #(#arms)*
                    _ => {}
                }
            }
        };
        let dispatch_any =
            self.guarded_calls(rt, entry.any_callbacks(), &mut uses_owner, &mut uses_event)?;

        let discard_owner = (!uses_owner).then(|| quote! { let _ = owner; });
        let discard_event = (!uses_event).then(|| quote! { let _ = event; });
        let (logger_binding, discard_logger) = if self.call_logger {
            (quote! { mut logger }, quote! {})
        } else {
            (quote! { logger }, quote! { let _ = logger; })
        };

        let tokens = quote! {
            #[doc = #doc]
            pub struct #adapter<'r> {
                receiver: &'r mut #receiver_ty,
            }

            impl #rt::GeneratedAdapter for #adapter<'_> {
                fn call_methods(
                    &mut self,
                    owner: &dyn #rt::LifecycleOwner,
                    event: #rt::LifecycleEvent,
                    #logger_binding: ::core::option::Option<&mut #rt::MethodCallsLogger>,
                ) {
                    #discard_owner
                    #discard_event
                    #discard_logger
                    #dispatch_named
                    #(#dispatch_any)*
                }
            }

            impl #rt::LifecycleObserver for #receiver_ty {
                type Adapter<'r> = #adapter<'r> where Self: 'r;

                fn lifecycle_adapter(&mut self) -> Self::Adapter<'_> {
                    #adapter { receiver: self }
                }
            }
        };

        tracing::debug!(
            registrations = entry.registration_count(),
            "adapter generated"
        );

        Ok(GeneratedUnit {
            name,
            namespace: class.namespace(),
            body: format!("{GENERATED_HEADER}\n{tokens}\n"),
        })
    }

    /// One guarded invocation per method, in stored order.
    fn guarded_calls(
        &self,
        rt: &syn::Path,
        methods: &[MethodDescriptor],
        uses_owner: &mut bool,
        uses_event: &mut bool,
    ) -> Result<Vec<TokenStream>, ProcessorError> {
        methods
            .iter()
            .map(|method| {
                let arity = method.params().len();
                *uses_owner |= arity >= 1;
                *uses_event |= arity >= 2;
                self.guarded_call(rt, method)
            })
            .collect()
    }

    fn guarded_call(
        &self,
        rt: &syn::Path,
        method: &MethodDescriptor,
    ) -> Result<TokenStream, ProcessorError> {
        let call = invocation(method)?;
        if !self.call_logger {
            return Ok(call);
        }

        let method_name = method.name();
        let kind = ident(CallKind::from_arity(method.params().len()).variant_name())?;
        Ok(quote! {
            if logger
                .as_deref_mut()
                .is_none_or(|logger| logger.approve_call(#method_name, #rt::CallKind::#kind))
            {
                #call
            }
        })
    }
}

/// A direct call passing the leading slice of `(owner, event)` the method declares.
fn invocation(method: &MethodDescriptor) -> Result<TokenStream, ProcessorError> {
    let name = ident(method.name())?;
    let args = match method.params().len() {
        0 => quote! {},
        1 => quote! { owner },
        _ => quote! { owner, event },
    };
    let call = match method.receiver() {
        Receiver::Shared | Receiver::Mutable => quote! { self.receiver.#name(#args) },
        Receiver::None => {
            let class = class_path(method.declaring_class())?;
            quote! { #class::#name(#args) }
        }
    };
    Ok(match method.return_type() {
        Some(_) => quote! { let _ = #call; },
        None => quote! { #call; },
    })
}

/// Path to a class from the generated unit.
///
/// Classes without a module path are referenced by bare name, others from
/// the crate root.
fn class_path(class: &ClassRef) -> Result<TokenStream, ProcessorError> {
    let name = ident(class.name())?;
    if class.module_path().is_empty() {
        return Ok(quote! { #name });
    }
    let segments = class
        .module_path()
        .iter()
        .map(|segment| ident(segment))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quote! { crate #(::#segments)* ::#name })
}

fn parse_runtime_path(path: &str) -> Result<syn::Path, ProcessorError> {
    syn::parse_str::<syn::Path>(path).map_err(|source| ProcessorError::InvalidRuntimePath {
        path: path.to_string(),
        source,
    })
}

/// Parses `name` as an identifier; raw identifiers (`r#type`) are accepted.
fn ident(name: &str) -> Result<Ident, ProcessorError> {
    syn::parse_str::<Ident>(name).map_err(|source| ProcessorError::invalid_identifier(name, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LifecycleEventKind, MethodId, TypeRef};
    use crate::registry::CallbackRegistry;
    use crate::validate::ValidationOutcome;

    /// Strips whitespace so assertions do not depend on token spacing.
    fn squash(body: &str) -> String {
        body.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn owner() -> TypeRef {
        TypeRef::named("&dyn LifecycleOwner").assignable_to("LifecycleOwner")
    }

    fn entry(methods: Vec<MethodDescriptor>) -> ClassRegistryEntry {
        let validator = crate::validate::SignatureValidator::default();
        let mut registry = CallbackRegistry::new(ClassRef::new("Bar"));
        for method in methods {
            match validator.validate(method) {
                ValidationOutcome::Accepted(acceptance) => registry.register(acceptance),
                ValidationOutcome::Rejected(rejection) => panic!("unexpected {rejection:?}"),
            }
        }
        registry.into_entry().expect("entry")
    }

    fn method(id: u32, name: &str) -> MethodDescriptor {
        MethodDescriptor::new(MethodId(id), ClassRef::new("Bar"), name)
    }

    #[test]
    fn unit_is_named_after_class() {
        let generator = AdapterGenerator::new(&ProcessorConfig::default()).unwrap();
        let unit = generator
            .generate(&entry(vec![method(0, "on_stop").on_event(LifecycleEventKind::OnStop)]))
            .unwrap();

        assert_eq!(unit.name(), "BarLifecycleAdapter");
        assert_eq!(unit.namespace(), "");
        assert!(unit.body().starts_with(GENERATED_HEADER));
        syn::parse_file(unit.body()).expect("generated body should parse");
    }

    #[test]
    fn arguments_follow_declared_arity() {
        let generator = AdapterGenerator::new(&ProcessorConfig::default().with_call_logger(false))
            .unwrap();
        let unit = generator
            .generate(&entry(vec![
                method(0, "none").on_event(LifecycleEventKind::OnStart),
                method(1, "with_owner")
                    .with_param(owner())
                    .on_event(LifecycleEventKind::OnStart),
                method(2, "with_both")
                    .with_params([owner(), TypeRef::named("LifecycleEvent")]),
            ]))
            .unwrap();

        let body = squash(unit.body());
        assert!(body.contains("self.receiver.none();"));
        assert!(body.contains("self.receiver.with_owner(owner);"));
        assert!(body.contains("self.receiver.with_both(owner,event);"));
        assert!(!body.contains("approve_call"));
    }

    #[test]
    fn named_group_precedes_any_group() {
        let generator = AdapterGenerator::new(&ProcessorConfig::default()).unwrap();
        let unit = generator
            .generate(&entry(vec![
                method(0, "any_first"),
                method(1, "stop_second").on_event(LifecycleEventKind::OnStop),
            ]))
            .unwrap();

        let body = squash(unit.body());
        let stop = body.find("self.receiver.stop_second()").unwrap();
        let any = body.find("self.receiver.any_first()").unwrap();
        assert!(stop < any);
        assert!(body.contains(
            "logger.approve_call(\"stop_second\",::vigil_lifecycle::CallKind::NoArgs)"
        ));
    }

    #[test]
    fn associated_functions_are_called_through_declaring_class() {
        let generator = AdapterGenerator::new(&ProcessorConfig::default()).unwrap();
        let inherited = MethodDescriptor::new(
            MethodId(0),
            ClassRef::in_module(["base"], "Base"),
            "reset",
        )
        .with_receiver(Receiver::None);
        let unit = generator.generate(&entry(vec![inherited])).unwrap();

        assert!(squash(unit.body()).contains("crate::base::Base::reset();"));
    }

    #[test]
    fn return_values_are_discarded() {
        let generator = AdapterGenerator::new(&ProcessorConfig::default().with_call_logger(false))
            .unwrap();
        let unit = generator
            .generate(&entry(vec![method(0, "count").returning(TypeRef::named("usize"))]))
            .unwrap();

        assert!(squash(unit.body()).contains("let_=self.receiver.count();"));
    }

    #[test]
    fn unused_parameters_are_discarded() {
        let generator = AdapterGenerator::new(&ProcessorConfig::default().with_call_logger(false))
            .unwrap();
        let unit = generator.generate(&entry(vec![method(0, "any")])).unwrap();

        let body = squash(unit.body());
        assert!(body.contains("let_=owner;"));
        assert!(body.contains("let_=event;"));
        assert!(body.contains("let_=logger;"));
        assert!(!body.contains("matchevent"));
    }

    #[test]
    fn output_is_deterministic() {
        let generator = AdapterGenerator::new(&ProcessorConfig::default()).unwrap();
        let build = || {
            entry(vec![
                method(0, "a").on_event(LifecycleEventKind::OnResume),
                method(1, "b").on_event(LifecycleEventKind::OnCreate),
                method(2, "c").with_param(owner()),
            ])
        };
        let first = generator.generate(&build()).unwrap();
        let second = generator.generate(&build()).unwrap();
        assert_eq!(first.body(), second.body());
    }

    #[test]
    fn invalid_identifiers_are_errors() {
        let generator = AdapterGenerator::new(&ProcessorConfig::default()).unwrap();
        let result = generator.generate(&entry(vec![method(0, "not an ident")]));
        assert!(matches!(
            result,
            Err(ProcessorError::InvalidIdentifier { ref name, .. }) if name == "not an ident"
        ));
    }

    #[test]
    fn raw_identifiers_are_accepted() {
        let generator = AdapterGenerator::new(&ProcessorConfig::default()).unwrap();
        let unit = generator.generate(&entry(vec![method(0, "r#type")])).unwrap();
        assert!(squash(unit.body()).contains("self.receiver.r#type()"));
    }

    #[test]
    fn empty_class_name_is_rejected() {
        let generator = AdapterGenerator::new(&ProcessorConfig::default()).unwrap();
        let mut registry = CallbackRegistry::new(ClassRef::new(""));
        registry.register(crate::validate::Acceptance {
            method: MethodDescriptor::new(MethodId(0), ClassRef::new(""), "cb"),
            events: [LifecycleEventKind::OnAny].into_iter().collect(),
        });
        let entry = registry.into_entry().expect("entry");
        assert!(matches!(
            generator.generate(&entry),
            Err(ProcessorError::EmptyClassName)
        ));
    }

    #[test]
    fn invalid_runtime_path_is_rejected() {
        let config = ProcessorConfig::default().with_runtime_path("not a path");
        assert!(matches!(
            AdapterGenerator::new(&config),
            Err(ProcessorError::InvalidRuntimePath { .. })
        ));
    }
}
