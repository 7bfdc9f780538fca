//! Translation of an annotated impl block into the engine's source model.
//!
//! Host-level problems (things the engine cannot express, such as generic
//! impl blocks or `async` callbacks) are collected here as `syn::Error`s.
//! Signature rules are left to the engine.

use proc_macro2::Span;
use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, FnArg, GenericParam, ImplItem, ImplItemFn, ItemImpl, ReturnType, Token, Type,
    TypeParamBound,
};
use vigil_codegen::model::{
    ClassDecl, ClassRef, LifecycleEventKind, MethodDescriptor, MethodId, Receiver, TypeRef,
};

/// Name of the callback attribute.
pub(crate) const CALLBACK_ATTR: &str = "on_lifecycle_event";

/// Result of walking one impl block.
pub(crate) struct Extraction {
    /// The impl block with callback attributes removed.
    pub cleaned: ItemImpl,
    /// The class and its callbacks, when the impl block is usable.
    pub decl: Option<ClassDecl>,
    /// Span of each callback, indexed by [`MethodId`].
    pub spans: Vec<Span>,
    /// Every host-level error, combined.
    pub errors: Option<syn::Error>,
}

impl Extraction {
    /// Span recorded for `id`, falling back to the call site.
    pub fn span_of(&self, id: MethodId) -> Span {
        usize::try_from(id.0)
            .ok()
            .and_then(|index| self.spans.get(index).copied())
            .unwrap_or_else(Span::call_site)
    }
}

#[derive(Default)]
struct Errors(Option<syn::Error>);

impl Errors {
    fn push(&mut self, error: syn::Error) {
        match &mut self.0 {
            Some(existing) => existing.combine(error),
            None => self.0 = Some(error),
        }
    }
}

/// Walks `input`, collecting callback descriptors and host errors.
pub(crate) fn extract(input: &ItemImpl) -> Extraction {
    let mut errors = Errors::default();
    let class = class_ref(input, &mut errors);

    let mut cleaned = input.clone();
    let mut methods = Vec::new();
    let mut spans = Vec::new();

    for item in &mut cleaned.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let attrs: Vec<Attribute> = method
            .attrs
            .iter()
            .filter(|attr| is_callback_attr(attr))
            .cloned()
            .collect();
        if attrs.is_empty() {
            continue;
        }
        method.attrs.retain(|attr| !is_callback_attr(attr));

        check_signature(method, &mut errors);
        let events = parse_events(&attrs, &mut errors);
        let Some(receiver) = receiver(method, &mut errors) else {
            continue;
        };
        let Some(class) = &class else {
            continue;
        };

        let id = MethodId(u32::try_from(spans.len()).unwrap_or(u32::MAX));
        spans.push(method.sig.ident.span());

        let descriptor = MethodDescriptor::new(id, class.clone(), method.sig.ident.to_string())
            .with_receiver(receiver)
            .with_params(method.sig.inputs.iter().filter_map(|arg| match arg {
                FnArg::Typed(pat_type) => Some(classify(&pat_type.ty)),
                FnArg::Receiver(_) => None,
            }));
        let descriptor = match return_type(&method.sig.output) {
            Some(ty) => descriptor.returning(ty),
            None => descriptor,
        };
        methods.push(events.into_iter().fold(descriptor, MethodDescriptor::on_event));
    }

    let decl = class.map(|class| {
        methods
            .into_iter()
            .fold(ClassDecl::new(class), ClassDecl::with_method)
    });

    Extraction {
        cleaned,
        decl,
        spans,
        errors: errors.0,
    }
}

/// Matches `#[on_lifecycle_event]` however the attribute path is qualified.
fn is_callback_attr(attr: &Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == CALLBACK_ATTR)
}

// ─────────────────────────────────────────────────────────────────────────────
// Impl block
// ─────────────────────────────────────────────────────────────────────────────

fn class_ref(input: &ItemImpl, errors: &mut Errors) -> Option<ClassRef> {
    if let Some((_, path, _)) = &input.trait_ {
        errors.push(syn::Error::new_spanned(
            path,
            "#[lifecycle_observer] must be applied to an inherent impl block, not a trait impl",
        ));
        return None;
    }
    if !input.generics.params.is_empty() {
        errors.push(syn::Error::new_spanned(
            &input.generics,
            "#[lifecycle_observer] does not support generic impl blocks",
        ));
        return None;
    }
    match &*input.self_ty {
        Type::Path(type_path) if type_path.qself.is_none() => match type_path.path.get_ident() {
            Some(ident) => Some(ClassRef::new(ident.to_string())),
            None => {
                errors.push(syn::Error::new_spanned(
                    type_path,
                    "#[lifecycle_observer] requires a plain type name; import the type \
                     and drop generic arguments",
                ));
                None
            }
        },
        other => {
            errors.push(syn::Error::new_spanned(
                other,
                "#[lifecycle_observer] requires the impl block to be for a named type",
            ));
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Methods
// ─────────────────────────────────────────────────────────────────────────────

/// Rejects signatures the generated adapter cannot call synchronously.
fn check_signature(method: &ImplItemFn, errors: &mut Errors) {
    let sig = &method.sig;
    if let Some(asyncness) = &sig.asyncness {
        errors.push(syn::Error::new_spanned(
            asyncness,
            "lifecycle callbacks cannot be async",
        ));
    }
    if let Some(unsafety) = &sig.unsafety {
        errors.push(syn::Error::new_spanned(
            unsafety,
            "lifecycle callbacks cannot be unsafe",
        ));
    }
    if let Some(abi) = &sig.abi {
        errors.push(syn::Error::new_spanned(
            abi,
            "lifecycle callbacks cannot be extern functions",
        ));
    }
    // Lifetimes are inferred at the call site; types and consts are not.
    for param in &sig.generics.params {
        if !matches!(param, GenericParam::Lifetime(_)) {
            errors.push(syn::Error::new_spanned(
                param,
                "lifecycle callbacks do not support type or const generic parameters",
            ));
        }
    }
    if let Some(variadic) = &sig.variadic {
        errors.push(syn::Error::new_spanned(
            variadic,
            "lifecycle callbacks cannot be variadic",
        ));
    }
}

fn receiver(method: &ImplItemFn, errors: &mut Errors) -> Option<Receiver> {
    let Some(FnArg::Receiver(receiver)) = method.sig.inputs.first() else {
        return Some(Receiver::None);
    };
    match (&receiver.reference, receiver.colon_token) {
        (Some(_), None) if receiver.mutability.is_some() => Some(Receiver::Mutable),
        (Some(_), None) => Some(Receiver::Shared),
        _ => {
            errors.push(syn::Error::new_spanned(
                receiver,
                "lifecycle callbacks must take `&self`, `&mut self` or no receiver",
            ));
            None
        }
    }
}

/// Events named by the callback attributes, in declaration order.
///
/// A bare attribute or an empty list means "any event". Events may be given
/// as `OnStop` or as a path ending in the variant, e.g. `LifecycleEvent::OnStop`.
fn parse_events(attrs: &[Attribute], errors: &mut Errors) -> Vec<LifecycleEventKind> {
    let mut events = Vec::new();
    for attr in attrs {
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }
        let paths = match attr
            .parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
        {
            Ok(paths) => paths,
            Err(error) => {
                errors.push(error);
                continue;
            }
        };
        for path in paths {
            let Some(segment) = path.segments.last() else {
                continue;
            };
            match LifecycleEventKind::from_variant_name(&segment.ident.to_string()) {
                Some(event) => events.push(event),
                None => errors.push(syn::Error::new_spanned(
                    &path,
                    format!(
                        "unknown lifecycle event `{}`; expected one of {}",
                        segment.ident,
                        LifecycleEventKind::ALL
                            .into_iter()
                            .map(LifecycleEventKind::variant_name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )),
            }
        }
    }
    events
}

fn return_type(output: &ReturnType) -> Option<TypeRef> {
    match output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => match &**ty {
            Type::Tuple(tuple) if tuple.elems.is_empty() => None,
            ty => Some(classify(ty)),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Resolves a parameter type to its canonical name and capabilities.
///
/// Only a shared reference to a single-trait object (`&dyn LifecycleOwner`,
/// optionally with a lifetime) can receive the owner the adapter holds, so
/// that is the only shape granted a capability.
pub(crate) fn classify(ty: &Type) -> TypeRef {
    match ty {
        Type::Paren(paren) => classify(&paren.elem),
        Type::Group(group) => classify(&group.elem),
        Type::Reference(reference) => {
            let inner = classify(&reference.elem);
            if reference.mutability.is_some() {
                return TypeRef::named(format!("&mut {}", inner.name()));
            }
            let shared = TypeRef::named(format!("&{}", inner.name()));
            inner
                .capabilities()
                .fold(shared, |shared, capability| shared.assignable_to(capability))
        }
        Type::TraitObject(object) => {
            let traits: Vec<_> = object
                .bounds
                .iter()
                .filter_map(|bound| match bound {
                    TypeParamBound::Trait(bound) => bound.path.segments.last(),
                    _ => None,
                })
                .map(|segment| segment.ident.to_string())
                .collect();
            let named = TypeRef::named(format!("dyn {}", traits.join(" + ")));
            match traits.as_slice() {
                [single] => named.assignable_to(single.clone()),
                _ => named,
            }
        }
        Type::Path(type_path) if type_path.qself.is_none() => {
            match type_path.path.segments.last() {
                Some(segment) if segment.arguments.is_empty() => {
                    TypeRef::named(segment.ident.to_string())
                }
                _ => TypeRef::named(type_path.to_token_stream().to_string()),
            }
        }
        other => TypeRef::named(other.to_token_stream().to_string()),
    }
}
