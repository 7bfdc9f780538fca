//! Expansion of `#[lifecycle_observer]`.

use darling::FromMeta;
use darling::ast::NestedMeta;
use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use vigil_codegen::{ClassOutcome, Processor, ProcessorConfig};
use vigil_macro_utils::resolve_crate_path_string;

use crate::extract::{Extraction, extract};

/// Arguments of `#[lifecycle_observer(...)]`.
#[derive(Debug, FromMeta)]
struct ObserverArgs {
    /// Path to the runtime crate, e.g. `crate = "::my_app::vigil_lifecycle"`.
    #[darling(rename = "crate")]
    krate: Option<syn::Path>,

    /// Emit `MethodCallsLogger` guards. Defaults to `true`.
    call_logger: Option<bool>,
}

impl ObserverArgs {
    fn config(&self) -> ProcessorConfig {
        let runtime_path = match &self.krate {
            Some(path) => path.to_token_stream().to_string(),
            None => resolve_crate_path_string(),
        };
        let config = ProcessorConfig::default().with_runtime_path(runtime_path);
        match self.call_logger {
            Some(enabled) => config.with_call_logger(enabled),
            None => config,
        }
    }
}

/// Expands the attribute.
///
/// The cleaned impl block is always emitted, so a signature error does not
/// also produce unresolved-method errors at call sites.
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match NestedMeta::parse_meta_list(attr)
        .map_err(darling::Error::from)
        .and_then(|metas| ObserverArgs::from_list(&metas))
    {
        Ok(args) => args,
        Err(err) => {
            let mut out = err.write_errors();
            out.extend(item);
            return out;
        }
    };

    let input = match syn::parse2::<syn::ItemImpl>(item) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let extraction = extract(&input);
    let cleaned = &extraction.cleaned;
    match generate(&args, &extraction) {
        Ok(generated) => quote! {
            #cleaned
            #generated
        },
        Err(err) => {
            let errors = err.to_compile_error();
            quote! {
                #cleaned
                #errors
            }
        }
    }
}

fn generate(args: &ObserverArgs, extraction: &Extraction) -> syn::Result<TokenStream> {
    if let Some(errors) = &extraction.errors {
        return Err(errors.clone());
    }
    let Some(decl) = &extraction.decl else {
        return Ok(TokenStream::new());
    };

    let processor = Processor::new(args.config()).map_err(call_site)?;
    match processor.process_class(decl).map_err(call_site)? {
        ClassOutcome::Skipped => Ok(TokenStream::new()),
        ClassOutcome::Failed(diagnostics) => {
            let mut errors = diagnostics.iter().map(|diagnostic| {
                syn::Error::new(extraction.span_of(diagnostic.method), diagnostic.message)
            });
            let first = errors.next().unwrap_or_else(|| {
                syn::Error::new(Span::call_site(), "lifecycle observer failed validation")
            });
            Err(errors.fold(first, |mut combined, error| {
                combined.combine(error);
                combined
            }))
        }
        ClassOutcome::Generated(unit) => unit.body().parse::<TokenStream>().map_err(|err| {
            syn::Error::new(
                Span::call_site(),
                format!("generated adapter does not lex: {err}"),
            )
        }),
    }
}

fn call_site(err: impl core::fmt::Display) -> syn::Error {
    syn::Error::new(Span::call_site(), err.to_string())
}
