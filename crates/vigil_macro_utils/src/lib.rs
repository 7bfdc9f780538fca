//! Shared utilities for Vigil procedural macro crates.
//!
//! Provides crate-path resolution so that generated adapters name the runtime
//! crate correctly whether the consumer depends on `vigil_lifecycle` directly
//! (possibly renamed) or only on the `vigil` umbrella crate.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// `Cargo.toml` package name of the runtime crate generated code refers to.
pub const RUNTIME_CRATE: &str = "vigil_lifecycle";

/// Umbrella crate re-exporting the runtime.
const UMBRELLA_CRATE: &str = "vigil";

/// Returns a [`TokenStream`] path to the runtime crate.
///
/// Resolution order:
/// 1. Direct dependency (possibly renamed in `Cargo.toml`).
/// 2. Indirect access via the `vigil` umbrella crate (`vigil::vigil_lifecycle`),
///    including from the umbrella crate's own tests.
/// 3. Fallback to the literal crate name (compile error will point the user
///    to the missing dependency).
pub fn resolve_crate_path() -> TokenStream {
    let runtime = format_ident!("{}", RUNTIME_CRATE);

    match crate_name(RUNTIME_CRATE) {
        Ok(FoundCrate::Itself) => quote!(#runtime),
        Ok(FoundCrate::Name(found)) => {
            let ident = format_ident!("{}", found);
            quote!(#ident)
        }
        Err(_) => match crate_name(UMBRELLA_CRATE) {
            Ok(FoundCrate::Name(found)) => {
                let vigil = format_ident!("{}", found);
                quote!(#vigil::#runtime)
            }
            // Tests of the umbrella crate itself.
            Ok(FoundCrate::Itself) => quote!(vigil::#runtime),
            Err(_) => quote!(#runtime),
        },
    }
}

/// Same as [`resolve_crate_path`], rendered as source text.
///
/// Hosts that configure the codegen engine pass paths as strings.
#[must_use]
pub fn resolve_crate_path_string() -> String {
    resolve_crate_path().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrelated_crate_falls_back_to_literal_name() {
        // This crate depends on neither `vigil_lifecycle` nor `vigil`.
        assert_eq!(resolve_crate_path_string(), RUNTIME_CRATE);
    }
}
