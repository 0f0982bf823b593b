//! Procedural macros for Sheaf.

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro for implementing the `Message` trait.
///
/// ```rust,ignore
/// #[derive(Clone, Debug, sheaf::Message)]
/// struct Reading {
///     sensor: u32,
///     value: f64,
/// }
/// ```
#[proc_macro_derive(Message)]
pub fn derive_message(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::sheaf::Message for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}
