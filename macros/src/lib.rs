use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Ident, Path, Token, parse_macro_input};

/// One `method_name => TYPE_TAG_PATH` entry, with optional doc attributes.
struct TypeMethod {
    attrs: Vec<Attribute>,
    method: Ident,
    tag: Path,
}

impl Parse for TypeMethod {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let method: Ident = input.parse()?;
        input.parse::<Token![=>]>()?;
        let tag: Path = input.parse()?;
        Ok(Self { attrs, method, tag })
    }
}

struct TypeMethodList {
    methods: Punctuated<TypeMethod, Token![,]>,
}

impl Parse for TypeMethodList {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(Self {
            methods: Punctuated::parse_terminated(input)?,
        })
    }
}

/// Generates one declaration method per registered type tag on `Builder`,
/// each delegating to the generic `declare` entry point.
///
/// Must be invoked in a scope where `Builder` and `FieldOptions` resolve.
///
/// ```ignore
/// declare_type_methods! {
///     /// Declare a string field.
///     string => types::STRING,
///     /// Declare an integer field.
///     integer => types::INTEGER,
/// }
/// ```
///
/// expands to `impl Builder { pub fn string(...), pub fn integer(...) }`.
#[proc_macro]
pub fn declare_type_methods(input: TokenStream) -> TokenStream {
    let list = parse_macro_input!(input as TypeMethodList);

    let methods = list.methods.iter().map(|entry| {
        let attrs = &entry.attrs;
        let method = &entry.method;
        let tag = &entry.tag;
        quote! {
            #(#attrs)*
            pub fn #method(
                &mut self,
                key: impl Into<String>,
                options: FieldOptions,
            ) -> &mut Self {
                self.declare(key, #tag, options)
            }
        }
    });

    let expanded = quote! {
        impl Builder {
            #(#methods)*
        }
    };

    expanded.into()
}
