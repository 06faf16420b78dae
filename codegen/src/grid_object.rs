use matches2::option_match;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::{Error, Result};

use crate::util::{self, Attr, Named};

const INPUT_TYPE_ERROR: &str = "GridObject can only be derived from structs";
const MISSING_REF_ERROR: &str =
    "GridObject requires exactly one field of type `GridRef<Self>` marked with #[grid_ref]";

pub(crate) fn derive(input: TokenStream) -> Result<TokenStream> {
    let input: syn::DeriveInput = syn::parse2(input)?;

    let mut args: Attr<ItemOpt> = Attr::default();
    for attr in &input.attrs {
        if attr.path().is_ident("grid_object") {
            let this_args: Attr<ItemOpt> = attr.parse_args()?;
            args.items.extend(this_args.items);
        }
    }

    let crate_name = args
        .find_one(|opt| option_match!(opt, ItemOpt::GridstoreAs(_, crate_name) => crate_name))?
        .map_or_else(|| quote!(::gridstore), |(_, crate_name)| crate_name.clone());
    let active = args.find_one(|opt| option_match!(opt, ItemOpt::Active(_, expr) => expr))?;

    let fields = match &input.data {
        syn::Data::Struct(item) => &item.fields,
        syn::Data::Enum(item) => return Err(Error::new_spanned(item.enum_token, INPUT_TYPE_ERROR)),
        syn::Data::Union(item) => {
            return Err(Error::new_spanned(item.union_token, INPUT_TYPE_ERROR))
        }
    };

    let mut grid_ref = None;
    for (index, field) in fields.iter().enumerate() {
        if !field.attrs.iter().any(|attr| attr.path().is_ident("grid_ref")) {
            continue;
        }

        if grid_ref.is_some() {
            return Err(Error::new_spanned(field, MISSING_REF_ERROR));
        }

        grid_ref = Some(match &field.ident {
            Some(ident) => ident.to_token_stream(),
            None => syn::Index::from(index).to_token_stream(),
        });
    }
    let Some(grid_ref) = grid_ref else {
        return Err(Error::new_spanned(&input.ident, MISSING_REF_ERROR));
    };

    let active_fn = active.map(|(_, expr)| {
        quote! {
            fn is_active_object(&self) -> bool {
                let predicate: fn(&Self) -> bool = #expr;
                predicate(self)
            }
        }
    });

    let generics = util::parse_generics(&input);
    let output = generics.impl_trait(
        quote!(#crate_name::GridObject),
        quote! {
            fn grid_ref(&self) -> &#crate_name::GridRef<Self> { &self.#grid_ref }

            #active_fn
        },
    );

    Ok(output)
}

enum ItemOpt {
    GridstoreAs(syn::token::Paren, TokenStream),
    Active(syn::Token![=], Box<syn::Expr>),
}

impl Parse for Named<ItemOpt> {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse::<syn::Ident>()?;

        let value = match name.to_string().as_str() {
            "gridstore_as" => {
                let inner;
                let paren = syn::parenthesized!(inner in input);
                let args = inner.parse()?;
                ItemOpt::GridstoreAs(paren, args)
            }
            "active" => {
                let eq: syn::Token![=] = input.parse()?;
                let expr: Box<syn::Expr> = input.parse()?;
                ItemOpt::Active(eq, expr)
            }
            _ => return Err(Error::new_spanned(&name, format!("Unknown argument `{}`", name))),
        };

        Ok(Named { name, value })
    }
}
