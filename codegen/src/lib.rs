use proc_macro::TokenStream;

mod grid_object;
mod util;

#[proc_macro_derive(GridObject, attributes(grid_ref, grid_object))]
pub fn grid_object(input: TokenStream) -> TokenStream {
    grid_object::derive(input.into()).unwrap_or_else(|err| err.to_compile_error()).into()
}
