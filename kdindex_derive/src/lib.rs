//! Derive macros for the `kdindex` crate.

/// Derive macro generating an implementation of the trait `Position`.
///
/// The type must be a struct with a field named `position`.
#[proc_macro_derive(Position)]
pub fn position_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = syn::parse(input);

    impl_accessor(ast, "position", "Position", "Vector")
        .unwrap_or_else(|e| syn::Error::to_compile_error(&e).into())
}

/// Derive macro generating an implementation of the trait `Value`.
///
/// The type must be a struct with a field named `value`.
#[proc_macro_derive(Value)]
pub fn value_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = syn::parse(input);

    impl_accessor(ast, "value", "Value", "Value")
        .unwrap_or_else(|e| syn::Error::to_compile_error(&e).into())
}

fn impl_accessor(
    input: syn::Result<syn::DeriveInput>,
    field_name: &str,
    trait_name: &str,
    assoc_name: &str,
) -> syn::Result<proc_macro::TokenStream> {
    let mut input = input?;

    let field_ty = get_type_of(&input.data, field_name, trait_name)?;

    input
        .generics
        .where_clause
        .get_or_insert_with(|| syn::WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        })
        .predicates
        .push(syn::parse_quote! {
            #field_ty: ::core::clone::Clone
        });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let name = &input.ident;
    let span = proc_macro2::Span::call_site();
    let trait_ident = syn::Ident::new(trait_name, span);
    let assoc_ident = syn::Ident::new(assoc_name, span);
    let field_ident = syn::Ident::new(field_name, span);

    Ok(quote::quote! {
        impl #impl_generics #trait_ident for #name #ty_generics #where_clause {
            type #assoc_ident = #field_ty;

            #[inline]
            fn #field_ident(&self) -> Self::#assoc_ident {
                self.#field_ident.clone()
            }
        }
    }
    .into())
}

fn get_type_of(data: &syn::Data, field_name: &str, trait_name: &str) -> syn::Result<syn::Type> {
    match data {
        syn::Data::Struct(struct_data) => struct_data
            .fields
            .iter()
            .find_map(|field| (field.ident.as_ref()? == field_name).then(|| field.ty.clone()))
            .ok_or_else(|| {
                syn::Error::new_spanned(&struct_data.fields, format!("no `{field_name}` field"))
            }),
        syn::Data::Enum(enum_data) => Err(syn::Error::new_spanned(
            enum_data.enum_token,
            format!("the `{trait_name}` trait can only be derived for struct types"),
        )),
        syn::Data::Union(union_data) => Err(syn::Error::new_spanned(
            union_data.union_token,
            format!("the `{trait_name}` trait can only be derived for struct types"),
        )),
    }
}
