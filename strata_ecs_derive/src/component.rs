use quote::{format_ident, quote};
use proc_macro::TokenStream;
use syn::DeriveInput;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;

    let name_str = name.to_string().to_uppercase();
    let id_name = format_ident!("__STRATA_COMPONENT_ID_OF_{}", name_str);

    let gen = quote! {
        ::strata_ecs::lazy_static! {
            static ref #id_name: ::strata_ecs::components::ComponentId =
                ::strata_ecs::components::next_component_id(::std::any::type_name::<#name>());
        }

        impl ::strata_ecs::components::Component for #name {
            #[inline(always)]
            fn component_id() -> ::strata_ecs::components::ComponentId {
                *#id_name
            }
        }
    };
    gen.into()
}
