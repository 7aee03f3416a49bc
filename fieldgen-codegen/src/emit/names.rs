//! Field name constants table.

use proc_macro2::TokenStream;
use quote::quote;

use super::EmitContext;

pub(super) fn emit(ctx: &EmitContext<'_>) -> TokenStream {
    let name = ctx.name();
    let vis = &ctx.options.visibility;
    let type_name = ctx.type_name();
    let doc = ctx.doc(format!("Field names of [`{type_name}`], in declaration order."));

    let constants = ctx.members.iter().map(|member| {
        let ident = &member.ident;
        let value = &member.name;
        quote! {
            pub const #ident: &'static str = #value;
        }
    });
    let values = ctx.members.iter().map(|member| &member.name);

    quote! {
        #doc
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #vis struct #name;

        #[allow(non_upper_case_globals)]
        impl #name {
            #(#constants)*
        }

        #[automatically_derived]
        impl ::fieldgen::FieldNameTable for #name {
            const TYPE_NAME: &'static str = #type_name;
            const NAMES: &'static [&'static str] = &[#(#values),*];
        }
    }
}
