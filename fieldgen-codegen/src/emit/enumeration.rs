//! Field enumeration.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::EmitContext;
use crate::naming::to_screaming_snake;

pub(super) fn emit(ctx: &EmitContext<'_>) -> TokenStream {
    let name = ctx.name();
    let vis = &ctx.options.visibility;
    let type_name = ctx.type_name();
    let doc = ctx.doc(format!("One variant per field of [`{type_name}`], in declaration order."));

    let variants: Vec<_> = ctx
        .members
        .iter()
        .map(|member| format_ident!("{}", to_screaming_snake(&member.name), span = member.ident.span()))
        .collect();
    let variant_docs = ctx.members.iter().map(|member| format!("`{}`", member.name));
    let names = ctx.members.iter().map(|member| &member.name);
    let indexes = ctx.members.iter().map(|member| member.index);

    quote! {
        #doc
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #vis enum #name {
            #(
                #[doc = #variant_docs]
                #variants,
            )*
        }

        impl #name {
            /// The member name this variant stands for.
            pub const fn field_name(self) -> &'static str {
                match self {
                    #(#name::#variants => #names,)*
                }
            }
        }

        #[automatically_derived]
        impl ::fieldgen::FieldEnum for #name {
            const TYPE_NAME: &'static str = #type_name;
            const ALL: &'static [Self] = &[#(#name::#variants),*];

            fn field_name(&self) -> &'static str {
                #name::field_name(*self)
            }

            fn index(&self) -> usize {
                match *self {
                    #(#name::#variants => #indexes,)*
                }
            }
        }

        #[automatically_derived]
        impl ::std::fmt::Display for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(#name::field_name(*self))
            }
        }

        #[automatically_derived]
        impl ::std::str::FromStr for #name {
            type Err = ::fieldgen::FieldError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as ::fieldgen::FieldEnum>::from_field_name(s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::emit::test_support::{compact, render};
    use crate::options::ArtifactKind;

    #[test]
    fn test_variants_follow_member_order() {
        let rendered = compact(render("struct Item { sku: String, quantity: u32 }", ArtifactKind::FieldEnum));

        assert!(rendered.contains("pubenumItemFields{"));
        let sku = rendered.find("SKU,").unwrap();
        let quantity = rendered.find("QUANTITY,").unwrap();
        assert!(sku < quantity);
        assert!(rendered.contains(r#"ItemFields::SKU=>"sku",ItemFields::QUANTITY=>"quantity","#));
        assert!(rendered.contains("constALL:&'static[Self]=&[ItemFields::SKU,ItemFields::QUANTITY];"));
        assert!(rendered.contains("ItemFields::SKU=>0usize,ItemFields::QUANTITY=>1usize,"));
    }

    #[test]
    fn test_variant_names_are_screaming_snake() {
        let rendered = compact(render(
            "struct Account { myAPIKey: String, createdAt: u64, order_date: u64 }",
            ArtifactKind::FieldEnum,
        ));

        assert!(rendered.contains(r#"AccountFields::MY_API_KEY=>"myAPIKey""#));
        assert!(rendered.contains(r#"AccountFields::CREATED_AT=>"createdAt""#));
        assert!(rendered.contains(r#"AccountFields::ORDER_DATE=>"order_date""#));
    }

    #[test]
    fn test_custom_enum_name() {
        let rendered = compact(render(
            r#"#[field_enum(name = "ItemColumn")] struct Item { sku: String }"#,
            ArtifactKind::FieldEnum,
        ));
        assert!(rendered.contains("pubenumItemColumn{"));
        assert!(rendered.contains("impl::std::str::FromStrforItemColumn"));
    }

    #[test]
    fn test_empty_enum_matches_nothing() {
        let rendered = compact(render("struct Empty {}", ArtifactKind::FieldEnum));
        assert!(rendered.contains("pubenumEmptyFields{}"));
        assert!(rendered.contains("matchself{}"));
        assert!(rendered.contains("match*self{}"));
    }
}
