//! Field visitor: one callback per member, run in declaration order.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::EmitContext;

pub(super) fn emit(ctx: &EmitContext<'_>) -> TokenStream {
    let name = ctx.name();
    let builder = format_ident!("{}Builder", name);
    let vis = &ctx.options.visibility;
    let source = ctx.source_type();
    let lt = ctx.lifetime();
    let generics = ctx.dispatcher_generics();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let type_name = ctx.type_name();
    let doc = ctx.doc(format!(
        "Calls one callback per field of [`{type_name}`], in declaration order.\n\n\
         Build with [`{name}::builder`]; callbacks that are not set do nothing."
    ));
    let builder_doc = ctx.doc(format!("Assembles a [`{name}`]."));

    let mut fields = Vec::new();
    let mut builder_fields = Vec::new();
    let mut empty = Vec::new();
    let mut setters = Vec::new();
    let mut defaults = Vec::new();
    let mut calls = Vec::new();

    for member in ctx.members {
        let ident = &member.ident;
        let op = format_ident!("visit_{}", member.snake_name());
        let ty = ctx.member_type(member);
        let callback = quote!(::std::boxed::Box<dyn ::std::ops::FnMut(&#ty) + #lt>);
        let setter_doc = format!("Callback for `{}`.", member.name);

        fields.push(quote!(#op: #callback));
        builder_fields.push(quote!(#op: ::std::option::Option<#callback>));
        empty.push(quote!(#op: ::std::option::Option::None));
        setters.push(quote! {
            #[doc = #setter_doc]
            pub fn #op<F>(mut self, op: F) -> Self
            where
                F: ::std::ops::FnMut(&#ty) + #lt,
            {
                let op: #callback = ::std::boxed::Box::new(op);
                self.#op = ::std::option::Option::Some(op);
                self
            }
        });
        defaults.push(quote! {
            #op: self.#op.unwrap_or_else(|| {
                let op: #callback = ::std::boxed::Box::new(|_: &#ty| {});
                op
            })
        });
        calls.push(quote! {
            (self.#op)(&self.instance.#ident);
        });
    }

    quote! {
        #doc
        #vis struct #name #impl_generics #where_clause {
            instance: &#lt #source,
            #(#fields,)*
        }

        impl #impl_generics #name #ty_generics #where_clause {
            pub fn builder(instance: &#lt #source) -> #builder #ty_generics {
                #builder {
                    instance,
                    #(#empty,)*
                }
            }

            /// A visitor whose callbacks all do nothing.
            pub fn new(instance: &#lt #source) -> Self {
                Self::builder(instance).build()
            }

            /// The bound instance.
            pub fn instance(&self) -> &#lt #source {
                self.instance
            }

            /// Invoke every callback once, in declaration order, with the
            /// instance's current field values.
            pub fn visit_all(&mut self) {
                #(#calls)*
            }
        }

        #builder_doc
        #vis struct #builder #impl_generics #where_clause {
            instance: &#lt #source,
            #(#builder_fields,)*
        }

        impl #impl_generics #builder #ty_generics #where_clause {
            #(#setters)*

            pub fn build(self) -> #name #ty_generics {
                #name {
                    instance: self.instance,
                    #(#defaults,)*
                }
            }
        }
    }
}
