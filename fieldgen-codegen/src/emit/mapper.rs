//! Field transform mapper.
//!
//! Classes are mapped field by field into an existing target through setter
//! callbacks. Records are never mutated: every member is mapped first and the
//! new record is built in one struct expression.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::EmitContext;
use crate::model::DeclarationKind;

struct Slot {
    op: Ident,
    callback: TokenStream,
    default: TokenStream,
    setter_bound: TokenStream,
    doc: String,
}

pub(super) fn emit(ctx: &EmitContext<'_>) -> TokenStream {
    match ctx.decl.kind {
        DeclarationKind::ImmutableRecord => emit_record(ctx),
        _ => emit_class(ctx),
    }
}

fn emit_class(ctx: &EmitContext<'_>) -> TokenStream {
    let source = ctx.source_type();
    let lt = ctx.lifetime();

    let slots: Vec<Slot> = ctx
        .members
        .iter()
        .map(|member| {
            let ty = ctx.member_type(member);
            let signature = quote!(::std::ops::FnMut(&#source, &#ty, &mut dyn ::std::ops::FnMut(#ty)));
            Slot {
                op: format_ident!("set_{}", member.snake_name()),
                callback: quote!(::std::boxed::Box<dyn #signature + #lt>),
                default: quote! {
                    |_: &#source, value: &#ty, set: &mut dyn ::std::ops::FnMut(#ty)| {
                        set(::std::clone::Clone::clone(value))
                    }
                },
                setter_bound: quote!(#signature + #lt),
                doc: format!(
                    "Decides what reaches the target's `{}`: call the setter with a value, or skip it to leave the target untouched.",
                    member.name
                ),
            }
        })
        .collect();

    let assignments = ctx.members.iter().zip(&slots).map(|(member, slot)| {
        let ident = &member.ident;
        let op = &slot.op;
        let ty = ctx.member_type(member);
        quote! {
            (self.#op)(self.source, &self.source.#ident, &mut |value: #ty| target.#ident = value);
        }
    });

    let run_all = quote! {
        /// Run every set callback once, in declaration order, writing into
        /// `target`. The source is only read.
        pub fn map_all_to(&mut self, target: &mut #source) {
            #(#assignments)*
        }
    };

    emit_dispatcher(ctx, &slots, run_all)
}

fn emit_record(ctx: &EmitContext<'_>) -> TokenStream {
    let source = ctx.source_type();
    let lt = ctx.lifetime();
    let ident = &ctx.decl.ident;

    let slots: Vec<Slot> = ctx
        .members
        .iter()
        .map(|member| {
            let ty = ctx.member_type(member);
            let signature = quote!(::std::ops::FnMut(&#source, &#ty) -> #ty);
            Slot {
                op: format_ident!("map_{}", member.snake_name()),
                callback: quote!(::std::boxed::Box<dyn #signature + #lt>),
                default: quote! {
                    |_: &#source, value: &#ty| -> #ty { ::std::clone::Clone::clone(value) }
                },
                setter_bound: quote!(#signature + #lt),
                doc: format!("Computes the new record's `{}`.", member.name),
            }
        })
        .collect();

    let locals: Vec<Ident> = ctx
        .members
        .iter()
        .map(|member| format_ident!("__{}", member.snake_name()))
        .collect();
    let computations = ctx.members.iter().zip(&slots).zip(&locals).map(|((member, slot), local)| {
        let ident = &member.ident;
        let op = &slot.op;
        quote! {
            let #local = (self.#op)(self.source, &self.source.#ident);
        }
    });
    let members = ctx.members.iter().map(|member| &member.ident);

    let run_all = quote! {
        /// Run every map callback once, in declaration order, then build the
        /// new record from the results. The source record is left as is.
        pub fn map_all(&mut self) -> #source {
            #(#computations)*
            #ident {
                #(#members: #locals,)*
            }
        }
    };

    emit_dispatcher(ctx, &slots, run_all)
}

// Struct, builder and constructors shared by both shapes.
fn emit_dispatcher(ctx: &EmitContext<'_>, slots: &[Slot], run_all: TokenStream) -> TokenStream {
    let name = ctx.name();
    let builder = format_ident!("{}Builder", name);
    let vis = &ctx.options.visibility;
    let source = ctx.source_type();
    let lt = ctx.lifetime();
    let generics = ctx.dispatcher_generics();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let type_name = ctx.type_name();
    let doc = ctx.doc(format!(
        "Maps the fields of a [`{type_name}`], one callback per field.\n\n\
         Build with [`{name}::builder`]; callbacks that are not set copy the source value."
    ));
    let builder_doc = ctx.doc(format!("Assembles a [`{name}`]."));

    let ops: Vec<&Ident> = slots.iter().map(|slot| &slot.op).collect();
    let callbacks: Vec<&TokenStream> = slots.iter().map(|slot| &slot.callback).collect();
    let clone_bounds: Vec<TokenStream> = ctx
        .members
        .iter()
        .map(|member| {
            let ty = ctx.member_type(member);
            // Higher-ranked, so a non-Clone member type only rules out `build`
            // instead of failing the whole impl.
            quote!(for<'__c> #ty: ::std::clone::Clone)
        })
        .collect();
    let build_where = if clone_bounds.is_empty() {
        TokenStream::new()
    } else {
        quote!(where #(#clone_bounds,)*)
    };

    let setters = slots.iter().map(|slot| {
        let Slot {
            op,
            callback,
            setter_bound,
            doc,
            ..
        } = slot;
        quote! {
            #[doc = #doc]
            pub fn #op<F>(mut self, op: F) -> Self
            where
                F: #setter_bound,
            {
                let op: #callback = ::std::boxed::Box::new(op);
                self.#op = ::std::option::Option::Some(op);
                self
            }
        }
    });
    let defaults = slots.iter().map(|slot| {
        let Slot {
            op, callback, default, ..
        } = slot;
        quote! {
            #op: self.#op.unwrap_or_else(|| {
                let op: #callback = ::std::boxed::Box::new(#default);
                op
            })
        }
    });

    quote! {
        #doc
        #vis struct #name #impl_generics #where_clause {
            source: &#lt #source,
            #(#ops: #callbacks,)*
        }

        impl #impl_generics #name #ty_generics #where_clause {
            pub fn builder(source: &#lt #source) -> #builder #ty_generics {
                #builder {
                    source,
                    #(#ops: ::std::option::Option::None,)*
                }
            }

            /// The bound source instance.
            pub fn source(&self) -> &#lt #source {
                self.source
            }

            #run_all
        }

        #builder_doc
        #vis struct #builder #impl_generics #where_clause {
            source: &#lt #source,
            #(#ops: ::std::option::Option<#callbacks>,)*
        }

        impl #impl_generics #builder #ty_generics #where_clause {
            #(#setters)*

            /// Finish the mapper; unset callbacks pass the source value through.
            pub fn build(self) -> #name #ty_generics #build_where {
                #name {
                    source: self.source,
                    #(#defaults,)*
                }
            }

            /// Finish the mapper without defaults: `None` unless every
            /// callback was set. Works for member types that are not `Clone`.
            pub fn try_build(self) -> ::std::option::Option<#name #ty_generics> {
                ::std::option::Option::Some(#name {
                    source: self.source,
                    #(#ops: self.#ops?,)*
                })
            }
        }
    }
}
