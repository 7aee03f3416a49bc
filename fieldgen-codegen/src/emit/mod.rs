//! Artifact emitters.
//!
//! Every emitter turns a validated member list plus resolved options into
//! exactly one [`GeneratedArtifact`]. Emitters never fail; all preconditions
//! are checked beforehand by [`crate::validate`].

mod enumeration;
mod mapper;
mod names;
mod visitor;

use proc_macro2::{Ident, Span, TokenStream};
use quote::{ToTokens, quote};
use syn::visit_mut::{self, VisitMut};
use syn::{GenericParam, Generics, Lifetime, LifetimeParam, Type, parse_quote};

use crate::model::{Member, TypeDeclaration};
use crate::options::{ArtifactKind, GenerationOptions};

/// One synthesized type together with its impls.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    kind: ArtifactKind,
    name: Ident,
    declaration: String,
    tokens: TokenStream,
}

impl GeneratedArtifact {
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Name of the primary generated type.
    pub fn name(&self) -> &Ident {
        &self.name
    }

    /// Qualified name of the declaration this artifact was derived from.
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn into_tokens(self) -> TokenStream {
        self.tokens
    }
}

impl ToTokens for GeneratedArtifact {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.tokens.to_tokens(tokens);
    }
}

/// Run the emitter for `kind`.
pub fn emit(
    decl: &TypeDeclaration,
    members: &[Member],
    kind: ArtifactKind,
    options: &GenerationOptions,
) -> GeneratedArtifact {
    let ctx = EmitContext { decl, members, options };
    let tokens = match kind {
        ArtifactKind::FieldNames => names::emit(&ctx),
        ArtifactKind::FieldEnum => enumeration::emit(&ctx),
        ArtifactKind::FieldVisitor => visitor::emit(&ctx),
        ArtifactKind::FieldMapper => mapper::emit(&ctx),
    };

    GeneratedArtifact {
        kind,
        name: options.artifact_name.clone(),
        declaration: decl.qualified_name(),
        tokens,
    }
}

/// Everything an emitter reads.
pub(crate) struct EmitContext<'a> {
    pub decl: &'a TypeDeclaration,
    pub members: &'a [Member],
    pub options: &'a GenerationOptions,
}

impl EmitContext<'_> {
    pub fn name(&self) -> &Ident {
        &self.options.artifact_name
    }

    pub fn type_name(&self) -> String {
        self.decl.type_name()
    }

    /// The source type with its generic arguments, e.g. `Envelope<T>`.
    pub fn source_type(&self) -> TokenStream {
        let ident = &self.decl.ident;
        let (_, ty_generics, _) = self.decl.generics.split_for_impl();
        quote!(#ident #ty_generics)
    }

    /// Lifetime of the borrowed source instance in dispatcher artifacts.
    pub fn lifetime(&self) -> Lifetime {
        Lifetime::new("'__a", Span::call_site())
    }

    /// Source generics with the dispatcher lifetime prepended.
    pub fn dispatcher_generics(&self) -> Generics {
        let mut generics = self.decl.generics.clone();
        generics
            .params
            .insert(0, GenericParam::Lifetime(LifetimeParam::new(self.lifetime())));
        generics
    }

    /// Member type as it must be written outside the source type, with any
    /// `Self` replaced by the source type.
    pub fn member_type(&self, member: &Member) -> Type {
        let mut ty = member.ty.clone();
        ReplaceSelf {
            source: self.source_type(),
        }
        .visit_type_mut(&mut ty);
        ty
    }

    pub fn doc(&self, text: String) -> TokenStream {
        quote!(#[doc = #text])
    }
}

struct ReplaceSelf {
    source: TokenStream,
}

impl VisitMut for ReplaceSelf {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(type_path) = ty
            && type_path.qself.is_none()
            && type_path.path.leading_colon.is_none()
            && type_path.path.segments.first().is_some_and(|segment| segment.ident == "Self")
        {
            let source = &self.source;
            let rest: Vec<_> = type_path.path.segments.iter().skip(1).collect();
            *ty = if rest.is_empty() {
                parse_quote!(#source)
            } else {
                parse_quote!(<#source>::#(#rest)::*)
            };
            return;
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::extract::extract_members;
    use crate::model::Namespace;
    use crate::options::RawOptions;
    use crate::validate::validate;
    use syn::DeriveInput;

    /// Emit `kind` for `source` and return the rendered tokens.
    pub fn render(source: &str, kind: ArtifactKind) -> String {
        let input: DeriveInput = syn::parse_str(source).unwrap();
        let decl = TypeDeclaration::from_derive_input(&input, Some(Namespace::CallSite)).unwrap();
        let members = extract_members(&decl);
        let raw = RawOptions::from_attrs(&decl.attrs, kind).unwrap();
        let validation = validate(&decl, &members, kind, &raw).unwrap();
        let artifact = emit(&decl, &members, kind, &validation.options);
        syn::parse2::<syn::File>(artifact.tokens().clone()).expect("artifact parses as items");
        artifact.into_tokens().to_string()
    }

    /// Rendering with all whitespace removed, so token spacing does not matter.
    pub fn compact(rendered: impl ToString) -> String {
        rendered.to_string().chars().filter(|c| !c.is_whitespace()).collect()
    }
}
