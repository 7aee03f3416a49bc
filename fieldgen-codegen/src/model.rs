//! Declarations and members as seen by the generator.

use std::fmt;

use proc_macro2::{Ident, Span};
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Type};

use crate::naming::to_lower_snake;
use crate::options::is_record_marked;

/// The module a declaration lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    /// The module a derive expands in.
    CallSite,
    /// A module path such as `crate::model::shipment`.
    Module(String),
}

impl Namespace {
    /// Namespace of an inline `mod` declared inside this one.
    pub fn child(&self, name: &str) -> Namespace {
        match self {
            Namespace::CallSite => Namespace::CallSite,
            Namespace::Module(path) => Namespace::Module(format!("{path}::{name}")),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::CallSite => f.write_str("self"),
            Namespace::Module(path) => f.write_str(path),
        }
    }
}

/// Shape of the annotated declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// Struct with named, individually assignable fields.
    MutableClass,
    /// Struct with named fields marked `#[fieldgen(record)]`; never mutated in place.
    ImmutableRecord,
    TupleStruct,
    UnitStruct,
    Enum,
    Union,
}

impl DeclarationKind {
    pub fn is_supported(self) -> bool {
        matches!(self, DeclarationKind::MutableClass | DeclarationKind::ImmutableRecord)
    }

    pub fn describe(self) -> &'static str {
        match self {
            DeclarationKind::MutableClass => "struct",
            DeclarationKind::ImmutableRecord => "record struct",
            DeclarationKind::TupleStruct => "tuple struct",
            DeclarationKind::UnitStruct => "unit struct",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Union => "union",
        }
    }
}

/// A field exactly as declared, before eligibility filtering.
#[derive(Debug, Clone)]
pub struct DeclaredField {
    pub ident: Option<Ident>,
    pub ty: Type,
}

/// The source type under generation. Read-only input to every stage.
#[derive(Debug, Clone)]
pub struct TypeDeclaration {
    pub ident: Ident,
    pub generics: Generics,
    pub attrs: Vec<Attribute>,
    pub namespace: Option<Namespace>,
    pub kind: DeclarationKind,
    pub fields: Vec<DeclaredField>,
}

impl TypeDeclaration {
    /// Build a declaration from derive input.
    ///
    /// Fails only when the `#[fieldgen(..)]` container attribute is malformed.
    pub fn from_derive_input(input: &DeriveInput, namespace: Option<Namespace>) -> syn::Result<Self> {
        let (kind, fields) = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(_) => {
                    let kind = if is_record_marked(&input.attrs)? {
                        DeclarationKind::ImmutableRecord
                    } else {
                        DeclarationKind::MutableClass
                    };
                    (kind, collect_fields(&data.fields))
                }
                Fields::Unnamed(_) => (DeclarationKind::TupleStruct, collect_fields(&data.fields)),
                Fields::Unit => (DeclarationKind::UnitStruct, Vec::new()),
            },
            Data::Enum(_) => (DeclarationKind::Enum, Vec::new()),
            Data::Union(_) => (DeclarationKind::Union, Vec::new()),
        };

        Ok(Self {
            ident: input.ident.clone(),
            generics: input.generics.clone(),
            attrs: input.attrs.clone(),
            namespace,
            kind,
            fields,
        })
    }

    /// The type's own name, without any `r#` prefix.
    pub fn type_name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// `crate::model::Shipment` for scanned declarations, `Shipment` for derives.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(Namespace::Module(path)) => format!("{path}::{}", self.type_name()),
            _ => self.type_name(),
        }
    }

    pub fn span(&self) -> Span {
        self.ident.span()
    }
}

fn collect_fields(fields: &Fields) -> Vec<DeclaredField> {
    fields
        .iter()
        .map(|field| DeclaredField {
            ident: field.ident.clone(),
            ty: field.ty.clone(),
        })
        .collect()
}

/// One generation-eligible field or record component.
#[derive(Debug, Clone)]
pub struct Member {
    /// Identifier as written, possibly raw (`r#type`).
    pub ident: Ident,
    /// Member name as a plain string (`type`).
    pub name: String,
    pub ty: Type,
    /// Position among eligible members, starting at 0.
    pub index: usize,
}

impl Member {
    pub fn snake_name(&self) -> String {
        to_lower_snake(&self.name)
    }
}
