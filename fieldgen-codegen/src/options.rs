//! Artifact kinds and the options attached to a declaration.

use std::fmt;

use proc_macro2::{Ident, TokenStream};
use quote::{ToTokens, format_ident, quote};
use syn::{Attribute, LitStr, Meta, Path};

use crate::model::TypeDeclaration;

/// Attribute carrying declaration-level settings (`#[fieldgen(record)]`).
pub const CONTAINER_ATTRIBUTE: &str = "fieldgen";

/// The four generated artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    FieldNames,
    FieldEnum,
    FieldVisitor,
    FieldMapper,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::FieldNames,
        ArtifactKind::FieldEnum,
        ArtifactKind::FieldVisitor,
        ArtifactKind::FieldMapper,
    ];

    /// Name of the derive requesting this artifact.
    pub fn derive_name(self) -> &'static str {
        match self {
            ArtifactKind::FieldNames => "FieldNames",
            ArtifactKind::FieldEnum => "FieldEnum",
            ArtifactKind::FieldVisitor => "FieldVisitor",
            ArtifactKind::FieldMapper => "FieldMapper",
        }
    }

    /// Visitors and mappers come with a `<Name>Builder` type.
    pub fn has_builder(self) -> bool {
        matches!(self, ArtifactKind::FieldVisitor | ArtifactKind::FieldMapper)
    }

    /// Helper attribute configuring this artifact.
    pub fn attribute_name(self) -> &'static str {
        match self {
            ArtifactKind::FieldNames => "field_names",
            ArtifactKind::FieldEnum => "field_enum",
            ArtifactKind::FieldVisitor => "field_visitor",
            ArtifactKind::FieldMapper => "field_mapper",
        }
    }

    /// Appended to the source type name when no custom name is given.
    pub fn default_suffix(self) -> &'static str {
        match self {
            ArtifactKind::FieldNames => "FieldNames",
            ArtifactKind::FieldEnum => "Fields",
            ArtifactKind::FieldVisitor => "FieldVisitor",
            ArtifactKind::FieldMapper => "FieldMapper",
        }
    }

    pub fn from_derive_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.derive_name() == name)
    }

    /// Matches `FieldEnum` as well as `fieldgen::FieldEnum`.
    pub fn from_derive_path(path: &Path) -> Option<Self> {
        path.segments
            .last()
            .and_then(|segment| Self::from_derive_name(&segment.ident.to_string()))
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.derive_name())
    }
}

/// Export scope of a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// `pub`.
    #[default]
    Exported,
    /// Private to the enclosing module and its children.
    ModuleLocal,
}

impl Visibility {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "exported" | "pub" | "public" => Some(Visibility::Exported),
            "module" | "private" | "module_local" => Some(Visibility::ModuleLocal),
            _ => None,
        }
    }
}

impl ToTokens for Visibility {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        if let Visibility::Exported = self {
            tokens.extend(quote!(pub));
        }
    }
}

/// Options exactly as written in a helper attribute, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub name: Option<LitStr>,
    pub visibility: Option<LitStr>,
}

impl RawOptions {
    /// Read the helper attribute belonging to `kind`, e.g. `#[field_enum(name = "OrderColumns")]`.
    ///
    /// Repeated attributes are merged, later values winning.
    pub fn from_attrs(attrs: &[Attribute], kind: ArtifactKind) -> syn::Result<Self> {
        let mut options = RawOptions::default();

        for attr in attrs {
            if !attr.path().is_ident(kind.attribute_name()) || matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    options.name = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("visibility") {
                    options.visibility = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error(format!(
                        "unsupported `{}` option, expected `name` or `visibility`",
                        kind.attribute_name()
                    )))
                }
            })?;
        }

        Ok(options)
    }
}

/// Resolved configuration for one (declaration, artifact) pair.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub artifact_name: Ident,
    pub visibility: Visibility,
}

impl GenerationOptions {
    pub fn default_name(decl: &TypeDeclaration, kind: ArtifactKind) -> Ident {
        format_ident!("{}{}", decl.type_name(), kind.default_suffix(), span = decl.span())
    }
}

/// True for `#[fieldgen(..)]` and every per-artifact helper attribute.
pub fn is_helper_attribute(attr: &Attribute) -> bool {
    attr.path().is_ident(CONTAINER_ATTRIBUTE)
        || ArtifactKind::ALL
            .iter()
            .any(|kind| attr.path().is_ident(kind.attribute_name()))
}

pub(crate) fn is_record_marked(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut record = false;

    for attr in attrs {
        if !attr.path().is_ident(CONTAINER_ATTRIBUTE) || matches!(attr.meta, Meta::Path(_)) {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("record") {
                record = true;
                Ok(())
            } else {
                Err(meta.error("unsupported `fieldgen` option, expected `record`"))
            }
        })?;
    }

    Ok(record)
}
