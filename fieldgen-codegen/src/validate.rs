//! Generation preconditions, checked before any emitter runs.

use std::collections::HashMap;

use proc_macro2::Ident;
use syn::LitStr;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::model::{Member, TypeDeclaration};
use crate::naming::to_screaming_snake;
use crate::options::{ArtifactKind, GenerationOptions, RawOptions, Visibility};

/// Resolved options plus any recoverable diagnostics raised on the way.
#[derive(Debug, Clone)]
pub struct Validation {
    pub options: GenerationOptions,
    pub recovered: Vec<Diagnostic>,
}

/// Validate one (declaration, artifact) request.
///
/// Checks run in a fixed order: declaration kind, namespace, member name
/// collisions, custom artifact name, visibility. The first three abort the
/// request; an invalid custom name is reported and replaced by the default.
pub fn validate(
    decl: &TypeDeclaration,
    members: &[Member],
    kind: ArtifactKind,
    raw: &RawOptions,
) -> Result<Validation, Diagnostic> {
    let declaration = decl.qualified_name();

    if !decl.kind.is_supported() {
        return Err(Diagnostic::new(
            DiagnosticKind::UnsupportedDeclarationKind,
            &declaration,
            format!(
                "#[derive({kind})] requires a struct with named fields, found {}",
                decl.kind.describe()
            ),
        )
        .with_span(decl.span()));
    }

    if decl.namespace.is_none() {
        return Err(Diagnostic::new(
            DiagnosticKind::UnresolvedNamespace,
            &declaration,
            format!("cannot determine the module enclosing `{}`", decl.type_name()),
        )
        .with_span(decl.span()));
    }

    check_member_names(&declaration, members)?;

    let mut recovered = Vec::new();
    let default_name = GenerationOptions::default_name(decl, kind);
    let artifact_name = match raw.name.as_ref().filter(|name| !name.value().trim().is_empty()) {
        None => default_name,
        Some(lit) => match custom_name(decl, kind, lit) {
            Ok(ident) => ident,
            Err(reason) => {
                recovered.push(
                    Diagnostic::new(
                        DiagnosticKind::InvalidArtifactName,
                        &declaration,
                        format!(
                            "invalid {kind} name {:?}: {reason}; using `{default_name}` instead",
                            lit.value()
                        ),
                    )
                    .with_span(lit.span()),
                );
                default_name
            }
        },
    };

    let visibility = raw
        .visibility
        .as_ref()
        .and_then(|lit| Visibility::parse(&lit.value()))
        .unwrap_or_default();

    Ok(Validation {
        options: GenerationOptions {
            artifact_name,
            visibility,
        },
        recovered,
    })
}

fn check_member_names(declaration: &str, members: &[Member]) -> Result<(), Diagnostic> {
    let mut seen: HashMap<String, &Member> = HashMap::new();

    for member in members {
        let folded = member.name.to_lowercase();
        let screaming = to_screaming_snake(&member.name);

        for key in [format!("ci:{folded}"), format!("ss:{screaming}")] {
            if let Some(previous) = seen.get(&key) {
                return Err(Diagnostic::new(
                    DiagnosticKind::DuplicateMemberName,
                    declaration,
                    format!(
                        "members `{}` and `{}` produce the same generated name",
                        previous.name, member.name
                    ),
                )
                .with_member(&member.name)
                .with_span(member.ident.span()));
            }
            seen.insert(key, member);
        }
    }

    Ok(())
}

fn custom_name(decl: &TypeDeclaration, kind: ArtifactKind, lit: &LitStr) -> Result<Ident, String> {
    let value = lit.value();
    if !is_valid_artifact_name(&value) {
        return Err("not a single identifier".to_string());
    }
    if value == decl.type_name() {
        return Err("it would shadow the source type".to_string());
    }
    if let Some(other) = reserved_names(decl, kind).into_iter().find(|reserved| *reserved == value) {
        return Err(format!("it clashes with the generated `{other}`"));
    }
    Ok(Ident::new(&value, lit.span()))
}

/// Type names the other artifact kinds generate by default, builders included.
fn reserved_names(decl: &TypeDeclaration, kind: ArtifactKind) -> Vec<String> {
    ArtifactKind::ALL
        .into_iter()
        .filter(|other| *other != kind)
        .flat_map(|other| {
            let name = GenerationOptions::default_name(decl, other).to_string();
            let builder = other.has_builder().then(|| format!("{name}Builder"));
            std::iter::once(name).chain(builder)
        })
        .collect()
}

/// True when `name` is one plain Rust identifier: not empty, no whitespace or
/// path separators, not a keyword, and not written in raw form.
pub fn is_valid_artifact_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(char::is_whitespace)
        && !name.starts_with("r#")
        && name != "_"
        && syn::parse_str::<Ident>(name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_members;
    use crate::model::Namespace;
    use syn::DeriveInput;

    fn declaration(source: &str, namespace: Option<Namespace>) -> TypeDeclaration {
        let input: DeriveInput = syn::parse_str(source).unwrap();
        TypeDeclaration::from_derive_input(&input, namespace).unwrap()
    }

    fn run(source: &str, kind: ArtifactKind) -> Result<Validation, Diagnostic> {
        let decl = declaration(source, Some(Namespace::CallSite));
        let raw = RawOptions::from_attrs(&decl.attrs, kind).unwrap();
        validate(&decl, &extract_members(&decl), kind, &raw)
    }

    #[test]
    fn test_defaults() {
        let validation = run("struct Order { sku: String, quantity: u32 }", ArtifactKind::FieldEnum).unwrap();
        assert_eq!(validation.options.artifact_name.to_string(), "OrderFields");
        assert_eq!(validation.options.visibility, Visibility::Exported);
        assert!(validation.recovered.is_empty());
    }

    #[test]
    fn test_custom_name_and_visibility() {
        let validation = run(
            r#"#[field_visitor(name = "OrderWalker", visibility = "module")] struct Order { sku: String }"#,
            ArtifactKind::FieldVisitor,
        )
        .unwrap();
        assert_eq!(validation.options.artifact_name.to_string(), "OrderWalker");
        assert_eq!(validation.options.visibility, Visibility::ModuleLocal);
    }

    #[test]
    fn test_unsupported_kind() {
        let err = run("enum State { Open }", ArtifactKind::FieldNames).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnsupportedDeclarationKind);

        let err = run("struct Pair(u8, u8);", ArtifactKind::FieldNames).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnsupportedDeclarationKind);
    }

    #[test]
    fn test_unresolved_namespace() {
        let decl = declaration("struct Order { sku: String }", None);
        let err = validate(&decl, &extract_members(&decl), ArtifactKind::FieldNames, &RawOptions::default())
            .unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnresolvedNamespace);
    }

    #[test]
    fn test_unsupported_kind_checked_before_namespace() {
        let decl = declaration("struct Marker;", None);
        let err = validate(&decl, &[], ArtifactKind::FieldNames, &RawOptions::default()).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::UnsupportedDeclarationKind);
    }

    #[test]
    fn test_case_insensitive_duplicates() {
        let err = run("struct Shipment { id: String, Id: String }", ArtifactKind::FieldNames).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::DuplicateMemberName);
        assert_eq!(err.member.as_deref(), Some("Id"));
    }

    #[test]
    fn test_screaming_snake_duplicates() {
        let err = run("struct Shipment { myField: u8, my_field: u8 }", ArtifactKind::FieldEnum).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::DuplicateMemberName);
    }

    #[test]
    fn test_invalid_custom_name_falls_back() {
        let validation = run(
            r#"#[field_names(name = "Custom Name")] struct Order { sku: String }"#,
            ArtifactKind::FieldNames,
        )
        .unwrap();
        assert_eq!(validation.options.artifact_name.to_string(), "OrderFieldNames");
        assert_eq!(validation.recovered.len(), 1);
        assert_eq!(validation.recovered[0].kind, DiagnosticKind::InvalidArtifactName);
    }

    #[test]
    fn test_name_equal_to_source_type_falls_back() {
        let validation =
            run(r#"#[field_enum(name = "Order")] struct Order { sku: String }"#, ArtifactKind::FieldEnum).unwrap();
        assert_eq!(validation.options.artifact_name.to_string(), "OrderFields");
        assert_eq!(validation.recovered.len(), 1);
    }

    #[test]
    fn test_name_equal_to_other_generated_type_falls_back() {
        let validation = run(
            r#"#[field_names(name = "OrderFields")] struct Order { sku: String }"#,
            ArtifactKind::FieldNames,
        )
        .unwrap();
        assert_eq!(validation.options.artifact_name.to_string(), "OrderFieldNames");
        assert_eq!(validation.recovered[0].kind, DiagnosticKind::InvalidArtifactName);
        assert!(validation.recovered[0].message.contains("clashes with the generated `OrderFields`"));

        let validation = run(
            r#"#[field_enum(name = "OrderFieldMapperBuilder")] struct Order { sku: String }"#,
            ArtifactKind::FieldEnum,
        )
        .unwrap();
        assert_eq!(validation.options.artifact_name.to_string(), "OrderFields");
        assert_eq!(validation.recovered.len(), 1);
    }

    #[test]
    fn test_own_default_name_is_accepted() {
        let validation = run(
            r#"#[field_visitor(name = "OrderFieldVisitor")] struct Order { sku: String }"#,
            ArtifactKind::FieldVisitor,
        )
        .unwrap();
        assert_eq!(validation.options.artifact_name.to_string(), "OrderFieldVisitor");
        assert!(validation.recovered.is_empty());
    }

    #[test]
    fn test_blank_name_means_default() {
        let validation =
            run(r#"#[field_mapper(name = "  ")] struct Order { sku: String }"#, ArtifactKind::FieldMapper).unwrap();
        assert_eq!(validation.options.artifact_name.to_string(), "OrderFieldMapper");
        assert!(validation.recovered.is_empty());
    }

    #[test]
    fn test_unknown_visibility_defaults_to_exported() {
        let validation = run(
            r#"#[field_names(visibility = "protected")] struct Order { sku: String }"#,
            ArtifactKind::FieldNames,
        )
        .unwrap();
        assert_eq!(validation.options.visibility, Visibility::Exported);
        assert!(validation.recovered.is_empty());
    }

    #[test]
    fn test_artifact_name_rules() {
        assert!(is_valid_artifact_name("OrderColumns"));
        assert!(is_valid_artifact_name("_Hidden"));
        assert!(is_valid_artifact_name("Column2"));
        assert!(!is_valid_artifact_name(""));
        assert!(!is_valid_artifact_name("Custom Name"));
        assert!(!is_valid_artifact_name("model::Order"));
        assert!(!is_valid_artifact_name("model.Order"));
        assert!(!is_valid_artifact_name("2Columns"));
        assert!(!is_valid_artifact_name("struct"));
        assert!(!is_valid_artifact_name("Self"));
        assert!(!is_valid_artifact_name("r#Order"));
        assert!(!is_valid_artifact_name("_"));
    }
}
