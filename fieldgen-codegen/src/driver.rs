//! Per-declaration generation pipeline: extract, validate, emit.

use proc_macro2::TokenStream;
use syn::punctuated::Punctuated;
use syn::{Attribute, DeriveInput, Path, Token};

use crate::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use crate::emit::{GeneratedArtifact, emit};
use crate::extract::extract_members;
use crate::model::{Namespace, TypeDeclaration};
use crate::options::{ArtifactKind, RawOptions};
use crate::validate::validate;

/// Result of one (declaration, artifact kind) request.
///
/// A hard diagnostic means `artifact` is `None`; recoverable diagnostics may
/// accompany a produced artifact.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub declaration: String,
    pub kind: ArtifactKind,
    pub artifact: Option<GeneratedArtifact>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Outcome {
    fn failed(declaration: String, kind: ArtifactKind, diagnostic: Diagnostic) -> Self {
        Self {
            declaration,
            kind,
            artifact: None,
            diagnostics: vec![diagnostic],
        }
    }

    pub fn is_success(&self) -> bool {
        self.artifact.is_some()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity() == Severity::Error)
    }

    /// Tokens for the compiler: every diagnostic followed by the artifact, if any.
    pub fn to_tokens(&self) -> TokenStream {
        let mut tokens: TokenStream = self.diagnostics.iter().map(Diagnostic::to_tokens).collect();
        if let Some(artifact) = &self.artifact {
            tokens.extend(artifact.tokens().clone());
        }
        tokens
    }
}

/// Generate one artifact for `decl`.
pub fn generate(decl: &TypeDeclaration, kind: ArtifactKind, raw: &RawOptions) -> Outcome {
    let declaration = decl.qualified_name();
    let members = extract_members(decl);

    match validate(decl, &members, kind, raw) {
        Ok(validation) => Outcome {
            declaration,
            kind,
            artifact: Some(emit(decl, &members, kind, &validation.options)),
            diagnostics: validation.recovered,
        },
        Err(diagnostic) => Outcome::failed(declaration, kind, diagnostic),
    }
}

/// Generate every requested artifact for one declaration. Each request is
/// handled independently; one failing kind does not affect the others.
pub fn generate_all(decl: &TypeDeclaration, requests: &[(ArtifactKind, RawOptions)]) -> Vec<Outcome> {
    requests.iter().map(|(kind, raw)| generate(decl, *kind, raw)).collect()
}

/// Parse derive input and generate `kinds`, turning malformed attributes into
/// `InvalidAttribute` outcomes instead of errors.
pub fn generate_input(input: &DeriveInput, namespace: Option<Namespace>, kinds: &[ArtifactKind]) -> Vec<Outcome> {
    let declaration = match &namespace {
        Some(Namespace::Module(path)) => format!("{path}::{}", input.ident),
        _ => input.ident.to_string(),
    };

    let decl = match TypeDeclaration::from_derive_input(input, namespace) {
        Ok(decl) => decl,
        Err(err) => {
            let diagnostic = Diagnostic::from_syn(DiagnosticKind::InvalidAttribute, &declaration, &err);
            return kinds
                .iter()
                .map(|kind| Outcome::failed(declaration.clone(), *kind, diagnostic.clone()))
                .collect();
        }
    };

    kinds
        .iter()
        .map(|kind| match RawOptions::from_attrs(&decl.attrs, *kind) {
            Ok(raw) => generate(&decl, *kind, &raw),
            Err(err) => Outcome::failed(
                decl.qualified_name(),
                *kind,
                Diagnostic::from_syn(DiagnosticKind::InvalidAttribute, decl.qualified_name(), &err),
            ),
        })
        .collect()
}

/// Artifact kinds requested through `#[derive(..)]`, in the order written.
pub fn requested_kinds(attrs: &[Attribute]) -> syn::Result<Vec<ArtifactKind>> {
    let mut kinds = Vec::new();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let paths = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
        for path in &paths {
            if let Some(kind) = ArtifactKind::from_derive_path(path)
                && !kinds.contains(&kind)
            {
                kinds.push(kind);
            }
        }
    }

    Ok(kinds)
}
