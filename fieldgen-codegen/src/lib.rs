//! Code generation engine behind the fieldgen derives and build generator.
//!
//! A record declaration goes through the same pipeline for every artifact
//! kind: [`extract_members`], [`validate`], then one emitter. The derive
//! macros and `fieldgen-build` only differ in where the declaration comes from
//! and where the output goes.

mod diagnostics;
mod driver;
mod emit;
mod extract;
mod model;
mod naming;
mod options;
mod validate;

use proc_macro2::TokenStream;
use syn::DeriveInput;

pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use driver::{Outcome, generate, generate_all, generate_input, requested_kinds};
pub use emit::{GeneratedArtifact, emit};
pub use extract::extract_members;
pub use model::{DeclarationKind, DeclaredField, Member, Namespace, TypeDeclaration};
pub use naming::{to_lower_snake, to_screaming_snake};
pub use options::{ArtifactKind, CONTAINER_ATTRIBUTE, GenerationOptions, RawOptions, Visibility, is_helper_attribute};
pub use validate::{Validation, is_valid_artifact_name, validate};

/// Expand one derive: diagnostics and the artifact, in the caller's module.
pub fn expand_derive(input: &DeriveInput, kind: ArtifactKind) -> TokenStream {
    generate_input(input, Some(Namespace::CallSite), &[kind])
        .iter()
        .map(Outcome::to_tokens)
        .collect()
}
