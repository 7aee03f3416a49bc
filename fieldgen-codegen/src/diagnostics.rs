//! Generation failures and how they reach the host build.

use std::fmt;

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote_spanned};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    UnsupportedDeclarationKind,
    UnresolvedNamespace,
    DuplicateMemberName,
    /// Recoverable: the default artifact name is used instead.
    InvalidArtifactName,
    /// Malformed `#[fieldgen(..)]` or per-artifact helper attribute.
    InvalidAttribute,
}

impl DiagnosticKind {
    pub fn is_recoverable(self) -> bool {
        matches!(self, DiagnosticKind::InvalidArtifactName)
    }

    pub fn severity(self) -> Severity {
        if self.is_recoverable() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::UnsupportedDeclarationKind => "unsupported_declaration_kind",
            DiagnosticKind::UnresolvedNamespace => "unresolved_namespace",
            DiagnosticKind::DuplicateMemberName => "duplicate_member_name",
            DiagnosticKind::InvalidArtifactName => "invalid_artifact_name",
            DiagnosticKind::InvalidAttribute => "invalid_attribute",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A validation or generation failure attached to one declaration.
#[derive(Debug, Clone, Error)]
#[error("{declaration}: {message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Qualified name of the offending declaration.
    pub declaration: String,
    /// Offending member, when the failure is narrower than the declaration.
    pub member: Option<String>,
    pub message: String,
    span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, declaration: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            declaration: declaration.into(),
            member: None,
            message: message.into(),
            span: Span::call_site(),
        }
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn from_syn(kind: DiagnosticKind, declaration: impl Into<String>, err: &syn::Error) -> Self {
        Self::new(kind, declaration, err.to_string()).with_span(err.span())
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind.is_recoverable()
    }

    /// Tokens reporting this diagnostic to the compiler: a hard error, or a
    /// deprecation warning for recoverable diagnostics.
    pub fn to_tokens(&self) -> TokenStream {
        if self.is_recoverable() {
            self.to_warning_tokens()
        } else {
            syn::Error::new(self.span, &self.message).to_compile_error()
        }
    }

    // Stable proc macros cannot emit warnings directly; using a deprecated
    // item triggers one at the span of the offending attribute.
    fn to_warning_tokens(&self) -> TokenStream {
        let note = format!("fieldgen: {}", self.message);
        let marker = format_ident!("fieldgen_{}", self.kind.code(), span = self.span);
        quote_spanned! {self.span=>
            const _: () = {
                #[deprecated(note = #note)]
                #[allow(non_upper_case_globals)]
                const #marker: () = ();
                #marker
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_artifact_name_is_recoverable() {
        assert!(DiagnosticKind::InvalidArtifactName.is_recoverable());
        assert!(!DiagnosticKind::DuplicateMemberName.is_recoverable());
        assert!(!DiagnosticKind::UnsupportedDeclarationKind.is_recoverable());
        assert!(!DiagnosticKind::UnresolvedNamespace.is_recoverable());
        assert!(!DiagnosticKind::InvalidAttribute.is_recoverable());
    }

    #[test]
    fn test_display_includes_declaration() {
        let diagnostic = Diagnostic::new(DiagnosticKind::DuplicateMemberName, "crate::Order", "names clash")
            .with_member("id");
        assert_eq!(diagnostic.to_string(), "crate::Order: names clash");
        assert_eq!(diagnostic.member.as_deref(), Some("id"));
    }

    #[test]
    fn test_error_tokens_use_compile_error() {
        let diagnostic = Diagnostic::new(DiagnosticKind::UnsupportedDeclarationKind, "State", "not a struct");
        let rendered = diagnostic.to_tokens().to_string();
        assert!(rendered.contains("compile_error"));
        assert!(rendered.contains("not a struct"));
    }

    #[test]
    fn test_warning_tokens_use_deprecation() {
        let diagnostic = Diagnostic::new(DiagnosticKind::InvalidArtifactName, "Order", "bad name");
        let rendered = diagnostic.to_tokens().to_string();
        assert!(rendered.contains("deprecated"));
        assert!(rendered.contains("fieldgen_invalid_artifact_name"));
        assert!(!rendered.contains("compile_error"));
    }
}
