//! Aggregated outcome of one generator run.

use anyhow::{Result, bail};
use fieldgen_codegen::{Diagnostic, Outcome, Severity};
use std::path::PathBuf;

/// Every per-declaration outcome of a run, plus the files it touched.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<Outcome>,
    /// Files written, or that would be written in a dry run.
    pub files_written: Vec<PathBuf>,
    /// Files whose content was already up to date.
    pub files_unchanged: Vec<PathBuf>,
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.outcomes.iter().flat_map(|outcome| outcome.diagnostics.iter())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics()
            .filter(|diagnostic| diagnostic.severity() == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics()
            .filter(|diagnostic| diagnostic.severity() == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of artifacts produced.
    pub fn artifact_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_success()).count()
    }

    /// Print every diagnostic as a `cargo:warning=` line, for use from `build.rs`.
    pub fn emit_cargo_diagnostics(&self) {
        for diagnostic in self.diagnostics() {
            println!("cargo:warning={}", format_diagnostic(diagnostic));
        }
    }

    /// Fail when any declaration hit a hard diagnostic.
    pub fn ensure_success(&self) -> Result<()> {
        if !self.has_errors() {
            return Ok(());
        }

        let failures: Vec<String> = self
            .diagnostics()
            .filter(|diagnostic| diagnostic.severity() == Severity::Error)
            .map(format_diagnostic)
            .collect();
        bail!(
            "fieldgen-build: {} declaration(s) failed to generate:\n  {}",
            failures.len(),
            failures.join("\n  ")
        )
    }
}

/// `error[duplicate_member_name]: crate::shipping::Order: members ...`
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    format!("{}[{}]: {}", diagnostic.severity(), diagnostic.kind, diagnostic)
}
