use anyhow::{Result, bail};
use clap::Args;
use comfy_table::{Cell, Color as TableColor, Table};
use fieldgen_build::{GenerationReport, Generator, format_diagnostic};
use fieldgen_codegen::Outcome;
use serde::Serialize;
use std::path::PathBuf;

use crate::context::ProjectContext;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, themed_table};

pub const GENERATE_HELP: &str = "\
Examples:
  fieldgen generate                                  Use fieldgen.toml [generate] or defaults
  fieldgen generate --scan schema --out src/generated
  fieldgen generate --scan models --scan dto         Scan several directories";

pub const CHECK_HELP: &str = "\
Examples:
  fieldgen check                  Report diagnostics and stale generated files
  fieldgen check --output json    Machine-readable report for CI";

#[derive(Args)]
pub struct GenerateArgs {
    /// Schema directory or file to scan (repeatable)
    #[arg(long = "scan", value_name = "PATH")]
    pub scan_paths: Vec<PathBuf>,

    /// Directory that receives the generated modules
    #[arg(long = "out", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Module path the output directory is mounted at
    #[arg(long, value_name = "PATH")]
    pub crate_name: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Schema directory or file to scan (repeatable)
    #[arg(long = "scan", value_name = "PATH")]
    pub scan_paths: Vec<PathBuf>,

    /// Module path the output directory is mounted at
    #[arg(long, value_name = "PATH")]
    pub crate_name: Option<String>,
}

const NOTHING_FOUND: &str = "No fieldgen derives found; check the scan paths in fieldgen.toml";

/// One row per (declaration, artifact kind) request.
#[derive(Debug, Serialize)]
struct OutcomeRow {
    declaration: String,
    artifact: &'static str,
    name: Option<String>,
    status: &'static str,
    diagnostics: Vec<String>,
}

impl From<&Outcome> for OutcomeRow {
    fn from(outcome: &Outcome) -> Self {
        let status = match (&outcome.artifact, outcome.diagnostics.is_empty()) {
            (None, _) => "failed",
            (Some(_), true) => "generated",
            (Some(_), false) => "generated with warnings",
        };

        Self {
            declaration: outcome.declaration.clone(),
            artifact: outcome.kind.derive_name(),
            name: outcome.artifact.as_ref().map(|artifact| artifact.name().to_string()),
            status,
            diagnostics: outcome.diagnostics.iter().map(format_diagnostic).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateSummary {
    dry_run: bool,
    artifacts: usize,
    errors: usize,
    warnings: usize,
    files_written: Vec<PathBuf>,
    files_unchanged: usize,
    outcomes: Vec<OutcomeRow>,
}

impl From<&GenerationReport> for GenerateSummary {
    fn from(report: &GenerationReport) -> Self {
        Self {
            dry_run: report.dry_run,
            artifacts: report.artifact_count(),
            errors: report.error_count(),
            warnings: report.warning_count(),
            files_written: report.files_written.clone(),
            files_unchanged: report.files_unchanged.len(),
            outcomes: report.outcomes.iter().map(OutcomeRow::from).collect(),
        }
    }
}

impl TableDisplay for GenerateSummary {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["Declaration", "Artifact", "Name", "Status"]);

        if self.outcomes.is_empty() {
            table.add_row(vec![Cell::new("-"), Cell::new("-"), Cell::new("-"), Cell::new("nothing to generate")]);
            return table;
        }

        for row in &self.outcomes {
            let status = Cell::new(row.status);
            let status = if options.no_color {
                status
            } else {
                status.fg(match row.status {
                    "failed" => TableColor::Red,
                    "generated" => TableColor::Green,
                    _ => TableColor::Yellow,
                })
            };
            table.add_row(vec![
                Cell::new(&row.declaration),
                Cell::new(row.artifact),
                Cell::new(row.name.as_deref().unwrap_or("-")),
                status,
            ]);
        }

        table
    }

    fn to_compact(&self) -> String {
        format!(
            "artifacts={} errors={} warnings={} files_written={} files_unchanged={}",
            self.artifacts,
            self.errors,
            self.warnings,
            self.files_written.len(),
            self.files_unchanged
        )
    }
}

pub fn handle_generate(args: GenerateArgs, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;
    let output_dir = args.output_dir.unwrap_or_else(|| ctx.output_dir());
    let generator = configure(&ctx, args.scan_paths, args.crate_name)
        .output_dir(&output_dir)
        .dry_run(false);

    output.verbose(&format!("Writing generated modules to {}", output_dir.display()));
    let report = generator.run()?;
    present(&report, output)?;

    if report.outcomes.is_empty() {
        output.note(NOTHING_FOUND);
    } else if !report.has_errors() {
        output.success(&format!(
            "Generated {} artifact(s), wrote {} file(s)",
            report.artifact_count(),
            report.files_written.len()
        ));
    }
    fail_on_errors(&report, output)
}

pub fn handle_check(args: CheckArgs, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;
    let generator = configure(&ctx, args.scan_paths, args.crate_name)
        .output_dir(ctx.output_dir())
        .dry_run(true);

    let report = generator.run()?;
    present(&report, output)?;

    if report.outcomes.is_empty() {
        output.note(NOTHING_FOUND);
    } else if report.files_written.is_empty() {
        output.success("Generated modules are up to date");
    } else {
        output.warning(&format!(
            "{} generated file(s) are stale; run 'fieldgen generate'",
            report.files_written.len()
        ));
    }
    fail_on_errors(&report, output)
}

/// CLI scan paths replace the configured ones; the crate name falls back to
/// `fieldgen.toml`.
fn configure(ctx: &ProjectContext, scan_paths: Vec<PathBuf>, crate_name: Option<String>) -> Generator {
    let scan_paths = if scan_paths.is_empty() { ctx.scan_paths() } else { scan_paths };
    let crate_name = crate_name.unwrap_or_else(|| ctx.crate_name().to_string());

    scan_paths
        .into_iter()
        .fold(fieldgen_build::generate(), Generator::scan_path)
        .crate_name(crate_name)
}

fn present(report: &GenerationReport, output: &OutputManager) -> Result<()> {
    output.display(&GenerateSummary::from(report))?;

    for diagnostic in report.diagnostics() {
        output.item(&format_diagnostic(diagnostic));
    }
    for path in &report.files_written {
        output.verbose(&format!(
            "{} {}",
            if report.dry_run { "stale" } else { "wrote" },
            path.display()
        ));
    }
    Ok(())
}

fn fail_on_errors(report: &GenerationReport, output: &OutputManager) -> Result<()> {
    if report.has_errors() {
        output.error(&format!("{} declaration(s) failed validation", report.error_count()));
        bail!("generation failed");
    }
    Ok(())
}
