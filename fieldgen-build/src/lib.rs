//! Build-time generator for fieldgen artifacts.
//!
//! This crate scans schema files for structs deriving `FieldNames`,
//! `FieldEnum`, `FieldVisitor` or `FieldMapper` and writes a copy of each
//! file into the output directory with the derives expanded in place, so the
//! generated code is readable and checked in like any other module.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     let report = fieldgen_build::generate()
//!         .scan_path("schema/")
//!         .output_dir("src/generated")
//!         .crate_name("crate::generated")
//!         .run()
//!         .expect("Failed to generate field artifacts");
//!
//!     report.emit_cargo_diagnostics();
//!     report.ensure_success().expect("fieldgen diagnostics");
//!
//!     println!("cargo:rerun-if-changed=schema/");
//! }
//! ```

mod generator;
mod report;
mod scanner;

pub use generator::Generator;
pub use report::{GenerationReport, format_diagnostic};

/// Create a new generator with default settings.
///
/// # Example
///
/// ```ignore
/// fieldgen_build::generate()
///     .scan_path("schema/")
///     .output_dir("src/generated")
///     .run()?
///     .ensure_success()?;
/// ```
pub fn generate() -> Generator {
    Generator::new()
}
