//! Source file scanner for schema files declaring fieldgen derives.

use anyhow::{Context, Result};
use fieldgen_codegen::{ArtifactKind, Namespace};
use std::fs;
use std::path::{Path, PathBuf};
use syn::punctuated::Punctuated;
use syn::{Attribute, Ident, Token};
use walkdir::WalkDir;

/// One parsed schema file.
#[derive(Debug, Clone)]
pub struct SchemaFile {
    pub path: PathBuf,
    /// Location of the generated counterpart, relative to the output directory.
    pub output: PathBuf,
    /// `None` when the file path does not map to a module path.
    pub namespace: Option<Namespace>,
    pub syntax: syn::File,
}

/// Scan a directory recursively for Rust schema files.
///
/// Unlike derive expansion, a schema file that cannot be read or parsed fails
/// the whole scan: its declarations would otherwise silently disappear from
/// the generated tree.
pub fn scan_directory(path: &Path, crate_name: &str) -> Result<Vec<SchemaFile>> {
    let base_path = if path.is_file() {
        path.parent().unwrap_or(Path::new(""))
    } else {
        path
    };

    let mut files = Vec::new();

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
        let file_path = entry.path();
        if !entry.file_type().is_file()
            || file_path.extension().is_none_or(|ext| ext != "rs")
            || is_skipped(file_path, base_path)
        {
            continue;
        }

        log::debug!("scanning {}", file_path.display());
        files.push(scan_file(file_path, base_path, crate_name)?);
    }

    Ok(files)
}

fn scan_file(file_path: &Path, base_path: &Path, crate_name: &str) -> Result<SchemaFile> {
    let content =
        fs::read_to_string(file_path).with_context(|| format!("Failed to read {}", file_path.display()))?;

    let syntax = syn::parse_file(&content).with_context(|| format!("Failed to parse {}", file_path.display()))?;

    Ok(SchemaFile {
        path: file_path.to_path_buf(),
        output: output_path(file_path, base_path),
        namespace: compute_module_path(file_path, base_path, crate_name).map(Namespace::Module),
        syntax,
    })
}

fn relative_path<'a>(file_path: &'a Path, base_path: &Path) -> &'a Path {
    file_path.strip_prefix(base_path).unwrap_or(file_path)
}

fn is_skipped(file_path: &Path, base_path: &Path) -> bool {
    relative_path(file_path, base_path)
        .components()
        .any(|c| c.as_os_str() == "generated" || c.as_os_str() == "target")
}

/// A root `lib.rs` becomes the output directory's `mod.rs`; everything else
/// keeps its relative path.
fn output_path(file_path: &Path, base_path: &Path) -> PathBuf {
    let relative = relative_path(file_path, base_path);
    if relative == Path::new("lib.rs") {
        PathBuf::from("mod.rs")
    } else {
        relative.to_path_buf()
    }
}

/// Compute the module path from a file path.
/// e.g., "schema/shipping/order.rs" -> "crate::shipping::order"
///
/// Returns `None` when a path component is not a valid module name.
pub fn compute_module_path(file_path: &Path, base_path: &Path, crate_name: &str) -> Option<String> {
    let relative = relative_path(file_path, base_path);

    let without_extension = relative.with_extension("");
    let mut parts: Vec<&str> = Vec::new();
    for component in without_extension.components() {
        parts.push(component.as_os_str().to_str()?);
    }

    // Remove "mod" from the end, or a root "lib"
    if let Some(last) = parts.last()
        && (*last == "mod" || (*last == "lib" && parts.len() == 1))
    {
        parts.pop();
    }

    if !parts.iter().all(|part| is_module_name(part)) {
        return None;
    }

    if parts.is_empty() {
        Some(crate_name.to_string())
    } else {
        Some(format!("{}::{}", crate_name, parts.join("::")))
    }
}

pub fn is_module_name(name: &str) -> bool {
    syn::parse_str::<Ident>(name).is_ok()
}

/// Check if an item has a fieldgen derive, e.g. `#[derive(FieldEnum)]`.
pub fn has_fieldgen_derive(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("derive")
            && attr
                .parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
                .is_ok_and(|paths| paths.iter().any(|path| ArtifactKind::from_derive_path(path).is_some()))
    })
}
