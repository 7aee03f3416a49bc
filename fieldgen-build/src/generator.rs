//! Generator that rewrites schema files into compiled modules with their
//! field artifacts spliced in.

use crate::report::{GenerationReport, format_diagnostic};
use crate::scanner::{SchemaFile, has_fieldgen_derive, is_module_name, scan_directory};
use anyhow::{Context, Result, bail};
use fieldgen_codegen::{ArtifactKind, Namespace, Outcome, generate_input, is_helper_attribute, requested_kinds};
use quote::quote;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use syn::punctuated::Punctuated;
use syn::{Attribute, DeriveInput, Item, Token, parse_quote};

/// Builder for configuring and running the schema generator.
pub struct Generator {
    scan_paths: Vec<PathBuf>,
    output_dir: PathBuf,
    crate_name: String,
    dry_run: bool,
}

impl Generator {
    /// Create a new generator with default settings.
    pub fn new() -> Self {
        Self {
            scan_paths: Vec::new(),
            output_dir: PathBuf::from("src/generated"),
            crate_name: "crate".to_string(),
            dry_run: false,
        }
    }

    /// Add a directory (or single file) of schema sources.
    ///
    /// Can be called multiple times to scan multiple directories.
    /// Default: `schema/`
    pub fn scan_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scan_paths.push(path.into());
        self
    }

    /// Set the directory that receives the generated modules.
    ///
    /// Default: `src/generated`
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    /// Set the module path the output directory is mounted at, used to name
    /// declarations in diagnostics.
    ///
    /// Default: `crate`
    pub fn crate_name(mut self, name: impl Into<String>) -> Self {
        self.crate_name = name.into();
        self
    }

    /// Run the whole pipeline without touching the output directory.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the generator.
    ///
    /// Declarations that fail validation are reported in the returned
    /// [`GenerationReport`] and do not abort the run; read, parse and write
    /// failures do.
    pub fn run(self) -> Result<GenerationReport> {
        let scan_paths = if self.scan_paths.is_empty() {
            vec![PathBuf::from("schema/")]
        } else {
            self.scan_paths.clone()
        };

        let mut report = GenerationReport {
            dry_run: self.dry_run,
            ..Default::default()
        };
        let mut units: BTreeMap<PathBuf, Unit> = BTreeMap::new();

        for path in &scan_paths {
            let files =
                scan_directory(path, &self.crate_name).with_context(|| format!("Failed to scan {}", path.display()))?;

            for file in files {
                let Some(namespace) = file.namespace.clone() else {
                    log::warn!("{}: file name is not a module name, skipping", file.path.display());
                    let outcomes = unresolved_outcomes(&file);
                    report.outcomes.extend(outcomes);
                    continue;
                };

                let (items, outcomes) = transform_items(file.syntax.items, &namespace)
                    .with_context(|| format!("Failed to transform {}", file.path.display()))?;
                for diagnostic in outcomes.iter().flat_map(|outcome| &outcome.diagnostics) {
                    log::warn!("{}", format_diagnostic(diagnostic));
                }
                report.outcomes.extend(outcomes);

                if let Some(previous) = units.get(&file.output) {
                    bail!(
                        "{} and {} both generate {}",
                        previous.source.display(),
                        file.path.display(),
                        file.output.display()
                    );
                }
                units.insert(
                    file.output,
                    Unit {
                        source: file.path,
                        attrs: file.syntax.attrs,
                        items,
                    },
                );
            }
        }

        add_module_declarations(&mut units);

        for (relative, unit) in &units {
            let path = self.output_dir.join(relative);
            let code = render_unit(unit).with_context(|| format!("Failed to render {}", path.display()))?;
            if write_if_changed(&path, &code, self.dry_run)? {
                log::info!("{} {}", if self.dry_run { "would write" } else { "wrote" }, path.display());
                report.files_written.push(path);
            } else {
                report.files_unchanged.push(path);
            }
        }

        log::debug!(
            "generated {} artifact(s) with {} error(s) and {} warning(s)",
            report.artifact_count(),
            report.error_count(),
            report.warning_count()
        );

        Ok(report)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// One output file before rendering.
struct Unit {
    source: PathBuf,
    attrs: Vec<Attribute>,
    items: Vec<Item>,
}

/// Rewrite a module's items: strip fieldgen derives and helper attributes and
/// splice every produced artifact right after its declaration.
fn transform_items(items: Vec<Item>, namespace: &Namespace) -> Result<(Vec<Item>, Vec<Outcome>)> {
    let mut output = Vec::with_capacity(items.len());
    let mut outcomes = Vec::new();

    for item in items {
        match item {
            Item::Mod(mut item_mod) if item_mod.content.is_some() => {
                let child = namespace.child(&item_mod.ident.to_string());
                if let Some((brace, inner)) = item_mod.content.take() {
                    let (inner, inner_outcomes) = transform_items(inner, &child)?;
                    item_mod.content = Some((brace, inner));
                    outcomes.extend(inner_outcomes);
                }
                output.push(Item::Mod(item_mod));
            }
            item => match declaration(&item) {
                Some(input) if has_fieldgen_derive(&input.attrs) => {
                    let (stripped, declaration_outcomes) = generate_for(input, namespace)?;
                    output.push(stripped);
                    output.extend(artifact_items(&declaration_outcomes)?);
                    outcomes.extend(declaration_outcomes);
                }
                _ => output.push(item),
            },
        }
    }

    Ok((output, outcomes))
}

fn generate_for(mut input: DeriveInput, namespace: &Namespace) -> Result<(Item, Vec<Outcome>)> {
    let kinds = requested_kinds(&input.attrs)
        .with_context(|| format!("Malformed derive attribute on `{}`", input.ident))?;
    log::debug!("{namespace}::{}: generating {}", input.ident, join_kinds(&kinds));

    let outcomes = generate_input(&input, Some(namespace.clone()), &kinds);

    input.attrs = strip_fieldgen_attrs(std::mem::take(&mut input.attrs))?;
    Ok((Item::from(input), outcomes))
}

/// Struct, enum and union items as derive input; anything else is not a declaration.
fn declaration(item: &Item) -> Option<DeriveInput> {
    match item {
        Item::Struct(item) => Some(DeriveInput::from(item.clone())),
        Item::Enum(item) => Some(DeriveInput::from(item.clone())),
        Item::Union(item) => Some(DeriveInput::from(item.clone())),
        _ => None,
    }
}

fn join_kinds(kinds: &[ArtifactKind]) -> String {
    kinds.iter().map(ArtifactKind::to_string).collect::<Vec<_>>().join(", ")
}

fn artifact_items(outcomes: &[Outcome]) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    for artifact in outcomes.iter().filter_map(|outcome| outcome.artifact.as_ref()) {
        let file: syn::File = syn::parse2(artifact.tokens().clone())
            .with_context(|| format!("Generated {} for {} does not parse", artifact.kind(), artifact.declaration()))?;
        items.extend(file.items);
    }
    Ok(items)
}

/// Drop fieldgen entries from `#[derive(..)]` lists and every helper
/// attribute; the output must not expand the derives a second time.
fn strip_fieldgen_attrs(attrs: Vec<Attribute>) -> Result<Vec<Attribute>> {
    let mut kept = Vec::with_capacity(attrs.len());

    for attr in attrs {
        if is_helper_attribute(&attr) {
            continue;
        }
        if !attr.path().is_ident("derive") {
            kept.push(attr);
            continue;
        }

        let paths = attr
            .parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
            .context("Malformed derive attribute")?;
        let remaining: Vec<&syn::Path> = paths
            .iter()
            .filter(|path| ArtifactKind::from_derive_path(path).is_none())
            .collect();
        if !remaining.is_empty() {
            kept.push(parse_quote!(#[derive(#(#remaining),*)]));
        }
    }

    Ok(kept)
}

/// Every requested artifact of a file whose path has no module name fails
/// with `UnresolvedNamespace`.
fn unresolved_outcomes(file: &SchemaFile) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    collect_unresolved(&file.syntax.items, &mut outcomes);
    outcomes
}

fn collect_unresolved(items: &[Item], outcomes: &mut Vec<Outcome>) {
    for item in items {
        if let Item::Mod(item_mod) = item
            && let Some((_, inner)) = &item_mod.content
        {
            collect_unresolved(inner, outcomes);
        } else if let Some(input) = declaration(item)
            && let Ok(kinds) = requested_kinds(&input.attrs)
        {
            outcomes.extend(generate_input(&input, None, &kinds));
        }
    }
}

/// Give every generated directory a `mod.rs` declaring its children. A
/// schema-provided `mod.rs` keeps its items; declarations it already has are
/// not repeated.
fn add_module_declarations(units: &mut BTreeMap<PathBuf, Unit>) {
    let mut children: BTreeMap<PathBuf, BTreeSet<String>> = BTreeMap::new();

    for relative in units.keys() {
        let mut current = relative.clone();
        let mut is_file = true;
        loop {
            let Some(name) = current.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                break;
            };
            let parent = current.parent().map(Path::to_path_buf).unwrap_or_default();
            if !(is_file && name == "mod") {
                children.entry(parent.clone()).or_default().insert(name);
            }
            if parent.as_os_str().is_empty() {
                break;
            }
            current = parent;
            is_file = false;
        }
    }
    children.entry(PathBuf::new()).or_default();

    for (dir, names) in children {
        let mod_path = dir.join("mod.rs");
        let unit = units.entry(mod_path.clone()).or_insert_with(|| Unit {
            source: mod_path,
            attrs: Vec::new(),
            items: Vec::new(),
        });
        let declared: BTreeSet<String> = unit
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Mod(item_mod) => Some(item_mod.ident.to_string()),
                _ => None,
            })
            .collect();

        let declarations: Vec<Item> = names
            .iter()
            .filter(|name| is_module_name(name) && !declared.contains(*name))
            .map(|name| {
                let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
                parse_quote!(pub mod #ident;)
            })
            .collect();
        let items = std::mem::take(&mut unit.items);
        unit.items = declarations.into_iter().chain(items).collect();
    }
}

fn render_unit(unit: &Unit) -> Result<String> {
    let attrs = &unit.attrs;
    let items = &unit.items;
    let output = quote! {
        #![allow(unused_imports)]
        #(#attrs)*
        #(#items)*
    };

    let syntax_tree = syn::parse2(output).context("Failed to parse generated code")?;
    Ok(format!(
        "// Generated by fieldgen-build. Do not edit manually.\n\n{}",
        prettyplease::unparse(&syntax_tree)
    ))
}

/// Only write if content has changed (avoids unnecessary recompilation).
fn write_if_changed(path: &Path, code: &str, dry_run: bool) -> Result<bool> {
    let should_write = match fs::read_to_string(path) {
        Ok(existing) => existing != code,
        Err(_) => true,
    };

    if should_write && !dry_run {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, code).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(should_write)
}
