use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "fieldgen.toml";

/// Project context for fieldgen operations
#[derive(Debug)]
pub struct ProjectContext {
    /// Root directory of the project (where Cargo.toml is)
    pub project_root: PathBuf,
    /// Configuration from `fieldgen.toml`, or defaults when the file is absent
    pub config: FieldgenConfig,
}

/// Configuration stored in fieldgen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldgenConfig {
    #[serde(default)]
    pub generate: GenerateSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSettings {
    #[serde(default = "default_scan_paths")]
    pub scan_paths: Vec<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_crate_name")]
    pub crate_name: String,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            scan_paths: default_scan_paths(),
            output_dir: default_output_dir(),
            crate_name: default_crate_name(),
        }
    }
}

fn default_scan_paths() -> Vec<String> {
    vec!["schema".to_string()]
}

fn default_output_dir() -> String {
    "src/generated".to_string()
}

fn default_crate_name() -> String {
    "crate".to_string()
}

impl ProjectContext {
    /// Find and load project context from current directory or ancestors
    pub fn find() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::find_from(&current_dir)
    }

    /// Find project context starting from the given directory
    pub fn find_from(start: &Path) -> Result<Self> {
        let project_root = Self::find_project_root(start)?;
        Self::from_root(project_root)
    }

    /// Create context from a known project root
    pub fn from_root(project_root: PathBuf) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            log::debug!("no {CONFIG_FILE} in {}, using defaults", project_root.display());
            FieldgenConfig::default()
        };

        Ok(Self { project_root, config })
    }

    /// Find project root by looking for Cargo.toml
    fn find_project_root(start: &Path) -> Result<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join("Cargo.toml").exists() {
                return Ok(current);
            }

            if !current.pop() {
                anyhow::bail!(
                    "Could not find Cargo.toml in {start:?} or any parent directory. \
                     Are you in a Rust project?"
                );
            }
        }
    }

    /// Configured scan paths, resolved against the project root
    pub fn scan_paths(&self) -> Vec<PathBuf> {
        self.config
            .generate
            .scan_paths
            .iter()
            .map(|path| self.project_root.join(path))
            .collect()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.project_root.join(&self.config.generate.output_dir)
    }

    pub fn crate_name(&self) -> &str {
        &self.config.generate.crate_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = FieldgenConfig::default();
        assert_eq!(config.generate.scan_paths, vec!["schema"]);
        assert_eq!(config.generate.output_dir, "src/generated");
        assert_eq!(config.generate.crate_name, "crate");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: FieldgenConfig = toml::from_str("[generate]\noutput_dir = \"src/fields\"\n").unwrap();
        assert_eq!(config.generate.output_dir, "src/fields");
        assert_eq!(config.generate.scan_paths, vec!["schema"]);

        let config: FieldgenConfig = toml::from_str("").unwrap();
        assert_eq!(config.generate.crate_name, "crate");
    }

    #[test]
    fn test_find_from_nested_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("Cargo.toml"), "[package]\nname = \"shop\"\n").unwrap();
        fs::write(
            root.join(CONFIG_FILE),
            "[generate]\nscan_paths = [\"models\"]\ncrate_name = \"crate::generated\"\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("src/nested")).unwrap();

        let ctx = ProjectContext::find_from(&root.join("src/nested")).unwrap();

        assert_eq!(ctx.project_root, root);
        assert_eq!(ctx.scan_paths(), vec![root.join("models")]);
        assert_eq!(ctx.output_dir(), root.join("src/generated"));
        assert_eq!(ctx.crate_name(), "crate::generated");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[generate]\nscan_paths = \"schema\"\n").unwrap();

        let err = ProjectContext::from_root(dir.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
