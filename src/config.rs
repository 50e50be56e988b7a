//! Export configuration
//!
//! Loaded from a YAML file (default `langsheet.yaml`). Without one, the
//! defaults reproduce the classic layout: `./config.xlsx` exported to
//! `../assets/<bundle>/language/json/{en,zh}.json`.

use crate::error::{LangError, LangResult};
use crate::types::SheetMapping;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "langsheet.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Source workbook
    pub workbook: PathBuf,
    /// Directory holding the bundle directories
    pub output_root: PathBuf,
    /// Path of the JSON files inside a bundle
    pub json_dir: PathBuf,
    /// Language codes, one per text column after the id column
    pub languages: Vec<String>,
    pub sheets: Vec<SheetMapping>,
    /// Stage files of a sheet in temp files and rename them together
    pub atomic: bool,
    /// Create missing output directories instead of failing
    pub create_dirs: bool,
    /// Indented JSON instead of compact
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("./config.xlsx"),
            output_root: PathBuf::from("../assets"),
            json_dir: PathBuf::from("language/json"),
            languages: vec!["en".to_string(), "zh".to_string()],
            sheets: vec![SheetMapping::new("loading-language")],
            atomic: true,
            create_dirs: false,
            pretty: false,
        }
    }
}

impl ExportConfig {
    /// Parse a config file. Relative paths resolve against its directory.
    pub fn from_file(path: &Path) -> LangResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LangError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let mut config: ExportConfig = serde_yaml::from_str(&content)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        config.workbook = resolve(base_dir, &config.workbook);
        config.output_root = resolve(base_dir, &config.output_root);

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise `langsheet.yaml` when present,
    /// otherwise the defaults.
    pub fn load(path: Option<&Path>) -> LangResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> LangResult<()> {
        if self.languages.is_empty() {
            return Err(LangError::Config(
                "At least one language is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for lang in &self.languages {
            if lang.trim().is_empty() {
                return Err(LangError::Config("Empty language code".to_string()));
            }
            if !seen.insert(lang.as_str()) {
                return Err(LangError::Config(format!(
                    "Language '{}' listed more than once",
                    lang
                )));
            }
        }

        if let Some(mapping) = self.sheets.iter().find(|m| m.sheet.is_empty()) {
            return Err(LangError::Config(format!(
                "Empty sheet name (bundle: {:?})",
                mapping.bundle
            )));
        }

        Ok(())
    }

    /// Directory the JSON files of `bundle` are written to
    pub fn bundle_dir(&self, bundle: &str) -> PathBuf {
        self.output_root.join(bundle).join(&self.json_dir)
    }

    /// Output file for one language of a bundle
    pub fn output_path(&self, bundle: &str, lang: &str) -> PathBuf {
        self.bundle_dir(bundle).join(format!("{}.json", lang))
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
