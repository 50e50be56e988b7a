use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

//==============================================================================
// Sheet Mapping
//==============================================================================

/// A configured sheet and the bundle its dictionaries are written to.
///
/// In YAML either a bare sheet name or a mapping:
///
/// ```yaml
/// sheets:
///   - loading-language
///   - sheet: game1-language
///     bundle: solitaire
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SheetEntry", into = "SheetEntry")]
pub struct SheetMapping {
    pub sheet: String,
    /// Explicit bundle; derived from the sheet name when absent
    pub bundle: Option<String>,
}

impl SheetMapping {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            bundle: None,
        }
    }

    pub fn with_bundle(sheet: impl Into<String>, bundle: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            bundle: Some(bundle.into()),
        }
    }

    /// Bundle directory name for this sheet
    pub fn bundle(&self) -> &str {
        match &self.bundle {
            Some(b) => b,
            None => bundle_name(&self.sheet),
        }
    }
}

impl From<&str> for SheetMapping {
    fn from(sheet: &str) -> Self {
        Self::new(sheet)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SheetEntry {
    Name(String),
    Mapping {
        sheet: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bundle: Option<String>,
    },
}

impl From<SheetEntry> for SheetMapping {
    fn from(entry: SheetEntry) -> Self {
        match entry {
            SheetEntry::Name(sheet) => SheetMapping::new(sheet),
            SheetEntry::Mapping { sheet, bundle } => SheetMapping { sheet, bundle },
        }
    }
}

impl From<SheetMapping> for SheetEntry {
    fn from(mapping: SheetMapping) -> Self {
        match mapping.bundle {
            None => SheetEntry::Name(mapping.sheet),
            Some(bundle) => SheetEntry::Mapping {
                sheet: mapping.sheet,
                bundle: Some(bundle),
            },
        }
    }
}

/// Bundle name of a sheet: everything before the first `-`.
///
/// `loading-language` → `loading`, `menu` → `menu`.
pub fn bundle_name(sheet: &str) -> &str {
    sheet.split('-').next().unwrap_or(sheet)
}

//==============================================================================
// Language Map
//==============================================================================

/// id → text for a single language, in row order
pub type Dictionary = IndexMap<String, String>;

/// Per-language dictionaries extracted from one sheet.
///
/// All dictionaries share the same keys in the same order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LanguageMap {
    languages: IndexMap<String, Dictionary>,
    /// Ids seen more than once, in order of the repeated occurrence
    pub duplicates: Vec<String>,
}

impl LanguageMap {
    pub fn new<S: AsRef<str>>(languages: &[S]) -> Self {
        Self {
            languages: languages
                .iter()
                .map(|lang| (lang.as_ref().to_string(), Dictionary::new()))
                .collect(),
            duplicates: Vec::new(),
        }
    }

    /// Insert one row. `texts` follows the language order given to `new`.
    /// A repeated id overwrites the earlier texts and keeps its position.
    pub fn insert(&mut self, id: String, texts: Vec<String>) {
        let mut repeated = false;
        for (dict, text) in self.languages.values_mut().zip(texts) {
            repeated |= dict.insert(id.clone(), text).is_some();
        }
        if repeated {
            self.duplicates.push(id);
        }
    }

    pub fn get(&self, lang: &str) -> Option<&Dictionary> {
        self.languages.get(lang)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Dictionary)> {
        self.languages.iter()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Number of distinct ids
    pub fn len(&self) -> usize {
        self.languages.values().next().map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(lang, id)` pairs whose text is empty
    pub fn empty_translations(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for (lang, dict) in &self.languages {
            for (id, text) in dict {
                if text.is_empty() {
                    missing.push((lang.clone(), id.clone()));
                }
            }
        }
        missing
    }
}

//==============================================================================
// Reports
//==============================================================================

/// Outcome of exporting (or checking) one sheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetReport {
    pub sheet: String,
    pub bundle: String,
    pub entries: usize,
    pub duplicates: Vec<String>,
    pub empty_translations: Vec<(String, String)>,
    /// Files written; empty for dry runs and checks
    pub written: Vec<PathBuf>,
}

impl SheetReport {
    pub fn has_issues(&self) -> bool {
        !self.duplicates.is_empty() || !self.empty_translations.is_empty()
    }
}
