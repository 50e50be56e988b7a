//! Sheet exporter - sheet rows → per-language JSON dictionaries

use crate::config::ExportConfig;
use crate::error::{LangError, LangResult};
use crate::excel::{SheetData, WorkbookReader};
use crate::types::{LanguageMap, SheetMapping, SheetReport};
use crate::writer::{self, WriteOptions};
use tracing::{debug, warn};

/// Extracts localization sheets and writes their dictionaries
pub struct SheetExporter {
    config: ExportConfig,
}

impl SheetExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Build the language dictionaries of a sheet.
    ///
    /// Row 0 is the header. Each later row is `id, text(lang 0), text(lang 1), ...`.
    pub fn extract(&self, sheet: &SheetData) -> LangResult<LanguageMap> {
        let languages = &self.config.languages;
        let mut map = LanguageMap::new(languages.as_slice());
        let height = sheet.height();

        if height <= 1 {
            return Ok(map);
        }

        let required = 1 + languages.len() as u32;
        if sheet.width() < required {
            return Err(LangError::MalformedSheet {
                sheet: sheet.name().to_string(),
                reason: format!(
                    "expected {} columns (id, {}), found {}",
                    required,
                    languages.join(", "),
                    sheet.width()
                ),
            });
        }

        for row in 1..height {
            let id = sheet.cell_text(row, 0)?;
            let mut texts = Vec::with_capacity(languages.len());
            for col in 1..required {
                texts.push(sheet.cell_text(row, col)?);
            }

            if id.is_empty() && texts.iter().all(String::is_empty) {
                debug!(sheet = sheet.name(), row, "skipping blank row");
                continue;
            }
            map.insert(id, texts);
        }

        for id in &map.duplicates {
            warn!(sheet = sheet.name(), id = %id, "duplicate id, later row wins");
        }

        Ok(map)
    }

    /// Extract one sheet and write `<output_root>/<bundle>/<json_dir>/<lang>.json`
    /// for every language.
    pub fn export(
        &self,
        workbook: &mut WorkbookReader,
        mapping: &SheetMapping,
    ) -> LangResult<SheetReport> {
        let (map, mut report) = self.read(workbook, mapping)?;

        let files: Vec<_> = map
            .iter()
            .map(|(lang, dict)| (self.config.output_path(&report.bundle, lang), dict))
            .collect();

        let options = WriteOptions {
            atomic: self.config.atomic,
            create_dirs: self.config.create_dirs,
            pretty: self.config.pretty,
        };
        report.written = writer::write_dictionaries(&files, options)?;

        Ok(report)
    }

    /// Extract one sheet and report on it without writing anything
    pub fn check(
        &self,
        workbook: &mut WorkbookReader,
        mapping: &SheetMapping,
    ) -> LangResult<SheetReport> {
        self.read(workbook, mapping).map(|(_, report)| report)
    }

    /// Export every configured sheet in order, stopping at the first failure
    pub fn export_all(&self, workbook: &mut WorkbookReader) -> LangResult<Vec<SheetReport>> {
        self.config
            .sheets
            .iter()
            .map(|mapping| self.export(workbook, mapping))
            .collect()
    }

    fn read(
        &self,
        workbook: &mut WorkbookReader,
        mapping: &SheetMapping,
    ) -> LangResult<(LanguageMap, SheetReport)> {
        let bundle = mapping.bundle();
        if bundle.is_empty() {
            return Err(LangError::InvalidBundle(mapping.sheet.clone()));
        }

        let sheet = workbook.sheet(&mapping.sheet)?;
        let map = self.extract(&sheet)?;

        let report = SheetReport {
            sheet: mapping.sheet.clone(),
            bundle: bundle.to_string(),
            entries: map.len(),
            duplicates: map.duplicates.clone(),
            empty_translations: map.empty_translations(),
            written: Vec::new(),
        };
        Ok((map, report))
    }
}
