use crate::config::ExportConfig;
use crate::error::{LangError, LangResult};
use crate::excel::WorkbookReader;
use crate::exporter::SheetExporter;
use crate::types::{bundle_name, SheetMapping, SheetReport};
use colored::Colorize;
use std::path::PathBuf;

/// Command-line overrides applied on top of the loaded config
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Config file; `langsheet.yaml` or the defaults when absent
    pub config: Option<PathBuf>,
    pub workbook: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
    /// Replaces the configured sheet list when non-empty
    pub sheets: Vec<String>,
}

impl ConfigOverrides {
    pub fn resolve(self) -> LangResult<ExportConfig> {
        let mut config = ExportConfig::load(self.config.as_deref())?;

        if let Some(workbook) = self.workbook {
            config.workbook = workbook;
        }
        if let Some(output_root) = self.output_root {
            config.output_root = output_root;
        }
        if !self.sheets.is_empty() {
            config.sheets = self.sheets.into_iter().map(SheetMapping::new).collect();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Execute the export command
pub fn export(overrides: ConfigOverrides, dry_run: bool, verbose: bool) -> LangResult<()> {
    let config = overrides.resolve()?;

    println!("{}", "🌐 langsheet - Exporting dictionaries".bold().green());
    println!("   Workbook: {}", config.workbook.display());
    println!("   Output:   {}\n", config.output_root.display());

    if dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - No files will be written\n".yellow()
        );
    }

    if verbose {
        println!("{}", "📖 Opening workbook...".cyan());
    }
    let mut workbook = WorkbookReader::open(&config.workbook)?;

    let exporter = SheetExporter::new(config);
    for mapping in &exporter.config().sheets {
        let report = if dry_run {
            exporter.check(&mut workbook, mapping)?
        } else {
            exporter.export(&mut workbook, mapping)?
        };
        print_report(&report, verbose);

        if dry_run {
            for lang in &exporter.config().languages {
                let path = exporter.config().output_path(&report.bundle, lang);
                println!("      would write {}", path.display());
            }
        }
    }

    println!();
    if dry_run {
        println!("{}", "📋 Dry run complete - no files written".yellow());
    } else {
        println!("{}", "✅ Export Complete!".bold().green());
    }

    Ok(())
}

/// Execute the check command
pub fn check(overrides: ConfigOverrides, verbose: bool) -> LangResult<()> {
    let config = overrides.resolve()?;

    println!("{}", "🔍 langsheet - Checking sheets".bold().green());
    println!("   Workbook: {}\n", config.workbook.display());

    let mut workbook = WorkbookReader::open(&config.workbook)?;
    let exporter = SheetExporter::new(config);

    let mut issues = 0;
    for mapping in &exporter.config().sheets {
        let report = exporter.check(&mut workbook, mapping)?;
        print_report(&report, verbose);

        for id in &report.duplicates {
            println!("      {} duplicate id '{}'", "⚠️".yellow(), id);
        }
        for (lang, id) in &report.empty_translations {
            println!(
                "      {} empty {} text for id '{}'",
                "⚠️".yellow(),
                lang.bright_blue(),
                id
            );
        }
        issues += report.duplicates.len() + report.empty_translations.len();
    }

    println!();
    if issues > 0 {
        println!("{}", format!("❌ {} issue(s) found", issues).bold().red());
        return Err(LangError::Validation(format!(
            "{} issue(s) found in localization sheets",
            issues
        )));
    }

    println!("{}", "✅ All sheets clean".bold().green());
    Ok(())
}

/// Execute the sheets command: list sheets and the bundle each maps to
pub fn sheets(overrides: ConfigOverrides) -> LangResult<()> {
    let config = overrides.resolve()?;
    let workbook = WorkbookReader::open(&config.workbook)?;

    println!("{}", "📚 langsheet - Sheets".bold().green());
    println!("   Workbook: {}\n", config.workbook.display());

    for name in workbook.sheet_names() {
        let configured = config.sheets.iter().find(|m| m.sheet == name);
        let bundle = configured.map_or_else(|| bundle_name(&name), |m| m.bundle());
        let marker = if configured.is_some() {
            "✓".green()
        } else {
            " ".normal()
        };
        println!("   {} {} → {}", marker, name.bright_blue(), bundle);
    }

    Ok(())
}

fn print_report(report: &SheetReport, verbose: bool) {
    println!(
        "   📄 {} → {} ({} entries)",
        report.sheet.bright_blue().bold(),
        report.bundle.cyan(),
        report.entries
    );

    if verbose {
        for path in &report.written {
            println!("      wrote {}", path.display());
        }
        if !report.duplicates.is_empty() {
            println!(
                "      {} duplicate id(s), later rows won",
                report.duplicates.len()
            );
        }
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
