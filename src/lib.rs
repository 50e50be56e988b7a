//! langsheet - localization workbook exporter
//!
//! Reads localization sheets from a spreadsheet workbook and writes one JSON
//! dictionary per language for each sheet, under a bundle directory derived
//! from the sheet name.
//!
//! # Example
//!
//! ```no_run
//! use langsheet::config::ExportConfig;
//! use langsheet::excel::WorkbookReader;
//! use langsheet::exporter::SheetExporter;
//!
//! let config = ExportConfig::default();
//! let mut workbook = WorkbookReader::open(&config.workbook)?;
//! let exporter = SheetExporter::new(config);
//!
//! for report in exporter.export_all(&mut workbook)? {
//!     println!("{} → {} ({} entries)", report.sheet, report.bundle, report.entries);
//! }
//! # Ok::<(), langsheet::error::LangError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod exporter;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use config::ExportConfig;
pub use error::{LangError, LangResult};
pub use exporter::SheetExporter;
pub use types::{bundle_name, LanguageMap, SheetMapping, SheetReport};
