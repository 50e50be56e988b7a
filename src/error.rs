use thiserror::Error;

pub type LangResult<T> = Result<T, LangError>;

#[derive(Error, Debug)]
pub enum LangError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Sheet '{sheet}' not found in workbook (available: {})", .available.join(", "))]
    SheetNotFound { sheet: String, available: Vec<String> },

    #[error("Malformed sheet '{sheet}': {reason}")]
    MalformedSheet { sheet: String, reason: String },

    #[error("Bad cell in sheet '{sheet}' at row {row}, column {col}: {reason}")]
    Cell {
        sheet: String,
        row: u32,
        col: u32,
        reason: String,
    },

    #[error("Sheet '{0}' does not yield a bundle name")]
    InvalidBundle(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
