use sheet2json_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while reading a spreadsheet or CSV source
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet not found: {name} (available sheets: {})", available.join(", "))]
    SheetNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("Unsupported text encoding: {label}")]
    UnsupportedEncoding { label: String },

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, SheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_not_found_lists_available() {
        let err = SheetError::SheetNotFound {
            name: "없는시트".to_string(),
            available: vec!["시트1".to_string(), "Summary".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("없는시트"));
        assert!(message.contains("시트1, Summary"));
    }
}
