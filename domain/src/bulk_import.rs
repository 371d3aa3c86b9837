//! Pre-flight checks for the bulk transaction import.
//!
//! The server does the real import; this catches the common mistakes
//! (wrong file, missing columns, unparsable rows) before anything is
//! uploaded.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use serde::Deserialize;
use shared::{CalculatorConfig, TransactionType};

use crate::error::ImportError;
use crate::numeric::try_parse_number;
use crate::transaction_form::parse_date;

pub const REQUIRED_COLUMNS: [&str; 6] = ["property", "type", "category", "amount", "date", "collector_payer"];

#[derive(Debug, Deserialize)]
struct ImportRow {
    property: String,
    #[serde(rename = "type")]
    transaction_type: String,
    category: String,
    amount: String,
    date: String,
    collector_payer: String,
}

/// A problem with one data row; `line` is the 1-based line in the file
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportPreview {
    pub row_count: usize,
    pub income_rows: usize,
    pub expense_rows: usize,
    pub errors: Vec<RowError>,
}

impl ImportPreview {
    pub fn can_upload(&self) -> bool {
        self.row_count > 0 && self.errors.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct BulkImportService {
    config: CalculatorConfig,
}

impl BulkImportService {
    pub fn new() -> Self {
        Self {
            config: CalculatorConfig::default(),
        }
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// Check the file name and size before reading its contents
    pub fn check_file(&self, file_name: &str, size: u64) -> Result<(), ImportError> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(ImportError::NoFile);
        }

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if extension != "csv" {
            return Err(ImportError::UnsupportedExtension(file_name.to_string()));
        }

        if size == 0 {
            return Err(ImportError::EmptyFile);
        }
        if size > self.config.max_import_bytes {
            return Err(ImportError::FileTooLarge {
                size,
                limit: self.config.max_import_bytes,
            });
        }
        Ok(())
    }

    /// Parse the CSV text and report every row that would fail to import
    pub fn preview(&self, contents: &str) -> Result<ImportPreview, ImportError> {
        if contents.trim().is_empty() {
            return Err(ImportError::EmptyFile);
        }

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(false)
            .from_reader(contents.as_bytes());

        let headers: StringRecord = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_ascii_lowercase().replace(' ', "_"))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|required| !headers.iter().any(|h| h == **required))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            warn!("Import file is missing columns: {:?}", missing);
            return Err(ImportError::MissingColumns(missing));
        }

        let mut preview = ImportPreview {
            row_count: 0,
            income_rows: 0,
            expense_rows: 0,
            errors: Vec::new(),
        };

        // Quoted fields may span lines, so line numbers come from the reader
        for result in reader.records() {
            preview.row_count += 1;
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    let line = err.position().map(|p| p.line()).unwrap_or(preview.row_count as u64 + 1);
                    preview.errors.push(RowError {
                        line,
                        message: format!("Could not read row: {}", err),
                    });
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or(preview.row_count as u64 + 1);

            match record.deserialize::<ImportRow>(Some(&headers)) {
                Ok(row) => self.check_row(&row, line, &mut preview),
                Err(err) => preview.errors.push(RowError {
                    line,
                    message: format!("Could not read row: {}", err),
                }),
            }
        }

        debug!(
            "Import preview: {} row(s), {} error(s)",
            preview.row_count,
            preview.errors.len()
        );
        Ok(preview)
    }

    fn check_row(&self, row: &ImportRow, line: u64, preview: &mut ImportPreview) {
        let mut push = |message: String| preview.errors.push(RowError { line, message });

        if row.property.is_empty() {
            push("Property is required".to_string());
        }
        if row.category.is_empty() {
            push("Category is required".to_string());
        }
        if row.collector_payer.is_empty() {
            push("Collector/payer is required".to_string());
        }

        match try_parse_number(&row.amount) {
            Ok(amount) if amount > 0.0 => {}
            Ok(_) => push(format!("Amount must be positive (got {})", row.amount)),
            Err(err) => push(format!("Amount: {}", err)),
        }

        if parse_date(&row.date).is_none() {
            push(format!("Date '{}' is not in YYYY-MM-DD format", row.date));
        }

        match row.transaction_type.parse::<TransactionType>() {
            Ok(TransactionType::Income) => preview.income_rows += 1,
            Ok(TransactionType::Expense) => preview.expense_rows += 1,
            Err(err) => preview.errors.push(RowError {
                line,
                message: err.to_string(),
            }),
        }
    }
}

impl Default for BulkImportService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_line_accounts_for_multiline_fields() {
        let contents = "property,type,category,amount,date,collector_payer\n\
\"12 Elm\nUnit 2\",income,Rent,1500,2024-03-01,Alice\n\
12 Elm Street,expense,Repairs,-5,2024-03-02,Bob\n";

        let preview = BulkImportService::new().preview(contents).unwrap();
        assert_eq!(preview.row_count, 2);
        assert_eq!(preview.errors.len(), 1);
        assert_eq!(preview.errors[0].line, 4);
        assert!(preview.errors[0].message.contains("positive"));
    }

    const GOOD_FILE: &str = "\
Property,Type,Category,Amount,Date,Collector Payer
12 Elm Street,income,Rent,1500,2024-03-01,Alice
12 Elm Street,expense,Repairs,$220.50,2024-03-04,Bob
";

    #[test]
    fn test_check_file() {
        let service = BulkImportService::new();

        assert_eq!(service.check_file("march.CSV", 1024), Ok(()));
        assert_eq!(service.check_file("", 10), Err(ImportError::NoFile));
        assert_eq!(
            service.check_file("march.xlsx", 10),
            Err(ImportError::UnsupportedExtension("march.xlsx".to_string()))
        );
        assert_eq!(service.check_file("march.csv", 0), Err(ImportError::EmptyFile));
        assert!(matches!(
            service.check_file("march.csv", 6 * 1024 * 1024),
            Err(ImportError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_preview_good_file() {
        let service = BulkImportService::new();
        let preview = service.preview(GOOD_FILE).unwrap();

        assert_eq!(preview.row_count, 2);
        assert_eq!(preview.income_rows, 1);
        assert_eq!(preview.expense_rows, 1);
        assert!(preview.errors.is_empty());
        assert!(preview.can_upload());
    }

    #[test]
    fn test_missing_columns() {
        let service = BulkImportService::new();
        let err = service.preview("property,type,amount\nA,income,5\n").unwrap_err();

        assert_eq!(
            err,
            ImportError::MissingColumns(vec![
                "category".to_string(),
                "date".to_string(),
                "collector_payer".to_string()
            ])
        );
        assert_eq!(err.to_string(), "Missing required column(s): category, date, collector_payer");
    }

    #[test]
    fn test_row_errors_carry_line_numbers() {
        let service = BulkImportService::new();
        let contents = "\
property,type,category,amount,date,collector_payer
12 Elm Street,income,Rent,1500,2024-03-01,Alice
12 Elm Street,transfer,Rent,-3,03/01/2024,Alice
";

        let preview = service.preview(contents).unwrap();
        assert!(!preview.can_upload());
        assert_eq!(preview.errors.len(), 3);
        assert!(preview.errors.iter().all(|e| e.line == 3));
    }

    #[test]
    fn test_empty_contents() {
        let service = BulkImportService::new();
        assert_eq!(service.preview("  \n"), Err(ImportError::EmptyFile));
    }

    #[test]
    fn test_header_only_cannot_upload() {
        let service = BulkImportService::new();
        let preview = service
            .preview("property,type,category,amount,date,collector_payer\n")
            .unwrap();

        assert_eq!(preview.row_count, 0);
        assert!(!preview.can_upload());
    }
}
