use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("Value is empty")]
    Empty,
    #[error("'{0}' is not a number")]
    Invalid(String),
    #[error("Value is not a finite number")]
    NotFinite,
}

/// Problems with a property's partner list
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquityError {
    #[error("At least one partner is required")]
    NoPartners,
    #[error("Partner {0} needs a name")]
    MissingName(usize),
    #[error("{name}'s equity share must be between 0 and 100 (got {share})")]
    ShareOutOfRange { name: String, share: f64 },
    #[error("{0} is listed more than once")]
    DuplicateName(String),
    #[error("Equity shares must total 100% (currently {total:.2}%)")]
    TotalNotHundred { total: f64 },
    #[error("Select a property manager")]
    NoPropertyManager,
    #[error("Only one partner can be the property manager ({0} selected)")]
    MultiplePropertyManagers(usize),
}

impl EquityError {
    /// Form field the error should be attached to
    pub fn field(&self) -> String {
        match self {
            EquityError::MissingName(index) => format!("partners[{}].name", index),
            EquityError::ShareOutOfRange { .. } | EquityError::TotalNotHundred { .. } => {
                "partners.equity_share".to_string()
            }
            EquityError::NoPropertyManager | EquityError::MultiplePropertyManagers(_) => {
                "partners.is_property_manager".to_string()
            }
            EquityError::NoPartners | EquityError::DuplicateName(_) => "partners".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("No file selected")]
    NoFile,
    #[error("Only .csv files can be imported (got '{0}')")]
    UnsupportedExtension(String),
    #[error("File is too large ({size} bytes, limit is {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },
    #[error("File is empty")]
    EmptyFile,
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Could not read CSV: {0}")]
    Malformed(String),
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::Malformed(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemovalError {
    #[error("Property id is missing")]
    MissingPropertyId,
    #[error("Type the property address to confirm removal")]
    ConfirmationMissing,
    #[error("The address you typed does not match this property")]
    ConfirmationMismatch,
}
