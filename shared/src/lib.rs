use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of money for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received for the property (rent, deposits, fees)
    #[default]
    Income,
    /// Money paid out for the property (repairs, taxes, utilities)
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Label used next to the collector/payer field
    pub fn party_label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Collected by",
            TransactionType::Expense => "Paid by",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(TransactionTypeError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTypeError(pub String);

impl fmt::Display for TransactionTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown transaction type '{}', expected income or expense", self.0)
    }
}

impl std::error::Error for TransactionTypeError {}

/// Status of the partner reimbursement attached to a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReimbursementStatus {
    #[default]
    Pending,
    Completed,
}

impl ReimbursementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReimbursementStatus::Pending => "pending",
            ReimbursementStatus::Completed => "completed",
        }
    }
}

/// A partner holding equity in a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    /// Ownership percentage, 0-100
    pub equity_share: f64,
    pub is_property_manager: bool,
}

/// One partner row as typed into the property form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PartnerInput {
    pub name: String,
    pub equity_share: String,
    pub is_property_manager: bool,
}

/// Purchase terms exactly as entered in the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PurchaseTerms {
    pub purchase_date: String,
    pub purchase_price: String,
    pub down_payment: String,
    pub loan_amount: String,
    /// Annual rate in percent
    pub interest_rate: String,
    pub loan_term_years: String,
    pub closing_costs: String,
}

/// Monthly income fields as entered in the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IncomeInputs {
    pub rental_income: String,
    pub parking_income: String,
    pub laundry_income: String,
    pub storage_income: String,
    pub other_income: String,
}

/// Monthly expense fields as entered in the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExpenseInputs {
    // Fixed amounts
    pub first_mortgage: String,
    pub second_mortgage: String,
    pub property_tax: String,
    pub insurance: String,
    pub hoa_fees: String,
    // Utilities
    pub water: String,
    pub sewer: String,
    pub electricity: String,
    pub gas: String,
    pub internet: String,
    pub trash: String,
    // Percentages of rental income
    pub management_pct: String,
    pub capex_pct: String,
    pub vacancy_pct: String,
    pub repairs_pct: String,
}

/// Parsed monthly income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IncomeFigures {
    pub rental_income: f64,
    pub parking_income: f64,
    pub laundry_income: f64,
    pub storage_income: f64,
    pub other_income: f64,
}

/// Parsed monthly expenses; percentage fields stay percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExpenseFigures {
    pub first_mortgage: f64,
    pub second_mortgage: f64,
    pub property_tax: f64,
    pub insurance: f64,
    pub hoa_fees: f64,
    pub water: f64,
    pub sewer: f64,
    pub electricity: f64,
    pub gas: f64,
    pub internet: f64,
    pub trash: f64,
    pub management_pct: f64,
    pub capex_pct: f64,
    pub vacancy_pct: f64,
    pub repairs_pct: f64,
}

/// Everything the add/edit property form holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PropertyDraft {
    pub address: String,
    pub purchase: PurchaseTerms,
    pub income: IncomeInputs,
    pub expenses: ExpenseInputs,
    pub partners: Vec<PartnerInput>,
}

/// A property as embedded in a page for the transaction form's selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySummary {
    pub id: String,
    pub address: String,
    #[serde(default)]
    pub partners: Vec<Partner>,
}

/// Totals derived from the income and expense sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CashFlowSummary {
    pub total_income: f64,
    pub fixed_expenses: f64,
    pub utilities: f64,
    pub percentage_expenses: f64,
    pub total_expenses: f64,
    pub net_income: f64,
    pub annual_net_income: f64,
}

/// Request body for `/properties/add_properties`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddPropertyRequest {
    pub address: String,
    pub purchase_date: Option<String>,
    pub purchase_price: f64,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub loan_term_years: f64,
    pub closing_costs: f64,
    pub income: IncomeFigures,
    pub expenses: ExpenseFigures,
    pub cash_flow: CashFlowSummary,
    pub partners: Vec<Partner>,
}

/// Request body for `/properties/edit_properties/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditPropertyRequest {
    pub property_id: String,
    #[serde(flatten)]
    pub property: AddPropertyRequest,
}

/// Request body for `/properties/remove_properties/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovePropertyRequest {
    pub property_id: String,
    /// The address typed back by the user as confirmation
    pub confirm_address: String,
}

/// Reimbursement section of the transaction form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReimbursementDraft {
    pub status: ReimbursementStatus,
    pub date_shared: String,
    pub share_description: String,
}

/// Everything the add transaction form holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TransactionDraft {
    pub property_id: String,
    pub transaction_type: TransactionType,
    pub category: String,
    pub description: String,
    pub amount: String,
    /// YYYY-MM-DD
    pub date: String,
    pub collector_payer: String,
    pub notes: String,
    pub reimbursement: ReimbursementDraft,
}

/// Reimbursement record sent with a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reimbursement {
    pub status: ReimbursementStatus,
    pub date_shared: Option<String>,
    pub share_description: String,
}

/// Request body for `/transactions/add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub property_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub collector_payer: String,
    pub notes: Option<String>,
    pub reimbursement: Reimbursement,
}

/// MAO calculator fields as entered in the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MaoFormInputs {
    pub after_repair_value: String,
    pub renovation_costs: String,
    pub renovation_duration: String,
    pub time_to_refinance: String,
    pub closing_costs: String,
    pub max_cash_left: String,
    pub loan_to_value: String,
    pub interest_rate: String,
    pub monthly_utilities: String,
    pub monthly_hoa: String,
    pub monthly_maintenance: String,
}

/// Generic `{success, message, errors}` body returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ApiResponse {
    /// Convert the server answer into something the toast layer can show
    pub fn to_notification(&self) -> Notification {
        if self.success {
            let message = if self.message.is_empty() {
                "Saved successfully".to_string()
            } else {
                self.message.clone()
            };
            return Notification::success(message);
        }

        let mut message = if self.message.is_empty() {
            "The request could not be completed".to_string()
        } else {
            self.message.clone()
        };
        if !self.errors.is_empty() {
            message.push_str(": ");
            message.push_str(&self.errors.join("; "));
        }
        Notification::error(message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    pub address: String,
    #[serde(default)]
    pub place_id: Option<String>,
}

/// Response from `/api/autocomplete`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub suggestions: Vec<AddressSuggestion>,
}

/// Response from `/api/categories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A message for the page-level toast/notification function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self { message: message.into(), severity }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

/// A validation problem tied to one form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// The form field name, e.g. `amount` or `partners[1].equity_share`
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Tunables shared by the calculators and form pages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculatorConfig {
    pub currency_symbol: String,
    /// Allowed distance of the equity total from 100
    pub equity_tolerance: f64,
    pub max_description_length: usize,
    pub autocomplete_min_chars: usize,
    pub autocomplete_debounce_ms: u32,
    pub notification_duration_ms: u32,
    pub max_import_bytes: u64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            equity_tolerance: 0.01,
            max_description_length: 256,
            autocomplete_min_chars: 3,
            autocomplete_debounce_ms: 300,
            notification_duration_ms: 4000,
            max_import_bytes: 5 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_from_str() {
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!(" Expense ".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_transaction_type_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionType::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
    }

    #[test]
    fn test_create_transaction_request_uses_type_key() {
        let request = CreateTransactionRequest {
            property_id: "12".to_string(),
            transaction_type: TransactionType::Income,
            category: "Rent".to_string(),
            description: String::new(),
            amount: 1000.0,
            date: "2024-03-01".to_string(),
            collector_payer: "Alice".to_string(),
            notes: None,
            reimbursement: Reimbursement {
                status: ReimbursementStatus::Pending,
                date_shared: None,
                share_description: String::new(),
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "income");
        assert_eq!(value["reimbursement"]["status"], "pending");
    }

    #[test]
    fn test_api_response_defaults_missing_fields() {
        let response: ApiResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(response.success);
        assert!(response.message.is_empty());
        assert!(response.errors.is_empty());
    }

    #[test]
    fn test_api_response_success_notification() {
        let response = ApiResponse {
            success: true,
            message: "Property added".to_string(),
            errors: vec![],
        };
        assert_eq!(response.to_notification(), Notification::success("Property added"));
    }

    #[test]
    fn test_api_response_failure_notification_lists_errors() {
        let response = ApiResponse {
            success: false,
            message: "Validation failed".to_string(),
            errors: vec!["Address is required".to_string(), "Bad amount".to_string()],
        };

        let notification = response.to_notification();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "Validation failed: Address is required; Bad amount");
    }

    #[test]
    fn test_edit_request_flattens_property() {
        let request = EditPropertyRequest {
            property_id: "7".to_string(),
            property: AddPropertyRequest {
                address: "1 Main St".to_string(),
                purchase_date: None,
                purchase_price: 100000.0,
                down_payment: 20000.0,
                loan_amount: 80000.0,
                interest_rate: 6.5,
                loan_term_years: 30.0,
                closing_costs: 0.0,
                income: IncomeFigures::default(),
                expenses: ExpenseFigures::default(),
                cash_flow: CashFlowSummary::default(),
                partners: vec![],
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["property_id"], "7");
        assert_eq!(value["address"], "1 Main St");
    }

    #[test]
    fn test_default_config() {
        let config = CalculatorConfig::default();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.autocomplete_min_chars, 3);
        assert_eq!(config.autocomplete_debounce_ms, 300);
        assert_eq!(config.max_import_bytes, 5 * 1024 * 1024);
    }
}
