//! Partner equity validation and reimbursement share splitting.
//!
//! When one partner collects rent or pays a bill for a jointly owned
//! property, every other partner is owed (income) or owes (expense) their
//! equity percentage of the amount.

use log::{debug, warn};
use shared::{CalculatorConfig, FieldError, Partner, PartnerInput, TransactionType};

use crate::error::EquityError;
use crate::numeric::{format_currency_with_symbol, parse_number, round_to_cents};

const FULL_OWNERSHIP: f64 = 100.0;
const FLOAT_SLACK: f64 = 1e-9;

/// Which way money flows between a partner and the collector/payer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareDirection {
    /// The partner is owed their share of money someone else collected
    Owed,
    /// The partner owes their share of money someone else paid
    Owes,
}

impl From<TransactionType> for ShareDirection {
    fn from(transaction_type: TransactionType) -> Self {
        match transaction_type {
            TransactionType::Income => ShareDirection::Owed,
            TransactionType::Expense => ShareDirection::Owes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerShare {
    pub partner_name: String,
    pub equity_share: f64,
    pub amount: f64,
    pub direction: ShareDirection,
}

impl PartnerShare {
    pub fn describe(&self) -> String {
        self.describe_with_symbol("$")
    }

    pub fn describe_with_symbol(&self, symbol: &str) -> String {
        let amount = format_currency_with_symbol(self.amount, symbol);
        match self.direction {
            ShareDirection::Owed => format!("{} is owed {}", self.partner_name, amount),
            ShareDirection::Owes => format!("{} owes {}", self.partner_name, amount),
        }
    }
}

/// Outcome of splitting a transaction between partners
#[derive(Debug, Clone, PartialEq)]
pub enum ReimbursementPlan {
    /// A single partner owns the whole property; nothing to share
    NotRequired,
    Shared(Vec<PartnerShare>),
}

impl ReimbursementPlan {
    pub fn is_required(&self) -> bool {
        matches!(self, ReimbursementPlan::Shared(_))
    }

    pub fn shares(&self) -> &[PartnerShare] {
        match self {
            ReimbursementPlan::NotRequired => &[],
            ReimbursementPlan::Shared(shares) => shares,
        }
    }

    /// Human readable summary stored as the reimbursement's share description
    pub fn share_description(&self) -> String {
        match self {
            ReimbursementPlan::NotRequired => "Sole owner, no reimbursement required".to_string(),
            ReimbursementPlan::Shared(shares) => shares
                .iter()
                .map(PartnerShare::describe)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EquityService {
    config: CalculatorConfig,
}

impl EquityService {
    pub fn new() -> Self {
        Self {
            config: CalculatorConfig::default(),
        }
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// Convert the raw partner rows into typed partners.
    /// Rows that are entirely blank (no name, no share) are dropped.
    pub fn parse_partners(&self, rows: &[PartnerInput]) -> Vec<Partner> {
        rows.iter()
            .filter(|row| !(row.name.trim().is_empty() && row.equity_share.trim().is_empty()))
            .map(|row| Partner {
                name: row.name.trim().to_string(),
                equity_share: parse_number(&row.equity_share),
                is_property_manager: row.is_property_manager,
            })
            .collect()
    }

    pub fn total_equity(&self, partners: &[Partner]) -> f64 {
        partners.iter().map(|p| p.equity_share).sum()
    }

    /// Percentage still unassigned; negative when over-allocated
    pub fn remaining_equity(&self, partners: &[Partner]) -> f64 {
        round_to_cents(FULL_OWNERSHIP - self.total_equity(partners))
    }

    pub fn is_fully_allocated(&self, partners: &[Partner]) -> bool {
        (self.total_equity(partners) - FULL_OWNERSHIP).abs() <= self.config.equity_tolerance + FLOAT_SLACK
    }

    /// True when exactly one partner holds the whole property
    pub fn is_sole_owner(&self, partners: &[Partner]) -> bool {
        partners.len() == 1 && self.is_fully_allocated(partners)
    }

    /// Check every partner rule and return all violations
    pub fn validate_partners(&self, partners: &[Partner]) -> Vec<EquityError> {
        let mut errors = Vec::new();

        if partners.is_empty() {
            errors.push(EquityError::NoPartners);
            return errors;
        }

        let mut seen: Vec<String> = Vec::new();
        for (index, partner) in partners.iter().enumerate() {
            let name = partner.name.trim();
            if name.is_empty() {
                errors.push(EquityError::MissingName(index));
            } else {
                let key = name.to_lowercase();
                if seen.contains(&key) {
                    errors.push(EquityError::DuplicateName(name.to_string()));
                } else {
                    seen.push(key);
                }
            }

            if partner.equity_share <= 0.0 || partner.equity_share > FULL_OWNERSHIP + FLOAT_SLACK {
                errors.push(EquityError::ShareOutOfRange {
                    name: if name.is_empty() { format!("Partner {}", index + 1) } else { name.to_string() },
                    share: partner.equity_share,
                });
            }
        }

        if !self.is_fully_allocated(partners) {
            errors.push(EquityError::TotalNotHundred {
                total: round_to_cents(self.total_equity(partners)),
            });
        }

        let managers = partners.iter().filter(|p| p.is_property_manager).count();
        match managers {
            0 => errors.push(EquityError::NoPropertyManager),
            1 => {}
            n => errors.push(EquityError::MultiplePropertyManagers(n)),
        }

        if !errors.is_empty() {
            warn!("Partner list rejected with {} problem(s)", errors.len());
        }
        errors
    }

    /// Validation errors in the form-field shape used by the pages
    pub fn partner_field_errors(&self, partners: &[Partner]) -> Vec<FieldError> {
        self.validate_partners(partners)
            .into_iter()
            .map(|e| FieldError::new(e.field(), e.to_string()))
            .collect()
    }

    /// Split a transaction amount between every partner except the one who
    /// collected or paid it
    pub fn plan_reimbursement(
        &self,
        partners: &[Partner],
        amount: f64,
        transaction_type: TransactionType,
        collector_payer: &str,
    ) -> ReimbursementPlan {
        if self.is_sole_owner(partners) {
            debug!("Sole owner, reimbursement not required");
            return ReimbursementPlan::NotRequired;
        }

        let party = collector_payer.trim().to_lowercase();
        let direction = ShareDirection::from(transaction_type);
        let shares: Vec<PartnerShare> = partners
            .iter()
            .filter(|p| p.name.trim().to_lowercase() != party)
            .map(|p| PartnerShare {
                partner_name: p.name.trim().to_string(),
                equity_share: p.equity_share,
                amount: round_to_cents(p.equity_share / FULL_OWNERSHIP * amount),
                direction,
            })
            .collect();

        debug!(
            "Split {} {:.2} paid by '{}' into {} share(s)",
            transaction_type,
            amount,
            collector_payer,
            shares.len()
        );
        ReimbursementPlan::Shared(shares)
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }
}

impl Default for EquityService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner(name: &str, share: f64, manager: bool) -> Partner {
        Partner {
            name: name.to_string(),
            equity_share: share,
            is_property_manager: manager,
        }
    }

    fn fifty_fifty() -> Vec<Partner> {
        vec![partner("Alice", 50.0, true), partner("Bob", 50.0, false)]
    }

    #[test]
    fn test_valid_partner_list() {
        let service = EquityService::new();
        assert!(service.validate_partners(&fifty_fifty()).is_empty());
    }

    #[test]
    fn test_total_within_tolerance_passes() {
        let service = EquityService::new();
        let partners = vec![
            partner("A", 33.33, true),
            partner("B", 33.33, false),
            partner("C", 33.335, false),
        ];
        assert!(service.validate_partners(&partners).is_empty());
    }

    #[test]
    fn test_total_outside_tolerance_fails() {
        let service = EquityService::new();
        let partners = vec![partner("A", 60.0, true), partner("B", 39.98, false)];

        let errors = service.validate_partners(&partners);
        assert_eq!(errors, vec![EquityError::TotalNotHundred { total: 99.98 }]);
    }

    #[test]
    fn test_property_manager_rules() {
        let service = EquityService::new();

        let none = vec![partner("A", 50.0, false), partner("B", 50.0, false)];
        assert_eq!(service.validate_partners(&none), vec![EquityError::NoPropertyManager]);

        let both = vec![partner("A", 50.0, true), partner("B", 50.0, true)];
        assert_eq!(service.validate_partners(&both), vec![EquityError::MultiplePropertyManagers(2)]);
    }

    #[test]
    fn test_missing_name_duplicate_and_range() {
        let service = EquityService::new();
        let partners = vec![
            partner("Alice", 120.0, true),
            partner("alice", -20.0, false),
            partner("", 0.0, false),
        ];

        let errors = service.validate_partners(&partners);
        assert!(errors.contains(&EquityError::ShareOutOfRange { name: "Alice".to_string(), share: 120.0 }));
        assert!(errors.contains(&EquityError::DuplicateName("alice".to_string())));
        assert!(errors.contains(&EquityError::MissingName(2)));
        assert!(errors.contains(&EquityError::ShareOutOfRange { name: "Partner 3".to_string(), share: 0.0 }));
    }

    #[test]
    fn test_no_partners() {
        let service = EquityService::new();
        assert_eq!(service.validate_partners(&[]), vec![EquityError::NoPartners]);
    }

    #[test]
    fn test_remaining_equity() {
        let service = EquityService::new();
        let partners = vec![partner("A", 60.0, true), partner("B", 15.5, false)];
        assert_eq!(service.remaining_equity(&partners), 24.5);
        assert_eq!(service.remaining_equity(&fifty_fifty()), 0.0);
    }

    #[test]
    fn test_parse_partners_skips_blank_rows() {
        let service = EquityService::new();
        let rows = vec![
            PartnerInput { name: " Alice ".to_string(), equity_share: "75%".to_string(), is_property_manager: true },
            PartnerInput::default(),
            PartnerInput { name: "Bob".to_string(), equity_share: "abc".to_string(), is_property_manager: false },
        ];

        let partners = service.parse_partners(&rows);
        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0], partner("Alice", 75.0, true));
        assert_eq!(partners[1].equity_share, 0.0);
    }

    #[test]
    fn test_fifty_fifty_income_split() {
        let service = EquityService::new();
        let plan = service.plan_reimbursement(&fifty_fifty(), 1000.0, TransactionType::Income, "Alice");

        assert!(plan.is_required());
        assert_eq!(plan.shares().len(), 1);
        assert_eq!(plan.shares()[0].amount, 500.0);
        assert_eq!(plan.shares()[0].describe(), "Bob is owed $500.00");
    }

    #[test]
    fn test_expense_split_labels_owes() {
        let service = EquityService::new();
        let partners = vec![
            partner("Alice", 50.0, true),
            partner("Bob", 30.0, false),
            partner("Cara", 20.0, false),
        ];

        let plan = service.plan_reimbursement(&partners, 250.0, TransactionType::Expense, "alice ");
        assert_eq!(plan.share_description(), "Bob owes $75.00; Cara owes $50.00");
    }

    #[test]
    fn test_outside_party_splits_between_everyone() {
        let service = EquityService::new();
        let plan = service.plan_reimbursement(&fifty_fifty(), 99.98, TransactionType::Income, "Property Co");

        let amounts: Vec<f64> = plan.shares().iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![49.99, 49.99]);
    }

    #[test]
    fn test_sole_owner_needs_no_reimbursement() {
        let service = EquityService::new();
        let partners = vec![partner("Alice", 100.0, true)];

        let plan = service.plan_reimbursement(&partners, 1000.0, TransactionType::Income, "Alice");
        assert_eq!(plan, ReimbursementPlan::NotRequired);
        assert!(plan.shares().is_empty());
    }
}
