//! Monthly income/expense aggregation for the property form.

use log::debug;
use shared::{CashFlowSummary, ExpenseFigures, ExpenseInputs, IncomeFigures, IncomeInputs};

use crate::numeric::{parse_non_negative, round_to_cents};

#[derive(Debug, Clone, Default)]
pub struct CashFlowService;

impl CashFlowService {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_income(&self, inputs: &IncomeInputs) -> IncomeFigures {
        IncomeFigures {
            rental_income: parse_non_negative(&inputs.rental_income),
            parking_income: parse_non_negative(&inputs.parking_income),
            laundry_income: parse_non_negative(&inputs.laundry_income),
            storage_income: parse_non_negative(&inputs.storage_income),
            other_income: parse_non_negative(&inputs.other_income),
        }
    }

    pub fn parse_expenses(&self, inputs: &ExpenseInputs) -> ExpenseFigures {
        ExpenseFigures {
            first_mortgage: parse_non_negative(&inputs.first_mortgage),
            second_mortgage: parse_non_negative(&inputs.second_mortgage),
            property_tax: parse_non_negative(&inputs.property_tax),
            insurance: parse_non_negative(&inputs.insurance),
            hoa_fees: parse_non_negative(&inputs.hoa_fees),
            water: parse_non_negative(&inputs.water),
            sewer: parse_non_negative(&inputs.sewer),
            electricity: parse_non_negative(&inputs.electricity),
            gas: parse_non_negative(&inputs.gas),
            internet: parse_non_negative(&inputs.internet),
            trash: parse_non_negative(&inputs.trash),
            management_pct: parse_non_negative(&inputs.management_pct),
            capex_pct: parse_non_negative(&inputs.capex_pct),
            vacancy_pct: parse_non_negative(&inputs.vacancy_pct),
            repairs_pct: parse_non_negative(&inputs.repairs_pct),
        }
    }

    pub fn total_income(&self, income: &IncomeFigures) -> f64 {
        round_to_cents(
            income.rental_income
                + income.parking_income
                + income.laundry_income
                + income.storage_income
                + income.other_income,
        )
    }

    pub fn fixed_expenses(&self, expenses: &ExpenseFigures) -> f64 {
        expenses.first_mortgage
            + expenses.second_mortgage
            + expenses.property_tax
            + expenses.insurance
            + expenses.hoa_fees
    }

    pub fn utilities(&self, expenses: &ExpenseFigures) -> f64 {
        expenses.water + expenses.sewer + expenses.electricity + expenses.gas + expenses.internet + expenses.trash
    }

    /// Management, capex, vacancy and repairs are quoted as a share of rent
    pub fn percentage_expenses(&self, rental_income: f64, expenses: &ExpenseFigures) -> f64 {
        let total_pct = expenses.management_pct + expenses.capex_pct + expenses.vacancy_pct + expenses.repairs_pct;
        rental_income * total_pct / 100.0
    }

    pub fn total_expenses(&self, rental_income: f64, expenses: &ExpenseFigures) -> f64 {
        round_to_cents(
            self.fixed_expenses(expenses)
                + self.utilities(expenses)
                + self.percentage_expenses(rental_income, expenses),
        )
    }

    /// Recompute every total from the raw form sections
    pub fn summarize(&self, income: &IncomeInputs, expenses: &ExpenseInputs) -> CashFlowSummary {
        let income = self.parse_income(income);
        let expenses = self.parse_expenses(expenses);
        self.summarize_figures(&income, &expenses)
    }

    pub fn summarize_figures(&self, income: &IncomeFigures, expenses: &ExpenseFigures) -> CashFlowSummary {
        let total_income = round_to_cents(self.total_income(income));
        let total_expenses = round_to_cents(self.total_expenses(income.rental_income, expenses));
        let net_income = round_to_cents(total_income - total_expenses);

        debug!(
            "Cash flow recomputed: income={:.2} expenses={:.2} net={:.2}",
            total_income, total_expenses, net_income
        );

        CashFlowSummary {
            total_income,
            fixed_expenses: round_to_cents(self.fixed_expenses(expenses)),
            utilities: round_to_cents(self.utilities(expenses)),
            percentage_expenses: round_to_cents(self.percentage_expenses(income.rental_income, expenses)),
            total_expenses,
            net_income,
            annual_net_income: round_to_cents(net_income * 12.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_total_zero() {
        let service = CashFlowService::new();
        let summary = service.summarize(&IncomeInputs::default(), &ExpenseInputs::default());

        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.net_income, 0.0);
        assert_eq!(format!("{:.2}", summary.total_income), "0.00");
    }

    #[test]
    fn test_income_total_ignores_garbage() {
        let service = CashFlowService::new();
        let income = IncomeInputs {
            rental_income: "$2,000".to_string(),
            parking_income: "50".to_string(),
            laundry_income: "n/a".to_string(),
            storage_income: String::new(),
            other_income: "25.5".to_string(),
        };

        assert_eq!(service.total_income(&service.parse_income(&income)), 2075.5);
    }

    #[test]
    fn test_full_summary() {
        let service = CashFlowService::new();
        let income = IncomeInputs {
            rental_income: "2000".to_string(),
            ..IncomeInputs::default()
        };
        let expenses = ExpenseInputs {
            first_mortgage: "900".to_string(),
            property_tax: "150".to_string(),
            insurance: "80".to_string(),
            water: "40".to_string(),
            electricity: "60".to_string(),
            management_pct: "8".to_string(),
            capex_pct: "5".to_string(),
            vacancy_pct: "5".to_string(),
            repairs_pct: "2".to_string(),
            ..ExpenseInputs::default()
        };

        let summary = service.summarize(&income, &expenses);
        assert_eq!(summary.fixed_expenses, 1130.0);
        assert_eq!(summary.utilities, 100.0);
        assert_eq!(summary.percentage_expenses, 400.0);
        assert_eq!(summary.total_expenses, 1630.0);
        assert_eq!(summary.net_income, 370.0);
        assert_eq!(summary.annual_net_income, 4440.0);
    }

    #[test]
    fn test_percentages_only_apply_to_rent() {
        let service = CashFlowService::new();
        let income = IncomeFigures {
            rental_income: 1000.0,
            other_income: 500.0,
            ..IncomeFigures::default()
        };
        let expenses = ExpenseFigures {
            management_pct: 10.0,
            ..ExpenseFigures::default()
        };

        let summary = service.summarize_figures(&income, &expenses);
        assert_eq!(summary.percentage_expenses, 100.0);
        assert_eq!(summary.net_income, 1400.0);
    }

    #[test]
    fn test_negative_expense_counts_as_zero() {
        let service = CashFlowService::new();
        let expenses = ExpenseInputs {
            hoa_fees: "-200".to_string(),
            ..ExpenseInputs::default()
        };

        assert_eq!(service.total_expenses(0.0, &service.parse_expenses(&expenses)), 0.0);
    }
}
