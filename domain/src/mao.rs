//! Maximum Allowable Offer calculator.
//!
//! The holding period runs from purchase through renovation until the
//! refinance closes. During that time the investor carries the loan
//! interest plus the property's running costs. Whatever is left of the
//! after-repair value once renovation, closing, holding costs and the cash
//! the investor is willing to leave in the deal are taken out is the most
//! that can be offered.

use log::debug;
use shared::MaoFormInputs;

use crate::numeric::{parse_non_negative, round_to_cents};

/// Fifty years; longer holding periods are clamped
pub const MAX_HOLDING_MONTHS: u32 = 600;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaoInputs {
    pub after_repair_value: f64,
    pub renovation_costs: f64,
    pub renovation_duration_months: u32,
    pub time_to_refinance_months: u32,
    pub closing_costs: f64,
    pub max_cash_left: f64,
    /// Loan-to-value in percent
    pub loan_to_value_pct: f64,
    /// Annual interest rate in percent
    pub interest_rate_pct: f64,
    pub monthly_utilities: f64,
    pub monthly_hoa: f64,
    pub monthly_maintenance: f64,
}

impl MaoInputs {
    pub fn holding_months(&self) -> u32 {
        self.renovation_duration_months
            .saturating_add(self.time_to_refinance_months)
            .min(MAX_HOLDING_MONTHS)
    }
}

/// Cumulative carrying cost at the end of one month of the holding period
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingMonth {
    pub month: u32,
    pub cumulative_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaoResult {
    pub holding_months: u32,
    pub initial_loan: f64,
    pub monthly_interest: f64,
    pub monthly_holding_cost: f64,
    pub total_holding_cost: f64,
    pub total_costs: f64,
    pub mao: f64,
    pub holding_schedule: Vec<HoldingMonth>,
}

impl MaoResult {
    /// An offer only makes sense when there is something left to offer
    pub fn is_viable(&self) -> bool {
        self.mao > 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct MaoService;

impl MaoService {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_inputs(&self, form: &MaoFormInputs) -> MaoInputs {
        MaoInputs {
            after_repair_value: parse_non_negative(&form.after_repair_value),
            renovation_costs: parse_non_negative(&form.renovation_costs),
            renovation_duration_months: parse_months(&form.renovation_duration),
            time_to_refinance_months: parse_months(&form.time_to_refinance),
            closing_costs: parse_non_negative(&form.closing_costs),
            max_cash_left: parse_non_negative(&form.max_cash_left),
            loan_to_value_pct: parse_non_negative(&form.loan_to_value),
            interest_rate_pct: parse_non_negative(&form.interest_rate),
            monthly_utilities: parse_non_negative(&form.monthly_utilities),
            monthly_hoa: parse_non_negative(&form.monthly_hoa),
            monthly_maintenance: parse_non_negative(&form.monthly_maintenance),
        }
    }

    pub fn initial_loan(&self, inputs: &MaoInputs) -> f64 {
        inputs.after_repair_value * inputs.loan_to_value_pct / 100.0 + inputs.renovation_costs
    }

    pub fn calculate(&self, inputs: &MaoInputs) -> MaoResult {
        let holding_months = inputs.holding_months();
        let initial_loan = self.initial_loan(inputs);
        let monthly_interest = initial_loan * inputs.interest_rate_pct / 100.0 / 12.0;
        let monthly_holding_cost =
            inputs.monthly_utilities + inputs.monthly_hoa + inputs.monthly_maintenance + monthly_interest;

        let mut holding_schedule = Vec::with_capacity(holding_months as usize);
        let mut cumulative = 0.0;
        for month in 1..=holding_months {
            cumulative += monthly_holding_cost;
            holding_schedule.push(HoldingMonth {
                month,
                cumulative_cost: round_to_cents(cumulative),
            });
        }

        let total_holding_cost = monthly_holding_cost * f64::from(holding_months);
        let total_costs = inputs.renovation_costs + inputs.closing_costs + total_holding_cost;
        let mao = inputs.after_repair_value - total_costs - inputs.max_cash_left;

        debug!(
            "MAO recomputed: arv={:.2} loan={:.2} holding={:.2} over {} months, mao={:.2}",
            inputs.after_repair_value, initial_loan, total_holding_cost, holding_months, mao
        );

        MaoResult {
            holding_months,
            initial_loan: round_to_cents(initial_loan),
            monthly_interest: round_to_cents(monthly_interest),
            monthly_holding_cost: round_to_cents(monthly_holding_cost),
            total_holding_cost: round_to_cents(total_holding_cost),
            total_costs: round_to_cents(total_costs),
            mao: round_to_cents(mao),
            holding_schedule,
        }
    }

    pub fn calculate_from_form(&self, form: &MaoFormInputs) -> MaoResult {
        self.calculate(&self.parse_inputs(form))
    }
}

fn parse_months(input: &str) -> u32 {
    parse_non_negative(input).round().min(f64::from(MAX_HOLDING_MONTHS)) as u32
}
