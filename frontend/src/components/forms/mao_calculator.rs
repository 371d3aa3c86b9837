use property_ledger_domain::{format_currency, MaoService};
use shared::MaoFormInputs;
use yew::prelude::*;

use crate::components::form_field::{FormField, MoneyField};

/// Recomputes the offer on every keystroke; nothing is sent to the server
#[function_component(MaoCalculator)]
pub fn mao_calculator() -> Html {
    let form = use_state(MaoFormInputs::default);
    let result = MaoService::new().calculate_from_form(&form);

    let bind = |apply: fn(&mut MaoFormInputs, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let mao_class = if result.is_viable() { "mao-value viable" } else { "mao-value not-viable" };

    html! {
        <section class="mao-calculator">
            <h2>{"Maximum allowable offer"}</h2>

            <div class="mao-inputs">
                <MoneyField id="after_repair_value" label="After repair value" value={form.after_repair_value.clone()}
                    on_change={bind(|f, v| f.after_repair_value = v)} />
                <MoneyField id="renovation_costs" label="Renovation costs" value={form.renovation_costs.clone()}
                    on_change={bind(|f, v| f.renovation_costs = v)} />
                <FormField id="renovation_duration" label="Renovation duration (months)" input_type="number"
                    value={form.renovation_duration.clone()} on_change={bind(|f, v| f.renovation_duration = v)} />
                <FormField id="time_to_refinance" label="Time to refinance (months)" input_type="number"
                    value={form.time_to_refinance.clone()} on_change={bind(|f, v| f.time_to_refinance = v)} />
                <MoneyField id="closing_costs" label="Closing costs" value={form.closing_costs.clone()}
                    on_change={bind(|f, v| f.closing_costs = v)} />
                <MoneyField id="max_cash_left" label="Max cash left in deal" value={form.max_cash_left.clone()}
                    on_change={bind(|f, v| f.max_cash_left = v)} />
                <MoneyField id="loan_to_value" label="Loan to value (%)" value={form.loan_to_value.clone()}
                    on_change={bind(|f, v| f.loan_to_value = v)} />
                <MoneyField id="interest_rate" label="Interest rate (%)" value={form.interest_rate.clone()}
                    on_change={bind(|f, v| f.interest_rate = v)} />
                <MoneyField id="monthly_utilities" label="Monthly utilities" value={form.monthly_utilities.clone()}
                    on_change={bind(|f, v| f.monthly_utilities = v)} />
                <MoneyField id="monthly_hoa" label="Monthly HOA" value={form.monthly_hoa.clone()}
                    on_change={bind(|f, v| f.monthly_hoa = v)} />
                <MoneyField id="monthly_maintenance" label="Monthly maintenance" value={form.monthly_maintenance.clone()}
                    on_change={bind(|f, v| f.monthly_maintenance = v)} />
            </div>

            <dl class="mao-results">
                <dt>{"Initial loan"}</dt>
                <dd>{format_currency(result.initial_loan)}</dd>
                <dt>{"Monthly interest"}</dt>
                <dd>{format_currency(result.monthly_interest)}</dd>
                <dt>{"Monthly holding cost"}</dt>
                <dd>{format_currency(result.monthly_holding_cost)}</dd>
                <dt>{format!("Holding cost ({} months)", result.holding_months)}</dt>
                <dd>{format_currency(result.total_holding_cost)}</dd>
                <dt>{"Total costs"}</dt>
                <dd>{format_currency(result.total_costs)}</dd>
                <dt>{"Maximum allowable offer"}</dt>
                <dd class={mao_class}>{format_currency(result.mao)}</dd>
            </dl>

            {if !result.holding_schedule.is_empty() {
                html! {
                    <table class="holding-schedule">
                        <thead>
                            <tr><th>{"Month"}</th><th>{"Cumulative holding cost"}</th></tr>
                        </thead>
                        <tbody>
                            {for result.holding_schedule.iter().map(|row| html! {
                                <tr>
                                    <td>{row.month}</td>
                                    <td>{format_currency(row.cumulative_cost)}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            } else { html! {} }}
        </section>
    }
}
