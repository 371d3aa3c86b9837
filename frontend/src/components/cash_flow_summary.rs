use property_ledger_domain::format_currency;
use shared::CashFlowSummary;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CashFlowSummaryProps {
    pub summary: CashFlowSummary,
}

#[function_component(CashFlowSummaryView)]
pub fn cash_flow_summary_view(props: &CashFlowSummaryProps) -> Html {
    let summary = &props.summary;
    let net_class = if summary.net_income < 0.0 { "summary-value negative" } else { "summary-value positive" };

    html! {
        <section class="cash-flow-summary">
            <h3>{"Monthly cash flow"}</h3>
            <dl>
                <dt>{"Total income"}</dt>
                <dd class="summary-value">{format_currency(summary.total_income)}</dd>

                <dt>{"Fixed expenses"}</dt>
                <dd class="summary-value">{format_currency(summary.fixed_expenses)}</dd>

                <dt>{"Utilities"}</dt>
                <dd class="summary-value">{format_currency(summary.utilities)}</dd>

                <dt>{"Reserves (percent of rent)"}</dt>
                <dd class="summary-value">{format_currency(summary.percentage_expenses)}</dd>

                <dt>{"Total expenses"}</dt>
                <dd class="summary-value">{format_currency(summary.total_expenses)}</dd>

                <dt>{"Net monthly income"}</dt>
                <dd class={net_class}>{format_currency(summary.net_income)}</dd>

                <dt>{"Net annual income"}</dt>
                <dd class={net_class}>{format_currency(summary.annual_net_income)}</dd>
            </dl>
        </section>
    }
}
