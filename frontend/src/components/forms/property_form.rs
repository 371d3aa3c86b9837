use property_ledger_domain::{format_currency, CashFlowService, PropertyFormService};
use shared::{AddPropertyRequest, EditPropertyRequest, FieldError, PropertyDraft};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::address_autocomplete::AddressAutocomplete;
use crate::components::cash_flow_summary::CashFlowSummaryView;
use crate::components::form_field::{error_for, errors_under, FormField, MoneyField};
use crate::components::partner_rows::{inputs_from_rows, rows_from_inputs, PartnerRow, PartnerRows};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::notify::{notify, notify_error};

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyFormMode {
    Add,
    Edit { property_id: String },
}

#[derive(Properties, PartialEq)]
pub struct PropertyFormProps {
    pub api_client: ApiClient,
    pub mode: PropertyFormMode,
    #[prop_or_default]
    pub initial: PropertyDraft,
}

#[function_component(PropertyForm)]
pub fn property_form(props: &PropertyFormProps) -> Html {
    let draft = use_state(|| props.initial.clone());
    let partner_rows = use_state(|| rows_from_inputs(&props.initial.partners));
    let errors = use_state(Vec::<FieldError>::new);
    let submitting = use_state(|| false);

    let form_service = PropertyFormService::new();
    let summary = CashFlowService::new().summarize(&draft.income, &draft.expenses);
    let suggested_payment = form_service.suggested_mortgage_payment(&draft.purchase);

    // Each input edits one string field of the draft
    let bind = |apply: fn(&mut PropertyDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |value: String| {
            let mut next = (*draft).clone();
            apply(&mut next, value);
            draft.set(next);
        })
    };

    let on_partners_change = {
        let partner_rows = partner_rows.clone();
        Callback::from(move |rows: Vec<PartnerRow>| partner_rows.set(rows))
    };

    let on_use_suggested = {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(payment) = suggested_payment {
                let mut next = (*draft).clone();
                next.expenses.first_mortgage = format!("{:.2}", payment);
                draft.set(next);
            }
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let mode = props.mode.clone();
        let initial = props.initial.clone();
        let draft = draft.clone();
        let partner_rows = partner_rows.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let mut snapshot = (*draft).clone();
            snapshot.partners = inputs_from_rows(&partner_rows);
            let form_service = PropertyFormService::new();

            let request = match &mode {
                PropertyFormMode::Add => form_service.build_add_request(&snapshot).map(PropertyRequest::Add),
                PropertyFormMode::Edit { property_id } => form_service
                    .build_edit_request(property_id, &snapshot)
                    .map(PropertyRequest::Edit),
            };

            let request = match request {
                Ok(request) => request,
                Err(field_errors) => {
                    notify_error("Please fix the highlighted fields");
                    errors.set(field_errors);
                    return;
                }
            };

            errors.set(Vec::new());
            submitting.set(true);

            let api_client = api_client.clone();
            let initial = initial.clone();
            let draft = draft.clone();
            let partner_rows = partner_rows.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                let result = match &request {
                    PropertyRequest::Add(request) => api_client.add_property(request).await,
                    PropertyRequest::Edit(request) => api_client.edit_property(request).await,
                };

                match result {
                    Ok(response) => {
                        Logger::info_with_component("property-form", "Property saved");
                        notify(&response.to_notification());
                        if matches!(request, PropertyRequest::Add(_)) {
                            draft.set(initial.clone());
                            partner_rows.set(rows_from_inputs(&initial.partners));
                        }
                    }
                    Err(e) => {
                        Logger::error_with_component("property-form", &format!("Saving property failed: {}", e));
                        notify_error(e.user_message());
                    }
                }
                submitting.set(false);
            });
        })
    };

    let disabled = *submitting;
    let heading = match props.mode {
        PropertyFormMode::Add => "Add property",
        PropertyFormMode::Edit { .. } => "Edit property",
    };

    html! {
        <form class="property-form" onsubmit={on_submit}>
            <h2>{heading}</h2>

            {if let Some(error) = error_for(&errors, "property_id") {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            <AddressAutocomplete
                api_client={props.api_client.clone()}
                value={draft.address.clone()}
                on_change={bind(|d, v| d.address = v)}
                error={error_for(&errors, "address")}
                {disabled}
            />

            <fieldset class="purchase-section">
                <legend>{"Purchase"}</legend>
                <FormField
                    id="purchase_date"
                    label="Purchase date"
                    input_type="date"
                    value={draft.purchase.purchase_date.clone()}
                    on_change={bind(|d, v| d.purchase.purchase_date = v)}
                    error={error_for(&errors, "purchase_date")}
                    {disabled}
                />
                <MoneyField id="purchase_price" label="Purchase price" value={draft.purchase.purchase_price.clone()}
                    on_change={bind(|d, v| d.purchase.purchase_price = v)} error={error_for(&errors, "purchase_price")} {disabled} />
                <MoneyField id="down_payment" label="Down payment" value={draft.purchase.down_payment.clone()}
                    on_change={bind(|d, v| d.purchase.down_payment = v)} error={error_for(&errors, "down_payment")} {disabled} />
                <MoneyField id="loan_amount" label="Loan amount" value={draft.purchase.loan_amount.clone()}
                    on_change={bind(|d, v| d.purchase.loan_amount = v)} error={error_for(&errors, "loan_amount")} {disabled} />
                <MoneyField id="interest_rate" label="Interest rate (%)" value={draft.purchase.interest_rate.clone()}
                    on_change={bind(|d, v| d.purchase.interest_rate = v)} error={error_for(&errors, "interest_rate")} {disabled} />
                <MoneyField id="loan_term_years" label="Loan term (years)" value={draft.purchase.loan_term_years.clone()}
                    on_change={bind(|d, v| d.purchase.loan_term_years = v)} error={error_for(&errors, "loan_term_years")} {disabled} />
                <MoneyField id="closing_costs" label="Closing costs" value={draft.purchase.closing_costs.clone()}
                    on_change={bind(|d, v| d.purchase.closing_costs = v)} error={error_for(&errors, "closing_costs")} {disabled} />
            </fieldset>

            <fieldset class="income-section">
                <legend>{"Monthly income"}</legend>
                <MoneyField id="rental_income" label="Rent" value={draft.income.rental_income.clone()}
                    on_change={bind(|d, v| d.income.rental_income = v)} {disabled} />
                <MoneyField id="parking_income" label="Parking" value={draft.income.parking_income.clone()}
                    on_change={bind(|d, v| d.income.parking_income = v)} {disabled} />
                <MoneyField id="laundry_income" label="Laundry" value={draft.income.laundry_income.clone()}
                    on_change={bind(|d, v| d.income.laundry_income = v)} {disabled} />
                <MoneyField id="storage_income" label="Storage" value={draft.income.storage_income.clone()}
                    on_change={bind(|d, v| d.income.storage_income = v)} {disabled} />
                <MoneyField id="other_income" label="Other" value={draft.income.other_income.clone()}
                    on_change={bind(|d, v| d.income.other_income = v)} {disabled} />
            </fieldset>

            <fieldset class="expense-section">
                <legend>{"Monthly expenses"}</legend>
                <MoneyField id="first_mortgage" label="First mortgage" value={draft.expenses.first_mortgage.clone()}
                    on_change={bind(|d, v| d.expenses.first_mortgage = v)} {disabled} />
                {if let Some(payment) = suggested_payment {
                    html! {
                        <button type="button" class="btn btn-link use-suggested-payment" onclick={on_use_suggested} {disabled}>
                            {format!("Use calculated payment ({})", format_currency(payment))}
                        </button>
                    }
                } else { html! {} }}
                <MoneyField id="second_mortgage" label="Second mortgage" value={draft.expenses.second_mortgage.clone()}
                    on_change={bind(|d, v| d.expenses.second_mortgage = v)} {disabled} />
                <MoneyField id="property_tax" label="Property tax" value={draft.expenses.property_tax.clone()}
                    on_change={bind(|d, v| d.expenses.property_tax = v)} {disabled} />
                <MoneyField id="insurance" label="Insurance" value={draft.expenses.insurance.clone()}
                    on_change={bind(|d, v| d.expenses.insurance = v)} {disabled} />
                <MoneyField id="hoa_fees" label="HOA fees" value={draft.expenses.hoa_fees.clone()}
                    on_change={bind(|d, v| d.expenses.hoa_fees = v)} {disabled} />

                <h4>{"Utilities"}</h4>
                <MoneyField id="water" label="Water" value={draft.expenses.water.clone()}
                    on_change={bind(|d, v| d.expenses.water = v)} {disabled} />
                <MoneyField id="sewer" label="Sewer" value={draft.expenses.sewer.clone()}
                    on_change={bind(|d, v| d.expenses.sewer = v)} {disabled} />
                <MoneyField id="electricity" label="Electricity" value={draft.expenses.electricity.clone()}
                    on_change={bind(|d, v| d.expenses.electricity = v)} {disabled} />
                <MoneyField id="gas" label="Gas" value={draft.expenses.gas.clone()}
                    on_change={bind(|d, v| d.expenses.gas = v)} {disabled} />
                <MoneyField id="internet" label="Internet" value={draft.expenses.internet.clone()}
                    on_change={bind(|d, v| d.expenses.internet = v)} {disabled} />
                <MoneyField id="trash" label="Trash" value={draft.expenses.trash.clone()}
                    on_change={bind(|d, v| d.expenses.trash = v)} {disabled} />

                <h4>{"Reserves (percent of rent)"}</h4>
                <MoneyField id="management_pct" label="Management (%)" value={draft.expenses.management_pct.clone()}
                    on_change={bind(|d, v| d.expenses.management_pct = v)} {disabled} />
                <MoneyField id="capex_pct" label="CapEx (%)" value={draft.expenses.capex_pct.clone()}
                    on_change={bind(|d, v| d.expenses.capex_pct = v)} {disabled} />
                <MoneyField id="vacancy_pct" label="Vacancy (%)" value={draft.expenses.vacancy_pct.clone()}
                    on_change={bind(|d, v| d.expenses.vacancy_pct = v)} {disabled} />
                <MoneyField id="repairs_pct" label="Repairs (%)" value={draft.expenses.repairs_pct.clone()}
                    on_change={bind(|d, v| d.expenses.repairs_pct = v)} {disabled} />
            </fieldset>

            <CashFlowSummaryView {summary} />

            <PartnerRows
                rows={(*partner_rows).clone()}
                on_change={on_partners_change}
                error={errors_under(&errors, "partners")}
                {disabled}
            />

            <button type="submit" class="btn btn-primary" {disabled}>
                {if disabled { "Saving..." } else { "Save property" }}
            </button>
        </form>
    }
}

enum PropertyRequest {
    Add(AddPropertyRequest),
    Edit(EditPropertyRequest),
}
