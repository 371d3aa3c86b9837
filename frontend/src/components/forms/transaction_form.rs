use property_ledger_domain::{ReimbursementPlan, TransactionFormService};
use shared::{FieldError, Partner, PropertySummary, ReimbursementStatus, TransactionDraft, TransactionType};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::form_field::{error_for, FormField, MoneyField};
use crate::hooks::use_categories::use_categories;
use crate::services::api::ApiClient;
use crate::services::date_utils::{get_current_date, today};
use crate::services::logging::Logger;
use crate::services::notify::{notify, notify_error};

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    pub api_client: ApiClient,
    pub properties: Vec<PropertySummary>,
    #[prop_or_default]
    pub property_id: Option<String>,
}

fn blank_draft(property_id: &str, transaction_type: TransactionType) -> TransactionDraft {
    TransactionDraft {
        property_id: property_id.to_string(),
        transaction_type,
        date: get_current_date(),
        ..TransactionDraft::default()
    }
}

fn partners_for<'a>(properties: &'a [PropertySummary], property_id: &str) -> &'a [Partner] {
    properties
        .iter()
        .find(|p| p.id == property_id)
        .map(|p| p.partners.as_slice())
        .unwrap_or(&[])
}

#[function_component(TransactionForm)]
pub fn transaction_form(props: &TransactionFormProps) -> Html {
    let initial_property = props
        .property_id
        .clone()
        .or_else(|| props.properties.first().map(|p| p.id.clone()))
        .unwrap_or_default();

    let draft = use_state(|| blank_draft(&initial_property, TransactionType::Income));
    let errors = use_state(Vec::<FieldError>::new);
    let submitting = use_state(|| false);
    let categories = use_categories(&props.api_client, draft.transaction_type);

    let service = TransactionFormService::new();
    let partners = partners_for(&props.properties, &draft.property_id);
    let show_reimbursement = service.reimbursement_visible(partners);
    let plan = service.preview_shares(&draft, partners);

    let bind = |apply: fn(&mut TransactionDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |value: String| {
            let mut next = (*draft).clone();
            apply(&mut next, value);
            draft.set(next);
        })
    };

    let on_property_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.property_id = select.value();
            next.collector_payer.clear();
            draft.set(next);
        })
    };

    let on_type_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(transaction_type) = select.value().parse::<TransactionType>() {
                let mut next = (*draft).clone();
                next.transaction_type = transaction_type;
                // categories differ per type
                next.category.clear();
                draft.set(next);
            }
        })
    };

    let on_category_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.category = select.value();
            draft.set(next);
        })
    };

    let on_party_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.collector_payer = input.value();
            draft.set(next);
        })
    };

    let on_notes_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.notes = textarea.value();
            draft.set(next);
        })
    };

    let on_status_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.reimbursement.status = match select.value().as_str() {
                "completed" => ReimbursementStatus::Completed,
                _ => ReimbursementStatus::Pending,
            };
            draft.set(next);
        })
    };

    let on_share_description_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.reimbursement.share_description = textarea.value();
            draft.set(next);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let properties = props.properties.clone();
        let draft = draft.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let partners = partners_for(&properties, &draft.property_id);
            let request = match TransactionFormService::new().build_request(&draft, partners, today()) {
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
            let draft = draft.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match api_client.add_transaction(&request).await {
                    Ok(response) => {
                        Logger::info_with_component(
                            "transaction-form",
                            &format!("Saved {} of {:.2}", request.transaction_type, request.amount),
                        );
                        notify(&response.to_notification());
                        // keep property and type so consecutive entries are quick
                        draft.set(blank_draft(&request.property_id, request.transaction_type));
                    }
                    Err(e) => {
                        Logger::error_with_component("transaction-form", &format!("Saving transaction failed: {}", e));
                        notify_error(e.user_message());
                    }
                }
                submitting.set(false);
            });
        })
    };

    let disabled = *submitting;
    let party_label = draft.transaction_type.party_label();

    html! {
        <form class="transaction-form" onsubmit={on_submit}>
            <h2>{"Add transaction"}</h2>

            <div class="form-group">
                <label for="property_id">{"Property"}</label>
                <select id="property_id" name="property_id" onchange={on_property_change} {disabled}>
                    {for props.properties.iter().map(|property| html! {
                        <option value={property.id.clone()} selected={property.id == draft.property_id}>
                            {&property.address}
                        </option>
                    })}
                </select>
                {if let Some(error) = error_for(&errors, "property_id") {
                    html! { <div class="field-error">{error}</div> }
                } else { html! {} }}
            </div>

            <div class="form-group">
                <label for="type">{"Type"}</label>
                <select id="type" name="type" onchange={on_type_change} {disabled}>
                    {for [TransactionType::Income, TransactionType::Expense].into_iter().map(|t| html! {
                        <option value={t.as_str()} selected={t == draft.transaction_type}>{t.to_string()}</option>
                    })}
                </select>
            </div>

            <div class="form-group">
                <label for="category">{"Category"}</label>
                <select id="category" name="category" onchange={on_category_change} disabled={disabled || categories.loading}>
                    <option value="" selected={draft.category.is_empty()}>
                        {if categories.loading { "Loading..." } else { "Select a category" }}
                    </option>
                    {for categories.categories.iter().map(|category| html! {
                        <option value={category.clone()} selected={*category == draft.category}>{category}</option>
                    })}
                </select>
                {if let Some(error) = error_for(&errors, "category") {
                    html! { <div class="field-error">{error}</div> }
                } else { html! {} }}
            </div>

            <FormField id="description" label="Description" value={draft.description.clone()}
                on_change={bind(|d, v| d.description = v)} error={error_for(&errors, "description")} {disabled} />
            <MoneyField id="amount" label="Amount" value={draft.amount.clone()}
                on_change={bind(|d, v| d.amount = v)} error={error_for(&errors, "amount")} {disabled} />
            <FormField id="date" label="Date" input_type="date" value={draft.date.clone()}
                on_change={bind(|d, v| d.date = v)} error={error_for(&errors, "date")} {disabled} />

            <div class="form-group">
                <label for="collector_payer">{party_label}</label>
                <input
                    type="text"
                    id="collector_payer"
                    name="collector_payer"
                    list="partner-names"
                    value={draft.collector_payer.clone()}
                    oninput={on_party_input}
                    {disabled}
                />
                <datalist id="partner-names">
                    {for partners.iter().map(|p| html! { <option value={p.name.clone()} /> })}
                </datalist>
                {if let Some(error) = error_for(&errors, "collector_payer") {
                    html! { <div class="field-error">{error}</div> }
                } else { html! {} }}
            </div>

            <div class="form-group">
                <label for="notes">{"Notes"}</label>
                <textarea id="notes" name="notes" value={draft.notes.clone()} oninput={on_notes_input} {disabled} />
            </div>

            {if show_reimbursement {
                html! {
                    <fieldset class="reimbursement-section">
                        <legend>{"Reimbursement"}</legend>
                        <SharePreview plan={plan.clone()} />

                        <div class="form-group">
                            <label for="reimbursement_status">{"Status"}</label>
                            <select id="reimbursement_status" onchange={on_status_change} {disabled}>
                                <option value="pending" selected={draft.reimbursement.status == ReimbursementStatus::Pending}>
                                    {"Pending"}
                                </option>
                                <option value="completed" selected={draft.reimbursement.status == ReimbursementStatus::Completed}>
                                    {"Completed"}
                                </option>
                            </select>
                        </div>

                        {if draft.reimbursement.status == ReimbursementStatus::Completed {
                            html! {
                                <FormField id="date_shared" label="Date shared" input_type="date"
                                    value={draft.reimbursement.date_shared.clone()}
                                    on_change={bind(|d, v| d.reimbursement.date_shared = v)}
                                    error={error_for(&errors, "reimbursement.date_shared")} {disabled} />
                            }
                        } else { html! {} }}

                        <div class="form-group">
                            <label for="share_description">{"Share description"}</label>
                            <textarea
                                id="share_description"
                                placeholder={plan.share_description()}
                                value={draft.reimbursement.share_description.clone()}
                                oninput={on_share_description_input}
                                {disabled}
                            />
                        </div>
                    </fieldset>
                }
            } else { html! {} }}

            <button type="submit" class="btn btn-primary" {disabled}>
                {if disabled { "Saving..." } else { "Save transaction" }}
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct SharePreviewProps {
    plan: ReimbursementPlan,
}

#[function_component(SharePreview)]
fn share_preview(props: &SharePreviewProps) -> Html {
    match &props.plan {
        ReimbursementPlan::NotRequired => html! {},
        ReimbursementPlan::Shared(shares) if shares.is_empty() => html! {},
        ReimbursementPlan::Shared(shares) => html! {
            <ul class="share-preview">
                {for shares.iter().map(|share| html! { <li>{share.describe()}</li> })}
            </ul>
        },
    }
}
