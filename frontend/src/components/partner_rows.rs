use property_ledger_domain::{format_percent, EquityService};
use shared::PartnerInput;
use uuid::Uuid;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// One dynamic partner entry; the id keeps yew's keyed list stable when
/// rows are removed from the middle
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerRow {
    pub id: Uuid,
    pub input: PartnerInput,
}

impl PartnerRow {
    pub fn new(input: PartnerInput) -> Self {
        Self { id: Uuid::new_v4(), input }
    }

    pub fn blank() -> Self {
        Self::new(PartnerInput::default())
    }
}

pub fn rows_from_inputs(inputs: &[PartnerInput]) -> Vec<PartnerRow> {
    if inputs.is_empty() {
        return vec![PartnerRow::new(PartnerInput {
            equity_share: "100".to_string(),
            is_property_manager: true,
            ..PartnerInput::default()
        })];
    }
    inputs.iter().cloned().map(PartnerRow::new).collect()
}

pub fn inputs_from_rows(rows: &[PartnerRow]) -> Vec<PartnerInput> {
    rows.iter().map(|row| row.input.clone()).collect()
}

#[derive(Properties, PartialEq)]
pub struct PartnerRowsProps {
    pub rows: Vec<PartnerRow>,
    pub on_change: Callback<Vec<PartnerRow>>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(PartnerRows)]
pub fn partner_rows(props: &PartnerRowsProps) -> Html {
    let equity = EquityService::new();
    let partners = equity.parse_partners(&inputs_from_rows(&props.rows));
    let remaining = equity.remaining_equity(&partners);

    let update_row = |index: usize, apply: fn(&mut PartnerInput, &HtmlInputElement)| {
        let rows = props.rows.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut rows = rows.clone();
            if let Some(row) = rows.get_mut(index) {
                apply(&mut row.input, &input);
            }
            on_change.emit(rows);
        })
    };

    let select_manager = |index: usize| {
        let rows = props.rows.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: Event| {
            let rows = rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let mut row = row.clone();
                    row.input.is_property_manager = i == index;
                    row
                })
                .collect();
            on_change.emit(rows);
        })
    };

    let on_add = {
        let rows = props.rows.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let mut rows = rows.clone();
            rows.push(PartnerRow::blank());
            on_change.emit(rows);
        })
    };

    let remove_row = |index: usize| {
        let rows = props.rows.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let mut rows = rows.clone();
            if rows.len() > 1 {
                rows.remove(index);
            }
            on_change.emit(rows);
        })
    };

    let remaining_class = if remaining.abs() <= equity.config().equity_tolerance {
        "equity-remaining balanced"
    } else {
        "equity-remaining unbalanced"
    };

    html! {
        <fieldset class="partners-section">
            <legend>{"Partners"}</legend>

            {for props.rows.iter().enumerate().map(|(index, row)| html! {
                <div class="partner-row" key={row.id.to_string()}>
                    <input
                        type="text"
                        class="partner-name"
                        placeholder="Partner name"
                        value={row.input.name.clone()}
                        onchange={update_row(index, |p, input| p.name = input.value())}
                        disabled={props.disabled}
                    />
                    <input
                        type="number"
                        class="partner-equity"
                        placeholder="Equity %"
                        step="0.01"
                        min="0"
                        max="100"
                        value={row.input.equity_share.clone()}
                        onchange={update_row(index, |p, input| p.equity_share = input.value())}
                        disabled={props.disabled}
                    />
                    <label class="partner-manager">
                        <input
                            type="radio"
                            name="property_manager"
                            checked={row.input.is_property_manager}
                            onchange={select_manager(index)}
                            disabled={props.disabled}
                        />
                        {"Property manager"}
                    </label>
                    <button
                        type="button"
                        class="btn btn-link remove-partner"
                        onclick={remove_row(index)}
                        disabled={props.disabled || props.rows.len() <= 1}
                    >
                        {"Remove"}
                    </button>
                </div>
            })}

            <div class={remaining_class}>
                {if remaining > 0.0 {
                    format!("{} unassigned", format_percent(remaining))
                } else if remaining < 0.0 {
                    format!("Over-allocated by {}", format_percent(-remaining))
                } else {
                    "Equity fully assigned".to_string()
                }}
            </div>

            {if let Some(error) = props.error.as_ref() {
                html! { <div class="field-error">{error}</div> }
            } else { html! {} }}

            <button type="button" class="btn btn-secondary add-partner" onclick={on_add} disabled={props.disabled}>
                {"+ Add partner"}
            </button>
        </fieldset>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_new_property_starts_with_sole_manager_row() {
        let rows = rows_from_inputs(&[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].input.equity_share, "100");
        assert!(rows[0].input.is_property_manager);
    }

    #[wasm_bindgen_test]
    fn test_rows_keep_inputs_and_get_distinct_keys() {
        let inputs = vec![
            PartnerInput {
                name: "Alice".to_string(),
                equity_share: "60".to_string(),
                is_property_manager: true,
            },
            PartnerInput {
                name: "Bob".to_string(),
                equity_share: "40".to_string(),
                is_property_manager: false,
            },
        ];

        let rows = rows_from_inputs(&inputs);
        assert_ne!(rows[0].id, rows[1].id);
        assert_eq!(inputs_from_rows(&rows), inputs);
    }
}
