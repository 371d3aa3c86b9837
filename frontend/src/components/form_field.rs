use shared::FieldError;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::from("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub step: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Labelled input that reports every keystroke and shows its own error line
#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    let class = if props.error.is_some() { "form-group has-error" } else { "form-group" };

    html! {
        <div {class}>
            <label for={props.id.clone()}>{props.label.clone()}</label>
            <input
                type={props.input_type.clone()}
                id={props.id.clone()}
                name={props.id.clone()}
                placeholder={props.placeholder.clone()}
                step={props.step.clone()}
                value={props.value.clone()}
                {oninput}
                disabled={props.disabled}
            />
            {if let Some(error) = props.error.as_ref() {
                html! { <div class="field-error">{error}</div> }
            } else { html! {} }}
        </div>
    }
}

/// Numeric variant used by the money and percentage inputs
#[derive(Properties, PartialEq)]
pub struct MoneyFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(MoneyField)]
pub fn money_field(props: &MoneyFieldProps) -> Html {
    html! {
        <FormField
            id={props.id.clone()}
            label={props.label.clone()}
            value={props.value.clone()}
            on_change={props.on_change.clone()}
            input_type="number"
            placeholder="0.00"
            step={Some(AttrValue::from("0.01"))}
            error={props.error.clone()}
            disabled={props.disabled}
        />
    }
}

/// First error recorded against `field`, if any
pub fn error_for(errors: &[FieldError], field: &str) -> Option<String> {
    errors.iter().find(|e| e.field == field).map(|e| e.message.clone())
}

/// Every error whose field sits under `prefix`, joined into one line
pub fn errors_under(errors: &[FieldError], prefix: &str) -> Option<String> {
    let messages: Vec<&str> = errors
        .iter()
        .filter(|e| e.field.starts_with(prefix))
        .map(|e| e.message.as_str())
        .collect();
    (!messages.is_empty()).then(|| messages.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_error_lookup_by_field() {
        let errors = vec![
            FieldError::new("amount", "Please enter an amount"),
            FieldError::new("partners[1].name", "Partner 2 needs a name"),
            FieldError::new("partners.equity_share", "Equity must total 100%"),
        ];

        assert_eq!(error_for(&errors, "amount"), Some("Please enter an amount".to_string()));
        assert_eq!(error_for(&errors, "date"), None);
        assert_eq!(
            errors_under(&errors, "partners"),
            Some("Partner 2 needs a name Equity must total 100%".to_string())
        );
        assert_eq!(errors_under(&errors, "reimbursement"), None);
    }
}
