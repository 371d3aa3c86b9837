use shared::AddressSuggestion;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_autocomplete::use_autocomplete;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct AddressAutocompleteProps {
    pub api_client: ApiClient,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(AddressAutocomplete)]
pub fn address_autocomplete(props: &AddressAutocompleteProps) -> Html {
    let on_chosen = {
        let on_change = props.on_change.clone();
        Callback::from(move |suggestion: AddressSuggestion| on_change.emit(suggestion.address))
    };
    let autocomplete = use_autocomplete(&props.api_client, on_chosen);

    let oninput = {
        let on_change = props.on_change.clone();
        let on_input = autocomplete.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            on_change.emit(value.clone());
            on_input.emit(value);
        })
    };

    let onblur = {
        let on_close = autocomplete.on_close.clone();
        Callback::from(move |_: FocusEvent| on_close.emit(()))
    };

    let state = &autocomplete.state;
    let class = if props.error.is_some() { "form-group address-autocomplete has-error" } else { "form-group address-autocomplete" };

    html! {
        <div {class}>
            <label for="address">{"Property address"}</label>
            <input
                type="text"
                id="address"
                name="address"
                autocomplete="off"
                placeholder="Start typing an address..."
                value={props.value.clone()}
                {oninput}
                onkeydown={autocomplete.on_keydown.clone()}
                {onblur}
                disabled={props.disabled}
            />

            {if state.open && !state.suggestions.is_empty() {
                html! {
                    <ul class="autocomplete-suggestions" role="listbox">
                        {for state.suggestions.iter().enumerate().map(|(index, suggestion)| {
                            let on_select = autocomplete.on_select.clone();
                            // mousedown fires before the input's blur closes the list
                            let onmousedown = Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                on_select.emit(index);
                            });
                            let class = if state.highlighted == Some(index) {
                                "autocomplete-item highlighted"
                            } else {
                                "autocomplete-item"
                            };
                            html! {
                                <li {class} role="option" {onmousedown}>{&suggestion.address}</li>
                            }
                        })}
                    </ul>
                }
            } else { html! {} }}

            {if let Some(error) = props.error.as_ref() {
                html! { <div class="field-error">{error}</div> }
            } else { html! {} }}
        </div>
    }
}
