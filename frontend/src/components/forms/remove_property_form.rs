use property_ledger_domain::PropertyFormService;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::notify::{notify, notify_error};

const AFTER_REMOVAL_URL: &str = "/properties";

#[derive(Properties, PartialEq)]
pub struct RemovePropertyFormProps {
    pub api_client: ApiClient,
    pub property_id: String,
    pub address: String,
}

#[function_component(RemovePropertyForm)]
pub fn remove_property_form(props: &RemovePropertyFormProps) -> Html {
    let confirmation = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let removing = use_state(|| false);

    let oninput = {
        let confirmation = confirmation.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            confirmation.set(input.value());
            error.set(None);
        })
    };

    let onsubmit = {
        let api_client = props.api_client.clone();
        let property_id = props.property_id.clone();
        let address = props.address.clone();
        let confirmation = confirmation.clone();
        let error = error.clone();
        let removing = removing.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *removing {
                return;
            }

            let request = match PropertyFormService::new().build_remove_request(&property_id, &address, &confirmation) {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            removing.set(true);
            let api_client = api_client.clone();
            let removing = removing.clone();
            spawn_local(async move {
                match api_client.remove_property(&request).await {
                    Ok(response) => {
                        Logger::info_with_component(
                            "remove-property",
                            &format!("Removed property {}", request.property_id),
                        );
                        notify(&response.to_notification());
                        if gloo::utils::window().location().set_href(AFTER_REMOVAL_URL).is_err() {
                            Logger::warn_with_component("remove-property", "Could not navigate after removal");
                        }
                    }
                    Err(e) => {
                        Logger::error_with_component("remove-property", &format!("Removal failed: {}", e));
                        notify_error(e.user_message());
                    }
                }
                removing.set(false);
            });
        })
    };

    let confirmed = confirmation.trim().eq_ignore_ascii_case(props.address.trim());

    html! {
        <form class="remove-property-form" {onsubmit}>
            <h2>{"Remove property"}</h2>
            <p class="form-message warning">
                {"This permanently removes "}<strong>{&props.address}</strong>
                {" and its transactions. Type the address below to confirm."}
            </p>

            <div class="form-group">
                <label for="confirm_address">{"Property address"}</label>
                <input
                    type="text"
                    id="confirm_address"
                    name="confirm_address"
                    autocomplete="off"
                    value={(*confirmation).clone()}
                    {oninput}
                    disabled={*removing}
                />
                {if let Some(error) = error.as_ref() {
                    html! { <div class="field-error">{error}</div> }
                } else { html! {} }}
            </div>

            <button type="submit" class="btn btn-danger" disabled={*removing || !confirmed}>
                {if *removing { "Removing..." } else { "Remove property" }}
            </button>
        </form>
    }
}
