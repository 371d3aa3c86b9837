use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::notify::{notify, notify_error};

#[derive(Properties, PartialEq)]
pub struct RunCompsButtonProps {
    pub api_client: ApiClient,
    pub property_id: String,
}

#[function_component(RunCompsButton)]
pub fn run_comps_button(props: &RunCompsButtonProps) -> Html {
    let running = use_state(|| false);

    let onclick = {
        let api_client = props.api_client.clone();
        let property_id = props.property_id.clone();
        let running = running.clone();
        Callback::from(move |_: MouseEvent| {
            if *running {
                return;
            }
            running.set(true);
            let api_client = api_client.clone();
            let property_id = property_id.clone();
            let running = running.clone();
            spawn_local(async move {
                Logger::info_with_component("run-comps", &format!("Requesting comps for property {}", property_id));
                match api_client.run_comps(&property_id).await {
                    Ok(response) => notify(&response.to_notification()),
                    Err(e) => {
                        Logger::error_with_component("run-comps", &format!("Comps request failed: {}", e));
                        notify_error(e.user_message());
                    }
                }
                running.set(false);
            });
        })
    };

    html! {
        <button type="button" class="btn btn-secondary run-comps-btn" {onclick} disabled={*running}>
            {if *running { "Running comps..." } else { "Run comps" }}
        </button>
    }
}
