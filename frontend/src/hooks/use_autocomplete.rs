use property_ledger_domain::AutocompleteState;
use shared::{AddressSuggestion, CalculatorConfig};
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::hooks::use_debounce::use_debounced_callback;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub struct UseAutocompleteResult {
    pub state: AutocompleteState,
    pub on_input: Callback<String>,
    pub on_keydown: Callback<KeyboardEvent>,
    pub on_select: Callback<usize>,
    pub on_close: Callback<()>,
}

/// Debounced, fetch-backed address suggestions.
///
/// The state lives in a `use_mut_ref` so responses arriving after later
/// keystrokes see the current query rather than the one captured at render.
#[hook]
pub fn use_autocomplete(api_client: &ApiClient, on_chosen: Callback<AddressSuggestion>) -> UseAutocompleteResult {
    let config = CalculatorConfig::default();
    let state = use_mut_ref(|| AutocompleteState::with_config(&config));
    let rerender = use_force_update();

    let fetch = {
        let api_client = api_client.clone();
        let state = state.clone();
        let rerender = rerender.clone();
        Callback::from(move |query: String| {
            let api_client = api_client.clone();
            let state = state.clone();
            let rerender = rerender.clone();
            spawn_local(async move {
                match api_client.autocomplete(&query).await {
                    Ok(response) => {
                        if state.borrow_mut().receive(&query, response.suggestions) {
                            rerender.force_update();
                        }
                    }
                    Err(e) => {
                        Logger::warn_with_component("autocomplete", &format!("Lookup for '{}' failed: {}", query, e));
                    }
                }
            });
        })
    };
    let debounced_fetch = use_debounced_callback(config.autocomplete_debounce_ms, fetch);

    let on_input = {
        let state = state.clone();
        let rerender = rerender.clone();
        Callback::from(move |input: String| {
            let query = state.borrow_mut().set_query(&input);
            if let Some(query) = query {
                debounced_fetch.emit(query);
            }
            rerender.force_update();
        })
    };

    let on_select = {
        let state = state.clone();
        let rerender = rerender.clone();
        let on_chosen = on_chosen.clone();
        Callback::from(move |index: usize| {
            let chosen = state.borrow_mut().select(index);
            if let Some(chosen) = chosen {
                on_chosen.emit(chosen);
            }
            rerender.force_update();
        })
    };

    let on_keydown = {
        let state = state.clone();
        let rerender = rerender.clone();
        Callback::from(move |e: KeyboardEvent| {
            let chosen = {
                let mut state = state.borrow_mut();
                match e.key().as_str() {
                    "ArrowDown" => {
                        e.prevent_default();
                        state.highlight_next();
                        None
                    }
                    "ArrowUp" => {
                        e.prevent_default();
                        state.highlight_previous();
                        None
                    }
                    "Enter" if state.open && state.highlighted.is_some() => {
                        e.prevent_default();
                        state.select_highlighted()
                    }
                    "Escape" => {
                        state.close();
                        None
                    }
                    _ => return,
                }
            };
            if let Some(chosen) = chosen {
                on_chosen.emit(chosen);
            }
            rerender.force_update();
        })
    };

    let on_close = {
        let state = state.clone();
        let rerender = rerender.clone();
        Callback::from(move |_: ()| {
            state.borrow_mut().close();
            rerender.force_update();
        })
    };

    let snapshot = state.borrow().clone();
    UseAutocompleteResult {
        state: snapshot,
        on_input,
        on_keydown,
        on_select,
        on_close,
    }
}
