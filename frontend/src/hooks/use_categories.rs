use shared::TransactionType;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::notify::notify_error;

pub struct UseCategoriesResult {
    pub categories: Vec<String>,
    pub loading: bool,
}

/// Load the category list, reloading whenever the transaction type changes
#[hook]
pub fn use_categories(api_client: &ApiClient, transaction_type: TransactionType) -> UseCategoriesResult {
    let categories = use_state(Vec::<String>::new);
    let loading = use_state(|| false);

    {
        let api_client = api_client.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        use_effect_with(transaction_type, move |transaction_type| {
            let transaction_type = *transaction_type;
            loading.set(true);
            spawn_local(async move {
                match api_client.categories(transaction_type).await {
                    Ok(response) => categories.set(response.categories),
                    Err(e) => {
                        Logger::error_with_component("categories", &format!("Failed to load {} categories: {}", transaction_type, e));
                        categories.set(Vec::new());
                        notify_error(e.user_message());
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    UseCategoriesResult {
        categories: (*categories).clone(),
        loading: *loading,
    }
}
