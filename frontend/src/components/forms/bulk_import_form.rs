use gloo::file::futures::read_as_text;
use property_ledger_domain::{BulkImportService, ImportPreview, REQUIRED_COLUMNS};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::notify::{notify, notify_error};

#[derive(Properties, PartialEq)]
pub struct BulkImportFormProps {
    pub api_client: ApiClient,
}

#[function_component(BulkImportForm)]
pub fn bulk_import_form(props: &BulkImportFormProps) -> Html {
    let file = use_state(|| Option::<web_sys::File>::None);
    let preview = use_state(|| Option::<ImportPreview>::None);
    let error = use_state(|| Option::<String>::None);
    let uploading = use_state(|| false);
    let file_input = use_node_ref();

    let on_file_change = {
        let file = file.clone();
        let preview = preview.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let selected = input.files().and_then(|files| files.get(0));

            file.set(None);
            preview.set(None);
            error.set(None);

            let Some(selected) = selected else {
                return;
            };

            let service = BulkImportService::new();
            if let Err(e) = service.check_file(&selected.name(), selected.size() as u64) {
                error.set(Some(e.to_string()));
                return;
            }

            let file = file.clone();
            let preview = preview.clone();
            let error = error.clone();
            spawn_local(async move {
                let blob = gloo::file::File::from(selected.clone());
                match read_as_text(&blob).await {
                    Ok(contents) => match service.preview(&contents) {
                        Ok(result) => {
                            Logger::debug_with_component(
                                "bulk-import",
                                &format!("Previewed {} row(s), {} problem(s)", result.row_count, result.errors.len()),
                            );
                            preview.set(Some(result));
                            file.set(Some(selected));
                        }
                        Err(e) => error.set(Some(e.to_string())),
                    },
                    Err(e) => {
                        Logger::error_with_component("bulk-import", &format!("Could not read file: {}", e));
                        error.set(Some("Could not read the selected file".to_string()));
                    }
                }
            });
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let file = file.clone();
        let preview = preview.clone();
        let uploading = uploading.clone();
        let file_input = file_input.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let ready = preview.as_ref().is_some_and(|p| p.can_upload());
            let Some(selected) = (*file).clone().filter(|_| ready && !*uploading) else {
                return;
            };

            uploading.set(true);
            let api_client = api_client.clone();
            let file = file.clone();
            let preview = preview.clone();
            let uploading = uploading.clone();
            let file_input = file_input.clone();
            spawn_local(async move {
                match api_client.bulk_import(&selected).await {
                    Ok(response) => {
                        Logger::info_with_component("bulk-import", &format!("Uploaded {}", selected.name()));
                        notify(&response.to_notification());
                        file.set(None);
                        preview.set(None);
                        if let Some(input) = file_input.cast::<HtmlInputElement>() {
                            input.set_value("");
                        }
                    }
                    Err(e) => {
                        Logger::error_with_component("bulk-import", &format!("Upload failed: {}", e));
                        notify_error(e.user_message());
                    }
                }
                uploading.set(false);
            });
        })
    };

    let can_upload = preview.as_ref().is_some_and(|p| p.can_upload()) && file.is_some();

    html! {
        <form class="bulk-import-form" onsubmit={on_submit}>
            <h2>{"Import transactions"}</h2>
            <p class="form-hint">
                {format!("Upload a .csv file with the columns: {}", REQUIRED_COLUMNS.join(", "))}
            </p>

            <div class="form-group">
                <label for="file">{"CSV file"}</label>
                <input
                    type="file"
                    id="file"
                    name="file"
                    accept=".csv"
                    ref={file_input}
                    onchange={on_file_change}
                    disabled={*uploading}
                />
                {if let Some(error) = error.as_ref() {
                    html! { <div class="field-error">{error}</div> }
                } else { html! {} }}
            </div>

            {if let Some(preview) = preview.as_ref() {
                html! {
                    <div class="import-preview">
                        <p>
                            {format!(
                                "{} row(s): {} income, {} expense",
                                preview.row_count, preview.income_rows, preview.expense_rows
                            )}
                        </p>
                        {if !preview.errors.is_empty() {
                            html! {
                                <ul class="import-errors">
                                    {for preview.errors.iter().map(|row| html! {
                                        <li>{format!("Line {}: {}", row.line, row.message)}</li>
                                    })}
                                </ul>
                            }
                        } else { html! {} }}
                    </div>
                }
            } else { html! {} }}

            <button type="submit" class="btn btn-primary" disabled={!can_upload || *uploading}>
                {if *uploading { "Uploading..." } else { "Upload" }}
            </button>
        </form>
    }
}
