use anyhow::{Context, Result};
use web_sys::Element;

mod components;
mod config;
mod hooks;
mod services;

use components::forms::bulk_import_form::{BulkImportForm, BulkImportFormProps};
use components::forms::mao_calculator::MaoCalculator;
use components::forms::property_form::{PropertyForm, PropertyFormMode, PropertyFormProps};
use components::forms::remove_property_form::{RemovePropertyForm, RemovePropertyFormProps};
use components::forms::transaction_form::{TransactionForm, TransactionFormProps};
use components::password_strength::RegisterPasswordFields;
use components::run_comps_button::{RunCompsButton, RunCompsButtonProps};
use config::{Page, PageConfig};
use services::api::ApiClient;
use services::logging::{self, Logger};

const MOUNT_ID: &str = "app";

fn mount_root() -> Result<Element> {
    gloo::utils::document()
        .get_element_by_id(MOUNT_ID)
        .with_context(|| format!("page has no #{} element to mount into", MOUNT_ID))
}

fn required(value: Option<String>, attribute: &str) -> Result<String> {
    value.with_context(|| format!("<body> is missing data-{}", attribute))
}

fn start() -> Result<()> {
    let config = PageConfig::from_document()?;

    let api_client = ApiClient::with_base_url(config.api_base_url.clone());
    let remote_endpoint = config
        .remote_logging
        .then(|| format!("{}/api/logs", config.api_base_url));
    logging::init(remote_endpoint);

    Logger::info_with_component("bootstrap", &format!("Mounting {:?}", config.page));
    let root = mount_root()?;

    match config.page {
        Page::AddProperty => {
            let props = PropertyFormProps {
                api_client,
                mode: PropertyFormMode::Add,
                initial: config.property_draft.unwrap_or_default(),
            };
            yew::Renderer::<PropertyForm>::with_root_and_props(root, props).render();
        }
        Page::EditProperty => {
            let props = PropertyFormProps {
                api_client,
                mode: PropertyFormMode::Edit {
                    property_id: required(config.property_id, "property-id")?,
                },
                initial: config.property_draft.context("edit page needs data-property-draft")?,
            };
            yew::Renderer::<PropertyForm>::with_root_and_props(root, props).render();
        }
        Page::RemoveProperty => {
            let props = RemovePropertyFormProps {
                api_client,
                property_id: required(config.property_id, "property-id")?,
                address: required(config.property_address, "property-address")?,
            };
            yew::Renderer::<RemovePropertyForm>::with_root_and_props(root, props).render();
        }
        Page::PropertyDetail => {
            let props = RunCompsButtonProps {
                api_client,
                property_id: required(config.property_id, "property-id")?,
            };
            yew::Renderer::<RunCompsButton>::with_root_and_props(root, props).render();
        }
        Page::AddTransaction => {
            let props = TransactionFormProps {
                api_client,
                properties: config.properties,
                property_id: config.property_id,
            };
            yew::Renderer::<TransactionForm>::with_root_and_props(root, props).render();
        }
        Page::BulkImport => {
            let props = BulkImportFormProps { api_client };
            yew::Renderer::<BulkImportForm>::with_root_and_props(root, props).render();
        }
        Page::MaoCalculator => {
            yew::Renderer::<MaoCalculator>::with_root(root).render();
        }
        Page::Register => {
            yew::Renderer::<RegisterPasswordFields>::with_root(root).render();
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = start() {
        // the logger may not be installed yet
        gloo::console::error!(format!("Page scripts not started: {:#}", e));
    }
}
