//! Page configuration read from `<body>` data attributes.
//!
//! The server renders one HTML page per form and tells the wasm bundle
//! which component to mount with `data-page`. Page specific context
//! (property id, embedded property JSON) rides along as more attributes.

use anyhow::{anyhow, Context, Result};
use shared::{PropertyDraft, PropertySummary};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    AddProperty,
    EditProperty,
    RemoveProperty,
    PropertyDetail,
    AddTransaction,
    BulkImport,
    MaoCalculator,
    Register,
}

impl FromStr for Page {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "add-property" => Ok(Page::AddProperty),
            "edit-property" => Ok(Page::EditProperty),
            "remove-property" => Ok(Page::RemoveProperty),
            "property-detail" => Ok(Page::PropertyDetail),
            "add-transaction" => Ok(Page::AddTransaction),
            "bulk-import" => Ok(Page::BulkImport),
            "mao-calculator" => Ok(Page::MaoCalculator),
            "register" => Ok(Page::Register),
            other => Err(anyhow!("unknown page '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub page: Page,
    /// Prefix for every API path; empty means same origin
    pub api_base_url: String,
    pub property_id: Option<String>,
    pub property_address: Option<String>,
    /// Existing values for the edit form
    pub property_draft: Option<PropertyDraft>,
    /// Properties the transaction form can pick from
    pub properties: Vec<PropertySummary>,
    pub remote_logging: bool,
}

impl PageConfig {
    /// Build the config from a data-attribute lookup (`page` for `data-page`)
    pub fn from_attributes<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let page = get("page")
            .ok_or_else(|| anyhow!("<body> has no data-page attribute"))?
            .parse::<Page>()?;

        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let property_draft = match non_empty("propertyDraft") {
            Some(json) => Some(serde_json::from_str(&json).context("data-property-draft is not valid JSON")?),
            None => None,
        };
        let properties = match non_empty("properties") {
            Some(json) => serde_json::from_str(&json).context("data-properties is not valid JSON")?,
            None => Vec::new(),
        };

        Ok(Self {
            page,
            api_base_url: non_empty("apiBase").unwrap_or_default().trim_end_matches('/').to_string(),
            property_id: non_empty("propertyId"),
            property_address: non_empty("propertyAddress"),
            property_draft,
            properties,
            remote_logging: non_empty("remoteLogging").is_some_and(|v| v == "true"),
        })
    }

    pub fn from_document() -> Result<Self> {
        let dataset = gloo::utils::body().dataset();
        Self::from_attributes(|key| dataset.get(key))
    }
}
