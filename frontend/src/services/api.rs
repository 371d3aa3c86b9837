use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    AddPropertyRequest, ApiResponse, AutocompleteResponse, CategoriesResponse, CreateTransactionRequest,
    EditPropertyRequest, RemovePropertyRequest, TransactionType,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl ClientError {
    /// Short message for the toast; transport details go to the log instead
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server { message, .. } => message.clone(),
            ClientError::Network(_) => "Could not reach the server. Please try again.".to_string(),
            ClientError::Serialize(_) | ClientError::Parse(_) => {
                "Something went wrong while talking to the server.".to_string()
            }
        }
    }
}

/// API client for the property ledger endpoints
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Client for same-origin requests
    pub fn new() -> Self {
        Self { base_url: String::new() }
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Address suggestions for the autocomplete dropdown
    pub async fn autocomplete(&self, query: &str) -> Result<AutocompleteResponse, ClientError> {
        let response = Request::get(&self.url("/api/autocomplete"))
            .query([("query", query)])
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        parse_json(response).await
    }

    /// Transaction categories for the selected type
    pub async fn categories(&self, transaction_type: TransactionType) -> Result<CategoriesResponse, ClientError> {
        let response = Request::get(&self.url("/api/categories"))
            .query([("type", transaction_type.as_str())])
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        parse_json(response).await
    }

    pub async fn add_property(&self, request: &AddPropertyRequest) -> Result<ApiResponse, ClientError> {
        self.post_json("/properties/add_properties", request).await
    }

    pub async fn edit_property(&self, request: &EditPropertyRequest) -> Result<ApiResponse, ClientError> {
        let path = format!("/properties/edit_properties/{}", request.property_id);
        self.post_json(&path, request).await
    }

    pub async fn remove_property(&self, request: &RemovePropertyRequest) -> Result<ApiResponse, ClientError> {
        let path = format!("/properties/remove_properties/{}", request.property_id);
        self.post_json(&path, request).await
    }

    pub async fn add_transaction(&self, request: &CreateTransactionRequest) -> Result<ApiResponse, ClientError> {
        self.post_json("/transactions/add", request).await
    }

    /// Upload a CSV file as multipart form data under the `file` field
    pub async fn bulk_import(&self, file: &web_sys::File) -> Result<ApiResponse, ClientError> {
        let form = web_sys::FormData::new().map_err(|e| ClientError::Serialize(format!("{:?}", e)))?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| ClientError::Serialize(format!("{:?}", e)))?;

        let response = Request::post(&self.url("/transactions/bulk_import"))
            .body(form)
            .map_err(|e| ClientError::Serialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        parse_api_response(response).await
    }

    /// Ask the server to run comparable-sales analysis for a property
    pub async fn run_comps(&self, property_id: &str) -> Result<ApiResponse, ClientError> {
        let response = Request::post(&self.url(&format!("/analyses/run_comps/{}", property_id)))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        parse_api_response(response).await
    }

    async fn post_json<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<ApiResponse, ClientError> {
        let response = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ClientError::Serialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        parse_api_response(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(server_error(status, &body));
    }

    response.json::<T>().await.map_err(|e| ClientError::Parse(e.to_string()))
}

/// Endpoints answer `{success, message, errors}`; a `success: false` body is
/// an error even when the status is 200
async fn parse_api_response(response: Response) -> Result<ApiResponse, ClientError> {
    let status = response.status();
    let ok = response.ok();
    let text = response
        .text()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))?;

    match serde_json::from_str::<ApiResponse>(&text) {
        Ok(body) if ok && body.success => Ok(body),
        Ok(body) => Err(ClientError::Server {
            status,
            message: body.to_notification().message,
        }),
        Err(_) if !ok => Err(server_error(status, &text)),
        Err(e) => Err(ClientError::Parse(e.to_string())),
    }
}

/// Error for a non-OK response. A JSON `{message, errors}` body is shown to
/// the user; anything else (usually an HTML error page) is only logged.
fn server_error(status: u16, body: &str) -> ClientError {
    if let Ok(parsed) = serde_json::from_str::<ApiResponse>(body) {
        if !parsed.message.trim().is_empty() || !parsed.errors.is_empty() {
            let failed = ApiResponse { success: false, ..parsed };
            return ClientError::Server {
                status,
                message: failed.to_notification().message,
            };
        }
    }

    if !body.trim().is_empty() {
        log::warn!(target: "api", "Server error {} with non-JSON body: {}", status, body);
    }
    ClientError::Server {
        status,
        message: format!("Server error {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_base_url_joining() {
        let client = ApiClient::with_base_url("https://ledger.example.com/".to_string());
        assert_eq!(client.url("/transactions/add"), "https://ledger.example.com/transactions/add");
        assert_eq!(ApiClient::new().url("/api/categories"), "/api/categories");
    }

    #[wasm_bindgen_test]
    fn test_user_messages() {
        let server = ClientError::Server {
            status: 422,
            message: "Address is required".to_string(),
        };
        assert_eq!(server.user_message(), "Address is required");
        assert!(ClientError::Network("TypeError".to_string()).user_message().contains("reach the server"));
    }

    #[wasm_bindgen_test]
    fn test_html_error_page_is_not_shown() {
        let error = server_error(502, "<html><body><h1>502 Bad Gateway</h1></body></html>");
        assert_eq!(error.user_message(), "Server error 502");

        assert_eq!(server_error(500, "").user_message(), "Server error 500");
    }

    #[wasm_bindgen_test]
    fn test_json_error_body_keeps_its_message() {
        let error = server_error(422, r#"{"success": false, "message": "Invalid property", "errors": ["Address is required"]}"#);
        assert_eq!(error.user_message(), "Invalid property: Address is required");
    }
}
