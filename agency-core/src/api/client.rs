use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::envelope::ListEnvelope;
use crate::api::error::{ApiError, Result};
use crate::api::upload::{UploadDocumentForm, UploadResponse};
use crate::api::{CLIENTS_ENDPOINT, DOCUMENT_UPLOAD_ENDPOINT, LEADS_ENDPOINT, MARKETPLACE_PRODUCTS_ENDPOINT};
use crate::config::ApiConfig;
use crate::lookup::{Definition, LookupKind};
use crate::models::{Client, Lead, MarketplaceProduct};

/// HTTP client for the admin backend. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone, Debug)]
pub struct AdminApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl AdminApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .unwrap_or_else(|e| {
                log::warn!("[API] falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        #[cfg(target_arch = "wasm32")]
        let client = reqwest::Client::new();

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client,
        }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Turn a non-2xx response into `ApiError::Status`, pulling a `detail`
    /// or `message` field out of the body when there is one.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                ["detail", "message", "error"]
                    .iter()
                    .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
            });

        log::error!("[API] request failed with status {}", status);
        Err(ApiError::Status { status: status.as_u16(), message })
    }

    /// Generic GET returning parsed JSON.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let url = self.url(path);
        log::info!("[API] GET {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        let response = Self::check(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// GET a list endpoint, unwrapping a `results` envelope if present.
    pub async fn list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>> {
        let envelope: ListEnvelope<R> = self.get_json(path).await?;
        if let Some(count) = envelope.reported_count() {
            log::debug!("[API] {} reports {} rows in total", path, count);
        }
        Ok(envelope.into_vec())
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        self.list(CLIENTS_ENDPOINT).await
    }

    pub async fn list_leads(&self) -> Result<Vec<Lead>> {
        self.list(LEADS_ENDPOINT).await
    }

    pub async fn list_marketplace_products(&self) -> Result<Vec<MarketplaceProduct>> {
        self.list(MARKETPLACE_PRODUCTS_ENDPOINT).await
    }

    // ---- Definition endpoints ----

    pub async fn definitions(&self, kind: LookupKind) -> Result<Vec<Definition>> {
        self.list(kind.endpoint()).await
    }

    pub async fn user_types(&self) -> Result<Vec<Definition>> {
        self.definitions(LookupKind::UserTypes).await
    }

    pub async fn client_types(&self) -> Result<Vec<Definition>> {
        self.definitions(LookupKind::ClientTypes).await
    }

    pub async fn service_categories(&self) -> Result<Vec<Definition>> {
        self.definitions(LookupKind::ServiceCategories).await
    }

    pub async fn document_types(&self) -> Result<Vec<Definition>> {
        self.definitions(LookupKind::DocumentTypes).await
    }

    // ---- Documents ----

    /// Multipart upload of one file for a client. The form must be complete
    /// (see [`UploadDocumentForm::can_upload`]).
    pub async fn upload_document(&self, form: &UploadDocumentForm) -> Result<UploadResponse> {
        let multipart = form.to_multipart()?;
        let url = self.url(DOCUMENT_UPLOAD_ENDPOINT);
        log::info!("[API] POST {} ({} bytes)", url, form.file_len());

        let response = self
            .authorize(self.client.post(&url))
            .multipart(multipart)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
