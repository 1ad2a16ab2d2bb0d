//! Thin wrappers over the admin REST backend. One HTTP call per function,
//! no retries, no caching, no request deduplication.

pub mod client;
pub mod envelope;
pub mod error;
pub mod upload;

pub use client::AdminApiClient;
pub use envelope::ListEnvelope;
pub use error::{ApiError, Result};
pub use upload::{UploadDocumentForm, UploadResponse};

pub const CLIENTS_ENDPOINT: &str = "/api/clients/";
pub const LEADS_ENDPOINT: &str = "/api/leads/";
pub const MARKETPLACE_PRODUCTS_ENDPOINT: &str = "/api/marketplace/products/";
pub const DOCUMENT_UPLOAD_ENDPOINT: &str = "/api/documents/upload/";
