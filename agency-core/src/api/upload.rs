use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, Result};

/// Inputs of the document upload dialog. Upload stays disabled until a
/// client, a document type and a non-empty file are all chosen.
#[derive(Debug, Clone, Default)]
pub struct UploadDocumentForm {
    pub client_id: Option<String>,
    pub document_type: Option<i64>,
    file_name: Option<String>,
    file_bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
}

impl UploadDocumentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_client(&mut self, client_id: impl Into<String>) {
        let client_id = client_id.into();
        self.client_id = if client_id.is_empty() { None } else { Some(client_id) };
    }

    pub fn set_document_type(&mut self, id: Option<i64>) {
        self.document_type = id;
    }

    pub fn set_file(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.file_name = Some(name.into());
        self.file_bytes = bytes;
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(&mut self, path: &std::path::Path) -> Result<()> {
        let bytes = std::fs::read(path).map_err(|source| ApiError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.set_file(name, bytes);
        Ok(())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn file_len(&self) -> usize {
        self.file_bytes.len()
    }

    /// First reason the form cannot be submitted yet.
    pub fn missing(&self) -> Option<&'static str> {
        if self.client_id.is_none() {
            Some("no client selected")
        } else if self.document_type.is_none() {
            Some("no document type selected")
        } else if self.file_name.is_none() || self.file_bytes.is_empty() {
            Some("no file chosen")
        } else {
            None
        }
    }

    pub fn can_upload(&self) -> bool {
        self.missing().is_none()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn to_multipart(&self) -> Result<Form> {
        if let Some(reason) = self.missing() {
            return Err(ApiError::IncompleteForm(reason));
        }
        // `missing()` returned None, so every field below is present.
        let (Some(client), Some(document_type), Some(file_name)) =
            (&self.client_id, self.document_type, &self.file_name)
        else {
            return Err(ApiError::IncompleteForm("form changed while building"));
        };

        let part = Part::bytes(self.file_bytes.clone()).file_name(file_name.clone());
        Ok(Form::new()
            .part("file", part)
            .text("client", client.clone())
            .text("document_type", document_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_disabled_without_client() {
        let mut form = UploadDocumentForm::new();
        form.set_document_type(Some(3));
        form.set_file("passport.pdf", b"%PDF-1.7".to_vec());

        assert!(!form.can_upload());
        assert_eq!(form.missing(), Some("no client selected"));
        assert!(matches!(form.to_multipart(), Err(ApiError::IncompleteForm(_))));
    }

    #[test]
    fn empty_file_is_not_uploadable() {
        let mut form = UploadDocumentForm::new();
        form.set_client("12");
        form.set_document_type(Some(3));
        form.set_file("empty.pdf", Vec::new());
        assert_eq!(form.missing(), Some("no file chosen"));

        form.set_file("passport.pdf", vec![1, 2, 3]);
        assert!(form.can_upload());
        assert!(form.to_multipart().is_ok());
    }

    #[test]
    fn clearing_client_disables_upload_again() {
        let mut form = UploadDocumentForm::new();
        form.set_client("12");
        form.set_document_type(Some(1));
        form.set_file("a.txt", vec![1]);
        assert!(form.can_upload());

        form.set_client("");
        assert!(!form.can_upload());
    }
}
