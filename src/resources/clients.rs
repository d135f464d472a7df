//! Clients (paying customers)

use crate::http::HttpClient;
use crate::normalize::{normalize_entity, normalize_list, ResourceKind};
use crate::types::{Client, CreateClientRequest, Page, PaginationParams, UpdateClientRequest};
use crate::validation::{
    encode_path_segment, is_valid_document, require_non_empty, validate_email,
};
use crate::{Result, UpayError};

const ENDPOINT: &str = "/clients";

/// Client operations
#[derive(Debug, Clone, Copy)]
pub struct Clients<'a> {
    http: &'a HttpClient,
}

impl<'a> Clients<'a> {
    /// Create a new client facade
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Register a client
    pub async fn create(&self, request: &CreateClientRequest) -> Result<Client> {
        require_non_empty("name", &request.name)?;
        validate_email("email", &request.email)?;
        check_document(request.document.as_deref())?;

        let response = self.http.post(ENDPOINT, Some(request)).await?;
        normalize_entity(response, ResourceKind::Client)
    }

    /// List clients
    pub async fn list(&self, params: &PaginationParams) -> Result<Page<Client>> {
        let response = self.http.get(ENDPOINT, &params.to_query()).await?;
        normalize_list(response, ResourceKind::Client)
    }

    /// Fetch a client by ID
    pub async fn get(&self, id: &str) -> Result<Client> {
        let id = encode_path_segment("id", id)?;
        let response = self.http.get(&format!("{}/{}", ENDPOINT, id), &[]).await?;
        normalize_entity(response, ResourceKind::Client)
    }

    /// Partially update a client
    pub async fn update(&self, id: &str, request: &UpdateClientRequest) -> Result<Client> {
        let id = encode_path_segment("id", id)?;
        if let Some(name) = &request.name {
            require_non_empty("name", name)?;
        }
        if let Some(email) = &request.email {
            validate_email("email", email)?;
        }
        check_document(request.document.as_deref())?;

        let response = self
            .http
            .patch(&format!("{}/{}", ENDPOINT, id), request)
            .await?;
        normalize_entity(response, ResourceKind::Client)
    }
}

fn check_document(document: Option<&str>) -> Result<()> {
    match document {
        Some(doc) if !is_valid_document(doc) => Err(UpayError::invalid_input(
            "document",
            "is not a valid CPF or CNPJ",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_is_optional() {
        assert!(check_document(None).is_ok());
        assert!(check_document(Some("529.982.247-25")).is_ok());
        assert!(check_document(Some("123")).is_err());
    }
}
