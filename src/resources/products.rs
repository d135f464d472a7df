//! Products

use crate::http::HttpClient;
use crate::normalize::{normalize_entity, normalize_list, ResourceKind};
use crate::types::{CreateProductRequest, Page, PaginationParams, Product, UpdateProductRequest};
use crate::validation::{encode_path_segment, require_non_empty, validate_amount_cents};
use crate::Result;

const ENDPOINT: &str = "/products";

/// Product catalog operations
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    http: &'a HttpClient,
}

impl<'a> Products<'a> {
    /// Create a new product facade
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Create a product
    pub async fn create(&self, request: &CreateProductRequest) -> Result<Product> {
        require_non_empty("name", &request.name)?;
        validate_amount_cents("price_cents", request.price_cents)?;

        let response = self.http.post(ENDPOINT, Some(request)).await?;
        normalize_entity(response, ResourceKind::Product)
    }

    /// List products
    pub async fn list(&self, params: &PaginationParams) -> Result<Page<Product>> {
        let response = self.http.get(ENDPOINT, &params.to_query()).await?;
        normalize_list(response, ResourceKind::Product)
    }

    /// Fetch a product by ID
    pub async fn get(&self, id: &str) -> Result<Product> {
        let id = encode_path_segment("id", id)?;
        let response = self.http.get(&format!("{}/{}", ENDPOINT, id), &[]).await?;
        normalize_entity(response, ResourceKind::Product)
    }

    /// Partially update a product
    pub async fn update(&self, id: &str, request: &UpdateProductRequest) -> Result<Product> {
        let id = encode_path_segment("id", id)?;
        if let Some(name) = &request.name {
            require_non_empty("name", name)?;
        }
        if let Some(price) = request.price_cents {
            validate_amount_cents("price_cents", price)?;
        }

        let response = self
            .http
            .patch(&format!("{}/{}", ENDPOINT, id), request)
            .await?;
        normalize_entity(response, ResourceKind::Product)
    }

    /// Delete a product
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = encode_path_segment("id", id)?;
        self.http.delete(&format!("{}/{}", ENDPOINT, id)).await?;
        Ok(())
    }
}
