//! Payment links

use crate::http::HttpClient;
use crate::normalize::{normalize_entity, normalize_list, ResourceKind};
use crate::types::{
    CreatePaymentLinkRequest, ListPaymentLinksParams, Page, PaymentLink, ProductLine,
    UpdatePaymentLinkRequest, DEFAULT_CURRENCY,
};
use crate::validation::{
    encode_path_segment, is_valid_url, validate_amount_cents, validate_description,
    validate_title,
};
use crate::{Result, UpayError};

const ENDPOINT: &str = "/payment-links";

/// Payment link operations
#[derive(Debug, Clone, Copy)]
pub struct PaymentLinks<'a> {
    http: &'a HttpClient,
    checkout_base_url: &'a str,
}

impl<'a> PaymentLinks<'a> {
    /// Create a new payment link facade
    pub fn new(http: &'a HttpClient, checkout_base_url: &'a str) -> Self {
        Self {
            http,
            checkout_base_url,
        }
    }

    /// Create a payment link
    ///
    /// An empty currency is sent as `BRL`.
    pub async fn create(&self, request: &CreatePaymentLinkRequest) -> Result<PaymentLink> {
        validate_create(request)?;

        let mut body = request.clone();
        if body.currency.trim().is_empty() {
            body.currency = DEFAULT_CURRENCY.to_string();
        }

        let response = self.http.post(ENDPOINT, Some(&body)).await?;
        normalize_entity(response, ResourceKind::PaymentLink)
    }

    /// List payment links
    pub async fn list(&self, params: &ListPaymentLinksParams) -> Result<Page<PaymentLink>> {
        let response = self.http.get(ENDPOINT, &params.to_query()).await?;
        normalize_list(response, ResourceKind::PaymentLink)
    }

    /// Fetch a payment link by ID
    pub async fn get(&self, id: &str) -> Result<PaymentLink> {
        let id = encode_path_segment("id", id)?;
        let response = self.http.get(&format!("{}/{}", ENDPOINT, id), &[]).await?;
        normalize_entity(response, ResourceKind::PaymentLink)
    }

    /// Fetch a payment link by its public slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<PaymentLink> {
        let slug = encode_path_segment("slug", slug)?;
        let response = self
            .http
            .get(&format!("{}/slug/{}", ENDPOINT, slug), &[])
            .await?;
        normalize_entity(response, ResourceKind::PaymentLink)
    }

    /// Partially update a payment link
    pub async fn update(&self, id: &str, request: &UpdatePaymentLinkRequest) -> Result<PaymentLink> {
        let id = encode_path_segment("id", id)?;
        validate_update(request)?;

        let response = self
            .http
            .patch(&format!("{}/{}", ENDPOINT, id), request)
            .await?;
        normalize_entity(response, ResourceKind::PaymentLink)
    }

    /// Delete a payment link
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = encode_path_segment("id", id)?;
        self.http.delete(&format!("{}/{}", ENDPOINT, id)).await?;
        Ok(())
    }

    /// Public checkout URL of a payment link
    pub fn checkout_url(&self, slug: &str) -> Result<String> {
        checkout_url(self.checkout_base_url, slug)
    }
}

/// Build `{base}/{slug}` with the slug percent-encoded and any trailing slash of
/// `base` removed
pub fn checkout_url(base: &str, slug: &str) -> Result<String> {
    let slug = encode_path_segment("slug", slug)?;
    Ok(format!("{}/{}", base.trim_end_matches('/'), slug))
}

fn validate_create(request: &CreatePaymentLinkRequest) -> Result<()> {
    validate_title(&request.title)?;

    if let Some(description) = &request.description {
        validate_description(description)?;
    }

    match request.amount_cents {
        Some(amount) => validate_amount_cents("amount_cents", amount)?,
        None if request.products.is_empty() => {
            return Err(UpayError::invalid_input(
                "amount_cents",
                "is required unless products are given",
            ));
        }
        None => {}
    }

    validate_product_lines(&request.products)?;

    if let Some(url) = &request.redirect_url {
        validate_redirect_url(url)?;
    }

    Ok(())
}

fn validate_update(request: &UpdatePaymentLinkRequest) -> Result<()> {
    if let Some(title) = &request.title {
        validate_title(title)?;
    }
    if let Some(description) = &request.description {
        validate_description(description)?;
    }
    if let Some(amount) = request.amount_cents {
        validate_amount_cents("amount_cents", amount)?;
    }
    if let Some(url) = &request.redirect_url {
        validate_redirect_url(url)?;
    }
    Ok(())
}

fn validate_product_lines(products: &[ProductLine]) -> Result<()> {
    for (i, line) in products.iter().enumerate() {
        if line.product_id.trim().is_empty() {
            return Err(UpayError::invalid_input(
                format!("products[{}].product_id", i),
                "is required",
            ));
        }
        if line.quantity == 0 {
            return Err(UpayError::invalid_input(
                format!("products[{}].quantity", i),
                "must be at least 1",
            ));
        }
    }
    Ok(())
}

fn validate_redirect_url(url: &str) -> Result<()> {
    if !is_valid_url(url) {
        return Err(UpayError::invalid_input(
            "redirect_url",
            "must be an absolute http(s) URL",
        ));
    }
    Ok(())
}
