//! Core types for the Upay API
//!
//! Amounts are always integer minor units (`*_cents`). [`cents_to_decimal`] gives
//! a major-unit rendering for display only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Default currency for payment links
pub const DEFAULT_CURRENCY: &str = "BRL";

/// Render an amount in minor units as a major-unit decimal (`12345` -> `123.45`)
pub fn cents_to_decimal(cents: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(cents), 2)
}

/// Supported payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Pix,
    CreditCard,
    Boleto,
}

impl PaymentMethod {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::Boleto => "BOLETO",
        }
    }
}

/// Transaction lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Failed,
    Cancelled,
    Refunded,
}

impl TransactionStatus {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Paid => "PAID",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Cancelled => "CANCELLED",
            TransactionStatus::Refunded => "REFUNDED",
        }
    }
}

/// Payment link availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentLinkStatus {
    #[default]
    Active,
    Inactive,
}

impl PaymentLinkStatus {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentLinkStatus::Active => "ACTIVE",
            PaymentLinkStatus::Inactive => "INACTIVE",
        }
    }
}

/// Sort direction for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

/// Checkout options of a payment link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boleto_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_installments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_free_installments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_phone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_address: Option<bool>,
}

/// Product line of a payment link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLine {
    pub product_id: String,
    pub quantity: u32,
}

impl ProductLine {
    /// Create a new product line
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Request body for creating a payment link
///
/// Either `amount_cents` or a non-empty `products` list must be given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentLinkRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub products: Vec<ProductLine>,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<PaymentLinkSettings>,
    pub status: PaymentLinkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_pixel_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_enabled: Option<bool>,
}

impl CreatePaymentLinkRequest {
    /// Fixed-amount payment link
    pub fn with_amount(title: impl Into<String>, amount_cents: u64) -> Self {
        Self {
            title: title.into(),
            amount_cents: Some(amount_cents),
            currency: DEFAULT_CURRENCY.to_string(),
            ..Default::default()
        }
    }

    /// Product-bundle payment link
    pub fn with_products(title: impl Into<String>, products: Vec<ProductLine>) -> Self {
        Self {
            title: title.into(),
            products,
            currency: DEFAULT_CURRENCY.to_string(),
            ..Default::default()
        }
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the expiration date
    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Set the post-payment redirect URL
    pub fn redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    /// Set checkout settings
    pub fn settings(mut self, settings: PaymentLinkSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set the link status
    pub fn status(mut self, status: PaymentLinkStatus) -> Self {
        self.status = status;
        self
    }
}

/// Partial update of a payment link
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentLinkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentLinkStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<PaymentLinkSettings>,
}

/// Product embedded in a payment link line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedProduct {
    pub id: String,
    pub name: String,
    pub price_cents: u64,
}

/// Product line as returned inside a payment link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkProduct {
    pub product_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub product: Option<LinkedProduct>,
}

/// A shareable checkout page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub amount_cents: Option<u64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<PaymentLinkStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PaymentLinkSettings>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<PaymentLinkProduct>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PaymentLink {
    /// Amount in major units, for display
    pub fn amount_decimal(&self) -> Option<Decimal> {
        self.amount_cents.map(cents_to_decimal)
    }
}

/// Client data embedded in a new transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionClient {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request body for creating a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub product: String,
    pub amount_cents: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<TransactionClient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

impl CreateTransactionRequest {
    /// Create a new transaction request
    pub fn new(product: impl Into<String>, amount_cents: u64) -> Self {
        Self {
            product: product.into(),
            amount_cents,
            ..Default::default()
        }
    }

    /// Set the payment method
    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    /// Attach an inline client
    pub fn client(mut self, client: TransactionClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Apply a coupon code
    pub fn coupon_code(mut self, code: impl Into<String>) -> Self {
        self.coupon_code = Some(code.into());
        self
    }
}

/// Credit card data used to process a transaction
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    /// Card number, digits only
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    /// 1-12
    pub expiry_month: u32,
    /// Four-digit year
    pub expiry_year: i32,
    pub cvv: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl std::fmt::Debug for CardData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last4 = self
            .number
            .get(self.number.len().saturating_sub(4)..)
            .unwrap_or_default();
        f.debug_struct("CardData")
            .field("number", &format!("****{}", last4))
            .field("holder_name", &self.holder_name)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"***")
            .field("brand", &self.brand)
            .finish()
    }
}

impl CardData {
    /// Check number, CVV and expiration before the card is sent
    pub fn validate(&self) -> crate::Result<()> {
        let number_ok = (13..=19).contains(&self.number.len())
            && self.number.bytes().all(|b| b.is_ascii_digit());
        if !number_ok {
            return Err(crate::UpayError::invalid_input(
                "card_data.number",
                "must have 13 to 19 digits",
            ));
        }

        let cvv_ok =
            (3..=4).contains(&self.cvv.len()) && self.cvv.bytes().all(|b| b.is_ascii_digit());
        if !cvv_ok {
            return Err(crate::UpayError::invalid_input(
                "card_data.cvv",
                "must have 3 or 4 digits",
            ));
        }

        if !crate::validation::is_valid_expiration(self.expiry_year, self.expiry_month) {
            return Err(crate::UpayError::invalid_input(
                "card_data.expiry",
                "card is expired or has an invalid month",
            ));
        }

        Ok(())
    }
}

/// Payment data for [`Transactions::process`](crate::resources::Transactions::process)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_data: Option<CardData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
}

/// Client summary embedded in a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionClientSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Payment link summary embedded in a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPaymentLink {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
}

/// A single payment attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub amount_cents: u64,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<TransactionClientSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<TransactionPaymentLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_qr_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_copy_paste: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boleto_barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boleto_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

impl Transaction {
    /// Amount in major units, for display
    pub fn amount_decimal(&self) -> Decimal {
        cents_to_decimal(self.amount_cents)
    }

    /// Whether the transaction has been paid
    pub fn is_paid(&self) -> bool {
        self.status == Some(TransactionStatus::Paid)
    }
}

/// Request body for creating a product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price_cents: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CreateProductRequest {
    /// Create a new product request
    pub fn new(name: impl Into<String>, price_cents: u64) -> Self {
        Self {
            name: name.into(),
            price_cents,
            ..Default::default()
        }
    }
}

/// Partial update of a product
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price_cents: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CreateClientRequest {
    /// Create a new client request
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }
}

/// Partial update of a client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A paying customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for validating a coupon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCouponRequest {
    pub code: String,
    pub amount_cents: u64,
    /// Product IDs used to disambiguate product-scoped coupons
    #[serde(default)]
    pub product_ids: Vec<String>,
}

impl ValidateCouponRequest {
    /// Create a new coupon validation request
    pub fn new(code: impl Into<String>, amount_cents: u64) -> Self {
        Self {
            code: code.into(),
            amount_cents,
            product_ids: Vec::new(),
        }
    }

    /// Restrict validation to these products
    pub fn product_ids(mut self, ids: Vec<String>) -> Self {
        self.product_ids = ids;
        self
    }
}

/// Outcome of a coupon validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidation {
    pub valid: bool,
    pub discount_cents: u64,
    pub discount_percentage: Option<Decimal>,
    pub final_amount_cents: u64,
    pub message: Option<String>,
}

/// Pagination metadata of a list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_previous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Keys not modelled above, kept as sent
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Default for Pagination {
    /// `{ total: 0, page: 1, limit: 10 }`, used when the API omits pagination
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(10),
            total: Some(0),
            total_pages: None,
            has_next: None,
            has_previous: None,
            cursor: None,
            next_cursor: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Common list parameters
#[derive(Debug, Clone, Default)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub order_by: Option<String>,
    pub order_direction: Option<OrderDirection>,
}

impl PaginationParams {
    /// Create empty parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the cursor
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set ordering
    pub fn with_order(mut self, order_by: impl Into<String>, direction: OrderDirection) -> Self {
        self.order_by = Some(order_by.into());
        self.order_direction = Some(direction);
        self
    }

    /// Query pairs for the parameters that are set
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            query.push(("cursor", cursor.clone()));
        }
        if let Some(order_by) = &self.order_by {
            query.push(("orderBy", order_by.clone()));
        }
        if let Some(direction) = self.order_direction {
            query.push(("orderDirection", direction.as_str().to_string()));
        }
        query
    }
}

/// List parameters for payment links
#[derive(Debug, Clone, Default)]
pub struct ListPaymentLinksParams {
    pub pagination: PaginationParams,
    pub status: Option<PaymentLinkStatus>,
}

impl ListPaymentLinksParams {
    /// Query pairs for the parameters that are set
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.pagination.to_query();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        query
    }
}

/// List parameters for transactions
#[derive(Debug, Clone, Default)]
pub struct ListTransactionsParams {
    pub pagination: PaginationParams,
    pub status: Option<TransactionStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub client_id: Option<String>,
}

impl ListTransactionsParams {
    /// Query pairs for the parameters that are set
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.pagination.to_query();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(method) = self.payment_method {
            query.push(("method", method.as_str().to_string()));
        }
        if let Some(client_id) = &self.client_id {
            query.push(("clientId", client_id.clone()));
        }
        query
    }
}

/// Webhook event types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    #[serde(rename = "transaction.created")]
    TransactionCreated,
    #[serde(rename = "transaction.paid")]
    TransactionPaid,
    #[serde(rename = "transaction.failed")]
    TransactionFailed,
    #[serde(rename = "transaction.cancelled")]
    TransactionCancelled,
    #[serde(rename = "transaction.refunded")]
    TransactionRefunded,
    #[serde(rename = "payment_link.created")]
    PaymentLinkCreated,
    #[serde(rename = "payment_link.updated")]
    PaymentLinkUpdated,
    #[serde(rename = "payment_link.deleted")]
    PaymentLinkDeleted,
    /// Event type not known to this version of the client
    #[serde(other)]
    Unknown,
}

/// Webhook notification payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cents_to_decimal() {
        assert_eq!(cents_to_decimal(12345).to_string(), "123.45");
        assert_eq!(cents_to_decimal(100).to_string(), "1.00");
        assert_eq!(cents_to_decimal(0).to_string(), "0.00");
    }

    #[test]
    fn test_create_payment_link_serialization() {
        let request = CreatePaymentLinkRequest::with_amount("Premium", 10_000)
            .description("Annual plan");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "title": "Premium",
                "description": "Annual plan",
                "amountCents": 10000,
                "currency": "BRL",
                "status": "ACTIVE"
            })
        );
    }

    #[test]
    fn test_product_bundle_serialization() {
        let request = CreatePaymentLinkRequest::with_products(
            "Bundle",
            vec![ProductLine::new("prod_1", 2)],
        );
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["products"], json!([{ "productId": "prod_1", "quantity": 2 }]));
        assert!(body.get("amountCents").is_none());
    }

    #[test]
    fn test_payment_link_deserialization() {
        let link: PaymentLink = serde_json::from_value(json!({
            "id": "pl_1",
            "slug": "premium",
            "title": "Premium",
            "amountCents": 10000,
            "amount": 100.0,
            "currency": "BRL",
            "status": "ACTIVE",
            "createdAt": "2024-01-15T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(link.amount_cents, Some(10000));
        assert_eq!(link.amount_decimal().unwrap().to_string(), "100.00");
        assert_eq!(link.status, Some(PaymentLinkStatus::Active));
        assert!(link.created_at.is_some());
    }

    #[test]
    fn test_transaction_deserialization() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": "tx_1",
            "product": "Course",
            "amountCents": 4990,
            "status": "PAID",
            "paymentMethod": "CREDIT_CARD"
        }))
        .unwrap();

        assert!(tx.is_paid());
        assert_eq!(tx.payment_method, Some(PaymentMethod::CreditCard));
        assert_eq!(tx.amount_decimal().to_string(), "49.90");
    }

    #[test]
    fn test_list_query_omits_unset_values() {
        let params = ListTransactionsParams {
            pagination: PaginationParams::new().with_page(2).with_limit(50),
            payment_method: Some(PaymentMethod::Pix),
            ..Default::default()
        };

        assert_eq!(
            params.to_query(),
            vec![
                ("page", "2".to_string()),
                ("limit", "50".to_string()),
                ("method", "PIX".to_string()),
            ]
        );
        assert!(PaginationParams::new().to_query().is_empty());
    }

    #[test]
    fn test_card_debug_masks_number() {
        let card = CardData {
            number: "4111111111111111".to_string(),
            holder_name: Some("ANA".to_string()),
            expiry_month: 12,
            expiry_year: 2099,
            cvv: "123".to_string(),
            brand: None,
        };
        let debug = format!("{:?}", card);
        assert!(debug.contains("****1111"));
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123\""));
    }

    #[test]
    fn test_card_validation() {
        let card = CardData {
            number: "4111111111111111".to_string(),
            holder_name: None,
            expiry_month: 12,
            expiry_year: 2099,
            cvv: "123".to_string(),
            brand: None,
        };
        assert!(card.validate().is_ok());

        let short = CardData {
            number: "4111".to_string(),
            ..card.clone()
        };
        assert!(short.validate().unwrap_err().is_invalid_input());

        let expired = CardData {
            expiry_year: 2000,
            ..card.clone()
        };
        assert!(expired.validate().is_err());

        let bad_cvv = CardData {
            cvv: "12a".to_string(),
            ..card
        };
        assert!(bad_cvv.validate().is_err());
    }

    #[test]
    fn test_webhook_event_type() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "id": "evt_1",
            "type": "transaction.paid",
            "data": { "id": "tx_1" }
        }))
        .unwrap();
        assert_eq!(event.event_type, WebhookEventType::TransactionPaid);

        let event: WebhookEvent = serde_json::from_value(json!({
            "id": "evt_2",
            "type": "subscription.renewed"
        }))
        .unwrap();
        assert_eq!(event.event_type, WebhookEventType::Unknown);
        assert_eq!(event.data, Value::Null);
    }
}
