//! Transactions

use crate::http::HttpClient;
use crate::normalize::{normalize_entity, normalize_list, ResourceKind};
use crate::types::{
    CreateTransactionRequest, ListTransactionsParams, Page, ProcessPaymentRequest, Transaction,
};
use crate::validation::{
    encode_path_segment, require_non_empty, validate_amount_cents, validate_email,
};
use crate::{Result, UpayError};
use serde_json::{json, Value};

const ENDPOINT: &str = "/transactions";

/// Transaction operations
#[derive(Debug, Clone, Copy)]
pub struct Transactions<'a> {
    http: &'a HttpClient,
}

impl<'a> Transactions<'a> {
    /// Create a new transaction facade
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Create a transaction
    pub async fn create(&self, request: &CreateTransactionRequest) -> Result<Transaction> {
        validate_create(request)?;

        let response = self.http.post(ENDPOINT, Some(request)).await?;
        normalize_entity(response, ResourceKind::Transaction)
    }

    /// List transactions
    pub async fn list(&self, params: &ListTransactionsParams) -> Result<Page<Transaction>> {
        let response = self.http.get(ENDPOINT, &params.to_query()).await?;
        normalize_list(response, ResourceKind::Transaction)
    }

    /// Fetch a transaction by ID
    pub async fn get(&self, id: &str) -> Result<Transaction> {
        let id = encode_path_segment("id", id)?;
        let response = self.http.get(&format!("{}/{}", ENDPOINT, id), &[]).await?;
        normalize_entity(response, ResourceKind::Transaction)
    }

    /// Process a pending transaction, optionally with card data
    pub async fn process(
        &self,
        id: &str,
        payment: Option<&ProcessPaymentRequest>,
    ) -> Result<Transaction> {
        let id = encode_path_segment("id", id)?;
        if let Some(payment) = payment {
            validate_payment(payment)?;
        }

        let response = self
            .http
            .post(&format!("{}/{}/process", ENDPOINT, id), payment)
            .await?;
        normalize_entity(response, ResourceKind::Transaction)
    }

    /// Capture an authorized transaction
    pub async fn capture(&self, id: &str) -> Result<Transaction> {
        self.action(id, "capture", None).await
    }

    /// Cancel a transaction
    pub async fn cancel(&self, id: &str) -> Result<Transaction> {
        self.action(id, "cancel", None).await
    }

    /// Refund a transaction, fully or by `amount_cents`
    pub async fn refund(&self, id: &str, amount_cents: Option<u64>) -> Result<Transaction> {
        let body = match amount_cents {
            Some(amount) => {
                validate_amount_cents("amount_cents", amount)?;
                Some(json!({ "amountCents": amount }))
            }
            None => None,
        };
        self.action(id, "refund", body.as_ref()).await
    }

    async fn action(&self, id: &str, action: &str, body: Option<&Value>) -> Result<Transaction> {
        let id = encode_path_segment("id", id)?;
        let response = self
            .http
            .post(&format!("{}/{}/{}", ENDPOINT, id, action), body)
            .await?;
        normalize_entity(response, ResourceKind::Transaction)
    }
}

fn validate_create(request: &CreateTransactionRequest) -> Result<()> {
    require_non_empty("product", &request.product)?;
    validate_amount_cents("amount_cents", request.amount_cents)?;

    if let Some(client) = &request.client {
        validate_email("client.email", &client.email)?;
        require_non_empty("client.name", &client.name)?;
    }

    if let Some(client_id) = &request.client_id {
        require_non_empty("client_id", client_id)?;
    }

    Ok(())
}

fn validate_payment(payment: &ProcessPaymentRequest) -> Result<()> {
    if let Some(card) = &payment.card_data {
        card.validate()?;
    }
    if payment.installments == Some(0) {
        return Err(UpayError::invalid_input(
            "installments",
            "must be at least 1",
        ));
    }
    Ok(())
}
