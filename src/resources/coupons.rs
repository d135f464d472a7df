//! Coupon validation

use crate::http::{HttpClient, COUPON_VALIDATE_PATH};
use crate::normalize::normalize_coupon;
use crate::types::{CouponValidation, ValidateCouponRequest};
use crate::validation::{require_non_empty, validate_amount_cents};
use crate::Result;

/// Coupon operations
#[derive(Debug, Clone, Copy)]
pub struct Coupons<'a> {
    http: &'a HttpClient,
}

impl<'a> Coupons<'a> {
    /// Create a new coupon facade
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Check a coupon code against an amount
    ///
    /// Calls the public endpoint without credentials. The code is trimmed
    /// before it is sent.
    pub async fn validate(&self, request: &ValidateCouponRequest) -> Result<CouponValidation> {
        require_non_empty("code", &request.code)?;
        validate_amount_cents("amount_cents", request.amount_cents)?;

        let body = ValidateCouponRequest {
            code: request.code.trim().to_string(),
            amount_cents: request.amount_cents,
            product_ids: request.product_ids.clone(),
        };

        let response = self.http.post_public(COUPON_VALIDATE_PATH, &body).await?;
        normalize_coupon(&response, request.amount_cents)
    }
}
