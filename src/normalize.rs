//! Response envelope normalization
//!
//! The API wraps its payloads inconsistently: a list may arrive as
//! `{ "paymentLinks": [...], "pagination": {...} }` or `{ "data": [...] }`, and a
//! single entity as `{ "paymentLink": {...} }`, `{ "data": {...} }` or bare.
//! [`list_shape`] and [`entity_shape`] classify a body into one of the known
//! [`EnvelopeShape`]s, and the `normalize_*` functions unwrap it accordingly.

use crate::types::{CouponValidation, Page, Pagination};
use crate::{Result, UpayError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;

/// Resource families with their own envelope keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    PaymentLink,
    Transaction,
    Product,
    Client,
}

impl ResourceKind {
    /// Key holding a list of this resource
    pub fn collection_key(&self) -> &'static str {
        match self {
            ResourceKind::PaymentLink => "paymentLinks",
            ResourceKind::Transaction => "transactions",
            ResourceKind::Product => "products",
            ResourceKind::Client => "clients",
        }
    }

    /// Key holding a single instance of this resource
    pub fn entity_key(&self) -> &'static str {
        match self {
            ResourceKind::PaymentLink => "paymentLink",
            ResourceKind::Transaction => "transaction",
            ResourceKind::Product => "product",
            ResourceKind::Client => "client",
        }
    }
}

/// Known envelope layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// Payload under the resource-specific key
    Resource,
    /// Payload under the generic `data` key
    Data,
    /// Neither key is present
    Bare,
}

const DATA_KEY: &str = "data";
const PAGINATION_KEY: &str = "pagination";

fn present<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

fn shape_for(body: &Value, key: &str) -> EnvelopeShape {
    if present(body, key).is_some() {
        EnvelopeShape::Resource
    } else if present(body, DATA_KEY).is_some() {
        EnvelopeShape::Data
    } else {
        EnvelopeShape::Bare
    }
}

/// Classify a list response
pub fn list_shape(body: &Value, kind: ResourceKind) -> EnvelopeShape {
    shape_for(body, kind.collection_key())
}

/// Classify a single-entity response
pub fn entity_shape(body: &Value, kind: ResourceKind) -> EnvelopeShape {
    shape_for(body, kind.entity_key())
}

/// Unwrap a list response into a [`Page`]
///
/// Items come from the resource key, then `data`, else an empty list. Missing
/// pagination becomes `{ total: 0, page: 1, limit: 10 }`.
pub fn normalize_list<T: DeserializeOwned>(mut body: Value, kind: ResourceKind) -> Result<Page<T>> {
    let shape = list_shape(&body, kind);

    let pagination = match present(&body, PAGINATION_KEY) {
        Some(p) => serde_json::from_value(p.clone())?,
        None => Pagination::default(),
    };

    let items = match shape {
        EnvelopeShape::Resource => take(&mut body, kind.collection_key()),
        EnvelopeShape::Data => take(&mut body, DATA_KEY),
        EnvelopeShape::Bare => Value::Array(Vec::new()),
    };

    Ok(Page {
        data: serde_json::from_value(items)?,
        pagination,
    })
}

/// Unwrap a single-entity response
///
/// The entity comes from the resource key, then `data`, else the body itself.
pub fn normalize_entity<T: DeserializeOwned>(mut body: Value, kind: ResourceKind) -> Result<T> {
    let entity = match entity_shape(&body, kind) {
        EnvelopeShape::Resource => take(&mut body, kind.entity_key()),
        EnvelopeShape::Data => take(&mut body, DATA_KEY),
        EnvelopeShape::Bare => body,
    };
    Ok(serde_json::from_value(entity)?)
}

fn take(body: &mut Value, key: &str) -> Value {
    body.get_mut(key).map(Value::take).unwrap_or(Value::Null)
}

/// Map the public coupon endpoint's response onto [`CouponValidation`]
///
/// `discountAmount` becomes `discount_cents` (default 0), `finalAmount` becomes
/// `final_amount_cents` (default `requested_cents`), `coupon.discountPercentage`
/// becomes `discount_percentage`, and `error` or else `message` becomes `message`.
/// Defaults apply only when a key is missing or `null`; see [`amount_field`] for
/// the accepted amount encodings.
pub fn normalize_coupon(body: &Value, requested_cents: u64) -> Result<CouponValidation> {
    let valid = body.get("valid").and_then(Value::as_bool).unwrap_or(false);

    let discount_cents = amount_field(body, "discountAmount")?.unwrap_or(0);
    let final_amount_cents = amount_field(body, "finalAmount")?.unwrap_or(requested_cents);

    let discount_percentage = body
        .get("coupon")
        .and_then(|c| present(c, "discountPercentage"))
        .map(|v| serde_json::from_value::<Decimal>(v.clone()))
        .transpose()?;

    let message = ["error", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string);

    Ok(CouponValidation {
        valid,
        discount_cents,
        discount_percentage,
        final_amount_cents,
        message,
    })
}

/// Read an amount in minor units, `None` when the key is missing or `null`
///
/// Integers, floats and numeric strings are accepted. Fractional amounts are
/// rounded half away from zero to whole cents. Negative or non-numeric values
/// are an error.
pub fn amount_field(body: &Value, key: &str) -> Result<Option<u64>> {
    let Some(value) = present(body, key) else {
        return Ok(None);
    };

    if let Some(cents) = value.as_u64() {
        return Ok(Some(cents));
    }

    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(invalid_amount(key, value)),
    };

    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid_amount(key, value))?;

    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .map(Some)
        .ok_or_else(|| invalid_amount(key, value))
}

fn invalid_amount(key: &str, value: &Value) -> UpayError {
    UpayError::Json(serde::de::Error::custom(format!(
        "{}: expected a non-negative amount, got {}",
        key, value
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentLink;
    use serde_json::json;

    #[test]
    fn test_list_with_resource_key() {
        let items = json!([{ "id": "pl_1" }, { "id": "pl_2" }]);
        let pagination = json!({ "page": 2, "limit": 2, "total": 7, "totalPages": 4 });
        let body = json!({
            "message": "ok",
            "paymentLinks": items.clone(),
            "pagination": pagination.clone()
        });

        let page: Page<Value> = normalize_list(body, ResourceKind::PaymentLink).unwrap();

        assert_eq!(Value::Array(page.data), items);
        assert_eq!(serde_json::to_value(&page.pagination).unwrap(), pagination);
    }

    #[test]
    fn test_list_empty_object() {
        let page: Page<Value> = normalize_list(json!({}), ResourceKind::PaymentLink).unwrap();

        assert!(page.data.is_empty());
        assert_eq!(
            serde_json::to_value(&page.pagination).unwrap(),
            json!({ "total": 0, "page": 1, "limit": 10 })
        );
    }

    #[test]
    fn test_list_falls_back_to_data() {
        let body = json!({ "data": [{ "id": "c_1" }] });
        assert_eq!(list_shape(&body, ResourceKind::Client), EnvelopeShape::Data);

        let page: Page<Value> = normalize_list(body, ResourceKind::Client).unwrap();
        assert_eq!(page.data, vec![json!({ "id": "c_1" })]);
        assert_eq!(page.pagination, Pagination::default());
    }

    #[test]
    fn test_resource_key_wins_over_data() {
        let body = json!({ "products": [{ "id": "p_1" }], "data": [{ "id": "other" }] });
        assert_eq!(list_shape(&body, ResourceKind::Product), EnvelopeShape::Resource);

        let page: Page<Value> = normalize_list(body, ResourceKind::Product).unwrap();
        assert_eq!(page.data, vec![json!({ "id": "p_1" })]);
    }

    #[test]
    fn test_null_key_counts_as_absent() {
        let body = json!({ "transactions": null, "data": [{ "id": "tx_1" }] });
        assert_eq!(list_shape(&body, ResourceKind::Transaction), EnvelopeShape::Data);
    }

    #[test]
    fn test_list_typed_items() {
        let body = json!({ "paymentLinks": [{ "id": "pl_1", "slug": "a", "title": "Abc" }] });
        let page: Page<PaymentLink> = normalize_list(body, ResourceKind::PaymentLink).unwrap();
        assert_eq!(page.data[0].slug, "a");
    }

    #[test]
    fn test_entity_shapes() {
        let keyed = json!({ "message": "ok", "paymentLink": { "id": "pl_1" } });
        let data = json!({ "message": "created", "data": { "id": "pl_2" } });
        let bare = json!({ "id": "pl_3" });

        assert_eq!(entity_shape(&keyed, ResourceKind::PaymentLink), EnvelopeShape::Resource);
        assert_eq!(entity_shape(&data, ResourceKind::PaymentLink), EnvelopeShape::Data);
        assert_eq!(entity_shape(&bare, ResourceKind::PaymentLink), EnvelopeShape::Bare);

        let a: Value = normalize_entity(keyed, ResourceKind::PaymentLink).unwrap();
        let b: Value = normalize_entity(data, ResourceKind::PaymentLink).unwrap();
        let c: Value = normalize_entity(bare, ResourceKind::PaymentLink).unwrap();
        assert_eq!(a["id"], "pl_1");
        assert_eq!(b["id"], "pl_2");
        assert_eq!(c["id"], "pl_3");
    }

    #[test]
    fn test_coupon_normalization() {
        let body = json!({ "valid": true, "discountAmount": 500, "finalAmount": 9500 });
        let result = normalize_coupon(&body, 10_000).unwrap();

        assert_eq!(
            result,
            CouponValidation {
                valid: true,
                discount_cents: 500,
                discount_percentage: None,
                final_amount_cents: 9500,
                message: None,
            }
        );
    }

    #[test]
    fn test_coupon_defaults() {
        let result = normalize_coupon(&json!({ "message": "Coupon expired" }), 10_000).unwrap();

        assert!(!result.valid);
        assert_eq!(result.discount_cents, 0);
        assert_eq!(result.final_amount_cents, 10_000);
        assert_eq!(result.message.as_deref(), Some("Coupon expired"));
    }

    #[test]
    fn test_coupon_error_preferred_over_message() {
        let body = json!({
            "valid": false,
            "error": "Coupon not found",
            "message": "Validation failed",
            "coupon": { "discountPercentage": 15 }
        });
        let result = normalize_coupon(&body, 2_000).unwrap();

        assert_eq!(result.message.as_deref(), Some("Coupon not found"));
        assert_eq!(result.discount_percentage, Some(Decimal::from(15)));
    }

    #[test]
    fn test_coupon_fractional_amounts_round_to_cents() {
        let body = json!({ "valid": true, "discountAmount": 149.85, "finalAmount": 849.15 });
        let result = normalize_coupon(&body, 999).unwrap();

        assert_eq!(result.discount_cents, 150);
        assert_eq!(result.final_amount_cents, 849);
    }

    #[test]
    fn test_coupon_string_and_float_amounts() {
        let body = json!({ "valid": true, "discountAmount": "150", "finalAmount": 849.0 });
        let result = normalize_coupon(&body, 999).unwrap();

        assert_eq!(result.discount_cents, 150);
        assert_eq!(result.final_amount_cents, 849);
    }

    #[test]
    fn test_coupon_null_amounts_use_defaults() {
        let body = json!({ "valid": false, "discountAmount": null, "finalAmount": null });
        let result = normalize_coupon(&body, 999).unwrap();

        assert_eq!(result.discount_cents, 0);
        assert_eq!(result.final_amount_cents, 999);
    }

    #[test]
    fn test_coupon_malformed_amounts_are_errors() {
        for bad in [json!("abc"), json!(-5), json!(true), json!({ "cents": 1 })] {
            let body = json!({ "valid": true, "discountAmount": bad });
            let err = normalize_coupon(&body, 999).unwrap_err();
            assert!(
                err.to_string().contains("discountAmount"),
                "error MUST name the field - actual: {}",
                err
            );
        }
    }

    #[test]
    fn test_pagination_keeps_unknown_keys() {
        let pagination = json!({ "page": 1, "limit": 10, "total": 0, "hasMore": false });
        let body = json!({ "clients": [], "pagination": pagination.clone() });

        let page: Page<Value> = normalize_list(body, ResourceKind::Client).unwrap();

        assert_eq!(page.pagination.extra.get("hasMore"), Some(&json!(false)));
        assert_eq!(serde_json::to_value(&page.pagination).unwrap(), pagination);
    }
}
