//! # PayPal Order
//!
//! The subset of the PayPal Orders v2 resource needed to make a 3-D Secure
//! decision. Unknown fields are ignored so full API responses deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use threeds_core::{
    AuthenticationOutcome, Decision, LiabilityShiftEvaluator, ThreeDsError, ThreeDsResult,
};
use tracing::instrument;

/// A PayPal order as returned by `GET /v2/checkout/orders/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: String,

    /// `CREATED`, `APPROVED`, `COMPLETED`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// `CAPTURE` or `AUTHORIZE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_source: Option<PaymentSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardSource>,
}

/// Card payment source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_digits: Option<String>,

    /// `CREDIT`, `DEBIT`, `PREPAID`, `UNKNOWN`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_result: Option<AuthenticationResult>,
}

/// `payment_source.card.authentication_result`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthenticationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liability_shift: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub three_d_secure: Option<ThreeDSecureResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreeDSecureResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_status: Option<String>,
}

impl AuthenticationResult {
    /// Convert to the evaluator's input; missing fields become `Unset`
    pub fn outcome(&self) -> AuthenticationOutcome {
        let three_ds = self.three_d_secure.as_ref();

        AuthenticationOutcome::from_codes(
            self.liability_shift.as_deref().unwrap_or(""),
            three_ds
                .and_then(|t| t.enrollment_status.as_deref())
                .unwrap_or(""),
            three_ds
                .and_then(|t| t.authentication_status.as_deref())
                .unwrap_or(""),
        )
    }
}

impl Order {
    /// Parse an order from a raw API response body
    pub fn from_json(payload: &[u8]) -> ThreeDsResult<Self> {
        serde_json::from_slice(payload).map_err(|e| ThreeDsError::OrderParse(e.to_string()))
    }

    /// Parse an order from an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> ThreeDsResult<Self> {
        serde_json::from_value(value).map_err(|e| ThreeDsError::OrderParse(e.to_string()))
    }

    /// Card payment source, if the order was paid by card
    pub fn card(&self) -> Option<&CardSource> {
        self.payment_source.as_ref()?.card.as_ref()
    }

    /// 3-D Secure outcome of the card payment.
    ///
    /// `None` when the order has no card source, the card has no brand, or
    /// no authentication result was attached.
    pub fn authentication_outcome(&self) -> Option<AuthenticationOutcome> {
        let card = self.card()?;

        if card.brand.as_deref().map_or(true, str::is_empty) {
            return None;
        }

        card.authentication_result
            .as_ref()
            .map(AuthenticationResult::outcome)
    }
}

/// Evaluate the 3-D Secure outcome carried by a PayPal order
#[instrument(skip_all, fields(order_id = %order.id))]
pub fn evaluate_order(evaluator: &LiabilityShiftEvaluator, order: &Order) -> Decision {
    evaluator.evaluate(order.authentication_outcome().as_ref())
}
