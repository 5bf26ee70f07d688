//! # 3-D Secure Configuration
//!
//! Merchant-side settings for card payments: which 3-D Secure contingency to
//! request when creating orders, and what to do when the evaluator cannot
//! decide. Loaded from environment variables or a TOML file.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use threeds_core::{Decision, ThreeDsError, ThreeDsResult};

pub const DEFAULT_DECLINE_MESSAGE: &str =
    "Unfortunately, we can't accept your card. Please choose a different payment method.";
pub const DEFAULT_RETRY_MESSAGE: &str = "Something went wrong. Please try again.";

/// When PayPal should run a 3-D Secure challenge for card payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ThreeDsContingency {
    /// Challenge only when the issuer or regulation requires it
    #[serde(rename = "SCA_WHEN_REQUIRED")]
    ScaWhenRequired,
    /// Always challenge
    #[serde(rename = "SCA_ALWAYS")]
    ScaAlways,
    /// Never request a challenge
    #[serde(rename = "NO_3D_SECURE")]
    No3dSecure,
}

impl ThreeDsContingency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreeDsContingency::ScaWhenRequired => "SCA_WHEN_REQUIRED",
            ThreeDsContingency::ScaAlways => "SCA_ALWAYS",
            ThreeDsContingency::No3dSecure => "NO_3D_SECURE",
        }
    }

    pub fn parse(value: &str) -> ThreeDsResult<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SCA_WHEN_REQUIRED" => Ok(ThreeDsContingency::ScaWhenRequired),
            "SCA_ALWAYS" => Ok(ThreeDsContingency::ScaAlways),
            "NO_3D_SECURE" => Ok(ThreeDsContingency::No3dSecure),
            other => Err(ThreeDsError::Configuration(format!(
                "unknown 3DS contingency: {}",
                other
            ))),
        }
    }

    /// `attributes` fragment for a card payment source when creating an order.
    /// `None` when no verification should be requested.
    pub fn verification_attributes(&self) -> Option<Value> {
        match self {
            ThreeDsContingency::No3dSecure => None,
            method => Some(json!({
                "verification": {
                    "method": method.as_str()
                }
            })),
        }
    }
}

impl Default for ThreeDsContingency {
    fn default() -> Self {
        ThreeDsContingency::ScaWhenRequired
    }
}

impl TryFrom<String> for ThreeDsContingency {
    type Error = ThreeDsError;

    fn try_from(value: String) -> ThreeDsResult<Self> {
        Self::parse(&value)
    }
}

/// Fallback when the evaluator returns `NO_DECISION`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum NoDecisionPolicy {
    /// Do not block checkout
    Proceed,
    Reject,
    Retry,
}

impl NoDecisionPolicy {
    pub fn parse(value: &str) -> ThreeDsResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "proceed" => Ok(NoDecisionPolicy::Proceed),
            "reject" => Ok(NoDecisionPolicy::Reject),
            "retry" => Ok(NoDecisionPolicy::Retry),
            other => Err(ThreeDsError::Configuration(format!(
                "unknown no-decision policy: {}",
                other
            ))),
        }
    }

    pub fn as_decision(&self) -> Decision {
        match self {
            NoDecisionPolicy::Proceed => Decision::Proceed,
            NoDecisionPolicy::Reject => Decision::Reject,
            NoDecisionPolicy::Retry => Decision::Retry,
        }
    }
}

impl Default for NoDecisionPolicy {
    fn default() -> Self {
        NoDecisionPolicy::Proceed
    }
}

impl TryFrom<String> for NoDecisionPolicy {
    type Error = ThreeDsError;

    fn try_from(value: String) -> ThreeDsResult<Self> {
        Self::parse(&value)
    }
}

/// 3-D Secure settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreeDsConfig {
    /// Contingency requested when creating card orders
    pub contingency: ThreeDsContingency,

    /// What to do when no decision could be made
    pub no_decision_policy: NoDecisionPolicy,

    /// Shown to the buyer when the card is declined
    pub decline_message: String,

    /// Shown to the buyer when authentication should be retried
    pub retry_message: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    three_d_secure: ThreeDsConfig,
}

impl ThreeDsConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `PAYPAL_3DS_CONTINGENCY` (`SCA_WHEN_REQUIRED`, `SCA_ALWAYS`, `NO_3D_SECURE`)
    /// - `PAYPAL_3DS_NO_DECISION_POLICY` (`proceed`, `reject`, `retry`)
    /// - `PAYPAL_3DS_DECLINE_MESSAGE`
    /// - `PAYPAL_3DS_RETRY_MESSAGE`
    pub fn from_env() -> ThreeDsResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ThreeDsConfig::from_env`], reading values through `lookup`
    pub fn from_lookup<F>(lookup: F) -> ThreeDsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let setting = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = setting("PAYPAL_3DS_CONTINGENCY") {
            config.contingency = ThreeDsContingency::parse(&value)?;
        }

        if let Some(value) = setting("PAYPAL_3DS_NO_DECISION_POLICY") {
            config.no_decision_policy = NoDecisionPolicy::parse(&value)?;
        }

        if let Some(message) = setting("PAYPAL_3DS_DECLINE_MESSAGE") {
            config.decline_message = message;
        }

        if let Some(message) = setting("PAYPAL_3DS_RETRY_MESSAGE") {
            config.retry_message = message;
        }

        Ok(config)
    }

    /// Parse the `[three_d_secure]` table of a TOML document
    pub fn from_toml_str(content: &str) -> ThreeDsResult<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| ThreeDsError::Configuration(format!("invalid 3DS config: {}", e)))?;
        Ok(file.three_d_secure)
    }

    /// Verification `attributes` for card orders under the configured contingency
    pub fn verification_attributes(&self) -> Option<Value> {
        self.contingency.verification_attributes()
    }

    /// Builder: set contingency
    pub fn with_contingency(mut self, contingency: ThreeDsContingency) -> Self {
        self.contingency = contingency;
        self
    }

    /// Builder: set no-decision policy
    pub fn with_no_decision_policy(mut self, policy: NoDecisionPolicy) -> Self {
        self.no_decision_policy = policy;
        self
    }
}

impl Default for ThreeDsConfig {
    fn default() -> Self {
        Self {
            contingency: ThreeDsContingency::default(),
            no_decision_policy: NoDecisionPolicy::default(),
            decline_message: DEFAULT_DECLINE_MESSAGE.to_string(),
            retry_message: DEFAULT_RETRY_MESSAGE.to_string(),
        }
    }
}
