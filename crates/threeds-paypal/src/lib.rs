//! # threeds-paypal
//!
//! PayPal Orders v2 adapter for 3-D Secure liability-shift decisions.
//!
//! This crate provides:
//!
//! 1. **Order** - deserializes PayPal order responses and extracts the card's
//!    3-D Secure authentication result
//! 2. **OrderApprover** - evaluates the result and maps it to an order action
//!    (capture, decline, reauthenticate)
//! 3. **ThreeDsConfig** - contingency and fallback settings from env or TOML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use threeds_paypal::{Order, OrderApprover, dispatch_action, LoggingDecisionHandler};
//!
//! // Create approver from environment
//! let approver = OrderApprover::from_env()?;
//!
//! // Body of GET /v2/checkout/orders/{id}
//! let order = Order::from_json(&body)?;
//!
//! let action = approver.approve(&order)?;
//! dispatch_action(&LoggingDecisionHandler, &order.id, action)?;
//! ```

pub mod approval;
pub mod config;
pub mod order;

// Re-exports
pub use approval::{dispatch_action, DecisionHandler, LoggingDecisionHandler, OrderAction, OrderApprover};
pub use config::{NoDecisionPolicy, ThreeDsConfig, ThreeDsContingency};
pub use order::{evaluate_order, AuthenticationResult, CardSource, Order, PaymentSource, ThreeDSecureResult};
