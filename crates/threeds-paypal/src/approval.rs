//! # Order Approval
//!
//! Turns a 3-D Secure decision into what the shop does with the order:
//! capture it, decline the card, or send the buyer back through the
//! authentication challenge.

use crate::config::ThreeDsConfig;
use crate::order::{evaluate_order, Order};
use serde::Serialize;
use threeds_core::{Decision, LiabilityShiftEvaluator, ThreeDsError, ThreeDsResult};
use tracing::{debug, info, instrument, warn};

/// What to do with an approved PayPal order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OrderAction {
    /// Capture or authorize the order
    Capture,
    /// Refuse the card; `reason` is shown to the buyer
    Decline { reason: String },
    /// Restart the card challenge; `reason` is shown to the buyer
    Reauthenticate { reason: String },
}

/// Evaluates orders and maps decisions to actions
#[derive(Clone)]
pub struct OrderApprover {
    evaluator: LiabilityShiftEvaluator,
    config: ThreeDsConfig,
}

impl OrderApprover {
    pub fn new(evaluator: LiabilityShiftEvaluator, config: ThreeDsConfig) -> Self {
        Self { evaluator, config }
    }

    /// Create from environment variables with the default tracing audit sink
    pub fn from_env() -> ThreeDsResult<Self> {
        let config = ThreeDsConfig::from_env()?;
        Ok(Self::new(LiabilityShiftEvaluator::default(), config))
    }

    /// Map a decision to an action. `NO_DECISION` follows the configured policy.
    pub fn action_for(&self, decision: Decision) -> OrderAction {
        let decision = if decision.is_decided() {
            decision
        } else {
            debug!(policy = ?self.config.no_decision_policy, "Applying no-decision policy");
            self.config.no_decision_policy.as_decision()
        };

        match decision {
            Decision::Proceed | Decision::NoDecision => OrderAction::Capture,
            Decision::Reject => OrderAction::Decline {
                reason: self.config.decline_message.clone(),
            },
            Decision::Retry => OrderAction::Reauthenticate {
                reason: self.config.retry_message.clone(),
            },
        }
    }

    /// Evaluate an order's 3-D Secure outcome and decide what to do with it
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub fn approve(&self, order: &Order) -> ThreeDsResult<OrderAction> {
        if order.id.is_empty() {
            return Err(ThreeDsError::InvalidOrder("order has no id".to_string()));
        }

        let decision = evaluate_order(&self.evaluator, order);
        let action = self.action_for(decision);

        info!(%decision, ?action, "3DS approval");
        Ok(action)
    }

    /// Like [`OrderApprover::approve`], but only succeeds when the order may
    /// be captured. Returns the order id.
    pub fn approve_or_err(&self, order: &Order) -> ThreeDsResult<String> {
        match self.approve(order)? {
            OrderAction::Capture => Ok(order.id.clone()),
            OrderAction::Decline { reason } => Err(ThreeDsError::CardDeclined { reason }),
            OrderAction::Reauthenticate { reason } => {
                Err(ThreeDsError::AuthenticationIncomplete { reason })
            }
        }
    }
}

/// Order action handler trait
///
/// Implement this trait to act on approval outcomes.
#[allow(unused_variables)]
pub trait DecisionHandler: Send + Sync {
    /// Called when the order may be captured
    fn on_capture(&self, order_id: &str) -> ThreeDsResult<()> {
        info!("Capturing order: {}", order_id);
        Ok(())
    }

    /// Called when the card was declined
    fn on_decline(&self, order_id: &str, reason: &str) -> ThreeDsResult<()> {
        warn!("Card declined for order {}: {}", order_id, reason);
        Ok(())
    }

    /// Called when the buyer has to authenticate again
    fn on_reauthenticate(&self, order_id: &str, reason: &str) -> ThreeDsResult<()> {
        info!("Reauthentication required for order {}: {}", order_id, reason);
        Ok(())
    }
}

/// Default handler (just logs actions)
pub struct LoggingDecisionHandler;

impl DecisionHandler for LoggingDecisionHandler {}

/// Dispatch an order action to the appropriate handler method
pub fn dispatch_action(
    handler: &dyn DecisionHandler,
    order_id: &str,
    action: OrderAction,
) -> ThreeDsResult<()> {
    match action {
        OrderAction::Capture => handler.on_capture(order_id),
        OrderAction::Decline { reason } => handler.on_decline(order_id, &reason),
        OrderAction::Reauthenticate { reason } => handler.on_reauthenticate(order_id, &reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NoDecisionPolicy, DEFAULT_DECLINE_MESSAGE, DEFAULT_RETRY_MESSAGE};
    use serde_json::json;
    use std::sync::Mutex;

    fn order(shift: &str, enrollment: &str, auth: &str) -> Order {
        Order::from_value(json!({
            "id": "8MC585209K746392H",
            "status": "APPROVED",
            "payment_source": {
                "card": {
                    "brand": "VISA",
                    "last_digits": "4242",
                    "authentication_result": {
                        "liability_shift": shift,
                        "three_d_secure": {
                            "enrollment_status": enrollment,
                            "authentication_status": auth
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    fn approver() -> OrderApprover {
        OrderApprover::new(LiabilityShiftEvaluator::default(), ThreeDsConfig::default())
    }

    #[test]
    fn test_action_for_decisions() {
        let approver = approver();

        assert_eq!(approver.action_for(Decision::Proceed), OrderAction::Capture);
        assert_eq!(
            approver.action_for(Decision::Reject),
            OrderAction::Decline {
                reason: DEFAULT_DECLINE_MESSAGE.to_string()
            }
        );
        assert_eq!(
            approver.action_for(Decision::Retry),
            OrderAction::Reauthenticate {
                reason: DEFAULT_RETRY_MESSAGE.to_string()
            }
        );
        assert_eq!(approver.action_for(Decision::NoDecision), OrderAction::Capture);
    }

    #[test]
    fn test_no_decision_policy() {
        let config = ThreeDsConfig::default().with_no_decision_policy(NoDecisionPolicy::Retry);
        let approver = OrderApprover::new(LiabilityShiftEvaluator::default(), config);

        assert!(matches!(
            approver.action_for(Decision::NoDecision),
            OrderAction::Reauthenticate { .. }
        ));
        assert_eq!(approver.action_for(Decision::Proceed), OrderAction::Capture);

        let config = ThreeDsConfig::default().with_no_decision_policy(NoDecisionPolicy::Reject);
        let approver = OrderApprover::new(LiabilityShiftEvaluator::default(), config);
        assert!(matches!(
            approver.action_for(Decision::NoDecision),
            OrderAction::Decline { .. }
        ));
        assert!(matches!(
            approver.approve(&order("NO", "Y", "A")).unwrap(),
            OrderAction::Decline { .. }
        ));
    }

    #[test]
    fn test_approve_orders() {
        let approver = approver();

        assert_eq!(
            approver.approve(&order("POSSIBLE", "Y", "Y")).unwrap(),
            OrderAction::Capture
        );
        assert!(matches!(
            approver.approve(&order("NO", "Y", "N")).unwrap(),
            OrderAction::Decline { .. }
        ));
        assert!(matches!(
            approver.approve(&order("UNKNOWN", "", "")).unwrap(),
            OrderAction::Reauthenticate { .. }
        ));
        // Successful challenge without shift falls back to the policy
        assert_eq!(
            approver.approve(&order("NO", "Y", "Y")).unwrap(),
            OrderAction::Capture
        );
    }

    #[test]
    fn test_approve_requires_order_id() {
        let order = Order::from_value(json!({ "status": "APPROVED" })).unwrap();
        let result = approver().approve(&order);
        assert!(matches!(result, Err(ThreeDsError::InvalidOrder(_))));
    }

    #[test]
    fn test_approve_or_err() {
        let approver = approver();

        assert_eq!(
            approver.approve_or_err(&order("NO", "B", "")).unwrap(),
            "8MC585209K746392H"
        );

        let err = approver.approve_or_err(&order("NO", "B", "R")).unwrap_err();
        assert!(matches!(err, ThreeDsError::CardDeclined { .. }));
        assert_eq!(err.status_code(), 402);

        let err = approver.approve_or_err(&order("NO", "Y", "")).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_value(OrderAction::Decline {
            reason: "no".to_string(),
        })
        .unwrap();
        assert_eq!(json, json!({ "action": "decline", "reason": "no" }));
    }

    #[test]
    fn test_dispatch_action() {
        #[derive(Default)]
        struct TestHandler {
            calls: Mutex<Vec<String>>,
        }

        impl DecisionHandler for TestHandler {
            fn on_capture(&self, order_id: &str) -> ThreeDsResult<()> {
                self.calls.lock().unwrap().push(format!("capture:{order_id}"));
                Ok(())
            }

            fn on_decline(&self, order_id: &str, _reason: &str) -> ThreeDsResult<()> {
                self.calls.lock().unwrap().push(format!("decline:{order_id}"));
                Ok(())
            }
        }

        let handler = TestHandler::default();
        dispatch_action(&handler, "A", OrderAction::Capture).unwrap();
        dispatch_action(
            &handler,
            "B",
            OrderAction::Decline {
                reason: "rejected".to_string(),
            },
        )
        .unwrap();
        dispatch_action(
            &handler,
            "C",
            OrderAction::Reauthenticate {
                reason: "retry".to_string(),
            },
        )
        .unwrap();

        assert_eq!(
            *handler.calls.lock().unwrap(),
            vec!["capture:A".to_string(), "decline:B".to_string()]
        );
    }

    #[test]
    fn test_logging_handler() {
        dispatch_action(&LoggingDecisionHandler, "A", OrderAction::Capture).unwrap();
    }
}
