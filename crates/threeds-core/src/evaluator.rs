//! # Liability-Shift Evaluator
//!
//! Maps a card payment's 3-D Secure outcome to a [`Decision`].
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ evaluate(outcome)                                          │
//! │  ├── no outcome ............................ NO_DECISION   │
//! │  ├── liability_shift POSSIBLE .............. PROCEED       │
//! │  ├── liability_shift UNKNOWN ............... RETRY         │
//! │  ├── liability_shift NO .................... no-shift table│
//! │  └── anything else ......................... NO_DECISION   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every outcome is handed to an [`AuditSink`] before the decision is made.
//! Sink failures are logged and dropped.

use crate::decision::Decision;
use crate::error::{ThreeDsError, ThreeDsResult};
use crate::outcome::{AuthenticationOutcome, AuthenticationStatus, EnrollmentStatus, LiabilityShift};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Receives every authentication outcome the evaluator sees.
pub trait AuditSink: Send + Sync {
    /// Record one outcome. Errors never affect the decision.
    fn record(&self, outcome: &AuthenticationOutcome) -> ThreeDsResult<()>;
}

/// Type alias for a shared audit sink (dynamic dispatch)
pub type BoxedAuditSink = Arc<dyn AuditSink>;

/// Default sink: emits the outcome as JSON at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, outcome: &AuthenticationOutcome) -> ThreeDsResult<()> {
        let json = serde_json::to_string(outcome)
            .map_err(|e| ThreeDsError::AuditSink(e.to_string()))?;
        info!(outcome = %json, "3DS authentication result");
        Ok(())
    }
}

/// Stateless evaluator with an injected audit sink
#[derive(Clone)]
pub struct LiabilityShiftEvaluator {
    audit: BoxedAuditSink,
}

impl LiabilityShiftEvaluator {
    pub fn new(audit: BoxedAuditSink) -> Self {
        Self { audit }
    }

    /// Decide how to continue with an order.
    ///
    /// `None` means the payment carried no 3-D Secure capable source, or the
    /// source had no brand or no authentication result.
    pub fn evaluate(&self, outcome: Option<&AuthenticationOutcome>) -> Decision {
        let Some(outcome) = outcome else {
            debug!("No 3DS authentication result present");
            return Decision::NoDecision;
        };

        if let Err(e) = self.audit.record(outcome) {
            warn!("Failed to record 3DS outcome: {}", e);
        }

        let decision = match outcome.liability_shift {
            LiabilityShift::Possible => Decision::Proceed,
            LiabilityShift::Unknown => Decision::Retry,
            LiabilityShift::No => no_liability_shift(outcome),
            LiabilityShift::Unrecognized | LiabilityShift::Unset => Decision::NoDecision,
        };

        debug!(%decision, "3DS decision");
        decision
    }
}

impl Default for LiabilityShiftEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(TracingAuditSink))
    }
}

/// Liability stayed with the merchant. Ordered: the enrollment rows only
/// apply while no authentication status was reported.
fn no_liability_shift(outcome: &AuthenticationOutcome) -> Decision {
    use AuthenticationStatus as Auth;

    let not_challenged = matches!(
        outcome.enrollment_status,
        EnrollmentStatus::Bypass | EnrollmentStatus::Unavailable | EnrollmentStatus::No
    );
    if not_challenged && !outcome.has_authentication_status() {
        return Decision::Proceed;
    }

    match outcome.authentication_status {
        Auth::Rejected | Auth::No => Decision::Reject,
        Auth::Unable | Auth::Unset => Decision::Retry,
        Auth::Yes
        | Auth::Attempted
        | Auth::ChallengeRequired
        | Auth::Info
        | Auth::Decoupled
        | Auth::Unrecognized => Decision::NoDecision,
    }
}
