//! # threeds-core
//!
//! 3-D Secure liability-shift evaluation.
//!
//! This crate provides:
//! - `AuthenticationOutcome` and its enumerations, parsed from processor wire codes
//! - `Decision` for what to do with the order next
//! - `LiabilityShiftEvaluator`, a stateless decision table
//! - `AuditSink` for recording every outcome the evaluator sees
//! - `ThreeDsError` for typed error handling around the evaluator
//!
//! ## Example
//!
//! ```rust
//! use threeds_core::{AuthenticationOutcome, Decision, LiabilityShiftEvaluator};
//!
//! let evaluator = LiabilityShiftEvaluator::default();
//!
//! // Liability stayed with the merchant, card not enrolled, no challenge
//! let outcome = AuthenticationOutcome::from_codes("NO", "N", "");
//! assert_eq!(evaluator.evaluate(Some(&outcome)), Decision::Proceed);
//!
//! // Issuer rejected the challenge
//! let outcome = AuthenticationOutcome::from_codes("NO", "Y", "R");
//! assert_eq!(evaluator.evaluate(Some(&outcome)), Decision::Reject);
//! ```

pub mod decision;
pub mod error;
pub mod evaluator;
pub mod outcome;

// Re-exports for convenience
pub use decision::Decision;
pub use error::{ThreeDsError, ThreeDsResult};
pub use evaluator::{AuditSink, BoxedAuditSink, LiabilityShiftEvaluator, TracingAuditSink};
pub use outcome::{AuthenticationOutcome, AuthenticationStatus, EnrollmentStatus, LiabilityShift};
