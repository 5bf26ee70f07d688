//! # Decision
//!
//! What the caller should do with an order after 3-D Secure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directive returned by the liability-shift evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Capture or complete the order
    Proceed,
    /// Decline the order
    Reject,
    /// Ask the buyer to authenticate again
    Retry,
    /// Not enough information; caller applies its own default policy
    NoDecision,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Proceed => "PROCEED",
            Decision::Reject => "REJECT",
            Decision::Retry => "RETRY",
            Decision::NoDecision => "NO_DECISION",
        }
    }

    /// True for the three directives the evaluator is confident about
    pub fn is_decided(&self) -> bool {
        !matches!(self, Decision::NoDecision)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
