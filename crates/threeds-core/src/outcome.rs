//! # Authentication Outcome
//!
//! The three fields of a card's 3-D Secure authentication result, parsed from
//! the processor's wire codes.
//!
//! Each field distinguishes an absent value (`Unset`) from a present value the
//! processor sent but this crate does not know (`Unrecognized`). The no-shift
//! decision rules depend on that difference.

use serde::{Deserialize, Serialize};

/// Who bears fraud liability after authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiabilityShift {
    /// Liability shifted to the issuer
    Possible,
    /// Liability stays with the merchant
    No,
    /// Authentication outcome is ambiguous
    Unknown,
    /// A value was sent that is not one of the above
    Unrecognized,
    /// No value was sent
    Unset,
}

impl LiabilityShift {
    pub const ALL: [LiabilityShift; 5] = [
        LiabilityShift::Possible,
        LiabilityShift::No,
        LiabilityShift::Unknown,
        LiabilityShift::Unrecognized,
        LiabilityShift::Unset,
    ];

    /// Parse a wire code (`POSSIBLE`, `NO`, `UNKNOWN`)
    pub fn from_code(code: &str) -> Self {
        match code {
            "" => LiabilityShift::Unset,
            "POSSIBLE" => LiabilityShift::Possible,
            "NO" => LiabilityShift::No,
            "UNKNOWN" => LiabilityShift::Unknown,
            _ => LiabilityShift::Unrecognized,
        }
    }

    /// Wire code, if this variant has one
    pub fn as_code(&self) -> Option<&'static str> {
        match self {
            LiabilityShift::Possible => Some("POSSIBLE"),
            LiabilityShift::No => Some("NO"),
            LiabilityShift::Unknown => Some("UNKNOWN"),
            LiabilityShift::Unrecognized | LiabilityShift::Unset => None,
        }
    }
}

impl Default for LiabilityShift {
    fn default() -> Self {
        LiabilityShift::Unset
    }
}

/// Whether the card is enrolled in 3-D Secure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    /// `Y`: card is enrolled
    Yes,
    /// `N`: card is not enrolled
    No,
    /// `U`: 3-D Secure is unavailable for this card
    Unavailable,
    /// `B`: issuer bypassed the challenge
    Bypass,
    Unrecognized,
    Unset,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 6] = [
        EnrollmentStatus::Yes,
        EnrollmentStatus::No,
        EnrollmentStatus::Unavailable,
        EnrollmentStatus::Bypass,
        EnrollmentStatus::Unrecognized,
        EnrollmentStatus::Unset,
    ];

    pub fn from_code(code: &str) -> Self {
        match code {
            "" => EnrollmentStatus::Unset,
            "Y" => EnrollmentStatus::Yes,
            "N" => EnrollmentStatus::No,
            "U" => EnrollmentStatus::Unavailable,
            "B" => EnrollmentStatus::Bypass,
            _ => EnrollmentStatus::Unrecognized,
        }
    }

    pub fn as_code(&self) -> Option<&'static str> {
        match self {
            EnrollmentStatus::Yes => Some("Y"),
            EnrollmentStatus::No => Some("N"),
            EnrollmentStatus::Unavailable => Some("U"),
            EnrollmentStatus::Bypass => Some("B"),
            EnrollmentStatus::Unrecognized | EnrollmentStatus::Unset => None,
        }
    }
}

impl Default for EnrollmentStatus {
    fn default() -> Self {
        EnrollmentStatus::Unset
    }
}

/// Outcome of the 3-D Secure challenge, when one took place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationStatus {
    /// `Y`: successful authentication
    Yes,
    /// `N`: failed authentication
    No,
    /// `R`: issuer rejected the attempt
    Rejected,
    /// `A`: attempted, proof generated
    Attempted,
    /// `U`: unable to complete authentication
    Unable,
    /// `C`: challenge required
    ChallengeRequired,
    /// `I`: informational only
    Info,
    /// `D`: decoupled authentication
    Decoupled,
    Unrecognized,
    Unset,
}

impl AuthenticationStatus {
    pub const ALL: [AuthenticationStatus; 10] = [
        AuthenticationStatus::Yes,
        AuthenticationStatus::No,
        AuthenticationStatus::Rejected,
        AuthenticationStatus::Attempted,
        AuthenticationStatus::Unable,
        AuthenticationStatus::ChallengeRequired,
        AuthenticationStatus::Info,
        AuthenticationStatus::Decoupled,
        AuthenticationStatus::Unrecognized,
        AuthenticationStatus::Unset,
    ];

    pub fn from_code(code: &str) -> Self {
        match code {
            "" => AuthenticationStatus::Unset,
            "Y" => AuthenticationStatus::Yes,
            "N" => AuthenticationStatus::No,
            "R" => AuthenticationStatus::Rejected,
            "A" => AuthenticationStatus::Attempted,
            "U" => AuthenticationStatus::Unable,
            "C" => AuthenticationStatus::ChallengeRequired,
            "I" => AuthenticationStatus::Info,
            "D" => AuthenticationStatus::Decoupled,
            _ => AuthenticationStatus::Unrecognized,
        }
    }

    pub fn as_code(&self) -> Option<&'static str> {
        match self {
            AuthenticationStatus::Yes => Some("Y"),
            AuthenticationStatus::No => Some("N"),
            AuthenticationStatus::Rejected => Some("R"),
            AuthenticationStatus::Attempted => Some("A"),
            AuthenticationStatus::Unable => Some("U"),
            AuthenticationStatus::ChallengeRequired => Some("C"),
            AuthenticationStatus::Info => Some("I"),
            AuthenticationStatus::Decoupled => Some("D"),
            AuthenticationStatus::Unrecognized | AuthenticationStatus::Unset => None,
        }
    }
}

impl Default for AuthenticationStatus {
    fn default() -> Self {
        AuthenticationStatus::Unset
    }
}

/// A card payment's 3-D Secure authentication result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AuthenticationOutcome {
    pub liability_shift: LiabilityShift,
    pub enrollment_status: EnrollmentStatus,
    pub authentication_status: AuthenticationStatus,
}

impl AuthenticationOutcome {
    pub fn new(
        liability_shift: LiabilityShift,
        enrollment_status: EnrollmentStatus,
        authentication_status: AuthenticationStatus,
    ) -> Self {
        Self {
            liability_shift,
            enrollment_status,
            authentication_status,
        }
    }

    /// Build from raw wire codes; empty strings are treated as absent
    pub fn from_codes(
        liability_shift: &str,
        enrollment_status: &str,
        authentication_status: &str,
    ) -> Self {
        Self::new(
            LiabilityShift::from_code(liability_shift),
            EnrollmentStatus::from_code(enrollment_status),
            AuthenticationStatus::from_code(authentication_status),
        )
    }

    /// True when the processor reported any authentication status at all
    pub fn has_authentication_status(&self) -> bool {
        self.authentication_status != AuthenticationStatus::Unset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_codes() {
        let outcome = AuthenticationOutcome::from_codes("NO", "B", "");
        assert_eq!(outcome.liability_shift, LiabilityShift::No);
        assert_eq!(outcome.enrollment_status, EnrollmentStatus::Bypass);
        assert_eq!(outcome.authentication_status, AuthenticationStatus::Unset);
        assert!(!outcome.has_authentication_status());
    }

    #[test]
    fn test_empty_vs_unrecognized() {
        assert_eq!(LiabilityShift::from_code(""), LiabilityShift::Unset);
        assert_eq!(LiabilityShift::from_code("YES"), LiabilityShift::Unrecognized);
        assert_eq!(EnrollmentStatus::from_code("X"), EnrollmentStatus::Unrecognized);
        assert_eq!(
            AuthenticationStatus::from_code("Z"),
            AuthenticationStatus::Unrecognized
        );

        let outcome = AuthenticationOutcome::from_codes("NO", "Y", "Z");
        assert!(outcome.has_authentication_status());
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert_eq!(LiabilityShift::from_code("possible"), LiabilityShift::Unrecognized);
        assert_eq!(EnrollmentStatus::from_code("b"), EnrollmentStatus::Unrecognized);
    }

    #[test]
    fn test_every_code_parses_back() {
        for status in AuthenticationStatus::ALL {
            if let Some(code) = status.as_code() {
                assert_eq!(AuthenticationStatus::from_code(code), status);
            }
        }
        for status in EnrollmentStatus::ALL {
            if let Some(code) = status.as_code() {
                assert_eq!(EnrollmentStatus::from_code(code), status);
            }
        }
    }

    #[test]
    fn test_default_is_unset() {
        let outcome = AuthenticationOutcome::default();
        assert_eq!(outcome.liability_shift, LiabilityShift::Unset);
        assert_eq!(outcome.enrollment_status, EnrollmentStatus::Unset);
        assert_eq!(outcome.authentication_status, AuthenticationStatus::Unset);
    }

    #[test]
    fn test_serializes_variant_names() {
        let outcome = AuthenticationOutcome::from_codes("NO", "U", "C");
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["liability_shift"], "NO");
        assert_eq!(json["enrollment_status"], "UNAVAILABLE");
        assert_eq!(json["authentication_status"], "CHALLENGE_REQUIRED");
    }
}
