//! The result of one saga step.

use serde::{Deserialize, Serialize};

/// Outcome of a payment, inventory, or refund step.
///
/// Success carries the gateway's reference id; failure carries a
/// human-readable reason suitable for customer-facing messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum StepOutcome {
    #[serde(rename = "success", rename_all = "camelCase")]
    Success { reference_id: String },
    #[serde(rename = "failed")]
    Failure { reason: String },
}

impl StepOutcome {
    /// A successful outcome with the given reference id.
    pub fn success(reference_id: impl Into<String>) -> Self {
        Self::Success {
            reference_id: reference_id.into(),
        }
    }

    /// A failed outcome with the given reason.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The reference id, if the step succeeded.
    pub fn reference_id(&self) -> Option<&str> {
        match self {
            Self::Success { reference_id } => Some(reference_id),
            Self::Failure { .. } => None,
        }
    }

    /// The failure reason, if the step failed.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_exposes_reference() {
        let outcome = StepOutcome::success("PAY-123456");
        assert!(outcome.is_success());
        assert_eq!(outcome.reference_id(), Some("PAY-123456"));
        assert_eq!(outcome.failure_reason(), None);
    }

    #[test]
    fn failure_exposes_reason() {
        let outcome = StepOutcome::failure("Payment declined");
        assert!(!outcome.is_success());
        assert_eq!(outcome.reference_id(), None);
        assert_eq!(outcome.failure_reason(), Some("Payment declined"));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let success = serde_json::to_value(StepOutcome::success("PAY-000001")).unwrap();
        assert_eq!(success["status"], "success");
        assert_eq!(success["referenceId"], "PAY-000001");

        let failure = serde_json::to_value(StepOutcome::failure("Insufficient inventory")).unwrap();
        assert_eq!(failure["status"], "failed");
        assert_eq!(failure["reason"], "Insufficient inventory");
    }
}
