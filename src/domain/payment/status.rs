//! Payment status state machine.
//!
//! A payment starts `Pending` and is finalized exactly once. `Completed`
//! and `Failed` are sinks: providers redeliver confirmation messages, so
//! any transition out of a terminal state is an error, never a silent
//! accept.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Order/intent created; awaiting provider confirmation.
    Pending,

    /// Provider confirmed the payment. Terminal.
    Completed,

    /// Provider reported failure. Terminal.
    Failed,
}

impl PaymentStatus {
    /// Returns true if the payment settled successfully.
    pub fn has_succeeded(&self) -> bool {
        matches!(self, PaymentStatus::Completed)
    }

    /// Returns the stable string form used in storage and transport.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!((self, target), (Pending, Completed) | (Pending, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Completed, Failed],
            Completed => vec![],
            Failed => vec![],
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("Unknown payment status '{}'", other),
            )),
        }
    }
}

/// Outcome delivered by a provider confirmation.
///
/// Modeled separately from [`PaymentStatus`] so a confirmation can never
/// carry `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    Completed,
    Failed,
}

impl PaymentOutcome {
    /// The terminal status this outcome resolves to.
    pub fn as_status(&self) -> PaymentStatus {
        match self {
            PaymentOutcome::Completed => PaymentStatus::Completed,
            PaymentOutcome::Failed => PaymentStatus::Failed,
        }
    }
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_status())
    }
}
