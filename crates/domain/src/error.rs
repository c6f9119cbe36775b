// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::role::Role;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A status string does not name a valid lifecycle state.
    InvalidStatus {
        /// The offending status string.
        status: String,
    },
    /// The requested status transition is not in the lifecycle table.
    InvalidTransition {
        /// The current status.
        from: &'static str,
        /// The requested target status.
        to: &'static str,
        /// Why the transition is rejected.
        reason: &'static str,
    },
    /// The authorization matrix denied the action.
    Forbidden {
        /// The role of the denied actor.
        role: Role,
        /// The action that was attempted.
        action: &'static str,
        /// Why the action is denied.
        reason: &'static str,
    },
    /// A bid price must be strictly positive.
    InvalidPrice {
        /// The offending price, in minor currency units.
        price: i64,
    },
    /// A required field is empty.
    EmptyField {
        /// The name of the empty field.
        field: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus { status } => write!(f, "Invalid request status: '{status}'"),
            Self::InvalidTransition { from, to, reason } => {
                write!(f, "Invalid transition {from} -> {to}: {reason}")
            }
            Self::Forbidden {
                role,
                action,
                reason,
            } => {
                write!(f, "Forbidden: {role} may not {action}: {reason}")
            }
            Self::InvalidPrice { price } => {
                write!(f, "Invalid bid price {price}: must be greater than 0")
            }
            Self::EmptyField { field } => write!(f, "Field '{field}' must not be empty"),
        }
    }
}

impl std::error::Error for DomainError {}
