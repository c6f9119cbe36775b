// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request status tracking and transition logic.
//!
//! This module defines the lifecycle states of a service request and the
//! valid transitions between them. The transition table is role-free;
//! role eligibility is enforced separately by the authorization matrix.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a service request.
///
/// A request starts in `New` and ends in one of the terminal states
/// (`Completed`, `Cancelled`). `ForDelete` is soft-terminal: ordinary
/// actors cannot leave it, but a privileged restore returns it to `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Just created by a client; open for bids
    New,
    /// Acknowledged by an operator; still open for bids
    Pending,
    /// Work-up in progress; still open for bids until assignment
    InProgress,
    /// A bid has been selected as the binding assignment
    Assigned,
    /// Work delivered; terminal
    Completed,
    /// Withdrawn by the client or an overseer; terminal
    Cancelled,
    /// Flagged for removal by an external administrative process
    ForDelete,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::ForDelete => "for_delete",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "new" => Ok(Self::New),
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "assigned" => Ok(Self::Assigned),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "for_delete" => Ok(Self::ForDelete),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (no further transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true if workers may still submit or revise bids.
    #[must_use]
    pub const fn is_biddable(&self) -> bool {
        matches!(self, Self::New | Self::Pending | Self::InProgress)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidTransition {
                from: self.as_str(),
                to: target.as_str(),
                reason: "cannot transition from terminal state",
            });
        }

        let valid = match self {
            Self::New => matches!(
                target,
                Self::Pending
                    | Self::InProgress
                    | Self::Assigned
                    | Self::Cancelled
                    | Self::ForDelete
            ),
            Self::Pending => matches!(
                target,
                Self::InProgress | Self::Assigned | Self::Cancelled | Self::ForDelete
            ),
            Self::InProgress => matches!(
                target,
                Self::Assigned | Self::Completed | Self::Cancelled | Self::ForDelete
            ),
            Self::Assigned => {
                matches!(target, Self::Completed | Self::Cancelled | Self::ForDelete)
            }
            // Soft-terminal: restore is the only way out
            Self::ForDelete => matches!(target, Self::New),
            Self::Completed | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.as_str(),
                to: target.as_str(),
                reason: "transition not permitted by request lifecycle rules",
            })
        }
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
