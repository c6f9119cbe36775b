// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The caller-facing error taxonomy of the engine.

use crate::store::StoreError;
use artisan_domain::{BidId, DomainError, RequestId, Role};
use thiserror::Error;

/// Every engine operation returns either a success payload or exactly
/// one of these errors.
///
/// `ConcurrentModification` is the only retryable variant: the caller
/// should reload and retry with a fresh version. `AlreadyAssigned` is a
/// definitive business conflict — another bid already won — and must be
/// surfaced distinctly from generic failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed input, returned with field detail.
    #[error("Invalid input for field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// A human-readable description.
        message: String,
    },
    /// The authorization matrix denied the action for this role/status
    /// combination. Never retried.
    #[error("Forbidden: {role} may not {action}: {reason}")]
    Forbidden {
        /// The denied role.
        role: Role,
        /// The attempted action.
        action: String,
        /// Why the action is denied.
        reason: String,
    },
    /// The state machine rejected the requested status change. Never
    /// retried.
    #[error("Invalid transition {from} -> {to}: {reason}")]
    InvalidTransition {
        /// The current status.
        from: String,
        /// The requested target status.
        to: String,
        /// Why the transition is rejected.
        reason: String,
    },
    /// A bid was submitted against a request that is not open for
    /// bidding or already carries an assignment.
    #[error("Request {request_id} is not biddable: {reason}")]
    RequestNotBiddable {
        /// The request that rejected the bid.
        request_id: RequestId,
        /// Why bidding is closed.
        reason: String,
    },
    /// Referential lookup failure.
    #[error("Request {0} not found")]
    RequestNotFound(RequestId),
    /// Referential lookup failure.
    #[error("Bid {0} not found")]
    BidNotFound(BidId),
    /// The defining concurrency conflict: another bid already won the
    /// assignment. A legitimate lost race, not a fault.
    #[error("Request {request_id} already has a binding assignment")]
    AlreadyAssigned {
        /// The contended request.
        request_id: RequestId,
    },
    /// Stale version on a non-selection mutation. Reload and retry.
    #[error("Request {request_id} was modified concurrently; reload and retry")]
    ConcurrentModification {
        /// The contended request.
        request_id: RequestId,
    },
    /// Attempted to delete the currently winning bid without first
    /// unassigning it.
    #[error("Bid {bid_id} is the binding assignment; unassign first")]
    BidIsSelected {
        /// The winning bid.
        bid_id: BidId,
    },
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidStatus { status } => Self::Validation {
                field: String::from("status"),
                message: format!("'{status}' is not a valid request status"),
            },
            DomainError::InvalidTransition { from, to, reason } => Self::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
                reason: reason.to_string(),
            },
            DomainError::Forbidden {
                role,
                action,
                reason,
            } => Self::Forbidden {
                role,
                action: action.to_string(),
                reason: reason.to_string(),
            },
            DomainError::InvalidPrice { price } => Self::Validation {
                field: String::from("price"),
                message: format!("{price} is not a positive price"),
            },
            DomainError::EmptyField { field } => Self::Validation {
                field: field.to_string(),
                message: String::from("must not be empty"),
            },
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RequestNotFound(id) => Self::RequestNotFound(id),
            StoreError::BidNotFound(id) => Self::BidNotFound(id),
            StoreError::ConcurrentModification { request_id, .. } => {
                Self::ConcurrentModification { request_id }
            }
            StoreError::AssignmentConflict { request_id } => Self::AlreadyAssigned { request_id },
            StoreError::Backend(msg) => Self::Storage(msg),
        }
    }
}
