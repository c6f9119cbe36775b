// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The per-role authorization matrix.
//!
//! Every state-changing operation consults this matrix exactly once before
//! touching the store. The matrix is a pure lookup over `(role, action)`
//! plus ownership; it performs no I/O and holds no state.
//!
//! The matrix deliberately does not duplicate the lifecycle rules of the
//! status state machine: for `Cancel`, `MarkForDeletion`, and `Restore`
//! the status legality is the state machine's job, so a lifecycle
//! violation surfaces as `InvalidTransition` rather than `Forbidden`.
//! `SelectBid` is the exception: the selection window is part of the
//! authorization rule itself, so a closed request denies with `Forbidden`.
//! A prior assignment is deliberately not checked here — the coordinator
//! reports it as the distinct `AlreadyAssigned` conflict.

use crate::error::DomainError;
use crate::role::{Actor, Role};
use crate::status::RequestStatus;
use crate::types::ServiceRequest;

/// Actions gated by the authorization matrix.
///
/// `CreateRequest` is absent: creation has no existing request to check
/// against and is gated by [`AuthorizationMatrix::authorize_create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    /// Submit or revise a bid (worker).
    SubmitBid,
    /// Select a bid as the binding assignment (owning client).
    SelectBid,
    /// Cancel the request (owning client, or any overseer).
    Cancel,
    /// Set the request status directly (overseers; pending,
    /// in_progress, and completed only).
    SetStatus(RequestStatus),
    /// Flag the request for deletion (overseers).
    MarkForDeletion,
    /// Restore a flagged request back to `new` (overseers).
    Restore,
    /// Revert an assignment back to `pending` (overseers).
    Unassign,
    /// Delete a non-selected bid (admin).
    DeleteBid,
}

impl RequestAction {
    /// Returns the action name used in denial messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SubmitBid => "submit_bid",
            Self::SelectBid => "select_bid",
            Self::Cancel => "cancel",
            Self::SetStatus(_) => "set_status",
            Self::MarkForDeletion => "mark_for_deletion",
            Self::Restore => "restore",
            Self::Unassign => "unassign",
            Self::DeleteBid => "delete_bid",
        }
    }
}

/// Role-based access table for request lifecycle actions.
pub struct AuthorizationMatrix;

impl AuthorizationMatrix {
    /// Checks if an actor may create a new service request.
    ///
    /// Only clients create requests.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` if the actor is not a client.
    pub fn authorize_create(actor: &Actor) -> Result<(), DomainError> {
        match actor.role {
            Role::Client => Ok(()),
            role => Err(Self::deny(
                role,
                "create_request",
                "only clients create requests",
            )),
        }
    }

    /// Checks if an actor may perform an action on an existing request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Forbidden` if the role, ownership, or (for
    /// selection) the request state denies the action.
    pub fn authorize(
        actor: &Actor,
        action: RequestAction,
        request: &ServiceRequest,
    ) -> Result<(), DomainError> {
        match (actor.role, action) {
            (Role::Worker, RequestAction::SubmitBid) => Ok(()),

            (Role::Client, RequestAction::SelectBid) => {
                if !request.owned_by(&actor.id) {
                    return Err(Self::deny(
                        actor.role,
                        action.name(),
                        "only the owning client selects a bid",
                    ));
                }
                if !request.status.is_biddable() {
                    return Err(Self::deny(
                        actor.role,
                        action.name(),
                        "request is no longer open for selection",
                    ));
                }
                Ok(())
            }

            (Role::Client, RequestAction::Cancel) => {
                if request.owned_by(&actor.id) {
                    Ok(())
                } else {
                    Err(Self::deny(
                        actor.role,
                        action.name(),
                        "clients cancel only their own requests",
                    ))
                }
            }
            (Role::Operator | Role::Admin, RequestAction::Cancel) => Ok(()),

            (Role::Operator | Role::Admin, RequestAction::SetStatus(target)) => {
                if matches!(
                    target,
                    RequestStatus::Pending | RequestStatus::InProgress | RequestStatus::Completed
                ) {
                    Ok(())
                } else {
                    Err(Self::deny(
                        actor.role,
                        action.name(),
                        "status is not directly settable; use the dedicated action",
                    ))
                }
            }

            (
                Role::Operator | Role::Admin,
                RequestAction::MarkForDeletion | RequestAction::Restore | RequestAction::Unassign,
            ) => Ok(()),

            (Role::Admin, RequestAction::DeleteBid) => Ok(()),

            (role, action) => Err(Self::deny(
                role,
                action.name(),
                "role is not permitted to perform this action",
            )),
        }
    }

    fn deny(role: Role, action: &'static str, reason: &'static str) -> DomainError {
        DomainError::Forbidden {
            role,
            action,
            reason,
        }
    }
}
