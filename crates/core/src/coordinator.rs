// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The assignment coordinator.
//!
//! Turns a client's choice of one bid into a durable, exclusive
//! assignment. Exclusivity rests on a single conditional update in the
//! store: of N simultaneous selections on the same request, exactly one
//! satisfies the `(version, assigned_bid_id IS NULL)` guard; the rest
//! observe zero affected rows and fail `AlreadyAssigned`, never a torn
//! or double-assigned state.

use crate::error::EngineError;
use crate::store::{BidStore, RequestStore};
use artisan_domain::{Actor, AuthorizationMatrix, BidId, RequestAction, RequestId, RequestStatus};
use artisan_events::{DomainEvent, NotificationDispatcher};
use std::sync::Arc;
use tracing::info;

/// Coordinator for bid selection and its reversal.
pub struct AssignmentCoordinator<S> {
    store: Arc<S>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl<S> AssignmentCoordinator<S>
where
    S: RequestStore + BidStore,
{
    #[must_use]
    pub fn new(store: Arc<S>, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// Selects a bid as the binding assignment for a request.
    ///
    /// Losing a concurrent selection race is a definitive business
    /// conflict (`AlreadyAssigned`), not a transient fault; callers must
    /// not retry it.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` unless the actor is the owning client of a
    /// still-open, unassigned request; `BidNotFound` if the bid does not
    /// exist or belongs to another request; `AlreadyAssigned` if another
    /// selection won the race; `InvalidTransition` if the lifecycle
    /// forbids assignment from the current status.
    pub fn select_bid(
        &self,
        actor: &Actor,
        request_id: RequestId,
        bid_id: BidId,
    ) -> Result<(), EngineError> {
        let request = self.store.get_request(request_id)?;

        // A lost race reports AlreadyAssigned no matter when the loser
        // observes the winner's commit, so the assignment check comes
        // before the authorization matrix.
        if request.is_assigned() {
            return Err(EngineError::AlreadyAssigned { request_id });
        }
        AuthorizationMatrix::authorize(actor, RequestAction::SelectBid, &request)?;

        let bid = self.store.get_bid(bid_id)?;
        if bid.request_id != request_id {
            return Err(EngineError::BidNotFound(bid_id));
        }

        request
            .status
            .validate_transition(RequestStatus::Assigned)?;

        // The exclusivity point: one round trip, no read-then-write.
        self.store.assign_bid(request_id, request.version, bid_id)?;

        info!(
            request_id = request_id.value(),
            bid_id = bid_id.value(),
            worker_id = %bid.worker_id,
            "Assignment made"
        );
        self.dispatcher.dispatch(DomainEvent::AssignmentMade {
            request_id,
            bid_id,
            worker_id: bid.worker_id,
        });
        Ok(())
    }

    /// Reverses an assignment: the request returns to `pending`
    /// (preserving its already-has-bids context) and the previously
    /// winning bid loses its `selected` flag.
    ///
    /// Guarded by the same version-based conditional update so it cannot
    /// race with a fresh selection.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for non-overseer actors,
    /// `InvalidTransition` if the request has no assignment to revoke,
    /// and `ConcurrentModification` if the version guard missed.
    pub fn unassign(&self, actor: &Actor, request_id: RequestId) -> Result<(), EngineError> {
        let request = self.store.get_request(request_id)?;
        AuthorizationMatrix::authorize(actor, RequestAction::Unassign, &request)?;

        let Some(bid_id) = request.assigned_bid_id else {
            return Err(EngineError::InvalidTransition {
                from: request.status.to_string(),
                to: RequestStatus::Pending.to_string(),
                reason: String::from("no assignment to revoke"),
            });
        };

        self.store
            .revoke_assignment(request_id, request.version, RequestStatus::Pending)?;

        info!(
            request_id = request_id.value(),
            bid_id = bid_id.value(),
            "Assignment revoked"
        );
        self.dispatcher
            .dispatch(DomainEvent::AssignmentRevoked { request_id, bid_id });
        Ok(())
    }
}
