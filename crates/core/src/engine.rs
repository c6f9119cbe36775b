// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The engine facade.
//!
//! Exposes the action-oriented contract of the marketplace core. Every
//! operation runs the same pipeline: authorization matrix check, state
//! machine validation, store mutation, event dispatch. The engine is
//! stateless between calls and `Send + Sync` whenever its store is.

use crate::coordinator::AssignmentCoordinator;
use crate::error::EngineError;
use crate::registry::BidRegistry;
use crate::store::{BidStore, BidTerms, NewServiceRequest, RequestStore};
use artisan_domain::{
    Actor, AuthorizationMatrix, Bid, BidId, ClientId, RequestAction, RequestDetails, RequestId,
    RequestStatus, ServiceRequest, validate_request_details,
};
use artisan_events::{DomainEvent, NotificationDispatcher};
use std::sync::Arc;
use tracing::info;

/// The request lifecycle and bid-assignment engine.
pub struct Engine<S> {
    store: Arc<S>,
    registry: BidRegistry<S>,
    coordinator: AssignmentCoordinator<S>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl<S> Engine<S>
where
    S: RequestStore + BidStore,
{
    /// Creates an engine over the given store and notification channel.
    #[must_use]
    pub fn new(store: Arc<S>, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self {
            registry: BidRegistry::new(Arc::clone(&store), Arc::clone(&dispatcher)),
            coordinator: AssignmentCoordinator::new(Arc::clone(&store), Arc::clone(&dispatcher)),
            store,
            dispatcher,
        }
    }

    /// Creates a new service request in status `new`, owned by the
    /// calling client.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for non-client actors and `Validation` for
    /// an empty catalog reference.
    pub fn create_request(
        &self,
        actor: &Actor,
        details: RequestDetails,
    ) -> Result<RequestId, EngineError> {
        AuthorizationMatrix::authorize_create(actor)?;
        validate_request_details(&details)?;

        let request = self.store.create_request(NewServiceRequest {
            client_id: ClientId::new(actor.id.clone()),
            details,
        })?;
        info!(request_id = request.id.value(), "Request created");
        Ok(request.id)
    }

    /// Loads a request by id.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if no such request exists.
    pub fn get_request(&self, request_id: RequestId) -> Result<ServiceRequest, EngineError> {
        Ok(self.store.get_request(request_id)?)
    }

    /// Submits or revises a worker's bid. See [`BidRegistry::submit_bid`].
    ///
    /// # Errors
    ///
    /// See [`BidRegistry::submit_bid`].
    pub fn submit_bid(
        &self,
        actor: &Actor,
        request_id: RequestId,
        terms: BidTerms,
    ) -> Result<BidId, EngineError> {
        self.registry
            .submit_bid(actor, request_id, terms)
            .map(|bid| bid.id)
    }

    /// Lists all bids for a request in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the request does not exist.
    pub fn list_bids(&self, request_id: RequestId) -> Result<Vec<Bid>, EngineError> {
        self.registry.list_bids(request_id)
    }

    /// Returns the lowest offered price for a request, if any bid exists.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the request does not exist.
    pub fn minimum_price(&self, request_id: RequestId) -> Result<Option<i64>, EngineError> {
        self.registry.minimum_price(request_id)
    }

    /// Selects a bid as the binding assignment.
    /// See [`AssignmentCoordinator::select_bid`].
    ///
    /// # Errors
    ///
    /// See [`AssignmentCoordinator::select_bid`].
    pub fn select_bid(
        &self,
        actor: &Actor,
        request_id: RequestId,
        bid_id: BidId,
    ) -> Result<(), EngineError> {
        self.coordinator.select_bid(actor, request_id, bid_id)
    }

    /// Reverses an assignment. See [`AssignmentCoordinator::unassign`].
    ///
    /// # Errors
    ///
    /// See [`AssignmentCoordinator::unassign`].
    pub fn unassign(&self, actor: &Actor, request_id: RequestId) -> Result<(), EngineError> {
        self.coordinator.unassign(actor, request_id)
    }

    /// Cancels a request. One-shot and non-reversible; an existing
    /// assignment is cleared in the same atomic store operation.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` unless the actor is the owning client or an
    /// overseer, `InvalidTransition` from terminal states, and
    /// `ConcurrentModification` on a stale version.
    pub fn cancel_request(&self, actor: &Actor, request_id: RequestId) -> Result<(), EngineError> {
        let request = self.store.get_request(request_id)?;
        AuthorizationMatrix::authorize(actor, RequestAction::Cancel, &request)?;
        request
            .status
            .validate_transition(RequestStatus::Cancelled)?;

        self.transition(&request, RequestStatus::Cancelled)
    }

    /// Sets the status of a request directly (overseers; `pending`,
    /// `in_progress`, and `completed` only).
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for non-overseers or reserved targets,
    /// `InvalidTransition` if the lifecycle forbids the change, and
    /// `ConcurrentModification` on a stale version.
    pub fn set_status(
        &self,
        actor: &Actor,
        request_id: RequestId,
        target: RequestStatus,
    ) -> Result<(), EngineError> {
        let request = self.store.get_request(request_id)?;
        AuthorizationMatrix::authorize(actor, RequestAction::SetStatus(target), &request)?;
        request.status.validate_transition(target)?;

        // Moving an assigned request back into an open status would
        // strand the winning bid; only completion keeps the assignment.
        if request.is_assigned() && target != RequestStatus::Completed {
            return Err(EngineError::InvalidTransition {
                from: request.status.to_string(),
                to: target.to_string(),
                reason: String::from("assigned requests leave assignment only via unassign"),
            });
        }

        let updated = self
            .store
            .update_status(request_id, request.version, target)?;
        info!(
            request_id = request_id.value(),
            from = %request.status,
            to = %updated.status,
            "Status changed"
        );
        self.dispatcher.dispatch(DomainEvent::StatusChanged {
            request_id,
            from: request.status,
            to: target,
        });
        Ok(())
    }

    /// Flags a request for deletion. Removal itself is delegated to an
    /// external administrative process; the record stays in the store.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for non-overseers, `InvalidTransition` from
    /// terminal states, and `ConcurrentModification` on a stale version.
    pub fn mark_for_deletion(
        &self,
        actor: &Actor,
        request_id: RequestId,
    ) -> Result<(), EngineError> {
        let request = self.store.get_request(request_id)?;
        AuthorizationMatrix::authorize(actor, RequestAction::MarkForDeletion, &request)?;
        request
            .status
            .validate_transition(RequestStatus::ForDelete)?;

        self.transition(&request, RequestStatus::ForDelete)
    }

    /// Restores a flagged request back to `new`.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for non-overseers, `InvalidTransition` unless
    /// the request is flagged, and `ConcurrentModification` on a stale
    /// version.
    pub fn restore_request(&self, actor: &Actor, request_id: RequestId) -> Result<(), EngineError> {
        let request = self.store.get_request(request_id)?;
        AuthorizationMatrix::authorize(actor, RequestAction::Restore, &request)?;
        request.status.validate_transition(RequestStatus::New)?;

        self.transition(&request, RequestStatus::New)
    }

    /// Removes a non-selected bid (admin only).
    /// See [`BidRegistry::delete_bid`].
    ///
    /// # Errors
    ///
    /// See [`BidRegistry::delete_bid`].
    pub fn delete_bid(
        &self,
        actor: &Actor,
        request_id: RequestId,
        bid_id: BidId,
    ) -> Result<(), EngineError> {
        self.registry.delete_bid(actor, request_id, bid_id)
    }

    /// Applies a validated status change, clearing an assignment when
    /// the target status cannot carry one.
    fn transition(
        &self,
        request: &ServiceRequest,
        target: RequestStatus,
    ) -> Result<(), EngineError> {
        if request.is_assigned() {
            self.store
                .revoke_assignment(request.id, request.version, target)?;
        } else {
            self.store
                .update_status(request.id, request.version, target)?;
        }
        info!(
            request_id = request.id.value(),
            from = %request.status,
            to = %target,
            "Status changed"
        );
        self.dispatcher.dispatch(DomainEvent::StatusChanged {
            request_id: request.id,
            from: request.status,
            to: target,
        });
        Ok(())
    }
}
