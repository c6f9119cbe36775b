// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The bid registry.
//!
//! Enforces one bid per worker per request: a resubmission updates the
//! worker's existing bid in place instead of creating a duplicate.
//! Workers never delete bids; deletion is an admin action and refuses to
//! touch the currently winning bid.

use crate::error::EngineError;
use crate::store::{BidStore, BidTerms, NewBid, RequestStore};
use artisan_domain::{
    Actor, AuthorizationMatrix, Bid, BidId, RequestAction, RequestId, WorkerId, validate_bid_terms,
};
use artisan_events::{DomainEvent, NotificationDispatcher};
use std::sync::Arc;
use tracing::debug;

/// Registry of bids per request.
pub struct BidRegistry<S> {
    store: Arc<S>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl<S> BidRegistry<S>
where
    S: RequestStore + BidStore,
{
    #[must_use]
    pub fn new(store: Arc<S>, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// Submits or revises a worker's bid on a request.
    ///
    /// If the worker already holds a bid on this request, its terms are
    /// replaced in place; the bid count for the request is unaffected by
    /// repeated resubmission.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the actor is not a worker,
    /// `RequestNotBiddable` if the request is closed for bidding or
    /// already assigned, `Validation` for a non-positive price, and
    /// `RequestNotFound` if the request does not exist.
    pub fn submit_bid(
        &self,
        actor: &Actor,
        request_id: RequestId,
        terms: BidTerms,
    ) -> Result<Bid, EngineError> {
        let request = self.store.get_request(request_id)?;
        AuthorizationMatrix::authorize(actor, RequestAction::SubmitBid, &request)?;
        validate_bid_terms(terms.price)?;

        if request.is_assigned() {
            return Err(EngineError::RequestNotBiddable {
                request_id,
                reason: String::from("a bid has already been selected"),
            });
        }
        if !request.status.is_biddable() {
            return Err(EngineError::RequestNotBiddable {
                request_id,
                reason: format!("status is {}", request.status),
            });
        }

        let worker_id = WorkerId::new(actor.id.clone());
        let bid = match self.store.find_bid_for_worker(request_id, &worker_id)? {
            Some(existing) => {
                debug!(
                    request_id = request_id.value(),
                    bid_id = existing.id.value(),
                    "Revising existing bid"
                );
                self.store.update_bid_terms(existing.id, terms)?
            }
            None => self.store.create_bid(NewBid {
                request_id,
                worker_id: worker_id.clone(),
                terms,
            })?,
        };

        self.dispatcher.dispatch(DomainEvent::BidSubmitted {
            request_id,
            bid_id: bid.id,
            worker_id,
        });
        Ok(bid)
    }

    /// Lists all bids for a request in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the request does not exist.
    pub fn list_bids(&self, request_id: RequestId) -> Result<Vec<Bid>, EngineError> {
        // Existence check so a bogus id is not an empty list
        self.store.get_request(request_id)?;
        Ok(self.store.list_bids(request_id)?)
    }

    /// Returns the lowest offered price over all bids for a request, or
    /// `None` if no bids exist. Consumed by catalog display.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the request does not exist.
    pub fn minimum_price(&self, request_id: RequestId) -> Result<Option<i64>, EngineError> {
        self.store.get_request(request_id)?;
        let bids = self.store.list_bids(request_id)?;
        Ok(bids.iter().map(|bid| bid.price).min())
    }

    /// Removes a non-selected bid (admin only).
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for non-admin actors, `BidNotFound` if the
    /// bid does not exist or belongs to another request, and
    /// `BidIsSelected` if it is the current winning bid — selection must
    /// be reversed through unassignment first.
    pub fn delete_bid(
        &self,
        actor: &Actor,
        request_id: RequestId,
        bid_id: BidId,
    ) -> Result<(), EngineError> {
        let request = self.store.get_request(request_id)?;
        AuthorizationMatrix::authorize(actor, RequestAction::DeleteBid, &request)?;

        let bid = self.store.get_bid(bid_id)?;
        if bid.request_id != request_id {
            return Err(EngineError::BidNotFound(bid_id));
        }
        if bid.selected {
            return Err(EngineError::BidIsSelected { bid_id });
        }

        self.store.delete_bid(bid_id)?;
        debug!(
            request_id = request_id.value(),
            bid_id = bid_id.value(),
            "Deleted bid"
        );
        Ok(())
    }
}
