// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commands: actor intent as data.
//!
//! A command names the operation and its parameters; the actor arrives
//! separately from the auth layer. [`Engine::execute`] is the single
//! request-handler entry point every transport funnels through.

use crate::engine::Engine;
use crate::error::EngineError;
use crate::store::{BidStore, BidTerms, RequestStore};
use artisan_domain::{Actor, Bid, BidId, RequestDetails, RequestId, RequestStatus};
use time::Date;

/// An actor action on the marketplace core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new service request.
    CreateRequest {
        /// Descriptive fields of the order.
        details: RequestDetails,
    },
    /// Submit or revise a bid.
    SubmitBid {
        /// The request to bid on.
        request_id: RequestId,
        /// Offered price in minor currency units.
        price: i64,
        /// Committed delivery date.
        deadline: Date,
        /// Free-text message to the client.
        message: String,
    },
    /// List all bids for a request.
    ListBids {
        /// The request to list.
        request_id: RequestId,
    },
    /// Select a bid as the binding assignment.
    SelectBid {
        /// The request being assigned.
        request_id: RequestId,
        /// The chosen bid.
        bid_id: BidId,
    },
    /// Cancel a request.
    CancelRequest {
        /// The request to cancel.
        request_id: RequestId,
    },
    /// Set the request status directly.
    SetStatus {
        /// The request to change.
        request_id: RequestId,
        /// The target status.
        target: RequestStatus,
    },
    /// Flag a request for deletion.
    MarkForDeletion {
        /// The request to flag.
        request_id: RequestId,
    },
    /// Restore a flagged request back to `new`.
    RestoreRequest {
        /// The request to restore.
        request_id: RequestId,
    },
    /// Revert an assignment back to `pending`.
    Unassign {
        /// The assigned request.
        request_id: RequestId,
    },
    /// Delete a non-selected bid.
    DeleteBid {
        /// The request the bid belongs to.
        request_id: RequestId,
        /// The bid to delete.
        bid_id: BidId,
    },
}

/// The success payload of an executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A request was created.
    RequestCreated(RequestId),
    /// A bid was created or revised.
    BidSubmitted(BidId),
    /// The bids of a request, in creation order.
    Bids(Vec<Bid>),
    /// The command completed with no payload.
    Done,
}

impl<S> Engine<S>
where
    S: RequestStore + BidStore,
{
    /// Executes a command on behalf of an actor.
    ///
    /// This is the single entry point for transport adapters; it
    /// dispatches to the typed operation methods without adding any
    /// behavior of its own.
    ///
    /// # Errors
    ///
    /// Propagates the error of the dispatched operation.
    pub fn execute(&self, actor: &Actor, command: Command) -> Result<CommandOutcome, EngineError> {
        match command {
            Command::CreateRequest { details } => self
                .create_request(actor, details)
                .map(CommandOutcome::RequestCreated),
            Command::SubmitBid {
                request_id,
                price,
                deadline,
                message,
            } => self
                .submit_bid(
                    actor,
                    request_id,
                    BidTerms {
                        price,
                        deadline,
                        message,
                    },
                )
                .map(CommandOutcome::BidSubmitted),
            Command::ListBids { request_id } => {
                self.list_bids(request_id).map(CommandOutcome::Bids)
            }
            Command::SelectBid {
                request_id,
                bid_id,
            } => self
                .select_bid(actor, request_id, bid_id)
                .map(|()| CommandOutcome::Done),
            Command::CancelRequest { request_id } => self
                .cancel_request(actor, request_id)
                .map(|()| CommandOutcome::Done),
            Command::SetStatus { request_id, target } => self
                .set_status(actor, request_id, target)
                .map(|()| CommandOutcome::Done),
            Command::MarkForDeletion { request_id } => self
                .mark_for_deletion(actor, request_id)
                .map(|()| CommandOutcome::Done),
            Command::RestoreRequest { request_id } => self
                .restore_request(actor, request_id)
                .map(|()| CommandOutcome::Done),
            Command::Unassign { request_id } => self
                .unassign(actor, request_id)
                .map(|()| CommandOutcome::Done),
            Command::DeleteBid {
                request_id,
                bid_id,
            } => self
                .delete_bid(actor, request_id, bid_id)
                .map(|()| CommandOutcome::Done),
        }
    }
}
