// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence contracts required by the engine.
//!
//! The engine never talks to a database directly; it requires a store
//! that can perform atomic conditional updates keyed on
//! `(id, version, assigned_bid_id IS NULL)`. Every multi-field change
//! (assignment, revocation) must be applied as a single atomic operation
//! so a failure leaves the prior consistent state untouched.

use artisan_domain::{
    Bid, BidId, ClientId, RequestDetails, RequestId, RequestStatus, ServiceRequest, WorkerId,
};
use time::Date;

/// Input for creating a service request. The store assigns id, status
/// (`new`), version, and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceRequest {
    pub client_id: ClientId,
    pub details: RequestDetails,
}

/// The worker-supplied terms of a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidTerms {
    /// Offered price in minor currency units; validated as positive
    /// before reaching the store.
    pub price: i64,
    /// Committed delivery date.
    pub deadline: Date,
    /// Free-text message to the client.
    pub message: String,
}

/// Input for creating a bid. The store assigns id, the unselected state,
/// and the creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBid {
    pub request_id: RequestId,
    pub worker_id: WorkerId,
    pub terms: BidTerms,
}

/// Errors surfaced by store implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No request exists with the given id.
    RequestNotFound(RequestId),
    /// No bid exists with the given id.
    BidNotFound(BidId),
    /// A version-guarded update matched zero rows because the observed
    /// version is stale. Safe to retry after reloading.
    ConcurrentModification {
        /// The contended request.
        request_id: RequestId,
        /// The version the caller observed.
        expected_version: i64,
    },
    /// The assignment conditional update matched zero rows: another
    /// caller won the race or the request already carries an
    /// assignment. Definitive, never retried.
    AssignmentConflict {
        /// The contended request.
        request_id: RequestId,
    },
    /// The backend failed (connection, query, corrupt row).
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestNotFound(id) => write!(f, "Request {id} not found"),
            Self::BidNotFound(id) => write!(f, "Bid {id} not found"),
            Self::ConcurrentModification {
                request_id,
                expected_version,
            } => {
                write!(
                    f,
                    "Request {request_id} was modified concurrently (observed version {expected_version} is stale)"
                )
            }
            Self::AssignmentConflict { request_id } => {
                write!(f, "Request {request_id} already has a binding assignment")
            }
            Self::Backend(msg) => write!(f, "Storage backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistence contract for service requests.
///
/// `update_status`, `assign_bid`, and `revoke_assignment` are conditional
/// updates guarded by the caller's observed `version`; a guard miss must
/// leave the stored row untouched.
pub trait RequestStore: Send + Sync {
    /// Persists a new request in status `new` at version 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn create_request(&self, new: NewServiceRequest) -> Result<ServiceRequest, StoreError>;

    /// Loads a request by id.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if no such request exists.
    fn get_request(&self, id: RequestId) -> Result<ServiceRequest, StoreError>;

    /// Sets the status of a request, guarded by the observed version.
    ///
    /// Does not touch the assignment; callers moving out of an assigned
    /// state use [`Self::revoke_assignment`] instead.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` if the version guard missed, or
    /// `RequestNotFound` if the request does not exist.
    fn update_status(
        &self,
        id: RequestId,
        expected_version: i64,
        target: RequestStatus,
    ) -> Result<ServiceRequest, StoreError>;

    /// The exclusivity primitive: atomically set `status = assigned`,
    /// `assigned_bid_id = bid`, and bump the version, where the observed
    /// version still holds and no assignment exists. The winning bid's
    /// `selected` flag is set in the same atomic operation.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentConflict` if the guard matched zero rows,
    /// `RequestNotFound`/`BidNotFound` on referential failure.
    fn assign_bid(
        &self,
        id: RequestId,
        expected_version: i64,
        bid: BidId,
    ) -> Result<ServiceRequest, StoreError>;

    /// Reverses an assignment: moves the request to `target`, clears
    /// `assigned_bid_id`, clears the winning bid's `selected` flag, and
    /// bumps the version — all atomically, guarded by the observed
    /// version and the presence of an assignment.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` if the guard missed, or
    /// `RequestNotFound` if the request does not exist.
    fn revoke_assignment(
        &self,
        id: RequestId,
        expected_version: i64,
        target: RequestStatus,
    ) -> Result<ServiceRequest, StoreError>;
}

/// Persistence contract for bids.
pub trait BidStore: Send + Sync {
    /// Persists a new, unselected bid.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the referenced request does not
    /// exist, or an error if the backend fails.
    fn create_bid(&self, new: NewBid) -> Result<Bid, StoreError>;

    /// Loads a bid by id.
    ///
    /// # Errors
    ///
    /// Returns `BidNotFound` if no such bid exists.
    fn get_bid(&self, id: BidId) -> Result<Bid, StoreError>;

    /// Finds the bid a worker holds on a request, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_bid_for_worker(
        &self,
        request_id: RequestId,
        worker_id: &WorkerId,
    ) -> Result<Option<Bid>, StoreError>;

    /// Replaces the terms of an existing bid (idempotent resubmission).
    /// The `selected` flag is never touched here.
    ///
    /// # Errors
    ///
    /// Returns `BidNotFound` if no such bid exists.
    fn update_bid_terms(&self, id: BidId, terms: BidTerms) -> Result<Bid, StoreError>;

    /// Lists all bids for a request in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_bids(&self, request_id: RequestId) -> Result<Vec<Bid>, StoreError>;

    /// Removes a bid. Callers must have verified it is not selected.
    ///
    /// # Errors
    ///
    /// Returns `BidNotFound` if no such bid exists.
    fn delete_bid(&self, id: BidId) -> Result<(), StoreError>;
}
