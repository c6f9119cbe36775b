// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core domain entities: service requests and bids.

use crate::status::RequestStatus;
use serde::{Deserialize, Serialize};
use time::Date;

/// Opaque identifier of a service request, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(i64);

impl RequestId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a bid, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BidId(i64);

impl BidId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BidId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a client, as verified by the external auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a worker (contractor), as verified by the external auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId(String);

impl WorkerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive fields of a request. None of these drive the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDetails {
    /// Reference into the external product catalog.
    pub product_ref: String,
    /// Requested material.
    pub material: String,
    /// Requested size.
    pub size: String,
    /// Free-text comment from the client.
    pub comment: String,
}

impl RequestDetails {
    #[must_use]
    pub fn new(
        product_ref: impl Into<String>,
        material: impl Into<String>,
        size: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            product_ref: product_ref.into(),
            material: material.into(),
            size: size.into(),
            comment: comment.into(),
        }
    }
}

/// A client's order for a custom-made good, tracked through a status
/// lifecycle.
///
/// The `version` field increases on every status or assignment change and
/// is the basis for the store's conditional updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub client_id: ClientId,
    pub details: RequestDetails,
    pub status: RequestStatus,
    /// The bid that won assignment, if any. Non-null only while the
    /// request is assigned or completed.
    pub assigned_bid_id: Option<BidId>,
    pub version: i64,
    /// ISO-8601 timestamp, produced by the store.
    pub created_at: String,
    /// ISO-8601 timestamp, produced by the store.
    pub updated_at: String,
}

impl ServiceRequest {
    /// Returns true if the given actor id is the owning client.
    #[must_use]
    pub fn owned_by(&self, actor_id: &str) -> bool {
        self.client_id.value() == actor_id
    }

    /// Returns true if a bid has been selected as the binding assignment.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assigned_bid_id.is_some()
    }
}

/// A worker's priced, dated offer against a specific service request.
///
/// At most one bid per request has `selected == true` at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub request_id: RequestId,
    pub worker_id: WorkerId,
    /// Offered price in minor currency units; always positive.
    pub price: i64,
    /// Date by which the worker commits to deliver.
    pub deadline: Date,
    /// Free-text message to the client.
    pub message: String,
    /// True for the winning bid of an assigned request.
    pub selected: bool,
    /// ISO-8601 timestamp, produced by the store.
    pub created_at: String,
}
