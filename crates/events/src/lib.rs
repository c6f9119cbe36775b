// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain events and the notification dispatch contract.
//!
//! Every successful state transition emits exactly one event. Events are
//! consumed by an external notification service (email, push); the engine
//! treats dispatch as fire-and-forget and never fails an operation
//! because a notification could not be delivered.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

use artisan_domain::{BidId, RequestId, RequestStatus, WorkerId};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A domain event describing a completed state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A worker submitted or revised a bid.
    BidSubmitted {
        request_id: RequestId,
        bid_id: BidId,
        worker_id: WorkerId,
    },
    /// A bid became the binding assignment for a request.
    AssignmentMade {
        request_id: RequestId,
        bid_id: BidId,
        worker_id: WorkerId,
    },
    /// An overseer reverted an assignment back to `pending`.
    AssignmentRevoked {
        request_id: RequestId,
        bid_id: BidId,
    },
    /// The request status changed (covers cancel, deletion flagging,
    /// restore, and direct status changes).
    StatusChanged {
        request_id: RequestId,
        from: RequestStatus,
        to: RequestStatus,
    },
}

impl DomainEvent {
    /// Returns the request this event concerns.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        match self {
            Self::BidSubmitted { request_id, .. }
            | Self::AssignmentMade { request_id, .. }
            | Self::AssignmentRevoked { request_id, .. }
            | Self::StatusChanged { request_id, .. } => *request_id,
        }
    }
}

/// Outbound notification contract.
///
/// Implementations deliver events to clients and workers out of band.
/// Dispatch must not block the calling operation and must not panic.
pub trait NotificationDispatcher: Send + Sync {
    /// Hands an event to the notification channel.
    fn dispatch(&self, event: DomainEvent);
}

/// Dispatcher that drops every event.
///
/// Used when no notification channel is wired up.
#[derive(Debug, Default)]
pub struct NullDispatcher;

impl NotificationDispatcher for NullDispatcher {
    fn dispatch(&self, _event: DomainEvent) {}
}

/// Dispatcher that records every event for later inspection.
///
/// Intended for tests asserting on emitted events.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all events dispatched so far.
    ///
    /// Returns an empty list if the interior lock was poisoned by a
    /// panicking test thread.
    #[must_use]
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, event: DomainEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
