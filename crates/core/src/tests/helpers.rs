// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures and an in-memory store double.
//!
//! `MemoryStore` mirrors the conditional-update semantics the engine
//! requires from a real backend: version guards and the null-assignment
//! guard are evaluated under one lock, so concurrent callers observe the
//! same win-or-lose outcomes as against SQLite.

use crate::store::{
    BidStore, BidTerms, NewBid, NewServiceRequest, RequestStore, StoreError,
};
use crate::{Engine, EngineError};
use artisan_domain::{
    Actor, Bid, BidId, RequestDetails, RequestId, RequestStatus, Role, ServiceRequest,
};
use artisan_events::RecordingDispatcher;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use time::{Date, Month};

const TEST_TIMESTAMP: &str = "2026-01-05T09:00:00Z";

#[derive(Debug, Default)]
struct MemoryInner {
    requests: BTreeMap<i64, ServiceRequest>,
    bids: BTreeMap<i64, Bid>,
    next_request_id: i64,
    next_bid_id: i64,
}

/// In-memory store satisfying both persistence contracts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend(String::from("store lock poisoned")))
    }

    /// Counts bids with the selected flag set for a request. Used to
    /// assert the at-most-one-winner invariant.
    pub fn selected_count(&self, request_id: RequestId) -> usize {
        self.inner
            .lock()
            .map(|inner| {
                inner
                    .bids
                    .values()
                    .filter(|bid| bid.request_id == request_id && bid.selected)
                    .count()
            })
            .unwrap_or(usize::MAX)
    }
}

impl RequestStore for MemoryStore {
    fn create_request(&self, new: NewServiceRequest) -> Result<ServiceRequest, StoreError> {
        let mut inner = self.lock()?;
        inner.next_request_id += 1;
        let request = ServiceRequest {
            id: RequestId::new(inner.next_request_id),
            client_id: new.client_id,
            details: new.details,
            status: RequestStatus::New,
            assigned_bid_id: None,
            version: 1,
            created_at: String::from(TEST_TIMESTAMP),
            updated_at: String::from(TEST_TIMESTAMP),
        };
        inner.requests.insert(request.id.value(), request.clone());
        Ok(request)
    }

    fn get_request(&self, id: RequestId) -> Result<ServiceRequest, StoreError> {
        self.lock()?
            .requests
            .get(&id.value())
            .cloned()
            .ok_or(StoreError::RequestNotFound(id))
    }

    fn update_status(
        &self,
        id: RequestId,
        expected_version: i64,
        target: RequestStatus,
    ) -> Result<ServiceRequest, StoreError> {
        let mut inner = self.lock()?;
        let request = inner
            .requests
            .get_mut(&id.value())
            .ok_or(StoreError::RequestNotFound(id))?;
        if request.version != expected_version {
            return Err(StoreError::ConcurrentModification {
                request_id: id,
                expected_version,
            });
        }
        request.status = target;
        request.version += 1;
        Ok(request.clone())
    }

    fn assign_bid(
        &self,
        id: RequestId,
        expected_version: i64,
        bid: BidId,
    ) -> Result<ServiceRequest, StoreError> {
        let mut inner = self.lock()?;
        if !inner.bids.contains_key(&bid.value()) {
            return Err(StoreError::BidNotFound(bid));
        }
        let request = inner
            .requests
            .get_mut(&id.value())
            .ok_or(StoreError::RequestNotFound(id))?;
        if request.version != expected_version || request.assigned_bid_id.is_some() {
            return Err(StoreError::AssignmentConflict { request_id: id });
        }
        request.status = RequestStatus::Assigned;
        request.assigned_bid_id = Some(bid);
        request.version += 1;
        let updated = request.clone();
        if let Some(winning) = inner.bids.get_mut(&bid.value()) {
            winning.selected = true;
        }
        Ok(updated)
    }

    fn revoke_assignment(
        &self,
        id: RequestId,
        expected_version: i64,
        target: RequestStatus,
    ) -> Result<ServiceRequest, StoreError> {
        let mut inner = self.lock()?;
        let request = inner
            .requests
            .get_mut(&id.value())
            .ok_or(StoreError::RequestNotFound(id))?;
        if request.version != expected_version || request.assigned_bid_id.is_none() {
            return Err(StoreError::ConcurrentModification {
                request_id: id,
                expected_version,
            });
        }
        let previous = request.assigned_bid_id.take();
        request.status = target;
        request.version += 1;
        let updated = request.clone();
        if let Some(bid_id) = previous
            && let Some(bid) = inner.bids.get_mut(&bid_id.value())
        {
            bid.selected = false;
        }
        Ok(updated)
    }
}

impl BidStore for MemoryStore {
    fn create_bid(&self, new: NewBid) -> Result<Bid, StoreError> {
        let mut inner = self.lock()?;
        if !inner.requests.contains_key(&new.request_id.value()) {
            return Err(StoreError::RequestNotFound(new.request_id));
        }
        inner.next_bid_id += 1;
        let bid = Bid {
            id: BidId::new(inner.next_bid_id),
            request_id: new.request_id,
            worker_id: new.worker_id,
            price: new.terms.price,
            deadline: new.terms.deadline,
            message: new.terms.message,
            selected: false,
            created_at: String::from(TEST_TIMESTAMP),
        };
        inner.bids.insert(bid.id.value(), bid.clone());
        Ok(bid)
    }

    fn get_bid(&self, id: BidId) -> Result<Bid, StoreError> {
        self.lock()?
            .bids
            .get(&id.value())
            .cloned()
            .ok_or(StoreError::BidNotFound(id))
    }

    fn find_bid_for_worker(
        &self,
        request_id: RequestId,
        worker_id: &artisan_domain::WorkerId,
    ) -> Result<Option<Bid>, StoreError> {
        Ok(self
            .lock()?
            .bids
            .values()
            .find(|bid| bid.request_id == request_id && &bid.worker_id == worker_id)
            .cloned())
    }

    fn update_bid_terms(&self, id: BidId, terms: BidTerms) -> Result<Bid, StoreError> {
        let mut inner = self.lock()?;
        let bid = inner
            .bids
            .get_mut(&id.value())
            .ok_or(StoreError::BidNotFound(id))?;
        bid.price = terms.price;
        bid.deadline = terms.deadline;
        bid.message = terms.message;
        Ok(bid.clone())
    }

    fn list_bids(&self, request_id: RequestId) -> Result<Vec<Bid>, StoreError> {
        Ok(self
            .lock()?
            .bids
            .values()
            .filter(|bid| bid.request_id == request_id)
            .cloned()
            .collect())
    }

    fn delete_bid(&self, id: BidId) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner
            .bids
            .remove(&id.value())
            .map(|_| ())
            .ok_or(StoreError::BidNotFound(id))
    }
}

pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub dispatcher: Arc<RecordingDispatcher>,
    pub engine: Engine<MemoryStore>,
}

pub fn create_test_harness() -> TestHarness {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let engine = Engine::new(
        Arc::clone(&store),
        Arc::clone(&dispatcher) as Arc<dyn artisan_events::NotificationDispatcher>,
    );
    TestHarness {
        store,
        dispatcher,
        engine,
    }
}

pub fn client() -> Actor {
    Actor::new("client-1", Role::Client)
}

pub fn worker(n: u8) -> Actor {
    Actor::new(format!("worker-{n}"), Role::Worker)
}

pub fn operator() -> Actor {
    Actor::new("operator-1", Role::Operator)
}

pub fn admin() -> Actor {
    Actor::new("admin-1", Role::Admin)
}

pub fn create_test_details() -> RequestDetails {
    RequestDetails::new("catalog-ring-01", "silver", "17", "engrave initials")
}

pub fn create_test_deadline() -> Date {
    Date::from_calendar_date(2026, Month::February, 10).expect("Valid test date")
}

pub fn create_test_terms(price: i64) -> BidTerms {
    BidTerms {
        price,
        deadline: create_test_deadline(),
        message: String::from("can deliver early"),
    }
}

/// Creates a request owned by `client-1` and returns its id.
pub fn create_request(harness: &TestHarness) -> RequestId {
    harness
        .engine
        .create_request(&client(), create_test_details())
        .expect("request creation should succeed")
}

/// Submits a bid from the given worker and returns the bid id.
pub fn submit_bid(
    harness: &TestHarness,
    worker_n: u8,
    request_id: RequestId,
    price: i64,
) -> Result<BidId, EngineError> {
    harness
        .engine
        .submit_bid(&worker(worker_n), request_id, create_test_terms(price))
}
