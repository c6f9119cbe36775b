// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SqliteStore;
use artisan_domain::{Actor, RequestDetails, Role};
use artisan_engine::{BidTerms, Engine, NewServiceRequest};
use artisan_events::{NotificationDispatcher, RecordingDispatcher};
use std::sync::Arc;
use time::{Date, Month};

pub fn create_store() -> SqliteStore {
    SqliteStore::new_in_memory().expect("in-memory store should initialize")
}

pub struct TestHarness {
    pub store: Arc<SqliteStore>,
    pub dispatcher: Arc<RecordingDispatcher>,
    pub engine: Engine<SqliteStore>,
}

pub fn create_test_harness() -> TestHarness {
    let store = Arc::new(create_store());
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let engine = Engine::new(
        Arc::clone(&store),
        Arc::clone(&dispatcher) as Arc<dyn NotificationDispatcher>,
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

pub fn create_new_request() -> NewServiceRequest {
    NewServiceRequest {
        client_id: artisan_domain::ClientId::new("client-1"),
        details: create_test_details(),
    }
}
