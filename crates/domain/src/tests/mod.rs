// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod authorization_tests;

use crate::{
    BidId, ClientId, RequestDetails, RequestId, RequestStatus, ServiceRequest,
};

pub fn create_test_details() -> RequestDetails {
    RequestDetails::new("catalog-ring-01", "silver", "17", "engrave initials")
}

pub fn create_test_request(status: RequestStatus) -> ServiceRequest {
    ServiceRequest {
        id: RequestId::new(1),
        client_id: ClientId::new("client-1"),
        details: create_test_details(),
        status,
        assigned_bid_id: None,
        version: 1,
        created_at: String::from("2026-01-05T09:00:00Z"),
        updated_at: String::from("2026-01-05T09:00:00Z"),
    }
}

pub fn create_assigned_request() -> ServiceRequest {
    let mut request = create_test_request(RequestStatus::Assigned);
    request.assigned_bid_id = Some(BidId::new(7));
    request
}
