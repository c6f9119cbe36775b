// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    admin, client, create_request, create_test_deadline, create_test_details, create_test_harness,
    operator, submit_bid, worker,
};
use crate::{Command, CommandOutcome, EngineError};
use artisan_domain::{RequestDetails, RequestId, RequestStatus};

#[test]
fn test_create_request_records_owner() {
    let harness = create_test_harness();
    let request_id = harness
        .engine
        .create_request(&client(), create_test_details())
        .unwrap();

    let request = harness.engine.get_request(request_id).unwrap();
    assert!(request.owned_by("client-1"));
    assert_eq!(request.details, create_test_details());
}

#[test]
fn test_only_clients_create_requests() {
    let harness = create_test_harness();

    for actor in [worker(1), operator(), admin()] {
        let result = harness.engine.create_request(&actor, create_test_details());
        assert!(
            matches!(result, Err(EngineError::Forbidden { .. })),
            "{} must not create requests",
            actor.role
        );
    }
}

#[test]
fn test_create_request_rejects_blank_catalog_reference() {
    let harness = create_test_harness();

    let details = RequestDetails::new("  ", "silver", "17", "");
    let result = harness.engine.create_request(&client(), details);
    assert!(matches!(result, Err(EngineError::Validation { .. })));
}

#[test]
fn test_get_unknown_request_fails() {
    let harness = create_test_harness();

    let result = harness.engine.get_request(RequestId::new(7));
    assert_eq!(result, Err(EngineError::RequestNotFound(RequestId::new(7))));
}

#[test]
fn test_execute_drives_the_full_lifecycle() {
    let harness = create_test_harness();

    let Ok(CommandOutcome::RequestCreated(request_id)) = harness.engine.execute(
        &client(),
        Command::CreateRequest {
            details: create_test_details(),
        },
    ) else {
        panic!("creation should succeed");
    };

    let Ok(CommandOutcome::BidSubmitted(bid_id)) = harness.engine.execute(
        &worker(1),
        Command::SubmitBid {
            request_id,
            price: 5000,
            deadline: create_test_deadline(),
            message: String::from("can deliver early"),
        },
    ) else {
        panic!("bid submission should succeed");
    };

    let Ok(CommandOutcome::Bids(bids)) = harness
        .engine
        .execute(&client(), Command::ListBids { request_id })
    else {
        panic!("listing should succeed");
    };
    assert_eq!(bids.len(), 1);

    let outcome = harness
        .engine
        .execute(
            &client(),
            Command::SelectBid {
                request_id,
                bid_id,
            },
        )
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Done);

    let request = harness.engine.get_request(request_id).unwrap();
    assert_eq!(request.status, RequestStatus::Assigned);
    assert_eq!(request.assigned_bid_id, Some(bid_id));
}

#[test]
fn test_execute_propagates_operation_errors() {
    let harness = create_test_harness();
    let request_id = create_request(&harness);

    let result = harness.engine.execute(
        &worker(1),
        Command::SubmitBid {
            request_id,
            price: -5,
            deadline: create_test_deadline(),
            message: String::new(),
        },
    );
    assert!(matches!(result, Err(EngineError::Validation { .. })));

    let result = harness.engine.execute(
        &client(),
        Command::SetStatus {
            request_id,
            target: RequestStatus::Pending,
        },
    );
    assert!(matches!(result, Err(EngineError::Forbidden { .. })));
}

#[test]
fn test_execute_overseer_commands() {
    let harness = create_test_harness();
    let request_id = create_request(&harness);
    let bid_id = submit_bid(&harness, 1, request_id, 5000).unwrap();
    harness
        .engine
        .select_bid(&client(), request_id, bid_id)
        .unwrap();

    let outcome = harness
        .engine
        .execute(&operator(), Command::Unassign { request_id })
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Done);

    let outcome = harness
        .engine
        .execute(&admin(), Command::DeleteBid {
            request_id,
            bid_id,
        })
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Done);

    let outcome = harness
        .engine
        .execute(&operator(), Command::MarkForDeletion { request_id })
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Done);

    let outcome = harness
        .engine
        .execute(&operator(), Command::RestoreRequest { request_id })
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Done);

    assert_eq!(
        harness.engine.get_request(request_id).unwrap().status,
        RequestStatus::New
    );
}

#[test]
fn test_execute_cancel() {
    let harness = create_test_harness();
    let request_id = create_request(&harness);

    let outcome = harness
        .engine
        .execute(&client(), Command::CancelRequest { request_id })
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Done);
    assert_eq!(
        harness.engine.get_request(request_id).unwrap().status,
        RequestStatus::Cancelled
    );
}
