// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side query operations.
//!
//! All functions use Diesel DSL exclusively and return raw rows; the
//! adapter in `lib.rs` converts them into domain values.

use crate::data_models::{BidRow, ServiceRequestRow};
use crate::diesel_schema::{bids, service_requests};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Loads a request row by id, if it exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_request_row(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Option<ServiceRequestRow>, PersistenceError> {
    service_requests::table
        .filter(service_requests::request_id.eq(request_id))
        .first::<ServiceRequestRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_request_row: {e}")))
}

/// Loads a bid row by id, if it exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_bid_row(
    conn: &mut SqliteConnection,
    bid_id: i64,
) -> Result<Option<BidRow>, PersistenceError> {
    bids::table
        .filter(bids::bid_id.eq(bid_id))
        .first::<BidRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_bid_row: {e}")))
}

/// Finds the bid a worker holds on a request, if any.
///
/// The `(request_id, worker_id)` pair is unique by schema constraint, so
/// at most one row can match.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_bid_row_for_worker(
    conn: &mut SqliteConnection,
    request_id: i64,
    worker_id: &str,
) -> Result<Option<BidRow>, PersistenceError> {
    bids::table
        .filter(bids::request_id.eq(request_id))
        .filter(bids::worker_id.eq(worker_id))
        .first::<BidRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_bid_row_for_worker: {e}")))
}

/// Lists all bid rows for a request in creation order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_bid_rows(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Vec<BidRow>, PersistenceError> {
    bids::table
        .filter(bids::request_id.eq(request_id))
        .order(bids::bid_id.asc())
        .load::<BidRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_bid_rows: {e}")))
}
