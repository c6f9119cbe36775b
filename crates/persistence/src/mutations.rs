// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side mutation operations.
//!
//! The guarded mutations return the number of request rows their
//! conditional update matched. Zero means the guard missed; the adapter
//! in `lib.rs` decides which conflict that is. The guard and every
//! dependent write run inside one transaction, so a miss leaves the
//! prior state fully intact.

use crate::diesel_schema::{bids, service_requests};
use crate::error::PersistenceError;
use artisan_domain::RequestDetails;
use diesel::prelude::*;
use diesel::{Connection, SqliteConnection};
use tracing::debug;

use crate::backend::get_last_insert_rowid;

/// SQL expression producing the current UTC time in ISO-8601 form.
///
/// This is a justified use of raw SQL: timestamps are assigned by the
/// database, not the application, and Diesel has no DSL for strftime.
macro_rules! now_utc {
    () => {
        diesel::dsl::sql::<diesel::sql_types::Text>("strftime('%Y-%m-%dT%H:%M:%SZ', 'now')")
    };
}

/// Inserts a new request in status `new` at version 1.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_request(
    conn: &mut SqliteConnection,
    client_id: &str,
    details: &RequestDetails,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(service_requests::table)
        .values((
            service_requests::client_id.eq(client_id),
            service_requests::product_ref.eq(&details.product_ref),
            service_requests::material.eq(&details.material),
            service_requests::size.eq(&details.size),
            service_requests::comment.eq(&details.comment),
        ))
        .execute(conn)?;

    let request_id = get_last_insert_rowid(conn)?;
    debug!(request_id, "Inserted request row");
    Ok(request_id)
}

/// Sets the status of a request where the observed version still holds.
///
/// Returns the number of matched rows (0 or 1). The assignment column is
/// not touched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_status_guarded(
    conn: &mut SqliteConnection,
    request_id: i64,
    expected_version: i64,
    target: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(service_requests::table)
        .filter(service_requests::request_id.eq(request_id))
        .filter(service_requests::version.eq(expected_version))
        .set((
            service_requests::status.eq(target),
            service_requests::version.eq(expected_version + 1),
            service_requests::updated_at.eq(now_utc!()),
        ))
        .execute(conn)?)
}

/// The exclusivity primitive: assigns a bid to a request where the
/// observed version still holds and no assignment exists, and flags the
/// winning bid as selected.
///
/// Returns the number of request rows the guard matched (0 or 1). On a
/// guard miss nothing is written, including the bid flag.
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn assign_bid_guarded(
    conn: &mut SqliteConnection,
    request_id: i64,
    expected_version: i64,
    bid_id: i64,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let affected = diesel::update(service_requests::table)
            .filter(service_requests::request_id.eq(request_id))
            .filter(service_requests::version.eq(expected_version))
            .filter(service_requests::assigned_bid_id.is_null())
            .set((
                service_requests::status.eq("assigned"),
                service_requests::assigned_bid_id.eq(bid_id),
                service_requests::version.eq(expected_version + 1),
                service_requests::updated_at.eq(now_utc!()),
            ))
            .execute(conn)?;

        if affected == 1 {
            diesel::update(bids::table)
                .filter(bids::bid_id.eq(bid_id))
                .set(bids::selected.eq(1))
                .execute(conn)?;
            debug!(request_id, bid_id, "Assignment written");
        }
        Ok(affected)
    })
}

/// Reverses an assignment: moves the request to `target`, clears the
/// assignment column, and clears the winning bid's selected flag, where
/// the observed version still holds and an assignment exists.
///
/// Returns the number of request rows the guard matched (0 or 1).
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn revoke_assignment_guarded(
    conn: &mut SqliteConnection,
    request_id: i64,
    expected_version: i64,
    target: &str,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let previous: Option<Option<i64>> = service_requests::table
            .filter(service_requests::request_id.eq(request_id))
            .select(service_requests::assigned_bid_id)
            .first(conn)
            .optional()?;

        let affected = diesel::update(service_requests::table)
            .filter(service_requests::request_id.eq(request_id))
            .filter(service_requests::version.eq(expected_version))
            .filter(service_requests::assigned_bid_id.is_not_null())
            .set((
                service_requests::status.eq(target),
                service_requests::assigned_bid_id.eq(None::<i64>),
                service_requests::version.eq(expected_version + 1),
                service_requests::updated_at.eq(now_utc!()),
            ))
            .execute(conn)?;

        if affected == 1
            && let Some(Some(bid_id)) = previous
        {
            diesel::update(bids::table)
                .filter(bids::bid_id.eq(bid_id))
                .set(bids::selected.eq(0))
                .execute(conn)?;
            debug!(request_id, bid_id, "Assignment revoked");
        }
        Ok(affected)
    })
}

/// Inserts a new, unselected bid.
///
/// # Errors
///
/// Returns an error if the insert fails (including a violated
/// one-bid-per-worker constraint).
pub fn insert_bid(
    conn: &mut SqliteConnection,
    request_id: i64,
    worker_id: &str,
    price: i64,
    deadline: &str,
    message: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(bids::table)
        .values((
            bids::request_id.eq(request_id),
            bids::worker_id.eq(worker_id),
            bids::price.eq(price),
            bids::deadline.eq(deadline),
            bids::message.eq(message),
        ))
        .execute(conn)?;

    let bid_id = get_last_insert_rowid(conn)?;
    debug!(request_id, bid_id, "Inserted bid row");
    Ok(bid_id)
}

/// Replaces the terms of an existing bid. The selected flag is never
/// touched here.
///
/// Returns the number of matched rows (0 or 1).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_bid_terms_row(
    conn: &mut SqliteConnection,
    bid_id: i64,
    price: i64,
    deadline: &str,
    message: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(bids::table)
        .filter(bids::bid_id.eq(bid_id))
        .set((
            bids::price.eq(price),
            bids::deadline.eq(deadline),
            bids::message.eq(message),
        ))
        .execute(conn)?)
}

/// Deletes a bid row.
///
/// Returns the number of deleted rows (0 or 1).
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_bid_row(conn: &mut SqliteConnection, bid_id: i64) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(bids::table)
        .filter(bids::bid_id.eq(bid_id))
        .execute(conn)?)
}
