// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite persistence layer for the Artisan marketplace back office.
//!
//! This crate implements the engine's store contracts on Diesel over
//! `SQLite`. The conditional updates the engine relies on are expressed
//! as single guarded `UPDATE` statements: a guard miss matches zero rows
//! and writes nothing, which is what makes concurrent bid selection
//! race-free without any application-level locking.
//!
//! The schema carries two backstops for invariants the engine also
//! enforces: a unique `(request_id, worker_id)` constraint (one bid per
//! worker per request) and a partial unique index on selected bids (at
//! most one winner per request).
//!
//! `SQLite` is the only backend. In-memory databases are used for
//! development and tests; file-based databases run in WAL mode.

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
#![allow(clippy::multiple_crate_versions)]

use artisan_domain::{Bid, BidId, RequestId, RequestStatus, ServiceRequest, WorkerId};
use artisan_engine::{BidStore, BidTerms, NewBid, NewServiceRequest, RequestStore, StoreError};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// SQLite-backed store implementing both engine persistence contracts.
///
/// The connection sits behind a mutex, so a single store can be shared
/// across threads behind an `Arc`. The guarded mutations remain the
/// point of truth for concurrency: even across separate connections,
/// the database evaluates each guard atomically.
pub struct SqliteStore {
    conn: Mutex<SqliteConnection>,
}

impl SqliteStore {
    /// Creates a store over an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_artisan_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates a store over a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, SqliteConnection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Backend(String::from("connection lock poisoned")))
    }

    fn load_request(
        conn: &mut SqliteConnection,
        id: RequestId,
    ) -> Result<ServiceRequest, StoreError> {
        queries::get_request_row(conn, id.value())?
            .ok_or(StoreError::RequestNotFound(id))?
            .into_domain()
            .map_err(Into::into)
    }

    fn load_bid(conn: &mut SqliteConnection, id: BidId) -> Result<Bid, StoreError> {
        queries::get_bid_row(conn, id.value())?
            .ok_or(StoreError::BidNotFound(id))?
            .into_domain()
            .map_err(Into::into)
    }

    fn request_exists(conn: &mut SqliteConnection, id: RequestId) -> Result<bool, StoreError> {
        Ok(queries::get_request_row(conn, id.value())?.is_some())
    }
}

impl RequestStore for SqliteStore {
    fn create_request(&self, new: NewServiceRequest) -> Result<ServiceRequest, StoreError> {
        let mut conn = self.lock()?;
        let request_id = mutations::insert_request(&mut conn, new.client_id.value(), &new.details)?;
        Self::load_request(&mut conn, RequestId::new(request_id))
    }

    fn get_request(&self, id: RequestId) -> Result<ServiceRequest, StoreError> {
        let mut conn = self.lock()?;
        Self::load_request(&mut conn, id)
    }

    fn update_status(
        &self,
        id: RequestId,
        expected_version: i64,
        target: RequestStatus,
    ) -> Result<ServiceRequest, StoreError> {
        let mut conn = self.lock()?;
        let affected =
            mutations::update_status_guarded(&mut conn, id.value(), expected_version, target.as_str())?;
        if affected == 0 {
            if Self::request_exists(&mut conn, id)? {
                return Err(StoreError::ConcurrentModification {
                    request_id: id,
                    expected_version,
                });
            }
            return Err(StoreError::RequestNotFound(id));
        }
        Self::load_request(&mut conn, id)
    }

    fn assign_bid(
        &self,
        id: RequestId,
        expected_version: i64,
        bid: BidId,
    ) -> Result<ServiceRequest, StoreError> {
        let mut conn = self.lock()?;
        if queries::get_bid_row(&mut conn, bid.value())?.is_none() {
            return Err(StoreError::BidNotFound(bid));
        }
        let affected =
            mutations::assign_bid_guarded(&mut conn, id.value(), expected_version, bid.value())?;
        if affected == 0 {
            if Self::request_exists(&mut conn, id)? {
                return Err(StoreError::AssignmentConflict { request_id: id });
            }
            return Err(StoreError::RequestNotFound(id));
        }
        Self::load_request(&mut conn, id)
    }

    fn revoke_assignment(
        &self,
        id: RequestId,
        expected_version: i64,
        target: RequestStatus,
    ) -> Result<ServiceRequest, StoreError> {
        let mut conn = self.lock()?;
        let affected = mutations::revoke_assignment_guarded(
            &mut conn,
            id.value(),
            expected_version,
            target.as_str(),
        )?;
        if affected == 0 {
            if Self::request_exists(&mut conn, id)? {
                return Err(StoreError::ConcurrentModification {
                    request_id: id,
                    expected_version,
                });
            }
            return Err(StoreError::RequestNotFound(id));
        }
        Self::load_request(&mut conn, id)
    }
}

impl BidStore for SqliteStore {
    fn create_bid(&self, new: NewBid) -> Result<Bid, StoreError> {
        let mut conn = self.lock()?;
        if !Self::request_exists(&mut conn, new.request_id)? {
            return Err(StoreError::RequestNotFound(new.request_id));
        }
        let deadline = data_models::format_deadline(new.terms.deadline)?;
        let bid_id = mutations::insert_bid(
            &mut conn,
            new.request_id.value(),
            new.worker_id.value(),
            new.terms.price,
            &deadline,
            &new.terms.message,
        )?;
        Self::load_bid(&mut conn, BidId::new(bid_id))
    }

    fn get_bid(&self, id: BidId) -> Result<Bid, StoreError> {
        let mut conn = self.lock()?;
        Self::load_bid(&mut conn, id)
    }

    fn find_bid_for_worker(
        &self,
        request_id: RequestId,
        worker_id: &WorkerId,
    ) -> Result<Option<Bid>, StoreError> {
        let mut conn = self.lock()?;
        queries::find_bid_row_for_worker(&mut conn, request_id.value(), worker_id.value())?
            .map(|row| row.into_domain().map_err(Into::into))
            .transpose()
    }

    fn update_bid_terms(&self, id: BidId, terms: BidTerms) -> Result<Bid, StoreError> {
        let mut conn = self.lock()?;
        let deadline = data_models::format_deadline(terms.deadline)?;
        let affected = mutations::update_bid_terms_row(
            &mut conn,
            id.value(),
            terms.price,
            &deadline,
            &terms.message,
        )?;
        if affected == 0 {
            return Err(StoreError::BidNotFound(id));
        }
        Self::load_bid(&mut conn, id)
    }

    fn list_bids(&self, request_id: RequestId) -> Result<Vec<Bid>, StoreError> {
        let mut conn = self.lock()?;
        queries::list_bid_rows(&mut conn, request_id.value())?
            .into_iter()
            .map(|row| row.into_domain().map_err(Into::into))
            .collect()
    }

    fn delete_bid(&self, id: BidId) -> Result<(), StoreError> {
        let mut conn = self.lock()?;
        let affected = mutations::delete_bid_row(&mut conn, id.value())?;
        if affected == 0 {
            return Err(StoreError::BidNotFound(id));
        }
        Ok(())
    }
}
