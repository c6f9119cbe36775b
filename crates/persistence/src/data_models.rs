// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions into domain values.

use crate::error::PersistenceError;
use artisan_domain::{
    Bid, BidId, ClientId, RequestDetails, RequestId, RequestStatus, ServiceRequest, WorkerId,
};
use diesel::prelude::*;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Storage format of bid deadlines.
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Formats a deadline for storage.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_deadline(deadline: Date) -> Result<String, PersistenceError> {
    deadline
        .format(DATE_FORMAT)
        .map_err(|e| PersistenceError::RowConversion(format!("deadline format: {e}")))
}

/// Raw row of the `service_requests` table.
#[derive(Debug, Clone, Queryable)]
pub struct ServiceRequestRow {
    pub request_id: i64,
    pub client_id: String,
    pub product_ref: String,
    pub material: String,
    pub size: String,
    pub comment: String,
    pub status: String,
    pub assigned_bid_id: Option<i64>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl ServiceRequestRow {
    /// Converts the row into a domain request.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status string is not a valid
    /// request status.
    pub fn into_domain(self) -> Result<ServiceRequest, PersistenceError> {
        let status = self.status.parse::<RequestStatus>().map_err(|e| {
            PersistenceError::RowConversion(format!("request {}: {e}", self.request_id))
        })?;
        Ok(ServiceRequest {
            id: RequestId::new(self.request_id),
            client_id: ClientId::new(self.client_id),
            details: RequestDetails {
                product_ref: self.product_ref,
                material: self.material,
                size: self.size,
                comment: self.comment,
            },
            status,
            assigned_bid_id: self.assigned_bid_id.map(BidId::new),
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Raw row of the `bids` table.
#[derive(Debug, Clone, Queryable)]
pub struct BidRow {
    pub bid_id: i64,
    pub request_id: i64,
    pub worker_id: String,
    pub price: i64,
    pub deadline: String,
    pub message: String,
    pub selected: i32,
    pub created_at: String,
}

impl BidRow {
    /// Converts the row into a domain bid.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored deadline is not a valid date.
    pub fn into_domain(self) -> Result<Bid, PersistenceError> {
        let deadline = Date::parse(&self.deadline, DATE_FORMAT).map_err(|e| {
            PersistenceError::RowConversion(format!("bid {} deadline: {e}", self.bid_id))
        })?;
        Ok(Bid {
            id: BidId::new(self.bid_id),
            request_id: RequestId::new(self.request_id),
            worker_id: WorkerId::new(self.worker_id),
            price: self.price,
            deadline,
            message: self.message,
            selected: self.selected != 0,
            created_at: self.created_at,
        })
    }
}
