// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation of caller-supplied input.

use crate::error::DomainError;
use crate::types::RequestDetails;

/// Validates the terms of a bid submission.
///
/// # Errors
///
/// Returns `DomainError::InvalidPrice` if the price is not strictly
/// positive.
pub const fn validate_bid_terms(price: i64) -> Result<(), DomainError> {
    if price <= 0 {
        return Err(DomainError::InvalidPrice { price });
    }
    Ok(())
}

/// Validates the descriptive fields of a new service request.
///
/// Only the catalog reference is load-bearing enough to require content;
/// material, size, and comment may be empty.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the product reference is empty.
pub fn validate_request_details(details: &RequestDetails) -> Result<(), DomainError> {
    if details.product_ref.trim().is_empty() {
        return Err(DomainError::EmptyField {
            field: "product_ref",
        });
    }
    Ok(())
}
