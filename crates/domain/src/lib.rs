// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod authorization;
mod error;
mod role;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use authorization::{AuthorizationMatrix, RequestAction};
pub use error::DomainError;
pub use role::{Actor, Role};
pub use status::RequestStatus;
pub use types::{Bid, BidId, ClientId, RequestDetails, RequestId, ServiceRequest, WorkerId};
pub use validation::{validate_bid_terms, validate_request_details};
