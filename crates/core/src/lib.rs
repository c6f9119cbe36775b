// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request lifecycle and bid-assignment engine.
//!
//! The engine composes four pieces:
//!
//! - the status state machine and authorization matrix from
//!   `artisan-domain`,
//! - the [`BidRegistry`], which enforces one-bid-per-worker-per-request,
//! - the [`AssignmentCoordinator`], which turns a client's choice of one
//!   bid into a durable, exclusive assignment via the store's conditional
//!   update,
//! - the [`RequestStore`]/[`BidStore`] contracts a storage backend must
//!   satisfy.
//!
//! All operations are synchronous request/response. The only
//! ordering-sensitive point is the conditional update inside
//! [`RequestStore::assign_bid`]; everything else is last-writer-wins on
//! the request `version`.

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

mod command;
mod coordinator;
mod engine;
mod error;
mod registry;
mod store;

#[cfg(test)]
mod tests;

pub use command::{Command, CommandOutcome};
pub use coordinator::AssignmentCoordinator;
pub use engine::Engine;
pub use error::EngineError;
pub use registry::BidRegistry;
pub use store::{BidStore, BidTerms, NewBid, NewServiceRequest, RequestStore, StoreError};
