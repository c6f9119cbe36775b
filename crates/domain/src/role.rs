// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor roles and the per-call actor identity.

use serde::{Deserialize, Serialize};

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
/// Role verification itself happens in the external auth layer; the
/// engine only consumes the verified result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Clients submit requests, select bids, and may cancel their own
    /// requests.
    Client,
    /// Workers (contractors) submit and revise bids on open requests.
    /// Workers never mutate the request row itself.
    Worker,
    /// Operators oversee the request lifecycle: status changes,
    /// cancellation, deletion flagging, restore, and unassignment.
    Operator,
    /// Admins hold every operator right plus bid deletion.
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Worker => "worker",
            Self::Operator => "operator",
            Self::Admin => "admin",
        }
    }

    /// Returns true for the oversight roles (operator, admin).
    #[must_use]
    pub const fn is_overseer(&self) -> bool {
        matches!(self, Self::Operator | Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated caller performing an action.
///
/// Supplied per call by the external auth layer; the engine never stores
/// actors and never trusts role claims beyond what that layer verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The verified role of this actor.
    pub role: Role,
}

impl Actor {
    /// Creates a new actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The verified role of this actor
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}
