//! Access Policy
//!
//! Explicit role -> allowed operations table. Request-handling code receives
//! an [`AccessPolicy`] value and asks it; nothing is wired globally.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use crate::domain::entity::authenticated_identity::AuthenticatedIdentity;
use crate::domain::value_object::role::Role;
use crate::error::AccessError;

/// Operations exposed to account holders
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum Operation {
    #[display("account")]
    #[serde(rename = "account")]
    ViewAccount,
    #[display("balance")]
    #[serde(rename = "balance")]
    ViewBalance,
    #[display("loans")]
    #[serde(rename = "loans")]
    ViewLoans,
    #[display("contact")]
    #[serde(rename = "contact")]
    ViewContact,
    #[display("notices")]
    #[serde(rename = "notices")]
    ViewNotices,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::ViewAccount,
        Operation::ViewBalance,
        Operation::ViewLoans,
        Operation::ViewContact,
        Operation::ViewNotices,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Operation::*;
        match self {
            ViewAccount => "account",
            ViewBalance => "balance",
            ViewLoans => "loans",
            ViewContact => "contact",
            ViewNotices => "notices",
        }
    }
}

impl FromStr for Operation {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.code() == s)
            .ok_or_else(|| AccessError::UnknownOperation(s.to_string()))
    }
}

/// Authorization table
///
/// Operations in `public` are open to anonymous callers. Everything else
/// requires an identity whose role is granted the operation. An empty policy
/// denies everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    #[serde(default)]
    public: BTreeSet<Operation>,
    #[serde(default)]
    grants: BTreeMap<Role, BTreeSet<Operation>>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contact and notices are public; account, balance and loans need
    /// `USER` or `ADMIN`.
    pub fn standard() -> Self {
        let protected = [
            Operation::ViewAccount,
            Operation::ViewBalance,
            Operation::ViewLoans,
        ];
        Self::new()
            .allow_public(Operation::ViewContact)
            .allow_public(Operation::ViewNotices)
            .grant(Role::user(), protected)
            .grant(Role::admin(), protected)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn allow_public(mut self, operation: Operation) -> Self {
        self.public.insert(operation);
        self
    }

    pub fn grant(mut self, role: Role, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.grants.entry(role).or_default().extend(operations);
        self
    }

    pub fn is_public(&self, operation: Operation) -> bool {
        self.public.contains(&operation)
    }

    /// Everything a role may do, public operations included
    pub fn allowed_operations(&self, role: &Role) -> BTreeSet<Operation> {
        let mut allowed = self.public.clone();
        if let Some(granted) = self.grants.get(role) {
            allowed.extend(granted.iter().copied());
        }
        allowed
    }

    /// Decide whether `identity` (or an anonymous caller) may run `operation`
    pub fn authorize(
        &self,
        identity: Option<&AuthenticatedIdentity>,
        operation: Operation,
    ) -> Result<(), AccessError> {
        if self.is_public(operation) {
            return Ok(());
        }

        let identity = identity.ok_or(AccessError::Unauthenticated)?;

        let granted = self
            .grants
            .get(identity.role())
            .is_some_and(|ops| ops.contains(&operation));

        if granted {
            Ok(())
        } else {
            Err(AccessError::Forbidden {
                role: identity.role().clone(),
                operation,
            })
        }
    }
}
