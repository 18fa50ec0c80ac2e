use serde::Serialize;

use crate::domain::value_object::{role::Role, username::Username};

/// Result of a successful authentication
///
/// Built fresh per call and never persisted. Fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedIdentity {
    username: Username,
    role: Role,
}

impl AuthenticatedIdentity {
    pub(crate) fn new(username: Username, role: Role) -> Self {
        Self { username, role }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn role(&self) -> &Role {
        &self.role
    }
}
