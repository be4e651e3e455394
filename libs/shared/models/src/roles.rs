// libs/shared/models/src/roles.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Platform roles as established by the session layer before any cell
/// logic runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Patient,
    Doctor,
    Admin,
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorRole::Patient => write!(f, "patient"),
            ActorRole::Doctor => write!(f, "doctor"),
            ActorRole::Admin => write!(f, "admin"),
        }
    }
}

/// The authenticated caller a mutation runs on behalf of.
///
/// Cells receive the actor as a value and never look at session state
/// themselves; ownership checks compare `user_id` against the record's
/// participant ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(user_id: Uuid, role: ActorRole) -> Self {
        Self { user_id, role }
    }

    pub fn patient(user_id: Uuid) -> Self {
        Self::new(user_id, ActorRole::Patient)
    }

    pub fn doctor(user_id: Uuid) -> Self {
        Self::new(user_id, ActorRole::Doctor)
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self::new(user_id, ActorRole::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}
