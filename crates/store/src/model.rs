//! Domain models shared by every store backend.

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// A registered account. The password is only ever held as an argon2
/// hash; the plaintext never reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
}

/// Sign-up payload for [`crate::Store::create_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
}

/// A project with its member set. The creator is the sole initial member;
/// members can be added but never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub member_user_ids: Vec<String>,
}

/// A to-do item owned by exactly one project. Not cascade-deleted when
/// its project is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToDo {
    pub id: String,
    pub content: String,
    pub is_completed: bool,
    pub project_id: String,
}

/// Partial update for a to-do. Only the supplied fields are written;
/// nothing else can reach the stored document.
#[derive(Debug, Clone, Default)]
pub struct ToDoPatch {
    pub content: Option<String>,
    pub is_completed: Option<bool>,
}
