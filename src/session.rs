//! Session resolution helpers.
//!
//! Turns whatever the environment can produce — an auth identity, a stored
//! profile document, a local demo slot, or nothing at all — into a `User`.
//! The rule throughout: degrade, never block. A missing or broken profile
//! still yields a usable minimal identity.

use serde_json::Value;
use tracing::debug;

use crate::capabilities::AuthIdentity;
use crate::model::{User, UserId};

/// Decode the locally persisted demo session. Corrupt slots are treated as
/// absent.
pub fn decode_slot(raw: &str) -> Option<User> {
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(err) => {
            debug!(%err, "discarding corrupt session slot");
            None
        }
    }
}

pub fn encode_slot(user: &User) -> Option<String> {
    serde_json::to_string(user).ok()
}

/// Decode an extended-profile document. The authenticated uid always wins
/// over whatever id the document claims.
pub fn user_from_profile_doc(uid: &str, doc: Value) -> Option<User> {
    match serde_json::from_value::<User>(doc) {
        Ok(mut user) => {
            user.id = UserId(uid.to_string());
            Some(user)
        }
        Err(err) => {
            debug!(%err, uid, "profile document did not decode");
            None
        }
    }
}

/// Build the serialized form of a profile for persistence.
pub fn profile_doc(user: &User) -> Option<Value> {
    serde_json::to_value(user).ok()
}

/// The degraded session used when no extended profile is available: the raw
/// auth identity padded with placeholders.
pub fn minimal_user(identity: &AuthIdentity) -> User {
    User {
        id: UserId(identity.uid.clone()),
        username: identity
            .display_name
            .clone()
            .unwrap_or_else(|| "Explorer".to_string()),
        handle: "@explorer".to_string(),
        avatar_url: identity
            .photo_url
            .clone()
            .unwrap_or_else(|| "https://picsum.photos/100/100?random=1".to_string()),
        bio: None,
        cover_url: None,
        location: None,
        website: None,
        joined_date: None,
    }
}

/// Demo-mode sign-in: any credentials are accepted and a stable local user
/// is fabricated from the email.
pub fn demo_sign_in_user(email: &str) -> User {
    let username = email
        .split('@')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("Demo User")
        .to_string();
    User {
        id: UserId("mock-user-1".to_string()),
        username,
        handle: "@demo".to_string(),
        avatar_url: "https://picsum.photos/100/100?random=1".to_string(),
        bio: None,
        cover_url: None,
        location: None,
        website: None,
        joined_date: None,
    }
}

/// Demo-mode sign-up: a fresh local user keyed by the current time.
pub fn demo_sign_up_user(username: &str, now_ms: u64) -> User {
    let username = if username.trim().is_empty() {
        "Explorer".to_string()
    } else {
        username.to_string()
    };
    let handle = format!("@{}", username.to_lowercase().replace(char::is_whitespace, ""));
    User {
        id: UserId(format!("mock-user-{now_ms}")),
        username,
        handle,
        avatar_url: "https://picsum.photos/100/100?random=1".to_string(),
        bio: None,
        cover_url: None,
        location: None,
        website: None,
        joined_date: None,
    }
}
